//! Client side of the AI proxy: one round trip per operation, no retries.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{error, info};

use crate::{
    error::{CareError, Result},
    models::{PreparationChecklist, ReportAnalysis, TriageResult},
    prompts,
    protocol::{AiRequest, AiRequestKind, AiResponse, OcrResponse, WireMessage, decode_result},
};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// The four AI-backed operations of the care assistant.
#[async_trait]
pub trait CareApi: Send + Sync {
    async fn analyze_report(&self, ocr_text: &str) -> Result<ReportAnalysis>;

    /// Returns the assistant's next reply as plain text.
    async fn send_triage_message(&self, messages: &[WireMessage]) -> Result<String>;

    async fn generate_triage_result(&self, messages: &[WireMessage]) -> Result<TriageResult>;

    async fn generate_preparation(
        &self,
        symptoms: &str,
        department: &str,
    ) -> Result<PreparationChecklist>;
}

/// Turns an uploaded file into raw report text.
#[async_trait]
pub trait OcrService: Send + Sync {
    async fn recognize(&self, file_name: &str, bytes: &[u8]) -> Result<String>;
}

/// [`CareApi`] and [`OcrService`] over HTTP against the AI proxy.
#[derive(Clone)]
pub struct HttpCareClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCareClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Uses `CARE_API_BASE_URL`, falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("CARE_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call(&self, request: &AiRequest) -> Result<String> {
        info!(kind = %request.kind, "Sending AI proxy request");

        let response = self
            .http
            .post(format!("{}/api/claude", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(kind = %request.kind, status = %status, "AI proxy request failed");
            return Err(CareError::RequestFailed(format!(
                "AI proxy responded with {status}"
            )));
        }

        let body: AiResponse = response.json().await?;
        Ok(body.result)
    }
}

#[async_trait]
impl CareApi for HttpCareClient {
    async fn analyze_report(&self, ocr_text: &str) -> Result<ReportAnalysis> {
        let request = AiRequest::single(
            AiRequestKind::Report,
            ocr_text,
            prompts::REPORT_SYSTEM_PROMPT,
        );
        let raw = self.call(&request).await?;
        decode_result(AiRequestKind::Report, &raw)
    }

    async fn send_triage_message(&self, messages: &[WireMessage]) -> Result<String> {
        let request = AiRequest::conversation(
            AiRequestKind::Triage,
            messages.to_vec(),
            prompts::TRIAGE_SYSTEM_PROMPT,
        );
        self.call(&request).await
    }

    async fn generate_triage_result(&self, messages: &[WireMessage]) -> Result<TriageResult> {
        let mut transcript = messages.to_vec();
        transcript.push(WireMessage::user(prompts::TRIAGE_SUMMARY_INSTRUCTION));

        let request = AiRequest::conversation(
            AiRequestKind::TriageResult,
            transcript,
            prompts::TRIAGE_RESULT_SYSTEM_PROMPT,
        );
        let raw = self.call(&request).await?;
        decode_result(AiRequestKind::TriageResult, &raw)
    }

    async fn generate_preparation(
        &self,
        symptoms: &str,
        department: &str,
    ) -> Result<PreparationChecklist> {
        let request = AiRequest::single(
            AiRequestKind::Preparation,
            prompts::preparation_content(symptoms, department),
            prompts::PREPARATION_SYSTEM_PROMPT,
        );
        let raw = self.call(&request).await?;
        decode_result(AiRequestKind::Preparation, &raw)
    }
}

#[async_trait]
impl OcrService for HttpCareClient {
    async fn recognize(&self, file_name: &str, bytes: &[u8]) -> Result<String> {
        info!(file_name = %file_name, size = bytes.len(), "Uploading file for OCR");

        let part = Part::bytes(bytes.to_vec()).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/api/ocr", self.base_url))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            error!(status = %response.status(), "OCR request failed");
            return Err(CareError::RequestFailed("图片识别失败".to_string()));
        }

        let body: OcrResponse = response.json().await?;
        Ok(body.text)
    }
}
