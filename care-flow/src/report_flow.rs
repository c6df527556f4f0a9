//! Two-phase report flow: OCR, then AI analysis.
//!
//! `Upload -> Analyzing -> Result`, with `History` as a side entrance that
//! shows a stored report without re-analyzing it.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info};

use crate::{
    client::{CareApi, OcrService},
    error::{CareError, Result},
    models::MedicalReport,
    store::AppStore,
};

pub const OCR_FAILED_MESSAGE: &str = "图片识别失败";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportView {
    Upload,
    Analyzing,
    Result,
    History,
}

#[derive(Debug, Clone)]
struct FlowState {
    view: ReportView,
    current: Option<MedicalReport>,
    ocr_text: Option<String>,
    error: Option<String>,
}

pub struct ReportFlow {
    store: Arc<AppStore>,
    api: Arc<dyn CareApi>,
    ocr: Arc<dyn OcrService>,
    state: Mutex<FlowState>,
}

impl ReportFlow {
    pub fn new(store: Arc<AppStore>, api: Arc<dyn CareApi>, ocr: Arc<dyn OcrService>) -> Self {
        Self {
            store,
            api,
            ocr,
            state: Mutex::new(FlowState {
                view: ReportView::Upload,
                current: None,
                ocr_text: None,
                error: None,
            }),
        }
    }

    pub async fn view(&self) -> ReportView {
        self.state.lock().await.view
    }

    pub async fn current_report(&self) -> Option<MedicalReport> {
        self.state.lock().await.current.clone()
    }

    /// Recognized text of the upload in progress, shown while analyzing.
    pub async fn ocr_text(&self) -> Option<String> {
        self.state.lock().await.ocr_text.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    /// Runs both phases for one uploaded file.
    ///
    /// The report is stored as soon as OCR succeeds. If analysis then fails,
    /// that record stays in history with no analysis and the view returns
    /// to `Upload` with an error message.
    pub async fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<MedicalReport> {
        if bytes.is_empty() {
            return Err(CareError::InvalidInput("no file selected".to_string()));
        }

        {
            let mut state = self.state.lock().await;
            if state.view == ReportView::Analyzing {
                return Err(CareError::Busy);
            }
            state.view = ReportView::Analyzing;
            state.error = None;
            state.ocr_text = None;
        }

        info!(file_name = %file_name, "Starting report analysis");

        let ocr_text = match self.ocr.recognize(file_name, bytes).await {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "OCR failed");
                self.fail(OCR_FAILED_MESSAGE.to_string()).await;
                return Err(e);
            }
        };

        let report = MedicalReport::from_upload(file_name, ocr_text.clone());
        self.store.add_report(report.clone()).await;
        {
            let mut state = self.state.lock().await;
            state.ocr_text = Some(ocr_text.clone());
            state.current = Some(report.clone());
        }

        let analysis = match self.api.analyze_report(&ocr_text).await {
            Ok(analysis) => analysis,
            Err(e) => {
                error!(report_id = %report.id, error = %e, "Report analysis failed");
                self.fail(e.user_message().to_string()).await;
                return Err(e);
            }
        };

        self.store
            .update_report_analysis(&report.id, analysis.clone())
            .await?;

        let analyzed = MedicalReport {
            analysis: Some(analysis),
            ..report
        };

        let mut state = self.state.lock().await;
        state.current = Some(analyzed.clone());
        state.view = ReportView::Result;
        info!(report_id = %analyzed.id, "Report analysis completed");

        Ok(analyzed)
    }

    async fn fail(&self, message: String) {
        let mut state = self.state.lock().await;
        state.error = Some(message);
        state.view = ReportView::Upload;
    }

    /// Explicit navigation back to the upload view.
    pub async fn back(&self) {
        let mut state = self.state.lock().await;
        if state.view != ReportView::Analyzing {
            state.view = ReportView::Upload;
        }
    }

    /// Switches to the history list. Requires at least one stored report.
    pub async fn show_history(&self) -> Result<Vec<MedicalReport>> {
        let reports = self.store.reports().await;
        if reports.is_empty() {
            return Err(CareError::NotFound("no reports yet".to_string()));
        }
        let mut state = self.state.lock().await;
        if state.view == ReportView::Analyzing {
            return Err(CareError::Busy);
        }
        state.view = ReportView::History;
        Ok(reports)
    }

    /// Shows a stored report in the result view without analyzing it again.
    pub async fn open_report(&self, id: &str) -> Result<MedicalReport> {
        let report = self
            .store
            .report(id)
            .await
            .ok_or_else(|| CareError::NotFound(format!("report {id}")))?;
        let mut state = self.state.lock().await;
        state.current = Some(report.clone());
        state.view = ReportView::Result;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedApi;

    fn flow(api: ScriptedApi) -> (Arc<AppStore>, ReportFlow) {
        let store = Arc::new(AppStore::new());
        let api = Arc::new(api);
        let flow = ReportFlow::new(store.clone(), api.clone(), api);
        (store, flow)
    }

    #[tokio::test]
    async fn test_upload_reaches_result() {
        let (store, flow) = flow(ScriptedApi::default());
        assert_eq!(flow.view().await, ReportView::Upload);

        let report = flow.upload("体检报告.jpg", b"image").await.unwrap();
        assert_eq!(report.title, "体检报告");
        assert!(report.analysis.is_some());
        assert_eq!(flow.view().await, ReportView::Result);
        assert!(flow.ocr_text().await.is_some());

        let stored = store.report(&report.id).await.unwrap();
        assert_eq!(stored, report);
    }

    #[tokio::test]
    async fn test_failed_analysis_keeps_unanalyzed_record() {
        let (store, flow) = flow(ScriptedApi::failing_analysis());

        let err = flow.upload("scan.png", b"image").await.unwrap_err();
        assert!(matches!(err, CareError::MalformedResponse { .. }));
        assert_eq!(flow.view().await, ReportView::Upload);
        assert!(flow.error().await.is_some());

        let reports = store.reports().await;
        assert_eq!(reports.len(), 1);
        assert!(reports[0].analysis.is_none());
    }

    #[tokio::test]
    async fn test_failed_ocr_stores_nothing() {
        let (store, flow) = flow(ScriptedApi::failing());

        assert!(flow.upload("scan.png", b"image").await.is_err());
        assert_eq!(flow.error().await.as_deref(), Some(OCR_FAILED_MESSAGE));
        assert_eq!(flow.view().await, ReportView::Upload);
        assert!(store.reports().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_file_rejected() {
        let (_, flow) = flow(ScriptedApi::default());
        assert!(matches!(
            flow.upload("empty.jpg", b"").await,
            Err(CareError::InvalidInput(_))
        ));
        assert_eq!(flow.view().await, ReportView::Upload);
    }

    #[tokio::test]
    async fn test_history_and_back() {
        let (_, flow) = flow(ScriptedApi::default());
        assert!(flow.show_history().await.is_err());

        let report = flow.upload("a.jpg", b"image").await.unwrap();
        flow.back().await;
        assert_eq!(flow.view().await, ReportView::Upload);

        let history = flow.show_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(flow.view().await, ReportView::History);

        let opened = flow.open_report(&report.id).await.unwrap();
        assert_eq!(opened.id, report.id);
        assert_eq!(flow.view().await, ReportView::Result);
        assert!(flow.open_report("missing").await.is_err());
    }
}
