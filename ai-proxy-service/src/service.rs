use axum::{
    Router,
    extract::{
        Multipart, State,
        multipart::MultipartRejection,
        rejection::JsonRejection,
    },
    http::StatusCode,
    middleware::from_fn,
    response::Json,
    routing::{get, post},
};
use care_flow::{AiRequest, AiResponse, ErrorBody, OcrResponse};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::{
    config::ProxyConfig,
    ocr::SAMPLE_REPORT_TEXT,
    provider::{AiProvider, select_provider},
    telemetry::correlation_id_middleware,
};

pub const AI_UNAVAILABLE_MESSAGE: &str = "AI 服务暂时不可用，请稍后重试";
pub const NO_FILE_MESSAGE: &str = "未上传文件";
pub const OCR_FAILED_MESSAGE: &str = "图片识别失败，请重试";

type ApiError = (StatusCode, Json<ErrorBody>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn AiProvider>,
}

pub fn create_app(config: &ProxyConfig) -> Router {
    let app_state = AppState {
        provider: select_provider(config),
    };
    build_router(app_state)
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/claude", post(complete))
        .route("/api/ocr", post(recognize))
        .layer(from_fn(correlation_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Family Care AI Proxy",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Forwards report, triage and preparation requests to the AI provider",
        "endpoints": {
            "POST /api/claude": "Run one AI request ({type, content|messages, systemPrompt})",
            "POST /api/ocr": "Recognize text from an uploaded report (multipart field `file`)",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "provider": state.provider.name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn complete(
    State(state): State<AppState>,
    payload: Result<Json<AiRequest>, JsonRejection>,
) -> ApiResult<AiResponse> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected malformed AI request");
        api_error(StatusCode::BAD_REQUEST, &rejection.body_text())
    })?;

    info!(
        kind = %request.kind,
        provider = state.provider.name(),
        turns = request.messages.as_ref().map_or(0, Vec::len),
        "Processing AI request"
    );

    match state.provider.complete(&request).await {
        Ok(result) => {
            info!(kind = %request.kind, result_length = result.len(), "AI request completed");
            Ok(Json(AiResponse { result }))
        }
        Err(e) => {
            error!(kind = %request.kind, error = %e, "AI request failed");
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                AI_UNAVAILABLE_MESSAGE,
            ))
        }
    }
}

async fn recognize(multipart: Result<Multipart, MultipartRejection>) -> ApiResult<OcrResponse> {
    let mut multipart = multipart.map_err(|rejection| {
        error!(error = %rejection.body_text(), "Unreadable OCR upload");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, OCR_FAILED_MESSAGE)
    })?;

    loop {
        let field = multipart.next_field().await.map_err(|e| {
            error!(error = %e, "Failed to read OCR upload");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, OCR_FAILED_MESSAGE)
        })?;

        let Some(field) = field else {
            return Err(api_error(StatusCode::BAD_REQUEST, NO_FILE_MESSAGE));
        };
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await.map_err(|e| {
            error!(error = %e, "Failed to read OCR file field");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, OCR_FAILED_MESSAGE)
        })?;

        info!(file_name = %file_name, size = bytes.len(), "Recognizing uploaded report");
        return Ok(Json(OcrResponse {
            text: SAMPLE_REPORT_TEXT.to_string(),
        }));
    }
}
