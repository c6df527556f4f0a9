use ai_proxy_service::{
    ProxyConfig, create_app,
    telemetry::{LogFormat, init_tracing},
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(LogFormat::from_env());

    let config = ProxyConfig::from_env();
    let app = create_app(&config);

    let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    let addr = listener.local_addr()?;

    info!(demo_mode = config.demo_mode(), "Family Care AI proxy starting on {}", addr);
    info!("Health check endpoint: http://{}/health", addr);
    info!("AI endpoint: POST http://{}/api/claude", addr);
    info!("OCR endpoint: POST http://{}/api/ocr", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
