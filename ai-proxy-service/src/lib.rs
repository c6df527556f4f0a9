pub mod config;
pub mod ocr;
pub mod provider;
pub mod service;
pub mod telemetry;

pub use config::ProxyConfig;
pub use provider::{AiProvider, LiveProvider, MockProvider, select_provider};
pub use service::{AppState, build_router, create_app};
