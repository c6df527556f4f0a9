//! Completion backends behind the proxy endpoint.
//!
//! The backend is chosen once at startup: with a credential the proxy talks
//! to the live model, without one every request gets a canned answer.

pub mod live;
pub mod mock;

use std::sync::Arc;

use async_trait::async_trait;
use care_flow::AiRequest;
use tracing::info;

use crate::config::ProxyConfig;

pub use live::LiveProvider;
pub use mock::MockProvider;

#[async_trait]
pub trait AiProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the raw `result` string for one proxy request.
    async fn complete(&self, request: &AiRequest) -> anyhow::Result<String>;
}

pub fn select_provider(config: &ProxyConfig) -> Arc<dyn AiProvider> {
    match &config.api_key {
        Some(api_key) => {
            info!(model = %config.model, "Using live AI provider");
            Arc::new(LiveProvider::new(api_key, &config.model))
        }
        None => {
            info!("ANTHROPIC_API_KEY not set, running in demo mode");
            Arc::new(MockProvider)
        }
    }
}
