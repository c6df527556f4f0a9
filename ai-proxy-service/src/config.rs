use tracing::warn;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Settings read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub port: u16,
    /// `None` selects demo mode.
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl ProxyConfig {
    pub fn from_env() -> Self {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                warn!(port = %raw, "Invalid PORT, using default");
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        Self {
            port,
            api_key: non_blank(std::env::var("ANTHROPIC_API_KEY").ok()),
            model: non_blank(std::env::var("AI_MODEL").ok())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    pub fn demo_mode(&self) -> bool {
        self.api_key.is_none()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_means_demo_mode() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some("sk".to_string())), Some("sk".to_string()));

        let config = ProxyConfig::default();
        assert!(config.demo_mode());
        assert_eq!(config.model, DEFAULT_MODEL);
    }
}
