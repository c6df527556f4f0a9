use thiserror::Error;

/// Errors surfaced by the care-flow client, state machines and store.
#[derive(Debug, Error)]
pub enum CareError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("malformed {kind} response: {reason}")]
    MalformedResponse { kind: &'static str, reason: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("a request is already in flight")]
    Busy,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conversation was restarted while the request was in flight")]
    Stale,
}

impl CareError {
    /// Short localized message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            CareError::RequestFailed(_) => "请求失败，请稍后重试",
            CareError::MalformedResponse { .. } => "AI 返回的内容无法解析，请重试",
            CareError::InvalidInput(_) => "请输入完整信息",
            CareError::Busy => "正在处理中，请稍候",
            CareError::NotFound(_) => "记录不存在",
            CareError::Stale => "对话已重新开始",
        }
    }
}

impl From<reqwest::Error> for CareError {
    fn from(err: reqwest::Error) -> Self {
        CareError::RequestFailed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CareError>;
