use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed id of the seeded greeting message.
pub const GREETING_ID: &str = "greeting";

pub const GREETING_TEXT: &str = "您好！我是您的健康咨询助手。请告诉我您或家人目前有哪些不舒服的症状？我会帮您做初步分析。\n\n请注意：我的分析仅供参考，不能替代专业医生的诊断。";

/// Reply appended when the assistant could not be reached.
pub const APOLOGY_TEXT: &str = "抱歉，服务暂时不可用，请稍后重试。";

/// Who authored a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One turn of the triage conversation. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// The assistant greeting that seeds an empty conversation.
    pub fn greeting() -> Self {
        Self {
            id: GREETING_ID.to_string(),
            role: MessageRole::Assistant,
            content: GREETING_TEXT.to_string(),
            timestamp: Utc::now(),
        }
    }
}
