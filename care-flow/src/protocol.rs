//! Wire contract between clients and the AI proxy.
//!
//! The proxy answers every request kind with `{ "result": string }`. For
//! every kind except [`AiRequestKind::Triage`] that string is itself JSON and
//! has to be validated before it becomes a typed record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{CareError, Result};
use crate::models::{ChatMessage, MessageRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AiRequestKind {
    Report,
    Triage,
    TriageResult,
    Preparation,
}

impl AiRequestKind {
    pub const ALL: [AiRequestKind; 4] = [
        AiRequestKind::Report,
        AiRequestKind::Triage,
        AiRequestKind::TriageResult,
        AiRequestKind::Preparation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AiRequestKind::Report => "report",
            AiRequestKind::Triage => "triage",
            AiRequestKind::TriageResult => "triage-result",
            AiRequestKind::Preparation => "preparation",
        }
    }

    /// Kinds that forward a whole transcript instead of a single turn.
    pub fn is_multi_turn(self) -> bool {
        matches!(self, AiRequestKind::Triage | AiRequestKind::TriageResult)
    }
}

impl std::fmt::Display for AiRequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `{role, content}` pair as sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: MessageRole,
    pub content: String,
}

impl WireMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

impl From<&ChatMessage> for WireMessage {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRequest {
    #[serde(rename = "type")]
    pub kind: AiRequestKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<WireMessage>>,
    pub system_prompt: String,
}

impl AiRequest {
    pub fn single(kind: AiRequestKind, content: impl Into<String>, system_prompt: &str) -> Self {
        Self {
            kind,
            content: Some(content.into()),
            messages: None,
            system_prompt: system_prompt.to_string(),
        }
    }

    pub fn conversation(
        kind: AiRequestKind,
        messages: Vec<WireMessage>,
        system_prompt: &str,
    ) -> Self {
        Self {
            kind,
            content: None,
            messages: Some(messages),
            system_prompt: system_prompt.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiResponse {
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrResponse {
    pub text: String,
}

/// Validates a structured `result` payload into `T`.
///
/// A single surrounding Markdown code fence is tolerated; anything else that
/// does not match `T` exactly is a [`CareError::MalformedResponse`].
pub fn decode_result<T: DeserializeOwned>(kind: AiRequestKind, raw: &str) -> Result<T> {
    let cleaned = strip_code_fence(raw);
    serde_json::from_str::<T>(cleaned).map_err(|e| CareError::MalformedResponse {
        kind: kind.as_str(),
        reason: e.to_string(),
    })
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TriageResult;

    #[test]
    fn test_request_wire_shape() {
        let request = AiRequest::conversation(
            AiRequestKind::TriageResult,
            vec![WireMessage::user("头晕")],
            "prompt",
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "triage-result");
        assert_eq!(value["systemPrompt"], "prompt");
        assert_eq!(value["messages"][0]["role"], "user");
        assert!(value.get("content").is_none());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let raw = r#"{"type":"diagnose","content":"x","systemPrompt":"p"}"#;
        assert!(serde_json::from_str::<AiRequest>(raw).is_err());
    }

    #[test]
    fn test_decode_strips_code_fence() {
        let raw = "```json\n{\"possibleConditions\":[],\"recommendedDepartment\":\"内科\",\"urgencyLevel\":\"urgent\",\"additionalAdvice\":\"多喝水\"}\n```";
        let result: TriageResult = decode_result(AiRequestKind::TriageResult, raw).unwrap();
        assert_eq!(result.recommended_department, "内科");
    }

    #[test]
    fn test_decode_malformed_is_distinct_error() {
        let err = decode_result::<TriageResult>(AiRequestKind::TriageResult, "我无法判断")
            .unwrap_err();
        assert!(matches!(
            err,
            CareError::MalformedResponse {
                kind: "triage-result",
                ..
            }
        ));
    }
}
