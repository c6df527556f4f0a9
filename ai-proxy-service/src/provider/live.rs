use anyhow::{Context as _, anyhow, bail};
use async_trait::async_trait;
use care_flow::{AiRequest, MessageRole, WireMessage};
use rig::{
    client::CompletionClient,
    completion::{AssistantContent, CompletionModel, Message},
    providers::anthropic,
};
use tracing::info;

use super::AiProvider;

pub const MULTI_TURN_MAX_TOKENS: u64 = 2048;
pub const SINGLE_TURN_MAX_TOKENS: u64 = 4096;

/// Forwards proxy requests to Anthropic through rig.
pub struct LiveProvider {
    client: anthropic::Client,
    model: String,
}

impl LiveProvider {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            client: anthropic::Client::new(api_key),
            model: model.to_string(),
        }
    }
}

fn to_rig_message(message: &WireMessage) -> Message {
    match message.role {
        MessageRole::User => Message::user(message.content.clone()),
        MessageRole::Assistant => Message::assistant(message.content.clone()),
    }
}

/// Splits a transcript into the history and the final turn sent as the prompt.
fn split_transcript(messages: &[WireMessage]) -> anyhow::Result<(Vec<Message>, Message)> {
    let (last, history) = messages
        .split_last()
        .ok_or_else(|| anyhow!("conversation request has no messages"))?;
    Ok((
        history.iter().map(to_rig_message).collect(),
        to_rig_message(last),
    ))
}

#[async_trait]
impl AiProvider for LiveProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn complete(&self, request: &AiRequest) -> anyhow::Result<String> {
        let (history, prompt, max_tokens) = if request.kind.is_multi_turn() {
            let messages = request
                .messages
                .as_deref()
                .context("messages are required for conversation requests")?;
            let (history, prompt) = split_transcript(messages)?;
            (history, prompt, MULTI_TURN_MAX_TOKENS)
        } else {
            let Some(content) = request.content.as_deref() else {
                bail!("content is required for {} requests", request.kind);
            };
            (vec![], Message::user(content), SINGLE_TURN_MAX_TOKENS)
        };

        info!(
            kind = %request.kind,
            model = %self.model,
            history = history.len(),
            "Calling completion model"
        );

        let model = self.client.completion_model(&self.model);
        let response = model
            .completion_request(prompt)
            .preamble(request.system_prompt.clone())
            .messages(history)
            .max_tokens(max_tokens)
            .send()
            .await?;

        // Only the first content block is used; anything but text reads as empty.
        let text = match response.choice.iter().next() {
            Some(AssistantContent::Text(text)) => text.text.clone(),
            _ => String::new(),
        };
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_transcript() {
        let messages = vec![
            WireMessage {
                role: MessageRole::Assistant,
                content: "您好".to_string(),
            },
            WireMessage::user("头晕"),
        ];
        let (history, _prompt) = split_transcript(&messages).unwrap();
        assert_eq!(history.len(), 1);
        assert!(split_transcript(&[]).is_err());
    }
}
