//! Symptom triage conversation: `Empty -> Active -> Resulted`, reset back to `Empty`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use crate::{
    client::CareApi,
    error::{CareError, Result},
    models::{ChatMessage, TriageResult, chat::APOLOGY_TEXT},
    protocol::WireMessage,
    store::AppStore,
};

/// Transcript length that must be exceeded before a result can be generated.
pub const MIN_MESSAGES_FOR_RESULT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriagePhase {
    Empty,
    Active,
    Resulted,
}

/// Drives one triage conversation held in an [`AppStore`].
///
/// At most one AI call is in flight per conversation; a second `send` or
/// `generate_result` while one is pending fails with [`CareError::Busy`].
pub struct TriageConversation {
    store: Arc<AppStore>,
    api: Arc<dyn CareApi>,
    in_flight: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl TriageConversation {
    pub fn new(store: Arc<AppStore>, api: Arc<dyn CareApi>) -> Self {
        Self {
            store,
            api,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> Result<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CareError::Busy)?;
        Ok(InFlight(&self.in_flight))
    }

    pub async fn phase(&self) -> TriagePhase {
        let chat = self.store.chat_snapshot().await;
        if chat.messages.is_empty() {
            TriagePhase::Empty
        } else if chat.result.is_some() {
            TriagePhase::Resulted
        } else {
            TriagePhase::Active
        }
    }

    /// Seeds the greeting into an empty conversation. Returns true if it did.
    pub async fn open(&self) -> bool {
        self.store
            .with_chat(|chat| {
                if chat.messages.is_empty() {
                    chat.messages.push(ChatMessage::greeting());
                    true
                } else {
                    false
                }
            })
            .await
    }

    pub async fn can_generate(&self) -> bool {
        self.store.chat_snapshot().await.messages.len() > MIN_MESSAGES_FOR_RESULT
    }

    /// Appends the user's turn, asks for the next reply and appends it.
    ///
    /// A failed AI call is answered with a fixed apology message rather than
    /// an error, so the transcript always alternates. If the conversation was
    /// restarted meanwhile, the reply is dropped and [`CareError::Stale`] returned.
    pub async fn send(&self, text: &str) -> Result<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CareError::InvalidInput("message is empty".to_string()));
        }
        let _guard = self.begin()?;

        let (epoch, transcript) = self
            .store
            .with_chat(|chat| {
                if chat.messages.is_empty() {
                    chat.messages.push(ChatMessage::greeting());
                }
                chat.messages.push(ChatMessage::user(text));
                let transcript: Vec<WireMessage> =
                    chat.messages.iter().map(WireMessage::from).collect();
                (chat.epoch, transcript)
            })
            .await;

        info!(turns = transcript.len(), "Sending triage message");

        let reply = match self.api.send_triage_message(&transcript).await {
            Ok(reply) => ChatMessage::assistant(reply),
            Err(e) => {
                warn!(error = %e, "Triage reply failed, answering with apology");
                ChatMessage::assistant(APOLOGY_TEXT)
            }
        };

        let appended = self
            .store
            .with_chat(|chat| {
                if chat.epoch == epoch {
                    chat.messages.push(reply.clone());
                    true
                } else {
                    false
                }
            })
            .await;
        if !appended {
            info!("Conversation was restarted, dropping stale reply");
            return Err(CareError::Stale);
        }

        Ok(reply)
    }

    /// Closes the conversation into a structured [`TriageResult`].
    ///
    /// On failure the conversation stays as it was. A result that arrives
    /// after a restart is dropped with [`CareError::Stale`].
    pub async fn generate_result(&self) -> Result<TriageResult> {
        let _guard = self.begin()?;

        let (epoch, transcript) = self
            .store
            .with_chat(|chat| {
                let transcript: Vec<WireMessage> =
                    chat.messages.iter().map(WireMessage::from).collect();
                (chat.epoch, transcript)
            })
            .await;

        if transcript.len() <= MIN_MESSAGES_FOR_RESULT {
            return Err(CareError::InvalidInput(
                "not enough conversation to analyze".to_string(),
            ));
        }

        let result = self
            .api
            .generate_triage_result(&transcript)
            .await
            .inspect_err(|e| warn!(error = %e, "Triage result generation failed"))?;

        info!(
            urgency = ?result.urgency_level,
            department = %result.recommended_department,
            "Triage result generated"
        );

        let stored = self
            .store
            .with_chat(|chat| {
                if chat.epoch == epoch {
                    chat.result = Some(result.clone());
                    true
                } else {
                    false
                }
            })
            .await;
        if !stored {
            info!("Conversation was restarted, dropping stale result");
            return Err(CareError::Stale);
        }

        Ok(result)
    }

    /// Clears transcript and result together and returns to `Empty`.
    pub async fn restart(&self) {
        self.store.clear_chat().await;
        info!("Triage conversation restarted");
    }
}
