//! Chat-style shopping copilot session.
//!
//! A copilot session is an append-only message log plus a single-in-flight
//! request gate. Exactly one advice request may be outstanding at a time;
//! that boolean gate is the session's entire concurrency discipline. The
//! external advice call is the only suspension point, and any provider
//! failure is absorbed into a fixed fallback reply - nothing here ever
//! propagates an advice error to the UI layer.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{instrument, warn};

use verdantia_core::{ChatMessageId, ChatRole};

use crate::advisor::{AdviceContext, AdviceProvider};

/// Assistant reply substituted when the advice call fails.
pub const FALLBACK_REPLY: &str =
    "Sorry, the shopping copilot is unavailable right now. Please try again in a moment.";

/// Copilot session errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CopilotError {
    /// A request is already outstanding; the send affordance should be
    /// disabled, but a race-y second call is rejected rather than queued.
    #[error("a copilot request is already in flight")]
    RequestInFlight,
}

/// One entry in the copilot's message log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message ID.
    pub id: ChatMessageId,
    /// Who sent the message.
    pub role: ChatRole,
    /// Message text.
    pub text: String,
    /// When the message was appended.
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    fn now(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: ChatMessageId::generate(),
            role,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// Message log plus single-in-flight gate for one shopper session.
pub struct CopilotSession {
    messages: Vec<ChatMessage>,
    in_flight: bool,
    advisor: Arc<dyn AdviceProvider>,
}

impl CopilotSession {
    /// Create a session backed by the given advice provider.
    #[must_use]
    pub fn new(advisor: Arc<dyn AdviceProvider>) -> Self {
        Self {
            messages: Vec::new(),
            in_flight: false,
            advisor,
        }
    }

    /// The full message log in append order.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether an advice request is outstanding.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Send a shopper question to the copilot.
    ///
    /// Whitespace-only input is a silent no-op returning no new messages.
    /// Otherwise the user message is appended immediately, the advice
    /// provider is called once with the given context, and exactly one
    /// assistant message is appended - the provider's reply, or
    /// [`FALLBACK_REPLY`] if the call fails. Returns the newly appended
    /// messages.
    ///
    /// # Errors
    ///
    /// Returns [`CopilotError::RequestInFlight`] if a request is already
    /// outstanding; the log is left unchanged.
    #[instrument(skip(self, text, context))]
    pub async fn send(
        &mut self,
        text: &str,
        context: &AdviceContext,
    ) -> Result<Vec<ChatMessage>, CopilotError> {
        let query = text.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        if self.in_flight {
            return Err(CopilotError::RequestInFlight);
        }

        let user_message = ChatMessage::now(ChatRole::User, query);
        self.messages.push(user_message.clone());

        self.in_flight = true;
        let reply = match self.advisor.advise(query, context).await {
            Ok(reply) => reply,
            Err(error) => {
                warn!(%error, "advice call failed, falling back");
                FALLBACK_REPLY.to_string()
            }
        };
        self.in_flight = false;

        let assistant_message = ChatMessage::now(ChatRole::Assistant, reply);
        self.messages.push(assistant_message.clone());

        Ok(vec![user_message, assistant_message])
    }
}

impl std::fmt::Debug for CopilotSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopilotSession")
            .field("messages", &self.messages.len())
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use crate::advisor::AdviceError;

    use super::*;

    struct CannedAdvisor(&'static str);

    #[async_trait]
    impl AdviceProvider for CannedAdvisor {
        async fn advise(&self, _: &str, _: &AdviceContext) -> Result<String, AdviceError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingAdvisor;

    #[async_trait]
    impl AdviceProvider for FailingAdvisor {
        async fn advise(&self, _: &str, _: &AdviceContext) -> Result<String, AdviceError> {
            Err(AdviceError::Unauthorized("invalid API key".to_string()))
        }
    }

    #[tokio::test]
    async fn test_empty_send_leaves_log_unchanged() {
        let mut session = CopilotSession::new(Arc::new(CannedAdvisor("hi")));

        let appended = session
            .send("   \t  ", &AdviceContext::default())
            .await
            .expect("empty send");

        assert!(appended.is_empty());
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn test_send_appends_user_then_assistant() {
        let mut session = CopilotSession::new(Arc::new(CannedAdvisor("Try the Fern Speaker.")));

        let appended = session
            .send("what's a good speaker?", &AdviceContext::default())
            .await
            .expect("send");

        assert_eq!(appended.len(), 2);
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].role, ChatRole::User);
        assert_eq!(session.messages()[0].text, "what's a good speaker?");
        assert_eq!(session.messages()[1].role, ChatRole::Assistant);
        assert_eq!(session.messages()[1].text, "Try the Fern Speaker.");
        assert!(!session.is_in_flight());
    }

    #[tokio::test]
    async fn test_provider_failure_appends_fallback() {
        let mut session = CopilotSession::new(Arc::new(FailingAdvisor));

        session
            .send("hello", &AdviceContext::default())
            .await
            .expect("send");

        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].role, ChatRole::Assistant);
        assert_eq!(session.messages()[1].text, FALLBACK_REPLY);
        assert!(!session.is_in_flight());
    }

    #[tokio::test]
    async fn test_send_rejected_while_in_flight() {
        let mut session = CopilotSession::new(Arc::new(CannedAdvisor("hi")));
        session.in_flight = true;

        let result = session.send("hello", &AdviceContext::default()).await;

        assert!(matches!(result, Err(CopilotError::RequestInFlight)));
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn test_messages_keep_monotonic_timestamps() {
        let mut session = CopilotSession::new(Arc::new(CannedAdvisor("a")));
        session
            .send("first", &AdviceContext::default())
            .await
            .expect("send");
        session
            .send("second", &AdviceContext::default())
            .await
            .expect("send");

        let log = session.messages();
        assert_eq!(log.len(), 4);
        for pair in log.windows(2) {
            assert!(pair[0].created_at <= pair[1].created_at);
        }
    }
}
