use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::TaskId;

pub const GREETING: &str = "Hello! I'm your AI Research Assistant. Upload some documents and I'll help you analyze them, answer questions, and provide insights. What would you like to know?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: TaskId,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Citation labels, present on generated assistant replies only.
    pub sources: Option<Vec<String>>,
}

/// Text and citations produced for one exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub text: String,
    pub citations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExchange {
    pub id: TaskId,
    pub prompt: String,
}

/// Append-only transcript with at most one outstanding exchange.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    pending: Option<PendingExchange>,
    input: String,
}

impl ChatSession {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn pending(&self) -> Option<&PendingExchange> {
        self.pending.as_ref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn can_send(&self) -> bool {
        self.pending.is_none() && !self.input.trim().is_empty()
    }

    pub(crate) fn set_input(&mut self, input: String) -> bool {
        if self.input == input {
            return false;
        }
        self.input = input;
        true
    }

    pub(crate) fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Records the user message and opens the exchange. Returns the trimmed prompt.
    pub(crate) fn begin_exchange(
        &mut self,
        message_id: TaskId,
        exchange_id: TaskId,
        at: DateTime<Utc>,
    ) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        let prompt = self.input.trim().to_string();
        self.input.clear();
        self.messages.push(ChatMessage {
            id: message_id,
            role: ChatRole::User,
            content: prompt.clone(),
            timestamp: at,
            sources: None,
        });
        self.pending = Some(PendingExchange {
            id: exchange_id,
            prompt: prompt.clone(),
        });
        Some(prompt)
    }

    /// Closes the pending exchange if `exchange_id` matches it.
    pub(crate) fn take_pending(&mut self, exchange_id: &TaskId) -> Option<PendingExchange> {
        match &self.pending {
            Some(pending) if &pending.id == exchange_id => self.pending.take(),
            _ => None,
        }
    }

    pub(crate) fn abandon_pending(&mut self) -> Option<PendingExchange> {
        self.pending.take()
    }
}
