use std::fmt;

use thiserror::Error;

/// Identifier assigned by the caller; the engine treats it as opaque.
pub type TimerId = String;

/// One scheduled piece of work, keyed by what it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimerKey {
    Upload(TimerId),
    Reply(TimerId),
    Search(TimerId),
}

impl fmt::Display for TimerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerKey::Upload(id) => write!(f, "upload:{id}"),
            TimerKey::Reply(id) => write!(f, "reply:{id}"),
            TimerKey::Search(id) => write!(f, "search:{id}"),
        }
    }
}

/// Generated answer text with its citation labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub citations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Recurring upload timer fired; `roll` is in `(0, 1]`.
    UploadTick { task_id: TimerId, roll: f64 },
    ReplyReady { exchange_id: TimerId, reply: Reply },
    ReplyFailed {
        exchange_id: TimerId,
        error: ProviderError,
    },
    SearchReady { search_id: TimerId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("response provider unavailable: {0}")]
    Unavailable(String),
    #[error("response provider returned an empty reply")]
    EmptyReply,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("engine is no longer running")]
    Stopped,
}
