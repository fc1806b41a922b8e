use chrono::{DateTime, Utc};

use crate::{ChatReply, FileDescriptor, ResultFilter, TaskId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The front end is ready; seeds the assistant greeting.
    SessionStarted { at: DateTime<Utc> },
    /// User picked or dropped files; each one is validated on its own.
    FilesSubmitted {
        files: Vec<FileDescriptor>,
        at: DateTime<Utc>,
    },
    /// Upload timer fired. `roll` is the drawn fraction of the phase's max step.
    UploadTick { task_id: TaskId, roll: f64 },
    /// User removed an upload from the list.
    RemoveUpload { task_id: TaskId },
    /// User edited the chat input box.
    ChatInputChanged(String),
    /// User sent the current chat input.
    ChatSubmitted { at: DateTime<Utc> },
    /// Simulated response arrived for an exchange.
    ChatReplyReady {
        exchange_id: TaskId,
        reply: ChatReply,
        at: DateTime<Utc>,
    },
    /// Response provider gave up on an exchange.
    ChatReplyFailed { exchange_id: TaskId, reason: String },
    /// User edited the search box.
    SearchQueryChanged(String),
    /// User started a search with the current query.
    SearchSubmitted,
    /// Simulated search latency elapsed.
    SearchDelayElapsed { search_id: TaskId },
    /// User switched the result tab.
    ResultTabSelected(ResultFilter),
    /// Owning view is going away; everything in flight is cancelled.
    SessionEnded,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
