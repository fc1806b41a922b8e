//! Assistant core: pure state machine for simulated uploads, chat and search.
mod chat;
mod effect;
mod format;
mod msg;
mod registry;
mod search;
mod state;
mod task;
mod update;
mod view_model;

pub use chat::{ChatMessage, ChatReply, ChatRole, ChatSession, PendingExchange, GREETING};
pub use effect::{Effect, Notice, NoticeSeverity};
pub use format::format_file_size;
pub use msg::Msg;
pub use registry::TaskRegistry;
pub use search::{
    search_catalog, PendingSearch, RelevanceBand, ResultFilter, ResultKind, SearchRecord,
    SearchSession, CATALOG,
};
pub use state::{AppState, SessionState};
pub use task::{
    is_supported_media_type, FileDescriptor, TaskId, TaskState, TickOutcome, UploadTask,
    MIN_ROLL, PROCESSING_STEP_MAX, PROGRESS_COMPLETE, UPLOAD_STEP_MAX,
};
pub use update::update;
pub use view_model::{AppViewModel, ChatMessageView, SearchResultView, UploadRowView};
