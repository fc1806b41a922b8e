use serde::Serialize;

use crate::{ChatRole, RelevanceBand, ResultFilter, ResultKind, SessionState, TaskId, TaskState};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AppViewModel {
    pub session: SessionState,
    pub uploads: Vec<UploadRowView>,
    pub upload_count: usize,
    pub transcript: Vec<ChatMessageView>,
    pub chat_input: String,
    pub chat_pending: bool,
    pub can_send: bool,
    pub search_query: String,
    pub searching: bool,
    /// Revealed results admitted by the active tab.
    pub results: Vec<SearchResultView>,
    /// Revealed results across all tabs.
    pub result_count: usize,
    pub active_filter: ResultFilter,
    pub show_search_tips: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadRowView {
    pub task_id: TaskId,
    pub name: String,
    pub size_label: String,
    pub media_type: String,
    pub state: TaskState,
    /// Whole percent, 0..=100.
    pub progress: u8,
    pub status_text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessageView {
    pub id: TaskId,
    pub role: ChatRole,
    pub content: String,
    /// `HH:MM` in UTC.
    pub time: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResultView {
    pub id: &'static str,
    pub title: &'static str,
    pub snippet: &'static str,
    pub source: &'static str,
    pub kind: ResultKind,
    pub relevance: u8,
    pub band: RelevanceBand,
    pub date: &'static str,
    pub author: Option<&'static str>,
}
