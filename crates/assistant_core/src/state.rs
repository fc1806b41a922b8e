use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::chat::{ChatMessage, ChatRole, ChatSession, GREETING};
use crate::search::SearchSession;
use crate::view_model::{AppViewModel, ChatMessageView, SearchResultView, UploadRowView};
use crate::{RelevanceBand, TaskId, TaskRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SessionState {
    #[default]
    Open,
    /// No further intake; timers have been asked to stop.
    Ended,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    session: SessionState,
    uploads: TaskRegistry,
    chat: ChatSession,
    search: SearchSession,
    next_seq: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn uploads(&self) -> &TaskRegistry {
        &self.uploads
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    pub fn view(&self) -> AppViewModel {
        let uploads = self
            .uploads
            .iter()
            .map(|task| UploadRowView {
                task_id: task.id().clone(),
                name: task.name().to_string(),
                size_label: task.size_label().to_string(),
                state: task.state(),
                media_type: task.media_type().to_string(),
                // Floor so 100% only shows once the phase has clamped.
                progress: task.progress().floor() as u8,
                status_text: task.state().status_text(),
            })
            .collect::<Vec<_>>();

        let transcript = self
            .chat
            .messages()
            .iter()
            .map(|message| ChatMessageView {
                id: message.id.clone(),
                role: message.role,
                content: message.content.clone(),
                time: message.timestamp.format("%H:%M").to_string(),
                sources: message.sources.clone().unwrap_or_default(),
            })
            .collect();

        let results = self
            .search
            .visible_results()
            .map(|record| SearchResultView {
                id: record.id,
                title: record.title,
                snippet: record.snippet,
                source: record.source,
                kind: record.kind,
                relevance: record.relevance,
                band: RelevanceBand::of(record.relevance),
                date: record.date,
                author: record.author,
            })
            .collect();

        AppViewModel {
            session: self.session,
            upload_count: uploads.len(),
            uploads,
            transcript,
            chat_input: self.chat.input().to_string(),
            chat_pending: self.chat.pending().is_some(),
            can_send: self.session == SessionState::Open && self.chat.can_send(),
            search_query: self.search.query().to_string(),
            searching: self.search.is_searching(),
            results,
            result_count: self.search.results().len(),
            active_filter: self.search.filter(),
            show_search_tips: self.search.results().is_empty() && !self.search.is_searching(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Ids are never reused within a session: the counter only grows.
    pub(crate) fn next_id(&mut self, prefix: &str) -> TaskId {
        self.next_seq += 1;
        TaskId::new(format!("{prefix}-{}", self.next_seq))
    }

    pub(crate) fn end_session(&mut self) {
        self.session = SessionState::Ended;
    }

    pub(crate) fn uploads_mut(&mut self) -> &mut TaskRegistry {
        &mut self.uploads
    }

    pub(crate) fn chat_mut(&mut self) -> &mut ChatSession {
        &mut self.chat
    }

    pub(crate) fn search_mut(&mut self) -> &mut SearchSession {
        &mut self.search
    }

    pub(crate) fn greet(&mut self, at: DateTime<Utc>) -> bool {
        if !self.chat.messages().is_empty() {
            return false;
        }
        let id = self.next_id("msg");
        self.chat.push(ChatMessage {
            id,
            role: ChatRole::Assistant,
            content: GREETING.to_string(),
            timestamp: at,
            sources: None,
        });
        true
    }
}
