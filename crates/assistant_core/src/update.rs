use chrono::{DateTime, Utc};

use crate::chat::ChatMessage;
use crate::{
    is_supported_media_type, AppState, ChatReply, ChatRole, Effect, FileDescriptor, Msg, Notice,
    SessionState, TaskId, TickOutcome, UploadTask,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    // Once the session has ended nothing new is accepted and late timer
    // events are dropped; only the no-op messages fall through.
    if state.session() == SessionState::Ended
        && !matches!(msg, Msg::Tick | Msg::NoOp | Msg::SessionEnded)
    {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::SessionStarted { at } => {
            if state.greet(at) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FilesSubmitted { files, at } => submit_files(&mut state, files, at),
        Msg::UploadTick { task_id, roll } => {
            let outcome = state
                .uploads_mut()
                .get_mut(&task_id)
                .map(|task| task.advance(roll));
            match outcome {
                // Unknown ids were removed while the tick was in flight.
                None | Some(TickOutcome::Ignored) => Vec::new(),
                Some(TickOutcome::Advanced | TickOutcome::PhaseStarted(_)) => {
                    state.mark_dirty();
                    Vec::new()
                }
                Some(TickOutcome::Completed) => {
                    state.mark_dirty();
                    vec![Effect::StopUploadTimer { task_id }]
                }
            }
        }
        Msg::RemoveUpload { task_id } => match state.uploads_mut().remove(&task_id) {
            Some(task) => {
                state.mark_dirty();
                if task.state().is_terminal() {
                    Vec::new()
                } else {
                    vec![Effect::StopUploadTimer { task_id }]
                }
            }
            None => Vec::new(),
        },
        Msg::ChatInputChanged(text) => {
            if state.chat_mut().set_input(text) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ChatSubmitted { at } => {
            if !state.chat().can_send() {
                return (state, Vec::new());
            }
            let message_id = state.next_id("msg");
            let exchange_id = state.next_id("chat");
            match state
                .chat_mut()
                .begin_exchange(message_id, exchange_id.clone(), at)
            {
                Some(prompt) => {
                    state.mark_dirty();
                    vec![Effect::ScheduleReply {
                        exchange_id,
                        prompt,
                    }]
                }
                None => Vec::new(),
            }
        }
        Msg::ChatReplyReady {
            exchange_id,
            reply,
            at,
        } => complete_exchange(&mut state, &exchange_id, reply, at),
        Msg::ChatReplyFailed {
            exchange_id,
            reason,
        } => {
            if state.chat_mut().take_pending(&exchange_id).is_some() {
                state.mark_dirty();
                vec![Effect::Notify(Notice::response_failed(&reason))]
            } else {
                Vec::new()
            }
        }
        Msg::SearchQueryChanged(query) => {
            if state.search_mut().set_query(query) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SearchSubmitted => {
            if state.search().is_searching() || state.search().query().trim().is_empty() {
                return (state, Vec::new());
            }
            let search_id = state.next_id("srch");
            if state.search_mut().begin(search_id.clone()) {
                state.mark_dirty();
                vec![Effect::ScheduleSearch { search_id }]
            } else {
                Vec::new()
            }
        }
        Msg::SearchDelayElapsed { search_id } => {
            if state.search_mut().reveal(&search_id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ResultTabSelected(filter) => {
            if state.search_mut().set_filter(filter) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SessionEnded => end_session(&mut state),
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit_files(state: &mut AppState, files: Vec<FileDescriptor>, at: DateTime<Utc>) -> Vec<Effect> {
    let mut effects = Vec::with_capacity(files.len() * 2);
    for file in files {
        if !is_supported_media_type(&file.media_type) {
            effects.push(Effect::Notify(Notice::unsupported_file_type()));
            continue;
        }
        let task_id = state.next_id("upl");
        let task = UploadTask::new(task_id.clone(), &file, at);
        if !state.uploads_mut().insert(task) {
            continue;
        }
        state.mark_dirty();
        effects.push(Effect::StartUploadTimer { task_id });
        effects.push(Effect::Notify(Notice::upload_accepted(&file.name)));
    }
    effects
}

fn complete_exchange(
    state: &mut AppState,
    exchange_id: &TaskId,
    reply: ChatReply,
    at: DateTime<Utc>,
) -> Vec<Effect> {
    if state.chat_mut().take_pending(exchange_id).is_none() {
        return Vec::new();
    }
    let message_id = state.next_id("msg");
    state.chat_mut().push(ChatMessage {
        id: message_id,
        role: ChatRole::Assistant,
        content: reply.text,
        timestamp: at,
        sources: Some(reply.citations),
    });
    state.mark_dirty();
    vec![Effect::Notify(Notice::response_generated())]
}

fn end_session(state: &mut AppState) -> Vec<Effect> {
    if state.session() == SessionState::Ended {
        return Vec::new();
    }
    state.end_session();
    state.mark_dirty();

    let mut effects: Vec<Effect> = state
        .uploads()
        .iter()
        .filter(|task| !task.state().is_terminal())
        .map(|task| Effect::StopUploadTimer {
            task_id: task.id().clone(),
        })
        .collect();
    if let Some(pending) = state.chat_mut().abandon_pending() {
        effects.push(Effect::CancelReply {
            exchange_id: pending.id,
        });
    }
    if let Some(pending) = state.search_mut().abandon() {
        effects.push(Effect::CancelSearch {
            search_id: pending.id,
        });
    }
    effects
}
