use assistant_core::{
    update, AppState, ChatReply, ChatRole, Effect, Msg, Notice, TaskId, GREETING,
};
use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 14, minute, 0).unwrap()
}

fn ask(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::ChatInputChanged(input.to_string()));
    update(state, Msg::ChatSubmitted { at: at(5) })
}

fn reply(prompt: &str) -> ChatReply {
    ChatReply {
        text: format!("Great question about \"{prompt}\"!"),
        citations: vec![
            "Research Paper 1.pdf".to_string(),
            "Document Analysis.pdf".to_string(),
            "Study Results.pdf".to_string(),
        ],
    }
}

#[test]
fn session_start_seeds_greeting_once() {
    let (state, _) = update(AppState::new(), Msg::SessionStarted { at: at(0) });
    let (state, _) = update(state, Msg::SessionStarted { at: at(1) });

    let view = state.view();
    assert_eq!(view.transcript.len(), 1);
    assert_eq!(view.transcript[0].role, ChatRole::Assistant);
    assert_eq!(view.transcript[0].content, GREETING);
    assert_eq!(view.transcript[0].time, "14:00");
}

#[test]
fn whitespace_input_is_a_noop() {
    let (mut state, effects) = ask(AppState::new(), "   \n\t ");

    assert!(effects.is_empty());
    assert!(state.chat().messages().is_empty());
    assert!(!state.view().can_send);
    // Only the input edit itself marked the state dirty.
    assert!(state.consume_dirty());
    let (mut state, _) = update(state, Msg::ChatSubmitted { at: at(6) });
    assert!(!state.consume_dirty());
}

#[test]
fn submit_appends_trimmed_user_message_and_schedules_reply() {
    let (state, effects) = ask(AppState::new(), "  What is X?  ");

    assert_eq!(
        effects,
        vec![Effect::ScheduleReply {
            exchange_id: TaskId::new("chat-2"),
            prompt: "What is X?".to_string(),
        }]
    );
    let view = state.view();
    assert_eq!(view.transcript.len(), 1);
    assert_eq!(view.transcript[0].role, ChatRole::User);
    assert_eq!(view.transcript[0].content, "What is X?");
    assert_eq!(view.chat_input, "");
    assert!(view.chat_pending);
    assert!(!view.can_send);
}

#[test]
fn second_submission_is_blocked_while_pending() {
    let (state, _) = ask(AppState::new(), "first");
    let (state, effects) = ask(state, "second");

    assert!(effects.is_empty());
    assert_eq!(state.chat().messages().len(), 1);
    assert_eq!(state.chat().input(), "second");
}

#[test]
fn reply_appends_assistant_message_with_three_sources() {
    let (state, effects) = ask(AppState::new(), "What is X?");
    let exchange_id = match &effects[0] {
        Effect::ScheduleReply { exchange_id, .. } => exchange_id.clone(),
        other => panic!("unexpected effect {other:?}"),
    };

    let (mut state, effects) = update(
        state,
        Msg::ChatReplyReady {
            exchange_id,
            reply: reply("What is X?"),
            at: at(7),
        },
    );

    assert_eq!(effects, vec![Effect::Notify(Notice::response_generated())]);
    assert!(state.consume_dirty());
    let view = state.view();
    let assistant: Vec<_> = view
        .transcript
        .iter()
        .filter(|m| m.role == ChatRole::Assistant)
        .collect();
    assert_eq!(assistant.len(), 1);
    assert!(assistant[0].content.contains("What is X?"));
    assert_eq!(assistant[0].sources.len(), 3);
    assert!(!view.chat_pending);
}

#[test]
fn reply_for_unknown_exchange_is_dropped() {
    let (state, _) = ask(AppState::new(), "What is X?");

    let (state, effects) = update(
        state,
        Msg::ChatReplyReady {
            exchange_id: TaskId::new("chat-99"),
            reply: reply("other"),
            at: at(7),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.chat().messages().len(), 1);
    assert!(state.chat().pending().is_some());
}

#[test]
fn transcript_keeps_submission_order() {
    let (state, _) = update(AppState::new(), Msg::SessionStarted { at: at(0) });
    let mut state = state;
    for prompt in ["one", "two"] {
        let (next, effects) = ask(state, prompt);
        let exchange_id = match &effects[0] {
            Effect::ScheduleReply { exchange_id, .. } => exchange_id.clone(),
            other => panic!("unexpected effect {other:?}"),
        };
        let (next, _) = update(
            next,
            Msg::ChatReplyReady {
                exchange_id,
                reply: reply(prompt),
                at: at(8),
            },
        );
        state = next;
    }

    let roles: Vec<_> = state.view().transcript.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            ChatRole::Assistant,
            ChatRole::User,
            ChatRole::Assistant,
            ChatRole::User,
            ChatRole::Assistant,
        ]
    );
}

#[test]
fn failed_reply_clears_pending_and_notifies() {
    let (state, _) = ask(AppState::new(), "What is X?");

    let (state, effects) = update(
        state,
        Msg::ChatReplyFailed {
            exchange_id: TaskId::new("chat-2"),
            reason: "provider unavailable".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::Notify(Notice::response_failed("provider unavailable"))]
    );
    assert!(state.chat().pending().is_none());
    assert_eq!(state.chat().messages().len(), 1);
}
