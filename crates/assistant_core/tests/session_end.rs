use assistant_core::{update, AppState, Effect, FileDescriptor, Msg, SessionState, TaskId};
use chrono::{TimeZone, Utc};

#[test]
fn ending_session_cancels_everything_in_flight() {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let (state, _) = update(
        AppState::new(),
        Msg::FilesSubmitted {
            files: vec![
                FileDescriptor::new("a.pdf", "application/pdf", 10),
                FileDescriptor::new("b.txt", "text/plain", 10),
            ],
            at,
        },
    );
    let (state, _) = update(state, Msg::ChatInputChanged("hello".to_string()));
    let (state, _) = update(state, Msg::ChatSubmitted { at });
    let (state, _) = update(state, Msg::SearchQueryChanged("vision".to_string()));
    let (state, _) = update(state, Msg::SearchSubmitted);

    let (state, effects) = update(state, Msg::SessionEnded);

    assert_eq!(state.session(), SessionState::Ended);
    assert_eq!(
        effects,
        vec![
            Effect::StopUploadTimer {
                task_id: TaskId::new("upl-1"),
            },
            Effect::StopUploadTimer {
                task_id: TaskId::new("upl-2"),
            },
            Effect::CancelReply {
                exchange_id: TaskId::new("chat-4"),
            },
            Effect::CancelSearch {
                search_id: TaskId::new("srch-5"),
            },
        ]
    );
    assert!(state.chat().pending().is_none());
    assert!(!state.search().is_searching());
}

#[test]
fn ended_session_rejects_intake_and_late_events() {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let (state, _) = update(
        AppState::new(),
        Msg::FilesSubmitted {
            files: vec![FileDescriptor::new("a.pdf", "application/pdf", 10)],
            at,
        },
    );
    let (mut state, _) = update(state, Msg::SessionEnded);
    assert!(state.consume_dirty());
    let before = state.clone();

    let (state, effects) = update(
        state,
        Msg::UploadTick {
            task_id: TaskId::new("upl-1"),
            roll: 1.0,
        },
    );
    assert!(effects.is_empty());
    let (state, effects) = update(
        state,
        Msg::FilesSubmitted {
            files: vec![FileDescriptor::new("b.pdf", "application/pdf", 10)],
            at,
        },
    );
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::SessionEnded);
    assert!(effects.is_empty());
    assert_eq!(state, before);
}
