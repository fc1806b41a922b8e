use std::sync::Arc;
use std::time::Duration;

use assistant_engine::{
    CannedResponseProvider, DelayRange, EngineEvent, EngineHandle, FixedProgressSource,
    SimulationSettings,
};

fn fast_settings() -> SimulationSettings {
    SimulationSettings {
        tick_interval_ms: 5,
        reply_delay_ms: DelayRange::new(1, 5),
        search_delay_ms: DelayRange::new(1, 5),
    }
}

#[test]
fn engine_thread_round_trips_commands_and_events() {
    engine_logging::initialize_for_tests();
    let (engine, events) = EngineHandle::start(
        fast_settings(),
        Arc::new(FixedProgressSource(0.25)),
        Arc::new(CannedResponseProvider::fixed(2)),
    )
    .expect("engine starts");

    engine.schedule_reply("chat-1", "What is X?").unwrap();
    let event = events
        .recv_timeout(Duration::from_secs(5))
        .expect("reply event");
    match event {
        EngineEvent::ReplyReady { exchange_id, reply } => {
            assert_eq!(exchange_id, "chat-1");
            assert!(reply.text.starts_with("Interesting inquiry about \"What is X?\""));
        }
        other => panic!("unexpected event {other:?}"),
    }

    engine.start_upload("upl-2").unwrap();
    let event = events
        .recv_timeout(Duration::from_secs(5))
        .expect("tick event");
    assert_eq!(
        event,
        EngineEvent::UploadTick {
            task_id: "upl-2".to_string(),
            roll: 0.25,
        }
    );
    engine.stop_upload("upl-2").unwrap();

    engine.schedule_search("srch-3").unwrap();
    let search_seen = (0..100)
        .filter_map(|_| events.recv_timeout(Duration::from_secs(5)).ok())
        .any(|event| {
            event
                == EngineEvent::SearchReady {
                    search_id: "srch-3".to_string(),
                }
        });
    assert!(search_seen);

    engine.shutdown();
}

#[test]
fn events_channel_closes_after_shutdown() {
    let (engine, events) = EngineHandle::start(
        fast_settings(),
        Arc::new(FixedProgressSource(1.0)),
        Arc::new(CannedResponseProvider::new()),
    )
    .expect("engine starts");
    engine.start_upload("upl-1").unwrap();

    engine.shutdown();

    // Drain whatever was emitted before shutdown; the channel then disconnects.
    while events.recv_timeout(Duration::from_secs(5)).is_ok() {}
    assert!(events.try_recv().is_err());
}
