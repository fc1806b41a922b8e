use std::sync::mpsc;
use std::thread;

use assistant_core::{ChatReply, Effect, Msg, Notice, TaskId};
use assistant_engine::{EngineEvent, EngineHandle};
use chrono::{DateTime, Utc};
use engine_logging::{engine_debug, engine_info, engine_warn};

/// Executes effects against the engine and hands notices back to the caller.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    /// Takes ownership of the engine and forwards its events as messages.
    pub fn new<T>(
        engine: EngineHandle,
        events: mpsc::Receiver<EngineEvent>,
        msg_tx: mpsc::Sender<T>,
    ) -> Self
    where
        T: From<Msg> + Send + 'static,
    {
        spawn_event_loop(events, msg_tx);
        Self { engine }
    }

    /// Runs engine-bound effects and returns the notices to show.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Notice> {
        let mut notices = Vec::new();
        for effect in effects {
            let result = match effect {
                Effect::StartUploadTimer { task_id } => {
                    engine_info!("StartUploadTimer task_id={}", task_id);
                    self.engine.start_upload(task_id.as_str())
                }
                Effect::StopUploadTimer { task_id } => {
                    engine_debug!("StopUploadTimer task_id={}", task_id);
                    self.engine.stop_upload(task_id.as_str())
                }
                Effect::ScheduleReply {
                    exchange_id,
                    prompt,
                } => {
                    engine_info!(
                        "ScheduleReply exchange_id={} prompt_len={}",
                        exchange_id,
                        prompt.len()
                    );
                    self.engine.schedule_reply(exchange_id.as_str(), prompt)
                }
                Effect::CancelReply { exchange_id } => {
                    self.engine.cancel_reply(exchange_id.as_str())
                }
                Effect::ScheduleSearch { search_id } => {
                    self.engine.schedule_search(search_id.as_str())
                }
                Effect::CancelSearch { search_id } => {
                    self.engine.cancel_search(search_id.as_str())
                }
                Effect::Notify(notice) => {
                    notices.push(notice);
                    Ok(())
                }
            };
            if let Err(err) = result {
                engine_warn!("Effect failed: {}", err);
            }
        }
        notices
    }

    pub fn shutdown(self) {
        self.engine.shutdown();
    }
}

fn spawn_event_loop<T>(events: mpsc::Receiver<EngineEvent>, msg_tx: mpsc::Sender<T>)
where
    T: From<Msg> + Send + 'static,
{
    thread::spawn(move || {
        for event in events {
            if msg_tx.send(T::from(map_event(event, Utc::now()))).is_err() {
                break;
            }
        }
    });
}

pub fn map_event(event: EngineEvent, at: DateTime<Utc>) -> Msg {
    match event {
        EngineEvent::UploadTick { task_id, roll } => Msg::UploadTick {
            task_id: TaskId::new(task_id),
            roll,
        },
        EngineEvent::ReplyReady { exchange_id, reply } => Msg::ChatReplyReady {
            exchange_id: TaskId::new(exchange_id),
            reply: ChatReply {
                text: reply.text,
                citations: reply.citations,
            },
            at,
        },
        EngineEvent::ReplyFailed { exchange_id, error } => Msg::ChatReplyFailed {
            exchange_id: TaskId::new(exchange_id),
            reason: error.to_string(),
        },
        EngineEvent::SearchReady { search_id } => Msg::SearchDelayElapsed {
            search_id: TaskId::new(search_id),
        },
    }
}
