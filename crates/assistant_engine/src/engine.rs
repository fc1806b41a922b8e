use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use engine_logging::{engine_info, engine_warn};

use crate::sink::ChannelEventSink;
use crate::{
    EngineError, EngineEvent, ProgressSource, ResponseProvider, Scheduler, SimulationSettings,
    TimerId, TimerKey,
};

enum EngineCommand {
    StartUpload { task_id: TimerId },
    Cancel { key: TimerKey },
    ScheduleReply { exchange_id: TimerId, prompt: String },
    ScheduleSearch { search_id: TimerId },
    Shutdown,
}

/// Owns the engine thread. Commands go in over a channel; events come back
/// on the receiver returned by [`EngineHandle::start`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    worker: Option<JoinHandle<()>>,
}

impl EngineHandle {
    pub fn start(
        settings: SimulationSettings,
        progress: Arc<dyn ProgressSource>,
        provider: Arc<dyn ResponseProvider>,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>), EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("assistant-engine")
            .enable_time()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let sink = Arc::new(ChannelEventSink::new(event_tx));
        let scheduler = Scheduler::new(
            settings,
            progress,
            provider,
            sink,
            runtime.handle().clone(),
        );

        let worker = thread::Builder::new()
            .name("assistant-engine-cmd".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    if !handle_command(&scheduler, command) {
                        break;
                    }
                }
                scheduler.shutdown();
                runtime.shutdown_background();
                engine_info!("Engine thread exiting");
            })?;

        Ok((
            Self {
                cmd_tx,
                worker: Some(worker),
            },
            event_rx,
        ))
    }

    pub fn start_upload(&self, task_id: impl Into<TimerId>) -> Result<(), EngineError> {
        self.send(EngineCommand::StartUpload {
            task_id: task_id.into(),
        })
    }

    pub fn stop_upload(&self, task_id: impl Into<TimerId>) -> Result<(), EngineError> {
        self.cancel(TimerKey::Upload(task_id.into()))
    }

    pub fn schedule_reply(
        &self,
        exchange_id: impl Into<TimerId>,
        prompt: impl Into<String>,
    ) -> Result<(), EngineError> {
        self.send(EngineCommand::ScheduleReply {
            exchange_id: exchange_id.into(),
            prompt: prompt.into(),
        })
    }

    pub fn cancel_reply(&self, exchange_id: impl Into<TimerId>) -> Result<(), EngineError> {
        self.cancel(TimerKey::Reply(exchange_id.into()))
    }

    pub fn schedule_search(&self, search_id: impl Into<TimerId>) -> Result<(), EngineError> {
        self.send(EngineCommand::ScheduleSearch {
            search_id: search_id.into(),
        })
    }

    pub fn cancel_search(&self, search_id: impl Into<TimerId>) -> Result<(), EngineError> {
        self.cancel(TimerKey::Search(search_id.into()))
    }

    /// Cancels all timers and waits for the engine thread to exit.
    pub fn shutdown(mut self) {
        self.stop_worker();
    }

    fn cancel(&self, key: TimerKey) -> Result<(), EngineError> {
        self.send(EngineCommand::Cancel { key })
    }

    fn send(&self, command: EngineCommand) -> Result<(), EngineError> {
        self.cmd_tx.send(command).map_err(|_| EngineError::Stopped)
    }

    fn stop_worker(&mut self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                engine_warn!("Engine thread panicked during shutdown");
            }
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.stop_worker();
    }
}

/// Returns false when the engine should stop.
fn handle_command(scheduler: &Scheduler, command: EngineCommand) -> bool {
    match command {
        EngineCommand::StartUpload { task_id } => scheduler.start_upload(task_id),
        EngineCommand::Cancel { key } => {
            scheduler.cancel(&key);
        }
        EngineCommand::ScheduleReply {
            exchange_id,
            prompt,
        } => scheduler.schedule_reply(exchange_id, prompt),
        EngineCommand::ScheduleSearch { search_id } => scheduler.schedule_search(search_id),
        EngineCommand::Shutdown => return false,
    }
    true
}
