use std::sync::Arc;

use engine_logging::{engine_debug, engine_info, engine_warn};
use tokio::runtime::Handle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::timers::TimerTable;
use crate::{
    EngineEvent, EventSink, ProgressSource, ResponseProvider, SimulationSettings, TimerId,
    TimerKey,
};

/// Spawns the simulated timers on a tokio runtime and reports through a sink.
///
/// Every timer runs under a child of one root token, so `shutdown` stops all
/// of them at once; individual timers are stopped through `cancel`.
pub struct Scheduler {
    settings: SimulationSettings,
    progress: Arc<dyn ProgressSource>,
    provider: Arc<dyn ResponseProvider>,
    sink: Arc<dyn EventSink>,
    timers: TimerTable,
    root: CancellationToken,
    runtime: Handle,
}

impl Scheduler {
    pub fn new(
        settings: SimulationSettings,
        progress: Arc<dyn ProgressSource>,
        provider: Arc<dyn ResponseProvider>,
        sink: Arc<dyn EventSink>,
        runtime: Handle,
    ) -> Self {
        Self {
            settings,
            progress,
            provider,
            sink,
            timers: TimerTable::new(),
            root: CancellationToken::new(),
            runtime,
        }
    }

    /// Starts the recurring progress timer. The first tick fires one period
    /// after the call; ticks continue until the timer is cancelled.
    pub fn start_upload(&self, task_id: TimerId) {
        let key = TimerKey::Upload(task_id.clone());
        let Some((token, generation)) = self.arm(key.clone()) else {
            return;
        };
        let period = self.settings.tick_interval();
        let progress = self.progress.clone();
        let sink = self.sink.clone();
        let timers = self.timers.clone();

        engine_debug!("Upload timer started task_id={} period={:?}", task_id, period);
        self.runtime.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        sink.emit(EngineEvent::UploadTick {
                            task_id: task_id.clone(),
                            roll: progress.roll(),
                        });
                    }
                }
            }
            timers.forget(&key, generation);
            engine_debug!("Upload timer stopped task_id={}", task_id);
        });
    }

    /// Waits a random delay, then asks the provider for the answer.
    pub fn schedule_reply(&self, exchange_id: TimerId, prompt: String) {
        let key = TimerKey::Reply(exchange_id.clone());
        let Some((token, generation)) = self.arm(key.clone()) else {
            return;
        };
        let delay = self.settings.reply_delay_ms.sample();
        let provider = self.provider.clone();
        let sink = self.sink.clone();
        let timers = self.timers.clone();

        engine_debug!("Reply scheduled exchange_id={} delay={:?}", exchange_id, delay);
        self.runtime.spawn(async move {
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => None,
                result = async {
                    time::sleep(delay).await;
                    provider.respond(&prompt).await
                } => Some(result),
            };
            timers.forget(&key, generation);
            match result {
                Some(Ok(reply)) => sink.emit(EngineEvent::ReplyReady { exchange_id, reply }),
                Some(Err(error)) => {
                    engine_warn!("Reply failed exchange_id={}: {}", exchange_id, error);
                    sink.emit(EngineEvent::ReplyFailed { exchange_id, error });
                }
                None => engine_debug!("Reply cancelled exchange_id={}", exchange_id),
            }
        });
    }

    /// Reports `SearchReady` after the simulated search latency.
    pub fn schedule_search(&self, search_id: TimerId) {
        let key = TimerKey::Search(search_id.clone());
        let Some((token, generation)) = self.arm(key.clone()) else {
            return;
        };
        let delay = self.settings.search_delay_ms.sample();
        let sink = self.sink.clone();
        let timers = self.timers.clone();

        self.runtime.spawn(async move {
            let fired = tokio::select! {
                biased;
                _ = token.cancelled() => false,
                _ = time::sleep(delay) => true,
            };
            timers.forget(&key, generation);
            if fired {
                sink.emit(EngineEvent::SearchReady { search_id });
            }
        });
    }

    /// Stops one timer. Returns false if it already finished or never existed.
    pub fn cancel(&self, key: &TimerKey) -> bool {
        let cancelled = self.timers.cancel(key);
        if cancelled {
            engine_debug!("Cancelled {}", key);
        }
        cancelled
    }

    pub fn is_active(&self, key: &TimerKey) -> bool {
        self.timers.contains(key)
    }

    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Cancels every live timer; later schedule calls are ignored.
    pub fn shutdown(&self) {
        self.root.cancel();
        let stopped = self.timers.cancel_all();
        engine_info!("Scheduler shut down, {} timer(s) stopped", stopped);
    }

    fn arm(&self, key: TimerKey) -> Option<(CancellationToken, u64)> {
        if self.root.is_cancelled() {
            engine_warn!("Ignoring {} after shutdown", key);
            return None;
        }
        let token = self.root.child_token();
        let generation = self.timers.register(key, token.clone());
        Some((token, generation))
    }
}
