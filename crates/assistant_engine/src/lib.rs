//! Assistant engine: simulated timers and effect execution.
mod canned;
mod engine;
mod scheduler;
mod settings;
mod sink;
mod source;
mod timers;
mod types;

pub use canned::{render_template, CannedResponseProvider, CITATIONS, TEMPLATE_COUNT};
pub use engine::EngineHandle;
pub use scheduler::Scheduler;
pub use settings::{DelayRange, SimulationSettings};
pub use sink::{ChannelEventSink, EventSink};
pub use source::{FixedProgressSource, ProgressSource, RandomProgressSource, ResponseProvider};
pub use timers::TimerTable;
pub use types::{EngineError, EngineEvent, ProviderError, Reply, TimerId, TimerKey};
