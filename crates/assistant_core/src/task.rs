use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::format::format_file_size;

/// Upper bound of a single progress step while uploading.
pub const UPLOAD_STEP_MAX: f64 = 20.0;
/// Upper bound of a single progress step while processing.
pub const PROCESSING_STEP_MAX: f64 = 15.0;
/// Smallest roll applied on a tick; keeps every step strictly positive.
pub const MIN_ROLL: f64 = 1e-3;
pub const PROGRESS_COMPLETE: f64 = 100.0;

/// Opaque identifier for uploads, chat exchanges and searches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaskState {
    Uploading,
    Processing,
    Completed,
    /// Reserved for real failures; the simulator never enters it.
    Error,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Error)
    }

    pub fn status_text(self) -> &'static str {
        match self {
            TaskState::Uploading => "Uploading...",
            TaskState::Processing => "Processing...",
            TaskState::Completed => "Ready for questions",
            TaskState::Error => "Upload failed",
        }
    }

    fn step_max(self) -> f64 {
        match self {
            TaskState::Uploading => UPLOAD_STEP_MAX,
            TaskState::Processing => PROCESSING_STEP_MAX,
            TaskState::Completed | TaskState::Error => 0.0,
        }
    }
}

/// A file as declared by the submitter. Nothing is read from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDescriptor {
    pub name: String,
    pub size_bytes: u64,
    pub media_type: String,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            media_type: media_type.into(),
        }
    }
}

/// Accepts `application/pdf` and any `text/*` type; parameters are ignored.
pub fn is_supported_media_type(media_type: &str) -> bool {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or(media_type)
        .trim()
        .to_ascii_lowercase();
    essence == "application/pdf" || essence.starts_with("text/")
}

/// What a single timer tick did to an upload task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    PhaseStarted(TaskState),
    Completed,
    /// Terminal tasks are left untouched.
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadTask {
    id: TaskId,
    name: String,
    size_label: String,
    media_type: String,
    state: TaskState,
    progress: f64,
    created_at: DateTime<Utc>,
}

impl UploadTask {
    pub fn new(id: TaskId, file: &FileDescriptor, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: file.name.clone(),
            size_label: format_file_size(file.size_bytes),
            media_type: file.media_type.clone(),
            state: TaskState::Uploading,
            progress: 0.0,
            created_at,
        }
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_label(&self) -> &str {
        &self.size_label
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Applies one timer tick. `roll` is a fraction of the phase's maximum
    /// step and is normalized into `[MIN_ROLL, 1]`.
    pub fn advance(&mut self, roll: f64) -> TickOutcome {
        match self.state {
            TaskState::Uploading | TaskState::Processing if self.progress < PROGRESS_COMPLETE => {
                let step = self.state.step_max() * normalize_roll(roll);
                self.progress = (self.progress + step).min(PROGRESS_COMPLETE);
                TickOutcome::Advanced
            }
            TaskState::Uploading => {
                self.state = TaskState::Processing;
                self.progress = 0.0;
                TickOutcome::PhaseStarted(TaskState::Processing)
            }
            TaskState::Processing => {
                self.state = TaskState::Completed;
                self.progress = PROGRESS_COMPLETE;
                TickOutcome::Completed
            }
            TaskState::Completed | TaskState::Error => TickOutcome::Ignored,
        }
    }
}

fn normalize_roll(roll: f64) -> f64 {
    if roll.is_nan() || roll < MIN_ROLL {
        MIN_ROLL
    } else {
        roll.min(1.0)
    }
}
