use serde::Serialize;

use crate::TaskId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start the recurring progress timer for an accepted upload.
    StartUploadTimer { task_id: TaskId },
    /// Stop an upload timer; sent on completion and on removal.
    StopUploadTimer { task_id: TaskId },
    ScheduleReply { exchange_id: TaskId, prompt: String },
    CancelReply { exchange_id: TaskId },
    ScheduleSearch { search_id: TaskId },
    CancelSearch { search_id: TaskId },
    Notify(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum NoticeSeverity {
    #[default]
    Info,
    Destructive,
}

/// User-visible toast raised as a side effect of a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: NoticeSeverity,
}

impl Notice {
    pub fn upload_accepted(file_name: &str) -> Self {
        Self {
            title: "File uploaded successfully".to_string(),
            description: format!("{file_name} is being processed..."),
            severity: NoticeSeverity::Info,
        }
    }

    pub fn unsupported_file_type() -> Self {
        Self {
            title: "Unsupported file type".to_string(),
            description: "Please upload PDF or text files only.".to_string(),
            severity: NoticeSeverity::Destructive,
        }
    }

    pub fn response_generated() -> Self {
        Self {
            title: "Response generated".to_string(),
            description: "AI has analyzed your documents and provided an answer.".to_string(),
            severity: NoticeSeverity::Info,
        }
    }

    pub fn response_failed(reason: &str) -> Self {
        Self {
            title: "Response failed".to_string(),
            description: reason.to_string(),
            severity: NoticeSeverity::Destructive,
        }
    }
}
