use assistant_core::{FileDescriptor, Msg, ResultFilter, ResultKind, TaskId};
use chrono::{DateTime, Utc};
use thiserror::Error;

pub const USAGE: &str = "\
Commands:
  upload <name> <media-type> [size-bytes]   simulate uploading a file
  remove <task-id>                          remove an uploaded file
  ask <question>                            send a chat message
  search <query>                            search the document catalog
  tab all|document|webpage|database         filter search results
  show                                      print the full view
  help                                      print this help
  quit                                      end the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Upload(FileDescriptor),
    Remove(TaskId),
    Ask(String),
    Search(String),
    Tab(ResultFilter),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("invalid size `{0}`, expected a byte count")]
    InvalidSize(String),
    #[error("unknown tab `{0}`, expected all, document, webpage or database")]
    UnknownTab(String),
}

pub fn parse_line(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    match verb.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::Empty),
        "upload" => parse_upload(rest),
        "remove" | "rm" => {
            let id = rest.split_whitespace().next().ok_or(CommandError::MissingArgument {
                command: "remove",
                argument: "a task id",
            })?;
            Ok(Command::Remove(TaskId::new(id)))
        }
        // Blank questions and queries are passed through; the core ignores them.
        "ask" => Ok(Command::Ask(rest.to_string())),
        "search" => Ok(Command::Search(rest.to_string())),
        "tab" => parse_tab(rest).map(Command::Tab),
        "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(verb.to_string())),
    }
}

fn parse_upload(rest: &str) -> Result<Command, CommandError> {
    let mut parts = rest.split_whitespace();
    let name = parts.next().ok_or(CommandError::MissingArgument {
        command: "upload",
        argument: "a file name",
    })?;
    let media_type = parts.next().ok_or(CommandError::MissingArgument {
        command: "upload",
        argument: "a media type",
    })?;
    let size_bytes = match parts.next() {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| CommandError::InvalidSize(raw.to_string()))?,
        None => 0,
    };
    Ok(Command::Upload(FileDescriptor::new(name, media_type, size_bytes)))
}

fn parse_tab(rest: &str) -> Result<ResultFilter, CommandError> {
    match rest.to_ascii_lowercase().as_str() {
        "all" => Ok(ResultFilter::All),
        "document" | "documents" => Ok(ResultFilter::Only(ResultKind::Document)),
        "webpage" | "webpages" => Ok(ResultFilter::Only(ResultKind::Webpage)),
        "database" | "databases" => Ok(ResultFilter::Only(ResultKind::Database)),
        "" => Err(CommandError::MissingArgument {
            command: "tab",
            argument: "a tab name",
        }),
        other => Err(CommandError::UnknownTab(other.to_string())),
    }
}

impl Command {
    /// Messages for the update loop; console-only commands yield none.
    pub fn into_msgs(self, at: DateTime<Utc>) -> Vec<Msg> {
        match self {
            Command::Upload(file) => vec![Msg::FilesSubmitted {
                files: vec![file],
                at,
            }],
            Command::Remove(task_id) => vec![Msg::RemoveUpload { task_id }],
            Command::Ask(text) => vec![Msg::ChatInputChanged(text), Msg::ChatSubmitted { at }],
            Command::Search(query) => vec![Msg::SearchQueryChanged(query), Msg::SearchSubmitted],
            Command::Tab(filter) => vec![Msg::ResultTabSelected(filter)],
            Command::Show | Command::Help | Command::Quit => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn upload_with_and_without_size() {
        assert_eq!(
            parse_line("upload paper.pdf application/pdf 2048"),
            Ok(Command::Upload(FileDescriptor::new(
                "paper.pdf",
                "application/pdf",
                2048
            )))
        );
        assert_eq!(
            parse_line("UPLOAD notes.txt text/plain"),
            Ok(Command::Upload(FileDescriptor::new("notes.txt", "text/plain", 0)))
        );
    }

    #[test]
    fn upload_reports_missing_and_invalid_arguments() {
        assert_eq!(
            parse_line("upload"),
            Err(CommandError::MissingArgument {
                command: "upload",
                argument: "a file name",
            })
        );
        assert_eq!(
            parse_line("upload a.pdf application/pdf big"),
            Err(CommandError::InvalidSize("big".to_string()))
        );
    }

    #[test]
    fn ask_keeps_inner_spacing() {
        assert_eq!(
            parse_line("ask   What is  X?  "),
            Ok(Command::Ask("What is  X?".to_string()))
        );
    }

    #[test]
    fn tabs_and_unknown_commands() {
        assert_eq!(
            parse_line("tab Database"),
            Ok(Command::Tab(ResultFilter::Only(ResultKind::Database)))
        );
        assert_eq!(
            parse_line("tab videos"),
            Err(CommandError::UnknownTab("videos".to_string()))
        );
        assert_eq!(
            parse_line("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
        assert_eq!(parse_line("   "), Err(CommandError::Empty));
    }

    #[test]
    fn ask_expands_to_input_then_submit() {
        let at = DateTime::<Utc>::UNIX_EPOCH;
        assert_eq!(
            Command::Ask("hi".to_string()).into_msgs(at),
            vec![
                Msg::ChatInputChanged("hi".to_string()),
                Msg::ChatSubmitted { at }
            ]
        );
        assert!(Command::Quit.into_msgs(at).is_empty());
    }
}
