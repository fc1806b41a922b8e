use std::fmt::Write as _;

use assistant_core::{
    AppViewModel, ChatRole, Notice, NoticeSeverity, RelevanceBand, ResultFilter, SessionState,
};

const BAR_WIDTH: usize = 20;

const SEARCH_TIPS: [(&str, &str); 4] = [
    (
        "Use specific keywords",
        "Try \"machine learning algorithms\" instead of just \"AI\"",
    ),
    (
        "Combine terms",
        "Use multiple related terms to narrow down results",
    ),
    (
        "Ask questions",
        "\"How does neural network training work?\" finds explanatory content",
    ),
    (
        "Use quotes",
        "\"exact phrase\" searches for that specific phrase",
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Uploads,
    Chat,
    Search,
}

pub fn render_sections(view: &AppViewModel) -> [(Section, String); 3] {
    [
        (Section::Uploads, render_uploads(view)),
        (Section::Chat, render_chat(view)),
        (Section::Search, render_search(view)),
    ]
}

pub fn render_uploads(view: &AppViewModel) -> String {
    let mut out = String::new();
    if view.uploads.is_empty() {
        out.push_str("No documents uploaded yet.\n");
        return out;
    }
    let _ = writeln!(out, "Uploaded Documents ({})", view.upload_count);
    for row in &view.uploads {
        let _ = writeln!(
            out,
            "  [{}] {} ({}, {})  {}  {:>3}%  {}",
            row.task_id,
            row.name,
            row.size_label,
            row.media_type,
            progress_bar(row.progress),
            row.progress,
            row.status_text
        );
    }
    out
}

pub fn render_chat(view: &AppViewModel) -> String {
    let mut out = String::from("Research Chat Assistant\n");
    for message in &view.transcript {
        let speaker = match message.role {
            ChatRole::User => "You",
            ChatRole::Assistant => "Assistant",
        };
        let _ = writeln!(out, "  [{}] {}:", message.time, speaker);
        for line in message.content.lines() {
            let _ = writeln!(out, "    {line}");
        }
        if !message.sources.is_empty() {
            let _ = writeln!(
                out,
                "    {} sources: {}",
                message.sources.len(),
                message.sources.join(", ")
            );
        }
    }
    if view.chat_pending {
        out.push_str("  Assistant is typing...\n");
    }
    if view.session == SessionState::Ended {
        out.push_str("  (session ended)\n");
    }
    out
}

pub fn render_search(view: &AppViewModel) -> String {
    let mut out = String::new();
    if view.searching {
        let _ = writeln!(out, "Searching for \"{}\"...", view.search_query.trim());
        return out;
    }
    if view.show_search_tips {
        out.push_str("Search Tips\n");
        for (title, hint) in SEARCH_TIPS {
            let _ = writeln!(out, "  {title}: {hint}");
        }
        return out;
    }
    let _ = writeln!(
        out,
        "Search Results ({}) tab: {}",
        view.result_count,
        filter_label(view.active_filter)
    );
    if view.results.is_empty() {
        out.push_str("  Nothing in this tab.\n");
    }
    for result in &view.results {
        let _ = writeln!(
            out,
            "  [{}] {}% match ({})  {}",
            result.kind.label(),
            result.relevance,
            band_label(result.band),
            result.title
        );
        let _ = writeln!(out, "    {}", result.snippet);
        let mut meta = vec![result.source.to_string()];
        if let Some(author) = result.author {
            meta.push(author.to_string());
        }
        meta.push(result.date.to_string());
        let _ = writeln!(out, "    {}", meta.join(" | "));
    }
    out
}

pub fn render_notice(notice: &Notice) -> String {
    let marker = match notice.severity {
        NoticeSeverity::Info => '*',
        NoticeSeverity::Destructive => '!',
    };
    format!("{marker} {}: {}", notice.title, notice.description)
}

fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn filter_label(filter: ResultFilter) -> &'static str {
    match filter {
        ResultFilter::All => "all",
        ResultFilter::Only(kind) => kind.label(),
    }
}

fn band_label(band: RelevanceBand) -> &'static str {
    match band {
        RelevanceBand::High => "high",
        RelevanceBand::Medium => "medium",
        RelevanceBand::Low => "low",
    }
}

#[cfg(test)]
mod tests {
    use assistant_core::{
        update, AppState, FileDescriptor, Msg, Notice, TaskId,
    };
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn progress_bar_scales_to_width() {
        assert_eq!(progress_bar(0), format!("[{}]", ".".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(50), format!("[{}{}]", "#".repeat(10), ".".repeat(10)));
        assert_eq!(progress_bar(100), format!("[{}]", "#".repeat(BAR_WIDTH)));
    }

    #[test]
    fn uploads_show_size_progress_and_status() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let (state, _) = update(
            AppState::new(),
            Msg::FilesSubmitted {
                files: vec![FileDescriptor::new("paper.pdf", "application/pdf", 1536)],
                at,
            },
        );
        let (state, _) = update(
            state,
            Msg::UploadTick {
                task_id: TaskId::new("upl-1"),
                roll: 1.0,
            },
        );

        let text = render_uploads(&state.view());
        assert!(text.starts_with("Uploaded Documents (1)\n"));
        assert!(text.contains("[upl-1] paper.pdf (1.5 KB, application/pdf)"));
        assert!(text.contains(" 20%  Uploading..."));
    }

    #[test]
    fn empty_search_shows_tips() {
        let text = render_search(&AppState::new().view());
        assert!(text.starts_with("Search Tips\n"));
        assert!(text.contains("Combine terms"));
    }

    #[test]
    fn search_results_list_metadata() {
        let (state, _) = update(AppState::new(), Msg::SearchQueryChanged("stanford".into()));
        let (state, _) = update(state, Msg::SearchSubmitted);
        let (state, _) = update(
            state,
            Msg::SearchDelayElapsed {
                search_id: TaskId::new("srch-1"),
            },
        );

        let text = render_search(&state.view());
        assert!(text.contains("Search Results (1) tab: all"));
        assert!(text.contains("[database] 75% match (medium)  Stanford AI Research Database"));
        assert!(text.contains("stanford.edu/ai-database | 2024-03-01"));
    }

    #[test]
    fn chat_lists_sources_and_typing_indicator() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 8, 15, 0).unwrap();
        let (state, _) = update(AppState::new(), Msg::SessionStarted { at });
        let (state, _) = update(state, Msg::ChatInputChanged("What is X?".into()));
        let (state, _) = update(state, Msg::ChatSubmitted { at });

        let text = render_chat(&state.view());
        assert!(text.contains("[08:15] You:\n    What is X?\n"));
        assert!(text.ends_with("Assistant is typing...\n"));
    }

    #[test]
    fn destructive_notices_are_flagged() {
        assert_eq!(
            render_notice(&Notice::unsupported_file_type()),
            "! Unsupported file type: Please upload PDF or text files only."
        );
        assert!(render_notice(&Notice::response_generated()).starts_with("* "));
    }
}
