use serde::Serialize;

use crate::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultKind {
    Document,
    Webpage,
    Database,
}

impl ResultKind {
    pub fn label(self) -> &'static str {
        match self {
            ResultKind::Document => "document",
            ResultKind::Webpage => "webpage",
            ResultKind::Database => "database",
        }
    }
}

/// Result tab selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ResultFilter {
    #[default]
    All,
    Only(ResultKind),
}

impl ResultFilter {
    pub fn admits(self, kind: ResultKind) -> bool {
        match self {
            ResultFilter::All => true,
            ResultFilter::Only(wanted) => wanted == kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RelevanceBand {
    High,
    Medium,
    Low,
}

impl RelevanceBand {
    pub fn of(relevance: u8) -> Self {
        match relevance {
            90..=u8::MAX => RelevanceBand::High,
            70..=89 => RelevanceBand::Medium,
            _ => RelevanceBand::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchRecord {
    pub id: &'static str,
    pub title: &'static str,
    pub snippet: &'static str,
    pub source: &'static str,
    pub kind: ResultKind,
    pub relevance: u8,
    /// ISO-8601 calendar date.
    pub date: &'static str,
    pub author: Option<&'static str>,
}

pub const CATALOG: [SearchRecord; 4] = [
    SearchRecord {
        id: "1",
        title: "Deep Learning Applications in Natural Language Processing",
        snippet: "This comprehensive study explores the latest advances in deep learning for NLP tasks, including transformer architectures, attention mechanisms, and their applications in sentiment analysis...",
        source: "research_paper_1.pdf",
        kind: ResultKind::Document,
        relevance: 95,
        date: "2024-01-15",
        author: Some("Dr. Sarah Johnson"),
    },
    SearchRecord {
        id: "2",
        title: "Machine Learning Fundamentals and Best Practices",
        snippet: "A detailed overview of supervised and unsupervised learning techniques, covering decision trees, neural networks, and ensemble methods with practical implementation examples...",
        source: "ml_handbook.pdf",
        kind: ResultKind::Document,
        relevance: 88,
        date: "2023-11-20",
        author: Some("Prof. Michael Chen"),
    },
    SearchRecord {
        id: "3",
        title: "Recent Advances in Computer Vision Research",
        snippet: "This paper discusses breakthrough developments in convolutional neural networks, object detection algorithms, and their real-world applications in autonomous systems...",
        source: "cv_research.pdf",
        kind: ResultKind::Document,
        relevance: 82,
        date: "2024-02-08",
        author: Some("Dr. Emily Rodriguez"),
    },
    SearchRecord {
        id: "4",
        title: "Stanford AI Research Database",
        snippet: "Comprehensive database of artificial intelligence research papers, datasets, and experimental results from Stanford University's AI laboratory...",
        source: "stanford.edu/ai-database",
        kind: ResultKind::Database,
        relevance: 75,
        date: "2024-03-01",
        author: None,
    },
];

/// Case-insensitive substring match on title or snippet. The query is matched
/// as typed, surrounding whitespace included.
///
/// A query matching nothing yields the whole catalog rather than an empty list.
/// That fallback is a product placeholder kept as-is pending review.
pub fn search_catalog(query: &str) -> Vec<SearchRecord> {
    let needle = query.to_lowercase();
    let matches: Vec<SearchRecord> = CATALOG
        .iter()
        .filter(|record| {
            record.title.to_lowercase().contains(&needle)
                || record.snippet.to_lowercase().contains(&needle)
        })
        .copied()
        .collect();
    if matches.is_empty() {
        CATALOG.to_vec()
    } else {
        matches
    }
}

/// Query text, the in-flight search (if any) and the last revealed results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchSession {
    query: String,
    pending: Option<PendingSearch>,
    results: Vec<SearchRecord>,
    filter: ResultFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub id: TaskId,
    pub query: String,
}

impl SearchSession {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn pending(&self) -> Option<&PendingSearch> {
        self.pending.as_ref()
    }

    pub fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    pub fn results(&self) -> &[SearchRecord] {
        &self.results
    }

    pub fn filter(&self) -> ResultFilter {
        self.filter
    }

    pub fn visible_results(&self) -> impl Iterator<Item = &SearchRecord> {
        let filter = self.filter;
        self.results
            .iter()
            .filter(move |record| filter.admits(record.kind))
    }

    pub(crate) fn set_query(&mut self, query: String) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query;
        true
    }

    pub(crate) fn set_filter(&mut self, filter: ResultFilter) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        true
    }

    /// Clears the previous results and marks `id` as the in-flight search.
    pub(crate) fn begin(&mut self, id: TaskId) -> bool {
        if self.is_searching() || self.query.trim().is_empty() {
            return false;
        }
        self.results.clear();
        self.pending = Some(PendingSearch {
            id,
            query: self.query.clone(),
        });
        true
    }

    pub(crate) fn reveal(&mut self, id: &TaskId) -> bool {
        match &self.pending {
            Some(pending) if &pending.id == id => {
                self.results = search_catalog(&pending.query);
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn abandon(&mut self) -> Option<PendingSearch> {
        self.pending.take()
    }
}
