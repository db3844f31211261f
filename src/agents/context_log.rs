use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// A single timestamped audit record of an agent action
#[derive(Debug, Clone)]
pub struct ContextEntry {
    pub timestamp: DateTime<Utc>,
    /// Action taken (e.g. "task_execution", "tool:write_file")
    pub action: String,
    /// Inputs and outputs of the action
    pub detail: String,
}

/// Append-only context log owned by a single role executor.
///
/// Entries are never mutated once appended; they form the audit trail
/// and feed the relevance lookup used when building prompts.
#[derive(Debug, Default)]
pub struct ContextLog {
    entries: Vec<ContextEntry>,
}

impl ContextLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new timestamped entry
    pub fn append(&mut self, action: &str, detail: &str) {
        self.entries.push(ContextEntry {
            timestamp: Utc::now(),
            action: action.to_string(),
            detail: detail.to_string(),
        });
    }

    pub fn entries(&self) -> &[ContextEntry] {
        &self.entries
    }

    /// Returns up to `limit` entries ranked by keyword overlap with the query
    pub fn relevant_entries(&self, query: &str, limit: usize) -> Vec<&ContextEntry> {
        let query_words: HashSet<String> = query
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.len() > 3)
            .map(str::to_string)
            .collect();

        let mut scored: Vec<(usize, &ContextEntry)> = self
            .entries
            .iter()
            .map(|entry| {
                let text = format!("{} {}", entry.action, entry.detail).to_lowercase();
                let score = query_words.iter().filter(|w| text.contains(w.as_str())).count();
                (score, entry)
            })
            .filter(|(score, _)| *score > 0)
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().take(limit).map(|(_, e)| e).collect()
    }

    /// Renders the relevant entries as a prompt fragment, empty when nothing matches
    pub fn for_prompt(&self, query: &str, limit: usize) -> String {
        self.relevant_entries(query, limit)
            .iter()
            .map(|entry| format!("[{}] {}: {}", entry.timestamp.to_rfc3339(), entry.action, entry.detail))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
