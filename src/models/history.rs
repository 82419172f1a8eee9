// file: src/models/history.rs
// description: bounded conversation history kept by the chat session
// reference: role/content message pairs

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl HistoryEntry {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Keeps only the most recent `limit` entries, oldest first.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit + 2),
            limit,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }

    pub fn record_exchange(&mut self, question: &str, reply: &str) {
        self.push(HistoryEntry::new(Role::User, question));
        self.push(HistoryEntry::new(Role::Assistant, reply));
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_keeps_last_three_exchanges() {
        let mut history = History::new(6);
        for i in 0..5 {
            history.record_exchange(&format!("q{}", i), &format!("a{}", i));
        }

        assert_eq!(history.len(), 6);
        let contents: Vec<&str> = history.entries().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, vec!["q2", "a2", "q3", "a3", "q4", "a4"]);
    }

    #[test]
    fn test_history_alternates_roles() {
        let mut history = History::new(6);
        history.record_exchange("question", "answer");

        let roles: Vec<Role> = history.entries().map(|e| e.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
    }

    #[test]
    fn test_entry_serializes_as_chat_message() {
        let entry = HistoryEntry::new(Role::User, "How do roots grow?");
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"role":"user","content":"How do roots grow?"}"#
        );
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }
}
