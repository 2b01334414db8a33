//! Chat transcript kept per wizard session

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

/// A single transcript line
#[derive(Debug, Clone, Serialize)]
pub struct ChatEntry {
    pub id: u64,
    pub role: ChatRole,
    pub text: String,
    /// Placeholder for a remote reply that has not arrived yet
    pub pending: bool,
    pub created_at: DateTime<Utc>,
}

/// Append-only transcript. A pending entry is resolved in place, so the
/// order of entries never changes once they are appended. Only the newest
/// `max_entries` entries are kept.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTranscript {
    entries: Vec<ChatEntry>,
    #[serde(skip)]
    next_id: u64,
    #[serde(skip)]
    max_entries: usize,
}

impl ChatTranscript {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            max_entries: max_entries.max(1),
        }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn push(&mut self, role: ChatRole, text: impl Into<String>) -> u64 {
        self.append(role, text.into(), false)
    }

    pub fn push_pending(&mut self, text: impl Into<String>) -> u64 {
        self.append(ChatRole::System, text.into(), true)
    }

    /// Replace a pending entry with its final role and text.
    /// Returns false if no pending entry has this id.
    pub fn resolve(&mut self, id: u64, role: ChatRole, text: impl Into<String>) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id && entry.pending)
        {
            Some(entry) => {
                entry.role = role;
                entry.text = text.into();
                entry.pending = false;
                true
            }
            None => false,
        }
    }

    /// Insert a new entry directly after `after_id`, or at the end if that
    /// entry no longer exists
    pub fn insert_after(&mut self, after_id: u64, role: ChatRole, text: impl Into<String>) -> u64 {
        let entry = self.new_entry(role, text.into(), false);
        let id = entry.id;
        match self.entries.iter().position(|e| e.id == after_id) {
            Some(pos) => self.entries.insert(pos + 1, entry),
            None => self.entries.push(entry),
        }
        self.trim();
        id
    }

    fn append(&mut self, role: ChatRole, text: String, pending: bool) -> u64 {
        let entry = self.new_entry(role, text, pending);
        let id = entry.id;
        self.entries.push(entry);
        self.trim();
        id
    }

    /// Drop the oldest entries beyond the limit
    fn trim(&mut self) {
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(0..excess);
        }
    }

    fn new_entry(&mut self, role: ChatRole, text: String, pending: bool) -> ChatEntry {
        self.next_id += 1;
        ChatEntry {
            id: self.next_id,
            role,
            text,
            pending,
            created_at: Utc::now(),
        }
    }
}
