//! Task data structures.
//!
//! This module defines the `Task` record held on the board, the read-only
//! `TeamMember` roster entry, and the `Draft` buffer a task is composed in
//! before it is created.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::*;

/// A unit of trackable work on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub assignee: Option<String>,
    pub due: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub created_at_utc: i64,
    pub updated_at_utc: i64,
}

/// A member of the fixed team roster. Never mutated by board operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: u64,
    pub name: String,
    /// Initials shown in place of a picture.
    pub avatar: String,
    pub role: String,
}

impl TeamMember {
    pub fn new(id: u64, name: &str, avatar: &str, role: &str) -> Self {
        TeamMember {
            id,
            name: name.to_string(),
            avatar: avatar.to_string(),
            role: role.to_string(),
        }
    }
}

/// Unsaved form state for a task being composed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assignee: Option<String>,
    pub due: Option<NaiveDate>,
    pub tags: Vec<String>,
}

impl Draft {
    /// Whether the draft would be accepted by `Board::create_task`.
    pub fn is_ready(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Append a tag. Blank tags and tags already present are ignored.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Remove a tag if present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Reset to an empty draft, priority back to the default.
    pub fn clear(&mut self) {
        *self = Draft::default();
    }
}
