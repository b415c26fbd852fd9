//! Enumerations and field types for the task board.
//!
//! This module defines the structured values a task carries: its workflow status
//! and its priority, together with parsing and display helpers shared by the CLI,
//! the shell and the TUI.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ParseFieldError;

/// Task workflow status.
///
/// Status only ever moves forward: `Todo -> InProgress -> Completed`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl Status {
    /// All statuses in kanban column order.
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Completed];

    /// The next status in the forward-only workflow, or `None` once terminal.
    pub fn next(self) -> Option<Status> {
        match self {
            Status::Todo => Some(Status::InProgress),
            Status::InProgress => Some(Status::Completed),
            Status::Completed => None,
        }
    }

    /// Position of this status in [`Status::ALL`].
    pub fn column(self) -> usize {
        match self {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::Completed => 2,
        }
    }

    /// Label of the action that advances a task out of this status.
    pub fn advance_label(self) -> Option<&'static str> {
        match self {
            Status::Todo => Some("Start"),
            Status::InProgress => Some("Complete"),
            Status::Completed => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Todo => write!(f, "todo"),
            Status::InProgress => write!(f, "in-progress"),
            Status::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for Status {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" | "to-do" => Ok(Status::Todo),
            "in-progress" | "inprogress" | "in_progress" | "doing" => Ok(Status::InProgress),
            "completed" | "done" => Ok(Status::Completed),
            _ => Err(ParseFieldError::Status(s.to_string())),
        }
    }
}

/// Priority classification, chosen when the task is drafted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Cycle to the next priority, wrapping from high back to low.
    pub fn cycle(self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

impl FromStr for Priority {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "med" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ParseFieldError::Priority(s.to_string())),
        }
    }
}

/// Format a task status as a kanban column heading.
pub fn format_status(s: Status) -> &'static str {
    match s {
        Status::Todo => "To Do",
        Status::InProgress => "In Progress",
        Status::Completed => "Completed",
    }
}

/// Format a priority for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_advances_forward_only() {
        assert_eq!(Status::Todo.next(), Some(Status::InProgress));
        assert_eq!(Status::InProgress.next(), Some(Status::Completed));
        assert_eq!(Status::Completed.next(), None);
    }

    #[test]
    fn test_status_parse_and_display() {
        for status in Status::ALL {
            assert_eq!(status.to_string().parse::<Status>().unwrap(), status);
        }
        assert_eq!("Done".parse::<Status>().unwrap(), Status::Completed);
        assert!("blocked".parse::<Status>().is_err());
    }

    #[test]
    fn test_priority_parse_and_cycle() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!(Priority::High.cycle(), Priority::Low);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }
}
