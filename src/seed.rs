//! Built-in seed data.
//!
//! The board starts from this fixed list on every launch and the team roster
//! never changes at runtime.

use chrono::NaiveDate;

use crate::fields::{Priority, Status};
use crate::task::{Task, TeamMember};

// Midnight UTC timestamps for the seed creation/update dates.
const JAN_15_2024: i64 = 1_705_276_800;
const JAN_20_2024: i64 = 1_705_708_800;
const JAN_25_2024: i64 = 1_706_140_800;
const JAN_26_2024: i64 = 1_706_227_200;
const JAN_28_2024: i64 = 1_706_400_000;

/// The four tasks every board starts from.
pub fn seed_tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            title: "Implement user authentication".into(),
            description: "Add login/signup functionality with JWT tokens and password hashing".into(),
            status: Status::Completed,
            priority: Priority::High,
            assignee: Some("John Doe".into()),
            due: NaiveDate::from_ymd_opt(2024, 1, 30),
            tags: tags(&["authentication", "security", "backend"]),
            created_at_utc: JAN_15_2024,
            updated_at_utc: JAN_28_2024,
        },
        Task {
            id: 2,
            title: "Design responsive dashboard".into(),
            description: "Create mobile-first responsive layout for admin panel with dark mode support".into(),
            status: Status::InProgress,
            priority: Priority::Medium,
            assignee: Some("Jane Smith".into()),
            due: NaiveDate::from_ymd_opt(2024, 2, 5),
            tags: tags(&["ui", "responsive", "design"]),
            created_at_utc: JAN_20_2024,
            updated_at_utc: JAN_25_2024,
        },
        Task {
            id: 3,
            title: "Set up database schema".into(),
            description: "Design and implement PostgreSQL database structure with proper indexing".into(),
            status: Status::Todo,
            priority: Priority::High,
            assignee: Some("Mike Johnson".into()),
            due: NaiveDate::from_ymd_opt(2024, 2, 10),
            tags: tags(&["database", "backend", "postgresql"]),
            created_at_utc: JAN_25_2024,
            updated_at_utc: JAN_25_2024,
        },
        Task {
            id: 4,
            title: "Implement real-time notifications".into(),
            description: "Add WebSocket-based real-time notifications for task updates".into(),
            status: Status::Todo,
            priority: Priority::Medium,
            assignee: Some("Sarah Wilson".into()),
            due: NaiveDate::from_ymd_opt(2024, 2, 15),
            tags: tags(&["websocket", "notifications", "real-time"]),
            created_at_utc: JAN_26_2024,
            updated_at_utc: JAN_26_2024,
        },
    ]
}

/// The default team roster.
pub fn default_roster() -> Vec<TeamMember> {
    vec![
        TeamMember::new(1, "John Doe", "JD", "Frontend Developer"),
        TeamMember::new(2, "Jane Smith", "JS", "UI/UX Designer"),
        TeamMember::new(3, "Mike Johnson", "MJ", "Backend Developer"),
        TeamMember::new(4, "Sarah Wilson", "SW", "Full Stack Developer"),
    ]
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
