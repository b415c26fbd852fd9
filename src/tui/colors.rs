//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::{Priority, Status};

/// Used for the To Do column and badges
pub const SLATE: Color = Color::Rgb(110, 118, 129);
/// Used for In Progress
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for Completed
pub const DARK_GREEN: Color = Color::Rgb(0, 120, 0);
/// Used for high priority and overdue dates
pub const DARK_RED: Color = Color::Rgb(170, 20, 20);
/// Used for medium priority
pub const ORANGE: Color = Color::Rgb(230, 120, 0);
/// Used for low priority
pub const SKY: Color = Color::Rgb(60, 130, 220);

pub fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => SLATE,
        Status::InProgress => GOLD,
        Status::Completed => DARK_GREEN,
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => DARK_RED,
        Priority::Medium => ORANGE,
        Priority::Low => SKY,
    }
}
