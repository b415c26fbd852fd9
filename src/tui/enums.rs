//! Enumerations for TUI state management.

/// Which screen the board application is showing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    Board,
    TaskDetail,
    AddTask,
    Search,
    Help,
    Confirm,
}
