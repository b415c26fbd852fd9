//! The task board and its collection operations.
//!
//! This module provides the `Board` struct, which exclusively owns the task
//! collection, the pure functions it is built from (`add`, `remove`, `advance`),
//! and utility functions for due date parsing and formatting.
//!
//! Every operation is total: unknown ids, blank titles and terminal statuses are
//! absorbed as no-ops rather than reported as errors.

use chrono::{Datelike, Duration, Local, NaiveDate, Utc};
use tracing::debug;

use crate::fields::*;
use crate::seed::{default_roster, seed_tasks};
use crate::task::{Draft, Task, TeamMember};
use crate::view::{compute_stats, compute_view, FilterSpec, TaskStats};

/// In-memory task board. Nothing is persisted; a new board starts from the seed
/// list or empty.
#[derive(Debug, Clone)]
pub struct Board {
    tasks: Vec<Task>,
    roster: Vec<TeamMember>,
    next_id: u64,
}

impl Board {
    /// Create a board over an existing task list. Ids continue above the highest
    /// id present.
    pub fn new(tasks: Vec<Task>, roster: Vec<TeamMember>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Board {
            tasks,
            roster,
            next_id,
        }
    }

    /// A board holding the built-in seed tasks and roster.
    pub fn seeded() -> Self {
        Board::new(seed_tasks(), default_roster())
    }

    /// A board with no tasks.
    pub fn empty(roster: Vec<TeamMember>) -> Self {
        Board::new(Vec::new(), roster)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn roster(&self) -> &[TeamMember] {
        &self.roster
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create a task from the draft and append it to the board.
    ///
    /// A draft whose trimmed title is empty is left untouched and nothing is
    /// created. On success the draft is cleared and the new id is returned.
    pub fn create_task(&mut self, draft: &mut Draft) -> Option<u64> {
        if !draft.is_ready() {
            debug!("ignoring draft with blank title");
            return None;
        }
        let id = self.allocate_id();
        let task = task_from_draft(id, draft, Utc::now().timestamp())?;
        debug!(id, title = %task.title, "task created");
        self.tasks = add(std::mem::take(&mut self.tasks), task);
        draft.clear();
        Some(id)
    }

    /// Move a task one step along `todo -> in-progress -> completed`.
    /// Returns false when the id is unknown or the task is already completed.
    pub fn advance_status(&mut self, id: u64) -> bool {
        let Some(next) = self.get(id).and_then(|t| t.status.next()) else {
            debug!(id, "advance ignored");
            return false;
        };
        self.tasks = advance(std::mem::take(&mut self.tasks), id, Utc::now().timestamp());
        debug!(id, status = %next, "task advanced");
        true
    }

    /// Remove a task. Returns false when the id is unknown.
    pub fn delete_task(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks = remove(std::mem::take(&mut self.tasks), id);
        let removed = self.tasks.len() != before;
        debug!(id, removed, "delete task");
        removed
    }

    /// Reassign a task's priority. Returns false when the id is unknown or the
    /// priority is unchanged.
    pub fn set_priority(&mut self, id: u64, priority: Priority) -> bool {
        let now_utc = Utc::now().timestamp();
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) if task.priority != priority => {
                task.priority = priority;
                task.updated_at_utc = now_utc;
                debug!(id, %priority, "priority changed");
                true
            }
            _ => false,
        }
    }

    /// Tasks matching the filter, in board order.
    pub fn view(&self, filter: &FilterSpec) -> Vec<&Task> {
        compute_view(&self.tasks, filter)
    }

    /// Statistics as of the current local time.
    pub fn stats(&self) -> TaskStats {
        compute_stats(&self.tasks, Local::now().naive_local())
    }
}

/// Build a task from a draft. Returns `None` for a blank title.
pub fn task_from_draft(id: u64, draft: &Draft, now_utc: i64) -> Option<Task> {
    let title = draft.title.trim();
    if title.is_empty() {
        return None;
    }
    Some(Task {
        id,
        title: title.to_string(),
        description: draft.description.clone(),
        status: Status::Todo,
        priority: draft.priority,
        assignee: draft
            .assignee
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string),
        due: draft.due,
        tags: draft.tags.clone(),
        created_at_utc: now_utc,
        updated_at_utc: now_utc,
    })
}

/// Append a task to the end of the collection.
pub fn add(mut tasks: Vec<Task>, task: Task) -> Vec<Task> {
    tasks.push(task);
    tasks
}

/// Remove the task with the given id, if present.
pub fn remove(mut tasks: Vec<Task>, id: u64) -> Vec<Task> {
    tasks.retain(|t| t.id != id);
    tasks
}

/// Advance the status of the task with the given id one step. Completed tasks
/// and unknown ids leave the collection unchanged.
pub fn advance(mut tasks: Vec<Task>, id: u64, now_utc: i64) -> Vec<Task> {
    if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
        if let Some(next) = task.status.next() {
            task.status = next;
            task.updated_at_utc = now_utc;
        }
    }
    tasks
}

/// Parse human-readable due date input relative to today.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - "monday" .. "sunday" (and short forms), "next friday"
/// - "in 3d", "in 2w"
/// - "YYYY-MM-DD" format
pub fn parse_due_input(s: &str) -> Option<NaiveDate> {
    parse_due_input_from(s, Local::now().date_naive())
}

/// Same as [`parse_due_input`] with an explicit reference date.
pub fn parse_due_input_from(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "yesterday" => return Some(today - Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return Some(today + Duration::days(days));
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return Some(today + Duration::weeks(weeks));
            }
        }
        return None;
    }

    let weekdays = [
        ("monday", 0), ("tuesday", 1), ("wednesday", 2), ("thursday", 3),
        ("friday", 4), ("saturday", 5), ("sunday", 6),
        ("mon", 0), ("tue", 1), ("wed", 2), ("thu", 3),
        ("fri", 4), ("sat", 5), ("sun", 6),
    ];

    let current_day = today.weekday().num_days_from_monday() as i64;
    for (day_name, target_day) in weekdays {
        let days_ahead = (target_day + 7 - current_day) % 7;
        if s == day_name {
            return Some(today + Duration::days(days_ahead));
        }
        if s == format!("next {}", day_name) {
            let days_to_add = if days_ahead == 0 { 7 } else { days_ahead + 7 };
            return Some(today + Duration::days(days_to_add));
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: Option<NaiveDate>, today: NaiveDate) -> String {
    match due {
        None => "-".into(),
        Some(d) => {
            let delta = (d - today).num_days();
            if delta == 0 {
                "today".into()
            } else if delta == 1 {
                "tomorrow".into()
            } else if delta > 1 {
                format!("in {}d", delta)
            } else {
                format!("{}d late", -delta)
            }
        }
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, priority: Priority) -> Draft {
        Draft {
            title: title.into(),
            priority,
            ..Draft::default()
        }
    }

    #[test]
    fn test_create_appends_todo_and_clears_draft() {
        let mut board = Board::seeded();
        let before = board.len();
        let mut d = draft("  Write docs  ", Priority::Low);
        d.add_tag("docs");

        let id = board.create_task(&mut d).unwrap();

        assert_eq!(board.len(), before + 1);
        let task = board.tasks().last().unwrap();
        assert_eq!(task.id, id);
        assert_eq!(task.title, "Write docs");
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.tags, vec!["docs".to_string()]);
        assert_eq!(task.created_at_utc, task.updated_at_utc);
        assert_eq!(d, Draft::default());
    }

    #[test]
    fn test_create_with_blank_title_is_noop() {
        let mut board = Board::seeded();
        let snapshot = board.tasks().to_vec();
        let mut d = draft("   ", Priority::High);
        d.description = "kept".into();

        assert_eq!(board.create_task(&mut d), None);
        assert_eq!(board.tasks(), snapshot.as_slice());
        assert_eq!(d.description, "kept");
        assert_eq!(d.priority, Priority::High);
    }

    #[test]
    fn test_advance_walks_forward_then_stops() {
        let mut board = Board::empty(default_roster());
        let id = board.create_task(&mut draft("t", Priority::Medium)).unwrap();

        assert!(board.advance_status(id));
        assert_eq!(board.get(id).unwrap().status, Status::InProgress);
        assert!(board.advance_status(id));
        assert_eq!(board.get(id).unwrap().status, Status::Completed);

        let updated = board.get(id).unwrap().updated_at_utc;
        assert!(!board.advance_status(id));
        assert_eq!(board.get(id).unwrap().status, Status::Completed);
        assert_eq!(board.get(id).unwrap().updated_at_utc, updated);
    }

    #[test]
    fn test_unknown_id_leaves_board_unchanged() {
        let mut board = Board::seeded();
        let snapshot = board.tasks().to_vec();
        assert!(!board.advance_status(999));
        assert!(!board.delete_task(999));
        assert!(!board.set_priority(999, Priority::Low));
        assert_eq!(board.tasks(), snapshot.as_slice());
    }

    #[test]
    fn test_delete_removes_only_target() {
        let mut board = Board::seeded();
        assert!(board.delete_task(2));
        assert!(board.get(2).is_none());
        let ids: Vec<u64> = board.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_ids_not_reused_after_deleting_highest() {
        let mut board = Board::seeded();
        let first = board.create_task(&mut draft("a", Priority::Low)).unwrap();
        assert_eq!(first, 5);
        board.delete_task(first);
        let second = board.create_task(&mut draft("b", Priority::Low)).unwrap();
        assert_eq!(second, 6);
    }

    #[test]
    fn test_set_priority_refreshes_timestamp() {
        let mut board = Board::seeded();
        let before = board.get(3).unwrap().updated_at_utc;
        assert!(board.set_priority(3, Priority::Low));
        assert!(!board.set_priority(3, Priority::Low));
        let task = board.get(3).unwrap();
        assert_eq!(task.priority, Priority::Low);
        assert!(task.updated_at_utc > before);
    }

    #[test]
    fn test_pure_functions() {
        let tasks = seed_tasks();
        let advanced = advance(tasks.clone(), 3, 42);
        let task = advanced.iter().find(|t| t.id == 3).unwrap();
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.updated_at_utc, 42);

        // Completed task is untouched.
        assert_eq!(advance(tasks.clone(), 1, 42), tasks);

        let removed = remove(tasks.clone(), 1);
        assert_eq!(removed.len(), 3);
        assert_eq!(remove(tasks.clone(), 77), tasks);

        let extra = task_from_draft(9, &draft("x", Priority::High), 1).unwrap();
        let added = add(tasks.clone(), extra.clone());
        assert_eq!(added.last(), Some(&extra));
    }

    #[test]
    fn test_task_from_draft_normalises_assignee() {
        let mut d = draft("x", Priority::Low);
        d.assignee = Some("   ".into());
        assert_eq!(task_from_draft(1, &d, 0).unwrap().assignee, None);
        d.assignee = Some(" Jane Smith ".into());
        assert_eq!(task_from_draft(1, &d, 0).unwrap().assignee.as_deref(), Some("Jane Smith"));
        assert!(task_from_draft(1, &draft("", Priority::Low), 0).is_none());
    }

    #[test]
    fn test_scenario_write_spec() {
        let mut board = Board::empty(Vec::new());
        let id = board.create_task(&mut draft("Write spec", Priority::High)).unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board.get(id).unwrap().status, Status::Todo);
        board.advance_status(id);
        assert_eq!(board.get(id).unwrap().status, Status::InProgress);
        board.advance_status(id);
        let stats = board.stats();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.in_progress, 0);
        assert_eq!(stats.todo, 0);
        assert_eq!(stats.overdue, 0);
        board.delete_task(id);
        assert!(board.is_empty());
    }

    #[test]
    fn test_parse_due_input() {
        // 2024-01-31 is a Wednesday.
        let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day);
        assert_eq!(parse_due_input_from("today", today), d(2024, 1, 31));
        assert_eq!(parse_due_input_from("Tomorrow", today), d(2024, 2, 1));
        assert_eq!(parse_due_input_from("in 3d", today), d(2024, 2, 3));
        assert_eq!(parse_due_input_from("in 2w", today), d(2024, 2, 14));
        assert_eq!(parse_due_input_from("friday", today), d(2024, 2, 2));
        assert_eq!(parse_due_input_from("wed", today), d(2024, 1, 31));
        assert_eq!(parse_due_input_from("next wednesday", today), d(2024, 2, 7));
        assert_eq!(parse_due_input_from("2024-02-10", today), d(2024, 2, 10));
        assert_eq!(parse_due_input_from("someday", today), None);
        assert_eq!(parse_due_input_from("in xd", today), None);
    }

    #[test]
    fn test_format_due_relative() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(format_due_relative(None, today), "-");
        assert_eq!(format_due_relative(Some(today), today), "today");
        assert_eq!(format_due_relative(today.succ_opt(), today), "tomorrow");
        assert_eq!(format_due_relative(NaiveDate::from_ymd_opt(2024, 2, 5), today), "in 4d");
        assert_eq!(format_due_relative(NaiveDate::from_ymd_opt(2024, 1, 30), today), "2d late");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 6), "a lon…");
    }
}
