//! Read-side projections over the task collection.
//!
//! Everything here is a pure function of the tasks passed in: the filtered
//! view, the kanban grouping, statistics and per-member workload. Nothing is
//! cached, so derived values like "overdue" always reflect the time given.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::fields::{Priority, Status};
use crate::task::{Task, TeamMember};

/// Active filter predicates. `None` means "all" for that predicate and an empty
/// search matches every task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    pub search: String,
}

impl FilterSpec {
    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.search.is_empty()
    }

    /// Whether a single task passes every predicate.
    pub fn matches(&self, task: &Task) -> bool {
        let status_ok = self.status.map_or(true, |s| task.status == s);
        let priority_ok = self.priority.map_or(true, |p| task.priority == p);
        let assignee_ok = self
            .assignee
            .as_deref()
            .map_or(true, |a| task.assignee.as_deref() == Some(a));
        let search = self.search.to_lowercase();
        let search_ok = task.title.to_lowercase().contains(&search)
            || task.description.to_lowercase().contains(&search);
        status_ok && priority_ok && assignee_ok && search_ok
    }

    /// Short human-readable summary of the active predicates.
    pub fn describe(&self) -> String {
        if self.is_empty() {
            return "all tasks".to_string();
        }
        let mut parts = Vec::new();
        if let Some(s) = self.status {
            parts.push(format!("status={}", s));
        }
        if let Some(p) = self.priority {
            parts.push(format!("priority={}", p));
        }
        if let Some(a) = &self.assignee {
            parts.push(format!("assignee={}", a));
        }
        if !self.search.is_empty() {
            parts.push(format!("search='{}'", self.search));
        }
        parts.join(" ")
    }
}

/// Tasks matching the filter, in their original order.
pub fn compute_view<'a>(tasks: &'a [Task], filter: &FilterSpec) -> Vec<&'a Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

/// A filtered view partitioned into the three kanban columns.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Buckets<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
}

impl<'a> Buckets<'a> {
    pub fn column(&self, status: Status) -> &[&'a Task] {
        match status {
            Status::Todo => &self.todo,
            Status::InProgress => &self.in_progress,
            Status::Completed => &self.completed,
        }
    }

    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Group a view by status, keeping the order within each column.
pub fn group_by_status<'a>(view: &[&'a Task]) -> Buckets<'a> {
    let mut buckets = Buckets::default();
    for &task in view {
        match task.status {
            Status::Todo => buckets.todo.push(task),
            Status::InProgress => buckets.in_progress.push(task),
            Status::Completed => buckets.completed.push(task),
        }
    }
    buckets
}

/// Board-wide counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
}

/// A task is overdue when its due date (midnight local time) has passed and it
/// is not completed. Tasks without a due date are never overdue.
pub fn is_overdue(task: &Task, now: NaiveDateTime) -> bool {
    task.status != Status::Completed
        && task.due.map_or(false, |d| d.and_time(NaiveTime::MIN) < now)
}

/// Compute statistics for the collection as of `now`.
pub fn compute_stats(tasks: &[Task], now: NaiveDateTime) -> TaskStats {
    let mut stats = TaskStats {
        total: tasks.len(),
        ..TaskStats::default()
    };
    for task in tasks {
        match task.status {
            Status::Todo => stats.todo += 1,
            Status::InProgress => stats.in_progress += 1,
            Status::Completed => stats.completed += 1,
        }
        if is_overdue(task, now) {
            stats.overdue += 1;
        }
    }
    stats
}

/// Number of tasks assigned to a roster member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberLoad<'a> {
    pub member: &'a TeamMember,
    pub tasks: usize,
}

/// Task count per roster member, in roster order. Only exact name matches count.
pub fn workload<'a>(tasks: &[Task], roster: &'a [TeamMember]) -> Vec<MemberLoad<'a>> {
    roster
        .iter()
        .map(|member| MemberLoad {
            member,
            tasks: tasks
                .iter()
                .filter(|t| t.assignee.as_deref() == Some(member.name.as_str()))
                .count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{default_roster, seed_tasks};
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn ids(view: &[&Task]) -> Vec<u64> {
        view.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_default_filter_returns_everything_in_order() {
        let tasks = seed_tasks();
        let view = compute_view(&tasks, &FilterSpec::default());
        assert_eq!(ids(&view), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_filter_predicates_combine() {
        let tasks = seed_tasks();
        let by_priority = FilterSpec {
            priority: Some(Priority::High),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&compute_view(&tasks, &by_priority)), vec![1, 3]);

        let high_todo = FilterSpec {
            status: Some(Status::Todo),
            ..by_priority.clone()
        };
        assert_eq!(ids(&compute_view(&tasks, &high_todo)), vec![3]);

        let by_assignee = FilterSpec {
            assignee: Some("Jane Smith".into()),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&compute_view(&tasks, &by_assignee)), vec![2]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let tasks = seed_tasks();
        let title = FilterSpec {
            search: "DATABASE".into(),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&compute_view(&tasks, &title)), vec![3]);

        let description = FilterSpec {
            search: "websocket".into(),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&compute_view(&tasks, &description)), vec![4]);

        let nothing = FilterSpec {
            search: "kubernetes".into(),
            ..FilterSpec::default()
        };
        assert!(compute_view(&tasks, &nothing).is_empty());
    }

    #[test]
    fn test_view_is_repeatable() {
        let tasks = seed_tasks();
        let filter = FilterSpec {
            search: "implement".into(),
            ..FilterSpec::default()
        };
        assert_eq!(compute_view(&tasks, &filter), compute_view(&tasks, &filter));
    }

    #[test]
    fn test_group_by_status_is_stable() {
        let mut tasks = seed_tasks();
        tasks.swap(2, 3);
        let view = compute_view(&tasks, &FilterSpec::default());
        let buckets = group_by_status(&view);
        assert_eq!(ids(&buckets.todo), vec![4, 3]);
        assert_eq!(ids(&buckets.in_progress), vec![2]);
        assert_eq!(ids(&buckets.completed), vec![1]);
        assert_eq!(buckets.len(), view.len());
        assert_eq!(ids(buckets.column(Status::InProgress)), vec![2]);
    }

    #[test]
    fn test_stats_partition_collection() {
        let tasks = seed_tasks();
        let stats = compute_stats(&tasks, at(2024, 1, 1, 12));
        assert_eq!(stats.total, tasks.len());
        assert_eq!(stats.todo + stats.in_progress + stats.completed, stats.total);
        assert_eq!((stats.todo, stats.in_progress, stats.completed), (2, 1, 1));
        assert_eq!(stats.overdue, 0);
    }

    #[test]
    fn test_overdue_excludes_completed_and_undated() {
        let mut tasks = seed_tasks();
        tasks[3].due = None;
        // Task 1 is completed (due 01-30), task 2 due 02-05, task 3 due 02-10.
        let stats = compute_stats(&tasks, at(2024, 2, 20, 9));
        assert_eq!(stats.overdue, 2);
    }

    #[test]
    fn test_overdue_boundary_is_midnight_of_due_date() {
        let tasks = seed_tasks();
        let task3 = &tasks[2];
        assert!(!is_overdue(task3, at(2024, 2, 9, 23)));
        assert!(!is_overdue(task3, at(2024, 2, 10, 0)));
        assert!(is_overdue(task3, at(2024, 2, 10, 1)));
    }

    #[test]
    fn test_workload_counts_exact_matches() {
        let mut tasks = seed_tasks();
        tasks[1].assignee = Some("jane smith".into());
        tasks[2].assignee = Some("John Doe".into());
        let roster = default_roster();
        let load = workload(&tasks, &roster);
        let counts: Vec<(&str, usize)> = load
            .iter()
            .map(|l| (l.member.name.as_str(), l.tasks))
            .collect();
        assert_eq!(
            counts,
            vec![("John Doe", 2), ("Jane Smith", 0), ("Mike Johnson", 0), ("Sarah Wilson", 1)]
        );
    }

    #[test]
    fn test_describe_filter() {
        assert_eq!(FilterSpec::default().describe(), "all tasks");
        let filter = FilterSpec {
            status: Some(Status::InProgress),
            search: "ui".into(),
            ..FilterSpec::default()
        };
        assert_eq!(filter.describe(), "status=in-progress search='ui'");
    }
}
