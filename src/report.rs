//! Plain-text rendering of board views for the CLI and the shell.

use std::io::{self, Write};

use chrono::NaiveDate;

use crate::board::{format_due_relative, truncate};
use crate::fields::*;
use crate::task::{Draft, Task};
use crate::view::{Buckets, MemberLoad, TaskStats};

/// Write tasks as a formatted table.
pub fn write_table<W: Write>(out: &mut W, tasks: &[&Task], today: NaiveDate) -> io::Result<()> {
    writeln!(
        out,
        "{:<5} {:<12} {:<7} {:<10} {:<14} {}",
        "ID", "Status", "Pri", "Due", "Assignee", "Title [tags]"
    )?;
    for t in tasks {
        let tags = if t.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", t.tags.join(","))
        };
        let assignee = t.assignee.as_deref().unwrap_or("-");
        writeln!(
            out,
            "{:<5} {:<12} {:<7} {:<10} {:<14} {}{}",
            t.id,
            t.status.to_string(),
            format_priority(t.priority),
            format_due_relative(t.due, today),
            truncate(assignee, 14),
            t.title,
            tags
        )?;
    }
    Ok(())
}

/// Write the kanban columns one after another.
pub fn write_columns<W: Write>(out: &mut W, buckets: &Buckets<'_>) -> io::Result<()> {
    for status in Status::ALL {
        let column = buckets.column(status);
        writeln!(out, "== {} ({}) ==", format_status(status), column.len())?;
        if column.is_empty() {
            writeln!(out, "  (empty)")?;
        }
        for t in column {
            let action = status
                .advance_label()
                .map(|label| format!("  [{}]", label))
                .unwrap_or_default();
            writeln!(
                out,
                "  #{:<4} {} ({}){}",
                t.id,
                t.title,
                format_priority(t.priority),
                action
            )?;
        }
    }
    Ok(())
}

pub fn write_stats<W: Write>(out: &mut W, stats: &TaskStats) -> io::Result<()> {
    writeln!(out, "Total Tasks: {}", stats.total)?;
    writeln!(out, "Completed:   {}", stats.completed)?;
    writeln!(out, "In Progress: {}", stats.in_progress)?;
    writeln!(out, "To Do:       {}", stats.todo)?;
    writeln!(out, "Overdue:     {}", stats.overdue)
}

pub fn write_team<W: Write>(out: &mut W, load: &[MemberLoad<'_>]) -> io::Result<()> {
    if load.is_empty() {
        return writeln!(out, "No team members.");
    }
    for entry in load {
        let m = entry.member;
        writeln!(
            out,
            "[{}] {:<16} {:<22} {} tasks",
            m.avatar, m.name, m.role, entry.tasks
        )?;
    }
    Ok(())
}

pub fn write_draft<W: Write>(out: &mut W, draft: &Draft) -> io::Result<()> {
    let title = if draft.title.trim().is_empty() { "(none)" } else { draft.title.as_str() };
    writeln!(out, "Title:       {}", title)?;
    writeln!(out, "Description: {}", if draft.description.is_empty() { "-" } else { draft.description.as_str() })?;
    writeln!(out, "Priority:    {}", format_priority(draft.priority))?;
    writeln!(out, "Assignee:    {}", draft.assignee.as_deref().unwrap_or("-"))?;
    writeln!(out, "Due:         {}", draft.due.map(|d| d.to_string()).unwrap_or_else(|| "-".into()))?;
    writeln!(
        out,
        "Tags:        {}",
        if draft.tags.is_empty() { "-".to_string() } else { draft.tags.join(", ") }
    )
}
