//! Line-oriented shell over a board session.
//!
//! The shell owns a `Board`, a `Draft` and a `FilterSpec`. Each input line is
//! parsed into a `ShellCommand` and applied to the session. Parse failures are
//! reported and the session carries on; board operations themselves never fail.

use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::board::{parse_due_input_from, Board};
use crate::error::ShellError;
use crate::fields::*;
use crate::report::{write_columns, write_draft, write_stats, write_table, write_team};
use crate::task::Draft;
use crate::view::{group_by_status, workload, FilterSpec};

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Title(String),
    Description(String),
    Priority(Priority),
    Assignee(Option<String>),
    Due(Option<NaiveDate>),
    /// Due text that could not be read as a date. Clears the draft's due date.
    UnreadableDue(String),
    Tag(String),
    Untag(String),
    ShowDraft,
    Create,
    Advance(u64),
    Delete(u64),
    FilterStatus(Option<Status>),
    FilterPriority(Option<Priority>),
    FilterAssignee(Option<String>),
    Search(String),
    ClearFilters,
    List,
    Board,
    Stats,
    Team,
    Help,
    Quit,
    Nothing,
}

const HELP: &str = "\
Draft:   title <text> | desc <text> | priority <low|medium|high> | assignee <name|none>
         due <date|none> | tag <tag> | untag <tag> | draft | create
Tasks:   advance <id> (alias start) | delete <id>
Filter:  filter status|priority|assignee <value|all> | search [text] | clear
Views:   list | board | stats | team
Other:   help | quit";

/// Parse one shell line. `today` anchors relative due dates.
pub fn parse_line(line: &str, today: NaiveDate) -> Result<ShellCommand, ShellError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(ShellCommand::Nothing);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    let cmd = match word.to_lowercase().as_str() {
        "title" => ShellCommand::Title(rest.to_string()),
        "desc" | "description" => ShellCommand::Description(rest.to_string()),
        "priority" => ShellCommand::Priority(require(rest, "priority", "a priority")?.parse()?),
        "assignee" => ShellCommand::Assignee(optional(rest)),
        "due" => match optional(rest) {
            None => ShellCommand::Due(None),
            Some(text) => match parse_due_input_from(&text, today) {
                Some(date) => ShellCommand::Due(Some(date)),
                None => ShellCommand::UnreadableDue(text),
            },
        },
        "tag" => ShellCommand::Tag(require(rest, "tag", "a tag")?.to_string()),
        "untag" => ShellCommand::Untag(require(rest, "untag", "a tag")?.to_string()),
        "draft" => ShellCommand::ShowDraft,
        "create" | "add" => ShellCommand::Create,
        "advance" | "start" => ShellCommand::Advance(parse_id(rest, "advance")?),
        "delete" | "rm" => ShellCommand::Delete(parse_id(rest, "delete")?),
        "filter" => parse_filter(rest)?,
        "search" => ShellCommand::Search(rest.to_string()),
        "clear" => ShellCommand::ClearFilters,
        "list" | "ls" => ShellCommand::List,
        "board" => ShellCommand::Board,
        "stats" => ShellCommand::Stats,
        "team" => ShellCommand::Team,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(ShellError::UnknownCommand(other.to_string())),
    };
    Ok(cmd)
}

fn require<'a>(rest: &'a str, command: &'static str, what: &'static str) -> Result<&'a str, ShellError> {
    if rest.is_empty() {
        Err(ShellError::MissingArgument { command, what })
    } else {
        Ok(rest)
    }
}

/// `none`, `all` and an empty argument clear the value.
fn optional(rest: &str) -> Option<String> {
    match rest.to_lowercase().as_str() {
        "" | "none" | "all" => None,
        _ => Some(rest.to_string()),
    }
}

fn parse_id(rest: &str, command: &'static str) -> Result<u64, ShellError> {
    let raw = require(rest, command, "a task id")?;
    raw.trim_start_matches('#')
        .parse()
        .map_err(|_| ShellError::InvalidId(raw.to_string()))
}

fn parse_filter(rest: &str) -> Result<ShellCommand, ShellError> {
    let (kind, value) = match rest.split_once(char::is_whitespace) {
        Some((k, v)) => (k, v.trim()),
        None => (rest, ""),
    };
    let value = optional(value);
    match kind.to_lowercase().as_str() {
        "status" => Ok(ShellCommand::FilterStatus(value.map(|v| v.parse()).transpose()?)),
        "priority" => Ok(ShellCommand::FilterPriority(value.map(|v| v.parse()).transpose()?)),
        "assignee" => Ok(ShellCommand::FilterAssignee(value)),
        "" => Err(ShellError::MissingArgument {
            command: "filter",
            what: "status, priority or assignee",
        }),
        other => Err(ShellError::UnknownFilter(other.to_string())),
    }
}

/// Mutable state of one shell session.
pub struct Session {
    pub board: Board,
    pub draft: Draft,
    pub filter: FilterSpec,
    default_priority: Priority,
}

impl Session {
    pub fn new(board: Board, default_priority: Priority) -> Self {
        Session {
            board,
            draft: Draft {
                priority: default_priority,
                ..Draft::default()
            },
            filter: FilterSpec::default(),
            default_priority,
        }
    }

    /// Apply a command, writing any feedback to `out`. Returns false on quit.
    pub fn execute<W: Write>(&mut self, cmd: ShellCommand, out: &mut W) -> io::Result<bool> {
        debug!(?cmd, "shell command");
        let today = Local::now().date_naive();
        match cmd {
            ShellCommand::Title(title) => self.draft.title = title,
            ShellCommand::Description(desc) => self.draft.description = desc,
            ShellCommand::Priority(p) => self.draft.priority = p,
            ShellCommand::Assignee(a) => self.draft.assignee = a,
            ShellCommand::Due(d) => self.draft.due = d,
            ShellCommand::UnreadableDue(text) => {
                self.draft.due = None;
                writeln!(out, "Due date '{}' not understood, draft has no due date", text)?;
            }
            ShellCommand::Tag(tag) => {
                if !self.draft.add_tag(&tag) {
                    writeln!(out, "Tag '{}' already on draft", tag.trim())?;
                }
            }
            ShellCommand::Untag(tag) => {
                self.draft.remove_tag(&tag);
            }
            ShellCommand::ShowDraft => write_draft(out, &self.draft)?,
            ShellCommand::Create => match self.board.create_task(&mut self.draft) {
                Some(id) => {
                    self.draft.priority = self.default_priority;
                    writeln!(out, "Created task #{}", id)?;
                }
                None => writeln!(out, "Draft needs a title")?,
            },
            ShellCommand::Advance(id) => {
                if self.board.advance_status(id) {
                    if let Some(task) = self.board.get(id) {
                        writeln!(out, "Task #{} is now {}", id, task.status)?;
                    }
                }
            }
            ShellCommand::Delete(id) => {
                if self.board.delete_task(id) {
                    writeln!(out, "Deleted task #{}", id)?;
                }
            }
            ShellCommand::FilterStatus(s) => self.filter.status = s,
            ShellCommand::FilterPriority(p) => self.filter.priority = p,
            ShellCommand::FilterAssignee(a) => self.filter.assignee = a,
            ShellCommand::Search(text) => self.filter.search = text,
            ShellCommand::ClearFilters => self.filter = FilterSpec::default(),
            ShellCommand::List => {
                let view = self.board.view(&self.filter);
                write_table(out, &view, today)?;
            }
            ShellCommand::Board => {
                let view = self.board.view(&self.filter);
                writeln!(out, "Showing {}", self.filter.describe())?;
                write_columns(out, &group_by_status(&view))?;
            }
            ShellCommand::Stats => write_stats(out, &self.board.stats())?,
            ShellCommand::Team => {
                write_team(out, &workload(self.board.tasks(), self.board.roster()))?
            }
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Quit => return Ok(false),
            ShellCommand::Nothing => {}
        }
        Ok(true)
    }

    /// Read commands from `input` until end of input or `quit`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W, prompt: bool) -> io::Result<()> {
        info!(tasks = self.board.len(), "shell session started");
        if prompt {
            write!(out, "tb> ")?;
            out.flush()?;
        }
        for line in input.lines() {
            let line = line?;
            let today = Local::now().date_naive();
            let keep_going = match parse_line(&line, today) {
                Ok(cmd) => self.execute(cmd, out)?,
                Err(e) => {
                    writeln!(out, "error: {}", e)?;
                    true
                }
            };
            if !keep_going {
                break;
            }
            if prompt {
                write!(out, "tb> ")?;
                out.flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_roster;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    fn parse(line: &str) -> Result<ShellCommand, ShellError> {
        parse_line(line, today())
    }

    #[test]
    fn test_parse_draft_commands() {
        assert_eq!(parse("title Write release notes").unwrap(), ShellCommand::Title("Write release notes".into()));
        assert_eq!(parse("priority HIGH").unwrap(), ShellCommand::Priority(Priority::High));
        assert_eq!(parse("assignee Jane Smith").unwrap(), ShellCommand::Assignee(Some("Jane Smith".into())));
        assert_eq!(parse("assignee none").unwrap(), ShellCommand::Assignee(None));
        assert_eq!(parse("due tomorrow").unwrap(), ShellCommand::Due(NaiveDate::from_ymd_opt(2024, 2, 1)));
        assert_eq!(parse("due").unwrap(), ShellCommand::Due(None));
        assert_eq!(parse("due someday").unwrap(), ShellCommand::UnreadableDue("someday".into()));
        assert_eq!(parse("tag backend").unwrap(), ShellCommand::Tag("backend".into()));
        assert_eq!(parse("   ").unwrap(), ShellCommand::Nothing);
        assert_eq!(parse("# comment").unwrap(), ShellCommand::Nothing);
    }

    #[test]
    fn test_parse_task_and_filter_commands() {
        assert_eq!(parse("start #3").unwrap(), ShellCommand::Advance(3));
        assert_eq!(parse("delete 4").unwrap(), ShellCommand::Delete(4));
        assert_eq!(
            parse("filter status in-progress").unwrap(),
            ShellCommand::FilterStatus(Some(Status::InProgress))
        );
        assert_eq!(parse("filter priority all").unwrap(), ShellCommand::FilterPriority(None));
        assert_eq!(
            parse("filter assignee John Doe").unwrap(),
            ShellCommand::FilterAssignee(Some("John Doe".into()))
        );
        assert_eq!(parse("search").unwrap(), ShellCommand::Search(String::new()));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse("frobnicate").unwrap_err(), ShellError::UnknownCommand("frobnicate".into()));
        assert_eq!(parse("advance abc").unwrap_err(), ShellError::InvalidId("abc".into()));
        assert!(matches!(parse("delete").unwrap_err(), ShellError::MissingArgument { .. }));
        assert!(matches!(parse("priority urgent").unwrap_err(), ShellError::Field(_)));
        assert_eq!(parse("filter colour red").unwrap_err(), ShellError::UnknownFilter("colour".into()));
        assert!(matches!(parse("complete 3").unwrap_err(), ShellError::UnknownCommand(_)));
    }

    #[test]
    fn test_scripted_session_runs_scenario() {
        let script = "\
title Write release notes
priority high
tag docs
tag docs
create
advance 1
advance 1
advance 1
stats
delete 1
list
quit
title never reached
";
        let mut session = Session::new(Board::empty(default_roster()), Priority::Medium);
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Tag 'docs' already on draft"));
        assert!(text.contains("Created task #1"));
        assert!(text.contains("Task #1 is now in-progress"));
        assert!(text.contains("Task #1 is now completed"));
        assert_eq!(text.matches("is now").count(), 2);
        assert!(text.contains("Total Tasks: 1\nCompleted:   1\nIn Progress: 0\nTo Do:       0\nOverdue:     0"));
        assert!(text.contains("Deleted task #1"));
        assert!(session.board.is_empty());
        assert!(session.draft.title.is_empty());
    }

    #[test]
    fn test_unreadable_due_clears_earlier_date() {
        let mut session = Session::new(Board::empty(default_roster()), Priority::Medium);
        let mut out = Vec::new();
        session.run("due 2024-03-01\n".as_bytes(), &mut out, false).unwrap();
        assert_eq!(session.draft.due, NaiveDate::from_ymd_opt(2024, 3, 1));

        session.run("due someday\ntitle Later\ncreate\n".as_bytes(), &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Due date 'someday' not understood"));
        assert_eq!(session.board.tasks()[0].due, None);
    }

    #[test]
    fn test_create_without_title_keeps_draft() {
        let mut session = Session::new(Board::empty(default_roster()), Priority::Low);
        let mut out = Vec::new();
        session.execute(ShellCommand::Description("details".into()), &mut out).unwrap();
        session.execute(ShellCommand::Create, &mut out).unwrap();
        assert!(session.board.is_empty());
        assert_eq!(session.draft.description, "details");
        assert!(String::from_utf8(out).unwrap().contains("Draft needs a title"));
    }

    #[test]
    fn test_default_priority_restored_after_create() {
        let mut session = Session::new(Board::empty(default_roster()), Priority::High);
        let mut out = Vec::new();
        session.execute(ShellCommand::Title("x".into()), &mut out).unwrap();
        session.execute(ShellCommand::Priority(Priority::Low), &mut out).unwrap();
        session.execute(ShellCommand::Create, &mut out).unwrap();
        assert_eq!(session.board.tasks()[0].priority, Priority::Low);
        assert_eq!(session.draft.priority, Priority::High);
    }

    #[test]
    fn test_parse_error_does_not_end_session() {
        let mut session = Session::new(Board::seeded(), Priority::Medium);
        let mut out = Vec::new();
        session.run("bogus\nfilter status todo\nboard\n".as_bytes(), &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("error: unknown command 'bogus'"));
        assert!(text.contains("Showing status=todo"));
        assert!(text.contains("== To Do (2) =="));
        assert!(text.contains("== Completed (0) =="));
    }
}
