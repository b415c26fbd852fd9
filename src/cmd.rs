//! Command implementations for the CLI interface.
//!
//! This module contains the command handlers behind each subcommand. One-shot
//! commands render the starting board; `ui` and `shell` open a session in which
//! tasks can be created, advanced and deleted.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use chrono::Local;
use clap::{Args, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use serde::Serialize;
use tracing::info;

use crate::board::Board;
use crate::cli::Cli;
use crate::config::Settings;
use crate::fields::*;
use crate::report::{write_columns, write_stats, write_table, write_team};
use crate::shell::Session;
use crate::tui::run::run_tui;
use crate::view::{group_by_status, workload, FilterSpec};

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive kanban board.
    Ui,

    /// List tasks with optional filters.
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Limit number of rows printed.
        #[arg(long)]
        limit: Option<usize>,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show the filtered tasks grouped into kanban columns.
    Board {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show task counts by status and the overdue count.
    Stats {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List team members and their task counts.
    Team,

    /// Start an interactive command shell.
    Shell {
        /// Read commands from this file instead of stdin.
        #[arg(long)]
        script: Option<PathBuf>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Filter flags shared by `list` and `board`. Omitted flags match everything.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Filter by status.
    #[arg(long, value_enum)]
    pub status: Option<Status>,
    /// Filter by priority.
    #[arg(long, value_enum)]
    pub priority: Option<Priority>,
    /// Filter by exact assignee name.
    #[arg(long)]
    pub assignee: Option<String>,
    /// Case-insensitive text to find in title or description.
    #[arg(long, default_value = "")]
    pub search: String,
}

impl From<FilterArgs> for FilterSpec {
    fn from(args: FilterArgs) -> Self {
        FilterSpec {
            status: args.status,
            priority: args.priority,
            assignee: args.assignee,
            search: args.search,
        }
    }
}

/// Launch the terminal user interface.
pub fn cmd_ui(board: Board, settings: &Settings) {
    info!(tasks = board.len(), "starting ui");
    if let Err(e) = run_tui(board, settings.default_priority) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Print the filtered task table.
pub fn cmd_list(board: &Board, filter: FilterSpec, limit: Option<usize>, json: bool) {
    let mut view = board.view(&filter);
    let matched = view.len();
    if let Some(limit) = limit {
        view.truncate(limit);
    }
    if json {
        print_json(&view);
        return;
    }
    if view.is_empty() {
        println!("{}", empty_list_note(matched, &filter));
        return;
    }
    let today = Local::now().date_naive();
    report_io(write_table(&mut io::stdout().lock(), &view, today));
}

/// Note printed in place of an empty table. `matched` counts tasks before `--limit`.
fn empty_list_note(matched: usize, filter: &FilterSpec) -> String {
    if matched == 0 {
        format!("No tasks match {}.", filter.describe())
    } else {
        format!("{} matching tasks hidden by --limit 0.", matched)
    }
}

/// Print the filtered view as kanban columns.
pub fn cmd_board(board: &Board, filter: FilterSpec) {
    let view = board.view(&filter);
    println!("Showing {}", filter.describe());
    report_io(write_columns(&mut io::stdout().lock(), &group_by_status(&view)));
}

/// Print board statistics.
pub fn cmd_stats(board: &Board, json: bool) {
    let stats = board.stats();
    if json {
        print_json(&stats);
    } else {
        report_io(write_stats(&mut io::stdout().lock(), &stats));
    }
}

/// Print the roster with task counts.
pub fn cmd_team(board: &Board) {
    let load = workload(board.tasks(), board.roster());
    report_io(write_team(&mut io::stdout().lock(), &load));
}

/// Run the command shell on stdin or a script file.
pub fn cmd_shell(board: Board, settings: &Settings, script: Option<PathBuf>) {
    let mut session = Session::new(board, settings.default_priority);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = match script {
        Some(path) => match File::open(&path) {
            Ok(file) => session.run(BufReader::new(file), &mut out, false),
            Err(e) => {
                eprintln!("Failed to open script {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let _ = writeln!(out, "Task board shell. Type 'help' for commands, 'quit' to leave.");
            session.run(io::stdin().lock(), &mut out, true)
        }
    };
    report_io(result);
}

/// Write shell completions to stdout.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serialising output: {e}");
            std::process::exit(1);
        }
    }
}

fn report_io(result: io::Result<()>) {
    if let Err(e) = result {
        // A closed pipe (e.g. `tb list | head`) is not worth reporting.
        if e.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("Error writing output: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parses_filters() {
        let cli = Cli::try_parse_from([
            "tb", "list", "--status", "in-progress", "--priority", "high", "--search", "db", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::List { filter, limit, json } => {
                assert!(json);
                assert_eq!(limit, None);
                let spec = FilterSpec::from(filter);
                assert_eq!(spec.status, Some(Status::InProgress));
                assert_eq!(spec.priority, Some(Priority::High));
                assert_eq!(spec.search, "db");
                assert_eq!(spec.assignee, None);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from(["tb", "stats", "--empty", "-vv"]).unwrap();
        assert!(cli.empty);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Stats { json: false }));
    }

    #[test]
    fn test_cli_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["tb", "board", "--status", "blocked"]).is_err());
    }

    #[test]
    fn test_empty_list_note_distinguishes_limit() {
        let filter = FilterSpec {
            priority: Some(Priority::High),
            ..FilterSpec::default()
        };
        assert_eq!(empty_list_note(0, &filter), "No tasks match priority=high.");
        assert_eq!(empty_list_note(2, &filter), "2 matching tasks hidden by --limit 0.");
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
