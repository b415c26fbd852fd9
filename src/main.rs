//! # tb - In-memory kanban task board
//!
//! A small task board with a forward-only workflow (To Do → In Progress →
//! Completed), multi-predicate filtering, statistics and a terminal kanban view.
//!
//! ## Key Features
//!
//! - **Draft then create**: compose a task (title, description, priority, assignee,
//!   due date, tags) and create it onto the board
//! - **Forward-only workflow**: Start and Complete actions, no way back
//! - **Filtering**: by status, priority, assignee and free-text search
//! - **Statistics**: totals per status and an overdue count computed on every view
//! - **Multiple Interfaces**: one-shot CLI views, a command shell and a TUI board
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the kanban board
//! tb ui
//!
//! # List high-priority tasks
//! tb list --priority high
//!
//! # Drive a session from a script
//! tb shell --script demo.tb
//! ```
//!
//! Nothing is written to disk. Every launch starts from the built-in seed tasks,
//! or from an empty board with `--empty`.

use clap::Parser;

pub mod board;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod fields;
pub mod logging;
pub mod report;
pub mod seed;
pub mod shell;
pub mod task;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use config::load_settings;
use logging::LogTarget;

fn main() {
    let cli = Cli::parse();

    let target = match (&cli.log_file, &cli.command) {
        (Some(path), _) => LogTarget::File(path.as_path()),
        (None, Commands::Ui) => LogTarget::Discard,
        (None, _) => LogTarget::Stderr,
    };
    if let Err(e) = logging::init(cli.verbose, target) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let mut settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    if cli.empty {
        settings.seed = false;
    }
    let board = settings.build_board();

    match cli.command {
        Commands::Ui => cmd_ui(board, &settings),
        Commands::List { filter, limit, json } => cmd_list(&board, filter.into(), limit, json),
        Commands::Board { filter } => cmd_board(&board, filter.into()),
        Commands::Stats { json } => cmd_stats(&board, json),
        Commands::Team => cmd_team(&board),
        Commands::Shell { script } => cmd_shell(board, &settings, script),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}
