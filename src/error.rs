//! Error types for the outer surfaces of the board.
//!
//! Board operations themselves never fail; these errors cover configuration,
//! logging setup and parsing user input in the shell.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to parse a task field from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFieldError {
    #[error("invalid status '{0}' (expected todo, in-progress or completed)")]
    Status(String),

    #[error("invalid priority '{0}' (expected low, medium or high)")]
    Priority(String),
}

/// Errors loading the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Logging could not be initialised.
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("failed to open log file '{path}': {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// A shell line that could not be turned into a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),

    #[error("'{command}' needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("invalid task id '{0}'")]
    InvalidId(String),

    #[error("unknown filter '{0}' (expected status, priority or assignee)")]
    UnknownFilter(String),

    #[error(transparent)]
    Field(#[from] ParseFieldError),
}
