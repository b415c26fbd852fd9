//! Optional settings file.
//!
//! Settings are read from a TOML file passed with `--config`. Every key is
//! optional; a missing file argument means built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::board::Board;
use crate::error::ConfigError;
use crate::fields::Priority;
use crate::seed::{default_roster, seed_tasks};
use crate::task::TeamMember;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Start from the built-in seed tasks.
    pub seed: bool,
    /// Priority new drafts start with.
    pub default_priority: Priority,
    /// Team roster; the built-in roster when absent.
    pub team: Vec<TeamMember>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: true,
            default_priority: Priority::default(),
            team: default_roster(),
        }
    }
}

impl Settings {
    /// Build the starting board these settings describe.
    pub fn build_board(&self) -> Board {
        if self.seed {
            Board::new(seed_tasks(), self.team.clone())
        } else {
            Board::empty(self.team.clone())
        }
    }
}

/// Load settings from `path`, or defaults when no path is given.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = parse_settings(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if settings.team.is_empty() {
        warn!(path = %path.display(), "config defines an empty team roster");
    }
    info!(path = %path.display(), seed = settings.seed, "loaded settings");
    Ok(settings)
}

/// Parse settings from TOML text.
pub fn parse_settings(content: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(parse_settings("").unwrap(), Settings::default());
    }

    #[test]
    fn test_parse_full_settings() {
        let settings = parse_settings(
            r#"
seed = false
default_priority = "high"

[[team]]
id = 7
name = "Ada Lovelace"
avatar = "AL"
role = "Engineer"
"#,
        )
        .unwrap();
        assert!(!settings.seed);
        assert_eq!(settings.default_priority, Priority::High);
        assert_eq!(settings.team, vec![TeamMember::new(7, "Ada Lovelace", "AL", "Engineer")]);

        let board = settings.build_board();
        assert!(board.is_empty());
        assert_eq!(board.roster().len(), 1);
    }

    #[test]
    fn test_invalid_priority_is_rejected() {
        assert!(parse_settings("default_priority = \"urgent\"").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_settings(Some(Path::new("/nonexistent/taskboard.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(load_settings(None).is_ok());
    }

    #[test]
    fn test_seeded_board_by_default() {
        assert_eq!(Settings::default().build_board().len(), 4);
    }
}
