//! Configuration loading and typed config structures for the game engine.
//!
//! The canonical configuration lives in a small YAML document. This
//! module defines strongly-typed structs that mirror it, with defaults
//! matching the reference setup (5x5 board, 3 pits, 1 wumpus, 1 gold),
//! and a loader that reads, parses, and validates the file.

use std::path::Path;

use serde::Deserialize;
use wumpus_world::{WorldError, WorldLayout};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configured board cannot be realized.
    #[error("invalid board configuration: {source}")]
    Board {
        /// The layout validation failure.
        source: WorldError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Board geometry, entity counts, and the world seed.
    #[serde(default)]
    pub board: BoardConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Board`] if the board cannot be realized.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Board`] if the board cannot be realized.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config
            .board
            .layout()
            .validate()
            .map_err(|source| ConfigError::Board { source })?;
        Ok(config)
    }
}

/// Board geometry, entity counts, and the world seed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardConfig {
    /// Side length of the square grid.
    #[serde(default = "default_size")]
    pub size: usize,

    /// Number of pits.
    #[serde(default = "default_pits")]
    pub pits: usize,

    /// Number of wumpuses.
    #[serde(default = "default_wumpuses")]
    pub wumpuses: usize,

    /// Number of gold cells.
    #[serde(default = "default_golds")]
    pub golds: usize,

    /// Seed for the world RNG; a fixed seed reproduces layouts exactly.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            pits: default_pits(),
            wumpuses: default_wumpuses(),
            golds: default_golds(),
            seed: default_seed(),
        }
    }
}

impl BoardConfig {
    /// The world layout described by this configuration.
    pub const fn layout(&self) -> WorldLayout {
        WorldLayout {
            size: self.size,
            pit_count: self.pits,
            wumpus_count: self.wumpuses,
            gold_count: self.golds,
        }
    }
}

const fn default_size() -> usize {
    5
}

const fn default_pits() -> usize {
    3
}

const fn default_wumpuses() -> usize {
    1
}

const fn default_golds() -> usize {
    1
}

const fn default_seed() -> u64 {
    42
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_setup() {
        let config = GameConfig::default();
        assert_eq!(config.board.size, 5);
        assert_eq!(config.board.pits, 3);
        assert_eq!(config.board.wumpuses, 1);
        assert_eq!(config.board.golds, 1);
        assert_eq!(config.board.seed, 42);
    }

    #[test]
    fn partial_documents_fill_in_defaults() {
        let config = GameConfig::parse("board:\n  size: 4\n").unwrap();
        assert_eq!(config.board.size, 4);
        assert_eq!(config.board.pits, 3);
        assert_eq!(config.board.seed, 42);
    }

    #[test]
    fn full_documents_parse() {
        let yaml = "board:\n  size: 6\n  pits: 5\n  wumpuses: 2\n  golds: 1\n  seed: 1234\n";
        let config = GameConfig::parse(yaml).unwrap();
        assert_eq!(config.board.size, 6);
        assert_eq!(config.board.pits, 5);
        assert_eq!(config.board.wumpuses, 2);
        assert_eq!(config.board.seed, 1234);
    }

    #[test]
    fn infeasible_boards_are_rejected() {
        let result = GameConfig::parse("board:\n  size: 2\n  pits: 9\n");
        assert!(matches!(result, Err(ConfigError::Board { .. })));
    }

    #[test]
    fn oversized_boards_are_rejected() {
        let result = GameConfig::parse("board:\n  size: 30\n");
        assert!(matches!(result, Err(ConfigError::Board { .. })));
    }

    #[test]
    fn malformed_yaml_is_rejected() {
        let result = GameConfig::parse("board: [not a map");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }
}
