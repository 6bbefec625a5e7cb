use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::snake::INITIAL_BODY;

/// Largest accepted grid side. Keeps cell counts and coordinates well inside
/// `i32` and the drawn field within what a terminal can show.
pub const MAX_GRID_SIZE: usize = 200;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of cells along each side of the square grid
    pub grid_size: usize,
    /// Milliseconds between simulation ticks
    pub tick_interval_ms: u64,
    /// Score at which the second snake joins
    pub second_snake_threshold: u32,
    /// Seed for food placement; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Ring the terminal bell on eat and collision events
    pub bell: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 25,
            tick_interval_ms: 200,
            second_snake_threshold: 5,
            seed: None,
            bell: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Check that the starting snake fits on the grid and the clock can run
    pub fn validate(&self) -> Result<()> {
        let needed = INITIAL_BODY
            .iter()
            .map(|&(x, y)| x.max(y) as usize + 1)
            .max()
            .unwrap_or(1);
        ensure!(
            self.grid_size >= needed,
            "grid size {} is too small, the starting snake needs at least {}",
            self.grid_size,
            needed
        );
        ensure!(
            self.grid_size <= MAX_GRID_SIZE,
            "grid size {} is too large, the limit is {}",
            self.grid_size,
            MAX_GRID_SIZE
        );
        ensure!(self.tick_interval_ms > 0, "tick interval must be positive");
        ensure!(
            self.second_snake_threshold > 0,
            "second snake threshold must be at least 1"
        );
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 25);
        assert_eq!(config.tick_interval_ms, 200);
        assert_eq!(config.second_snake_threshold, 5);
        assert_eq!(config.tick_interval(), Duration::from_millis(200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.second_snake_threshold, 5);
    }

    #[test]
    fn test_validate_rejects_small_grid() {
        assert!(GameConfig::new(10).validate().is_ok());
        assert!(GameConfig::new(9).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_huge_grid() {
        assert!(GameConfig::new(MAX_GRID_SIZE).validate().is_ok());
        assert!(GameConfig::new(MAX_GRID_SIZE + 1).validate().is_err());
        assert!(GameConfig::new(3_000_000_000).validate().is_err());
    }

    #[test]
    fn test_largest_grid_starts() {
        let config = GameConfig {
            seed: Some(1),
            ..GameConfig::new(MAX_GRID_SIZE)
        };
        config.validate().unwrap();

        let game = crate::game::Game::new(config);
        assert!(game.grid().contains(game.food().position()));
    }

    #[test]
    fn test_validate_rejects_zero_threshold() {
        let config = GameConfig {
            second_snake_threshold: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            second_snake_threshold: 1,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_tick() {
        let config = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_size": 30, "seed": 7 }}"#).unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.grid_size, 30);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.tick_interval_ms, 200);
        assert!(!config.bell);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = GameConfig::from_json_file(dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "grid_size = 30").unwrap();
        assert!(GameConfig::from_json_file(file.path()).is_err());
    }
}
