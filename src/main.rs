use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use twin_snake::game::GameConfig;
use twin_snake::logging::init_file_logging;
use twin_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "twin_snake")]
#[command(version, about = "Snake game with a second player unlocked by score")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells along each side of the grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Milliseconds between simulation ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Score at which the second snake joins
    #[arg(long)]
    threshold: Option<u32>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Ring the terminal bell on eat and crash
    #[arg(long)]
    bell: bool,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(threshold) = self.threshold {
            config.second_snake_threshold = threshold;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.bell |= self.bell;

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let config = cli.game_config()?;

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["twin_snake"]);
        assert_eq!(cli.game_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_flags_override() {
        let cli = Cli::parse_from([
            "twin_snake",
            "--grid-size",
            "30",
            "--tick-ms",
            "100",
            "--threshold",
            "3",
            "--seed",
            "9",
            "--bell",
        ]);
        let config = cli.game_config().unwrap();
        assert_eq!(config.grid_size, 30);
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.second_snake_threshold, 3);
        assert_eq!(config.seed, Some(9));
        assert!(config.bell);
    }

    #[test]
    fn test_invalid_grid_rejected() {
        let cli = Cli::parse_from(["twin_snake", "--grid-size", "5"]);
        assert!(cli.game_config().is_err());
    }
}
