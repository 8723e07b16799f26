// config.rs - Session and display settings loaded from TOML

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{LifeError, Result};

pub const DEFAULT_ROWS: usize = 50;
pub const DEFAULT_COLS: usize = 50;
pub const DEFAULT_INTERVAL_MS: u64 = 100;
/// Death probability for the randomize command: ~20% of cells come up alive.
pub const DEFAULT_SEED_DENSITY: f64 = 0.8;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    /// Probability that a cell starts dead when the grid is randomized.
    pub seed_density: f64,
    pub interval_ms: u64,
    /// Start in `Running` instead of `Idle`.
    pub autostart: bool,
    /// Randomize the grid at construction; otherwise start empty.
    pub seed_on_start: bool,
    /// Fixed RNG seed for reproducible boards.
    pub rng_seed: Option<u64>,
    /// Also stop when the board repeats a recent generation.
    pub stop_on_cycle: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            seed_density: DEFAULT_SEED_DENSITY,
            interval_ms: DEFAULT_INTERVAL_MS,
            autostart: false,
            seed_on_start: true,
            rng_seed: None,
            stop_on_cycle: false,
        }
    }
}

impl SessionConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(LifeError::validation(format!(
                "grid must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        if !(0.0..=1.0).contains(&self.seed_density) {
            return Err(LifeError::validation(format!(
                "seed_density must be within [0, 1], got {}",
                self.seed_density
            )));
        }
        if self.interval_ms == 0 {
            return Err(LifeError::validation("interval_ms must be positive"));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub cell_size: f32,
    pub spacing: f32,
    pub grid_lines: bool,
    pub live_color: [u8; 3],
    pub dead_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_size: 15.0,
            spacing: 0.5,
            grid_lines: true,
            live_color: [0, 200, 0],
            dead_color: [40, 40, 40],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Read a TOML config. A missing file yields the defaults; a file that
    /// exists but fails to parse or validate is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(LifeError::from(err).with_context(format!("reading {}", path.display())));
            }
        };
        Self::from_toml(&content).map_err(|err| err.with_context(format!("loading {}", path.display())))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.session.validate()?;
        if self.display.cell_size <= 0.0 || self.display.spacing < 0.0 {
            return Err(LifeError::validation("cell_size must be positive and spacing non-negative"));
        }
        Ok(())
    }
}
