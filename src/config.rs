use std::{env, fs, path::PathBuf, time::Duration};

use anyhow::{ensure, Context};
use serde::Deserialize;

use crate::spawner::SpawnIntervals;

// Runtime settings only. Gameplay tuning stays in the `entities` and
// `compute` constants.

pub const CONFIG_ENV: &str = "CASTLE_DEFENSE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "castle_defense.toml";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Target frame period (≈60 FPS by default).
    pub frame_ms: u64,
    pub enemy_spawn_ms: u64,
    pub power_up_spawn_ms: u64,
    /// Logical units covered by one terminal cell.
    pub cell_width: f32,
    pub cell_height: f32,
    pub castle_image: PathBuf,
    pub knight_image: PathBuf,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            enemy_spawn_ms: 3000,
            power_up_spawn_ms: 10_000,
            cell_width: 10.0,
            cell_height: 20.0,
            castle_image: PathBuf::from("castle.jpg"),
            knight_image: PathBuf::from("knight.png"),
            log_file: PathBuf::from("castle_defense.log"),
        }
    }
}

impl Settings {
    /// Read the file named by `CASTLE_DEFENSE_CONFIG` (or the default path).
    /// A missing file means defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.frame_ms > 0, "frame_ms must be positive");
        ensure!(
            self.enemy_spawn_ms > 0 && self.power_up_spawn_ms > 0,
            "spawn intervals must be positive"
        );
        ensure!(
            self.cell_width > 0.0 && self.cell_height > 0.0,
            "cell sizes must be positive"
        );
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    pub fn spawn_intervals(&self) -> SpawnIntervals {
        SpawnIntervals {
            enemy: Duration::from_millis(self.enemy_spawn_ms),
            power_up: Duration::from_millis(self.power_up_spawn_ms),
        }
    }
}
