use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Validate;
use crate::games::memory::{
    GameMode, IconTheme, MemoryGameConfig, DEFAULT_ADVANCE_DELAY_MS, DEFAULT_FLIP_DELAY_MS,
    MAX_GRID_SIZE, MIN_GRID_SIZE,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ArcadeConfig {
    pub memory: MemoryConfig,
    pub storage: StorageConfig,
    pub seed: Option<u64>,
}

impl Validate for ArcadeConfig {
    fn validate(&self) -> Result<(), String> {
        self.memory.validate()?;
        self.storage.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    pub size: usize,
    pub theme: IconTheme,
    pub mode: GameMode,
    pub flip_delay_ms: u64,
    pub time_limit_secs: Option<u32>,
    pub move_limit: Option<u32>,
    pub advance_delay_ms: u64,
}

impl MemoryConfig {
    pub fn to_game_config(&self) -> MemoryGameConfig {
        MemoryGameConfig {
            size: self.size,
            icons: self.theme.icons().iter().map(|icon| icon.to_string()).collect(),
            mode: self.mode,
            flip_delay: Duration::from_millis(self.flip_delay_ms),
            advance_delay: Duration::from_millis(self.advance_delay_ms),
            time_limit: self.time_limit_secs,
            move_limit: self.move_limit,
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: MIN_GRID_SIZE,
            theme: IconTheme::Animals,
            mode: GameMode::Classic,
            flip_delay_ms: DEFAULT_FLIP_DELAY_MS,
            time_limit_secs: None,
            move_limit: None,
            advance_delay_ms: DEFAULT_ADVANCE_DELAY_MS,
        }
    }
}

impl Validate for MemoryConfig {
    fn validate(&self) -> Result<(), String> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.size) {
            return Err(format!(
                "Memory grid size must be between {} and {}, got {}",
                MIN_GRID_SIZE, MAX_GRID_SIZE, self.size
            ));
        }
        if self.flip_delay_ms == 0 {
            return Err("Flip delay must be positive".to_string());
        }
        if self.time_limit_secs == Some(0) {
            return Err("Time limit must be positive".to_string());
        }
        if self.move_limit == Some(0) {
            return Err("Move limit must be positive".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub directory: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("scores"),
        }
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.directory.as_os_str().is_empty() {
            return Err("Storage directory must not be empty".to_string());
        }
        Ok(())
    }
}
