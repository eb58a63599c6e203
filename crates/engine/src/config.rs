use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::core::EngineError;
use crate::types::{
    GridSize, MAX_RECOMMENDED_COLORS, MAX_RECOMMENDED_SIDE, MIN_COLORS, MIN_GRID_SIDE,
};

/// Session parameters for a [`crate::MatchEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub width: u16,
    pub height: u16,
    pub num_colors: u8,
    /// `None` seeds from the system clock
    pub seed: Option<u32>,
}

impl EngineConfig {
    pub fn new(width: u16, height: u16, num_colors: u8) -> Self {
        Self {
            width,
            height,
            num_colors,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Hard limits the engine refuses to start without
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width < MIN_GRID_SIDE || self.height < MIN_GRID_SIDE {
            return Err(EngineError::InvalidConfiguration(format!(
                "grid must be at least {MIN_GRID_SIDE}x{MIN_GRID_SIDE}, got {}x{}",
                self.width, self.height
            )));
        }
        if self.num_colors < MIN_COLORS {
            return Err(EngineError::InvalidConfiguration(format!(
                "at least {MIN_COLORS} colors are required, got {}",
                self.num_colors
            )));
        }
        Ok(())
    }

    /// Soft limits from the settings screen; callers decide whether to enforce them
    pub fn within_recommended(&self) -> bool {
        self.width <= MAX_RECOMMENDED_SIDE
            && self.height <= MAX_RECOMMENDED_SIDE
            && self.num_colors <= MAX_RECOMMENDED_COLORS
    }

    /// The configured seed, or one derived from the clock
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(8, 8, 5)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
