//! Game configuration: board size, layout, odds and progression.

use crate::error::ConfigError;
use crate::selection::SelectionRule;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_WIDTH: usize = 5;
pub const DEFAULT_HEIGHT: usize = 6;
pub const DEFAULT_CELL_SIZE: f32 = 60.0;
pub const DEFAULT_CELL_MARGIN: f32 = 5.0;
/// Chance of a special block after each drag.
pub const DEFAULT_SPECIAL_CHANCE: f64 = 0.05;
/// Score per level: leaving level N needs more than N x this.
pub const DEFAULT_LEVEL_STEP: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Logical pixel size of one cell.
    pub cell_size: f32,
    /// Logical pixel gap between cells.
    pub cell_margin: f32,
    pub special_chance: f64,
    pub level_step: u64,
    pub selection: SelectionRule,
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            cell_margin: DEFAULT_CELL_MARGIN,
            special_chance: DEFAULT_SPECIAL_CHANCE,
            level_step: DEFAULT_LEVEL_STEP,
            selection: SelectionRule::Free,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load from a JSON file; missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&s)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.special_chance) {
            return Err(ConfigError::InvalidChance(self.special_chance));
        }
        if self.level_step == 0 {
            return Err(ConfigError::ZeroLevelStep);
        }
        let pitch = self.pitch();
        if !pitch.is_finite() || pitch <= 0.0 || self.cell_size < 0.0 || self.cell_margin < 0.0 {
            return Err(ConfigError::InvalidLayout {
                size: self.cell_size,
                margin: self.cell_margin,
            });
        }
        Ok(())
    }

    /// Distance between the origins of neighbouring cells.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.cell_size + self.cell_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = GameConfig::default();
        assert_eq!((c.width, c.height), (5, 6));
        assert_eq!(c.pitch(), 65.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let zero = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            zero.validate(),
            Err(ConfigError::ZeroDimension { width: 0, height: 6 })
        );
        let chance = GameConfig {
            special_chance: 1.5,
            ..GameConfig::default()
        };
        assert_eq!(chance.validate(), Err(ConfigError::InvalidChance(1.5)));
        let nan = GameConfig {
            special_chance: f64::NAN,
            ..GameConfig::default()
        };
        assert!(nan.validate().is_err());
        let step = GameConfig {
            level_step: 0,
            ..GameConfig::default()
        };
        assert_eq!(step.validate(), Err(ConfigError::ZeroLevelStep));
        let layout = GameConfig {
            cell_size: 0.0,
            cell_margin: 0.0,
            ..GameConfig::default()
        };
        assert!(matches!(layout.validate(), Err(ConfigError::InvalidLayout { .. })));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: GameConfig = serde_json::from_str(r#"{"width": 7, "selection": "orthogonal"}"#).unwrap();
        assert_eq!(c.width, 7);
        assert_eq!(c.height, DEFAULT_HEIGHT);
        assert_eq!(c.selection, SelectionRule::Orthogonal);
        assert!(serde_json::from_str::<GameConfig>(r#"{"colour": 1}"#).is_err());
    }
}
