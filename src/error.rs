//! Error types for the grid, configuration and input scripts.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("grid rows must be non-empty and of equal length (row {row} has {len}, expected {expected})")]
    Shape { row: usize, len: usize, expected: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: usize, height: usize },
    #[error("special chance must be within 0.0..=1.0 (got {0})")]
    InvalidChance(f64),
    #[error("level step must be greater than zero")]
    ZeroLevelStep,
    #[error("cell size plus margin must be a positive finite number (got {size} + {margin})")]
    InvalidLayout { size: f32, margin: f32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: `{command}` needs X and Y coordinates")]
    MissingCoordinate { line: usize, command: String },
    #[error("line {line}: invalid number `{value}`")]
    BadNumber { line: usize, value: String },
}
