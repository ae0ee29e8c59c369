//! Configuration and settings errors

use thiserror::Error;

/// Board or session configuration rejected before any layout is produced
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid board dimensions: {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("Invalid padding: {0}")]
    InvalidPadding(&'static str),

    #[error("Grid layout needs at least 2 columns and 2 rows, got {columns}x{rows}")]
    DegenerateGrid { columns: u32, rows: u32 },

    #[error("Pyramid layout needs at least 1 row")]
    EmptyPyramid,

    #[error("Slot value list is empty")]
    NoSlots,

    #[error("Slot value {value} at index {index} is negative")]
    NegativeSlotValue { index: usize, value: i64 },

    #[error("Invalid slot height: {0}")]
    InvalidSlotHeight(f32),

    #[error("Peg {index} at ({x}, {y}) lies outside the padded board")]
    PegOutOfBounds { index: usize, x: f32, y: f32 },

    #[error("Invalid stake: {0}")]
    InvalidStake(i64),

    #[error("Invalid starting balance: {0}")]
    InvalidBalance(i64),
}

/// Errors loading [`crate::GameSettings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
