//! Plinko Drop - simulation core for a peg-board drop game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (layout, collisions, stepping, session)
//! - `settings`: Game configuration loaded from JSON
//! - `error`: Configuration and settings errors
//!
//! Rendering and input live in the host. The host calls [`sim::GameSession::step`]
//! once per frame and draws whatever state the session exposes.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SettingsError};
pub use settings::GameSettings;

/// Game configuration constants
pub mod consts {
    /// Default board dimensions
    pub const BOARD_WIDTH: f32 = 800.0;
    pub const BOARD_HEIGHT: f32 = 400.0;
    /// Pyramid boards need more height to fit ten rows inside the padding
    pub const PYRAMID_BOARD_HEIGHT: f32 = 700.0;

    /// Padding between the board edge and the peg field
    pub const LEFT_PAD: f32 = 40.0;
    pub const RIGHT_PAD: f32 = 40.0;
    pub const TOP_PAD: f32 = 80.0;
    pub const BOTTOM_PAD: f32 = 80.0;

    /// Default grid layout
    pub const GRID_COLUMNS: u32 = 18;
    pub const GRID_ROWS: u32 = 12;
    /// Default pyramid layout
    pub const PYRAMID_ROWS: u32 = 10;

    /// Peg collision radius
    pub const PEG_RADIUS: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Distance from the top edge where a new ball is dropped
    pub const BALL_DROP_Y: f32 = 20.0;
    /// Vertical distance covered per tick
    pub const TICK_STEP: f32 = 1.0;

    /// Scoring slots along the bottom edge
    pub const SLOT_HEIGHT: f32 = 40.0;
    /// Wall thickness of a slot; a settled ball rests on top of the floor
    pub const SLOT_WALL_THICKNESS: f32 = 5.0;
    pub const SLOT_VALUES: [i64; 9] = [10, 5, 2, 1, 0, 1, 2, 5, 10];

    /// Session defaults
    pub const STARTING_BALANCE: i64 = 100;
    pub const DEFAULT_STAKE: i64 = 10;
}
