//! Board configuration and peg layout generation
//!
//! Two layout kinds are supported:
//! - Grid: `rows x columns` pegs, even rows shifted half a column right
//! - Pyramid: triangular, row `i` holds `i + 1` pegs centered on the board
//!
//! Pegs are produced in row-major order. Order carries no meaning beyond
//! reproducibility.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::slots::{Slot, build_slots};
use crate::consts::*;
use crate::error::ConfigError;

/// Tolerance for float rounding when checking peg containment
const BOUNDS_EPSILON: f32 = 1e-3;

/// Board layout kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutKind {
    #[default]
    Grid,
    Pyramid,
}

impl LayoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Grid => "Grid",
            LayoutKind::Pyramid => "Pyramid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "grid" => Some(LayoutKind::Grid),
            "pyramid" | "triangle" => Some(LayoutKind::Pyramid),
            _ => None,
        }
    }
}

/// Index of a peg within its layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PegId(pub usize);

/// A fixed circular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peg {
    pub x: f32,
    pub y: f32,
}

impl Peg {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Circumscribed square of the peg, used for collision
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::around(self.pos(), PEG_RADIUS)
    }
}

/// Board geometry and peg field description
///
/// Immutable for the lifetime of a board; changing it regenerates the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: f32,
    pub height: f32,
    pub left_pad: f32,
    pub right_pad: f32,
    pub top_pad: f32,
    pub bottom_pad: f32,
    /// Grid only
    pub columns: u32,
    /// Grid rows, or pyramid rows
    pub rows: u32,
    pub kind: LayoutKind,
    /// Point values of the scoring slots, left to right
    pub slot_values: Vec<i64>,
    pub slot_height: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::grid()
    }
}

impl BoardConfig {
    /// Standard grid board
    pub fn grid() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            left_pad: LEFT_PAD,
            right_pad: RIGHT_PAD,
            top_pad: TOP_PAD,
            bottom_pad: BOTTOM_PAD,
            columns: GRID_COLUMNS,
            rows: GRID_ROWS,
            kind: LayoutKind::Grid,
            slot_values: SLOT_VALUES.to_vec(),
            slot_height: SLOT_HEIGHT,
        }
    }

    /// Standard pyramid board
    pub fn pyramid() -> Self {
        Self {
            height: PYRAMID_BOARD_HEIGHT,
            rows: PYRAMID_ROWS,
            kind: LayoutKind::Pyramid,
            ..Self::grid()
        }
    }

    pub fn preset(kind: LayoutKind) -> Self {
        match kind {
            LayoutKind::Grid => Self::grid(),
            LayoutKind::Pyramid => Self::pyramid(),
        }
    }

    /// Padded interior: `(start_x, end_x, start_y, end_y)`
    pub fn interior(&self) -> (f32, f32, f32, f32) {
        (
            self.left_pad,
            self.width - self.right_pad,
            self.top_pad,
            self.height - self.bottom_pad,
        )
    }

    /// Reject degenerate configurations before any layout math runs
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims_ok = self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0;
        if !dims_ok {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let pads = [self.left_pad, self.right_pad, self.top_pad, self.bottom_pad];
        if pads.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(ConfigError::InvalidPadding("padding must be finite and non-negative"));
        }
        let (start_x, end_x, start_y, end_y) = self.interior();
        if end_x <= start_x || end_y <= start_y {
            return Err(ConfigError::InvalidPadding("padding leaves no interior"));
        }

        match self.kind {
            LayoutKind::Grid if self.columns < 2 || self.rows < 2 => {
                return Err(ConfigError::DegenerateGrid {
                    columns: self.columns,
                    rows: self.rows,
                });
            }
            LayoutKind::Pyramid if self.rows < 1 => return Err(ConfigError::EmptyPyramid),
            _ => {}
        }

        if self.slot_values.is_empty() {
            return Err(ConfigError::NoSlots);
        }
        if let Some((index, &value)) = self.slot_values.iter().enumerate().find(|(_, v)| **v < 0) {
            return Err(ConfigError::NegativeSlotValue { index, value });
        }
        // The floor backstop stops the ball a radius above the bottom edge, so
        // the slot band must reach above that by at least one tick.
        let min_slot_height = BALL_RADIUS + TICK_STEP;
        if !(self.slot_height > min_slot_height && self.slot_height <= self.height) {
            return Err(ConfigError::InvalidSlotHeight(self.slot_height));
        }

        Ok(())
    }
}

/// Generated pegs and slots for one board
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Layout {
    pub pegs: Vec<Peg>,
    pub slots: Vec<Slot>,
}

/// Validate `config` and produce its pegs and slots
pub fn generate_layout(config: &BoardConfig) -> Result<Layout, ConfigError> {
    config.validate()?;

    let (start_x, end_x, start_y, end_y) = config.interior();
    let pegs = match config.kind {
        LayoutKind::Grid => {
            // Even rows sit half a spacing right of the odd rows, so the
            // unshifted columns stop half a spacing short of the padding.
            let spacing = (end_x - start_x) / (config.columns as f32 - 0.5);
            let unshifted_end = start_x + spacing * (config.columns - 1) as f32;
            grid_pegs(start_x, unshifted_end, start_y, end_y, config.columns, config.rows)?
        }
        LayoutKind::Pyramid => pyramid_pegs(config.width, start_y, config.rows, PEG_RADIUS)?,
    };
    check_containment(&pegs, config)?;

    let slots = build_slots(&config.slot_values, config.width, config.height, config.slot_height)?;

    log::info!(
        "{} layout: {} pegs, {} slots on {}x{} board",
        config.kind.as_str(),
        pegs.len(),
        slots.len(),
        config.width,
        config.height
    );

    Ok(Layout { pegs, slots })
}

/// Staggered grid of `num_rows * num_cols` pegs
///
/// `end_x` is the x of the last column in an unshifted (odd) row.
pub fn grid_pegs(
    start_x: f32,
    end_x: f32,
    start_y: f32,
    end_y: f32,
    num_cols: u32,
    num_rows: u32,
) -> Result<Vec<Peg>, ConfigError> {
    if num_cols < 2 || num_rows < 2 {
        return Err(ConfigError::DegenerateGrid {
            columns: num_cols,
            rows: num_rows,
        });
    }

    let x_spacing = (end_x - start_x) / (num_cols - 1) as f32;
    let y_spacing = (end_y - start_y) / (num_rows - 1) as f32;

    let mut pegs = Vec::with_capacity((num_rows * num_cols) as usize);
    for row in 0..num_rows {
        let shift = if row % 2 == 0 { 0.5 } else { 0.0 };
        let y = start_y + y_spacing * row as f32;
        for col in 0..num_cols {
            let x = start_x + x_spacing * (col as f32 + shift);
            pegs.push(Peg::new(x, y));
        }
    }
    Ok(pegs)
}

/// Centered triangle: row `i` holds `i + 1` pegs
pub fn pyramid_pegs(
    board_width: f32,
    start_y: f32,
    rows: u32,
    peg_radius: f32,
) -> Result<Vec<Peg>, ConfigError> {
    if rows < 1 {
        return Err(ConfigError::EmptyPyramid);
    }

    let spacing = board_width / (rows * 2 + 1) as f32;
    let step = 2.0 * peg_radius + spacing;

    let mut pegs = Vec::with_capacity((rows * (rows + 1) / 2) as usize);
    for row in 0..rows {
        let row_start_x = (board_width - row as f32 * step) / 2.0;
        let y = start_y + row as f32 * step;
        for j in 0..=row {
            pegs.push(Peg::new(row_start_x + j as f32 * step, y));
        }
    }
    Ok(pegs)
}

fn check_containment(pegs: &[Peg], config: &BoardConfig) -> Result<(), ConfigError> {
    let (start_x, end_x, start_y, end_y) = config.interior();
    let inside = |v: f32, lo: f32, hi: f32| v >= lo - BOUNDS_EPSILON && v <= hi + BOUNDS_EPSILON;

    match pegs
        .iter()
        .enumerate()
        .find(|(_, p)| !inside(p.x, start_x, end_x) || !inside(p.y, start_y, end_y))
    {
        Some((index, peg)) => Err(ConfigError::PegOutOfBounds {
            index,
            x: peg.x,
            y: peg.y,
        }),
        None => Ok(()),
    }
}
