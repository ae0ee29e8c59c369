//! Scoring slots along the bottom edge of the board
//!
//! Slots partition `[0, board_width)` into equal, contiguous rectangles.

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::error::ConfigError;

/// A rectangular scoring zone carrying a point value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub start_x: f32,
    pub end_x: f32,
    pub start_y: f32,
    pub end_y: f32,
    pub value: i64,
}

impl Slot {
    #[inline]
    pub fn width(&self) -> f32 {
        self.end_x - self.start_x
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.start_x + self.end_x) / 2.0
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.start_x,
            self.start_y,
            self.width(),
            self.end_y - self.start_y,
        )
    }
}

/// One slot per value, left to right, in the band `[height - slot_height, height]`
pub fn build_slots(
    values: &[i64],
    board_width: f32,
    board_height: f32,
    slot_height: f32,
) -> Result<Vec<Slot>, ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::NoSlots);
    }

    let count = values.len();
    let slot_width = board_width / count as f32;
    let start_y = board_height - slot_height;

    Ok(values
        .iter()
        .enumerate()
        .map(|(i, &value)| Slot {
            start_x: i as f32 * slot_width,
            // Pin the final edge so the partition covers the board exactly
            end_x: if i + 1 == count {
                board_width
            } else {
                (i + 1) as f32 * slot_width
            },
            start_y,
            end_y: board_height,
            value,
        })
        .collect())
}

/// Index of the first slot whose rectangle overlaps `bounds`
pub fn slot_hit(slots: &[Slot], bounds: &Aabb) -> Option<usize> {
    slots.iter().position(|slot| slot.bounds().overlaps(bounds))
}
