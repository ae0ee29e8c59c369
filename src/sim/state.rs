//! Ball and round state
//!
//! Everything the host needs to draw a round lives here as plain data. The
//! host keys its drawables by peg/slot index; nothing here owns a drawable.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Phase of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BallPhase {
    /// No round in progress, ball does not move
    #[default]
    Idle,
    /// Ball descending through the peg field
    Falling,
    /// Ball came to rest in a slot; terminal for the round
    Settled { slot: usize },
}

impl BallPhase {
    pub fn is_moving(&self) -> bool {
        matches!(self, BallPhase::Falling)
    }
}

/// The single ball of a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl Ball {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: BALL_RADIUS,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::around(self.pos, self.radius)
    }

    /// Bounding box width (and height)
    #[inline]
    pub fn width(&self) -> f32 {
        2.0 * self.radius
    }
}

/// Running totals for a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub rounds_started: u64,
    pub rounds_settled: u64,
    pub declined_bets: u64,
    pub total_staked: i64,
    pub total_awarded: i64,
    /// Settle count per slot index for the current layout
    pub slot_hits: Vec<u64>,
}

impl SessionStats {
    pub fn with_slots(count: usize) -> Self {
        Self {
            slot_hits: vec![0; count],
            ..Default::default()
        }
    }

    /// Net result for the player (awards minus stakes)
    pub fn net(&self) -> i64 {
        self.total_awarded - self.total_staked
    }
}

/// Seed for reproducible sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_ball_bounds() {
        let ball = Ball::new(Vec2::new(100.0, 50.0));
        let b = ball.bounds();
        assert_eq!(b.x, 100.0 - BALL_RADIUS);
        assert_eq!(b.y, 50.0 - BALL_RADIUS);
        assert_eq!(b.width, ball.width());
    }

    #[test]
    fn test_phase_moving() {
        assert!(!BallPhase::Idle.is_moving());
        assert!(BallPhase::Falling.is_moving());
        assert!(!BallPhase::Settled { slot: 3 }.is_moving());
    }

    #[test]
    fn test_rng_state_reproducible() {
        let state = RngState::new(1234);
        let a: u32 = state.to_rng().random();
        let b: u32 = state.to_rng().random();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stats_net() {
        let stats = SessionStats {
            total_staked: 30,
            total_awarded: 12,
            ..SessionStats::with_slots(9)
        };
        assert_eq!(stats.net(), -18);
        assert_eq!(stats.slot_hits.len(), 9);
    }
}
