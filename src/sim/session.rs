//! Game session: board, balance and round lifecycle
//!
//! A session is the sole owner of all mutable simulation state. It is not
//! meant to be shared; hosts that need concurrent access serialize calls.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::layout::{BoardConfig, Layout, LayoutKind, Peg, PegId, generate_layout};
use super::outcome::{Weighting, select_target};
use super::physics::{DeflectionPhysics, PhysicsBackend};
use super::slots::Slot;
use super::state::{Ball, BallPhase, RngState, SessionStats};
use super::tick::{RoundStep, tick};
use crate::consts::BALL_DROP_Y;
use crate::error::ConfigError;
use crate::settings::GameSettings;

/// Result of [`GameSession::start_round`]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStart {
    /// Stake deducted, ball dropped
    Started,
    /// Bet declined; the session is unchanged
    InsufficientBalance { balance: i64, stake: i64 },
    /// A ball is still falling; the session is unchanged
    RoundInProgress,
}

/// A single player's game
pub struct GameSession<R: Rng = Pcg32, P: PhysicsBackend = DeflectionPhysics> {
    pub(crate) config: BoardConfig,
    pub(crate) layout: Layout,
    pub(crate) ball: Ball,
    pub(crate) phase: BallPhase,
    pub(crate) balance: i64,
    pub(crate) stake: i64,
    pub(crate) target_slot: Option<usize>,
    pub(crate) last_peg_hit: Option<PegId>,
    pub(crate) bias_enabled: bool,
    pub(crate) weighting: Weighting,
    pub(crate) stats: SessionStats,
    pub(crate) rng: R,
    pub(crate) physics: P,
}

impl GameSession {
    /// Session with the reference physics and a PCG generator seeded from
    /// `settings.seed` (or from entropy when unset)
    pub fn new(settings: &GameSettings) -> Result<Self, ConfigError> {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Session seed: {}", seed);
        Self::with_parts(settings, RngState::new(seed).to_rng(), DeflectionPhysics::default())
    }
}

impl<R: Rng, P: PhysicsBackend> GameSession<R, P> {
    /// Session with an injected random source and physics backend
    pub fn with_parts(settings: &GameSettings, rng: R, physics: P) -> Result<Self, ConfigError> {
        settings.validate()?;
        let layout = generate_layout(&settings.board)?;

        let mut session = Self {
            ball: Ball::new(Vec2::new(settings.board.width / 2.0, BALL_DROP_Y)),
            stats: SessionStats::with_slots(layout.slots.len()),
            config: settings.board.clone(),
            layout,
            phase: BallPhase::Idle,
            balance: settings.starting_balance,
            stake: settings.stake,
            target_slot: None,
            last_peg_hit: None,
            bias_enabled: settings.bias_enabled,
            weighting: settings.weighting,
            rng,
            physics,
        };
        if session.bias_enabled {
            session.refresh_target();
        }
        session.physics.reset(&session.ball, &session.layout.pegs);
        Ok(session)
    }

    /// Deduct the stake and drop a fresh ball
    pub fn start_round(&mut self) -> RoundStart {
        if self.phase.is_moving() {
            return RoundStart::RoundInProgress;
        }
        if self.balance < self.stake {
            self.stats.declined_bets += 1;
            log::warn!(
                "Bet declined: balance {} below stake {}",
                self.balance,
                self.stake
            );
            return RoundStart::InsufficientBalance {
                balance: self.balance,
                stake: self.stake,
            };
        }

        self.balance -= self.stake;
        self.stats.rounds_started += 1;
        self.stats.total_staked += self.stake;

        if self.bias_enabled {
            self.refresh_target();
        }

        self.ball = Ball::new(self.drop_position());
        self.last_peg_hit = None;
        self.phase = BallPhase::Falling;
        self.physics.reset(&self.ball, &self.layout.pegs);

        log::debug!(
            "Round started: stake {}, balance {}, ball at x={}",
            self.stake,
            self.balance,
            self.ball.pos.x
        );
        RoundStart::Started
    }

    /// Advance the current round by one tick
    pub fn step(&mut self) -> RoundStep {
        tick(self)
    }

    /// Flip bias mode; enabling it picks a target for the next round
    pub fn toggle_bias(&mut self) {
        self.set_bias(!self.bias_enabled);
    }

    pub fn set_bias(&mut self, enabled: bool) {
        self.bias_enabled = enabled;
        if enabled {
            self.refresh_target();
        } else {
            self.target_slot = None;
        }
        log::info!("Bias mode {}", if enabled { "on" } else { "off" });
    }

    pub fn set_stake(&mut self, stake: i64) -> Result<(), ConfigError> {
        if stake < 0 {
            return Err(ConfigError::InvalidStake(stake));
        }
        self.stake = stake;
        Ok(())
    }

    /// Switch to the preset board for `kind`, keeping the current slot values
    pub fn set_layout_kind(&mut self, kind: LayoutKind) -> Result<(), ConfigError> {
        let config = BoardConfig {
            slot_values: self.config.slot_values.clone(),
            slot_height: self.config.slot_height,
            ..BoardConfig::preset(kind)
        };
        self.set_board(config)
    }

    /// Replace the board and regenerate its layout
    ///
    /// Any round in progress is abandoned and the session returns to idle.
    /// On error the session is left untouched.
    pub fn set_board(&mut self, config: BoardConfig) -> Result<(), ConfigError> {
        let layout = generate_layout(&config)?;

        self.stats.slot_hits = vec![0; layout.slots.len()];
        self.ball = Ball::new(Vec2::new(config.width / 2.0, BALL_DROP_Y));
        self.config = config;
        self.layout = layout;
        self.phase = BallPhase::Idle;
        self.last_peg_hit = None;
        self.target_slot = None;
        if self.bias_enabled {
            self.refresh_target();
        }
        self.physics.reset(&self.ball, &self.layout.pegs);
        Ok(())
    }

    fn refresh_target(&mut self) {
        self.target_slot = select_target(&self.config.slot_values, self.weighting, &mut self.rng);
        log::debug!("Target slot: {:?}", self.target_slot);
    }

    /// Random x inside the padding for grids, board center for pyramids
    fn drop_position(&mut self) -> Vec2 {
        let x = match self.config.kind {
            LayoutKind::Grid => {
                let (start_x, end_x, _, _) = self.config.interior();
                self.rng.random_range(start_x..=end_x)
            }
            LayoutKind::Pyramid => self.config.width / 2.0,
        };
        Vec2::new(x, BALL_DROP_Y)
    }

    /// Center of the target slot while bias mode is steering
    pub(crate) fn steering_target(&self) -> Option<f32> {
        if !self.bias_enabled {
            return None;
        }
        self.target_slot
            .and_then(|i| self.layout.slots.get(i))
            .map(Slot::center_x)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn pegs(&self) -> &[Peg] {
        &self.layout.pegs
    }

    pub fn slots(&self) -> &[Slot] {
        &self.layout.slots
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn phase(&self) -> BallPhase {
        self.phase
    }

    pub fn is_ball_moving(&self) -> bool {
        self.phase.is_moving()
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn stake(&self) -> i64 {
        self.stake
    }

    pub fn target_slot(&self) -> Option<usize> {
        self.target_slot
    }

    pub fn last_peg_hit(&self) -> Option<PegId> {
        self.last_peg_hit
    }

    pub fn bias_enabled(&self) -> bool {
        self.bias_enabled
    }

    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(balance: i64, stake: i64) -> GameSettings {
        GameSettings {
            starting_balance: balance,
            stake,
            seed: Some(2024),
            ..Default::default()
        }
    }

    #[test]
    fn test_start_round_deducts_stake() {
        let mut session = GameSession::new(&settings(100, 10)).unwrap();
        assert_eq!(session.start_round(), RoundStart::Started);
        assert_eq!(session.balance(), 90);
        assert!(session.is_ball_moving());
        assert_eq!(session.last_peg_hit(), None);

        let (start_x, end_x, _, _) = session.config().interior();
        let x = session.ball().pos.x;
        assert!(x >= start_x && x <= end_x);
        assert_eq!(session.ball().pos.y, BALL_DROP_Y);
    }

    #[test]
    fn test_insufficient_balance() {
        let mut session = GameSession::new(&settings(5, 10)).unwrap();
        assert_eq!(
            session.start_round(),
            RoundStart::InsufficientBalance {
                balance: 5,
                stake: 10
            }
        );
        assert_eq!(session.balance(), 5);
        assert_eq!(session.phase(), BallPhase::Idle);
        assert_eq!(session.stats().declined_bets, 1);
        assert_eq!(session.stats().rounds_started, 0);
    }

    #[test]
    fn test_round_in_progress_rejected() {
        let mut session = GameSession::new(&settings(100, 10)).unwrap();
        assert_eq!(session.start_round(), RoundStart::Started);
        assert_eq!(session.start_round(), RoundStart::RoundInProgress);
        assert_eq!(session.balance(), 90);
    }

    #[test]
    fn test_toggle_bias() {
        let mut session = GameSession::new(&settings(100, 10)).unwrap();
        assert!(!session.bias_enabled());
        assert_eq!(session.target_slot(), None);

        session.toggle_bias();
        assert!(session.bias_enabled());
        let target = session.target_slot().unwrap();
        assert!(target < session.slots().len());
        assert!(session.steering_target().is_some());

        session.toggle_bias();
        assert!(!session.bias_enabled());
        assert_eq!(session.target_slot(), None);
        assert_eq!(session.steering_target(), None);
    }

    #[test]
    fn test_unbiased_round_has_no_target() {
        let mut session = GameSession::new(&settings(100, 10)).unwrap();
        assert_eq!(session.start_round(), RoundStart::Started);
        assert_eq!(session.target_slot(), None);
    }

    #[test]
    fn test_change_layout_resets_to_idle() {
        let mut session = GameSession::new(&settings(100, 10)).unwrap();
        assert_eq!(session.start_round(), RoundStart::Started);
        for _ in 0..10 {
            session.step();
        }

        session.set_layout_kind(LayoutKind::Pyramid).unwrap();
        assert_eq!(session.phase(), BallPhase::Idle);
        assert_eq!(session.pegs().len(), 55);
        assert_eq!(session.slots().len(), 9);
        assert_eq!(session.last_peg_hit(), None);
        assert_eq!(session.step(), RoundStep::Idle);
        // Stake of the abandoned round is not refunded
        assert_eq!(session.balance(), 90);

        assert_eq!(session.start_round(), RoundStart::Started);
        assert_eq!(session.ball().pos.x, session.config().width / 2.0);
    }

    #[test]
    fn test_invalid_board_leaves_session_untouched() {
        let mut session = GameSession::new(&settings(100, 10)).unwrap();
        let bad = BoardConfig {
            columns: 1,
            ..BoardConfig::grid()
        };
        assert!(session.set_board(bad).is_err());
        assert_eq!(session.pegs().len(), 216);
        assert_eq!(session.config().kind, LayoutKind::Grid);
    }

    #[test]
    fn test_weighting_comes_from_settings() {
        let session = GameSession::new(&settings(100, 10)).unwrap();
        assert_eq!(session.weighting(), Weighting::InverseWithHouseBonus);

        let inverse = GameSettings {
            weighting: Weighting::Inverse,
            ..settings(100, 10)
        };
        let session = GameSession::new(&inverse).unwrap();
        assert_eq!(session.weighting(), Weighting::Inverse);
    }

    #[test]
    fn test_set_stake() {
        let mut session = GameSession::new(&settings(100, 10)).unwrap();
        assert_eq!(session.set_stake(-1), Err(ConfigError::InvalidStake(-1)));
        session.set_stake(0).unwrap();
        assert_eq!(session.start_round(), RoundStart::Started);
        assert_eq!(session.balance(), 100);
    }
}
