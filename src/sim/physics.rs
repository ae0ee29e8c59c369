//! Physics backends
//!
//! A backend moves the ball through one tick in two phases:
//! 1. `resolve_contacts`: peg interaction; the resulting position is what the
//!    session tests against the slots
//! 2. `advance`: motion for a ball that did not settle this tick
//!
//! [`DeflectionPhysics`] is the reference stepper. [`ExternalPhysics`] adapts a
//! rigid-body world owned elsewhere; the session only ever reads the ball
//! position back from it.

use glam::Vec2;
use rand::Rng;

use super::layout::{Peg, PegId};
use super::state::Ball;
use crate::consts::{PEG_RADIUS, TICK_STEP};

/// Per-tick inputs a backend may use when resolving peg contacts
#[derive(Debug)]
pub struct Contacts<'a> {
    pub pegs: &'a [Peg],
    pub board_width: f32,
    /// Horizontal center of the slot the ball is steered toward
    pub target_x: Option<f32>,
    /// Last peg that deflected the ball
    pub last_peg_hit: &'a mut Option<PegId>,
}

/// Capability: advance the ball one tick given static circular obstacles
pub trait PhysicsBackend {
    /// Called when a round starts or the layout changes
    fn reset(&mut self, _ball: &Ball, _pegs: &[Peg]) {}

    fn resolve_contacts<R: Rng + ?Sized>(
        &mut self,
        ball: &mut Ball,
        contacts: &mut Contacts<'_>,
        rng: &mut R,
    );

    fn advance(&mut self, ball: &mut Ball);
}

/// First peg overlapping the ball, skipping the one that deflected it last
pub fn peg_contact(ball: &Ball, pegs: &[Peg], last_hit: Option<PegId>) -> Option<PegId> {
    let bounds = ball.bounds();
    pegs.iter()
        .enumerate()
        .filter(|(i, _)| last_hit != Some(PegId(*i)))
        .find(|(_, peg)| peg.bounds().overlaps(&bounds))
        .map(|(i, _)| PegId(i))
}

/// Horizontal shift applied when the ball strikes a peg
///
/// The magnitude is the ball's width. The sign points toward `target_x` when
/// given, otherwise it is a coin flip. A shift that would carry the ball past
/// either wall is reflected.
pub fn deflection_shift<R: Rng + ?Sized>(
    ball: &Ball,
    target_x: Option<f32>,
    board_width: f32,
    rng: &mut R,
) -> f32 {
    let width = ball.width();

    let steered = target_x.and_then(|target| {
        if ball.pos.x < target {
            Some(1.0)
        } else if ball.pos.x > target {
            Some(-1.0)
        } else {
            None
        }
    });
    let sign = steered.unwrap_or_else(|| if rng.random_bool(0.5) { 1.0 } else { -1.0 });

    let mut shift = sign * width;
    let right_edge = ball.bounds().x + shift + width;
    if right_edge <= 0.0 || right_edge >= board_width {
        shift = -shift;
    }
    shift
}

/// Reference stepper: sideways hop on peg contact, constant descent otherwise
#[derive(Debug, Clone, Copy)]
pub struct DeflectionPhysics {
    pub tick_step: f32,
}

impl Default for DeflectionPhysics {
    fn default() -> Self {
        Self {
            tick_step: TICK_STEP,
        }
    }
}

impl PhysicsBackend for DeflectionPhysics {
    fn resolve_contacts<R: Rng + ?Sized>(
        &mut self,
        ball: &mut Ball,
        contacts: &mut Contacts<'_>,
        rng: &mut R,
    ) {
        let Some(peg) = peg_contact(ball, contacts.pegs, *contacts.last_peg_hit) else {
            return;
        };

        *contacts.last_peg_hit = Some(peg);
        let shift = deflection_shift(ball, contacts.target_x, contacts.board_width, rng);
        ball.pos.x += shift;
        log::debug!("Peg {} hit, ball shifted {} to x={}", peg.0, shift, ball.pos.x);
    }

    fn advance(&mut self, ball: &mut Ball) {
        ball.pos.y += self.tick_step;
    }
}

/// A rigid-body world owned by an external physics engine
pub trait RigidBodyWorld {
    /// Replace the static circular obstacles
    fn set_obstacles(&mut self, pegs: &[Peg], peg_radius: f32);
    /// Put the dynamic ball body at `center`
    fn place_ball(&mut self, center: Vec2, radius: f32);
    /// Advance the world by one step
    fn step(&mut self);
    /// Ball center after the last step
    fn ball_position(&self) -> Vec2;
}

/// Adapter running the ball through an external [`RigidBodyWorld`]
///
/// The engine moves the ball; `advance` is a no-op and steering is ignored.
#[derive(Debug, Clone, Default)]
pub struct ExternalPhysics<W> {
    world: W,
}

impl<W: RigidBodyWorld> ExternalPhysics<W> {
    pub fn new(world: W) -> Self {
        Self { world }
    }

    pub fn world(&self) -> &W {
        &self.world
    }
}

impl<W: RigidBodyWorld> PhysicsBackend for ExternalPhysics<W> {
    fn reset(&mut self, ball: &Ball, pegs: &[Peg]) {
        self.world.set_obstacles(pegs, PEG_RADIUS);
        self.world.place_ball(ball.pos, ball.radius);
    }

    fn resolve_contacts<R: Rng + ?Sized>(
        &mut self,
        ball: &mut Ball,
        _contacts: &mut Contacts<'_>,
        _rng: &mut R,
    ) {
        self.world.step();
        ball.pos = self.world.ball_position();
    }

    fn advance(&mut self, _ball: &mut Ball) {}
}
