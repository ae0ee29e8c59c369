//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete tick per host frame, no internal timing
//! - Injected RNG only
//! - Stable iteration order (row-major pegs, left-to-right slots)
//! - No rendering or platform dependencies

pub mod collision;
pub mod layout;
pub mod outcome;
pub mod physics;
pub mod session;
pub mod slots;
pub mod state;
pub mod tick;

pub use collision::{Aabb, boxes_overlap};
pub use layout::{
    BoardConfig, Layout, LayoutKind, Peg, PegId, generate_layout, grid_pegs, pyramid_pegs,
};
pub use outcome::{Weighting, select_target};
pub use physics::{
    Contacts, DeflectionPhysics, ExternalPhysics, PhysicsBackend, RigidBodyWorld, deflection_shift,
    peg_contact,
};
pub use session::{GameSession, RoundStart};
pub use slots::{Slot, build_slots, slot_hit};
pub use state::{Ball, BallPhase, RngState, SessionStats};
pub use tick::{RoundStep, tick};
