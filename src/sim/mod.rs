//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No randomness
//! - Stable iteration order (by ball number)
//! - No rendering or platform dependencies

pub mod collision;
pub mod cue;
pub mod phase;
pub mod physics;
pub mod rules;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, ball_ball_collision, resolve_collisions};
pub use cue::{AimState, PlacementError, is_valid_placement};
pub use phase::{Effect, PhaseEvent, Transition, transition};
pub use physics::{StepReport, are_balls_moving, step};
pub use rules::{POCKETS, PocketReport, check_pockets, check_win_condition, pocket_at};
pub use snapshot::{BallView, PlayerView, Snapshot};
pub use state::{
    Ball, BallId, BallKind, BallSet, GameEvent, GamePhase, GameState, Player, PlayerType, Rgb,
};
pub use tick::{TickInput, tick};
