//! Eight Ball - A two-player 8-ball pool simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, pockets, turn rules)
//! - `settings`: Player names and physics tuning

pub mod settings;
pub mod sim;

pub use settings::{PhysicsTuning, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation rate. Friction and recoil constants assume it.
    pub const TICK_RATE_HZ: u32 = 60;
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;

    /// Cue ball plus fifteen object balls
    pub const MAX_BALLS: usize = 16;
    /// Balls in each of the solids/stripes groups
    pub const BALLS_PER_GROUP: u8 = 7;

    /// Table dimensions (rail included)
    pub const TABLE_WIDTH: f32 = 800.0;
    pub const TABLE_HEIGHT: f32 = 400.0;
    pub const RAIL_WIDTH: f32 = 40.0;

    pub const BALL_RADIUS: f32 = 15.0;
    /// Ball center within this distance of a pocket center drops
    pub const POCKET_RADIUS: f32 = 28.0;

    /// Per-tick velocity multiplier (rolling resistance)
    pub const FRICTION: f32 = 0.985;
    /// Velocity components below this snap to zero
    pub const MIN_VELOCITY: f32 = 0.06;
    /// Fraction of perpendicular speed kept after a rail bounce
    pub const RAIL_RESTITUTION: f32 = 0.86;
    pub const MAX_BALL_SPEED: f32 = 26.0;
    pub const MAX_SHOT_SPEED: f32 = 22.0;
    /// Drag distance that maps to full power
    pub const MAX_POWER_PIXELS: f32 = 160.0;

    /// Added to separation so resolved pairs don't re-trigger on equality
    pub const SEPARATION_EPSILON: f32 = 0.001;
    /// Centers closer than this have no usable contact normal
    pub const DEGENERATE_DISTANCE: f32 = 0.0001;
    /// Extra position-only passes to clear chained overlaps
    pub const MAX_RELAX_PASSES: usize = 32;

    /// Press within this distance of the cue ball to start aiming
    pub const AIM_GRAB_RADIUS: f32 = BALL_RADIUS * 1.6;
    /// Release closer than this cancels the shot
    pub const MIN_AIM_DISTANCE: f32 = 0.001;
    /// Cue stick recoil after a shot (seconds)
    pub const RECOIL_DURATION: f32 = 0.12;
    pub const RECOIL_PULL_DECAY: f32 = 0.92;

    /// Cue ball break and respawn spot (head string)
    pub const CUE_START: Vec2 = Vec2::new(TABLE_WIDTH * 0.25, TABLE_HEIGHT * 0.5);
    /// Apex of the triangle rack
    pub const RACK_APEX: Vec2 = Vec2::new(TABLE_WIDTH * 0.72, TABLE_HEIGHT * 0.5);
    /// Row spacing as a fraction of ball diameter
    pub const RACK_ROW_SPACING: f32 = 0.88;
    pub const RACK_ROWS: usize = 5;

    /// Lowest/highest legal center coordinate on each axis
    pub const MIN_X: f32 = RAIL_WIDTH + BALL_RADIUS;
    pub const MAX_X: f32 = TABLE_WIDTH - RAIL_WIDTH - BALL_RADIUS;
    pub const MIN_Y: f32 = RAIL_WIDTH + BALL_RADIUS;
    pub const MAX_Y: f32 = TABLE_HEIGHT - RAIL_WIDTH - BALL_RADIUS;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(p: Vec2, q: Vec2) -> f32 {
    p.distance(q)
}

/// Rescale `velocity` to exactly `max_speed` if it is faster, keeping direction
#[inline]
pub fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    velocity.clamp_length_max(max_speed)
}

/// Unit vector from `from` toward `to`, or `None` when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let len = delta.length();
    if len < consts::MIN_AIM_DISTANCE {
        return None;
    }
    Some(delta / len)
}
