//! Per-tick ball integration
//!
//! Explicit Euler with a unit step of one tick, multiplicative friction and
//! lossy rail bounces. Pairwise contacts are resolved after every ball has
//! moved, so per-ball order does not matter.

use super::collision::{relax_overlaps, resolve_collisions};
use super::state::{Ball, BallSet};
use crate::clamp_speed;
use crate::consts::*;
use crate::settings::PhysicsTuning;

/// What one physics step did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub rail_hits: usize,
    pub contacts: usize,
}

/// Clamp a ball back inside the cushions, reflecting and damping the
/// perpendicular velocity. Axes are independent, so a corner can bounce both.
/// Returns the number of rails hit.
pub fn rail_rebound(ball: &mut Ball, restitution: f32) -> usize {
    let mut hits = 0;

    if ball.pos.x < MIN_X {
        ball.pos.x = MIN_X;
        ball.vel.x *= -restitution;
        hits += 1;
    }
    if ball.pos.x > MAX_X {
        ball.pos.x = MAX_X;
        ball.vel.x *= -restitution;
        hits += 1;
    }
    if ball.pos.y < MIN_Y {
        ball.pos.y = MIN_Y;
        ball.vel.y *= -restitution;
        hits += 1;
    }
    if ball.pos.y > MAX_Y {
        ball.pos.y = MAX_Y;
        ball.vel.y *= -restitution;
        hits += 1;
    }

    hits
}

/// Advance one ball by a tick. Returns rails hit.
pub fn integrate_ball(ball: &mut Ball, tuning: &PhysicsTuning) -> usize {
    ball.pos += ball.vel;
    ball.vel *= tuning.friction;

    // Snap residue to rest
    if ball.vel.x.abs() < tuning.min_velocity {
        ball.vel.x = 0.0;
    }
    if ball.vel.y.abs() < tuning.min_velocity {
        ball.vel.y = 0.0;
    }

    let hits = rail_rebound(ball, tuning.rail_restitution);
    ball.vel = clamp_speed(ball.vel, tuning.max_ball_speed);
    hits
}

/// Integrate every ball on the table, then resolve contacts
pub fn step(balls: &mut BallSet, tuning: &PhysicsTuning) -> StepReport {
    let mut report = StepReport::default();

    for ball in balls.iter_mut().filter(|b| !b.pocketed) {
        report.rail_hits += integrate_ball(ball, tuning);
    }

    report.contacts = resolve_collisions(balls, tuning.max_ball_speed);
    if report.contacts > 0 && !relax_overlaps(balls, MAX_RELAX_PASSES) {
        log::warn!("Overlaps remain after {} relaxation passes", MAX_RELAX_PASSES);
    }

    report
}

/// Any ball on the table still rolling
pub fn are_balls_moving(balls: &BallSet, min_velocity: f32) -> bool {
    balls.on_table().any(|b| b.is_moving(min_velocity))
}
