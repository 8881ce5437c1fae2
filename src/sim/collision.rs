//! Ball-ball collision detection and response
//!
//! All balls share one radius and one mass, so a contact is resolved by
//! pushing the pair apart along the line of centers and swapping their
//! normal velocity components. Tangential components pass through untouched.

use glam::Vec2;

use super::state::{Ball, BallId, BallSet};
use crate::clamp_speed;
use crate::consts::*;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit vector from the first center toward the second
    pub normal: Vec2,
    /// How far the pair must separate to just touch
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check two equal balls for overlap.
///
/// Coincident centers report a miss: there is no usable normal.
pub fn ball_ball_collision(a: Vec2, b: Vec2, radius: f32) -> CollisionResult {
    let delta = b - a;
    let dist = delta.length();
    let min_dist = radius * 2.0;

    if dist >= min_dist || dist <= DEGENERATE_DISTANCE {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        normal: delta / dist,
        penetration: min_dist - dist,
    }
}

/// Equal-mass elastic exchange along `normal`
#[inline]
pub fn exchange_normal_velocity(va: Vec2, vb: Vec2, normal: Vec2) -> (Vec2, Vec2) {
    let va_n = va.dot(normal);
    let vb_n = vb.dot(normal);
    (va + (vb_n - va_n) * normal, vb + (va_n - vb_n) * normal)
}

/// Pull a ball back inside the cushions, leaving its velocity alone
fn keep_on_table(ball: &mut Ball) {
    ball.pos = ball
        .pos
        .clamp(Vec2::new(MIN_X, MIN_Y), Vec2::new(MAX_X, MAX_Y));
}

/// Move both balls apart by half the penetration each.
///
/// A ball pinned against a rail stays there and its partner takes the rest
/// on a later relaxation pass.
fn separate(a: &mut Ball, b: &mut Ball, contact: &CollisionResult) {
    let push = 0.5 * (contact.penetration + SEPARATION_EPSILON);
    a.pos -= contact.normal * push;
    b.pos += contact.normal * push;
    keep_on_table(a);
    keep_on_table(b);
}

/// Resolve one contact: separate, exchange, clamp. Returns false on no contact.
pub fn resolve_pair(a: &mut Ball, b: &mut Ball, max_speed: f32) -> bool {
    let contact = ball_ball_collision(a.pos, b.pos, BALL_RADIUS);
    if !contact.hit {
        return false;
    }

    separate(a, b, &contact);
    let (va, vb) = exchange_normal_velocity(a.vel, b.vel, contact.normal);
    a.vel = clamp_speed(va, max_speed);
    b.vel = clamp_speed(vb, max_speed);
    true
}

/// Unordered pairs of balls still on the table
fn live_pairs(balls: &BallSet) -> Vec<(BallId, BallId)> {
    let live: Vec<BallId> = balls.on_table().map(|b| b.id).collect();
    let mut pairs = Vec::with_capacity(live.len() * live.len() / 2);
    for (i, &a) in live.iter().enumerate() {
        for &b in &live[i + 1..] {
            pairs.push((a, b));
        }
    }
    pairs
}

/// One pass over every pair, exchanging momentum at each contact.
/// Returns the number of contacts resolved.
pub fn resolve_collisions(balls: &mut BallSet, max_speed: f32) -> usize {
    let mut contacts = 0;
    for (a, b) in live_pairs(balls) {
        if let Some((ball_a, ball_b)) = balls.pair_mut(a, b) {
            if resolve_pair(ball_a, ball_b, max_speed) {
                contacts += 1;
            }
        }
    }
    contacts
}

/// Position-only passes until no pair overlaps or `max_passes` runs out.
///
/// Pushing one pair apart can press a neighbor into a third ball; this
/// settles those chains without touching velocities. Returns true when the
/// table ends clean.
pub fn relax_overlaps(balls: &mut BallSet, max_passes: usize) -> bool {
    let pairs = live_pairs(balls);
    for _ in 0..max_passes {
        let mut overlapping = false;
        for &(a, b) in &pairs {
            if let Some((ball_a, ball_b)) = balls.pair_mut(a, b) {
                let contact = ball_ball_collision(ball_a.pos, ball_b.pos, BALL_RADIUS);
                if contact.hit {
                    separate(ball_a, ball_b, &contact);
                    overlapping = true;
                }
            }
        }
        if !overlapping {
            return true;
        }
    }
    false
}
