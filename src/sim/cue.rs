//! Cue stick: aiming, shot power, recoil, and ball-in-hand placement

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::phase::PhaseEvent;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::settings::PhysicsTuning;
use crate::{clamp_speed, direction_to, distance};

/// Transient aiming state
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AimState {
    /// Dragging from the cue ball
    pub aiming: bool,
    pub drag_start: Vec2,
    /// Pull distance, capped at `max_power_pixels`
    pub pull: f32,
    /// Normalized shot power (0-1)
    pub power: f32,
    pub recoiling: bool,
    /// Seconds of recoil left
    pub recoil_timer: f32,
}

impl AimState {
    /// Start a drag if the press lands on the cue ball
    pub fn begin(&mut self, cursor: Vec2, cue_pos: Vec2) -> bool {
        if distance(cursor, cue_pos) > AIM_GRAB_RADIUS {
            return false;
        }
        self.aiming = true;
        self.drag_start = cursor;
        self.pull = 0.0;
        self.power = 0.0;
        true
    }

    /// Track the pull while the button is held
    pub fn drag(&mut self, cursor: Vec2, cue_pos: Vec2, max_power_pixels: f32) {
        if !self.aiming {
            return;
        }
        self.pull = distance(cursor, cue_pos).min(max_power_pixels);
        self.power = self.pull / max_power_pixels;
    }

    /// Finish the drag and return the cue ball's launch velocity.
    ///
    /// The shot heads toward the cursor. Releasing on the cue ball itself
    /// cancels.
    pub fn release(&mut self, cursor: Vec2, cue_pos: Vec2, tuning: &PhysicsTuning) -> Option<Vec2> {
        if !self.aiming {
            return None;
        }
        self.aiming = false;

        let Some(dir) = direction_to(cue_pos, cursor) else {
            self.pull = 0.0;
            self.power = 0.0;
            return None;
        };

        let speed = (self.pull / tuning.max_power_pixels) * tuning.max_shot_speed;
        let velocity = clamp_speed(dir * speed, tuning.max_shot_speed);

        self.recoiling = true;
        self.recoil_timer = RECOIL_DURATION;
        self.power = 0.0;
        Some(velocity)
    }

    /// Advance the recoil animation by one tick
    pub fn decay_recoil(&mut self, max_power_pixels: f32) {
        if !self.recoiling {
            return;
        }
        self.recoil_timer -= SIM_DT;
        if self.recoil_timer <= 0.0 {
            self.recoiling = false;
            self.recoil_timer = 0.0;
            self.pull = 0.0;
        } else {
            self.pull *= RECOIL_PULL_DECAY;
            self.power = (self.pull / max_power_pixels).max(0.0);
        }
    }
}

/// Rejected ball-in-hand placement
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PlacementError {
    #[error("Invalid position! Place inside rails")]
    OutsideRails { x: f32, y: f32 },

    #[error("Cue ball is not in hand")]
    NotInHand,
}

/// Strictly inside the rails, leaving room for the ball
pub fn is_valid_placement(pos: Vec2) -> bool {
    pos.x > MIN_X && pos.x < MAX_X && pos.y > MIN_Y && pos.y < MAX_Y
}

impl GameState {
    /// Put the cue ball back on the table during a scratch
    pub fn place_cue_ball(&mut self, pos: Vec2) -> Result<(), PlacementError> {
        if self.phase != GamePhase::Scratch {
            return Err(PlacementError::NotInHand);
        }
        if !is_valid_placement(pos) {
            return Err(PlacementError::OutsideRails { x: pos.x, y: pos.y });
        }

        self.cue_respawn = pos;
        let cue = self.balls.cue_mut();
        cue.pos = pos;
        cue.vel = Vec2::ZERO;
        cue.pocketed = false;
        self.events.push(GameEvent::CuePlaced { pos });

        self.apply(PhaseEvent::CueBallPlaced);
        self.status = format!("Cue placed. {}'s turn", self.active().name);
        Ok(())
    }

    /// Launch the cue ball
    pub(crate) fn fire(&mut self, velocity: Vec2) {
        self.balls.cue_mut().vel = velocity;
        self.first_shot_taken = true;
        self.events.push(GameEvent::ShotFired {
            speed: velocity.length(),
        });
        log::debug!(
            "{} shoots at speed {:.2}",
            self.active().name,
            velocity.length()
        );
        self.apply(PhaseEvent::ShotFired);
    }
}
