//! Fixed timestep simulation tick
//!
//! One call per rendered frame at 60 Hz. Order within a tick: input, recoil
//! decay, then (while play is live) physics, pockets, and the turn check.

use glam::Vec2;

use super::phase::PhaseEvent;
use super::physics;
use super::rules;
use super::state::{GamePhase, GameState};

/// Input sample for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer position in table coordinates
    pub cursor: Vec2,
    /// Primary button went down this tick
    pub pressed: bool,
    /// Primary button is down
    pub held: bool,
    /// Primary button came up this tick
    pub released: bool,
    /// Start a fresh rack
    pub restart: bool,
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if input.restart {
        state.apply(PhaseEvent::Restart);
        return;
    }

    state.time_ticks += 1;

    handle_input(state, input);

    let max_power_pixels = state.tuning().max_power_pixels;
    state.aim.decay_recoil(max_power_pixels);

    if !state.phase.is_active() {
        return;
    }

    let tuning = *state.tuning();
    let report = physics::step(&mut state.balls, &tuning);
    if report.rail_hits > 0 || report.contacts > 0 {
        log::trace!(
            "tick {}: {} rail hits, {} contacts",
            state.time_ticks,
            report.rail_hits,
            report.contacts
        );
    }

    rules::check_pockets(state);
    update_motion(state);
}

fn handle_input(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::Scratch {
        if input.pressed {
            if let Err(e) = state.place_cue_ball(input.cursor) {
                log::warn!("Cue placement rejected: {:?}", e);
                state.status = e.to_string();
            }
        }
        return;
    }

    // No aiming while anything rolls or after the game is decided
    if state.balls_moving || state.phase.is_over() {
        return;
    }

    let cue_pos = state.cue_position();
    let tuning = *state.tuning();

    if input.pressed {
        state.aim.begin(input.cursor, cue_pos);
    }
    if input.held {
        state.aim.drag(input.cursor, cue_pos, tuning.max_power_pixels);
    }
    if input.released {
        if let Some(velocity) = state.aim.release(input.cursor, cue_pos, &tuning) {
            state.fire(velocity);
        }
    }
}

/// Edge-detect the balls coming to rest and hand over the table
fn update_motion(state: &mut GameState) {
    let moving = physics::are_balls_moving(&state.balls, state.tuning().min_velocity);

    if !state.balls_moving {
        state.balls_moving = moving;
        return;
    }
    if moving {
        return;
    }

    state.balls_moving = false;
    if state.phase != GamePhase::Playing {
        return;
    }

    state.apply(PhaseEvent::BallsStopped);

    let next = state.active();
    state.status = match rules::check_win_condition(next) {
        Some(hint) => format!("{}'s turn: {}", next.name, hint),
        None => format!("{}'s turn", next.name),
    };
}
