//! Pockets and 8-ball rules
//!
//! Runs after each physics step: drops balls whose centers reach a pocket,
//! assigns groups on the first object ball down, keeps the remaining counts,
//! and settles the game when the 8-ball falls.

use glam::Vec2;

use super::phase::PhaseEvent;
use super::state::{BallId, BallKind, GameEvent, GamePhase, GameState, Player, PlayerType};
use crate::consts::*;
use crate::distance;

/// Pocket centers: four corners, then the two side pockets
pub const POCKETS: [Vec2; 6] = [
    Vec2::new(RAIL_WIDTH, RAIL_WIDTH),
    Vec2::new(TABLE_WIDTH * 0.5, RAIL_WIDTH),
    Vec2::new(TABLE_WIDTH - RAIL_WIDTH, RAIL_WIDTH),
    Vec2::new(RAIL_WIDTH, TABLE_HEIGHT - RAIL_WIDTH),
    Vec2::new(TABLE_WIDTH * 0.5, TABLE_HEIGHT - RAIL_WIDTH),
    Vec2::new(TABLE_WIDTH - RAIL_WIDTH, TABLE_HEIGHT - RAIL_WIDTH),
];

/// First pocket whose capture radius holds `pos`
pub fn pocket_at(pos: Vec2) -> Option<usize> {
    POCKETS
        .iter()
        .position(|&pocket| distance(pos, pocket) < POCKET_RADIUS)
}

/// Summary of one pocket scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PocketReport {
    /// Object balls down this scan (8-ball excluded)
    pub object_balls: usize,
    pub scratch: bool,
    /// The 8-ball fell and the game is decided
    pub game_over: bool,
}

/// Scan the table for pocketed balls and apply the rules
pub fn check_pockets(state: &mut GameState) -> PocketReport {
    let shooter = state.active_player;
    let mut report = PocketReport::default();

    for id in BallId::all() {
        let ball = &mut state.balls[id];
        if ball.pocketed {
            continue;
        }
        let Some(pocket) = pocket_at(ball.pos) else {
            continue;
        };

        ball.pocketed = true;
        ball.vel = Vec2::ZERO;
        let kind = ball.kind;
        state.events.push(GameEvent::BallPocketed { ball: id, pocket });
        log::debug!("Ball {} dropped in pocket {}", id.number(), pocket);

        match kind {
            BallKind::Cue => {
                report.scratch = true;
                state.cue_respawn = CUE_START;
            }
            BallKind::Eight => {
                settle_eight_ball(state);
                report.game_over = true;
                // Nothing else counts once the 8-ball is down
                return report;
            }
            BallKind::Solid | BallKind::Stripe => {
                report.object_balls += 1;
                assign_groups(state, kind);
                credit_owner(state, kind);
            }
        }
    }

    if report.scratch {
        apply_scratch(state);
    }

    // Credit goes to whoever shot, even when the cue ball went down
    if report.scratch || report.object_balls > 0 {
        state.status = format!("{} pocketed a ball!", state.players[shooter].name);
    }

    report
}

/// On the first object ball down after the break, the shooter takes that
/// ball's group and the opponent the other. Happens once per session.
///
/// Gated on the break having been fired, not on which shot is running, so
/// on a break that drops both groups the lowest-numbered ball decides.
fn assign_groups(state: &mut GameState, kind: BallKind) {
    if state.types_assigned || !state.first_shot_taken {
        return;
    }
    let Some(group) = PlayerType::for_kind(kind) else {
        return;
    };

    let shooter = state.active_player;
    let opponent = state.opponent_index();
    state.players[shooter].kind = group;
    state.players[opponent].kind = group.opponent();
    state.types_assigned = true;

    state.events.push(GameEvent::TypesAssigned {
        player: shooter,
        kind: group,
    });
    log::info!(
        "{} takes {:?}, {} takes {:?}",
        state.players[shooter].name,
        group,
        state.players[opponent].name,
        group.opponent()
    );
}

/// Count a pocketed group ball against whoever owns that group
fn credit_owner(state: &mut GameState, kind: BallKind) {
    if let Some(owner) = state.player_for_kind(kind) {
        let player = &mut state.players[owner];
        player.remaining = player.remaining.saturating_sub(1);
    }
}

/// The active player wins with their group cleared and loses otherwise.
///
/// A cue ball scratched in the same scan is not an extra loss condition.
fn settle_eight_ball(state: &mut GameState) {
    let group_cleared = state.active().has_cleared_group();
    let phase = state.apply(PhaseEvent::EightBallPocketed { group_cleared });

    let name = &state.active().name;
    state.status = match phase {
        GamePhase::Won => format!("{name} sinks the 8-ball and wins!"),
        GamePhase::Lost => format!("{name} sank the 8-ball early and loses!"),
        _ => return,
    };
    log::info!("{}", state.status);
}

/// Cue ball down: ball in hand for the opponent
fn apply_scratch(state: &mut GameState) {
    state.apply(PhaseEvent::CueBallPocketed);
    state.events.push(GameEvent::Scratch {
        next_player: state.active_player,
    });
    log::debug!("Scratch; {} has ball in hand", state.active().name);
}

/// Hint for a player who only has the 8-ball left
pub fn check_win_condition(player: &Player) -> Option<&'static str> {
    player.has_cleared_group().then_some("shoot the 8-ball!")
}
