//! Read-only view of a session for renderers
//!
//! Polled once per frame after `tick`.

use glam::Vec2;
use serde::Serialize;

use super::state::{BallKind, GamePhase, GameState, PlayerType, Rgb};

#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub number: u8,
    pub kind: BallKind,
    pub color: Rgb,
    pub striped: bool,
    pub pos: Vec2,
    pub pocketed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub name: String,
    pub kind: PlayerType,
    pub remaining: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub balls: Vec<BallView>,
    pub players: [PlayerView; 2],
    pub active_player: usize,
    pub phase: GamePhase,
    pub status: String,
    /// Shot power (0-1)
    pub power: f32,
    pub aiming: bool,
    pub balls_moving: bool,
    pub time_ticks: u64,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        let player_view = |i: usize| PlayerView {
            name: self.players[i].name.clone(),
            kind: self.players[i].kind,
            remaining: self.players[i].remaining,
        };

        Snapshot {
            balls: self
                .balls
                .iter()
                .map(|b| BallView {
                    number: b.id.number(),
                    kind: b.kind,
                    color: b.color(),
                    striped: b.is_striped(),
                    pos: b.pos,
                    pocketed: b.pocketed,
                })
                .collect(),
            players: [player_view(0), player_view(1)],
            active_player: self.active_player,
            phase: self.phase,
            status: self.status.clone(),
            power: self.aim.power,
            aiming: self.aim.aiming,
            balls_moving: self.balls_moving,
            time_ticks: self.time_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::default();
        state.aim.power = 0.25;
        state.balls.cue_mut().pocketed = true;

        let snap = state.snapshot();
        assert_eq!(snap.balls.len(), 16);
        assert!(snap.balls[0].pocketed);
        assert_eq!(snap.balls[8].kind, BallKind::Eight);
        assert!(snap.balls[9].striped);
        assert_eq!(snap.players[0].name, "Player 1");
        assert_eq!(snap.phase, GamePhase::Start);
        assert_eq!(snap.power, 0.25);
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_value(GameState::default().snapshot()).unwrap();
        assert_eq!(json["phase"], "Start");
        assert_eq!(json["balls"][8]["color"], serde_json::json!([0, 0, 0]));
        assert_eq!(json["players"][1]["kind"], "Unassigned");
    }
}
