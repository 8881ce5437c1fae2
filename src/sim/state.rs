//! Game state and core simulation types
//!
//! The session owns every ball and player outright; the simulation mutates it
//! through `&mut GameState` once per tick.

use std::ops::{Index, IndexMut};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cue::AimState;
use crate::consts::*;
use crate::settings::{PhysicsTuning, Settings};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh rack, physics inert until the break is fired
    Start,
    /// Normal turn in progress
    Playing,
    /// Cue ball pocketed, waiting for ball-in-hand placement
    Scratch,
    /// The active player sank the 8-ball after clearing their group
    Won,
    /// The active player sank the 8-ball early
    Lost,
}

impl GamePhase {
    /// Physics only runs in these phases
    pub fn is_active(self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Scratch)
    }

    pub fn is_over(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Ball classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallKind {
    Cue,
    Solid,
    Stripe,
    Eight,
}

impl BallKind {
    /// Classification by ball number: 0 cue, 1-7 solids, 8 eight, 9-15 stripes
    pub fn for_number(number: u8) -> Self {
        match number {
            0 => BallKind::Cue,
            1..=7 => BallKind::Solid,
            8 => BallKind::Eight,
            _ => BallKind::Stripe,
        }
    }
}

/// Typed index into the ball arena.
///
/// Slot 0 always holds the cue ball and slot 8 the 8-ball; every other slot
/// holds the object ball with the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BallId(u8);

impl BallId {
    pub const CUE: BallId = BallId(0);
    pub const EIGHT: BallId = BallId(8);

    /// `None` for numbers beyond the last slot
    pub fn new(number: u8) -> Option<Self> {
        ((number as usize) < MAX_BALLS).then_some(BallId(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// All ids in slot order
    pub fn all() -> impl Iterator<Item = BallId> {
        (0..MAX_BALLS as u8).map(BallId)
    }
}

/// RGB color, as consumed by the renderer
pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [255, 255, 255];
pub const BLACK: Rgb = [0, 0, 0];

/// Shared by solids 1-7 and stripes 9-15
pub const GROUP_PALETTE: [Rgb; 7] = [
    [253, 249, 0],  // yellow
    [0, 121, 241],  // blue
    [230, 41, 55],  // red
    [200, 122, 255],  // purple
    [255, 161, 0],  // orange
    [0, 228, 48],   // green
    [190, 33, 55],  // maroon
];

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: BallKind,
    /// Terminal for object balls; the cue ball comes back via placement
    pub pocketed: bool,
}

impl Ball {
    pub fn new(id: BallId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            kind: BallKind::for_number(id.number()),
            pocketed: false,
        }
    }

    pub fn is_striped(&self) -> bool {
        self.kind == BallKind::Stripe
    }

    pub fn color(&self) -> Rgb {
        match self.kind {
            BallKind::Cue => WHITE,
            BallKind::Eight => BLACK,
            BallKind::Solid => GROUP_PALETTE[(self.id.number() - 1) as usize],
            BallKind::Stripe => GROUP_PALETTE[(self.id.number() - 9) as usize],
        }
    }

    /// Either component above the rest threshold
    pub fn is_moving(&self, min_velocity: f32) -> bool {
        self.vel.x.abs() > min_velocity || self.vel.y.abs() > min_velocity
    }
}

/// Fixed-capacity ball arena indexed by `BallId`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallSet {
    balls: [Ball; MAX_BALLS],
}

impl BallSet {
    /// Cue ball on the head spot and a full triangle rack
    pub fn racked() -> Self {
        let positions = rack_positions(RACK_APEX, BALL_RADIUS);
        let balls = std::array::from_fn(|i| {
            let id = BallId(i as u8);
            if id == BallId::CUE {
                Ball::new(id, CUE_START)
            } else {
                Ball::new(id, positions[i - 1])
            }
        });
        Self { balls }
    }

    pub fn cue(&self) -> &Ball {
        &self[BallId::CUE]
    }

    pub fn cue_mut(&mut self) -> &mut Ball {
        &mut self[BallId::CUE]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Ball> {
        self.balls.iter_mut()
    }

    /// Balls still on the table
    pub fn on_table(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter().filter(|b| !b.pocketed)
    }

    /// Mutable access to two distinct balls at once
    pub fn pair_mut(&mut self, a: BallId, b: BallId) -> Option<(&mut Ball, &mut Ball)> {
        let (i, j) = (a.index(), b.index());
        if i == j {
            return None;
        }
        if i < j {
            let (lo, hi) = self.balls.split_at_mut(j);
            Some((&mut lo[i], &mut hi[0]))
        } else {
            let (lo, hi) = self.balls.split_at_mut(i);
            Some((&mut hi[0], &mut lo[j]))
        }
    }
}

impl Index<BallId> for BallSet {
    type Output = Ball;

    fn index(&self, id: BallId) -> &Ball {
        &self.balls[id.index()]
    }
}

impl IndexMut<BallId> for BallSet {
    fn index_mut(&mut self, id: BallId) -> &mut Ball {
        &mut self.balls[id.index()]
    }
}

/// Triangle rack, apex toward the cue ball.
///
/// Returns centers for balls 1..=15 (index 0 is ball 1), numbered row by row:
/// ```text
///   1
///   2  3
///   4  5  6
///   7  8  9 10
///  11 12 13 14 15
/// ```
pub fn rack_positions(apex: Vec2, ball_radius: f32) -> [Vec2; MAX_BALLS - 1] {
    let mut positions = [Vec2::ZERO; MAX_BALLS - 1];
    let mut idx = 0;
    for row in 0..RACK_ROWS {
        for col in 0..=row {
            let offset = Vec2::new(
                row as f32 * ball_radius * 2.0 * RACK_ROW_SPACING,
                col as f32 * ball_radius * 2.0 - row as f32 * ball_radius,
            );
            positions[idx] = apex + offset;
            idx += 1;
        }
    }
    positions
}

/// Group a player is shooting for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerType {
    #[default]
    Unassigned,
    Solids,
    Stripes,
}

impl PlayerType {
    /// Group a ball belongs to, if any
    pub fn for_kind(kind: BallKind) -> Option<Self> {
        match kind {
            BallKind::Solid => Some(PlayerType::Solids),
            BallKind::Stripe => Some(PlayerType::Stripes),
            BallKind::Cue | BallKind::Eight => None,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerType::Solids => PlayerType::Stripes,
            PlayerType::Stripes => PlayerType::Solids,
            PlayerType::Unassigned => PlayerType::Unassigned,
        }
    }

    pub fn is_assigned(self) -> bool {
        self != PlayerType::Unassigned
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub kind: PlayerType,
    /// Unpocketed balls of this player's group, never below zero
    pub remaining: u8,
    pub name: String,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            kind: PlayerType::Unassigned,
            remaining: BALLS_PER_GROUP,
            name: name.into(),
        }
    }

    /// Group assigned and fully pocketed: the 8-ball is now legal
    pub fn has_cleared_group(&self) -> bool {
        self.kind.is_assigned() && self.remaining == 0
    }
}

/// Things that happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { speed: f32 },
    BallPocketed { ball: BallId, pocket: usize },
    TypesAssigned { player: usize, kind: PlayerType },
    Scratch { next_player: usize },
    CuePlaced { pos: Vec2 },
    TurnPassed { to: usize },
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub balls: BallSet,
    pub players: [Player; 2],
    /// Index into `players` of the shooter
    pub active_player: usize,
    pub phase: GamePhase,
    /// Where ball-in-hand starts after a scratch
    pub cue_respawn: Vec2,
    pub aim: AimState,
    pub status: String,
    /// Edge-trigger state for turn advance; also gates aiming
    pub balls_moving: bool,
    /// Set when the break is fired
    pub first_shot_taken: bool,
    pub types_assigned: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub settings: Settings,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl GameState {
    /// Fresh session: racked table, unassigned players, player 0 to break
    pub fn new(settings: Settings) -> Self {
        let [first, second] = settings.player_names.clone();
        Self {
            balls: BallSet::racked(),
            players: [Player::new(first), Player::new(second)],
            active_player: 0,
            phase: GamePhase::Start,
            cue_respawn: CUE_START,
            aim: AimState::default(),
            status: "Break shot: click on cue, drag back, release to shoot".to_string(),
            balls_moving: false,
            first_shot_taken: false,
            types_assigned: false,
            time_ticks: 0,
            settings,
            events: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &PhysicsTuning {
        &self.settings.tuning
    }

    pub fn active(&self) -> &Player {
        &self.players[self.active_player]
    }

    pub fn opponent_index(&self) -> usize {
        1 - self.active_player
    }

    /// Player shooting for `kind`'s group, if groups are assigned
    pub fn player_for_kind(&self, kind: BallKind) -> Option<usize> {
        let group = PlayerType::for_kind(kind)?;
        self.players.iter().position(|p| p.kind == group)
    }

    /// Where the cue ball is, or will reappear if it is down
    pub fn cue_position(&self) -> Vec2 {
        let cue = self.balls.cue();
        if cue.pocketed { self.cue_respawn } else { cue.pos }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance;

    #[test]
    fn test_new_session() {
        let state = GameState::default();
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.active_player, 0);
        assert!(!state.types_assigned);
        assert!(!state.first_shot_taken);
        for player in &state.players {
            assert_eq!(player.kind, PlayerType::Unassigned);
            assert_eq!(player.remaining, 7);
        }
        assert_eq!(state.players[1].name, "Player 2");
        assert_eq!(state.balls.cue().pos, CUE_START);
    }

    #[test]
    fn test_ball_kinds_by_slot() {
        let balls = BallSet::racked();
        assert_eq!(balls[BallId::CUE].kind, BallKind::Cue);
        assert_eq!(balls[BallId::EIGHT].kind, BallKind::Eight);
        for n in 1..=7 {
            assert_eq!(balls[BallId::new(n).unwrap()].kind, BallKind::Solid);
        }
        for n in 9..=15 {
            let ball = &balls[BallId::new(n).unwrap()];
            assert_eq!(ball.kind, BallKind::Stripe);
            assert!(ball.is_striped());
        }
        assert!(BallId::new(16).is_none());
    }

    #[test]
    fn test_colors() {
        let balls = BallSet::racked();
        assert_eq!(balls[BallId::CUE].color(), WHITE);
        assert_eq!(balls[BallId::EIGHT].color(), BLACK);
        let one = balls[BallId::new(1).unwrap()].color();
        let nine = balls[BallId::new(9).unwrap()].color();
        assert_eq!(one, nine);
        assert_eq!(balls[BallId::new(15).unwrap()].color(), GROUP_PALETTE[6]);
    }

    #[test]
    fn test_rack_does_not_overlap() {
        let balls = BallSet::racked();
        let on_table: Vec<_> = balls.on_table().collect();
        assert_eq!(on_table.len(), MAX_BALLS);
        for (i, a) in on_table.iter().enumerate() {
            for b in &on_table[i + 1..] {
                assert!(distance(a.pos, b.pos) >= BALL_RADIUS * 2.0 - 1e-3);
            }
        }
    }

    #[test]
    fn test_rack_layout() {
        let positions = rack_positions(RACK_APEX, BALL_RADIUS);
        assert_eq!(positions[0], RACK_APEX);
        // Ball 8 sits second in the fourth row
        let eight = positions[7];
        assert!((eight.x - (RACK_APEX.x + 3.0 * 30.0 * 0.88)).abs() < 1e-3);
        assert!((eight.y - (RACK_APEX.y - 15.0)).abs() < 1e-3);
    }

    #[test]
    fn test_pair_mut() {
        let mut balls = BallSet::racked();
        let one = BallId::new(1).unwrap();
        let (a, b) = balls.pair_mut(BallId::EIGHT, one).unwrap();
        assert_eq!(a.id, BallId::EIGHT);
        assert_eq!(b.id, one);
        assert!(balls.pair_mut(one, one).is_none());
    }

    #[test]
    fn test_player_for_kind() {
        let mut state = GameState::default();
        assert_eq!(state.player_for_kind(BallKind::Solid), None);
        state.players[0].kind = PlayerType::Stripes;
        state.players[1].kind = PlayerType::Solids;
        assert_eq!(state.player_for_kind(BallKind::Solid), Some(1));
        assert_eq!(state.player_for_kind(BallKind::Stripe), Some(0));
        assert_eq!(state.player_for_kind(BallKind::Eight), None);
    }

    #[test]
    fn test_cue_position_uses_respawn_when_down() {
        let mut state = GameState::default();
        state.balls.cue_mut().pos = Vec2::new(300.0, 100.0);
        assert_eq!(state.cue_position(), Vec2::new(300.0, 100.0));
        state.balls.cue_mut().pocketed = true;
        assert_eq!(state.cue_position(), CUE_START);
    }
}
