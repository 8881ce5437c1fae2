//! Session phase machine
//!
//! Every phase change goes through [`transition`]. Callers raise a
//! [`PhaseEvent`]; the returned [`Transition`] names the next phase and the
//! one side effect to apply. Status text stays with the caller.

use super::state::{GameEvent, GamePhase, GameState};

/// Inputs to the phase machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// Velocity applied to the cue ball
    ShotFired,
    CueBallPocketed,
    /// Ball-in-hand put down at a valid spot
    CueBallPlaced,
    /// Balls-in-motion flag fell from true to false
    BallsStopped,
    /// `group_cleared`: the active player had pocketed their whole group
    EightBallPocketed { group_cleared: bool },
    Restart,
}

/// Side effect carried by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Hand the table to the other player
    PassTurn,
    /// Rebuild the whole session
    Reinitialize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: GamePhase,
    pub effect: Effect,
}

impl Transition {
    fn stay(phase: GamePhase) -> Self {
        Self {
            next: phase,
            effect: Effect::None,
        }
    }

    fn to(next: GamePhase, effect: Effect) -> Self {
        Self { next, effect }
    }
}

/// The phase transition table
pub fn transition(phase: GamePhase, event: PhaseEvent) -> Transition {
    use GamePhase::*;

    match (phase, event) {
        (_, PhaseEvent::Restart) => Transition::to(Start, Effect::Reinitialize),

        (Won | Lost, _) => Transition::stay(phase),

        (Start | Playing, PhaseEvent::ShotFired) => Transition::to(Playing, Effect::None),

        (Playing | Scratch, PhaseEvent::CueBallPocketed) => {
            Transition::to(Scratch, Effect::PassTurn)
        }

        (Scratch, PhaseEvent::CueBallPlaced) => Transition::to(Playing, Effect::None),

        (Playing, PhaseEvent::BallsStopped) => Transition::to(Playing, Effect::PassTurn),

        (Playing | Scratch, PhaseEvent::EightBallPocketed { group_cleared }) => {
            let next = if group_cleared { Won } else { Lost };
            Transition::to(next, Effect::None)
        }

        _ => Transition::stay(phase),
    }
}

impl GameState {
    /// Run `event` through the phase machine and apply its effect
    pub fn apply(&mut self, event: PhaseEvent) -> GamePhase {
        let from = self.phase;
        let Transition { next, effect } = transition(from, event);

        match effect {
            Effect::None => {}
            Effect::PassTurn => {
                self.active_player = self.opponent_index();
                self.events.push(GameEvent::TurnPassed {
                    to: self.active_player,
                });
                log::debug!("Turn passes to {}", self.active().name);
            }
            Effect::Reinitialize => {
                *self = GameState::new(self.settings.clone());
                log::info!("Session restarted");
            }
        }

        if next != from {
            log::info!("Phase {:?} -> {:?}", from, next);
            self.events.push(GameEvent::PhaseChanged { from, to: next });
        }
        self.phase = next;
        next
    }
}
