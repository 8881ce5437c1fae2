//! Property tests for the physics and rules invariants

use eight_ball::consts::*;
use eight_ball::sim::collision::resolve_pair;
use eight_ball::sim::physics::{integrate_ball, step};
use eight_ball::sim::{Ball, BallId, BallKind, BallSet, GameState, PlayerType, TickInput, tick};
use eight_ball::{PhysicsTuning, distance};
use glam::Vec2;
use proptest::prelude::*;

fn ball(number: u8, pos: Vec2, vel: Vec2) -> Ball {
    let mut ball = Ball::new(BallId::new(number).unwrap(), pos);
    ball.vel = vel;
    ball
}

fn on_table() -> impl Strategy<Value = Vec2> {
    (MIN_X..=MAX_X, MIN_Y..=MAX_Y).prop_map(|(x, y)| Vec2::new(x, y))
}

fn velocity(max: f32) -> impl Strategy<Value = Vec2> {
    (-max..=max, -max..=max).prop_map(|(x, y)| Vec2::new(x, y))
}

/// Fire the break from the head spot at `angle` off the rack line
fn break_shot(state: &mut GameState, angle: f32, pull: f32) {
    let cue = state.cue_position();
    let dir = Vec2::from_angle(angle).rotate((RACK_APEX - cue).normalize());
    let aim = cue + dir * pull;
    tick(
        state,
        &TickInput {
            cursor: cue,
            pressed: true,
            held: true,
            ..Default::default()
        },
    );
    tick(
        state,
        &TickInput {
            cursor: aim,
            held: true,
            ..Default::default()
        },
    );
    tick(
        state,
        &TickInput {
            cursor: aim,
            released: true,
            ..Default::default()
        },
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_speed_never_exceeds_cap(pos in on_table(), vel in velocity(120.0)) {
        let tuning = PhysicsTuning::default();
        let mut b = ball(1, pos, vel);
        integrate_ball(&mut b, &tuning);
        prop_assert!(b.vel.length() <= MAX_BALL_SPEED + 1e-3);
    }

    #[test]
    fn test_lone_ball_stays_inside_rails(pos in on_table(), vel in velocity(MAX_BALL_SPEED)) {
        let tuning = PhysicsTuning::default();
        let mut b = ball(2, pos, vel);
        for _ in 0..120 {
            integrate_ball(&mut b, &tuning);
            prop_assert!(b.pos.x >= MIN_X && b.pos.x <= MAX_X);
            prop_assert!(b.pos.y >= MIN_Y && b.pos.y <= MAX_Y);
        }
    }

    #[test]
    fn test_cluster_against_rail_stays_inside(
        rail in 0usize..4,
        along in 0.3f32..0.7,
        speed in 2.0f32..MAX_BALL_SPEED,
        spread in 0.0f32..4.0,
    ) {
        let tuning = PhysicsTuning::default();
        let mut balls = BallSet::racked();
        for b in balls.iter_mut() {
            b.pocketed = true;
        }

        // Inward normal of the chosen rail and a point on it, away from pockets
        let (inward, rail_point) = match rail {
            0 => (Vec2::X, Vec2::new(MIN_X, MIN_Y + (MAX_Y - MIN_Y) * along)),
            1 => (Vec2::NEG_X, Vec2::new(MAX_X, MIN_Y + (MAX_Y - MIN_Y) * along)),
            2 => (Vec2::Y, Vec2::new(MIN_X + (MAX_X - MIN_X) * along * 0.5, MIN_Y)),
            _ => (Vec2::NEG_Y, Vec2::new(MIN_X + (MAX_X - MIN_X) * (0.5 + along * 0.5), MAX_Y)),
        };

        // A row of four balls: one touching the rail, the rest driven into it
        for (i, number) in [1u8, 2, 3, 4].into_iter().enumerate() {
            let id = BallId::new(number).unwrap();
            let b = &mut balls[id];
            b.pocketed = false;
            b.pos = rail_point + inward * (i as f32 * (BALL_RADIUS * 2.0 + spread));
            b.vel = if i == 0 { Vec2::ZERO } else { -inward * speed };
        }

        for _ in 0..60 {
            step(&mut balls, &tuning);
            for b in balls.on_table() {
                prop_assert!(b.pos.x >= MIN_X && b.pos.x <= MAX_X, "x = {}", b.pos.x);
                prop_assert!(b.pos.y >= MIN_Y && b.pos.y <= MAX_Y, "y = {}", b.pos.y);
            }
        }
    }

    #[test]
    fn test_contact_conserves_momentum(
        angle in 0.0f32..std::f32::consts::TAU,
        gap in 0.5f32..(BALL_RADIUS * 2.0 - 0.01),
        va in velocity(8.0),
        vb in velocity(8.0),
    ) {
        let center = Vec2::new(400.0, 200.0);
        let mut a = ball(1, center, va);
        let mut b = ball(9, center + Vec2::from_angle(angle) * gap, vb);

        prop_assert!(resolve_pair(&mut a, &mut b, MAX_BALL_SPEED));
        let before = va + vb;
        let after = a.vel + b.vel;
        prop_assert!((before - after).length() < 1e-3);
        // Equal masses: kinetic energy is kept too
        let energy = va.length_squared() + vb.length_squared();
        let energy_after = a.vel.length_squared() + b.vel.length_squared();
        prop_assert!((energy - energy_after).abs() < 1e-2);
        prop_assert!(distance(a.pos, b.pos) >= BALL_RADIUS * 2.0);
    }

    #[test]
    fn test_break_never_leaves_overlaps(
        angle in -0.3f32..0.3,
        speed in 4.0f32..MAX_SHOT_SPEED,
    ) {
        let tuning = PhysicsTuning::default();
        let mut balls = BallSet::racked();
        let dir = Vec2::from_angle(angle).rotate(Vec2::X);
        balls.cue_mut().vel = dir * speed;

        for _ in 0..150 {
            step(&mut balls, &tuning);
            let live: Vec<&Ball> = balls.on_table().collect();
            for (i, a) in live.iter().enumerate() {
                prop_assert!(a.vel.length() <= MAX_BALL_SPEED + 1e-3);
                for b in &live[i + 1..] {
                    prop_assert!(distance(a.pos, b.pos) >= BALL_RADIUS * 2.0 - 1e-2);
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn test_group_assignment_is_atomic(
        angle in -0.4f32..0.4,
        pull in 60.0f32..MAX_POWER_PIXELS,
    ) {
        let mut state = GameState::default();
        break_shot(&mut state, angle, pull);

        for _ in 0..1500 {
            tick(&mut state, &TickInput::default());

            let [first, second] = &state.players;
            if state.types_assigned {
                prop_assert!(first.kind.is_assigned());
                prop_assert_eq!(second.kind, first.kind.opponent());
            } else {
                prop_assert_eq!(first.kind, PlayerType::Unassigned);
                prop_assert_eq!(second.kind, PlayerType::Unassigned);
            }

            // Every group ball down after the break counts against its owner
            for player in &state.players {
                let group = match player.kind {
                    PlayerType::Solids => BallKind::Solid,
                    PlayerType::Stripes => BallKind::Stripe,
                    PlayerType::Unassigned => continue,
                };
                let down = state
                    .balls
                    .iter()
                    .filter(|b| b.kind == group && b.pocketed)
                    .count() as u8;
                prop_assert_eq!(player.remaining, BALLS_PER_GROUP - down);
            }

            if !state.balls_moving {
                break;
            }
        }
    }
}
