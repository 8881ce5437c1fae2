//! Eight Ball headless runner
//!
//! Plays a seeded session with random shots until the game is decided or the
//! tick cap runs out, then prints the final snapshot as JSON.
//!
//! Usage: `eight-ball [settings.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod runner {
    use std::path::Path;

    use eight_ball::Settings;
    use eight_ball::consts::*;
    use eight_ball::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    /// Ten minutes of play at 60 Hz
    const MAX_TICKS: u64 = 60 * 60 * 10;
    const DEFAULT_SEED: u64 = 8;

    /// Press, drag and release inputs for one shot
    fn plan_shot(state: &GameState, rng: &mut Pcg32) -> [TickInput; 3] {
        let cue = state.cue_position();
        let max_pull = state.tuning().max_power_pixels;

        // Mostly aim at a ball still on the table, sometimes anywhere
        let targets: Vec<Vec2> = state
            .balls
            .on_table()
            .filter(|b| b.id.number() != 0)
            .map(|b| b.pos)
            .collect();
        let dir = match targets.get(rng.random_range(0..targets.len().max(1))) {
            Some(&target) if rng.random_bool(0.8) => {
                let jitter = rng.random_range(-0.05..0.05);
                Vec2::from_angle(jitter).rotate((target - cue).normalize_or(Vec2::X))
            }
            _ => Vec2::from_angle(rng.random_range(0.0..std::f32::consts::TAU)),
        };

        let pull = rng.random_range(max_pull * 0.25..=max_pull);
        let aim_point = cue + dir * pull;

        [
            TickInput {
                cursor: cue,
                pressed: true,
                held: true,
                ..Default::default()
            },
            TickInput {
                cursor: aim_point,
                held: true,
                ..Default::default()
            },
            TickInput {
                cursor: aim_point,
                released: true,
                ..Default::default()
            },
        ]
    }

    fn plan_placement(rng: &mut Pcg32) -> TickInput {
        TickInput {
            cursor: Vec2::new(
                rng.random_range(MIN_X + 1.0..MAX_X - 1.0),
                rng.random_range(MIN_Y + 1.0..MAX_Y - 1.0),
            ),
            pressed: true,
            ..Default::default()
        }
    }

    pub fn run() {
        env_logger::init();

        let mut args = std::env::args().skip(1);
        let settings_path = args.next();
        let seed = match args.next().map(|s| s.parse::<u64>()) {
            Some(Ok(seed)) => seed,
            Some(Err(e)) => {
                log::warn!("Bad seed ({}), using {}", e, DEFAULT_SEED);
                DEFAULT_SEED
            }
            None => DEFAULT_SEED,
        };

        let settings = Settings::load_or_default(settings_path.as_deref().map(Path::new));
        log::info!("Eight Ball (headless) starting with seed {}", seed);

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut state = GameState::new(settings);
        let mut queued: Vec<TickInput> = Vec::new();
        let mut shots = 0u32;
        let mut pocketed = 0u32;

        while state.time_ticks < MAX_TICKS && !state.phase.is_over() {
            if queued.is_empty() && !state.balls_moving {
                match state.phase {
                    GamePhase::Scratch => queued.push(plan_placement(&mut rng)),
                    GamePhase::Start | GamePhase::Playing => {
                        let mut shot = plan_shot(&state, &mut rng).to_vec();
                        shot.reverse();
                        queued = shot;
                        shots += 1;
                    }
                    GamePhase::Won | GamePhase::Lost => {}
                }
            }

            let input = queued.pop().unwrap_or_default();
            tick(&mut state, &input);

            for event in &state.events {
                match event {
                    GameEvent::BallPocketed { .. } => pocketed += 1,
                    GameEvent::TurnPassed { to } => {
                        log::debug!("Turn {}: {}", shots, state.players[*to].name)
                    }
                    _ => {}
                }
            }
        }

        log::info!(
            "Finished after {} ticks, {} shots, {} balls pocketed: {}",
            state.time_ticks,
            shots,
            pocketed,
            state.status
        );

        match serde_json::to_string_pretty(&state.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    runner::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on the web
}
