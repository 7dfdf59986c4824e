//! Brick Break headless runner
//!
//! Plays a session with an autopilot standing in for the pointer, logs every
//! event and prints the final snapshot as JSON.
//!
//! Usage: `brick-break [TUNING.json] [--ticks N] [--seed S]`

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use brick_break::Tuning;
use brick_break::consts::*;
use brick_break::sim::{FixedStep, GameEvent, GamePhase, GameSession, Snapshot, TickInput, tick};

const PLAYFIELD: Vec2 = Vec2::new(400.0, 600.0);
/// Nominal host frame time (60 Hz display)
const FRAME_DT: f32 = 1.0 / 60.0;

struct Options {
    tuning: Tuning,
    max_ticks: u64,
    seed: u64,
}

fn parse_args() -> Options {
    let mut options = Options {
        tuning: Tuning::default(),
        max_ticks: 120 * 120,
        seed: 12345,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ticks" => match args.next().and_then(|v| v.parse().ok()) {
                Some(n) => options.max_ticks = n,
                None => log::warn!("--ticks expects a number, keeping {}", options.max_ticks),
            },
            "--seed" => match args.next().and_then(|v| v.parse().ok()) {
                Some(s) => options.seed = s,
                None => log::warn!("--seed expects a number, keeping {}", options.seed),
            },
            path => options.tuning = Tuning::load(path),
        }
    }

    options
}

/// Pointer that chases the ball, a little late and a little off
struct Autopilot {
    rng: Pcg32,
    pointer_x: f32,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            pointer_x: PLAYFIELD.x / 2.0,
        }
    }

    fn input(&mut self, session: &GameSession) -> TickInput {
        let ball = &session.ball;
        let target = if ball.direction.y > 0.0 {
            ball.position.x + self.rng.random_range(-30.0..30.0)
        } else {
            PLAYFIELD.x / 2.0
        };
        // Ease toward the target instead of teleporting
        self.pointer_x += (target - self.pointer_x) * 0.25;

        TickInput {
            playfield: PLAYFIELD,
            pointer_x: Some(self.pointer_x),
            primary_action: session.current_phase() == GamePhase::Ready && session.time_ticks > 30,
            reset: false,
        }
    }

    /// Host frame times wobble around the display rate
    fn frame_dt(&mut self) -> f32 {
        FRAME_DT * self.rng.random_range(0.8..1.25)
    }
}

fn main() {
    env_logger::init();
    log::info!("Brick Break (headless) starting...");

    let options = parse_args();
    let mut session = GameSession::new(options.tuning);
    let mut autopilot = Autopilot::new(options.seed);
    let mut clock = FixedStep::default();

    let mut paddle_hits = 0u32;
    let mut blocks_broken = 0u32;

    'frames: loop {
        for _ in 0..clock.steps(autopilot.frame_dt()) {
            let input = autopilot.input(&session);
            tick(&mut session, &input, SIM_DT);

            let now = session.time_ticks;
            session.dispatch(&mut |event: &GameEvent| {
                match event {
                    GameEvent::PaddleHit => paddle_hits += 1,
                    GameEvent::BlockBreak { .. } => blocks_broken += 1,
                    _ => {}
                }
                log::info!("[tick {}] {}", now, event);
            });

            if session.current_phase().is_terminal() || session.time_ticks >= options.max_ticks {
                break 'frames;
            }
        }
    }

    log::info!(
        "Finished in {:?} after {} ticks: {} paddle hits, {} blocks broken",
        session.current_phase(),
        session.time_ticks,
        paddle_hits,
        blocks_broken
    );

    match serde_json::to_string_pretty(&Snapshot::capture(&session)) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
