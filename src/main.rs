//! Headless demo driver
//!
//! Runs the simulation core with a scripted input pattern on the same
//! accumulator loop a real frontend would use, then reports the score.
//! Useful for profiling the sim and for eyeballing log output; a
//! renderer plugs in by replacing the scripted input and the sleep.

use std::time::{Duration, Instant};

use cloudhop::consts::{MAX_SUBSTEPS, TICK_RATE};
use cloudhop::highscores::FileScoreStore;
use cloudhop::input::{ActionState, InputSnapshot};
use cloudhop::sim::{GameState, Stage};
use cloudhop::SoundQueue;

const SCORE_FILE: &str = "cloudhop_scores.json";

/// World scroll speed ramps up over the first two minutes of a run
fn move_speed(ticks: u64) -> f32 {
    1.0 + (ticks as f32 / (120.0 * TICK_RATE as f32)).min(1.0) * 0.5
}

/// A canned input pattern that keeps the demo player hopping
fn scripted_input(ticks: u64) -> InputSnapshot {
    let mut input = InputSnapshot::default();

    let phase = ticks % 180;
    if phase < 60 {
        input.right = ActionState::Down;
    } else if phase < 120 {
        input.left = ActionState::Down;
    }
    input.jump = match ticks % 45 {
        0 => ActionState::Pressed,
        20 => ActionState::Released,
        1..=19 => ActionState::Down,
        _ => ActionState::Up,
    };
    input
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            let nanos = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.subsec_nanos())
                .unwrap_or(0);
            nanos as u64
        });
    log::info!("starting demo run, seed {seed}");

    let mut store = FileScoreStore::new(SCORE_FILE);
    let mut state = GameState::new(&store);
    let mut stage = Stage::new(seed);
    let mut sounds = SoundQueue::new();

    let tick_duration = Duration::from_secs_f64(1.0 / TICK_RATE as f64);
    let mut accumulator = 0.0f32;
    let mut last = Instant::now();
    let mut ticks: u64 = 0;

    loop {
        let now = Instant::now();
        accumulator += now.duration_since(last).as_secs_f32() * TICK_RATE as f32;
        last = now;

        // Clamp so a stall never produces a tick spiral
        accumulator = accumulator.min(MAX_SUBSTEPS as f32);

        let mut over = false;
        while accumulator >= 1.0 {
            let input = scripted_input(ticks);
            over |= stage.tick(&input, move_speed(ticks), &mut state, &mut sounds);
            ticks += 1;
            accumulator -= 1.0;
        }

        for effect in sounds.take() {
            log::debug!("sound: {effect:?}");
        }

        stage.interpolate(move_speed(ticks), accumulator);

        if over {
            break;
        }
        std::thread::sleep(tick_duration);
    }

    state.update_high_score(&mut store);
    println!(
        "run over after {ticks} ticks: score {}, high score {}",
        state.score(),
        state.high_score()
    );
}
