//! Flappy Gates entry point
//!
//! Headless native runner: plays demo rounds on autopilot and logs what a
//! graphical host would draw. Hosts with a window implement `Presenter` and
//! feed key presses into an `InputLatch` instead.
//!
//! Environment:
//! - `RUST_LOG`: log filter (e.g. `info`, `flappy_gates=debug`)
//! - `FLAPPY_TUNING`: path to a tuning JSON file
//! - `FLAPPY_ROUNDS`: demo rounds to play (default 3)
//! - `FLAPPY_FAST`: set to skip the 16 ms frame pacing

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use flappy_gates::platform::{FixedTicker, InputEvent, InputLatch, Pacer};
use flappy_gates::renderer::{Frame, GameOverScreen, Presenter};
use flappy_gates::{Flow, Screen, Session, Tuning};

/// Demo rounds are cut off after five minutes of simulated play
const MAX_DEMO_FRAMES: u64 = 60 * 60 * 5;

/// Presenter that narrates to the log
#[derive(Default)]
struct LogPresenter {
    last_score: u32,
}

impl Presenter for LogPresenter {
    fn show_menu(&mut self) {
        log::info!("Flappy Gates - press SPACE to start, ESC to exit");
        self.last_score = 0;
    }

    fn draw_frame(&mut self, frame: &Frame) {
        if frame.score != self.last_score {
            log::info!("Score: {}", frame.score);
            self.last_score = frame.score;
        }
        if let Some(avatar) = frame.avatar() {
            log::trace!(
                "avatar y={:.1}, {} bars on screen",
                avatar.y(),
                frame.bars().len()
            );
        }
    }

    fn show_game_over(&mut self, screen: &GameOverScreen) {
        log::info!(
            "Game Over - points {}, high score {}{}",
            screen.summary.score,
            screen.high_score,
            if screen.new_best { " (new!)" } else { "" }
        );
        match serde_json::to_string(screen) {
            Ok(json) => log::debug!("{}", json),
            Err(e) => log::warn!("Could not serialize round summary: {}", e),
        }
    }
}

/// Presses keys the way a player would between autopilot rounds
struct DemoPlayer {
    rounds: usize,
    rounds_started: usize,
    round_frames: u64,
}

impl DemoPlayer {
    fn new(rounds: usize) -> Self {
        Self {
            rounds,
            rounds_started: 0,
            round_frames: 0,
        }
    }

    fn feed(&mut self, session: &Session, latch: &mut InputLatch) {
        match session.screen() {
            Screen::Playing(_) => {
                self.round_frames += 1;
                if self.round_frames > MAX_DEMO_FRAMES {
                    log::info!("Demo round cut off after {} frames", MAX_DEMO_FRAMES);
                    latch.push(InputEvent::Abort);
                    self.round_frames = 0;
                }
            }
            _ if self.rounds_started >= self.rounds => latch.push(InputEvent::Abort),
            _ => {
                self.round_frames = 0;
                self.rounds_started += 1;
                latch.push(InputEvent::Jump);
            }
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Flappy Gates (headless) starting...");

    let tuning = match std::env::var("FLAPPY_TUNING") {
        Ok(path) => Tuning::load(path),
        Err(_) => Tuning::default(),
    };

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });

    let rounds = std::env::var("FLAPPY_ROUNDS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(3);

    let fast = std::env::var_os("FLAPPY_FAST").is_some();
    let mut pacer = if fast {
        Pacer::unthrottled()
    } else {
        Pacer::default()
    };
    let mut ticker = FixedTicker::default();

    log::info!("Session seed: {}, demo rounds: {}", seed, rounds);

    let mut session = match Session::new(tuning, seed) {
        Ok(session) => session.with_autopilot(true),
        Err(e) => {
            log::error!("Unusable tuning: {}", e);
            return;
        }
    };
    let mut presenter = LogPresenter::default();
    let mut latch = InputLatch::new();
    let mut demo = DemoPlayer::new(rounds);
    let mut last = Instant::now();

    session.open(&mut presenter);
    'frames: loop {
        pacer.wait();
        let now = Instant::now();
        let steps = if fast {
            1
        } else {
            ticker.accumulate(now.duration_since(last).as_secs_f32())
        };
        last = now;

        for _ in 0..steps {
            demo.feed(&session, &mut latch);
            if session.step(&mut latch, &mut presenter) == Flow::Exit {
                break 'frames;
            }
        }
    }

    let high = session.high_score();
    log::info!(
        "Played {} rounds, high score {}",
        high.rounds_played(),
        high.best()
    );
    log::debug!("{} key presses overwritten", latch.dropped());
}
