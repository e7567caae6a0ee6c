//! Menu / round / game-over shell
//!
//! The session sequences rounds and owns the only state that outlives one:
//! the high score. A round is created on start or restart and dropped on
//! abort or game over.

use crate::highscores::HighScore;
use crate::platform::{InputEvent, InputLatch, InputSource, Pacer};
use crate::renderer::{Frame, GameOverScreen, Presenter};
use crate::sim::{Command, RoundState, TickInput, TickOutcome, tick};
use crate::tuning::{Tuning, TuningError};

/// Whether the host should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// What the session is currently showing
#[derive(Debug, Clone)]
pub enum Screen {
    /// Title screen
    Menu,
    /// A round in progress
    Playing(Box<RoundState>),
    /// Results of the last round
    GameOver(GameOverScreen),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Menu => "menu",
            Screen::Playing(_) => "playing",
            Screen::GameOver(_) => "game over",
        }
    }
}

/// Outer game shell
#[derive(Debug)]
pub struct Session {
    tuning: Tuning,
    screen: Screen,
    high: HighScore,
    /// Seed for the next round; advanced on every start
    next_seed: u64,
    /// Let the simulation steer (demo mode)
    autopilot: bool,
}

impl Session {
    /// Rejects tuning no round could be played with
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            screen: Screen::Menu,
            high: HighScore::new(),
            next_seed: seed,
            autopilot: false,
        })
    }

    pub fn with_autopilot(mut self, autopilot: bool) -> Self {
        self.autopilot = autopilot;
        self
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn high_score(&self) -> &HighScore {
        &self.high
    }

    /// The round in progress, if any
    pub fn round(&self) -> Option<&RoundState> {
        match &self.screen {
            Screen::Playing(round) => Some(&**round),
            _ => None,
        }
    }

    /// Enter the title screen
    pub fn open(&mut self, presenter: &mut impl Presenter) {
        self.screen = Screen::Menu;
        presenter.show_menu();
    }

    /// Advance one frame with at most one input event
    pub fn handle(&mut self, event: Option<InputEvent>, presenter: &mut impl Presenter) -> Flow {
        if event == Some(InputEvent::Quit) {
            log::info!("Quit requested from {}", self.screen.name());
            return Flow::Exit;
        }

        match &mut self.screen {
            Screen::Menu | Screen::GameOver(_) => match event {
                Some(InputEvent::Jump) => {
                    self.start_round();
                    Flow::Continue
                }
                Some(InputEvent::Abort) => {
                    log::info!("Exit from {}", self.screen.name());
                    Flow::Exit
                }
                _ => Flow::Continue,
            },
            Screen::Playing(round) => {
                let input = TickInput {
                    command: match event {
                        Some(InputEvent::Jump) => Some(Command::Jump),
                        Some(InputEvent::Abort) => Some(Command::Abort),
                        _ => None,
                    },
                    autopilot: self.autopilot,
                };

                match tick(round, &input) {
                    TickOutcome::Running => {
                        presenter.draw_frame(&Frame::capture(round));
                    }
                    TickOutcome::Ended(summary) => {
                        let new_best = self.high.record(&summary);
                        let screen = GameOverScreen {
                            summary,
                            high_score: self.high.best(),
                            new_best,
                            rounds_played: self.high.rounds_played(),
                        };
                        presenter.show_game_over(&screen);
                        self.screen = Screen::GameOver(screen);
                    }
                    TickOutcome::Aborted => {
                        self.open(presenter);
                    }
                }
                Flow::Continue
            }
        }
    }

    /// Take the latched event (if any) and advance one frame
    pub fn step(&mut self, latch: &mut InputLatch, presenter: &mut impl Presenter) -> Flow {
        let event = latch.take();
        self.handle(event, presenter)
    }

    /// Drive the session until the player exits or `max_frames` pass
    pub fn run(
        &mut self,
        source: &mut impl InputSource,
        presenter: &mut impl Presenter,
        pacer: &mut Pacer,
        max_frames: Option<u64>,
    ) -> Flow {
        let mut latch = InputLatch::new();
        let mut frames = 0u64;

        self.open(presenter);
        let flow = loop {
            latch.fill_from(source);
            if self.step(&mut latch, presenter) == Flow::Exit {
                break Flow::Exit;
            }

            frames += 1;
            if max_frames.is_some_and(|max| frames >= max) {
                break Flow::Continue;
            }
            pacer.wait();
        };
        log::debug!(
            "Session ran {} frames, {} key presses overwritten",
            frames,
            latch.dropped()
        );
        flow
    }

    fn start_round(&mut self) {
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        match RoundState::new(seed, self.tuning.clone()) {
            Ok(round) => {
                log::info!("Round starting with seed: {}", seed);
                self.screen = Screen::Playing(Box::new(round));
            }
            Err(e) => log::error!("Cannot start round: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        menus: usize,
        frames: usize,
        game_overs: Vec<GameOverScreen>,
    }

    impl Presenter for Counter {
        fn show_menu(&mut self) {
            self.menus += 1;
        }

        fn draw_frame(&mut self, _frame: &Frame) {
            self.frames += 1;
        }

        fn show_game_over(&mut self, screen: &GameOverScreen) {
            self.game_overs.push(screen.clone());
        }
    }

    #[test]
    fn test_menu_transitions() {
        let mut presenter = Counter::default();
        let mut session = Session::new(Tuning::default(), 1).unwrap();
        session.open(&mut presenter);
        assert_eq!(presenter.menus, 1);

        assert_eq!(session.handle(None, &mut presenter), Flow::Continue);
        assert!(matches!(session.screen(), Screen::Menu));

        assert_eq!(
            session.handle(Some(InputEvent::Jump), &mut presenter),
            Flow::Continue
        );
        assert!(session.round().is_some());
    }

    #[test]
    fn test_escape_in_menu_exits() {
        let mut presenter = Counter::default();
        let mut session = Session::new(Tuning::default(), 1).unwrap();
        assert_eq!(
            session.handle(Some(InputEvent::Abort), &mut presenter),
            Flow::Exit
        );
    }

    #[test]
    fn test_abort_returns_to_menu_without_scoring() {
        let mut presenter = Counter::default();
        let mut session = Session::new(Tuning::default(), 1).unwrap();
        session.handle(Some(InputEvent::Jump), &mut presenter);
        session.handle(None, &mut presenter);
        assert_eq!(presenter.frames, 1);

        session.handle(Some(InputEvent::Abort), &mut presenter);
        assert!(matches!(session.screen(), Screen::Menu));
        assert_eq!(presenter.menus, 1);
        assert_eq!(session.high_score().rounds_played(), 0);
    }

    #[test]
    fn test_collision_reports_game_over_and_high_score() {
        let mut presenter = Counter::default();
        let mut session = Session::new(Tuning::default(), 1).unwrap();
        session.handle(Some(InputEvent::Jump), &mut presenter);

        // Free fall reaches the floor on the 39th tick
        for _ in 0..39 {
            session.handle(None, &mut presenter);
        }
        assert!(matches!(session.screen(), Screen::GameOver(_)));
        assert_eq!(presenter.frames, 38);
        assert_eq!(presenter.game_overs.len(), 1);

        let screen = &presenter.game_overs[0];
        assert_eq!(screen.summary.score, 0);
        assert_eq!(screen.high_score, 0);
        assert!(!screen.new_best);
        assert_eq!(screen.rounds_played, 1);

        // Space restarts with a fresh round
        session.handle(Some(InputEvent::Jump), &mut presenter);
        assert_eq!(session.round().map(|r| r.frame), Some(0));
    }

    #[test]
    fn test_quit_exits_from_any_screen() {
        let mut presenter = Counter::default();
        let mut session = Session::new(Tuning::default(), 1).unwrap();
        session.handle(Some(InputEvent::Jump), &mut presenter);
        assert_eq!(
            session.handle(Some(InputEvent::Quit), &mut presenter),
            Flow::Exit
        );
    }

    #[test]
    fn test_rejected_tuning_never_reaches_a_round() {
        let tuning = Tuning {
            playfield_height: 300.0,
            ..Default::default()
        };
        assert!(matches!(
            Session::new(tuning, 1),
            Err(TuningError::GateDoesNotFit { .. })
        ));

        let tuning = Tuning {
            gate_gap: 0.0,
            ..Default::default()
        };
        assert_eq!(
            Session::new(tuning, 1).err().map(|e| e.to_string()),
            Some("gate_gap must be positive".to_string())
        );
    }

    #[test]
    fn test_seeds_advance_per_round() {
        let mut presenter = Counter::default();
        let mut session = Session::new(Tuning::default(), 40).unwrap();
        session.handle(Some(InputEvent::Jump), &mut presenter);
        assert_eq!(session.round().map(|r| r.seed), Some(40));
        session.handle(Some(InputEvent::Abort), &mut presenter);
        session.handle(Some(InputEvent::Jump), &mut presenter);
        assert_eq!(session.round().map(|r| r.seed), Some(41));
    }
}
