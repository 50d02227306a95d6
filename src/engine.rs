//! Engine wrapper around the simulation
//!
//! Owns the game state, the seeded RNG, and the balance data; assembles the
//! per-tick input from commands (one-shots are consumed each frame, the held
//! fill level persists); dispatches tick events to the registered lifecycle
//! hooks; and writes the high score through the persistence port whenever it
//! rises. The host schedules `frame` however it likes - an animation-frame
//! callback in the browser, a plain loop in tests.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::persistence::HighScoreStore;
use crate::sim::{self, GameEvent, GameState, Phase, TickInput};
use crate::tuning::Tuning;

pub use crate::sim::LaneShift;

/// The full input contract: everything a host shell can ask of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a new run (also restarts after game over)
    Start,
    /// Move the bartender one lane (honored while idle and playing)
    Move(LaneShift),
    /// Fill while held; releasing serves the pour
    Fill(bool),
    /// Toggle pause
    Pause,
}

/// Optional lifecycle hooks; every one is a no-op when unset and must not
/// block the frame
#[derive(Default)]
pub struct Hooks {
    pub on_level_complete: Option<Box<dyn FnMut(u32, i64)>>,
    pub on_game_over: Option<Box<dyn FnMut(i64, u32)>>,
    pub on_combo_milestone: Option<Box<dyn FnMut(u32)>>,
    pub on_pause: Option<Box<dyn FnMut()>>,
    pub on_resume: Option<Box<dyn FnMut()>>,
}

pub struct Engine {
    state: GameState,
    tuning: Tuning,
    rng: Pcg32,
    store: Box<dyn HighScoreStore>,
    hooks: Hooks,
    input: TickInput,
    seed: u64,
    /// Last value written through the store
    saved_high: i64,
}

impl Engine {
    pub fn new(seed: u64, tuning: Tuning, store: Box<dyn HighScoreStore>) -> Self {
        let saved_high = store.load();
        let mut state = GameState::new(seed, &tuning);
        state.high_score = saved_high;
        Self {
            state,
            rng: Pcg32::seed_from_u64(seed),
            store,
            hooks: Hooks::default(),
            input: TickInput::default(),
            seed,
            saved_high,
            tuning,
        }
    }

    pub fn set_hooks(&mut self, hooks: Hooks) {
        self.hooks = hooks;
    }

    pub fn command(&mut self, cmd: Command) {
        match cmd {
            Command::Start => self.restart(self.seed),
            Command::Move(shift) => self.input.shift = Some(shift),
            Command::Fill(held) => self.input.fill_held = held,
            Command::Pause => self.input.pause = true,
        }
    }

    /// Begin a fresh run on the given seed; the persisted high score carries
    /// over, everything else resets
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.state = GameState::new(seed, &self.tuning);
        self.state.high_score = self.saved_high;
        self.state.phase = Phase::Playing;
        self.rng = Pcg32::seed_from_u64(seed);
        self.input = TickInput::default();
        log::info!("run started with seed {}", seed);
    }

    /// Advance by one frame's elapsed time (seconds)
    pub fn frame(&mut self, dt: f32) {
        // Guard against tab-switch sized gaps
        let dt = dt.clamp(0.0, 0.1);
        let input = self.input;
        sim::tick(&mut self.state, &input, dt, &mut self.rng, &self.tuning);

        // One-shots are consumed; the held fill state persists
        self.input.shift = None;
        self.input.pause = false;

        self.dispatch_events();
        self.persist_high_score();
    }

    /// Read-only snapshot for the renderer
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    fn dispatch_events(&mut self) {
        for event in self.state.events.clone() {
            match event {
                GameEvent::LevelComplete { level, score } => {
                    if let Some(hook) = self.hooks.on_level_complete.as_mut() {
                        hook(level, score);
                    }
                }
                GameEvent::GameOver { score, level } => {
                    if let Some(hook) = self.hooks.on_game_over.as_mut() {
                        hook(score, level);
                    }
                }
                GameEvent::ComboMilestone { combo } => {
                    if let Some(hook) = self.hooks.on_combo_milestone.as_mut() {
                        hook(combo);
                    }
                }
                GameEvent::Paused => {
                    if let Some(hook) = self.hooks.on_pause.as_mut() {
                        hook();
                    }
                }
                GameEvent::Resumed => {
                    if let Some(hook) = self.hooks.on_resume.as_mut() {
                        hook();
                    }
                }
            }
        }
    }

    fn persist_high_score(&mut self) {
        if self.state.high_score > self.saved_high {
            self.saved_high = self.state.high_score;
            self.store.save(self.saved_high);
        }
    }
}
