//! Browser surface (wasm32 only)
//!
//! The JS shell owns the canvas, the DOM scoreboard, and the keyboard; it
//! translates key events into the command methods below, calls `frame` once
//! per animation frame, and renders from the JSON snapshot. The engine never
//! touches the DOM.

use wasm_bindgen::prelude::*;

use crate::engine::{Command, Engine, LaneShift};
use crate::persistence::LocalStorageStore;
use crate::sim::Phase;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("tapkeeper engine loaded");
}

/// Handle exported to the JS shell
#[wasm_bindgen]
pub struct TapGame {
    engine: Engine,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl TapGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TapGame {
        let seed = js_sys::Date::now() as u64;
        let engine = Engine::new(seed, Tuning::default(), Box::new(LocalStorageStore::default()));
        TapGame {
            engine,
            last_time: None,
        }
    }

    /// Start (or restart) a run
    pub fn start(&mut self) {
        let seed = js_sys::Date::now() as u64;
        self.engine.restart(seed);
        self.last_time = None;
    }

    pub fn move_up(&mut self) {
        self.engine.command(Command::Move(LaneShift::Up));
    }

    pub fn move_down(&mut self) {
        self.engine.command(Command::Move(LaneShift::Down));
    }

    /// Fill while held; releasing serves the pour
    pub fn set_fill(&mut self, held: bool) {
        self.engine.command(Command::Fill(held));
    }

    pub fn toggle_pause(&mut self) {
        self.engine.command(Command::Pause);
    }

    /// Advance by one animation frame; `now_ms` is `performance.now()`
    pub fn frame(&mut self, now_ms: f64) {
        let dt = match self.last_time {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 1.0 / 60.0,
        };
        self.last_time = Some(now_ms);
        self.engine.frame(dt);
    }

    /// Read-only snapshot of the full simulation state as JSON
    pub fn snapshot(&self) -> String {
        serde_json::to_string(self.engine.state()).unwrap_or_default()
    }

    pub fn score(&self) -> f64 {
        self.engine.state().score as f64
    }

    pub fn high_score(&self) -> f64 {
        self.engine.state().high_score as f64
    }

    pub fn is_playing(&self) -> bool {
        self.engine.state().phase == Phase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.engine.state().phase == Phase::GameOver
    }
}

impl Default for TapGame {
    fn default() -> Self {
        Self::new()
    }
}
