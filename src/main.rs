//! Tapkeeper entry point
//!
//! The browser shell drives the engine through the `web` module; the native
//! binary runs a scripted headless demo so the simulation can be exercised
//! without a display surface.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tapkeeper::persistence::MemoryStore;
    use tapkeeper::sim::Phase;
    use tapkeeper::{Command, Engine, Tuning};

    env_logger::init();
    log::info!("tapkeeper (native) headless demo starting...");

    let mut engine = Engine::new(0xC0C0A, Tuning::default(), Box::new(MemoryStore::default()));
    engine.command(Command::Start);

    let dt = 1.0 / 60.0;
    let mut frames = 0u32;
    // Two level windows is plenty for the demo bot
    while engine.state().phase == Phase::Playing && frames < 2 * 60 * 60 {
        drive_bot(&mut engine);
        engine.frame(dt);
        frames += 1;
    }

    let state = engine.state();
    println!(
        "demo over: level {}, score {}, {} serves ({} perfect), max combo {}, {:.1} health",
        state.level,
        state.score,
        state.total_serves,
        state.perfect_serves,
        state.max_combo,
        state.health,
    );
}

/// A naive player: chase the first open patron's lane, pour to 90, release
#[cfg(not(target_arch = "wasm32"))]
fn drive_bot(engine: &mut tapkeeper::Engine) {
    use tapkeeper::{Command, LaneShift};

    let state = engine.state();
    let target = state
        .patrons
        .iter()
        .find(|p| p.awaiting_service())
        .map(|p| p.lane);

    let Some(lane) = target else {
        engine.command(Command::Fill(false));
        return;
    };

    if lane == state.bartender.lane {
        if state.lane_has_live_mug(lane) {
            engine.command(Command::Fill(false));
        } else {
            engine.command(Command::Fill(state.bartender.fill_level < 90.0));
        }
    } else {
        let shift = if lane < state.bartender.lane {
            LaneShift::Up
        } else {
            LaneShift::Down
        };
        // Moving requires an idle bartender, so stop pouring first
        engine.command(Command::Fill(false));
        engine.command(Command::Move(shift));
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
