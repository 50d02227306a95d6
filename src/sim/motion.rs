//! Motion & lifecycle updater
//!
//! Exactly one behavior applies to each patron per tick, selected by its
//! state variant. Mugs move according to their travel stage. Breach handling
//! (an unserved patron reaching the bartender) runs here, before the generic
//! out-of-bounds retirement pass.

use super::difficulty;
use super::state::{FailureKind, GameState, MugState, PatronState};
use crate::consts::*;
use crate::tuning::Tuning;

pub fn run(state: &mut GameState, dt: f32, tuning: &Tuning) {
    update_patrons(state, dt, tuning);
    update_mugs(state, dt, tuning);
    handle_breaches(state, tuning);
    retire_patrons(state);
}

fn update_patrons(state: &mut GameState, dt: f32, tuning: &Tuning) {
    let mut timeouts = 0u32;

    for patron in &mut state.patrons {
        match patron.state {
            PatronState::Drinking { progress } => {
                let progress = progress + dt;
                patron.state = if progress >= tuning.drinking_time {
                    PatronState::Served
                } else {
                    PatronState::Drinking { progress }
                };
            }
            PatronState::Served => {
                patron.pos.x += tuning.served_drift_speed * dt;
            }
            PatronState::Waiting { waited } => {
                let waited = waited + dt;
                if waited >= patron.patience {
                    // Out of patience: leaves unhappily
                    patron.state = PatronState::Served;
                    timeouts += 1;
                } else {
                    patron.state = PatronState::Waiting { waited };
                }
            }
            PatronState::Approaching { step_timer } => {
                let mut step_timer = step_timer + dt;
                while step_timer >= tuning.step_interval {
                    patron.pos.x -= patron.speed * tuning.step_interval;
                    step_timer -= tuning.step_interval;
                }
                patron.state = PatronState::Approaching { step_timer };
            }
        }
    }

    for _ in 0..timeouts {
        state.record_failure(FailureKind::Timeout);
        state.apply_health(-tuning.timeout_penalty);
    }
}

fn update_mugs(state: &mut GameState, dt: f32, tuning: &Tuning) {
    let return_speed = difficulty::mug_return_speed(tuning, state.level);
    for mug in &mut state.mugs {
        match mug.state {
            MugState::SlidingForward => mug.pos.x += mug.speed * dt,
            MugState::SlidingBack => mug.pos.x -= return_speed * dt,
            // Parked mugs are repositioned by the collision pass
            MugState::AtPatron | MugState::Empty => {}
        }
    }
}

/// Unserved, non-drinking patrons that reach the bartender cost health and
/// leave the store immediately
fn handle_breaches(state: &mut GameState, tuning: &Tuning) {
    let before = state.patrons.len();
    state
        .patrons
        .retain(|p| !(p.awaiting_service() && p.pos.x <= BARTENDER_X + BREACH_MARGIN));
    let breached = (before - state.patrons.len()) as f32;
    if breached > 0.0 {
        state.apply_health(-tuning.breach_penalty * breached);
    }
}

/// Generic playfield-bounds filter: served patrons retire off the far edge,
/// anything else retires once it is well past the bartender
fn retire_patrons(state: &mut GameState) {
    state.patrons.retain(|p| {
        if p.is_served() {
            p.pos.x < PLAYFIELD_WIDTH + EXIT_MARGIN
        } else {
            p.pos.x > BARTENDER_X - NEAR_EXIT_MARGIN
        }
    });
}
