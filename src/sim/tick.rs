//! Per-frame simulation tick
//!
//! One call advances the whole simulation by the elapsed time, in a fixed
//! component order: round controller, input, spawner, motion, collision
//! resolution, bartender, notice expiry, high-score shadow, health check.
//! Terminal and paused phases return without advancing the clock.

use rand_pcg::Pcg32;

use super::bartender::{self, LaneShift};
use super::state::{GameEvent, GameState, Phase};
use super::{collision, motion, round, spawn};
use crate::consts::{COMBO_MILESTONES, NOTICE_TTL};
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// One-shot lane change request
    pub shift: Option<LaneShift>,
    /// Fill input is currently held (serve fires on release)
    pub fill_held: bool,
    /// One-shot pause toggle
    pub pause: bool,
}

/// Advance the game state by one frame's elapsed time
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, rng: &mut Pcg32, tuning: &Tuning) {
    state.events.clear();

    if input.pause {
        match state.phase {
            Phase::Playing => {
                state.phase = Phase::Paused;
                state.events.push(GameEvent::Paused);
                return;
            }
            Phase::Paused => {
                state.phase = Phase::Playing;
                state.events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    if state.phase != Phase::Playing {
        return;
    }

    state.clock += dt as f64;

    // Level expiry is judged on the score entering this tick
    round::run(state, dt, tuning);
    if state.phase != Phase::Playing {
        return;
    }

    if let Some(shift) = input.shift {
        bartender::move_lane(state, shift);
    }

    spawn::run(state, dt, rng, tuning);
    motion::run(state, dt, tuning);

    let combo_before = state.combo;
    let res = collision::resolve(state, tuning);
    state.score += res.score;
    state.apply_health(res.health_gain - res.health_loss);

    for &milestone in COMBO_MILESTONES.iter() {
        if combo_before < milestone && state.combo >= milestone {
            state.events.push(GameEvent::ComboMilestone { combo: milestone });
        }
    }

    bartender::run(state, input.fill_held, dt, tuning);

    let now = state.clock;
    state.notices.retain(|n| now - n.at < NOTICE_TTL);

    if state.score > state.high_score {
        state.high_score = state.score;
    }

    if state.health <= 0.0 {
        round::end_run(state);
    }
}
