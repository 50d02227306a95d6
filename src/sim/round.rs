//! Round & level controller
//!
//! Tracks the 60-second level window. When it expires the run either advances
//! (score met the level's threshold) or ends. Health reaching zero ends the
//! run immediately, independent of the timer. Both endings are terminal until
//! an explicit restart.

use super::state::{GameEvent, GameState, Phase};
use crate::tuning::Tuning;

/// Score needed to clear the given level
#[inline]
pub fn required_score(tuning: &Tuning, level: u32) -> i64 {
    level as i64 * tuning.score_per_level
}

/// Advance the level clock; resolve expiry into level-up or game over
pub fn run(state: &mut GameState, dt: f32, tuning: &Tuning) {
    state.level_elapsed += dt;
    state.time_left = (tuning.level_time - state.level_elapsed).max(0.0);

    if state.time_left > 0.0 {
        return;
    }

    if state.score >= required_score(tuning, state.level) {
        advance_level(state, tuning);
    } else {
        end_run(state);
    }
}

/// Level cleared: bonus grants, fresh lanes, timer reset
fn advance_level(state: &mut GameState, tuning: &Tuning) {
    state.events.push(GameEvent::LevelComplete {
        level: state.level,
        score: state.score,
    });

    state.level += 1;
    state.score += tuning.level_bonus_score;
    state.apply_health(tuning.level_bonus_health);
    state.patrons.clear();
    state.mugs.clear();
    state.level_elapsed = 0.0;
    state.time_left = tuning.level_time;

    log::info!("level {} reached, score {}", state.level, state.score);
}

/// Terminal: no further ticks run until restart
pub fn end_run(state: &mut GameState) {
    if state.phase == Phase::GameOver {
        return;
    }
    state.phase = Phase::GameOver;
    state.events.push(GameEvent::GameOver {
        score: state.score,
        level: state.level,
    });
    log::info!("game over at level {}, score {}", state.level, state.score);
}
