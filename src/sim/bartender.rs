//! Bartender controller
//!
//! A 3-state machine: Idle, Filling while the fill input is held, and a short
//! SlidingMug recovery after a serve. Lane changes are only honored while
//! idle. Releasing a non-empty pour creates a mug at the tap.

use glam::Vec2;

use super::difficulty;
use super::state::{BartenderState, GameState, Mug, MugState};
use crate::consts::*;
use crate::lane_y;
use crate::tuning::Tuning;

/// Direction of a lane change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneShift {
    Up,
    Down,
}

/// Move one lane up or down, bounded; only honored while idle
pub fn move_lane(state: &mut GameState, shift: LaneShift) {
    if !state.is_playing() || state.bartender.state != BartenderState::Idle {
        return;
    }
    let lane = state.bartender.lane;
    state.bartender.lane = match shift {
        LaneShift::Up => lane.saturating_sub(1),
        LaneShift::Down => (lane + 1).min(LANE_COUNT - 1),
    };
}

/// Advance the fill/serve state machine for one tick
pub fn run(state: &mut GameState, fill_held: bool, dt: f32, tuning: &Tuning) {
    if fill_held {
        state.bartender.state = BartenderState::Filling;
        state.bartender.fill_level =
            (state.bartender.fill_level + tuning.fill_rate * dt).min(tuning.max_fill);
        return;
    }

    match state.bartender.state {
        BartenderState::Filling => {
            if state.bartender.fill_level > 0.0 {
                release_mug(state, tuning);
            } else {
                state.bartender.state = BartenderState::Idle;
            }
        }
        BartenderState::SlidingMug => {
            state.bartender.recover_timer -= dt;
            if state.bartender.recover_timer <= 0.0 {
                state.bartender.state = BartenderState::Idle;
                state.bartender.recover_timer = 0.0;
            }
        }
        BartenderState::Idle => {}
    }
}

/// Pour released: the fill becomes a mug sliding down the bartender's lane
fn release_mug(state: &mut GameState, tuning: &Tuning) {
    let lane = state.bartender.lane;
    let target = state.waiting_patron_in_lane(lane).map(|p| p.id);
    let id = state.alloc_mug_id();
    state.mugs.push(Mug {
        id,
        pos: Vec2::new(BARTENDER_X + MUG_LAUNCH_OFFSET, lane_y(lane)),
        lane,
        speed: difficulty::mug_speed(tuning, state.level),
        fill_level: state.bartender.fill_level,
        state: MugState::SlidingForward,
        is_empty: false,
        target_patron: target,
    });

    state.bartender.fill_level = 0.0;
    state.bartender.state = BartenderState::SlidingMug;
    state.bartender.recover_timer = tuning.serve_recover_delay;
}
