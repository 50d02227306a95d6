//! Mug collision & resolution pass
//!
//! Runs once per tick, iterating mugs newest-to-oldest so a mug released this
//! tick never acts on stale state. Each mug takes exactly one action. Score
//! and health deltas are summed into a `Resolution` and applied by the tick,
//! clamped, after the whole pass.

use glam::Vec2;

use super::state::{FailureKind, GameState, MugState, PatronState};
use crate::consts::*;
use crate::lane_y;
use crate::tuning::Tuning;

/// Summed effects of one resolution pass
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolution {
    pub score: i64,
    pub health_gain: f32,
    pub health_loss: f32,
}

pub fn resolve(state: &mut GameState, tuning: &Tuning) -> Resolution {
    let mut res = Resolution::default();

    let mut i = state.mugs.len();
    while i > 0 {
        i -= 1;
        match state.mugs[i].state {
            MugState::SlidingForward => forward_mug(state, i, &mut res, tuning),
            MugState::AtPatron => parked_mug(state, i),
            MugState::SlidingBack => returning_mug(state, i, &mut res, tuning),
            MugState::Empty => {}
        }
    }

    res
}

/// Hit test against the lane's patrons, else check for the far edge
fn forward_mug(state: &mut GameState, i: usize, res: &mut Resolution, tuning: &Tuning) {
    let (mug_x, lane) = {
        let m = &state.mugs[i];
        (m.pos.x, m.lane)
    };

    let hit = state.patrons.iter().position(|p| {
        p.lane == lane
            && mug_x >= p.pos.x - HIT_WINDOW_BEHIND
            && mug_x <= p.pos.x + HIT_WINDOW_AHEAD
            && p.awaiting_service()
    });

    if let Some(j) = hit {
        serve_patron(state, i, j, res, tuning);
    } else if mug_x >= PLAYFIELD_WIDTH - FAR_EDGE_MARGIN {
        state.mugs.remove(i);
        res.health_loss += tuning.miss_penalty;
        state.record_failure(FailureKind::Miss);
    }
}

/// A successful serve: score it, knock the patron back into drinking, park
/// the mug on them, and re-space the queue behind
fn serve_patron(state: &mut GameState, i: usize, j: usize, res: &mut Resolution, tuning: &Tuning) {
    let fill = state.mugs[i].fill_level;

    // A serve inside the window scores at the current streak, then extends
    // it; anything else starts a fresh streak of one.
    let chained = state.combo > 0 && state.clock - state.last_serve_at < tuning.combo_window;
    let streak = if chained { state.combo } else { 1 };
    state.combo = if chained { state.combo + 1 } else { 1 };
    state.last_serve_at = state.clock;
    state.max_combo = state.max_combo.max(state.combo);
    state.total_serves += 1;

    let accepted = fill >= tuning.min_acceptable_fill;
    if accepted {
        state.perfect_serves += 1;
    }

    let base = if accepted {
        fill.floor() as i64 + tuning.fill_score_bonus
    } else {
        tuning.low_fill_score
    };
    let combo_bonus = if streak > 1 {
        (base as f32 * (streak - 1) as f32 * tuning.combo_bonus_rate).floor() as i64
    } else {
        0
    };
    let multiplier = 1.0 + (streak - 1) as f32 * tuning.combo_multiplier_rate;
    res.score += ((base + combo_bonus) as f32 * multiplier).floor() as i64;
    res.health_gain += tuning.serve_health_gain;

    // Knockback scales with how full the pour was
    let anchor_x = state.patrons[j].pos.x;
    let knockback = KNOCKBACK_BASE + fill.min(KNOCKBACK_FILL_CAP).floor();
    let patron = &mut state.patrons[j];
    patron.pos.x += knockback;
    patron.state = PatronState::Drinking { progress: 0.0 };
    let (served_pos, served_id, served_lane) = (patron.pos, patron.id, patron.lane);

    let mug = &mut state.mugs[i];
    mug.state = MugState::AtPatron;
    mug.pos = served_pos;
    mug.target_patron = Some(served_id);

    push_queue(state, j, served_lane, anchor_x, served_pos.x);
}

/// Chain-push patrons queued behind a knocked-back patron so minimum spacing
/// holds, in ascending x so pushes propagate down the line
fn push_queue(state: &mut GameState, served_idx: usize, lane: usize, anchor_x: f32, from_x: f32) {
    let mut behind: Vec<(usize, f32)> = state
        .patrons
        .iter()
        .enumerate()
        .filter(|(k, p)| *k != served_idx && p.lane == lane && !p.is_served() && p.pos.x >= anchor_x)
        .map(|(k, p)| (k, p.pos.x))
        .collect();
    behind.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut last_x = from_x;
    for (k, x) in behind {
        if x - last_x < MIN_PATRON_SPACING {
            state.patrons[k].pos.x = last_x + MIN_PATRON_SPACING;
        }
        last_x = state.patrons[k].pos.x;
    }
}

/// Follow the target patron while they are on screen; once they leave, the
/// drained mug starts its return slide
fn parked_mug(state: &mut GameState, i: usize) {
    let follow: Option<Vec2> = state.mugs[i]
        .target_patron
        .and_then(|id| state.patron_by_id(id))
        .filter(|p| p.pos.x < PLAYFIELD_WIDTH)
        .map(|p| p.pos);

    match follow {
        Some(pos) => state.mugs[i].pos = pos,
        None => {
            let mug = &mut state.mugs[i];
            mug.state = MugState::SlidingBack;
            mug.is_empty = true;
            mug.fill_level = 0.0;
        }
    }
}

/// Catch-window test against the bartender's position and lane
fn returning_mug(state: &mut GameState, i: usize, res: &mut Resolution, tuning: &Tuning) {
    let (mug_x, mug_y) = {
        let m = &state.mugs[i];
        (m.pos.x, m.pos.y)
    };
    let bartender_y = lane_y(state.bartender.lane);

    let in_band = mug_x <= BARTENDER_X + CATCH_RANGE && mug_x >= BARTENDER_X - CATCH_REACH_BEHIND;
    if in_band && (mug_y - bartender_y).abs() < CATCH_LANE_TOLERANCE {
        state.mugs.remove(i);
        res.score += tuning.catch_bonus;
    } else if mug_x <= BARTENDER_X - CATCH_MISS_X {
        // Penalty scales with the streak it just broke
        res.score -= tuning.catch_miss_score_rate * state.combo as i64;
        res.health_loss += tuning.catch_miss_penalty;
        state.record_failure(FailureKind::CatchMiss);
        state.mugs.remove(i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Mug, Patron, Phase};

    fn setup() -> (GameState, Tuning) {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.phase = Phase::Playing;
        (state, tuning)
    }

    fn push_patron(state: &mut GameState, lane: usize, x: f32, ps: PatronState) -> u32 {
        let id = state.alloc_patron_id();
        state.patrons.push(Patron {
            id,
            pos: Vec2::new(x, crate::lane_y(lane)),
            lane,
            speed: 40.0,
            patience: 2.8,
            sprite_index: 0,
            state: ps,
        });
        id
    }

    fn push_mug(state: &mut GameState, lane: usize, x: f32, fill: f32, ms: MugState) -> u32 {
        let id = state.alloc_mug_id();
        state.mugs.push(Mug {
            id,
            pos: Vec2::new(x, crate::lane_y(lane)),
            lane,
            speed: 216.0,
            fill_level: fill,
            state: ms,
            is_empty: false,
            target_patron: None,
        });
        id
    }

    #[test]
    fn test_fresh_serve_scores_fill_plus_bonus() {
        // A 90-fill mug on a fresh streak: 90 + 30, no combo terms
        let (mut state, tuning) = setup();
        push_patron(&mut state, 1, 500.0, PatronState::Waiting { waited: 0.0 });
        push_mug(&mut state, 1, 505.0, 90.0, MugState::SlidingForward);

        let res = resolve(&mut state, &tuning);
        assert_eq!(res.score, 120);
        assert_eq!(res.health_gain, tuning.serve_health_gain);
        assert_eq!(state.combo, 1);
        assert_eq!(state.total_serves, 1);
        assert_eq!(state.perfect_serves, 1);
        assert_eq!(state.mugs[0].state, MugState::AtPatron);
        assert!(state.patrons[0].is_drinking());
    }

    #[test]
    fn test_chained_serve_applies_combo_bonus_and_multiplier() {
        // Streak of 4 entering, inside the window: base 120, bonus
        // floor(120*3*0.3)=108, multiplier 1.45 -> floor(228*1.45)=330
        let (mut state, tuning) = setup();
        state.combo = 4;
        state.clock = 10.0;
        state.last_serve_at = 8.0;
        push_patron(&mut state, 1, 500.0, PatronState::Waiting { waited: 0.0 });
        push_mug(&mut state, 1, 505.0, 90.0, MugState::SlidingForward);

        let res = resolve(&mut state, &tuning);
        assert_eq!(res.score, 330);
        assert_eq!(state.combo, 5);
        assert_eq!(state.max_combo, 5);
    }

    #[test]
    fn test_serve_outside_window_restarts_streak() {
        let (mut state, tuning) = setup();
        state.combo = 4;
        state.clock = 20.0;
        state.last_serve_at = 8.0;
        push_patron(&mut state, 1, 500.0, PatronState::Waiting { waited: 0.0 });
        push_mug(&mut state, 1, 505.0, 90.0, MugState::SlidingForward);

        let res = resolve(&mut state, &tuning);
        assert_eq!(res.score, 120);
        assert_eq!(state.combo, 1);
    }

    #[test]
    fn test_low_fill_serve_scores_the_consolation_value() {
        let (mut state, tuning) = setup();
        push_patron(&mut state, 1, 500.0, PatronState::Waiting { waited: 0.0 });
        push_mug(&mut state, 1, 505.0, 40.0, MugState::SlidingForward);

        let res = resolve(&mut state, &tuning);
        assert_eq!(res.score, tuning.low_fill_score);
        assert_eq!(state.perfect_serves, 0);
        assert_eq!(state.total_serves, 1);
    }

    #[test]
    fn test_knockback_scales_with_fill() {
        let (mut state, tuning) = setup();
        push_patron(&mut state, 1, 500.0, PatronState::Waiting { waited: 0.0 });
        push_mug(&mut state, 1, 505.0, 90.0, MugState::SlidingForward);
        resolve(&mut state, &tuning);
        // 60 + min(40, 90) = 100
        assert_eq!(state.patrons[0].pos.x, 600.0);
        // The parked mug rides at the knocked-back position
        assert_eq!(state.mugs[0].pos.x, 600.0);
    }

    #[test]
    fn test_mug_off_far_edge_is_a_miss() {
        let (mut state, tuning) = setup();
        state.combo = 3;
        push_mug(
            &mut state,
            1,
            PLAYFIELD_WIDTH - FAR_EDGE_MARGIN,
            90.0,
            MugState::SlidingForward,
        );

        let res = resolve(&mut state, &tuning);
        assert!(state.mugs.is_empty());
        assert_eq!(res.health_loss, tuning.miss_penalty);
        assert_eq!(state.combo, 0);
        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.notices[0].kind, FailureKind::Miss);
    }

    #[test]
    fn test_queue_behind_is_respaced_in_order() {
        let (mut state, tuning) = setup();
        push_patron(&mut state, 1, 500.0, PatronState::Waiting { waited: 0.0 });
        // Two more queued close behind in the same lane
        push_patron(&mut state, 1, 610.0, PatronState::Waiting { waited: 0.0 });
        push_patron(&mut state, 1, 620.0, PatronState::Waiting { waited: 0.0 });
        push_mug(&mut state, 1, 505.0, 90.0, MugState::SlidingForward);

        resolve(&mut state, &tuning);
        // Hit patron knocked to 600; queue pushed to 648 and 696
        assert_eq!(state.patrons[0].pos.x, 600.0);
        assert_eq!(state.patrons[1].pos.x, 600.0 + MIN_PATRON_SPACING);
        assert_eq!(state.patrons[2].pos.x, 600.0 + 2.0 * MIN_PATRON_SPACING);
    }

    #[test]
    fn test_parked_mug_follows_then_returns_empty() {
        let (mut state, tuning) = setup();
        let pid = push_patron(&mut state, 1, 500.0, PatronState::Served);
        let mid = push_mug(&mut state, 1, 500.0, 90.0, MugState::AtPatron);
        state.mugs[0].target_patron = Some(pid);

        state.patrons[0].pos.x = 700.0;
        resolve(&mut state, &tuning);
        assert_eq!(state.mugs[0].pos.x, 700.0);
        assert_eq!(state.mugs[0].state, MugState::AtPatron);

        // Patron walks off the playfield: the mug turns around, drained
        state.patrons[0].pos.x = PLAYFIELD_WIDTH + 1.0;
        resolve(&mut state, &tuning);
        let mug = &state.mugs[0];
        assert_eq!(mug.id, mid);
        assert_eq!(mug.state, MugState::SlidingBack);
        assert!(mug.is_empty);
        assert_eq!(mug.fill_level, 0.0);
    }

    #[test]
    fn test_catch_in_window_awards_bonus() {
        let (mut state, tuning) = setup();
        state.bartender.lane = 1;
        push_mug(&mut state, 1, BARTENDER_X + 30.0, 0.0, MugState::SlidingBack);

        let res = resolve(&mut state, &tuning);
        assert!(state.mugs.is_empty());
        assert_eq!(res.score, tuning.catch_bonus);
        assert_eq!(res.health_loss, 0.0);
    }

    #[test]
    fn test_catch_requires_matching_lane() {
        let (mut state, tuning) = setup();
        state.bartender.lane = 0;
        push_mug(&mut state, 2, BARTENDER_X + 30.0, 0.0, MugState::SlidingBack);

        let res = resolve(&mut state, &tuning);
        // Wrong lane: the mug keeps sliding
        assert_eq!(state.mugs.len(), 1);
        assert_eq!(res.score, 0);
    }

    #[test]
    fn test_missed_catch_penalizes_by_streak() {
        let (mut state, tuning) = setup();
        state.combo = 3;
        state.bartender.lane = 0;
        push_mug(&mut state, 2, BARTENDER_X - CATCH_MISS_X, 0.0, MugState::SlidingBack);

        let res = resolve(&mut state, &tuning);
        assert!(state.mugs.is_empty());
        assert_eq!(res.score, -(tuning.catch_miss_score_rate * 3));
        assert_eq!(res.health_loss, tuning.catch_miss_penalty);
        assert_eq!(state.combo, 0);
        assert_eq!(state.notices[0].kind, FailureKind::CatchMiss);
    }

    #[test]
    fn test_forward_mug_ignores_drinking_patrons() {
        let (mut state, tuning) = setup();
        push_patron(&mut state, 1, 500.0, PatronState::Drinking { progress: 0.2 });
        push_mug(&mut state, 1, 505.0, 90.0, MugState::SlidingForward);

        let res = resolve(&mut state, &tuning);
        assert_eq!(res.score, 0);
        assert_eq!(state.mugs[0].state, MugState::SlidingForward);
    }
}
