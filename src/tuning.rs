//! Data-driven game balance
//!
//! Every rate is per second, every timer in seconds, every distance in
//! playfield pixels. `Default` is the shipped balance; a deserialized
//! `Tuning` can replace it wholesale for playtesting.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    // === Patrons ===
    /// Base walking speed at level 1 (scales with difficulty)
    pub base_patron_speed: f32,
    /// Uniform random speed bonus added per patron at spawn
    pub patron_speed_jitter: f32,
    /// Base patience at level 1 (shrinks with difficulty)
    pub base_patience: f32,
    /// Uniform random patience bonus added per patron at spawn
    pub patience_jitter: f32,
    /// Patience never drops below this, regardless of level
    pub patience_floor: f32,
    /// Walking patrons advance one discrete step per interval
    pub step_interval: f32,
    /// How long a patron drinks before leaving happy
    pub drinking_time: f32,
    /// Drift speed of served patrons toward the far edge
    pub served_drift_speed: f32,

    // === Mugs ===
    /// Forward slide speed at level 1
    pub mug_speed: f32,
    /// Additive forward-speed bonus per level past the first
    pub mug_speed_per_level: f32,
    /// Return slide speed at level 1 (scales with level)
    pub mug_return_speed: f32,
    /// Per-level multiplier growth on the return speed
    pub return_speed_level_rate: f32,

    // === Bartender ===
    /// Fill accumulation rate while the fill input is held
    pub fill_rate: f32,
    pub max_fill: f32,
    /// Fills at or above this score as a full pour
    pub min_acceptable_fill: f32,
    /// Delay after releasing a serve before the bartender can move again
    pub serve_recover_delay: f32,

    // === Scoring ===
    /// Serves this close together (seconds) chain into a combo
    pub combo_window: f64,
    pub combo_bonus_rate: f32,
    pub combo_multiplier_rate: f32,
    /// Score for a pour below the acceptance threshold
    pub low_fill_score: i64,
    /// Flat bonus on top of the fill level for an accepted pour
    pub fill_score_bonus: i64,
    /// Score for catching a returning mug
    pub catch_bonus: i64,
    /// Score penalty per combo count on a missed catch
    pub catch_miss_score_rate: i64,

    // === Health ===
    pub serve_health_gain: f32,
    pub timeout_penalty: f32,
    pub miss_penalty: f32,
    pub catch_miss_penalty: f32,
    /// Per patron that reaches the bartender unserved
    pub breach_penalty: f32,

    // === Rounds ===
    /// Length of one level window
    pub level_time: f32,
    /// Score required to clear a level is `level * score_per_level`
    pub score_per_level: i64,
    pub level_bonus_score: i64,
    pub level_bonus_health: f32,

    // === Spawning ===
    pub base_spawn_interval: f32,
    /// The base interval shrinks this much per level past the first
    pub spawn_interval_step: f32,
    /// Floor on the base interval before difficulty division
    pub spawn_interval_floor: f32,
    /// Hard floor on the effective interval
    pub spawn_interval_min: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_patron_speed: 40.0,
            patron_speed_jitter: 20.0,
            base_patience: 2.8,
            patience_jitter: 0.5,
            patience_floor: 0.3,
            step_interval: 0.2,
            drinking_time: 1.0,
            served_drift_speed: 187.5,

            mug_speed: 216.0,
            mug_speed_per_level: 12.0,
            mug_return_speed: 204.0,
            return_speed_level_rate: 0.35,

            fill_rate: 96.0,
            max_fill: 100.0,
            min_acceptable_fill: 80.0,
            serve_recover_delay: 0.3,

            combo_window: 5.0,
            combo_bonus_rate: 0.3,
            combo_multiplier_rate: 0.15,
            low_fill_score: 5,
            fill_score_bonus: 30,
            catch_bonus: 20,
            catch_miss_score_rate: 20,

            serve_health_gain: 2.0,
            timeout_penalty: 30.0,
            miss_penalty: 5.0,
            catch_miss_penalty: 15.0,
            breach_penalty: 20.0,

            level_time: 60.0,
            score_per_level: 2000,
            level_bonus_score: 1000,
            level_bonus_health: 25.0,

            base_spawn_interval: 1.6,
            spawn_interval_step: 0.15,
            spawn_interval_floor: 0.7,
            spawn_interval_min: 0.2,
        }
    }
}
