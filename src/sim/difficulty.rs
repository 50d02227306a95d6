//! Level-to-parameter difficulty curves
//!
//! Pure functions of the level number; no side effects. The spawner and the
//! motion updater call these every tick.

use crate::tuning::Tuning;

/// Difficulty grows linearly: 1.0 at level 1, +0.5 per level after
#[inline]
pub fn multiplier(level: u32) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * 0.5
}

/// Patron walking speed scales up with difficulty
pub fn patron_speed(tuning: &Tuning, level: u32) -> f32 {
    tuning.base_patron_speed * multiplier(level)
}

/// Patience shrinks with difficulty, floored so patrons are never unserveable
pub fn patience(tuning: &Tuning, level: u32) -> f32 {
    (tuning.base_patience / multiplier(level)).max(tuning.patience_floor)
}

/// Spawn interval: the base shrinks per level (with its own floor), then the
/// difficulty division compresses it further down to a hard minimum
pub fn spawn_interval(tuning: &Tuning, level: u32) -> f32 {
    let base = (tuning.base_spawn_interval
        - level.saturating_sub(1) as f32 * tuning.spawn_interval_step)
        .max(tuning.spawn_interval_floor);
    (base / multiplier(level)).max(tuning.spawn_interval_min)
}

/// Forward mug speed grows additively per level
pub fn mug_speed(tuning: &Tuning, level: u32) -> f32 {
    tuning.mug_speed + level.saturating_sub(1) as f32 * tuning.mug_speed_per_level
}

/// Return mug speed scales multiplicatively with level
pub fn mug_return_speed(tuning: &Tuning, level: u32) -> f32 {
    tuning.mug_return_speed * (1.0 + level.saturating_sub(1) as f32 * tuning.return_speed_level_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_curve() {
        assert_eq!(multiplier(1), 1.0);
        assert_eq!(multiplier(2), 1.5);
        assert_eq!(multiplier(5), 3.0);
    }

    #[test]
    fn test_patience_floors_at_high_levels() {
        let t = Tuning::default();
        assert_eq!(patience(&t, 1), t.base_patience);
        // Level 2: 2.8 / 1.5
        assert!((patience(&t, 2) - 2.8 / 1.5).abs() < 1e-6);
        // Deep levels hit the floor
        assert_eq!(patience(&t, 50), t.patience_floor);
    }

    #[test]
    fn test_spawn_interval_has_two_floors() {
        let t = Tuning::default();
        assert_eq!(spawn_interval(&t, 1), t.base_spawn_interval);
        // Base floor: 1.6 - 6*0.15 = 0.7 at level 7, stays 0.7 beyond
        let base_at_10 = (t.base_spawn_interval - 9.0 * t.spawn_interval_step)
            .max(t.spawn_interval_floor);
        assert_eq!(base_at_10, t.spawn_interval_floor);
        // Effective floor kicks in once difficulty divides far enough
        assert_eq!(spawn_interval(&t, 50), t.spawn_interval_min);
    }

    #[test]
    fn test_mug_speeds_scale_with_level() {
        let t = Tuning::default();
        assert_eq!(mug_speed(&t, 1), t.mug_speed);
        assert_eq!(mug_speed(&t, 3), t.mug_speed + 2.0 * t.mug_speed_per_level);
        assert_eq!(mug_return_speed(&t, 1), t.mug_return_speed);
        assert!((mug_return_speed(&t, 3) - t.mug_return_speed * 1.7).abs() < 1e-3);
    }
}
