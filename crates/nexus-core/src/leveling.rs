//! Experience/level/threshold normalization.
//!
//! Every XP-changing event (completion, reversal, penalty) routes through
//! [`normalize`], which restores the invariant `0 <= xp < threshold` by
//! carrying overflow upward into new levels and borrowing from previous
//! levels on the way down. The threshold grows geometrically per level
//! (x1.25 floored by default) and shrinks by the inverse division
//! (ceiling) on level loss.
//!
//! Gain and loss are symmetric but not perfectly invertible at the
//! boundary: `floor(t * 1.25)` followed by `ceil(t' / 1.25)` can land one
//! point above the original threshold. This is accepted; thresholds remain
//! monotonic along any one direction of travel, which is the property the
//! rest of the engine relies on.
//!
//! There are no failure modes here. Malformed input (level 0, non-positive
//! threshold) is clamped, not rejected -- this sits on the hot path of
//! every quest toggle.

use crate::config::LevelingConfig;

/// A normalized (level, xp, threshold) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelState {
    /// Current level, always at least 1.
    pub level: u32,
    /// XP toward the next level, always below `threshold`.
    pub xp: u32,
    /// XP required for the next level, always positive.
    pub threshold: u32,
}

/// Normalize a (level, xp, threshold) triple.
///
/// `xp` is signed: completions pass a positive running total, penalties
/// and reversals can push it negative. While `xp >= threshold` the player
/// levels up and the threshold grows; while `xp < 0` and the level is
/// above 1 the previous threshold is borrowed back. At level 1 a negative
/// remainder clamps to 0 -- the level floor wins over exact accounting.
pub fn normalize(level: u32, xp: i64, threshold: u32, config: &LevelingConfig) -> LevelState {
    let growth_pct = i64::from(config.effective_growth_pct());
    let mut level = level.max(1);
    let mut threshold = i64::from(threshold.max(1));
    let mut xp = xp;

    while xp >= threshold {
        xp = xp.saturating_sub(threshold);
        level = level.saturating_add(1);
        threshold = grow(threshold, growth_pct);
    }

    while xp < 0 && level > 1 {
        let previous = shrink(threshold, growth_pct);
        xp = xp.saturating_add(previous);
        level = level.saturating_sub(1);
        threshold = previous;
    }

    if xp < 0 {
        xp = 0;
    }

    LevelState {
        level,
        xp: u32::try_from(xp).unwrap_or(u32::MAX),
        threshold: u32::try_from(threshold).unwrap_or(u32::MAX),
    }
}

/// The XP threshold at a given level, walking the growth curve up from
/// the configured base.
pub fn threshold_for_level(level: u32, config: &LevelingConfig) -> u32 {
    let growth_pct = i64::from(config.effective_growth_pct());
    let mut threshold = i64::from(config.base_threshold.max(1));
    let mut at = 1_u32;
    while at < level.max(1) {
        threshold = grow(threshold, growth_pct);
        at = at.saturating_add(1);
    }
    u32::try_from(threshold).unwrap_or(u32::MAX)
}

/// Absolute XP position of a normalized state: the sum of every threshold
/// already cleared plus the current remainder. Used by displays only.
pub fn total_xp(state: LevelState, config: &LevelingConfig) -> u64 {
    let growth_pct = i64::from(config.effective_growth_pct());
    let mut threshold = i64::from(config.base_threshold.max(1));
    let mut sum: u64 = 0;
    let mut at = 1_u32;
    while at < state.level {
        sum = sum.saturating_add(u64::try_from(threshold).unwrap_or(0));
        threshold = grow(threshold, growth_pct);
        at = at.saturating_add(1);
    }
    sum.saturating_add(u64::from(state.xp))
}

/// Next level's threshold: `floor(threshold * growth_pct / 100)`.
///
/// Growth above 100% guarantees the result is strictly larger than the
/// input for any positive threshold.
fn grow(threshold: i64, growth_pct: i64) -> i64 {
    threshold
        .saturating_mul(growth_pct)
        .checked_div(100)
        .unwrap_or(threshold)
        .max(1)
}

/// Previous level's threshold: `ceil(threshold * 100 / growth_pct)`.
fn shrink(threshold: i64, growth_pct: i64) -> i64 {
    let scaled = threshold.saturating_mul(100);
    let quotient = scaled.checked_div(growth_pct).unwrap_or(threshold);
    let remainder = scaled.checked_rem(growth_pct).unwrap_or(0);
    let up = if remainder > 0 { 1 } else { 0 };
    quotient.saturating_add(up).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> LevelingConfig {
        LevelingConfig::default()
    }

    #[test]
    fn in_range_triple_is_untouched() {
        let state = normalize(3, 40, 156, &cfg());
        assert_eq!(
            state,
            LevelState {
                level: 3,
                xp: 40,
                threshold: 156
            }
        );
    }

    #[test]
    fn single_level_up_carries_remainder() {
        // 130 XP against a 100 threshold: level up, 30 left, threshold 125.
        let state = normalize(1, 130, 100, &cfg());
        assert_eq!(state.level, 2);
        assert_eq!(state.xp, 30);
        assert_eq!(state.threshold, 125);
    }

    #[test]
    fn multi_level_up_in_one_call() {
        // 100 + 125 = 225 cleared, 15 left at level 3 (threshold 156).
        let state = normalize(1, 240, 100, &cfg());
        assert_eq!(state.level, 3);
        assert_eq!(state.xp, 15);
        assert_eq!(state.threshold, 156);
    }

    #[test]
    fn level_down_borrows_previous_threshold() {
        // Level 5 at 10 XP with a 200 threshold, hit by a 50 XP penalty.
        // ceil(200 / 1.25) = 160 borrowed back: -40 + 160 = 120 at level 4.
        let state = normalize(5, -40, 200, &cfg());
        assert_eq!(state.level, 4);
        assert_eq!(state.xp, 120);
        assert_eq!(state.threshold, 160);
    }

    #[test]
    fn level_one_floors_negative_xp_at_zero() {
        let state = normalize(1, -75, 100, &cfg());
        assert_eq!(state.level, 1);
        assert_eq!(state.xp, 0);
        assert_eq!(state.threshold, 100);
    }

    #[test]
    fn deep_negative_walks_down_then_clamps() {
        let state = normalize(3, -10_000, 156, &cfg());
        assert_eq!(state.level, 1);
        assert_eq!(state.xp, 0);
    }

    #[test]
    fn normalization_is_idempotent() {
        let cases = [
            (1_u32, 0_i64, 100_u32),
            (1, 130, 100),
            (5, -40, 200),
            (2, 9_999, 125),
            (1, -75, 100),
        ];
        for (level, xp, threshold) in cases {
            let once = normalize(level, xp, threshold, &cfg());
            let twice = normalize(once.level, i64::from(once.xp), once.threshold, &cfg());
            assert_eq!(once, twice, "not idempotent for ({level}, {xp}, {threshold})");
        }
    }

    #[test]
    fn thresholds_are_monotonic_going_up() {
        let mut state = normalize(1, 0, 100, &cfg());
        for _ in 0..20 {
            let next = normalize(
                state.level,
                i64::from(state.xp).saturating_add(i64::from(state.threshold)),
                state.threshold,
                &cfg(),
            );
            assert!(next.threshold >= state.threshold);
            assert_eq!(next.level, state.level.saturating_add(1));
            state = next;
        }
    }

    #[test]
    fn thresholds_are_monotonic_going_back_down() {
        // Climb to level 10, then walk back down with penalties.
        let mut state = normalize(1, 0, 100, &cfg());
        for _ in 0..9 {
            state = normalize(
                state.level,
                i64::from(state.threshold),
                state.threshold,
                &cfg(),
            );
        }
        assert_eq!(state.level, 10);
        let mut previous = state.threshold;
        while state.level > 1 {
            state = normalize(state.level, -1, state.threshold, &cfg());
            assert!(state.threshold <= previous);
            previous = state.threshold;
        }
    }

    #[test]
    fn zero_threshold_input_is_clamped_not_fatal() {
        let state = normalize(1, 50, 0, &cfg());
        assert!(state.threshold >= 1);
        assert!(state.xp < state.threshold);
    }

    #[test]
    fn level_zero_input_is_clamped_to_one() {
        let state = normalize(0, 10, 100, &cfg());
        assert_eq!(state.level, 1);
        assert_eq!(state.xp, 10);
    }

    #[test]
    fn threshold_for_level_walks_the_curve() {
        let c = cfg();
        assert_eq!(threshold_for_level(1, &c), 100);
        assert_eq!(threshold_for_level(2, &c), 125);
        assert_eq!(threshold_for_level(3, &c), 156);
        assert_eq!(threshold_for_level(4, &c), 195);
    }

    #[test]
    fn total_xp_accumulates_cleared_thresholds() {
        let c = cfg();
        let state = LevelState {
            level: 3,
            xp: 15,
            threshold: 156,
        };
        // 100 + 125 cleared, plus 15 in progress.
        assert_eq!(total_xp(state, &c), 240);
    }
}
