//! Day-rating classifier for the settlement chronicle.
//!
//! A derived-state labeler: it reads the day's counters and the previous
//! day's rating and produces a [`DayRating`]. It has no influence back on
//! the engine -- the chronicle is display and logging only.

use nexus_types::DayRating;

/// Label a day's activity. First match wins:
///
/// 1. Previous day Absent or Light, and at least one completion: Recovery.
/// 2. Three or more completions with zero XP lost: Strong.
/// 3. At least one completion: Steady.
/// 4. No completions but at least one world event: Light.
/// 5. Otherwise: Neutral.
///
/// [`DayRating::Absent`] is assigned by the caller when no record exists
/// for a day at all; this function never returns it.
pub const fn classify(
    completed_count: u32,
    xp_lost: u32,
    events_today: u32,
    previous: Option<DayRating>,
) -> DayRating {
    if completed_count >= 1
        && matches!(previous, Some(DayRating::Absent | DayRating::Light))
    {
        return DayRating::Recovery;
    }
    if completed_count >= 3 && xp_lost == 0 {
        return DayRating::Strong;
    }
    if completed_count >= 1 {
        return DayRating::Steady;
    }
    if events_today >= 1 {
        return DayRating::Light;
    }
    DayRating::Neutral
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovery_beats_strong() {
        // Even a strong day counts as a recovery after an absence.
        let rating = classify(4, 0, 2, Some(DayRating::Absent));
        assert_eq!(rating, DayRating::Recovery);
    }

    #[test]
    fn recovery_after_a_light_day() {
        assert_eq!(classify(1, 0, 0, Some(DayRating::Light)), DayRating::Recovery);
    }

    #[test]
    fn strong_requires_three_completions_and_no_loss() {
        assert_eq!(classify(3, 0, 0, Some(DayRating::Steady)), DayRating::Strong);
        assert_eq!(classify(3, 5, 0, Some(DayRating::Steady)), DayRating::Steady);
        assert_eq!(classify(2, 0, 0, Some(DayRating::Steady)), DayRating::Steady);
    }

    #[test]
    fn steady_on_any_completion() {
        assert_eq!(classify(1, 12, 0, None), DayRating::Steady);
    }

    #[test]
    fn light_when_only_the_world_moved() {
        assert_eq!(classify(0, 0, 3, None), DayRating::Light);
    }

    #[test]
    fn neutral_when_nothing_happened() {
        assert_eq!(classify(0, 0, 0, Some(DayRating::Strong)), DayRating::Neutral);
    }

    #[test]
    fn no_completions_after_absence_is_not_recovery() {
        assert_eq!(classify(0, 0, 1, Some(DayRating::Absent)), DayRating::Light);
    }
}
