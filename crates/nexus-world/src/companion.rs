//! Companion mood and presence rules.
//!
//! Presence is a hysteresis variable: a companion departs when its
//! district's vitality falls below [`DEPART_BELOW`], and returns only
//! after [`RETURN_QUESTS`] qualifying completions while vitality is at
//! least [`RETURN_VITALITY`]. The asymmetric thresholds stop a district
//! hovering around a single boundary from flapping the companion in
//! and out.

use nexus_types::CompanionMood;

/// Vitality below which a present companion departs.
pub const DEPART_BELOW: u32 = 10;

/// Qualifying completions required before an absent companion returns.
pub const RETURN_QUESTS: u32 = 3;

/// Minimum vitality for a return to take effect.
pub const RETURN_VITALITY: u32 = 15;

/// Daily loyalty loss for a present companion in a neglected district.
pub const NEGLECT_LOYALTY_LOSS: u32 = 1;

/// Recompute a companion's mood from its district's vitality and its
/// own loyalty.
pub const fn mood_for(vitality: u32, loyalty: u32) -> CompanionMood {
    if vitality >= 70 && loyalty >= 60 {
        CompanionMood::Radiant
    } else if vitality >= 40 {
        CompanionMood::Content
    } else if vitality >= 20 {
        CompanionMood::Uneasy
    } else {
        CompanionMood::Forlorn
    }
}
