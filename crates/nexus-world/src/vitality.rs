//! Vitality growth and decay formulas.
//!
//! A district's vitality climbs when its bound stat is exercised and
//! slides when it is ignored, with decay accelerating per consecutive
//! neglected day. All formulas produce integer deltas; the caller applies
//! them through the clamped writers on the state types.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use nexus_types::{Cadence, Difficulty};

/// Base vitality granted by a completed quest before multipliers.
pub const QUEST_VITALITY_BASE: u32 = 5;

/// Vitality granted by the daily pass when the district's stat was
/// touched that day.
pub const TOUCH_VITALITY_BONUS: u32 = 2;

/// Flat decay applied on the first neglected daily evaluation.
pub const DECAY_BASE: u32 = 3;

/// Additional decay per consecutive neglected day.
pub const DECAY_PER_NEGLECT_DAY: u32 = 2;

/// Upper bound on a single day's decay, however long the neglect.
pub const DECAY_CAP: u32 = 15;

/// Vitality below which built structures start wearing.
pub const STRUCTURE_WEAR_BELOW: u32 = 50;

/// Vitality below which structures wear at the heavy rate.
pub const STRUCTURE_HEAVY_WEAR_BELOW: u32 = 25;

/// Daily condition loss for structures in a worn district.
pub const STRUCTURE_WEAR: u32 = 4;

/// Daily condition loss for structures in a badly neglected district.
pub const STRUCTURE_HEAVY_WEAR: u32 = 8;

/// Minimum vitality counted toward the pristine streak.
pub const PRISTINE_THRESHOLD: u32 = 40;

/// Vitality granted to a district when a structure is built in it.
pub const BUILD_VITALITY_BONUS: u32 = 5;

/// Vitality gain for one quest completion:
/// `round(5 * difficulty_multiplier * cadence_multiplier)`,
/// midpoints rounding away from zero.
pub fn quest_vitality_gain(difficulty: Difficulty, cadence: Cadence) -> u32 {
    let gain = Decimal::from(QUEST_VITALITY_BASE)
        .saturating_mul(difficulty.multiplier())
        .saturating_mul(cadence.multiplier())
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    gain.to_u32().unwrap_or(QUEST_VITALITY_BASE)
}

/// Decay for one neglected daily evaluation:
/// `min(15, 3 + neglect_days * 2)`. Accelerates the longer a district
/// is ignored.
pub const fn neglect_decay(neglect_days: u32) -> u32 {
    let raw = DECAY_BASE.saturating_add(neglect_days.saturating_mul(DECAY_PER_NEGLECT_DAY));
    if raw > DECAY_CAP { DECAY_CAP } else { raw }
}
