//! Enumeration types for the Nexus engine.
//!
//! Quest classification (cadence, difficulty, status), the six player
//! stats and their bound districts, settlement eras, companion moods,
//! vitality bands, world event kinds, chronicle day ratings, and the
//! fixed milestone set.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Quest classification
// ---------------------------------------------------------------------------

/// A quest's repetition class, determining its reset window and reward scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Cadence {
    /// Resets every day; misses break the streak.
    Daily,
    /// Resets every Monday-anchored week.
    Weekly,
    /// Resets every calendar month.
    Epic,
    /// One-shot; never reset or penalized once completed.
    Legendary,
}

impl Cadence {
    /// Reward and vitality scaling factor for this cadence.
    ///
    /// Daily 1.0, Weekly 1.5, Epic 2.0, Legendary 3.0.
    pub fn multiplier(self) -> Decimal {
        match self {
            Self::Daily => Decimal::ONE,
            Self::Weekly => Decimal::new(15, 1),
            Self::Epic => Decimal::TWO,
            Self::Legendary => Decimal::from(3),
        }
    }
}

/// A quest's difficulty rating, scaling rewards and district growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Difficulty {
    /// Light effort, reduced rewards.
    Easy,
    /// The baseline.
    Normal,
    /// Sustained effort.
    Hard,
    /// A serious undertaking.
    Extreme,
}

impl Difficulty {
    /// Reward and vitality scaling factor for this difficulty.
    ///
    /// Easy 0.6, Normal 1.0, Hard 1.5, Extreme 2.0.
    pub fn multiplier(self) -> Decimal {
        match self {
            Self::Easy => Decimal::new(6, 1),
            Self::Normal => Decimal::ONE,
            Self::Hard => Decimal::new(15, 1),
            Self::Extreme => Decimal::TWO,
        }
    }
}

/// Lifecycle state of a quest within its current cadence window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum QuestStatus {
    /// Not yet completed in the current window.
    Pending,
    /// Completed in the current window.
    Completed,
}

// ---------------------------------------------------------------------------
// Player stats
// ---------------------------------------------------------------------------

/// One of the six player stats. Each stat is permanently bound to exactly
/// one district of the settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum StatKey {
    /// Body: exercise, sleep, nutrition.
    Physical,
    /// Mind: study, reading, skill practice.
    Cognitive,
    /// Spirit: reflection, rest, relationships.
    Mental,
    /// Work: professional goals and output.
    Career,
    /// Treasury: budgeting, saving, investing.
    Financial,
    /// Craft: art, writing, making things.
    Creative,
}

impl StatKey {
    /// All six stats in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Physical,
        Self::Cognitive,
        Self::Mental,
        Self::Career,
        Self::Financial,
        Self::Creative,
    ];
}

// ---------------------------------------------------------------------------
// Settlement era
// ---------------------------------------------------------------------------

/// The settlement's civilizational era, derived from player level.
///
/// Eras are monotonic: the engine only ever moves forward through this
/// list, never backward, even if the player's level drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Era {
    /// A lone campfire and a handful of tents.
    Outpost,
    /// First permanent homes.
    Hamlet,
    /// Streets, trade, and neighbors.
    Village,
    /// Civic works and a town charter.
    Township,
    /// The Nexus in full glory.
    Citadel,
}

impl Era {
    /// One-based index of the era (Outpost = 1 .. Citadel = 5).
    pub const fn index(self) -> u8 {
        match self {
            Self::Outpost => 1,
            Self::Hamlet => 2,
            Self::Village => 3,
            Self::Township => 4,
            Self::Citadel => 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Companions
// ---------------------------------------------------------------------------

/// A companion's visible mood, recomputed from district vitality and loyalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum CompanionMood {
    /// Thriving district, deep loyalty.
    Radiant,
    /// Things are going well.
    Content,
    /// The district is slipping.
    Uneasy,
    /// On the verge of leaving.
    Forlorn,
}

// ---------------------------------------------------------------------------
// Vitality bands
// ---------------------------------------------------------------------------

/// Condition band for a district's 0-100 vitality score.
///
/// The bottom two bands (Decaying, Ruined) are the "critical" zone:
/// leaving it emits a Recovery event, entering it drives companions away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum VitalityBand {
    /// 80-100.
    Flourishing,
    /// 50-79.
    Stable,
    /// 25-49.
    Worn,
    /// 10-24.
    Decaying,
    /// 0-9.
    Ruined,
}

impl VitalityBand {
    /// Classify a vitality score into its band.
    pub const fn from_vitality(vitality: u32) -> Self {
        match vitality {
            80.. => Self::Flourishing,
            50..=79 => Self::Stable,
            25..=49 => Self::Worn,
            10..=24 => Self::Decaying,
            0..=9 => Self::Ruined,
        }
    }

    /// Whether this band is in the critical bottom-two zone.
    pub const fn is_critical(self) -> bool {
        matches!(self, Self::Decaying | Self::Ruined)
    }

    /// Ordering rank, higher is healthier (Ruined = 0 .. Flourishing = 4).
    pub const fn rank(self) -> u8 {
        match self {
            Self::Ruined => 0,
            Self::Decaying => 1,
            Self::Worn => 2,
            Self::Stable => 3,
            Self::Flourishing => 4,
        }
    }
}

// ---------------------------------------------------------------------------
// World events
// ---------------------------------------------------------------------------

/// Category of an entry in the world event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum WorldEventKind {
    /// A district became available.
    Unlock,
    /// A district climbed out of the critical zone, or a structure was
    /// restored.
    Recovery,
    /// A district slid down into a lower band.
    Decay,
    /// A companion arrived or departed.
    Companion,
    /// A structure was built.
    Build,
    /// An expedition became available or was completed.
    Discovery,
    /// A milestone was earned.
    Milestone,
}

// ---------------------------------------------------------------------------
// Chronicle day ratings
// ---------------------------------------------------------------------------

/// The chronicle's label for a single day's activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum DayRating {
    /// Three or more completions without losing XP.
    Strong,
    /// At least one completion.
    Steady,
    /// Nothing happened.
    Neutral,
    /// No completions, but the world moved.
    Light,
    /// Back after an absent or light day.
    Recovery,
    /// No record exists for the day at all. Assigned by the caller,
    /// never by the classifier.
    Absent,
}

// ---------------------------------------------------------------------------
// Milestones
// ---------------------------------------------------------------------------

/// The fixed set of milestones, each a static predicate over the whole
/// world snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum MilestoneKind {
    /// Build your first structure.
    FirstStructure,
    /// Build five structures.
    FiveStructures,
    /// Build every structure in one district.
    AllStructuresInDistrict,
    /// Unlock all six districts.
    AllDistrictsUnlocked,
    /// Pull a district out of the critical zone for the first time.
    FirstRecovery,
    /// Keep every unlocked district at vitality 40+ for seven straight
    /// daily evaluations.
    PristineWeek,
    /// Raise any companion to loyalty 100.
    DevotedCompanion,
    /// Have every companion present at once.
    FullCircle,
    /// Reach the Township era.
    EraTownship,
    /// Reach the Citadel era.
    GrandNexus,
}

impl MilestoneKind {
    /// All milestone kinds in canonical order.
    pub const ALL: [Self; 10] = [
        Self::FirstStructure,
        Self::FiveStructures,
        Self::AllStructuresInDistrict,
        Self::AllDistrictsUnlocked,
        Self::FirstRecovery,
        Self::PristineWeek,
        Self::DevotedCompanion,
        Self::FullCircle,
        Self::EraTownship,
        Self::GrandNexus,
    ];
}
