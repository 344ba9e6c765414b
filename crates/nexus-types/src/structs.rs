//! Core entity structs for the Nexus engine.
//!
//! Player progress and stats, quests, the world snapshot (districts,
//! structures, companions, expeditions, milestones, event log), and the
//! chronicle's per-day record.
//!
//! Invariants are enforced locally: vitality, condition, and loyalty are
//! clamped to 0-100 on every write, the one-way flags only ever move from
//! `false` to `true`, and the event log never exceeds its cap.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    Cadence, CompanionMood, DayRating, Difficulty, Era, MilestoneKind, QuestStatus, StatKey,
    VitalityBand, WorldEventKind,
};
use crate::ids::{
    CompanionId, DistrictId, EventId, ExpeditionId, MilestoneId, QuestId, StructureId,
};

/// Upper bound for vitality, condition, and loyalty scores.
pub const SCORE_MAX: u32 = 100;

/// Maximum number of entries retained in the world event log.
pub const EVENT_LOG_CAP: usize = 50;

/// Starting XP threshold for a level-1 player.
pub const BASE_XP_THRESHOLD: u32 = 100;

/// Clamp a signed score delta result into the 0-100 range.
fn clamp_score(value: i64) -> u32 {
    u32::try_from(value.clamp(0, i64::from(SCORE_MAX))).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// The player's progression record.
///
/// Invariant: `current_xp < xp_to_next_level`, except transiently inside
/// the leveling calculator. Level never drops below 1. Mutated only
/// through the leveling calculator and the quest-outcome transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerProgress {
    /// Current level, 1 or greater.
    pub level: u32,
    /// XP accumulated toward the next level.
    pub current_xp: u32,
    /// XP required to reach the next level. Always positive.
    pub xp_to_next_level: u32,
    /// Spendable settlement currency.
    pub credits: u32,
    /// Consecutive days with at least one daily completion.
    pub streak_days: u32,
    /// The last local calendar day the player completed anything.
    pub last_active: NaiveDate,
}

impl PlayerProgress {
    /// A fresh level-1 player as of the given local day.
    pub const fn new(today: NaiveDate) -> Self {
        Self {
            level: 1,
            current_xp: 0,
            xp_to_next_level: BASE_XP_THRESHOLD,
            credits: 0,
            streak_days: 0,
            last_active: today,
        }
    }
}

/// The player's six trainable stats.
pub type PlayerStats = BTreeMap<StatKey, u32>;

// ---------------------------------------------------------------------------
// Quests
// ---------------------------------------------------------------------------

/// A user task tracked by the engine.
///
/// Created by user action, toggled by completion and un-completion, and
/// silently reset to [`QuestStatus::Pending`] by the reset engine when its
/// cadence window rolls over. The engine never deletes quests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Quest {
    /// Unique identifier.
    pub id: QuestId,
    /// User-facing title.
    pub title: String,
    /// Repetition class, fixing the reset window.
    pub cadence: Cadence,
    /// Difficulty rating, scaling rewards and district growth.
    pub difficulty: Difficulty,
    /// Lifecycle state within the current cadence window.
    pub status: QuestStatus,
    /// XP granted on completion.
    pub xp_reward: u32,
    /// Credits granted on completion.
    pub currency_reward: u32,
    /// Stat points granted on completion, keyed by stat.
    pub stat_rewards: BTreeMap<StatKey, u32>,
    /// Legacy single-stat binding, used when `stat_rewards` is empty.
    pub linked_stat: Option<StatKey>,
    /// The local day the quest was created.
    pub created_on: NaiveDate,
    /// The local day of the most recent completion, if any.
    pub last_completed_on: Option<NaiveDate>,
}

impl Quest {
    /// Resolve which stats this quest touches.
    ///
    /// Two explicit branches, both independently testable: a non-empty
    /// reward map wins; otherwise the legacy linked stat is used; a quest
    /// with neither touches nothing.
    pub fn touched_stats(&self) -> Vec<StatKey> {
        if self.stat_rewards.is_empty() {
            self.linked_stat.into_iter().collect()
        } else {
            self.stat_rewards.keys().copied().collect()
        }
    }

    /// Whether the most recent completion fell on the given day.
    pub fn completed_on(&self, day: NaiveDate) -> bool {
        self.last_completed_on == Some(day)
    }
}

// ---------------------------------------------------------------------------
// World state
// ---------------------------------------------------------------------------

/// The full simulated-settlement snapshot for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldState {
    /// Settlement era, derived from player level. Monotonic.
    pub era: Era,
    /// The six districts, one per stat.
    pub districts: Vec<DistrictState>,
    /// One companion per district.
    pub companions: Vec<CompanionState>,
    /// Available and completed expeditions.
    pub expeditions: Vec<ExpeditionState>,
    /// The fixed milestone set with earned flags.
    pub milestones: Vec<MilestoneState>,
    /// Bounded event log, newest first.
    pub events: Vec<WorldEvent>,
    /// Running count of structures built, all districts.
    pub total_structures_built: u32,
    /// Running count of districts pulled out of the critical zone.
    pub total_recoveries: u32,
    /// Consecutive daily evaluations with every unlocked district at 40+.
    pub current_pristine_streak: u32,
    /// High-water mark of the pristine streak.
    pub longest_pristine_streak: u32,
}

impl WorldState {
    /// Push an event onto the log, newest first, trimming to the cap.
    pub fn push_event(&mut self, event: WorldEvent) {
        self.events.insert(0, event);
        self.events.truncate(EVENT_LOG_CAP);
    }

    /// Raise the era if the new value is higher. Eras never go backward.
    pub fn raise_era(&mut self, era: Era) {
        if era > self.era {
            self.era = era;
        }
    }

    /// Find a district by id.
    pub fn district(&self, id: DistrictId) -> Option<&DistrictState> {
        self.districts.iter().find(|d| d.id == id)
    }

    /// Find a district by its bound stat.
    pub fn district_for_stat_mut(&mut self, stat: StatKey) -> Option<&mut DistrictState> {
        self.districts.iter_mut().find(|d| d.stat == stat)
    }

    /// Find the companion bound to a district.
    pub fn companion_for_district_mut(
        &mut self,
        district: DistrictId,
    ) -> Option<&mut CompanionState> {
        self.companions.iter_mut().find(|c| c.district == district)
    }

    /// Count of built structures across all districts.
    ///
    /// The `total_structures_built` counter must always equal this.
    pub fn built_structure_count(&self) -> u32 {
        let built = self
            .districts
            .iter()
            .flat_map(|d| d.structures.iter())
            .filter(|s| s.is_built)
            .count();
        u32::try_from(built).unwrap_or(u32::MAX)
    }
}

// ---------------------------------------------------------------------------
// Districts and structures
// ---------------------------------------------------------------------------

/// One district of the settlement, permanently bound to a player stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DistrictState {
    /// Unique identifier.
    pub id: DistrictId,
    /// The stat this district is bound to. Never changes.
    pub stat: StatKey,
    /// User-facing name.
    pub name: String,
    /// Whether the district is available. One-way: false to true only.
    pub is_unlocked: bool,
    /// Player level required to unlock.
    pub unlock_level: u32,
    /// Health score, 0-100.
    pub vitality: u32,
    /// Structures on this district's plots, ordered by tier.
    pub structures: Vec<StructureState>,
    /// Consecutive daily evaluations without a touch on the bound stat.
    pub consecutive_neglect_days: u32,
}

impl DistrictState {
    /// Apply a signed vitality delta, clamped to 0-100.
    pub fn apply_vitality_delta(&mut self, delta: i64) {
        self.vitality = clamp_score(i64::from(self.vitality).saturating_add(delta));
    }

    /// The district's current vitality band.
    pub const fn band(&self) -> VitalityBand {
        VitalityBand::from_vitality(self.vitality)
    }

    /// Find a structure by id.
    pub fn structure(&self, id: StructureId) -> Option<&StructureState> {
        self.structures.iter().find(|s| s.id == id)
    }

    /// Whether every tier strictly below the given one is built.
    pub fn tiers_built_below(&self, tier: u32) -> bool {
        self.structures
            .iter()
            .filter(|s| s.tier < tier)
            .all(|s| s.is_built)
    }
}

/// A single structure plot within a district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StructureState {
    /// Unique identifier.
    pub id: StructureId,
    /// User-facing name.
    pub name: String,
    /// Build order within the district, starting at 1. Tier N requires
    /// tier N-1 built first.
    pub tier: u32,
    /// Whether the structure has been built. One-way.
    pub is_built: bool,
    /// Wear score, 0-100. Meaningful only once built.
    pub condition: u32,
    /// Credits required to build.
    pub build_cost: u32,
    /// Player level required to build.
    pub unlock_level: u32,
}

impl StructureState {
    /// Apply a signed condition delta, clamped to 0-100.
    pub fn apply_condition_delta(&mut self, delta: i64) {
        self.condition = clamp_score(i64::from(self.condition).saturating_add(delta));
    }
}

// ---------------------------------------------------------------------------
// Companions
// ---------------------------------------------------------------------------

/// A companion bound to one district.
///
/// Presence is a hysteresis variable: the companion departs when district
/// vitality drops below 10 and returns only after three qualifying quest
/// completions while vitality is at least 15.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CompanionState {
    /// Unique identifier.
    pub id: CompanionId,
    /// The district this companion belongs to.
    pub district: DistrictId,
    /// User-facing name.
    pub name: String,
    /// Whether the companion currently resides in the settlement.
    pub is_present: bool,
    /// Attachment score, 0-100.
    pub loyalty: u32,
    /// Visible mood, derived from vitality and loyalty.
    pub mood: CompanionMood,
    /// Qualifying completions counted toward a return while absent.
    pub quests_since_return: u32,
}

impl CompanionState {
    /// Apply a signed loyalty delta, clamped to 0-100.
    pub fn apply_loyalty_delta(&mut self, delta: i64) {
        self.loyalty = clamp_score(i64::from(self.loyalty).saturating_add(delta));
    }
}

// ---------------------------------------------------------------------------
// Expeditions and milestones
// ---------------------------------------------------------------------------

/// A one-shot expedition into the wider world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ExpeditionState {
    /// Unique identifier.
    pub id: ExpeditionId,
    /// User-facing name.
    pub name: String,
    /// Whether the expedition is visible and launchable. One-way.
    pub is_unlocked: bool,
    /// Whether the expedition has been completed. One-way.
    pub is_completed: bool,
    /// Player level required to unlock.
    pub required_level: u32,
    /// Which stat gates this expedition.
    pub required_stat: StatKey,
    /// Minimum value of the gating stat.
    pub required_stat_value: u32,
    /// Credits required to launch.
    pub cost: u32,
}

/// A one-way achievement flag over the whole world snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MilestoneState {
    /// Unique identifier.
    pub id: MilestoneId,
    /// Which predicate this milestone evaluates.
    pub kind: MilestoneKind,
    /// Whether the milestone has been earned. One-way; never re-emitted.
    pub is_earned: bool,
}

// ---------------------------------------------------------------------------
// World events
// ---------------------------------------------------------------------------

/// An entry in the world event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldEvent {
    /// Unique identifier.
    pub id: EventId,
    /// Event category.
    pub kind: WorldEventKind,
    /// User-facing narration.
    pub message: String,
    /// When the event was emitted.
    pub created_at: DateTime<Utc>,
}

impl WorldEvent {
    /// Create a new event stamped with the current time.
    pub fn new(kind: WorldEventKind, message: String) -> Self {
        Self {
            id: EventId::new(),
            kind,
            message,
            created_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Chronicle
// ---------------------------------------------------------------------------

/// One calendar day's activity summary, consumed only by the chronicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DayRecord {
    /// The local calendar day this record covers.
    pub day: NaiveDate,
    /// Quests completed that day.
    pub quests_completed: u32,
    /// XP gained that day.
    pub xp_gained: u32,
    /// XP lost to penalties that day.
    pub xp_lost: u32,
    /// World events emitted that day.
    pub events_emitted: u32,
    /// The chronicle's label for the day.
    pub rating: DayRating,
}
