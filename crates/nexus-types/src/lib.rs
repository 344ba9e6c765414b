//! Shared type definitions for the Nexus engine.
//!
//! This crate is the single source of truth for all types used across the
//! Nexus workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the settlement dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`enums`] -- Enumeration types (cadence, stats, eras, moods, events)
//! - [`structs`] -- Core entity structs (player, quests, the world snapshot)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    Cadence, CompanionMood, DayRating, Difficulty, Era, MilestoneKind, QuestStatus, StatKey,
    VitalityBand, WorldEventKind,
};
pub use ids::{
    CompanionId, DistrictId, EventId, ExpeditionId, MilestoneId, PlayerId, QuestId, StructureId,
};
pub use structs::{
    BASE_XP_THRESHOLD, CompanionState, DayRecord, DistrictState, EVENT_LOG_CAP, ExpeditionState,
    MilestoneState, PlayerProgress, PlayerStats, Quest, SCORE_MAX, StructureState, WorldEvent,
    WorldState,
};
