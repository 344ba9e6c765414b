//! Settlement simulation engine for Nexus.
//!
//! This crate models the simulated settlement: districts bound to player
//! stats with a 0-100 vitality score, tiered structures that wear and get
//! repaired, companions with presence hysteresis, one-shot expeditions,
//! and milestone predicates over the whole snapshot.
//!
//! # Modules
//!
//! - [`companion`] -- Mood derivation and the presence hysteresis
//!   thresholds.
//! - [`engine`] -- The six simulation operations (quest completion and
//!   reversal, daily decay, build, repair, expedition launch).
//! - [`error`] -- Validation error types for the mutating operations.
//! - [`milestone`] -- Milestone predicates and the idempotent re-check
//!   pass.
//! - [`starting_nexus`] -- The canonical seeded settlement.
//! - [`structure`] -- Repair-cost economics.
//! - [`vitality`] -- Growth and decay formulas.

pub mod companion;
pub mod engine;
pub mod error;
pub mod milestone;
pub mod starting_nexus;
pub mod structure;
pub mod vitality;

// Re-export primary types at crate root.
pub use engine::{
    ActionReceipt, build_structure, era_for_level, launch_expedition, on_daily_decay,
    on_quest_completed, on_quest_uncompleted, repair_structure,
};
pub use error::WorldError;
pub use milestone::check_milestones;
pub use starting_nexus::starting_nexus;
