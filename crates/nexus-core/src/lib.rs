//! Pure calculators and configuration for the Nexus engine.
//!
//! Everything here is a synchronous function over plain values: no I/O,
//! no clocks, no global state. The surrounding application sequences the
//! calls and owns persistence.
//!
//! # Modules
//!
//! - [`calendar`] -- Day/week/month boundary derivation for the reset pass.
//! - [`chronicle`] -- Day-rating classifier for the settlement chronicle.
//! - [`config`] -- Configuration loading from `nexus-config.yaml` into
//!   strongly-typed structs.
//! - [`leveling`] -- XP/level/threshold normalization.
//! - [`outcome`] -- The atomic quest-outcome transaction.
//! - [`reset`] -- The calendar-boundary reset and penalty engine.
//! - [`rewards`] -- Deterministic fallback economics and narration.

pub mod calendar;
pub mod chronicle;
pub mod config;
pub mod leveling;
pub mod outcome;
pub mod reset;
pub mod rewards;

// Re-export primary types at crate root.
pub use calendar::DayBoundaries;
pub use chronicle::classify;
pub use config::{ConfigError, EngineConfig, LevelingConfig, PenaltyConfig, RewardConfig};
pub use leveling::{LevelState, normalize, threshold_for_level, total_xp};
pub use outcome::QuestOutcome;
pub use reset::{ResetOutcome, reset_all};
pub use rewards::{NarrativeSource, StaticNarrative, fallback_credits, fallback_xp};
