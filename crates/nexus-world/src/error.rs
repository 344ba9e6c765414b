//! Error types for the `nexus-world` crate.
//!
//! Every variant here is a validation error: an expected, recoverable
//! outcome of a user action checked against current state. They surface
//! as inline messages next to the action that triggered them, so each
//! Display string is written for the user, not the log.

use nexus_types::{DistrictId, ExpeditionId, StatKey, StructureId};

/// Errors that can occur during world-engine operations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// A district was not found in the world snapshot.
    #[error("district not found: {0}")]
    DistrictNotFound(DistrictId),

    /// The district has not been unlocked yet.
    #[error("district {0} is still locked")]
    DistrictLocked(DistrictId),

    /// A structure was not found in the given district.
    #[error("structure {structure} not found in district {district}")]
    StructureNotFound {
        /// The missing structure.
        structure: StructureId,
        /// The district that was searched.
        district: DistrictId,
    },

    /// The structure's plot is already built.
    #[error("structure {0} is already built")]
    AlreadyBuilt(StructureId),

    /// The structure has not been built yet.
    #[error("structure {0} has not been built")]
    NotBuilt(StructureId),

    /// The player's level is below the requirement.
    #[error("requires level {required}, currently level {actual}")]
    LevelTooLow {
        /// Level required by the action.
        required: u32,
        /// The player's current level.
        actual: u32,
    },

    /// The immediately preceding tier in the district is not built.
    #[error("the tier {missing_tier} structure must be built first")]
    PreviousTierNotBuilt {
        /// The highest unbuilt tier below the requested one.
        missing_tier: u32,
    },

    /// The player cannot afford the action.
    #[error("costs {required} credits, only {available} available")]
    InsufficientCredits {
        /// Credits the action costs.
        required: u32,
        /// Credits the player has.
        available: u32,
    },

    /// The structure is in too good a condition to repair.
    #[error("condition {condition} needs no repair yet")]
    ConditionTooHigh {
        /// The structure's current condition.
        condition: u32,
    },

    /// An expedition was not found in the world snapshot.
    #[error("expedition not found: {0}")]
    ExpeditionNotFound(ExpeditionId),

    /// The expedition has not been unlocked yet.
    #[error("expedition {0} has not been discovered")]
    ExpeditionLocked(ExpeditionId),

    /// The expedition has already been completed.
    #[error("expedition {0} is already completed")]
    ExpeditionAlreadyCompleted(ExpeditionId),

    /// A gating stat is below the expedition's requirement.
    #[error("requires {stat:?} {required}, currently {actual}")]
    StatTooLow {
        /// The gating stat.
        stat: StatKey,
        /// Required stat value.
        required: u32,
        /// The player's current value.
        actual: u32,
    },
}
