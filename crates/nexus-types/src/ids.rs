//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every entity in the engine has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. All IDs use UUID v7
//! (time-ordered) so the remote store can index them efficiently.
//!
//! The `new()` constructors exist for app-side generation (quest creation,
//! world seeding, tests); the remote store never generates IDs itself.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a player.
    PlayerId
}

define_id! {
    /// Unique identifier for a quest.
    QuestId
}

define_id! {
    /// Unique identifier for a district of the settlement.
    DistrictId
}

define_id! {
    /// Unique identifier for a structure within a district.
    StructureId
}

define_id! {
    /// Unique identifier for a companion bound to a district.
    CompanionId
}

define_id! {
    /// Unique identifier for an expedition.
    ExpeditionId
}

define_id! {
    /// Unique identifier for a milestone.
    MilestoneId
}

define_id! {
    /// Unique identifier for an entry in the world event log.
    EventId
}
