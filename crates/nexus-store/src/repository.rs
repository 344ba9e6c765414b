//! Repository traits: the persistence boundary of the engine.
//!
//! The core never talks to a database. It loads snapshots through these
//! traits before computing and writes results back after, treating every
//! write as best-effort. The production adapter wraps the remote
//! relational store; [`crate::memory::InMemoryStore`] backs demo mode
//! and tests.

use chrono::NaiveDate;

use nexus_types::{DayRecord, PlayerId, PlayerProgress, PlayerStats, Quest, WorldState};

use crate::error::StoreError;

/// Player progression and stats.
pub trait PlayerStore {
    /// Load a player's progression record and stat block.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PlayerNotFound`] if no record exists.
    fn load_player(&self, id: PlayerId) -> Result<(PlayerProgress, PlayerStats), StoreError>;

    /// Persist a player's progression record and stat block.
    fn save_player(
        &mut self,
        id: PlayerId,
        progress: &PlayerProgress,
        stats: &PlayerStats,
    ) -> Result<(), StoreError>;
}

/// Quest rows.
pub trait QuestStore {
    /// Load every quest belonging to a player.
    fn load_quests(&self, id: PlayerId) -> Result<Vec<Quest>, StoreError>;

    /// Persist one quest's current state.
    fn save_quest(&mut self, id: PlayerId, quest: &Quest) -> Result<(), StoreError>;
}

/// The world snapshot document.
pub trait WorldStore {
    /// Load the player's world snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::WorldNotFound`] if no snapshot exists.
    fn load_world(&self, id: PlayerId) -> Result<WorldState, StoreError>;

    /// Persist the player's world snapshot.
    fn save_world(&mut self, id: PlayerId, state: &WorldState) -> Result<(), StoreError>;
}

/// Per-day chronicle rows.
pub trait ChronicleStore {
    /// Load the record for one calendar day, if any exists.
    fn load_day(&self, id: PlayerId, day: NaiveDate) -> Result<Option<DayRecord>, StoreError>;

    /// Persist one day's record, replacing any previous version.
    fn save_day(&mut self, id: PlayerId, record: &DayRecord) -> Result<(), StoreError>;
}
