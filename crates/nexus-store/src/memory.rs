//! The in-memory repository backing demo mode and tests.
//!
//! An explicitly constructed instance, injected wherever the real adapter
//! would be -- never process-wide state. Snapshots round-trip through
//! `serde_json` on write, so anything that would fail to serialize against
//! the remote store fails here too.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use nexus_types::{DayRecord, PlayerId, PlayerProgress, PlayerStats, Quest, WorldState};

use crate::error::StoreError;
use crate::repository::{ChronicleStore, PlayerStore, QuestStore, WorldStore};

/// In-memory repository. One instance per demo session.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    players: BTreeMap<PlayerId, (PlayerProgress, PlayerStats)>,
    quests: BTreeMap<PlayerId, Vec<Quest>>,
    worlds: BTreeMap<PlayerId, WorldState>,
    days: BTreeMap<(PlayerId, NaiveDate), DayRecord>,
    fail_writes: bool,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose writes always fail.
    ///
    /// Exercises the pipeline's warn-and-continue path in tests.
    pub fn with_failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Insert a player record directly (seeding).
    pub fn insert_player(&mut self, id: PlayerId, progress: PlayerProgress, stats: PlayerStats) {
        self.players.insert(id, (progress, stats));
    }

    /// Insert a player's quests directly (seeding).
    pub fn insert_quests(&mut self, id: PlayerId, quests: Vec<Quest>) {
        self.quests.insert(id, quests);
    }

    /// Insert a player's world snapshot directly (seeding).
    pub fn insert_world(&mut self, id: PlayerId, state: WorldState) {
        self.worlds.insert(id, state);
    }

    /// Insert a chronicle day record directly (seeding).
    pub fn insert_day(&mut self, id: PlayerId, record: DayRecord) {
        self.days.insert((id, record.day), record);
    }

    /// Serialization gate applied to every write.
    ///
    /// Mirrors the remote adapter: a value that cannot serialize never
    /// reaches storage.
    fn gate<T: serde::Serialize>(&self, value: &T) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable {
                reason: "writes disabled".to_owned(),
            });
        }
        serde_json::to_string(value)
            .map(|_| ())
            .map_err(|err| StoreError::Unavailable {
                reason: err.to_string(),
            })
    }
}

impl PlayerStore for InMemoryStore {
    fn load_player(&self, id: PlayerId) -> Result<(PlayerProgress, PlayerStats), StoreError> {
        self.players
            .get(&id)
            .cloned()
            .ok_or(StoreError::PlayerNotFound(id))
    }

    fn save_player(
        &mut self,
        id: PlayerId,
        progress: &PlayerProgress,
        stats: &PlayerStats,
    ) -> Result<(), StoreError> {
        self.gate(progress)?;
        self.players.insert(id, (progress.clone(), stats.clone()));
        Ok(())
    }
}

impl QuestStore for InMemoryStore {
    fn load_quests(&self, id: PlayerId) -> Result<Vec<Quest>, StoreError> {
        Ok(self.quests.get(&id).cloned().unwrap_or_default())
    }

    fn save_quest(&mut self, id: PlayerId, quest: &Quest) -> Result<(), StoreError> {
        self.gate(quest)?;
        let quests = self.quests.entry(id).or_default();
        if let Some(existing) = quests.iter_mut().find(|q| q.id == quest.id) {
            *existing = quest.clone();
        } else {
            quests.push(quest.clone());
        }
        Ok(())
    }
}

impl WorldStore for InMemoryStore {
    fn load_world(&self, id: PlayerId) -> Result<WorldState, StoreError> {
        self.worlds
            .get(&id)
            .cloned()
            .ok_or(StoreError::WorldNotFound(id))
    }

    fn save_world(&mut self, id: PlayerId, state: &WorldState) -> Result<(), StoreError> {
        self.gate(state)?;
        self.worlds.insert(id, state.clone());
        Ok(())
    }
}

impl ChronicleStore for InMemoryStore {
    fn load_day(&self, id: PlayerId, day: NaiveDate) -> Result<Option<DayRecord>, StoreError> {
        Ok(self.days.get(&(id, day)).cloned())
    }

    fn save_day(&mut self, id: PlayerId, record: &DayRecord) -> Result<(), StoreError> {
        self.gate(record)?;
        self.days.insert((id, record.day), record.clone());
        Ok(())
    }
}
