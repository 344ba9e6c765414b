//! The session-start pipeline.
//!
//! One call covers everything a returning client needs: load the stale
//! snapshots, run the batch reset pass over every missed boundary, apply
//! the accumulated penalty through the leveling calculator, run the daily
//! decay pass, classify the day for the chronicle, and write everything
//! back best-effort.
//!
//! Writes are fire-and-forget: a failed save is logged at `warn!` and the
//! pipeline carries on. The returned [`SessionReport`] is the source of
//! truth for the client regardless of what reached storage; a write lost
//! to a crash self-heals on the next pass, since the engine always
//! recomputes from "now" rather than replaying deltas.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use nexus_core::{DayBoundaries, EngineConfig, QuestOutcome, classify, reset_all};
use nexus_types::{
    DayRating, DayRecord, PlayerId, PlayerProgress, PlayerStats, Quest, StatKey, WorldEvent,
    WorldState,
};
use nexus_world::on_daily_decay;

use crate::error::StoreError;
use crate::repository::{ChronicleStore, PlayerStore, QuestStore, WorldStore};

/// Everything the client needs after a session-start pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    /// The player record after penalties and streak adjustments.
    pub player: PlayerProgress,
    /// The player's stats (unchanged by the pipeline, returned for
    /// convenience).
    pub stats: PlayerStats,
    /// Every quest with its recomputed status.
    pub quests: Vec<Quest>,
    /// The world snapshot after the decay pass.
    pub world: WorldState,
    /// XP deducted by the reset pass.
    pub penalty_applied: u32,
    /// Whether the daily streak was broken (and has been zeroed).
    pub streak_broken: bool,
    /// User-legible reset and penalty messages.
    pub messages: Vec<String>,
    /// Events emitted by the decay pass.
    pub events: Vec<WorldEvent>,
    /// The chronicle's rating for today.
    pub rating: DayRating,
}

/// Run the full session-start pass for one player.
///
/// The decay pass runs at most once per calendar day: if a chronicle
/// record for `today` already exists, a repeat login re-runs only the
/// (idempotent) quest reset and leaves the world untouched.
///
/// # Errors
///
/// Load failures propagate -- the pipeline cannot run without its
/// inputs. Save failures never do.
pub fn run_session_start<R>(
    repo: &mut R,
    player_id: PlayerId,
    today: NaiveDate,
    config: &EngineConfig,
) -> Result<SessionReport, StoreError>
where
    R: PlayerStore + QuestStore + WorldStore + ChronicleStore,
{
    let boundaries = DayBoundaries::from_today(today);
    let (mut player, mut stats) = repo.load_player(player_id)?;
    let quests = repo.load_quests(player_id)?;
    let mut world = repo.load_world(player_id)?;

    // 1. One batch reset pass over every missed boundary.
    let reset = reset_all(quests, &boundaries, &config.penalties);
    if reset.streak_broken {
        player.streak_days = 0;
    }
    if reset.total_penalty > 0 {
        QuestOutcome::penalty(reset.total_penalty).apply(
            &mut player,
            &mut stats,
            today,
            &config.leveling,
        );
    }

    // 2. The daily decay pass, once per calendar day.
    let already_evaluated = load_or_warn(repo, player_id, today).is_some();
    let events = if already_evaluated {
        Vec::new()
    } else {
        let completed_today: BTreeSet<StatKey> = reset
            .quests
            .iter()
            .filter(|quest| quest.completed_on(today))
            .flat_map(Quest::touched_stats)
            .collect();
        on_daily_decay(&mut world, &completed_today)
    };

    // 3. Chronicle classification. A missing record for yesterday reads
    //    as an absent day.
    let completed_count = count_completed(&reset.quests, today);
    let xp_gained = xp_completed(&reset.quests, today);
    let previous_rating = load_or_warn(repo, player_id, boundaries.yesterday)
        .map_or(DayRating::Absent, |record| record.rating);
    let events_emitted = u32::try_from(events.len()).unwrap_or(u32::MAX);
    let rating = classify(
        completed_count,
        reset.total_penalty,
        events_emitted,
        Some(previous_rating),
    );
    let record = DayRecord {
        day: today,
        quests_completed: completed_count,
        xp_gained,
        xp_lost: reset.total_penalty,
        events_emitted,
        rating,
    };

    // 4. Best-effort writes. The in-memory transition already happened.
    if let Err(err) = repo.save_player(player_id, &player, &stats) {
        tracing::warn!(%player_id, %err, "player write failed, continuing");
    }
    for quest in &reset.quests {
        if let Err(err) = repo.save_quest(player_id, quest) {
            tracing::warn!(%player_id, quest = %quest.id, %err, "quest write failed, continuing");
        }
    }
    if let Err(err) = repo.save_world(player_id, &world) {
        tracing::warn!(%player_id, %err, "world write failed, continuing");
    }
    if let Err(err) = repo.save_day(player_id, &record) {
        tracing::warn!(%player_id, %err, "chronicle write failed, continuing");
    }

    Ok(SessionReport {
        player,
        stats,
        quests: reset.quests,
        world,
        penalty_applied: reset.total_penalty,
        streak_broken: reset.streak_broken,
        messages: reset.messages,
        events,
        rating,
    })
}

/// Load a chronicle day, downgrading failures to "no record".
fn load_or_warn<R: ChronicleStore>(
    repo: &R,
    player_id: PlayerId,
    day: NaiveDate,
) -> Option<DayRecord> {
    match repo.load_day(player_id, day) {
        Ok(record) => record,
        Err(err) => {
            tracing::warn!(%player_id, %day, %err, "chronicle read failed, treating as absent");
            None
        }
    }
}

/// Count quests completed on the given day.
fn count_completed(quests: &[Quest], day: NaiveDate) -> u32 {
    let count = quests.iter().filter(|q| q.completed_on(day)).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Sum the XP rewards of quests completed on the given day.
fn xp_completed(quests: &[Quest], day: NaiveDate) -> u32 {
    quests
        .iter()
        .filter(|q| q.completed_on(day))
        .fold(0_u32, |sum, q| sum.saturating_add(q.xp_reward))
}
