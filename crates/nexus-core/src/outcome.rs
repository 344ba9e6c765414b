//! The atomic quest-outcome transaction.
//!
//! XP, currency, and stat deltas always travel together in one
//! [`QuestOutcome`] value and are applied in one call. This is the only
//! mutation path for [`PlayerProgress`] outside the reset pipeline;
//! bundling the three deltas prevents the partial-update bugs that three
//! independent field writes invite.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use nexus_types::{PlayerProgress, PlayerStats, Quest, StatKey};

use crate::config::LevelingConfig;
use crate::leveling;

/// One atomic bundle of player-facing deltas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestOutcome {
    /// Signed XP change. Positive for completions, negative for
    /// reversals and penalties.
    pub xp_delta: i64,
    /// Signed credit change.
    pub credit_delta: i64,
    /// Signed stat changes, keyed by stat.
    pub stat_deltas: BTreeMap<StatKey, i64>,
}

impl QuestOutcome {
    /// The outcome of completing a quest: its rewards, as declared.
    ///
    /// A quest with an empty reward map but a linked stat grants that
    /// stat a single point (the legacy path).
    pub fn completion(quest: &Quest) -> Self {
        let mut stat_deltas: BTreeMap<StatKey, i64> = quest
            .stat_rewards
            .iter()
            .map(|(&stat, &points)| (stat, i64::from(points)))
            .collect();
        if stat_deltas.is_empty()
            && let Some(stat) = quest.linked_stat
        {
            stat_deltas.insert(stat, 1);
        }
        Self {
            xp_delta: i64::from(quest.xp_reward),
            credit_delta: i64::from(quest.currency_reward),
            stat_deltas,
        }
    }

    /// The exact inverse of [`Self::completion`], for un-completing.
    pub fn reversal(quest: &Quest) -> Self {
        let completion = Self::completion(quest);
        Self {
            xp_delta: completion.xp_delta.saturating_neg(),
            credit_delta: completion.credit_delta.saturating_neg(),
            stat_deltas: completion
                .stat_deltas
                .into_iter()
                .map(|(stat, delta)| (stat, delta.saturating_neg()))
                .collect(),
        }
    }

    /// A pure XP penalty, as produced by the reset pass.
    pub fn penalty(amount: u32) -> Self {
        Self {
            xp_delta: i64::from(amount).saturating_neg(),
            credit_delta: 0,
            stat_deltas: BTreeMap::new(),
        }
    }

    /// Apply the bundle to the player record and stats in one step.
    ///
    /// XP routes through the leveling calculator; credits and stats
    /// saturate at zero. A positive-XP outcome on a day the player has
    /// not yet been active extends the daily streak and stamps
    /// `last_active`.
    pub fn apply(
        &self,
        player: &mut PlayerProgress,
        stats: &mut PlayerStats,
        today: NaiveDate,
        config: &LevelingConfig,
    ) {
        let xp = i64::from(player.current_xp).saturating_add(self.xp_delta);
        let normalized = leveling::normalize(player.level, xp, player.xp_to_next_level, config);
        player.level = normalized.level;
        player.current_xp = normalized.xp;
        player.xp_to_next_level = normalized.threshold;

        let credits = i64::from(player.credits).saturating_add(self.credit_delta);
        player.credits = u32::try_from(credits.max(0)).unwrap_or(u32::MAX);

        for (&stat, &delta) in &self.stat_deltas {
            let entry = stats.entry(stat).or_insert(0);
            let value = i64::from(*entry).saturating_add(delta);
            *entry = u32::try_from(value.max(0)).unwrap_or(u32::MAX);
        }

        if self.xp_delta > 0 && player.last_active != today {
            player.streak_days = player.streak_days.saturating_add(1);
            player.last_active = today;
        }

        tracing::debug!(
            level = player.level,
            xp = player.current_xp,
            credits = player.credits,
            "quest outcome applied"
        );
    }
}
