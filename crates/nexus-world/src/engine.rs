//! The world simulation operations.
//!
//! Six operations, each taking the world snapshot by mutable reference
//! and returning the events it emitted. Callers clone the snapshot before
//! calling; the mutated copy becomes the next source of truth only if the
//! operation succeeds. Validation failures return [`WorldError`] before
//! any mutation happens.
//!
//! # Order of operations (quest completion)
//!
//! 1. Resolve touched stats (reward map, else linked stat)
//! 2. Grow each bound district's vitality, reset neglect
//! 3. Emit Recovery when a district leaves the critical zone
//! 4. Grow companion loyalty; count absent companions toward a return
//! 5. Recompute the era from player level (never downward)
//! 6. Scan districts and expeditions for new unlocks
//! 7. Re-check every milestone
//!
//! Every mutating operation ends with the milestone pass; earning is
//! monotonic, so the pass is idempotent.

use std::collections::BTreeSet;

use nexus_types::{
    Era, PlayerStats, Quest, StatKey, VitalityBand, WorldEvent, WorldEventKind, WorldState,
};

use crate::companion::{
    DEPART_BELOW, NEGLECT_LOYALTY_LOSS, RETURN_QUESTS, RETURN_VITALITY, mood_for,
};
use crate::error::WorldError;
use crate::milestone::check_milestones;
use crate::structure::{REPAIR_REFUSAL_CONDITION, repair_cost};
use crate::vitality::{
    BUILD_VITALITY_BONUS, PRISTINE_THRESHOLD, STRUCTURE_HEAVY_WEAR, STRUCTURE_HEAVY_WEAR_BELOW,
    STRUCTURE_WEAR, STRUCTURE_WEAR_BELOW, TOUCH_VITALITY_BONUS, neglect_decay,
    quest_vitality_gain,
};

/// Result of a successful credit-spending operation.
///
/// The engine never sees the player's wallet; it validates against the
/// passed-in balance and reports what to debit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReceipt {
    /// Credits the caller must debit from the player.
    pub credits_spent: u32,
    /// Events emitted by the operation, already appended to the log.
    pub events: Vec<WorldEvent>,
}

/// The settlement era for a player level (thresholds 1/5/15/30/50).
pub const fn era_for_level(level: u32) -> Era {
    match level {
        50.. => Era::Citadel,
        30..=49 => Era::Township,
        15..=29 => Era::Village,
        5..=14 => Era::Hamlet,
        0..=4 => Era::Outpost,
    }
}

/// Apply a completed quest to the world.
///
/// Grows the bound districts and companions, recomputes the era, scans
/// for unlocks, and re-checks milestones. Locked districts are skipped
/// silently: completing a quest is never an error.
pub fn on_quest_completed(
    state: &mut WorldState,
    quest: &Quest,
    player_level: u32,
    player_stats: &PlayerStats,
) -> Vec<WorldEvent> {
    let mut emitted = Vec::new();
    let gain = i64::from(quest_vitality_gain(quest.difficulty, quest.cadence));

    for stat in quest.touched_stats() {
        let Some(district) = state.district_for_stat_mut(stat) else {
            continue;
        };
        if !district.is_unlocked {
            continue;
        }

        let before = district.band();
        district.apply_vitality_delta(gain);
        district.consecutive_neglect_days = 0;
        let after = district.band();
        let district_id = district.id;
        let district_name = district.name.clone();
        let vitality_now = district.vitality;

        if before.is_critical() && !after.is_critical() {
            state.total_recoveries = state.total_recoveries.saturating_add(1);
            emitted.push(WorldEvent::new(
                WorldEventKind::Recovery,
                format!("{district_name} has pulled back from ruin"),
            ));
        }

        if let Some(companion) = state.companion_for_district_mut(district_id) {
            companion.apply_loyalty_delta(1);
            if companion.is_present {
                companion.mood = mood_for(vitality_now, companion.loyalty);
            } else {
                companion.quests_since_return = companion.quests_since_return.saturating_add(1);
                if companion.quests_since_return >= RETURN_QUESTS
                    && vitality_now >= RETURN_VITALITY
                {
                    companion.is_present = true;
                    companion.quests_since_return = 0;
                    companion.mood = mood_for(vitality_now, companion.loyalty);
                    emitted.push(WorldEvent::new(
                        WorldEventKind::Companion,
                        format!("{} has returned to {district_name}", companion.name),
                    ));
                }
            }
        }
    }

    state.raise_era(era_for_level(player_level));
    emitted.extend(unlock_scan(state, player_level, player_stats));
    emitted.extend(check_milestones(state));
    log_events(state, &emitted);
    emitted
}

/// Undo a quest completion's effect on the world.
///
/// The exact inverse of the vitality delta, and nothing else: no events,
/// no companion or neglect changes. Undoing an action is silent by design.
pub fn on_quest_uncompleted(state: &mut WorldState, quest: &Quest) {
    let gain = i64::from(quest_vitality_gain(quest.difficulty, quest.cadence));
    for stat in quest.touched_stats() {
        if let Some(district) = state.district_for_stat_mut(stat)
            && district.is_unlocked
        {
            district.apply_vitality_delta(gain.saturating_neg());
        }
    }
}

/// Run the daily decay pass over every unlocked district.
///
/// `completed_stats_today` is the set of stats touched by today's
/// completions; their districts get a small bonus, everything else decays
/// at an accelerating rate. Structures wear in low-vitality districts,
/// companions depart from ruined ones, and the pristine streak is
/// re-evaluated at the end.
pub fn on_daily_decay(
    state: &mut WorldState,
    completed_stats_today: &BTreeSet<StatKey>,
) -> Vec<WorldEvent> {
    let mut emitted = Vec::new();

    for index in 0..state.districts.len() {
        let Some(district) = state.districts.get_mut(index) else {
            continue;
        };
        if !district.is_unlocked {
            continue;
        }

        let touched = completed_stats_today.contains(&district.stat);
        let before = district.band();
        if touched {
            district.apply_vitality_delta(i64::from(TOUCH_VITALITY_BONUS));
            district.consecutive_neglect_days = 0;
        } else {
            district.consecutive_neglect_days =
                district.consecutive_neglect_days.saturating_add(1);
            let decay = neglect_decay(district.consecutive_neglect_days);
            district.apply_vitality_delta(i64::from(decay).saturating_neg());
        }
        let after = district.band();
        let district_id = district.id;
        let district_name = district.name.clone();
        let vitality_now = district.vitality;

        // Built structures wear in a neglected district.
        if vitality_now < STRUCTURE_WEAR_BELOW {
            let wear = if vitality_now < STRUCTURE_HEAVY_WEAR_BELOW {
                STRUCTURE_HEAVY_WEAR
            } else {
                STRUCTURE_WEAR
            };
            for structure in district.structures.iter_mut().filter(|s| s.is_built) {
                structure.apply_condition_delta(i64::from(wear).saturating_neg());
            }
        }

        if after.rank() < before.rank()
            && matches!(
                after,
                VitalityBand::Worn | VitalityBand::Decaying | VitalityBand::Ruined
            )
        {
            emitted.push(WorldEvent::new(
                WorldEventKind::Decay,
                format!("{district_name} is sliding into neglect"),
            ));
        }

        if let Some(companion) = state.companion_for_district_mut(district_id) {
            if companion.is_present && vitality_now < DEPART_BELOW {
                companion.is_present = false;
                companion.quests_since_return = 0;
                companion.mood = mood_for(vitality_now, companion.loyalty);
                emitted.push(WorldEvent::new(
                    WorldEventKind::Companion,
                    format!("{} has left {district_name}", companion.name),
                ));
            } else if companion.is_present {
                if !touched {
                    companion.apply_loyalty_delta(
                        i64::from(NEGLECT_LOYALTY_LOSS).saturating_neg(),
                    );
                }
                companion.mood = mood_for(vitality_now, companion.loyalty);
            }
        }
    }

    // Pristine streak: every unlocked district held the line today.
    let pristine = state
        .districts
        .iter()
        .filter(|d| d.is_unlocked)
        .all(|d| d.vitality >= PRISTINE_THRESHOLD);
    if pristine {
        state.current_pristine_streak = state.current_pristine_streak.saturating_add(1);
        state.longest_pristine_streak = state
            .longest_pristine_streak
            .max(state.current_pristine_streak);
    } else {
        state.current_pristine_streak = 0;
    }

    emitted.extend(check_milestones(state));
    log_events(state, &emitted);
    emitted
}

/// Build a structure on one of a district's plots.
///
/// Validation order: the structure exists in the district, the district
/// is unlocked, the plot is not already built, the player's level meets
/// the structure's requirement, every lower tier is built, and the
/// player can afford it. Nothing mutates until all checks pass.
pub fn build_structure(
    state: &mut WorldState,
    district_id: nexus_types::DistrictId,
    structure_id: nexus_types::StructureId,
    player_level: u32,
    player_credits: u32,
) -> Result<ActionReceipt, WorldError> {
    let district = state
        .districts
        .iter_mut()
        .find(|d| d.id == district_id)
        .ok_or(WorldError::DistrictNotFound(district_id))?;

    let structure = district
        .structure(structure_id)
        .ok_or(WorldError::StructureNotFound {
            structure: structure_id,
            district: district_id,
        })?;
    let (tier, cost, required_level) = (structure.tier, structure.build_cost, structure.unlock_level);

    if !district.is_unlocked {
        return Err(WorldError::DistrictLocked(district_id));
    }
    if district.structure(structure_id).is_some_and(|s| s.is_built) {
        return Err(WorldError::AlreadyBuilt(structure_id));
    }
    if player_level < required_level {
        return Err(WorldError::LevelTooLow {
            required: required_level,
            actual: player_level,
        });
    }
    if tier > 1 && !district.tiers_built_below(tier) {
        return Err(WorldError::PreviousTierNotBuilt {
            missing_tier: tier.saturating_sub(1),
        });
    }
    if player_credits < cost {
        return Err(WorldError::InsufficientCredits {
            required: cost,
            available: player_credits,
        });
    }

    let district_name = district.name.clone();
    let mut structure_name = String::new();
    if let Some(structure) = district.structures.iter_mut().find(|s| s.id == structure_id) {
        structure.is_built = true;
        structure.condition = 100;
        structure_name = structure.name.clone();
    }
    district.apply_vitality_delta(i64::from(BUILD_VITALITY_BONUS));
    state.total_structures_built = state.total_structures_built.saturating_add(1);

    tracing::info!(structure = %structure_name, district = %district_name, "structure built");
    let mut events = vec![WorldEvent::new(
        WorldEventKind::Build,
        format!("{structure_name} now stands in {district_name}"),
    )];
    events.extend(check_milestones(state));
    log_events(state, &events);
    Ok(ActionReceipt {
        credits_spent: cost,
        events,
    })
}

/// Repair a built structure back to full condition.
///
/// Costs a damage-proportional fraction of the build price, never less
/// than the repair floor, and refuses structures already at 95+.
pub fn repair_structure(
    state: &mut WorldState,
    district_id: nexus_types::DistrictId,
    structure_id: nexus_types::StructureId,
    player_credits: u32,
) -> Result<ActionReceipt, WorldError> {
    let district = state
        .districts
        .iter_mut()
        .find(|d| d.id == district_id)
        .ok_or(WorldError::DistrictNotFound(district_id))?;

    let structure = district
        .structure(structure_id)
        .ok_or(WorldError::StructureNotFound {
            structure: structure_id,
            district: district_id,
        })?;
    if !structure.is_built {
        return Err(WorldError::NotBuilt(structure_id));
    }
    if structure.condition >= REPAIR_REFUSAL_CONDITION {
        return Err(WorldError::ConditionTooHigh {
            condition: structure.condition,
        });
    }

    let cost = repair_cost(structure.build_cost, structure.condition);
    if player_credits < cost {
        return Err(WorldError::InsufficientCredits {
            required: cost,
            available: player_credits,
        });
    }

    let district_name = district.name.clone();
    let mut structure_name = String::new();
    if let Some(structure) = district.structures.iter_mut().find(|s| s.id == structure_id) {
        structure.condition = 100;
        structure_name = structure.name.clone();
    }

    let mut events = vec![WorldEvent::new(
        WorldEventKind::Recovery,
        format!("{structure_name} in {district_name} has been restored"),
    )];
    events.extend(check_milestones(state));
    log_events(state, &events);
    Ok(ActionReceipt {
        credits_spent: cost,
        events,
    })
}

/// Launch an unlocked expedition.
///
/// One-way: a completed expedition can never be launched again.
pub fn launch_expedition(
    state: &mut WorldState,
    expedition_id: nexus_types::ExpeditionId,
    player_level: u32,
    player_stats: &PlayerStats,
    player_credits: u32,
) -> Result<ActionReceipt, WorldError> {
    let expedition = state
        .expeditions
        .iter_mut()
        .find(|e| e.id == expedition_id)
        .ok_or(WorldError::ExpeditionNotFound(expedition_id))?;

    if !expedition.is_unlocked {
        return Err(WorldError::ExpeditionLocked(expedition_id));
    }
    if expedition.is_completed {
        return Err(WorldError::ExpeditionAlreadyCompleted(expedition_id));
    }
    if player_level < expedition.required_level {
        return Err(WorldError::LevelTooLow {
            required: expedition.required_level,
            actual: player_level,
        });
    }
    let stat_value = player_stats
        .get(&expedition.required_stat)
        .copied()
        .unwrap_or(0);
    if stat_value < expedition.required_stat_value {
        return Err(WorldError::StatTooLow {
            stat: expedition.required_stat,
            required: expedition.required_stat_value,
            actual: stat_value,
        });
    }
    if player_credits < expedition.cost {
        return Err(WorldError::InsufficientCredits {
            required: expedition.cost,
            available: player_credits,
        });
    }

    expedition.is_completed = true;
    let cost = expedition.cost;
    let name = expedition.name.clone();

    let mut events = vec![WorldEvent::new(
        WorldEventKind::Discovery,
        format!("The {name} expedition has returned triumphant"),
    )];
    events.extend(check_milestones(state));
    log_events(state, &events);
    Ok(ActionReceipt {
        credits_spent: cost,
        events,
    })
}

/// Scan for districts and expeditions that just became eligible.
fn unlock_scan(
    state: &mut WorldState,
    player_level: u32,
    player_stats: &PlayerStats,
) -> Vec<WorldEvent> {
    let mut events = Vec::new();
    for district in &mut state.districts {
        if !district.is_unlocked && player_level >= district.unlock_level {
            district.is_unlocked = true;
            events.push(WorldEvent::new(
                WorldEventKind::Unlock,
                format!("{} is now open to settlers", district.name),
            ));
        }
    }
    for expedition in &mut state.expeditions {
        let stat_value = player_stats
            .get(&expedition.required_stat)
            .copied()
            .unwrap_or(0);
        if !expedition.is_unlocked
            && player_level >= expedition.required_level
            && stat_value >= expedition.required_stat_value
        {
            expedition.is_unlocked = true;
            events.push(WorldEvent::new(
                WorldEventKind::Discovery,
                format!("Scouts bring word of the {}", expedition.name),
            ));
        }
    }
    events
}

/// Append emitted events to the world's bounded log, newest first.
fn log_events(state: &mut WorldState, events: &[WorldEvent]) {
    for event in events {
        state.push_event(event.clone());
    }
}
