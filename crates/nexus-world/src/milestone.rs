//! Milestone predicates and the re-check pass.
//!
//! Every milestone is a static predicate over the whole world snapshot,
//! re-evaluated after each mutating engine operation. Earning is
//! monotonic, so re-checking an already-earned milestone is a no-op and
//! an award is never emitted twice.

use nexus_types::{Era, MilestoneKind, WorldEvent, WorldEventKind, WorldState};

/// Display title for a milestone, used in its award event.
pub const fn title(kind: MilestoneKind) -> &'static str {
    match kind {
        MilestoneKind::FirstStructure => "First Foundation",
        MilestoneKind::FiveStructures => "A Growing Skyline",
        MilestoneKind::AllStructuresInDistrict => "District Complete",
        MilestoneKind::AllDistrictsUnlocked => "The Six Quarters",
        MilestoneKind::FirstRecovery => "Back from the Brink",
        MilestoneKind::PristineWeek => "A Pristine Week",
        MilestoneKind::DevotedCompanion => "Devoted Companion",
        MilestoneKind::FullCircle => "Full Circle",
        MilestoneKind::EraTownship => "Township Charter",
        MilestoneKind::GrandNexus => "The Grand Nexus",
    }
}

/// Evaluate a milestone predicate against the current snapshot.
pub fn is_met(kind: MilestoneKind, state: &WorldState) -> bool {
    match kind {
        MilestoneKind::FirstStructure => state.total_structures_built >= 1,
        MilestoneKind::FiveStructures => state.total_structures_built >= 5,
        MilestoneKind::AllStructuresInDistrict => state
            .districts
            .iter()
            .any(|d| !d.structures.is_empty() && d.structures.iter().all(|s| s.is_built)),
        MilestoneKind::AllDistrictsUnlocked => {
            !state.districts.is_empty() && state.districts.iter().all(|d| d.is_unlocked)
        }
        MilestoneKind::FirstRecovery => state.total_recoveries >= 1,
        MilestoneKind::PristineWeek => state.longest_pristine_streak >= 7,
        MilestoneKind::DevotedCompanion => state.companions.iter().any(|c| c.loyalty >= 100),
        MilestoneKind::FullCircle => {
            !state.companions.is_empty() && state.companions.iter().all(|c| c.is_present)
        }
        MilestoneKind::EraTownship => state.era >= Era::Township,
        MilestoneKind::GrandNexus => state.era == Era::Citadel,
    }
}

/// Re-evaluate every milestone, earning any whose predicate now holds.
///
/// Returns the award events for newly earned milestones only. The events
/// are returned, not logged; the calling operation owns the event log.
pub fn check_milestones(state: &mut WorldState) -> Vec<WorldEvent> {
    let mut earned_kinds = Vec::new();
    for milestone in &state.milestones {
        if !milestone.is_earned && is_met(milestone.kind, state) {
            earned_kinds.push(milestone.kind);
        }
    }

    let mut events = Vec::new();
    for kind in earned_kinds {
        if let Some(milestone) = state.milestones.iter_mut().find(|m| m.kind == kind) {
            milestone.is_earned = true;
            tracing::info!(milestone = ?kind, "milestone earned");
            events.push(WorldEvent::new(
                WorldEventKind::Milestone,
                format!("Milestone earned: {}", title(kind)),
            ));
        }
    }
    events
}
