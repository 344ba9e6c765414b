//! The canonical starting settlement.
//!
//! Six districts, one per player stat, each with three tiered structure
//! plots and a resident companion. The first district opens immediately;
//! the rest unlock as the player levels. Four expeditions wait beyond
//! the walls, and the full milestone set starts unearned.

use nexus_types::{
    CompanionId, CompanionMood, CompanionState, DistrictId, DistrictState, Era, ExpeditionId,
    ExpeditionState, MilestoneId, MilestoneKind, MilestoneState, StatKey, StructureId,
    StructureState, WorldState,
};

/// Vitality every district starts with.
const STARTING_VITALITY: u32 = 50;

/// Loyalty every companion starts with.
const STARTING_LOYALTY: u32 = 50;

/// Build the canonical starting world.
pub fn starting_nexus() -> WorldState {
    let districts: Vec<DistrictState> = [
        district(
            StatKey::Physical,
            "The Iron Quarter",
            1,
            [
                ("Training Grounds", 50, 1),
                ("Bathhouse", 150, 5),
                ("Colosseum", 400, 12),
            ],
        ),
        district(
            StatKey::Cognitive,
            "The Athenaeum Ward",
            3,
            [
                ("Reading Room", 50, 3),
                ("Observatory", 150, 8),
                ("Grand Archive", 400, 15),
            ],
        ),
        district(
            StatKey::Mental,
            "The Stillwater Gardens",
            5,
            [
                ("Meditation Grove", 50, 5),
                ("Tea Pavilion", 150, 10),
                ("Sanctum", 400, 18),
            ],
        ),
        district(
            StatKey::Career,
            "The Guildhall District",
            8,
            [
                ("Workshop", 75, 8),
                ("Trade Hall", 200, 14),
                ("Guild Tower", 500, 22),
            ],
        ),
        district(
            StatKey::Financial,
            "The Counting House Row",
            12,
            [
                ("Market Stall", 75, 12),
                ("Counting House", 200, 18),
                ("Gilded Vault", 500, 28),
            ],
        ),
        district(
            StatKey::Creative,
            "The Atelier Commons",
            15,
            [
                ("Open Studio", 75, 15),
                ("Gallery", 200, 22),
                ("Opera House", 500, 35),
            ],
        ),
    ]
    .into_iter()
    .collect();

    let companions = [
        ("Asha", StatKey::Physical),
        ("Quill", StatKey::Cognitive),
        ("Willow", StatKey::Mental),
        ("Bram", StatKey::Career),
        ("Della", StatKey::Financial),
        ("Emrys", StatKey::Creative),
    ]
    .into_iter()
    .filter_map(|(name, stat)| {
        let district_id = districts.iter().find(|d| d.stat == stat).map(|d| d.id)?;
        Some(CompanionState {
            id: CompanionId::new(),
            district: district_id,
            name: name.to_owned(),
            is_present: true,
            loyalty: STARTING_LOYALTY,
            mood: CompanionMood::Content,
            quests_since_return: 0,
        })
    })
    .collect();

    let expeditions = vec![
        expedition("Sunken Causeway", 5, StatKey::Physical, 10, 100),
        expedition("Whispering Archive", 10, StatKey::Cognitive, 15, 250),
        expedition("Glass Saltflats", 20, StatKey::Financial, 20, 500),
        expedition("Starfall Crater", 35, StatKey::Creative, 30, 1000),
    ];

    let milestones = MilestoneKind::ALL
        .into_iter()
        .map(|kind| MilestoneState {
            id: MilestoneId::new(),
            kind,
            is_earned: false,
        })
        .collect();

    WorldState {
        era: Era::Outpost,
        districts,
        companions,
        expeditions,
        milestones,
        events: Vec::new(),
        total_structures_built: 0,
        total_recoveries: 0,
        current_pristine_streak: 0,
        longest_pristine_streak: 0,
    }
}

/// Build one district with its three tiered structure plots.
fn district(
    stat: StatKey,
    name: &str,
    unlock_level: u32,
    plots: [(&str, u32, u32); 3],
) -> DistrictState {
    let structures = plots
        .into_iter()
        .zip(1_u32..)
        .map(|((plot_name, build_cost, level), tier)| StructureState {
            id: StructureId::new(),
            name: plot_name.to_owned(),
            tier,
            is_built: false,
            condition: 0,
            build_cost,
            unlock_level: level,
        })
        .collect();

    DistrictState {
        id: DistrictId::new(),
        stat,
        name: name.to_owned(),
        // The first district is open from the start.
        is_unlocked: unlock_level <= 1,
        unlock_level,
        vitality: STARTING_VITALITY,
        structures,
        consecutive_neglect_days: 0,
    }
}

/// Build one locked expedition.
fn expedition(
    name: &str,
    required_level: u32,
    required_stat: StatKey,
    required_stat_value: u32,
    cost: u32,
) -> ExpeditionState {
    ExpeditionState {
        id: ExpeditionId::new(),
        name: name.to_owned(),
        is_unlocked: false,
        is_completed: false,
        required_level,
        required_stat,
        required_stat_value,
        cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_districts_cover_all_stats() {
        let world = starting_nexus();
        assert_eq!(world.districts.len(), 6);
        for stat in StatKey::ALL {
            assert!(world.districts.iter().any(|d| d.stat == stat));
        }
    }

    #[test]
    fn only_the_first_district_starts_unlocked() {
        let world = starting_nexus();
        let unlocked: Vec<_> = world.districts.iter().filter(|d| d.is_unlocked).collect();
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked.first().map(|d| d.stat), Some(StatKey::Physical));
    }

    #[test]
    fn every_district_has_three_sequential_tiers() {
        let world = starting_nexus();
        for district in &world.districts {
            let tiers: Vec<u32> = district.structures.iter().map(|s| s.tier).collect();
            assert_eq!(tiers, vec![1, 2, 3], "in {}", district.name);
            assert!(district.structures.iter().all(|s| !s.is_built));
        }
    }

    #[test]
    fn every_district_has_a_companion() {
        let world = starting_nexus();
        assert_eq!(world.companions.len(), 6);
        for district in &world.districts {
            assert!(world.companions.iter().any(|c| c.district == district.id));
        }
    }

    #[test]
    fn expeditions_start_locked_and_incomplete() {
        let world = starting_nexus();
        assert_eq!(world.expeditions.len(), 4);
        assert!(
            world
                .expeditions
                .iter()
                .all(|e| !e.is_unlocked && !e.is_completed)
        );
    }

    #[test]
    fn milestones_start_unearned() {
        let world = starting_nexus();
        assert_eq!(world.milestones.len(), MilestoneKind::ALL.len());
        assert!(world.milestones.iter().all(|m| !m.is_earned));
    }

    #[test]
    fn counters_start_at_zero() {
        let world = starting_nexus();
        assert_eq!(world.total_structures_built, 0);
        assert_eq!(world.built_structure_count(), 0);
        assert_eq!(world.total_recoveries, 0);
        assert!(world.events.is_empty());
    }
}
