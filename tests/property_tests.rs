use std::collections::BTreeMap;

use parkade::facility::{EngineOptions, FloorConfig, SlotConfig};
use parkade::schedule::{
    max_non_overlapping, max_non_overlapping_fast, select_non_overlapping, Interval,
};
use parkade::{Facility, FacilityConfig, ParkError, SizeClass, SlotId};
use proptest::prelude::*;

fn arb_intervals() -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::vec((0u64..50, 1u64..12), 0..40).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(entry, len)| Interval::new(entry, entry + len).unwrap())
            .collect()
    })
}

fn arb_size() -> impl Strategy<Value = SizeClass> {
    prop_oneof![
        Just(SizeClass::Small),
        Just(SizeClass::Medium),
        Just(SizeClass::Large),
    ]
}

#[derive(Debug, Clone)]
enum Operation {
    Park { vehicle: u8, kind: &'static str },
    Leave { vehicle: u8 },
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (0u8..8, prop::sample::select(vec!["small", "medium", "large", "bus"]))
            .prop_map(|(vehicle, kind)| Operation::Park { vehicle, kind }),
        (0u8..8).prop_map(|vehicle| Operation::Leave { vehicle }),
    ]
}

fn facility_for(sizes: &[SizeClass]) -> Facility {
    let config = FacilityConfig {
        engine: EngineOptions::default(),
        slots: sizes
            .iter()
            .zip(1u32..)
            .map(|(&size, id)| SlotConfig { id, size })
            .collect(),
        floor: FloorConfig {
            linear: true,
            edges: Vec::new(),
        },
    };
    Facility::from_config(&config).unwrap()
}

proptest! {
    #[test]
    fn prop_schedule_is_permutation_invariant(
        (original, shuffled) in arb_intervals()
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        prop_assert_eq!(max_non_overlapping(&original), max_non_overlapping(&shuffled));
    }

    #[test]
    fn prop_fast_scheduler_matches_dp(intervals in arb_intervals()) {
        let expected = max_non_overlapping(&intervals);
        prop_assert_eq!(max_non_overlapping_fast(&intervals), expected);

        let chain = select_non_overlapping(&intervals);
        prop_assert_eq!(chain.len(), expected);
        for pair in chain.windows(2) {
            prop_assert!(pair[0].precedes(&pair[1]));
        }
    }

    #[test]
    fn prop_allocate_then_release_restores_slots(
        sizes in prop::collection::vec(arb_size(), 1..12),
        kind in prop::sample::select(vec!["small", "medium", "large", "bus"]),
        declared in arb_size(),
    ) {
        let facility = facility_for(&sizes);
        let before = facility.list_slots();
        match facility.allocate("V", declared.as_str(), kind) {
            Ok(slots) => {
                let want = if kind == "bus" { 3 } else { 1 };
                prop_assert_eq!(slots.len(), want);
                for status in facility.list_slots() {
                    if slots.contains(&status.id) {
                        prop_assert!(status.occupied);
                        prop_assert_eq!(status.occupant.as_ref().map(|v| v.as_str()), Some("V"));
                    }
                }
                prop_assert_eq!(facility.release("V").unwrap(), slots);
                prop_assert!(matches!(facility.release("V"), Err(ParkError::NotParked(_))));
            }
            Err(err) => prop_assert_eq!(err, ParkError::NoCapacity),
        }
        prop_assert_eq!(facility.list_slots(), before);
    }

    #[test]
    fn prop_reservations_match_slot_occupants(
        sizes in prop::collection::vec(arb_size(), 1..16),
        ops in prop::collection::vec(arb_operation(), 1..60),
    ) {
        let facility = facility_for(&sizes);
        for op in ops {
            let before = facility.list_slots();
            match op {
                Operation::Park { vehicle, kind } => {
                    let name = format!("V{vehicle}");
                    let size = if kind == "bus" { "large" } else { kind };
                    if let Err(err) = facility.allocate(&name, size, kind) {
                        prop_assert!(matches!(err, ParkError::NoCapacity | ParkError::AlreadyParked(_)));
                        prop_assert_eq!(facility.list_slots(), before);
                    }
                }
                Operation::Leave { vehicle } => {
                    if facility.release(&format!("V{vehicle}")).is_err() {
                        prop_assert_eq!(facility.list_slots(), before);
                    }
                }
            }

            let mut held: BTreeMap<SlotId, String> = BTreeMap::new();
            for reservation in facility.reservations() {
                for &slot in &reservation.slots {
                    prop_assert!(held.insert(slot, reservation.vehicle.to_string()).is_none());
                }
            }
            for status in facility.list_slots() {
                let occupant = status.occupant.as_ref().map(|v| v.to_string());
                prop_assert_eq!(occupant.as_ref(), held.get(&status.id));
                prop_assert_eq!(status.occupied, occupant.is_some());
            }
        }
    }

    #[test]
    fn prop_single_slot_takes_lowest_free_id(
        sizes in prop::collection::vec(arb_size(), 1..16),
        wanted in arb_size(),
    ) {
        let facility = facility_for(&sizes);
        let expected = facility
            .list_slots()
            .into_iter()
            .find(|s| s.size == wanted && !s.occupied)
            .map(|s| s.id);
        let got = facility.allocate("V", wanted.as_str(), wanted.as_str()).ok();
        prop_assert_eq!(got, expected.map(|id| vec![id]));
    }
}
