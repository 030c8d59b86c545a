use std::sync::atomic::Ordering;
use std::sync::Arc;

use parkade::facility::{CounterMetrics, FloorConfig, NearestSlot};
use parkade::{
    Command, Facility, FacilityConfig, Outcome, ParkError, Result, SizeClass, SlotId, VehicleId,
};

fn demo() -> Result<Facility> {
    Facility::from_config(&FacilityConfig::demo())
}

fn ids(raw: &[u32]) -> Vec<SlotId> {
    raw.iter().copied().map(SlotId).collect()
}

#[test]
fn reference_walkthrough() -> Result<()> {
    let facility = demo()?;

    assert_eq!(facility.allocate("V1", "small", "small")?, ids(&[1]));
    assert_eq!(facility.allocate("V2", "?", "bus")?, ids(&[2, 3, 4]));
    assert_eq!(facility.shortest_hops(2, 5)?, 1);
    assert_eq!(facility.shortest_hops(1, 6)?, 3);

    let slots = facility.list_slots();
    assert_eq!(
        slots.iter().map(|s| s.id).collect::<Vec<_>>(),
        ids(&[1, 2, 3, 4, 5, 6])
    );
    for slot in &slots[1..4] {
        assert!(slot.occupied);
        assert_eq!(slot.occupant.as_ref().map(|v| v.as_str()), Some("V2"));
    }
    assert!(!slots[4].occupied && slots[4].occupant.is_none());

    assert_eq!(facility.release("V2")?, ids(&[2, 3, 4]));
    assert_eq!(
        facility.release("V2").unwrap_err(),
        ParkError::NotParked(VehicleId::new("V2")?)
    );
    assert!(facility.list_slots()[1..4].iter().all(|s| !s.occupied));
    Ok(())
}

#[test]
fn hops_on_plain_chain() -> Result<()> {
    let mut config = FacilityConfig::demo();
    config.floor.edges.clear();
    let facility = Facility::from_config(&config)?;
    assert_eq!(facility.shortest_hops(1, 6)?, 5);
    assert_eq!(facility.shortest_hops(6, 1)?, 5);
    assert_eq!(facility.shortest_hops(3, 3)?, 0);
    Ok(())
}

#[test]
fn disconnected_slots_are_unreachable() -> Result<()> {
    let mut config = FacilityConfig::demo();
    config.floor = FloorConfig {
        linear: false,
        edges: vec![[1, 2], [4, 5]],
    };
    let facility = Facility::from_config(&config)?;
    assert_eq!(facility.shortest_hops(1, 2)?, 1);
    assert_eq!(
        facility.shortest_hops(1, 5).unwrap_err(),
        ParkError::Unreachable { src: 1, dest: 5 }
    );
    assert_eq!(
        facility.shortest_hops(0, 5).unwrap_err(),
        ParkError::OutOfRange { slot: 0, len: 6 }
    );
    Ok(())
}

#[test]
fn already_parked_leaves_state_untouched() -> Result<()> {
    let facility = demo()?;
    facility.allocate("V1", "small", "small")?;
    let before = facility.list_slots();

    let err = facility.allocate("V1", "large", "large").unwrap_err();
    assert_eq!(err, ParkError::AlreadyParked(VehicleId::new("V1")?));
    assert_eq!(facility.list_slots(), before);
    assert_eq!(facility.reservations().len(), 1);
    Ok(())
}

#[test]
fn bus_without_window_reports_no_capacity() -> Result<()> {
    let facility = demo()?;
    facility.allocate("V1", "small", "small")?;
    facility.allocate("V2", "?", "bus")?;
    let before = facility.list_slots();

    assert_eq!(facility.allocate("V3", "?", "bus").unwrap_err(), ParkError::NoCapacity);
    assert_eq!(facility.list_slots(), before);
    Ok(())
}

#[test]
fn bus_window_skips_past_occupied_slot() -> Result<()> {
    let facility = demo()?;
    assert_eq!(facility.allocate("L1", "large", "large")?, ids(&[3]));
    assert_eq!(facility.allocate("B1", "medium", "bus")?, ids(&[4, 5, 6]));
    Ok(())
}

#[test]
fn single_slot_uses_lowest_free_id_of_size() -> Result<()> {
    let facility = demo()?;
    assert_eq!(facility.allocate("A", "small", "small")?, ids(&[1]));
    assert_eq!(facility.allocate("B", "small", "small")?, ids(&[5]));
    assert_eq!(facility.allocate("C", "small", "small").unwrap_err(), ParkError::NoCapacity);
    facility.release("A")?;
    assert_eq!(facility.allocate("C", "small", "small")?, ids(&[1]));
    Ok(())
}

#[test]
fn schedule_reference_batch() -> Result<()> {
    let facility = demo()?;
    let entries = [1, 3, 0, 5, 8, 9];
    let exits = [2, 4, 6, 7, 10, 11];
    assert_eq!(facility.max_schedule(&entries, &exits)?, 4);
    assert_eq!(facility.max_schedule(&[], &[])?, 0);
    assert_eq!(
        facility.max_schedule(&[1, 2], &[3]).unwrap_err(),
        ParkError::ScheduleLengthMismatch {
            entries: 2,
            exits: 1
        }
    );
    Ok(())
}

#[test]
fn commands_drive_the_facility() -> Result<()> {
    let facility = demo()?;
    let run = |line: &str| -> Result<Outcome> { facility.execute(line.parse::<Command>()?) };

    match run("park V1 small small")? {
        Outcome::Parked { vehicle, slots } => {
            assert_eq!(vehicle, "V1");
            assert_eq!(slots, ids(&[1]));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    match run("nearest 3 small")? {
        Outcome::Nearest { nearest } => assert_eq!(
            nearest,
            Some(NearestSlot {
                slot: SlotId(5),
                hops: 2
            })
        ),
        other => panic!("unexpected outcome {other:?}"),
    }
    match run("schedule 1,3,0,5,8,9 2,4,6,7,10,11")? {
        Outcome::Schedule { count, chain } => {
            assert_eq!(count, 4);
            assert_eq!(chain.len(), 4);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert!(matches!(run("leave V1")?, Outcome::Released { .. }));
    assert!(matches!(run("3 V1"), Err(ParkError::NotParked(_))));
    assert!(matches!(run("park V9 small truck"), Err(ParkError::InvalidType(_))));
    assert!(matches!(run("quit")?, Outcome::Quit));
    Ok(())
}

#[test]
fn counters_track_operations() -> Result<()> {
    let metrics = Arc::new(CounterMetrics::default());
    let facility = demo()?.with_metrics(metrics.clone());

    facility.allocate("V1", "small", "small")?;
    facility.allocate("V2", "?", "bus")?;
    let _ = facility.allocate("V3", "?", "bus");
    let _ = facility.allocate("V4", "small", "truck");
    facility.release("V1")?;
    let _ = facility.release("V1");
    facility.shortest_hops(1, 6)?;
    facility.max_schedule(&[1, 3], &[2, 4])?;

    assert_eq!(metrics.allocations.load(Ordering::Relaxed), 2);
    assert_eq!(metrics.slots_allocated.load(Ordering::Relaxed), 4);
    assert_eq!(metrics.rejected_no_capacity.load(Ordering::Relaxed), 1);
    assert_eq!(metrics.rejected_other.load(Ordering::Relaxed), 1);

    let report = facility.stats();
    assert_eq!(report.slots, 6);
    assert_eq!(report.occupied, 3);
    assert_eq!(report.active_reservations, 1);
    let counters = report.counters.expect("counter metrics keep a snapshot");
    assert_eq!(counters.releases, 1);
    assert_eq!(counters.releases_rejected, 1);
    assert_eq!(counters.hop_queries, 1);
    assert_eq!(counters.schedule_runs, 1);
    let small = report
        .by_size
        .iter()
        .find(|s| s.size == SizeClass::Small)
        .expect("small row");
    assert_eq!((small.total, small.free), (2, 2));
    Ok(())
}
