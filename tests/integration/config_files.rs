use std::error::Error;
use std::fs;

use parkade::facility::ConfigError;
use parkade::{Facility, FacilityConfig, ParkError, SlotId};
use tempfile::TempDir;

type TestResult = std::result::Result<(), Box<dyn Error>>;

#[test]
fn layout_file_drives_the_facility() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("garage.toml");
    fs::write(
        &path,
        r#"
[engine]
bus_slots = 2

[[slots]]
id = 3
size = "small"

[[slots]]
id = 7
size = "large"

[[slots]]
id = 9
size = "large"

[[slots]]
id = 12
size = "medium"

[floor]
edges = [[1, 2], [2, 3], [1, 4]]
"#,
    )?;

    let config = FacilityConfig::load(&path)?;
    let facility = Facility::from_config(&config)?;

    let ids: Vec<SlotId> = facility.list_slots().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![SlotId(3), SlotId(7), SlotId(9), SlotId(12)]);
    assert_eq!(facility.allocate("L", "large", "large")?, vec![SlotId(7)]);
    assert_eq!(facility.allocate("B", "?", "bus")?, vec![SlotId(9), SlotId(12)]);
    assert_eq!(facility.shortest_hops(3, 4)?, 3);
    assert_eq!(
        facility.shortest_path(3, 4)?,
        vec![SlotId(9), SlotId(7), SlotId(3), SlotId(12)]
    );
    Ok(())
}

#[test]
fn persist_creates_parent_directories() -> TestResult {
    let dir = TempDir::new()?;
    let target = dir.path().join("nested").join("parkade").join("facility.toml");
    let written = FacilityConfig::demo().persist(&target)?;
    assert_eq!(written, target);
    assert_eq!(FacilityConfig::load(&target)?, FacilityConfig::demo());
    Ok(())
}

#[test]
fn missing_file_reports_path() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("absent.toml");
    match FacilityConfig::load(&path) {
        Err(ConfigError::Read { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected read error, got {other:?}"),
    }
}

#[test]
fn malformed_layouts_are_rejected() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("bad.toml");

    fs::write(&path, "[[slots]]\nid = \"one\"\nsize = \"small\"\n")?;
    assert!(matches!(
        FacilityConfig::load(&path),
        Err(ConfigError::Parse { .. })
    ));

    let duplicate = FacilityConfig::from_toml_str(
        "[[slots]]\nid = 4\nsize = \"small\"\n\n[[slots]]\nid = 4\nsize = \"large\"\n",
    )?;
    assert_eq!(
        Facility::from_config(&duplicate).unwrap_err(),
        ParkError::DuplicateSlot(SlotId(4))
    );

    let mut out_of_range = FacilityConfig::demo();
    out_of_range.floor.edges.push([6, 7]);
    assert!(matches!(
        Facility::from_config(&out_of_range).unwrap_err(),
        ParkError::InvalidEdge { a: 6, b: 7, len: 6 }
    ));

    let mut no_bus = FacilityConfig::demo();
    no_bus.engine.bus_slots = 0;
    assert!(matches!(
        Facility::from_config(&no_bus).unwrap_err(),
        ParkError::InvalidLayout(_)
    ));
    Ok(())
}
