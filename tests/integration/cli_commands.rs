use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use parkade::FacilityConfig;
use serde_json::Value;
use tempfile::TempDir;

fn setup_config() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("facility.toml");
    FacilityConfig::demo().persist(&path).expect("write demo layout");
    (dir, path)
}

fn json_stdout(args: &[&str], config: &PathBuf) -> Value {
    let output = cargo_bin_cmd!("parkade")
        .arg("--config")
        .arg(config)
        .args(["--format", "json"])
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("valid json")
}

#[test]
fn slots_lists_layout_in_id_order() {
    let (_dir, config) = setup_config();
    let json = json_stdout(&["slots"], &config);
    assert_eq!(json["outcome"], "slots");
    let slots = json["slots"].as_array().expect("slot array");
    assert_eq!(slots.len(), 6);
    assert_eq!(slots[0]["id"], 1);
    assert_eq!(slots[0]["size"], "small");
    assert_eq!(slots[2]["size"], "large");
    assert!(slots.iter().all(|s| s["occupied"] == false));
}

#[test]
fn hops_and_path_follow_cross_aisle() {
    let (_dir, config) = setup_config();
    let json = json_stdout(&["hops", "1", "6"], &config);
    assert_eq!(json["hops"], 3);

    let json = json_stdout(&["path", "1", "6"], &config);
    let route: Vec<u64> = json["slots"]
        .as_array()
        .expect("route")
        .iter()
        .filter_map(Value::as_u64)
        .collect();
    assert_eq!(route, vec![1, 2, 5, 6]);
}

#[test]
fn hops_out_of_range_fails() {
    let (_dir, config) = setup_config();
    cargo_bin_cmd!("parkade")
        .arg("--config")
        .arg(&config)
        .args(["hops", "0", "7"])
        .assert()
        .failure();
}

#[test]
fn schedule_reports_count_and_chain() {
    let (_dir, config) = setup_config();
    let json = json_stdout(
        &[
            "schedule",
            "--entries",
            "1,3,0,5,8,9",
            "--exits",
            "2,4,6,7,10,11",
        ],
        &config,
    );
    assert_eq!(json["count"], 4);
    assert_eq!(json["chain"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["chain"][0]["entry"], 1);
}

#[test]
fn shell_runs_commands_and_survives_errors() {
    let (_dir, config) = setup_config();
    let assert = cargo_bin_cmd!("parkade")
        .arg("--config")
        .arg(&config)
        .args(["--theme", "plain", "shell"])
        .write_stdin("park V1 small small\n2 V2 bus\npark V1 large large\nhops 2 5\nleave V2\nfly\nquit\nlist\n")
        .assert()
        .success();
    let output = assert.get_output();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stdout.contains("V1 parked in slot(s) 1"), "{stdout}");
    assert!(stdout.contains("V2 parked in slot(s) 2, 3, 4"), "{stdout}");
    assert!(stdout.contains("hops 2 -> 5: 1"), "{stdout}");
    assert!(stdout.contains("V2 left; freed slot(s) 2, 3, 4"), "{stdout}");
    assert!(stderr.contains("already holds a reservation"), "{stderr}");
    assert!(stderr.contains("unknown command"), "{stderr}");
    // `list` after `quit` never runs.
    assert!(!stdout.contains("Slots"), "{stdout}");
}

#[test]
fn shell_json_reports_error_kinds() {
    let (_dir, config) = setup_config();
    let output = cargo_bin_cmd!("parkade")
        .arg("--config")
        .arg(&config)
        .args(["--format", "json", "shell"])
        .write_stdin("leave GHOST\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(json["error"], "not_parked");
}

#[test]
fn init_config_refuses_to_overwrite() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("conf").join("facility.toml");
    cargo_bin_cmd!("parkade")
        .args(["init-config", "--path"])
        .arg(&path)
        .assert()
        .success();
    assert_eq!(
        FacilityConfig::load(&path).expect("load written layout"),
        FacilityConfig::demo()
    );

    cargo_bin_cmd!("parkade")
        .args(["init-config", "--path"])
        .arg(&path)
        .assert()
        .failure();
    cargo_bin_cmd!("parkade")
        .args(["init-config", "--force", "--path"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn completions_are_generated() {
    let output = cargo_bin_cmd!("parkade")
        .args(["completions", "bash"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(String::from_utf8_lossy(&output).contains("parkade"));
}
