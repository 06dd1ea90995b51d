use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn foon_bin() -> String {
    // Provided by Cargo for integration tests of binaries.
    env!("CARGO_BIN_EXE_foon").to_string()
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../fixtures/tiny")
        .join(name)
}

/// Config pointing at the shipped fixtures, output under `dir`.
fn write_config(dir: &Path, extra: &str) -> PathBuf {
    let yaml = format!(
        r#"inputs:
  foon: "{}"
  kitchen: "{}"
  utensils: "{}"
  goals: "{}"
  motion_rates: "{}"
search:
  simulations: 300
  seed: 7
output:
  dir: "out"
{extra}"#,
        fixture("foon.json").display(),
        fixture("kitchen.json").display(),
        fixture("utensils.txt").display(),
        fixture("goal_nodes.json").display(),
        fixture("motion.txt").display(),
    );
    let path = dir.join("cfg.yaml");
    fs::write(&path, yaml).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    let out = Command::new(foon_bin()).args(args).output().unwrap();
    assert!(
        out.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&out.stderr)
    );
    out
}

#[test]
fn plan_writes_task_tree_manifest_and_events() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path(), "");
    let events = dir.path().join("events.ndjson");

    let out = run(&[
        "plan",
        "--config",
        cfg.to_str().unwrap(),
        "--events",
        events.to_str().unwrap(),
    ]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("The goal node 'cake' does not exist in FOON."));

    let out_dir = dir.path().join("out");
    let tree = fs::read_to_string(out_dir.join("output_MCTS_egg.txt")).unwrap();
    assert!(tree.starts_with("//\n"));
    let pour = tree.find("M\tpour").unwrap();
    let boil_water = tree.find("O\tstove\t0").unwrap();
    let boil_egg = tree.find("O\tegg\t0").unwrap();
    assert!(pour < boil_water && boil_water < boil_egg);
    assert!(!tree.contains("microwave"));
    assert!(!out_dir.join("output_MCTS_cake.txt").exists());

    let manifest = foon_logging::read_manifest(out_dir.join("run.json")).unwrap();
    assert_eq!(manifest.goals_total, 2);
    assert_eq!(manifest.goals_planned, 1);
    assert_eq!(manifest.goals_missing, 1);
    assert_eq!(manifest.seed, 7);
    assert_eq!(manifest.simulations, 300);
    assert_eq!(manifest.stats_scope, "shared");
    assert!(manifest.config_hash.is_some());

    let lines: Vec<serde_json::Value> = fs::read_to_string(&events)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let kinds: Vec<&str> = lines.iter().map(|v| v["event"].as_str().unwrap()).collect();
    assert_eq!(
        kinds,
        ["decision", "decision", "decision", "plan", "goal_missing"]
    );
    assert_eq!(lines[0]["object_label"], "egg");
    assert_eq!(lines[0]["chosen_unit"], 2);
    assert_eq!(lines[2]["chosen_unit"], 0);
    assert_eq!(lines[2]["total_simulations"], 900);
    assert_eq!(lines[3]["units"], serde_json::json!([0, 1, 2]));
}

#[test]
fn same_seed_gives_same_plan() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path(), "  format: json\n");
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    for out in [&a, &b] {
        run(&[
            "plan",
            "--config",
            cfg.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
            "--threads",
            "2",
        ]);
    }
    let plan_a = fs::read_to_string(a.join("output_MCTS_egg.json")).unwrap();
    let plan_b = fs::read_to_string(b.join("output_MCTS_egg.json")).unwrap();
    assert_eq!(plan_a, plan_b);
    let parsed: serde_json::Value = serde_json::from_str(&plan_a).unwrap();
    assert_eq!(parsed["units"].as_array().unwrap().len(), 3);
}

#[test]
fn validate_reports_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path(), "");
    let out = run(&["validate", "--config", cfg.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("functional units: 5"));
    assert!(stdout.contains("kitchen items: 4"));
    assert!(stdout.contains("motion rates: 3"));
    assert!(stdout.contains("motion rate warning"));
    assert!(stdout.contains("'cake'"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn missing_config_flag_fails() {
    let out = Command::new(foon_bin()).args(["plan"]).output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Missing --config"));
}

#[test]
fn zero_simulations_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path(), "");
    let out = Command::new(foon_bin())
        .args(["plan", "--config", cfg.to_str().unwrap(), "--simulations", "0"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("simulations must be > 0"));
}
