//! foon: CLI binary for MCTS task planning over FOON action graphs.
//!
//! Subcommands:
//! - plan
//! - validate

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use foon_core::{Config, StatsScope};
use foon_io::Inputs;
use foon_logging::{
    DecisionEventV1, GoalMissingEventV1, NdjsonWriter, PlanEventV1, RunManifestV1,
    EVENT_DECISION, EVENT_GOAL_MISSING, EVENT_PLAN, RUN_MANIFEST_VERSION,
};
use foon_mcts::{Mcts, MctsConfig, SearchContext};
use foon_planner::{GoalOutcome, PlanError, PlannerConfig, TaskPlan};

fn print_help() {
    eprintln!(
        r#"foon - MCTS task planning over FOON action graphs

USAGE:
    foon <COMMAND> [OPTIONS]

COMMANDS:
    plan                Plan every goal and write one task tree per goal
    validate            Load and check inputs without searching

OPTIONS:
    -h, --help          Print this help message
    -V, --version       Print version

Run `foon <COMMAND> --help` for command options.
"#
    );
}

fn print_version() {
    println!("foon {}", env!("CARGO_PKG_VERSION"));
}

fn value_of(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i + 1) {
        Some(v) => v.clone(),
        None => {
            eprintln!("Missing value for {flag}");
            process::exit(1);
        }
    }
}

fn parse_num<T: std::str::FromStr>(raw: &str, flag: &str) -> T {
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {flag} value: {raw}");
        process::exit(1);
    })
}

fn load_config(path: &str) -> Config {
    Config::load(path).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}");
        process::exit(1);
    })
}

fn load_inputs(config: &Config) -> Inputs {
    Inputs::load(&config.inputs).unwrap_or_else(|e| {
        eprintln!("Failed to load inputs: {e}");
        process::exit(1);
    })
}

fn cmd_plan(args: &[String]) {
    let mut config_path: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut simulations: Option<u32> = None;
    let mut out: Option<String> = None;
    let mut events: Option<String> = None;
    let mut threads: Option<usize> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"foon plan

USAGE:
    foon plan --config cfg.yaml [--seed S] [--simulations N] [--out DIR] [--events PATH]

OPTIONS:
    --config PATH       Path to YAML config (required)
    --seed S            Base RNG seed (overrides search.seed)
    --simulations N     Simulations per object decision (overrides search.simulations)
    --out DIR           Output directory (overrides output.dir)
    --events PATH       Append NDJSON planning events to PATH (overrides output.events)
    --threads N         Worker threads for planning goals (overrides output.threads)
"#
                );
                return;
            }
            "--config" => {
                config_path = Some(value_of(args, i, "--config"));
                i += 2;
            }
            "--seed" => {
                seed = Some(parse_num(&value_of(args, i, "--seed"), "--seed"));
                i += 2;
            }
            "--simulations" => {
                simulations = Some(parse_num(
                    &value_of(args, i, "--simulations"),
                    "--simulations",
                ));
                i += 2;
            }
            "--out" => {
                out = Some(value_of(args, i, "--out"));
                i += 2;
            }
            "--events" => {
                events = Some(value_of(args, i, "--events"));
                i += 2;
            }
            "--threads" => {
                threads = Some(parse_num(&value_of(args, i, "--threads"), "--threads"));
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `foon plan`: {other}");
                eprintln!("Run `foon plan --help` for usage.");
                process::exit(1);
            }
        }
    }

    let Some(config_path) = config_path else {
        eprintln!("Missing --config");
        process::exit(1);
    };
    let mut config = load_config(&config_path);
    if let Some(s) = seed {
        config.search.seed = s;
    }
    if let Some(n) = simulations {
        config.search.simulations = n;
    }
    if let Some(dir) = out {
        config.output.dir = PathBuf::from(dir);
    }
    if let Some(p) = events {
        config.output.events = Some(PathBuf::from(p));
    }
    if threads.is_some() {
        config.output.threads = threads;
    }

    let planner_cfg = PlannerConfig {
        mcts: MctsConfig {
            exploration_c: config.search.exploration_c,
            simulations: config.search.simulations,
        },
        stats_scope: config.search.stats_scope,
    };
    if let Err(e) = Mcts::new(planner_cfg.mcts) {
        eprintln!("Invalid search settings: {e}");
        process::exit(1);
    }

    let inputs = load_inputs(&config);
    let out_dir = config.output.dir.clone();
    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        eprintln!("Failed to create output dir: {e}");
        process::exit(1);
    }

    let config_bytes = std::fs::read(&config_path).unwrap_or_else(|e| {
        eprintln!("Failed to read config file: {e}");
        process::exit(1);
    });
    let run_id = out_dir
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("run")
        .to_string();
    let mut manifest = RunManifestV1 {
        run_manifest_version: RUN_MANIFEST_VERSION,
        run_id: run_id.clone(),
        created_ts_ms: foon_logging::now_ms(),
        finished_ts_ms: None,
        git_hash: foon_logging::try_git_hash(),
        config_hash: Some(foon_logging::hash_config_bytes(&config_bytes)),
        seed: config.search.seed,
        simulations: config.search.simulations,
        exploration_c: config.search.exploration_c,
        stats_scope: match config.search.stats_scope {
            StatsScope::Shared => "shared",
            StatsScope::PerDecision => "per_decision",
        }
        .to_string(),
        output_dir: out_dir.display().to_string(),
        events_path: config.output.events.as_ref().map(|p| p.display().to_string()),
        goals_total: inputs.goals.len() as u64,
        goals_planned: 0,
        goals_missing: 0,
        goals_failed: 0,
    };

    let mut event_log = config.output.events.as_ref().map(|p| {
        NdjsonWriter::open_append(p).unwrap_or_else(|e| {
            eprintln!("Failed to open event log: {e}");
            process::exit(1);
        })
    });

    let ctx = SearchContext::new(&inputs.graph, &inputs.kitchen, &inputs.motion_rates);
    let outcomes = foon_planner::plan_goals(
        ctx,
        &inputs.utensils,
        planner_cfg,
        config.search.seed,
        &inputs.goals,
        config.output.threads,
    )
    .unwrap_or_else(|e| {
        eprintln!("Planning failed: {e}");
        process::exit(1);
    });

    for outcome in &outcomes {
        let label = outcome.goal.label.as_str();
        match &outcome.result {
            Ok(plan) => {
                let written = foon_io::write_plan(
                    &out_dir,
                    &inputs.graph,
                    plan,
                    label,
                    config.output.format,
                );
                let path = match written {
                    Ok(p) => p,
                    Err(e) => {
                        eprintln!("Failed to write plan for {label}: {e}");
                        manifest.goals_failed += 1;
                        continue;
                    }
                };
                manifest.goals_planned += 1;
                println!(
                    "{label}: {} units, {} unresolved, {} ms -> {}",
                    plan.len(),
                    plan.unresolved.len(),
                    outcome.elapsed_ms,
                    path.display()
                );
                if let Some(w) = event_log.as_mut() {
                    log_plan(w, &run_id, &inputs, outcome, plan, &path);
                }
            }
            Err(PlanError::GoalNotFound { .. }) => {
                manifest.goals_missing += 1;
                println!("The goal node '{label}' does not exist in FOON.");
                if let Some(w) = event_log.as_mut() {
                    let event = GoalMissingEventV1 {
                        event: EVENT_GOAL_MISSING.to_string(),
                        ts_ms: foon_logging::now_ms(),
                        run_id: run_id.clone(),
                        goal: label.to_string(),
                        goal_position: outcome.position,
                    };
                    if let Err(e) = w.write_event(&event) {
                        log::warn!("failed to write event: {e}");
                    }
                }
            }
            Err(e) => {
                manifest.goals_failed += 1;
                eprintln!("Planning {label} failed: {e}");
            }
        }
    }

    if let Some(w) = event_log.as_mut() {
        if let Err(e) = w.flush() {
            eprintln!("Failed to flush event log: {e}");
            process::exit(1);
        }
    }

    manifest.finished_ts_ms = Some(foon_logging::now_ms());
    if let Err(e) = foon_logging::write_manifest_atomic(out_dir.join("run.json"), &manifest) {
        eprintln!("Failed to write run manifest: {e}");
        process::exit(1);
    }
    log::info!(
        "run {run_id}: {} planned, {} missing, {} failed",
        manifest.goals_planned,
        manifest.goals_missing,
        manifest.goals_failed
    );
}

fn log_plan(
    w: &mut NdjsonWriter,
    run_id: &str,
    inputs: &Inputs,
    outcome: &GoalOutcome,
    plan: &TaskPlan,
    path: &Path,
) {
    let graph = &inputs.graph;
    let goal = outcome.goal.label.clone();
    for d in &plan.decisions {
        let event = DecisionEventV1 {
            event: EVENT_DECISION.to_string(),
            ts_ms: foon_logging::now_ms(),
            run_id: run_id.to_string(),
            goal: goal.clone(),
            goal_position: outcome.position,
            object: d.object,
            object_label: graph.object(d.object).label().to_string(),
            candidates: d.candidates,
            chosen_unit: d.chosen,
            chosen_motion: graph.unit(d.chosen).motion_node.clone(),
            chosen_win_rate: d.chosen_win_rate,
            simulations: d.simulations,
            total_simulations: d.total_simulations,
            added: d.added,
        };
        if let Err(e) = w.write_event(&event) {
            log::warn!("failed to write event: {e}");
        }
    }
    let event = PlanEventV1 {
        event: EVENT_PLAN.to_string(),
        ts_ms: foon_logging::now_ms(),
        run_id: run_id.to_string(),
        goal,
        goal_position: outcome.position,
        units: plan.units.clone(),
        unresolved: plan.unresolved.clone(),
        elapsed_ms: outcome.elapsed_ms,
        output: Some(path.display().to_string()),
    };
    if let Err(e) = w.write_event(&event) {
        log::warn!("failed to write event: {e}");
    }
}

fn cmd_validate(args: &[String]) {
    let mut config_path: Option<String> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"foon validate

USAGE:
    foon validate --config cfg.yaml

OPTIONS:
    --config PATH       Path to YAML config (required)
"#
                );
                return;
            }
            "--config" => {
                config_path = Some(value_of(args, i, "--config"));
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `foon validate`: {other}");
                eprintln!("Run `foon validate --help` for usage.");
                process::exit(1);
            }
        }
    }

    let Some(config_path) = config_path else {
        eprintln!("Missing --config");
        process::exit(1);
    };
    let config = load_config(&config_path);
    let inputs = load_inputs(&config);

    println!("objects: {}", inputs.graph.objects().len());
    println!("functional units: {}", inputs.graph.units().len());
    println!("kitchen items: {}", inputs.kitchen.len());
    println!("utensils: {}", inputs.utensils.len());
    println!("motion rates: {}", inputs.motion_rates.len());
    println!("goals: {}", inputs.goals.len());
    for w in &inputs.motion_warnings {
        println!("motion rate warning: {w}");
    }
    for goal in &inputs.goals {
        if inputs.graph.find_object(goal).is_none() {
            println!("The goal node '{}' does not exist in FOON.", goal.label);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_help();
        process::exit(1);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => print_help(),
        "-V" | "--version" => print_version(),
        "plan" => cmd_plan(&args[2..]),
        "validate" => cmd_validate(&args[2..]),
        cmd => {
            eprintln!("Unknown command: {cmd}");
            eprintln!("Run `foon --help` for usage.");
            process::exit(1);
        }
    }
}
