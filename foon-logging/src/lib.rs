//! foon-logging: NDJSON planning events + run manifests.
//!
//! Append-only NDJSON logs for post-mortems of planning runs. Every event carries an
//! `event` tag, a timestamp and the run id so several runs can share one file.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run manifest schema version.
pub const RUN_MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifestV1 {
    pub run_manifest_version: u32,

    pub run_id: String,
    pub created_ts_ms: u64,
    pub finished_ts_ms: Option<u64>,

    // Hashes for reproducibility.
    pub git_hash: Option<String>,
    pub config_hash: Option<String>,

    // Search settings actually used (after CLI overrides).
    pub seed: u64,
    pub simulations: u32,
    pub exploration_c: f64,
    pub stats_scope: String,

    // Layout.
    pub output_dir: String,
    pub events_path: Option<String>,

    // Counters.
    pub goals_total: u64,
    pub goals_planned: u64,
    pub goals_missing: u64,
    pub goals_failed: u64,
}

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

pub fn hash_config_bytes(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

pub fn try_git_hash() -> Option<String> {
    use std::process::Command;

    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let s = String::from_utf8(out.stdout).ok()?;
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

pub fn read_manifest(path: impl AsRef<Path>) -> Result<RunManifestV1, NdjsonError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice::<RunManifestV1>(&bytes)?)
}

pub fn write_manifest_atomic(path: impl AsRef<Path>, m: &RunManifestV1) -> Result<(), NdjsonError> {
    let path = path.as_ref();
    let tmp = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(m)?;
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// One MCTS decision: which unit was picked to produce an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionEventV1 {
    pub event: String,
    pub ts_ms: u64,
    pub run_id: String,

    pub goal: String,
    pub goal_position: usize,

    pub object: usize,
    pub object_label: String,
    pub candidates: usize,
    pub chosen_unit: usize,
    pub chosen_motion: String,
    pub chosen_win_rate: f64,
    pub simulations: u32,
    pub total_simulations: u64,
    pub added: bool,
}

/// A finished plan for one goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanEventV1 {
    pub event: String,
    pub ts_ms: u64,
    pub run_id: String,

    pub goal: String,
    pub goal_position: usize,
    /// Unit indices in execution order.
    pub units: Vec<usize>,
    pub unresolved: Vec<usize>,
    pub elapsed_ms: u64,
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalMissingEventV1 {
    pub event: String,
    pub ts_ms: u64,
    pub run_id: String,

    pub goal: String,
    pub goal_position: usize,
}

pub const EVENT_DECISION: &str = "decision";
pub const EVENT_PLAN: &str = "plan";
pub const EVENT_GOAL_MISSING: &str = "goal_missing";

#[derive(Debug)]
pub enum NdjsonError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for NdjsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Json(e) => write!(f, "json: {e}"),
        }
    }
}

impl std::error::Error for NdjsonError {}

impl From<io::Error> for NdjsonError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for NdjsonError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}

/// Read back an NDJSON file, skipping blank and unparsable lines (e.g. a torn last line).
pub fn read_ndjson_lenient(path: impl AsRef<Path>) -> Result<Vec<serde_json::Value>, NdjsonError> {
    let s = std::fs::read_to_string(path)?;
    Ok(s.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect())
}
