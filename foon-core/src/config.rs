//! Run configuration schema.
//!
//! One YAML file describes where the inputs live, how the search is budgeted and where
//! plans are written. Relative input/output paths resolve against the config file's
//! directory when loaded with [`Config::load`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Input files.
    pub inputs: InputsConfig,
    /// MCTS budget and statistics settings.
    #[serde(default)]
    pub search: SearchConfig,
    /// Plan output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// How learned action statistics are shared between decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsScope {
    /// One statistics table per planning run, shared by every object decision.
    #[default]
    Shared,
    /// Fresh statistics for every object decision.
    PerDecision,
}

/// Search configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Simulations per object decision.
    #[serde(default = "default_simulations")]
    pub simulations: u32,
    /// UCT exploration constant.
    #[serde(default = "default_exploration_c")]
    pub exploration_c: f64,
    /// Base RNG seed for the run.
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub stats_scope: StatsScope,
}

fn default_simulations() -> u32 {
    1000
}

fn default_exploration_c() -> f64 {
    1.414
}

fn default_seed() -> u64 {
    42
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            simulations: default_simulations(),
            exploration_c: default_exploration_c(),
            seed: default_seed(),
            stats_scope: StatsScope::default(),
        }
    }
}

/// Input file locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputsConfig {
    /// Action graph (JSON).
    pub foon: PathBuf,
    /// Kitchen inventory (JSON list of objects).
    pub kitchen: PathBuf,
    /// Utensil labels, one per line.
    pub utensils: PathBuf,
    /// Goal objects (JSON list of objects).
    pub goals: PathBuf,
    /// Motion success rates (`<motion>\t<rate>` lines). Without it every motion succeeds.
    #[serde(default)]
    pub motion_rates: Option<PathBuf>,
}

/// Plan file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// FOON-style text blocks.
    #[default]
    Text,
    Json,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory receiving one plan file per goal and the run manifest.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
    /// Optional NDJSON event log.
    #[serde(default)]
    pub events: Option<PathBuf>,
    /// Worker threads for planning several goals; `None` uses the rayon default.
    #[serde(default)]
    pub threads: Option<usize>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: OutputFormat::default(),
            events: None,
            threads: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file, resolving relative paths against its directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Load configuration from a YAML string. Paths are kept as written.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Rebase every relative path onto `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        rebase(&mut self.inputs.foon);
        rebase(&mut self.inputs.kitchen);
        rebase(&mut self.inputs.utensils);
        rebase(&mut self.inputs.goals);
        if let Some(p) = self.inputs.motion_rates.as_mut() {
            rebase(p);
        }
        rebase(&mut self.output.dir);
        if let Some(p) = self.output.events.as_mut() {
            rebase(p);
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: InputsConfig {
                foon: PathBuf::from("FOON.json"),
                kitchen: PathBuf::from("kitchen.json"),
                utensils: PathBuf::from("utensils.txt"),
                goals: PathBuf::from("goal_nodes.json"),
                motion_rates: Some(PathBuf::from("motion.txt")),
            },
            search: SearchConfig::default(),
            output: OutputConfig::default(),
        }
    }
}
