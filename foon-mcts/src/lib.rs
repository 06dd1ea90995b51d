//! Monte-Carlo tree search over competing functional units.
//!
//! - `rollout`: stochastic, cycle-safe prerequisite simulation
//! - `stats`: run-wide UCT statistics keyed by unit index
//! - `mcts`: per-decision search tree (arena-backed) choosing one unit for one object

pub mod arena;
pub mod context;
pub mod mcts;
pub mod node;
pub mod rollout;
pub mod stats;

pub use context::SearchContext;
pub use mcts::{ChildSummary, Mcts, MctsConfig, MctsError, MctsOutcome};
pub use rollout::{simulate, AncestorChain, RolloutOutcome};
pub use stats::{ActionStats, GlobalActionStats, DEFAULT_EXPLORATION_C};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


#[cfg(test)]
mod test_graphs;

#[cfg(test)]
mod rollout_tests;
#[cfg(test)]
mod stats_tests;
