//! Action statistics aggregated across every search tree of a planning run.
//!
//! Entries are keyed by functional unit index, not by tree position: the same unit chosen
//! under two different decisions shares one entry. Each entry keeps a single parent link,
//! fixed on the first update, and outcomes propagate along those links.

use foon_core::FuIndex;
use rustc_hash::FxHashMap;

/// Canonical UCT exploration constant (sqrt 2, truncated).
pub const DEFAULT_EXPLORATION_C: f64 = 1.414;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionStats {
    pub visits: u64,
    pub wins: u64,
    pub parent: Option<FuIndex>,
}

#[derive(Debug, Clone, Default)]
pub struct GlobalActionStats {
    stats: FxHashMap<FuIndex, ActionStats>,
    total_simulations: u64,
}

impl GlobalActionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, action: FuIndex) -> Option<&ActionStats> {
        self.stats.get(&action)
    }

    pub fn total_simulations(&self) -> u64 {
        self.total_simulations
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn clear(&mut self) {
        self.stats.clear();
        self.total_simulations = 0;
    }

    /// `wins/visits + c * sqrt(ln(total) / visits)`; +inf for an unvisited action.
    pub fn uct_score(&self, action: FuIndex, c: f64) -> f64 {
        let Some(s) = self.stats.get(&action).filter(|s| s.visits > 0) else {
            return f64::INFINITY;
        };
        let n = s.visits as f64;
        let exploitation = s.wins as f64 / n;
        let exploration = c * ((self.total_simulations as f64).ln() / n).sqrt();
        log::trace!(
            "uct unit={action} wins/visits={}/{} t={} exploitation={exploitation:.4} exploration={exploration:.4}",
            s.wins,
            s.visits,
            self.total_simulations
        );
        exploitation + exploration
    }

    /// Record one finished simulation of `action`.
    ///
    /// `parent` becomes the entry's parent link if this is its first update; later calls
    /// never change it. Visits (and wins on success) are added to `action` and to every
    /// entry reachable through parent links, then `total_simulations` grows by one.
    pub fn record_outcome(&mut self, action: FuIndex, parent: Option<FuIndex>, success: bool) {
        let entry = self.stats.entry(action).or_default();
        if entry.visits == 0 {
            entry.parent = parent.filter(|&p| p != action);
        }

        // A parent is only assigned to an entry nothing has visited yet, while the walk
        // below visits everything above it, so links never close a loop.
        let mut current = Some(action);
        while let Some(a) = current {
            let s = self.stats.entry(a).or_default();
            s.visits += 1;
            if success {
                s.wins += 1;
            }
            current = s.parent;
        }

        self.total_simulations += 1;
    }
}
