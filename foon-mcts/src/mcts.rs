//! UCT MCTS choosing one producing unit for one target object (single-threaded).
//!
//! Each invocation builds a fresh tree whose root holds the full candidate list, then runs
//! a fixed number of selection -> expansion -> rollout -> backpropagation cycles. Tree
//! selection scores children with the run-wide [`GlobalActionStats`]; the final choice is
//! the root child with the best observed win rate in this tree.

use foon_core::FuIndex;
use rand::Rng;
use thiserror::Error;

use crate::arena::Arena;
use crate::context::SearchContext;
use crate::node::{Node, NodeId};
use crate::rollout::{self, RolloutOutcome};
use crate::stats::{GlobalActionStats, DEFAULT_EXPLORATION_C};

#[derive(Clone, Copy, Debug)]
pub struct MctsConfig {
    /// UCT exploration constant.
    pub exploration_c: f64,
    /// Simulations per decision.
    pub simulations: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_c: DEFAULT_EXPLORATION_C,
            simulations: 1000,
        }
    }
}

#[derive(Debug, Error)]
pub enum MctsError {
    #[error("invalid config: {msg}")]
    InvalidConfig { msg: &'static str },
    #[error("no candidate units to choose from")]
    NoCandidates,
}

/// Root child statistics after a search.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildSummary {
    pub action: FuIndex,
    pub visits: u32,
    pub wins: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone)]
pub struct MctsOutcome {
    pub chosen: FuIndex,
    pub chosen_win_rate: f64,
    /// Root children in expansion order.
    pub children: Vec<ChildSummary>,
    pub simulations: u32,
    pub successes: u32,
    pub node_count: usize,
}

pub struct Mcts {
    cfg: MctsConfig,
    arena: Arena,
}

impl Mcts {
    pub fn new(cfg: MctsConfig) -> Result<Self, MctsError> {
        if !(cfg.exploration_c.is_finite() && cfg.exploration_c >= 0.0) {
            return Err(MctsError::InvalidConfig {
                msg: "exploration_c must be finite and >= 0",
            });
        }
        if cfg.simulations == 0 {
            return Err(MctsError::InvalidConfig {
                msg: "simulations must be > 0",
            });
        }
        Ok(Self {
            cfg,
            arena: Arena::new(),
        })
    }

    pub fn config(&self) -> &MctsConfig {
        &self.cfg
    }

    /// Tree of the most recent search. Node 0 is the root.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Pick the most promising unit among `candidates`.
    pub fn select_candidate<R: Rng + ?Sized>(
        &mut self,
        ctx: &SearchContext<'_>,
        candidates: &[FuIndex],
        stats: &mut GlobalActionStats,
        rng: &mut R,
    ) -> Result<MctsOutcome, MctsError> {
        if candidates.is_empty() {
            return Err(MctsError::NoCandidates);
        }

        self.arena.clear();
        let root = self.arena.push(Node::root(candidates));

        let mut successes = 0u32;
        for _ in 0..self.cfg.simulations {
            let outcome = self.run_simulation(ctx, root, stats, rng);
            if outcome.is_some_and(RolloutOutcome::is_success) {
                successes += 1;
            }
        }

        let (best, children) = self.best_root_child(root);
        let best = self.arena.get(best);
        let chosen = best.action.ok_or(MctsError::NoCandidates)?;

        log::debug!(
            "mcts chose unit {chosen} (win rate {:.3}) among {} candidates, {} simulations",
            best.win_rate(),
            candidates.len(),
            self.cfg.simulations
        );

        Ok(MctsOutcome {
            chosen,
            chosen_win_rate: best.win_rate(),
            children,
            simulations: self.cfg.simulations,
            successes,
            node_count: self.arena.len(),
        })
    }

    /// One selection -> expansion -> rollout -> backpropagation cycle.
    ///
    /// `None` when selection ends on the bare root, i.e. there was nothing to simulate.
    pub(crate) fn run_simulation<R: Rng + ?Sized>(
        &mut self,
        ctx: &SearchContext<'_>,
        root: NodeId,
        stats: &mut GlobalActionStats,
        rng: &mut R,
    ) -> Option<RolloutOutcome> {
        let mut node = self.select(root, stats);
        if !self.arena.get(node).untried.is_empty() {
            node = self.expand(node, rng);
        }

        let action = self.arena.get(node).action?;
        let ancestors = self.ancestor_actions(node);
        let outcome = rollout::simulate(ctx, action, &ancestors, rng);
        self.backpropagate(node, outcome.is_success(), stats);
        Some(outcome)
    }

    /// Descend through fully expanded nodes by UCT score.
    fn select(&self, root: NodeId, stats: &GlobalActionStats) -> NodeId {
        let mut node_id = root;
        loop {
            let node = self.arena.get(node_id);
            if !node.untried.is_empty() || node.children.is_empty() {
                return node_id;
            }
            node_id = self.best_uct_child(node_id, stats);
        }
    }

    /// Highest UCT score; the first maximal child wins ties.
    fn best_uct_child(&self, node_id: NodeId, stats: &GlobalActionStats) -> NodeId {
        let node = self.arena.get(node_id);
        let mut best_score = f64::NEG_INFINITY;
        let mut best = node.children[0];
        for &child in &node.children {
            let score = match self.arena.get(child).action {
                Some(a) => stats.uct_score(a, self.cfg.exploration_c),
                None => f64::NEG_INFINITY,
            };
            if score > best_score {
                best_score = score;
                best = child;
            }
        }
        best
    }

    fn expand<R: Rng + ?Sized>(&mut self, node_id: NodeId, rng: &mut R) -> NodeId {
        let node = self.arena.get_mut(node_id);
        let i = rng.gen_range(0..node.untried.len());
        let action = node.untried.remove(i);
        let child = self.arena.push(Node::child(action, node_id));
        self.arena.get_mut(node_id).children.push(child);
        child
    }

    /// Actions of the strict ancestors of `node_id`, nearest first.
    pub(crate) fn ancestor_actions(&self, node_id: NodeId) -> Vec<FuIndex> {
        self.arena
            .path_to_root(node_id)
            .into_iter()
            .skip(1)
            .filter_map(|id| self.arena.get(id).action)
            .collect()
    }

    /// Update the tree path to the root, then record the leaf action in the run-wide stats.
    fn backpropagate(&mut self, leaf: NodeId, success: bool, stats: &mut GlobalActionStats) {
        for id in self.arena.path_to_root(leaf) {
            let n = self.arena.get_mut(id);
            n.visits += 1;
            if success {
                n.wins += 1;
            }
        }

        let node = self.arena.get(leaf);
        if let Some(action) = node.action {
            let parent_action = node.parent.and_then(|p| self.arena.get(p).action);
            stats.record_outcome(action, parent_action, success);
        }
    }

    /// Root child with the highest win rate (first maximal in expansion order).
    fn best_root_child(&self, root: NodeId) -> (NodeId, Vec<ChildSummary>) {
        let root_node = self.arena.get(root);
        let mut best = root;
        let mut best_rate = f64::NEG_INFINITY;
        let mut children = Vec::with_capacity(root_node.children.len());
        for &child_id in &root_node.children {
            let child = self.arena.get(child_id);
            let rate = child.win_rate();
            if rate > best_rate {
                best_rate = rate;
                best = child_id;
            }
            if let Some(action) = child.action {
                children.push(ChildSummary {
                    action,
                    visits: child.visits,
                    wins: child.wins,
                    win_rate: rate,
                });
            }
        }
        (best, children)
    }
}
