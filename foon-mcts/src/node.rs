//! Search tree node for one object decision.

use foon_core::FuIndex;

pub type NodeId = u32;

#[derive(Clone, Debug)]
pub struct Node {
    /// Candidate unit this node stands for; `None` only at the root.
    pub action: Option<FuIndex>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub visits: u32,
    pub wins: u32,
    /// Candidates not yet expanded below this node. Only ever shrinks.
    pub untried: Vec<FuIndex>,
}

impl Node {
    pub fn root(candidates: &[FuIndex]) -> Self {
        Self {
            action: None,
            parent: None,
            children: Vec::new(),
            visits: 0,
            wins: 0,
            untried: candidates.to_vec(),
        }
    }

    /// Expanded child. Children start with nothing left to try, so the tree stays one level deep.
    pub fn child(action: FuIndex, parent: NodeId) -> Self {
        Self {
            action: Some(action),
            parent: Some(parent),
            children: Vec::new(),
            visits: 0,
            wins: 0,
            untried: Vec::new(),
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.visits)
        }
    }
}
