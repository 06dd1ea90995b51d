//! Stochastic rollout: does a unit (and, transitively, its missing prerequisites) succeed?
//!
//! A rollout first draws the unit's motion outcome. Then, for every input missing from the
//! kitchen, it picks one producing unit uniformly at random and resolves it the same way.
//! The first failure ends the rollout.
//!
//! Resolution runs on an explicit frame stack instead of the call stack. The ancestor chain
//! (units whose prerequisites are being resolved) lives next to it; a unit that needs a
//! missing prerequisite while already on the chain fails the rollout as a cycle.

use foon_core::{FuIndex, ObjectId};
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::context::SearchContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloutOutcome {
    Success,
    /// The motion draw for `unit` failed.
    MotionFailed { unit: FuIndex },
    /// `object` is missing from the kitchen and nothing produces it.
    NoProducer { object: ObjectId },
    /// `unit` needs a prerequisite while it is already being resolved.
    Cycle { unit: FuIndex },
}

impl RolloutOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, RolloutOutcome::Success)
    }
}

/// Units currently being resolved, in push order, with O(1) membership.
#[derive(Debug, Default)]
pub struct AncestorChain {
    order: Vec<FuIndex>,
    counts: FxHashMap<FuIndex, u32>,
}

impl AncestorChain {
    pub fn new(ancestors: &[FuIndex]) -> Self {
        let mut chain = Self::default();
        for &a in ancestors {
            chain.push(a);
        }
        chain
    }

    pub fn contains(&self, unit: FuIndex) -> bool {
        self.counts.contains_key(&unit)
    }

    pub fn push(&mut self, unit: FuIndex) {
        self.order.push(unit);
        *self.counts.entry(unit).or_insert(0) += 1;
    }

    pub fn pop(&mut self) -> Option<FuIndex> {
        let unit = self.order.pop()?;
        if let Some(c) = self.counts.get_mut(&unit) {
            *c -= 1;
            if *c == 0 {
                self.counts.remove(&unit);
            }
        }
        Some(unit)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

struct Frame {
    unit: FuIndex,
    /// Next input position to inspect.
    next_input: usize,
}

/// Simulate `unit` with `ancestors` as the chain of units already being resolved above it.
pub fn simulate<R: Rng + ?Sized>(
    ctx: &SearchContext<'_>,
    unit: FuIndex,
    ancestors: &[FuIndex],
    rng: &mut R,
) -> RolloutOutcome {
    if !motion_succeeds(ctx, unit, rng) {
        return RolloutOutcome::MotionFailed { unit };
    }

    let mut chain = AncestorChain::new(ancestors);
    let mut stack = vec![Frame {
        unit,
        next_input: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let inputs = &ctx.graph.unit(frame.unit).input_nodes;
        let missing = inputs[frame.next_input..]
            .iter()
            .position(|&obj| !ctx.kitchen.contains(ctx.graph.object(obj)));

        let Some(offset) = missing else {
            // All prerequisites of this frame resolved; hand control back to its parent.
            stack.pop();
            if !stack.is_empty() {
                chain.pop();
            }
            continue;
        };

        let object = inputs[frame.next_input + offset];
        frame.next_input += offset + 1;

        let candidates = ctx.graph.producers(object);
        if candidates.is_empty() {
            return RolloutOutcome::NoProducer { object };
        }
        if chain.contains(frame.unit) {
            return RolloutOutcome::Cycle { unit: frame.unit };
        }

        let pick = candidates[rng.gen_range(0..candidates.len())];
        chain.push(frame.unit);
        if !motion_succeeds(ctx, pick, rng) {
            return RolloutOutcome::MotionFailed { unit: pick };
        }
        stack.push(Frame {
            unit: pick,
            next_input: 0,
        });
    }

    RolloutOutcome::Success
}

/// Bernoulli draw on the unit's motion rate. Unlisted motions succeed without consuming RNG.
fn motion_succeeds<R: Rng + ?Sized>(ctx: &SearchContext<'_>, unit: FuIndex, rng: &mut R) -> bool {
    match ctx.motion_rates.get(&ctx.graph.unit(unit).motion_node) {
        Some(rate) => rng.gen::<f64>() < rate,
        None => true,
    }
}
