//! Planning several goals at once.
//!
//! Every goal gets its own planner, statistics store and RNG seeded from the run seed and
//! the goal's position, so the result for a goal does not depend on thread count or on the
//! other goals in the batch.

use std::time::Instant;

use foon_core::{ObjectDescriptor, Utensils};
use foon_mcts::SearchContext;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use rayon::prelude::*;

use crate::planner::{PlanError, Planner, PlannerConfig, TaskPlan};

/// RNG seed for the goal at `position` (0-based) in the goal list.
pub fn goal_seed(base: u64, position: usize) -> u64 {
    base ^ (position as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[derive(Debug)]
pub struct GoalOutcome {
    pub position: usize,
    pub goal: ObjectDescriptor,
    pub result: Result<TaskPlan, PlanError>,
    pub elapsed_ms: u64,
}

/// Plan one goal with the RNG derived for its position.
pub fn plan_one(
    ctx: SearchContext<'_>,
    utensils: &Utensils,
    cfg: PlannerConfig,
    seed: u64,
    position: usize,
    goal: &ObjectDescriptor,
) -> GoalOutcome {
    let start = Instant::now();
    let rng = ChaCha8Rng::seed_from_u64(goal_seed(seed, position));
    let result = Planner::new(ctx, utensils, cfg, rng).and_then(|mut p| p.plan_goal(goal));
    GoalOutcome {
        position,
        goal: goal.clone(),
        result,
        elapsed_ms: start.elapsed().as_millis() as u64,
    }
}

/// Plan every goal in parallel. Outcomes come back in goal order.
///
/// `threads` bounds the worker pool; `None` runs on the global rayon pool.
pub fn plan_goals(
    ctx: SearchContext<'_>,
    utensils: &Utensils,
    cfg: PlannerConfig,
    seed: u64,
    goals: &[ObjectDescriptor],
    threads: Option<usize>,
) -> Result<Vec<GoalOutcome>, PlanError> {
    let run = || -> Vec<GoalOutcome> {
        goals
            .par_iter()
            .enumerate()
            .map(|(pos, goal)| plan_one(ctx, utensils, cfg, seed, pos, goal))
            .collect()
    };
    match threads {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
            Ok(pool.install(run))
        }
        None => Ok(run()),
    }
}
