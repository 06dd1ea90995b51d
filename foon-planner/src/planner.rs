//! Frontier-driven planner: one MCTS decision per missing object, assembled into a plan.
//!
//! Objects are resolved breadth-first from the goal. Each object the kitchen lacks gets a
//! producing unit chosen by [`Mcts`]; that unit's inputs join the frontier. The collected
//! units are finally reversed so prerequisites come before the units that consume them.

use std::collections::VecDeque;

use foon_core::{ActionGraph, FuIndex, FunctionalUnit, ObjectDescriptor, ObjectId, StatsScope, Utensils};
use foon_mcts::{GlobalActionStats, Mcts, MctsConfig, MctsError, SearchContext};
use rand::Rng;
use rustc_hash::FxHashSet;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default)]
pub struct PlannerConfig {
    pub mcts: MctsConfig,
    pub stats_scope: StatsScope,
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("goal {label:?} does not exist in the action graph")]
    GoalNotFound { label: String },
    #[error(transparent)]
    Mcts(#[from] MctsError),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// One object decision made while planning.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionRecord {
    pub object: ObjectId,
    pub candidates: usize,
    pub chosen: FuIndex,
    pub chosen_win_rate: f64,
    pub simulations: u32,
    /// Statistics-store total after this decision.
    pub total_simulations: u64,
    /// False when the chosen unit was already part of the plan.
    pub added: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TaskPlan {
    pub goal: ObjectId,
    /// Unit indices in execution order, no duplicates.
    pub units: Vec<FuIndex>,
    /// Objects the kitchen lacks and no unit produces.
    pub unresolved: Vec<ObjectId>,
    pub decisions: Vec<DecisionRecord>,
}

impl TaskPlan {
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn functional_units<'g>(
        &'g self,
        graph: &'g ActionGraph,
    ) -> impl Iterator<Item = &'g FunctionalUnit> + 'g {
        self.units.iter().map(move |&i| graph.unit(i))
    }
}

pub struct Planner<'a, R> {
    ctx: SearchContext<'a>,
    utensils: &'a Utensils,
    cfg: PlannerConfig,
    mcts: Mcts,
    stats: GlobalActionStats,
    rng: R,
}

impl<'a, R: Rng> Planner<'a, R> {
    pub fn new(
        ctx: SearchContext<'a>,
        utensils: &'a Utensils,
        cfg: PlannerConfig,
        rng: R,
    ) -> Result<Self, PlanError> {
        Ok(Self {
            ctx,
            utensils,
            cfg,
            mcts: Mcts::new(cfg.mcts)?,
            stats: GlobalActionStats::new(),
            rng,
        })
    }

    /// Statistics of the most recent planning run.
    pub fn stats(&self) -> &GlobalActionStats {
        &self.stats
    }

    /// Locate `goal` in the graph by structural equality, then plan for it.
    pub fn plan_goal(&mut self, goal: &ObjectDescriptor) -> Result<TaskPlan, PlanError> {
        let Some(node) = self.ctx.graph.find_object(goal) else {
            log::warn!("goal node {:?} does not exist in FOON", goal.label);
            return Err(PlanError::GoalNotFound {
                label: goal.label.clone(),
            });
        };
        self.plan(node.id())
    }

    /// Plan for a goal object of the graph. Starts a fresh statistics store.
    pub fn plan(&mut self, goal: ObjectId) -> Result<TaskPlan, PlanError> {
        let graph = self.ctx.graph;
        self.stats.clear();

        let mut frontier: VecDeque<ObjectId> = VecDeque::from([goal]);
        let mut queued: FxHashSet<ObjectId> = FxHashSet::from_iter([goal]);
        let mut searched: FxHashSet<ObjectId> = FxHashSet::default();
        let mut in_plan: FxHashSet<FuIndex> = FxHashSet::default();
        let mut plan = TaskPlan {
            goal,
            ..TaskPlan::default()
        };

        while let Some(object) = frontier.pop_front() {
            queued.remove(&object);
            if !searched.insert(object) {
                continue;
            }
            if self.ctx.kitchen.contains(graph.object(object)) {
                continue;
            }

            let candidates = graph.producers(object);
            if candidates.is_empty() {
                log::warn!(
                    "object {object} ({:?}) is not in the kitchen and no unit produces it",
                    graph.object(object).label()
                );
                plan.unresolved.push(object);
                continue;
            }

            if self.cfg.stats_scope == StatsScope::PerDecision {
                self.stats.clear();
            }
            let outcome =
                self.mcts
                    .select_candidate(&self.ctx, candidates, &mut self.stats, &mut self.rng)?;
            let chosen = outcome.chosen;
            let added = in_plan.insert(chosen);
            plan.decisions.push(DecisionRecord {
                object,
                candidates: candidates.len(),
                chosen,
                chosen_win_rate: outcome.chosen_win_rate,
                simulations: outcome.simulations,
                total_simulations: self.stats.total_simulations(),
                added,
            });
            if !added {
                continue;
            }
            plan.units.push(chosen);

            let inputs = &graph.unit(chosen).input_nodes;
            for (pos, &input) in inputs.iter().enumerate() {
                if queued.contains(&input) {
                    continue;
                }
                if is_implicit_utensil(graph, chosen, pos, self.utensils) {
                    continue;
                }
                frontier.push_back(input);
                queued.insert(input);
            }
        }

        plan.units.reverse();
        log::info!(
            "planned goal {goal} ({:?}): {} units, {} unresolved objects",
            graph.object(goal).label(),
            plan.units.len(),
            plan.unresolved.len()
        );
        Ok(plan)
    }
}

/// Whether input `pos` of `unit` is a utensil whose fetch comes with another input.
///
/// A utensil input holding exactly one ingredient is implied when some other input of the
/// same unit is that ingredient sitting in a container named after the utensil (e.g. a pot
/// of water next to "water, in pot").
pub fn is_implicit_utensil(graph: &ActionGraph, unit: FuIndex, pos: usize, utensils: &Utensils) -> bool {
    let inputs = &graph.unit(unit).input_nodes;
    let node = graph.object(inputs[pos]);
    if !utensils.contains(node.label()) {
        return false;
    }
    let [ingredient] = node.ingredients() else {
        return false;
    };
    inputs.iter().enumerate().any(|(other_pos, &other)| {
        let other = graph.object(other);
        other_pos != pos
            && other.label() == ingredient.as_str()
            && other.container() == Some(node.label())
    })
}
