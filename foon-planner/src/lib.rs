//! Task planning over a FOON action graph.
//!
//! [`Planner`] resolves one goal at a time; [`plan_goals`] fans a goal list out over rayon.

pub mod batch;
pub mod planner;

pub use batch::{goal_seed, plan_goals, plan_one, GoalOutcome};
pub use planner::{is_implicit_utensil, DecisionRecord, PlanError, Planner, PlannerConfig, TaskPlan};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nonempty() {
        assert!(!VERSION.is_empty());
    }
}
