//! Read-only inputs shared by rollouts and tree search.

use foon_core::{ActionGraph, Kitchen, MotionRates};

#[derive(Clone, Copy)]
pub struct SearchContext<'a> {
    pub graph: &'a ActionGraph,
    pub kitchen: &'a Kitchen,
    pub motion_rates: &'a MotionRates,
}

impl<'a> SearchContext<'a> {
    pub fn new(graph: &'a ActionGraph, kitchen: &'a Kitchen, motion_rates: &'a MotionRates) -> Self {
        Self {
            graph,
            kitchen,
            motion_rates,
        }
    }
}
