//! Small hand-built graphs shared by the unit tests.

use foon_core::{ActionGraph, ActionGraphBuilder, FuIndex, Kitchen, MotionRates, ObjectDescriptor, ObjectId};

use crate::SearchContext;

pub struct Fixture {
    pub graph: ActionGraph,
    pub kitchen: Kitchen,
    pub rates: MotionRates,
}

impl Fixture {
    pub fn ctx(&self) -> SearchContext<'_> {
        SearchContext::new(&self.graph, &self.kitchen, &self.rates)
    }
}

pub fn obj(label: &str) -> ObjectDescriptor {
    ObjectDescriptor::new(label)
}

/// G <- U0(P), P in the kitchen.
pub fn single_step(rate: f64) -> (Fixture, ObjectId, FuIndex) {
    let mut b = ActionGraphBuilder::new();
    let p = b.object(obj("p"));
    let g = b.object(obj("g"));
    let u0 = b.unit(&[p], &[g], "stir");
    let fx = Fixture {
        graph: b.build().unwrap(),
        kitchen: Kitchen::new(vec![obj("p")]),
        rates: [("stir", rate)].into_iter().collect(),
    };
    (fx, g, u0)
}

/// G <- U1(P), P <- U0(Q), Q in the kitchen. Motions: U0 "boil", U1 "pour".
pub fn two_step(boil: f64, pour: f64) -> (Fixture, ObjectId, FuIndex, FuIndex) {
    let mut b = ActionGraphBuilder::new();
    let q = b.object(obj("q"));
    let p = b.object(obj("p"));
    let g = b.object(obj("g"));
    let u0 = b.unit(&[q], &[p], "boil");
    let u1 = b.unit(&[p], &[g], "pour");
    let fx = Fixture {
        graph: b.build().unwrap(),
        kitchen: Kitchen::new(vec![obj("q")]),
        rates: [("boil", boil), ("pour", pour)].into_iter().collect(),
    };
    (fx, g, u0, u1)
}

/// A ring of `n` units: unit i needs object i+1 (mod n), which only unit i+1 (mod n) produces.
pub fn ring(n: usize) -> Fixture {
    let mut b = ActionGraphBuilder::new();
    let objs: Vec<ObjectId> = (0..n).map(|i| b.object(obj(&format!("o{i}")))).collect();
    for i in 0..n {
        b.unit(&[objs[(i + 1) % n]], &[objs[i]], "loop");
    }
    Fixture {
        graph: b.build().unwrap(),
        kitchen: Kitchen::default(),
        rates: MotionRates::new(),
    }
}

/// G has three producers: `sure` (input in kitchen, no rate entry), `flaky` (rate 0.0)
/// and `stuck` (input nothing produces).
pub fn competing() -> (Fixture, ObjectId, [FuIndex; 3]) {
    let mut b = ActionGraphBuilder::new();
    let p = b.object(obj("p"));
    let q = b.object(obj("q"));
    let g = b.object(obj("g"));
    let flaky = b.unit(&[p], &[g], "juggle");
    let stuck = b.unit(&[q], &[g], "bake");
    let sure = b.unit(&[p], &[g], "mix");
    let fx = Fixture {
        graph: b.build().unwrap(),
        kitchen: Kitchen::new(vec![obj("p")]),
        rates: [("juggle", 0.0)].into_iter().collect(),
    };
    (fx, g, [sure, flaky, stuck])
}
