use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use foon_core::{ActionGraphBuilder, Kitchen, MotionRates};

use crate::test_graphs::{obj, ring, single_step, two_step, Fixture};
use crate::{simulate, RolloutOutcome};

#[test]
fn zero_rate_always_fails() {
    let (fx, _g, u0) = single_step(0.0);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for _ in 0..200 {
        assert_eq!(
            simulate(&fx.ctx(), u0, &[], &mut rng),
            RolloutOutcome::MotionFailed { unit: u0 }
        );
    }
}

#[test]
fn certain_rate_with_stocked_kitchen_always_succeeds() {
    let (fx, _g, u0) = single_step(1.0);
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    for _ in 0..200 {
        assert!(simulate(&fx.ctx(), u0, &[], &mut rng).is_success());
    }
}

#[test]
fn unlisted_motion_succeeds_without_rate_entry() {
    let (mut fx, _g, u0) = single_step(0.0);
    fx.rates = MotionRates::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    assert!(simulate(&fx.ctx(), u0, &[], &mut rng).is_success());
}

#[test]
fn missing_prerequisite_is_resolved_through_its_producer() {
    let (fx, _g, u0, u1) = two_step(1.0, 1.0);
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    assert!(simulate(&fx.ctx(), u1, &[], &mut rng).is_success());

    let (fx, _g, u0_fail, u1) = two_step(0.0, 1.0);
    assert_eq!(u0, u0_fail);
    assert_eq!(
        simulate(&fx.ctx(), u1, &[], &mut rng),
        RolloutOutcome::MotionFailed { unit: u0 }
    );
}

#[test]
fn prerequisite_without_producer_fails() {
    let mut b = ActionGraphBuilder::new();
    let q = b.object(obj("q"));
    let g = b.object(obj("g"));
    let u = b.unit(&[q], &[g], "mix");
    let fx = Fixture {
        graph: b.build().unwrap(),
        kitchen: Kitchen::default(),
        rates: MotionRates::new(),
    };
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    assert_eq!(
        simulate(&fx.ctx(), u, &[], &mut rng),
        RolloutOutcome::NoProducer { object: q }
    );
}

#[test]
fn self_producing_prerequisite_is_a_cycle() {
    // A needs X; only A produces X.
    let fx = ring(1);
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    for _ in 0..50 {
        assert_eq!(
            simulate(&fx.ctx(), 0, &[], &mut rng),
            RolloutOutcome::Cycle { unit: 0 }
        );
    }
}

#[test]
fn long_cycles_terminate_without_deep_recursion() {
    let n = 20_000;
    let fx = ring(n);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    assert_eq!(
        simulate(&fx.ctx(), 0, &[], &mut rng),
        RolloutOutcome::Cycle { unit: 0 }
    );
}

#[test]
fn unit_already_on_the_ancestor_chain_fails_when_it_needs_resolution() {
    let (fx, _g, u0, u1) = two_step(1.0, 1.0);
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    assert_eq!(
        simulate(&fx.ctx(), u1, &[u1], &mut rng),
        RolloutOutcome::Cycle { unit: u1 }
    );
    // A unit whose inputs are all stocked never consults the chain.
    assert!(simulate(&fx.ctx(), u0, &[u0], &mut rng).is_success());
}

#[test]
fn sibling_prerequisites_do_not_see_each_other_as_ancestors() {
    // G <- U(A, B); A <- UA(s); B <- UB(s); s stocked.
    let mut b = ActionGraphBuilder::new();
    let s = b.object(obj("s"));
    let a = b.object(obj("a"));
    let bb = b.object(obj("b"));
    let g = b.object(obj("g"));
    b.unit(&[s], &[a], "m");
    b.unit(&[s], &[bb], "m");
    let u = b.unit(&[a, bb], &[g], "m");
    let fx = Fixture {
        graph: b.build().unwrap(),
        kitchen: Kitchen::new(vec![obj("s")]),
        rates: MotionRates::new(),
    };
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    assert!(simulate(&fx.ctx(), u, &[], &mut rng).is_success());
}

#[test]
fn same_seed_same_outcomes() {
    let (fx, _g, _u0, u1) = two_step(0.5, 0.5);
    let run = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..64)
            .map(|_| simulate(&fx.ctx(), u1, &[], &mut rng))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(11), run(11));
}

#[test]
fn ancestor_chain_tracks_repeated_units() {
    let mut chain = crate::AncestorChain::new(&[3, 5, 3]);
    assert_eq!(chain.len(), 3);
    assert!(chain.contains(3));
    assert_eq!(chain.pop(), Some(3));
    // One 3 is still below.
    assert!(chain.contains(3));
    assert_eq!(chain.pop(), Some(5));
    assert!(!chain.contains(5));
    assert_eq!(chain.pop(), Some(3));
    assert!(!chain.contains(3));
    assert!(chain.is_empty());
    assert_eq!(chain.pop(), None);
}
