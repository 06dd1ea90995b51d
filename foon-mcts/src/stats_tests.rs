use crate::{GlobalActionStats, DEFAULT_EXPLORATION_C};

#[test]
fn unvisited_action_scores_infinity() {
    let mut stats = GlobalActionStats::new();
    assert_eq!(stats.uct_score(0, DEFAULT_EXPLORATION_C), f64::INFINITY);
    stats.record_outcome(1, None, true);
    assert_eq!(stats.uct_score(0, DEFAULT_EXPLORATION_C), f64::INFINITY);
    assert!(stats.uct_score(1, DEFAULT_EXPLORATION_C).is_finite());
}

#[test]
fn uct_formula_matches_exploitation_plus_exploration() {
    let mut stats = GlobalActionStats::new();
    // Action 0: 3 wins out of 4. Action 1: 0 out of 2. Total 6 simulations.
    for success in [true, true, true, false] {
        stats.record_outcome(0, None, success);
    }
    stats.record_outcome(1, None, false);
    stats.record_outcome(1, None, false);
    assert_eq!(stats.total_simulations(), 6);

    let c = 1.414;
    let expected0 = 0.75 + c * (6f64.ln() / 4.0).sqrt();
    let expected1 = 0.0 + c * (6f64.ln() / 2.0).sqrt();
    assert!((stats.uct_score(0, c) - expected0).abs() < 1e-12);
    assert!((stats.uct_score(1, c) - expected1).abs() < 1e-12);
}

#[test]
fn single_simulation_has_no_exploration_bonus() {
    let mut stats = GlobalActionStats::new();
    stats.record_outcome(4, None, true);
    // ln(1) = 0
    assert_eq!(stats.uct_score(4, DEFAULT_EXPLORATION_C), 1.0);
}

#[test]
fn outcomes_propagate_along_parent_links() {
    let mut stats = GlobalActionStats::new();
    stats.record_outcome(10, None, true);
    // 20's parent is fixed to 10 on its first update.
    stats.record_outcome(20, Some(10), true);
    stats.record_outcome(20, Some(99), false);

    let s20 = stats.get(20).unwrap();
    assert_eq!((s20.visits, s20.wins, s20.parent), (2, 1, Some(10)));
    let s10 = stats.get(10).unwrap();
    assert_eq!((s10.visits, s10.wins), (3, 2));
    assert!(stats.get(99).is_none());
    assert_eq!(stats.total_simulations(), 3);
}

#[test]
fn later_parent_cannot_point_back_down() {
    let mut stats = GlobalActionStats::new();
    stats.record_outcome(2, Some(1), true);
    // 1 was visited through 2's link, so its own parent stays unset.
    stats.record_outcome(1, Some(2), true);
    assert_eq!(stats.get(1).unwrap().parent, None);
    assert_eq!(stats.get(1).unwrap().visits, 2);
    assert_eq!(stats.get(2).unwrap().visits, 1);
}

#[test]
fn self_parent_is_ignored() {
    let mut stats = GlobalActionStats::new();
    stats.record_outcome(7, Some(7), false);
    assert_eq!(stats.get(7).unwrap().parent, None);
    assert_eq!(stats.get(7).unwrap().visits, 1);
}

#[test]
fn clear_resets_totals() {
    let mut stats = GlobalActionStats::new();
    stats.record_outcome(0, None, true);
    stats.clear();
    assert!(stats.is_empty());
    assert_eq!(stats.total_simulations(), 0);
}
