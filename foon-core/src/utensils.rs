//! Utensil labels (pots, bowls, knives...) used by the planner's fetch heuristic.

use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Default)]
pub struct Utensils {
    labels: FxHashSet<String>,
}

impl Utensils {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
