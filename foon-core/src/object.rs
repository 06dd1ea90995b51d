//! Object nodes: one state of an ingredient or container in the action graph.
//!
//! Two objects are the same object iff label, state set, ingredient set and container all
//! match. States and ingredients compare order-insensitively, so every object carries a
//! canonical [`ObjectSignature`] that is cheap to hash and compare.

use serde::{Deserialize, Serialize};

/// Position of an object node in the action graph.
pub type ObjectId = usize;

/// Object description as it appears in kitchen, goal and graph files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    pub label: String,
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub container: Option<String>,
}

impl ObjectDescriptor {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn in_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    pub fn signature(&self) -> ObjectSignature {
        ObjectSignature::new(&self.label, &self.states, &self.ingredients, self.container.as_deref())
    }
}

impl PartialEq for ObjectDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.signature() == other.signature()
    }
}

impl Eq for ObjectDescriptor {}

/// Canonical, order-insensitive identity of an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectSignature {
    label: String,
    states: Vec<String>,
    ingredients: Vec<String>,
    container: Option<String>,
}

impl ObjectSignature {
    pub fn new(
        label: &str,
        states: &[String],
        ingredients: &[String],
        container: Option<&str>,
    ) -> Self {
        let mut states = states.to_vec();
        states.sort_unstable();
        let mut ingredients = ingredients.to_vec();
        ingredients.sort_unstable();
        Self {
            label: label.to_string(),
            states,
            ingredients,
            container: container.map(str::to_string),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// An object node of the action graph. Immutable once built.
#[derive(Debug, Clone)]
pub struct ObjectNode {
    id: ObjectId,
    desc: ObjectDescriptor,
    signature: ObjectSignature,
}

impl ObjectNode {
    pub fn new(id: ObjectId, desc: ObjectDescriptor) -> Self {
        let signature = desc.signature();
        Self {
            id,
            desc,
            signature,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.desc.label
    }

    pub fn states(&self) -> &[String] {
        &self.desc.states
    }

    /// Ingredient labels in file order (the utensil heuristic reads the first one).
    pub fn ingredients(&self) -> &[String] {
        &self.desc.ingredients
    }

    pub fn container(&self) -> Option<&str> {
        self.desc.container.as_deref()
    }

    pub fn descriptor(&self) -> &ObjectDescriptor {
        &self.desc
    }

    pub fn signature(&self) -> &ObjectSignature {
        &self.signature
    }

    /// Structural equality against a free-standing description.
    pub fn matches(&self, desc: &ObjectDescriptor) -> bool {
        self.signature == desc.signature()
    }
}

/// Structural equality; the graph position is not part of an object's identity.
impl PartialEq for ObjectNode {
    fn eq(&self, other: &Self) -> bool {
        self.signature == other.signature
    }
}

impl Eq for ObjectNode {}
