//! Kitchen inventory: the objects already available before planning starts.

use rustc_hash::FxHashSet;

use crate::object::{ObjectDescriptor, ObjectNode, ObjectSignature};

/// Read-only availability set queried by structural equality.
#[derive(Debug, Clone, Default)]
pub struct Kitchen {
    items: Vec<ObjectDescriptor>,
    available: FxHashSet<ObjectSignature>,
}

impl Kitchen {
    pub fn new(items: Vec<ObjectDescriptor>) -> Self {
        let available = items.iter().map(ObjectDescriptor::signature).collect();
        Self { items, available }
    }

    pub fn items(&self) -> &[ObjectDescriptor] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, node: &ObjectNode) -> bool {
        self.available.contains(node.signature())
    }

    pub fn contains_descriptor(&self, desc: &ObjectDescriptor) -> bool {
        self.available.contains(&desc.signature())
    }
}

impl FromIterator<ObjectDescriptor> for Kitchen {
    fn from_iter<T: IntoIterator<Item = ObjectDescriptor>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
