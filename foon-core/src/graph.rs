//! The FOON action graph: functional units, object nodes and the producer index.
//!
//! The graph is consumed read-only by search. All cross references (unit inputs/outputs,
//! producer lists) are validated once at construction, so lookups by `FuIndex`/`ObjectId`
//! obtained from the graph itself never go out of range.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::object::{ObjectDescriptor, ObjectId, ObjectNode, ObjectSignature};

/// Position of a functional unit in the action graph.
pub type FuIndex = usize;

/// One action node: prerequisites, results and the motion that performs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionalUnit {
    pub index: FuIndex,
    pub input_nodes: Vec<ObjectId>,
    pub output_nodes: Vec<ObjectId>,
    pub motion_node: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("object at position {position} has id {id}")]
    ObjectIdMismatch { position: usize, id: ObjectId },
    #[error("functional unit at position {position} has index {index}")]
    UnitIndexMismatch { position: usize, index: FuIndex },
    #[error("functional unit {unit} references unknown object {object}")]
    UnknownObject { unit: FuIndex, object: ObjectId },
    #[error("producer index lists unknown functional unit {unit} for object {object}")]
    UnknownUnit { object: ObjectId, unit: FuIndex },
    #[error("producer index has an entry for unknown object {object}")]
    UnknownIndexedObject { object: ObjectId },
}

/// Object id -> ordered, duplicate-free list of units that produce it.
#[derive(Debug, Clone, Default)]
pub struct ActionIndex {
    producers: Vec<Vec<FuIndex>>,
}

impl ActionIndex {
    /// Derive the index from unit outputs, in unit order.
    pub fn from_outputs(num_objects: usize, units: &[FunctionalUnit]) -> Self {
        let mut producers = vec![Vec::new(); num_objects];
        for fu in units {
            for &obj in &fu.output_nodes {
                if let Some(list) = producers.get_mut(obj) {
                    if !list.contains(&fu.index) {
                        list.push(fu.index);
                    }
                }
            }
        }
        Self { producers }
    }

    /// Build from explicit `(object, producers)` entries, e.g. a precomputed map on disk.
    ///
    /// Duplicate units within one entry are dropped, first occurrence wins.
    pub fn from_entries(
        num_objects: usize,
        entries: impl IntoIterator<Item = (ObjectId, Vec<FuIndex>)>,
    ) -> Result<Self, GraphError> {
        let mut producers = vec![Vec::new(); num_objects];
        for (object, units) in entries {
            let list: &mut Vec<FuIndex> = producers
                .get_mut(object)
                .ok_or(GraphError::UnknownIndexedObject { object })?;
            for unit in units {
                if !list.contains(&unit) {
                    list.push(unit);
                }
            }
        }
        Ok(Self { producers })
    }

    pub fn get(&self, object: ObjectId) -> &[FuIndex] {
        self.producers.get(object).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone)]
pub struct ActionGraph {
    objects: Vec<ObjectNode>,
    units: Vec<FunctionalUnit>,
    index: ActionIndex,
}

impl ActionGraph {
    /// Build a graph whose producer index is derived from unit outputs.
    pub fn new(objects: Vec<ObjectNode>, units: Vec<FunctionalUnit>) -> Result<Self, GraphError> {
        let index = ActionIndex::from_outputs(objects.len(), &units);
        Self::with_index(objects, units, index)
    }

    pub fn with_index(
        objects: Vec<ObjectNode>,
        units: Vec<FunctionalUnit>,
        index: ActionIndex,
    ) -> Result<Self, GraphError> {
        for (position, obj) in objects.iter().enumerate() {
            if obj.id() != position {
                return Err(GraphError::ObjectIdMismatch {
                    position,
                    id: obj.id(),
                });
            }
        }
        for (position, fu) in units.iter().enumerate() {
            if fu.index != position {
                return Err(GraphError::UnitIndexMismatch {
                    position,
                    index: fu.index,
                });
            }
            for &object in fu.input_nodes.iter().chain(&fu.output_nodes) {
                if object >= objects.len() {
                    return Err(GraphError::UnknownObject {
                        unit: fu.index,
                        object,
                    });
                }
            }
        }
        for (object, list) in index.producers.iter().enumerate() {
            if let Some(&unit) = list.iter().find(|&&u| u >= units.len()) {
                return Err(GraphError::UnknownUnit { object, unit });
            }
        }
        let mut index = index;
        index.producers.resize(objects.len(), Vec::new());
        Ok(Self {
            objects,
            units,
            index,
        })
    }

    pub fn objects(&self) -> &[ObjectNode] {
        &self.objects
    }

    pub fn units(&self) -> &[FunctionalUnit] {
        &self.units
    }

    pub fn object(&self, id: ObjectId) -> &ObjectNode {
        &self.objects[id]
    }

    pub fn unit(&self, index: FuIndex) -> &FunctionalUnit {
        &self.units[index]
    }

    /// Units that can produce `object`, in index order.
    pub fn producers(&self, object: ObjectId) -> &[FuIndex] {
        self.index.get(object)
    }

    pub fn inputs(&self, index: FuIndex) -> impl Iterator<Item = &ObjectNode> + '_ {
        self.units[index]
            .input_nodes
            .iter()
            .map(move |&id| &self.objects[id])
    }

    pub fn outputs(&self, index: FuIndex) -> impl Iterator<Item = &ObjectNode> + '_ {
        self.units[index]
            .output_nodes
            .iter()
            .map(move |&id| &self.objects[id])
    }

    /// First object node structurally equal to `desc`.
    pub fn find_object(&self, desc: &ObjectDescriptor) -> Option<&ObjectNode> {
        let sig = desc.signature();
        self.objects.iter().find(|o| *o.signature() == sig)
    }
}

/// Incremental construction of small graphs (fixtures, tests, converters).
///
/// Structurally equal objects are interned to one node.
#[derive(Debug, Default)]
pub struct ActionGraphBuilder {
    objects: Vec<ObjectNode>,
    by_signature: FxHashMap<ObjectSignature, ObjectId>,
    units: Vec<FunctionalUnit>,
}

impl ActionGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&mut self, desc: ObjectDescriptor) -> ObjectId {
        let sig = desc.signature();
        if let Some(&id) = self.by_signature.get(&sig) {
            return id;
        }
        let id = self.objects.len();
        self.objects.push(ObjectNode::new(id, desc));
        self.by_signature.insert(sig, id);
        id
    }

    pub fn unit(&mut self, inputs: &[ObjectId], outputs: &[ObjectId], motion: &str) -> FuIndex {
        let index = self.units.len();
        self.units.push(FunctionalUnit {
            index,
            input_nodes: inputs.to_vec(),
            output_nodes: outputs.to_vec(),
            motion_node: motion.to_string(),
        });
        index
    }

    pub fn build(self) -> Result<ActionGraph, GraphError> {
        ActionGraph::new(self.objects, self.units)
    }
}
