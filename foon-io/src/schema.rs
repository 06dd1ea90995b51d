//! On-disk JSON shapes.

use std::collections::BTreeMap;

use foon_core::{FuIndex, ObjectDescriptor, ObjectId};
use serde::{Deserialize, Serialize};

/// Action graph file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphFile {
    pub object_nodes: Vec<ObjectRecord>,
    pub functional_units: Vec<UnitRecord>,
    /// Precomputed producer lists. Derived from unit outputs when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_to_fu_map: Option<BTreeMap<ObjectId, Vec<FuIndex>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub id: ObjectId,
    #[serde(flatten)]
    pub object: ObjectDescriptor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitRecord {
    pub input_nodes: Vec<ObjectId>,
    pub output_nodes: Vec<ObjectId>,
    pub motion_node: String,
}

/// JSON rendering of a task plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFile {
    pub goal: ObjectDescriptor,
    pub units: Vec<PlannedUnit>,
    #[serde(default)]
    pub unresolved: Vec<ObjectDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedUnit {
    pub index: FuIndex,
    pub motion: String,
    pub inputs: Vec<ObjectDescriptor>,
    pub outputs: Vec<ObjectDescriptor>,
}
