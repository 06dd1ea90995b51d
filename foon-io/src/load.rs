//! Input loaders: action graph, kitchen, goals, utensils and motion rates.

use std::fs;
use std::path::{Path, PathBuf};

use foon_core::config::InputsConfig;
use foon_core::{
    ActionGraph, ActionIndex, FunctionalUnit, GraphError, Kitchen, MotionRateWarning, MotionRates,
    ObjectDescriptor, ObjectNode, Utensils,
};
use thiserror::Error;

use crate::schema::GraphFile;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid action graph: {0}")]
    Graph(#[from] GraphError),
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &Path, text: &str) -> Result<T, LoadError> {
    serde_json::from_str(text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Build a validated graph from its file representation.
pub fn graph_from_file(file: GraphFile) -> Result<ActionGraph, GraphError> {
    let num_objects = file.object_nodes.len();
    let objects: Vec<ObjectNode> = file
        .object_nodes
        .into_iter()
        .map(|r| ObjectNode::new(r.id, r.object))
        .collect();
    let units: Vec<FunctionalUnit> = file
        .functional_units
        .into_iter()
        .enumerate()
        .map(|(index, u)| FunctionalUnit {
            index,
            input_nodes: u.input_nodes,
            output_nodes: u.output_nodes,
            motion_node: u.motion_node,
        })
        .collect();
    match file.object_to_fu_map {
        Some(map) => {
            let index = ActionIndex::from_entries(num_objects, map)?;
            ActionGraph::with_index(objects, units, index)
        }
        None => ActionGraph::new(objects, units),
    }
}

pub fn load_graph(path: &Path) -> Result<ActionGraph, LoadError> {
    let file: GraphFile = parse_json(path, &read(path)?)?;
    Ok(graph_from_file(file)?)
}

/// JSON list of object descriptors (kitchen and goal files).
pub fn load_objects(path: &Path) -> Result<Vec<ObjectDescriptor>, LoadError> {
    parse_json(path, &read(path)?)
}

pub fn load_kitchen(path: &Path) -> Result<Kitchen, LoadError> {
    Ok(Kitchen::new(load_objects(path)?))
}

/// One label per line; surrounding whitespace trimmed, blank lines skipped.
pub fn parse_utensils(text: &str) -> Utensils {
    Utensils::new(text.lines().map(str::trim).filter(|l| !l.is_empty()))
}

pub fn load_utensils(path: &Path) -> Result<Utensils, LoadError> {
    Ok(parse_utensils(&read(path)?))
}

pub fn load_motion_rates(path: &Path) -> Result<(MotionRates, Vec<MotionRateWarning>), LoadError> {
    Ok(MotionRates::parse(&read(path)?))
}

/// Everything a planning run reads.
#[derive(Debug)]
pub struct Inputs {
    pub graph: ActionGraph,
    pub kitchen: Kitchen,
    pub utensils: Utensils,
    pub goals: Vec<ObjectDescriptor>,
    pub motion_rates: MotionRates,
    pub motion_warnings: Vec<MotionRateWarning>,
}

impl Inputs {
    pub fn load(cfg: &InputsConfig) -> Result<Self, LoadError> {
        let graph = load_graph(&cfg.foon)?;
        let kitchen = load_kitchen(&cfg.kitchen)?;
        let utensils = load_utensils(&cfg.utensils)?;
        let goals = load_objects(&cfg.goals)?;
        let (motion_rates, motion_warnings) = match &cfg.motion_rates {
            Some(path) => load_motion_rates(path)?,
            None => (MotionRates::new(), Vec::new()),
        };
        log::info!(
            "loaded {} objects, {} units, {} kitchen items, {} utensils, {} goals, {} motion rates",
            graph.objects().len(),
            graph.units().len(),
            kitchen.len(),
            utensils.len(),
            goals.len(),
            motion_rates.len()
        );
        Ok(Self {
            graph,
            kitchen,
            utensils,
            goals,
            motion_rates,
            motion_warnings,
        })
    }
}
