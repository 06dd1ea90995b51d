use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use foon_core::{ActionGraph, FuIndex, ObjectDescriptor, ObjectId, ObjectNode, OutputFormat};
use foon_planner::TaskPlan;
use thiserror::Error;

use crate::schema::{PlanFile, PlannedUnit};

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// `output_MCTS_<label>.txt` (or `.json`). Path separators in the label become `_`.
pub fn output_file_name(goal_label: &str, format: OutputFormat) -> String {
    let label: String = goal_label
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    let ext = match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
    };
    format!("output_MCTS_{label}.{ext}")
}

fn push_object(out: &mut String, obj: &ObjectNode, is_output: bool) {
    let _ = writeln!(out, "O\t{}\t{}", obj.label(), u8::from(is_output));
    for state in obj.states() {
        let _ = writeln!(out, "S\t{state}");
    }
    if !obj.ingredients().is_empty() {
        let _ = writeln!(out, "S\tcontains\t{{{}}}", obj.ingredients().join(","));
    }
    if let Some(container) = obj.container() {
        let _ = writeln!(out, "S\tin\t[{container}]");
    }
}

/// One FOON block: inputs, motion, outputs, closing `//`.
pub fn unit_text(graph: &ActionGraph, unit: FuIndex) -> String {
    let mut out = String::new();
    for obj in graph.inputs(unit) {
        push_object(&mut out, obj, false);
    }
    let _ = writeln!(out, "M\t{}\t<Assumed>\t<Assumed>", graph.unit(unit).motion_node);
    for obj in graph.outputs(unit) {
        push_object(&mut out, obj, true);
    }
    out.push_str("//");
    out
}

/// FOON text file body: a leading `//`, then one block per unit in execution order.
pub fn format_plan_text(graph: &ActionGraph, plan: &TaskPlan) -> String {
    let mut out = String::from("//\n");
    for &unit in &plan.units {
        out.push_str(&unit_text(graph, unit));
        out.push('\n');
    }
    out
}

pub fn plan_file(graph: &ActionGraph, plan: &TaskPlan) -> PlanFile {
    let descriptors = |ids: &[ObjectId]| -> Vec<ObjectDescriptor> {
        ids.iter()
            .map(|&id| graph.object(id).descriptor().clone())
            .collect()
    };
    PlanFile {
        goal: graph.object(plan.goal).descriptor().clone(),
        units: plan
            .functional_units(graph)
            .map(|fu| PlannedUnit {
                index: fu.index,
                motion: fu.motion_node.clone(),
                inputs: descriptors(&fu.input_nodes),
                outputs: descriptors(&fu.output_nodes),
            })
            .collect(),
        unresolved: descriptors(&plan.unresolved),
    }
}

pub fn format_plan_json(graph: &ActionGraph, plan: &TaskPlan) -> Result<String, WriteError> {
    Ok(serde_json::to_string_pretty(&plan_file(graph, plan))?)
}

/// Write the plan for `goal_label` into `dir` (tmp + rename). Returns the final path.
pub fn write_plan(
    dir: &Path,
    graph: &ActionGraph,
    plan: &TaskPlan,
    goal_label: &str,
    format: OutputFormat,
) -> Result<PathBuf, WriteError> {
    fs::create_dir_all(dir)?;
    let body = match format {
        OutputFormat::Text => format_plan_text(graph, plan),
        OutputFormat::Json => format_plan_json(graph, plan)?,
    };
    let final_path = dir.join(output_file_name(goal_label, format));
    let tmp = final_path.with_extension("tmp");
    fs::write(&tmp, body)?;
    fs::rename(&tmp, &final_path)?;
    log::info!("wrote task tree to {}", final_path.display());
    Ok(final_path)
}
