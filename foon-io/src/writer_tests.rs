use std::fs;

use foon_core::{ActionGraph, ActionGraphBuilder, ObjectDescriptor, OutputFormat};
use foon_planner::TaskPlan;

use crate::{format_plan_text, output_file_name, unit_text, write_plan, PlanFile};

fn boil_water() -> (ActionGraph, TaskPlan) {
    let mut b = ActionGraphBuilder::new();
    let cup = b.object(ObjectDescriptor::new("water").in_container("cup"));
    let pot = b.object(ObjectDescriptor::new("pot").with_ingredients(["water"]));
    let boiled = b.object(
        ObjectDescriptor::new("water")
            .with_states(["boiling"])
            .in_container("pot"),
    );
    let salt = b.object(ObjectDescriptor::new("salt"));
    let u0 = b.unit(&[cup], &[pot], "pour");
    let u1 = b.unit(&[pot], &[boiled], "boil");
    let plan = TaskPlan {
        goal: boiled,
        units: vec![u0, u1],
        unresolved: vec![salt],
        decisions: Vec::new(),
    };
    (b.build().unwrap(), plan)
}

#[test]
fn file_names_follow_goal_label() {
    assert_eq!(output_file_name("tea", OutputFormat::Text), "output_MCTS_tea.txt");
    assert_eq!(
        output_file_name("salt/pepper", OutputFormat::Json),
        "output_MCTS_salt_pepper.json"
    );
}

#[test]
fn unit_block_lists_inputs_motion_outputs() {
    let (graph, _) = boil_water();
    assert_eq!(
        unit_text(&graph, 1),
        "O\tpot\t0\nS\tcontains\t{water}\nM\tboil\t<Assumed>\t<Assumed>\n\
         O\twater\t1\nS\tboiling\nS\tin\t[pot]\n//"
    );
}

#[test]
fn text_plan_starts_with_separator() {
    let (graph, plan) = boil_water();
    let text = format_plan_text(&graph, &plan);
    assert!(text.starts_with("//\nO\twater\t0\nS\tin\t[cup]\nM\tpour"));
    assert_eq!(text.matches("//").count(), 3);
    let pour = text.find("M\tpour").unwrap();
    let boil = text.find("M\tboil").unwrap();
    assert!(pour < boil);
}

#[test]
fn empty_plan_is_just_the_separator() {
    let (graph, mut plan) = boil_water();
    plan.units.clear();
    assert_eq!(format_plan_text(&graph, &plan), "//\n");
}

#[test]
fn write_plan_text_and_json() {
    let (graph, plan) = boil_water();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("plans");

    let path = write_plan(&out, &graph, &plan, "water", OutputFormat::Text).unwrap();
    assert_eq!(path, out.join("output_MCTS_water.txt"));
    assert_eq!(fs::read_to_string(&path).unwrap(), format_plan_text(&graph, &plan));

    let path = write_plan(&out, &graph, &plan, "water", OutputFormat::Json).unwrap();
    let parsed: PlanFile = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.goal, *graph.object(plan.goal).descriptor());
    let motions: Vec<&str> = parsed.units.iter().map(|u| u.motion.as_str()).collect();
    assert_eq!(motions, ["pour", "boil"]);
    assert_eq!(parsed.units[1].inputs, vec![ObjectDescriptor::new("pot").with_ingredients(["water"])]);
    assert_eq!(parsed.unresolved, vec![ObjectDescriptor::new("salt")]);

    // No temp files left behind.
    let names: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.iter().all(|n| !n.ends_with(".tmp")));
}
