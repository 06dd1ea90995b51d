//! foon-io: input loaders and task plan writers.

pub mod load;
pub mod schema;
pub mod writer;

pub use load::{
    graph_from_file, load_graph, load_kitchen, load_motion_rates, load_objects, load_utensils,
    parse_utensils, Inputs, LoadError,
};
pub use schema::{GraphFile, ObjectRecord, PlanFile, PlannedUnit, UnitRecord};
pub use writer::{
    format_plan_json, format_plan_text, output_file_name, plan_file, unit_text, write_plan,
    WriteError,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

#[cfg(test)]
mod writer_tests;
