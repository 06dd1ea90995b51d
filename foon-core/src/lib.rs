//! foon-core: action graph data model, kitchen inventory, motion rates and configuration.

pub mod config;
pub mod graph;
pub mod kitchen;
pub mod motion;
pub mod object;
pub mod utensils;

pub use config::{Config, ConfigError, OutputFormat, StatsScope};
pub use graph::{ActionGraph, ActionGraphBuilder, ActionIndex, FuIndex, FunctionalUnit, GraphError};
pub use kitchen::Kitchen;
pub use motion::{MotionRateIssue, MotionRateWarning, MotionRates};
pub use object::{ObjectDescriptor, ObjectId, ObjectNode, ObjectSignature};
pub use utensils::Utensils;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
