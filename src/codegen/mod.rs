//! Route generation framework.
//!
//! This module turns a model registry into route trees and materializes
//! those trees as files.

pub mod fs_utils;
pub mod identifier;
pub mod materialize;
pub mod orchestration;
pub mod project_config;
pub mod relation_graph;
pub mod route_graph;
pub mod route_list;
pub mod segments;
pub mod utils;

// Re-export key types
pub use materialize::{materialize, materialize_all, write_files, GeneratedFile, TemplateSet};
pub use orchestration::{generate_project, GenerationConfig, GenerationReport};
pub use project_config::{GroupConfig, ProjectConfig, ProjectMetadata};
pub use relation_graph::{default_roots, RelationGraph};
pub use route_graph::{build, build_group, BuildOptions, NodeKind, Operation, RelationRef, RouteNode};
pub use route_list::{flatten, render_route_table, RouteEntry};
pub use segments::{slug_for, to_runtime_expression};

/// Generate all routes from a quikroute.yaml configuration file
///
/// # Example
///
/// ```rust,no_run
/// fn main() {
///     quikroute::codegen::generate_from_yaml("quikroute.yaml")
///         .expect("Route generation failed");
/// }
/// ```
pub fn generate_from_yaml(yaml_path: impl AsRef<std::path::Path>) -> Result<GenerationReport, String> {
    let config = ProjectConfig::from_file(&yaml_path)?;
    config.validate()?;

    tracing::info!(project = %config.project.name, "configuration loaded");

    generate_project(&config.to_generation_config())
        .map_err(|e| format!("Route generation failed: {}", e))
}
