//! High-level orchestration API for route generation.
//!
//! Loads the schema, builds one route tree per group, stamps the templates
//! and writes the files.

use std::path::PathBuf;

use crate::codegen::materialize::{materialize_all, write_files, GeneratedFile, TemplateSet};
use crate::codegen::project_config::GroupConfig;
use crate::codegen::relation_graph::default_roots;
use crate::codegen::route_graph::{build_group, BuildOptions, RouteNode};
use crate::codegen::route_list::{flatten, RouteEntry};
use crate::error::{GenerateError, RouteError};
use crate::schema::{load_registry, ModelRegistry};

/// Configuration for a generation run.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Schema file or directory
    pub schema: PathBuf,

    /// Output root for generated files
    pub output: PathBuf,

    /// Optional: template directory (built-in templates otherwise)
    pub templates: Option<PathBuf>,

    /// Route trees to generate, one per group
    pub groups: Vec<GroupConfig>,
}

/// Outcome of a generation run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub models: usize,
    pub routes: Vec<RouteEntry>,
    pub files: Vec<PathBuf>,
}

/// Build options for a group
pub fn build_options(group: &GroupConfig) -> BuildOptions {
    BuildOptions {
        group: group.name.clone(),
        max_depth: group.max_depth,
    }
}

/// Build one route tree per group
///
/// Groups without explicit roots use `default_roots`.
pub fn build_trees<'a>(
    registry: &'a ModelRegistry,
    groups: &[GroupConfig],
) -> Result<Vec<RouteNode<'a>>, RouteError> {
    groups
        .iter()
        .map(|group| {
            let roots = if group.roots.is_empty() {
                default_roots(registry)
            } else {
                group.roots.clone()
            };
            build_group(registry, &roots, &build_options(group))
        })
        .collect()
}

/// Produce the generated files for a registry without touching the disk
pub fn render_project(
    registry: &ModelRegistry,
    groups: &[GroupConfig],
    templates: &TemplateSet,
) -> Result<(Vec<RouteEntry>, Vec<GeneratedFile>), GenerateError> {
    let trees = build_trees(registry, groups)?;
    let routes = trees.iter().flat_map(flatten).collect();
    let files = materialize_all(&trees, templates)?;
    Ok((routes, files))
}

/// Run a full generation: load, build, materialize, write
pub fn generate_project(config: &GenerationConfig) -> Result<GenerationReport, GenerateError> {
    if config.groups.is_empty() {
        return Err(GenerateError::Config("at least one group is required".to_string()));
    }

    let registry = load_registry(&config.schema)?;
    tracing::info!(models = registry.len(), schema = %config.schema.display(), "schema loaded");

    let templates = match &config.templates {
        Some(dir) => TemplateSet::from_dir(dir)?,
        None => TemplateSet::builtin(),
    };

    let (routes, files) = render_project(&registry, &config.groups, &templates)?;
    write_files(&config.output, &files)?;

    Ok(GenerationReport {
        models: registry.len(),
        routes,
        files: files.into_iter().map(|f| f.path).collect(),
    })
}
