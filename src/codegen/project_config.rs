//! Project configuration schema for quikroute.yaml
//!
//! This module defines the structure for project-level configuration that
//! drives route generation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::codegen::orchestration::GenerationConfig;

/// Top-level project configuration from quikroute.yaml
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub project: ProjectMetadata,
    /// Schema file or directory, relative to the config file
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Output directory, relative to the config file
    #[serde(default = "default_output_dir")]
    pub output: String,
    /// Optional template directory overriding the built-in templates
    #[serde(default)]
    pub templates: Option<String>,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
    /// Directory the config was loaded from; relative paths resolve against it
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Project metadata
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One independently generated route tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    /// Path prefix for the group; no prefix when absent
    #[serde(default)]
    pub name: Option<String>,
    /// Root models; discovered from the registry when empty
    #[serde(default)]
    pub roots: Vec<String>,
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_schema() -> String {
    "schema.yaml".to_string()
}

fn default_output_dir() -> String {
    "generated".to_string()
}

impl ProjectConfig {
    /// Load project configuration from quikroute.yaml
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

        let mut config = Self::from_yaml(&contents)
            .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(config)
    }

    /// Parse configuration from YAML text; relative paths resolve against the working directory
    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.project.name.trim().is_empty() {
            return Err("project.name is required".to_string());
        }

        let mut names = std::collections::HashSet::new();
        for group in &self.groups {
            if group.max_depth == Some(0) {
                return Err(format!(
                    "groups.max_depth must be a positive integer (group '{}')",
                    group.name.as_deref().unwrap_or("")
                ));
            }
            if !names.insert(group.name.clone()) {
                return Err(format!(
                    "Duplicate group '{}'",
                    group.name.as_deref().unwrap_or("")
                ));
            }
        }

        Ok(())
    }

    pub fn schema_path(&self) -> PathBuf {
        self.base_dir.join(&self.schema)
    }

    pub fn output_path(&self) -> PathBuf {
        self.base_dir.join(&self.output)
    }

    pub fn templates_path(&self) -> Option<PathBuf> {
        self.templates.as_ref().map(|t| self.base_dir.join(t))
    }

    /// Convert to the orchestration config, with at least one group
    pub fn to_generation_config(&self) -> GenerationConfig {
        let groups = if self.groups.is_empty() {
            vec![GroupConfig::default()]
        } else {
            self.groups.clone()
        };

        GenerationConfig {
            schema: self.schema_path(),
            output: self.output_path(),
            templates: self.templates_path(),
            groups,
        }
    }
}
