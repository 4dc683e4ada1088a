//! Schema loader.
//!
//! Loads the normalized model list produced by schema introspection. The
//! list is delivered as a single batch, either:
//! - one `.yaml`/`.yml`/`.json` file holding a `models:` list, or
//! - a directory of YAML files, each holding one model or a `models:` list.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SchemaError;
use crate::schema::types::{Model, ModelRegistry};

/// On-disk shape of a schema document
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SchemaDocument {
    Batch { models: Vec<Model> },
    Single(Model),
}

impl SchemaDocument {
    fn into_models(self) -> Vec<Model> {
        match self {
            SchemaDocument::Batch { models } => models,
            SchemaDocument::Single(model) => vec![model],
        }
    }
}

/// Load and validate a model registry from a file or directory
///
/// # Example
///
/// ```ignore
/// use quikroute::schema::load_registry;
///
/// let registry = load_registry("config/examples/blog/schema.yaml")?;
/// ```
pub fn load_registry<P: AsRef<Path>>(path: P) -> Result<ModelRegistry, SchemaError> {
    let path = path.as_ref();

    let models = if path.is_dir() {
        load_models_from_dir(path)?
    } else {
        load_models_from_file(path)?
    };

    ModelRegistry::from_models(models)
}

/// Parse a YAML schema document from a string
pub fn parse_yaml(content: &str, origin: &Path) -> Result<Vec<Model>, SchemaError> {
    serde_yaml::from_str::<SchemaDocument>(content)
        .map(SchemaDocument::into_models)
        .map_err(|source| SchemaError::Yaml {
            path: origin.to_path_buf(),
            source,
        })
}

/// Parse a JSON schema document from a string
pub fn parse_json(content: &str, origin: &Path) -> Result<Vec<Model>, SchemaError> {
    serde_json::from_str::<SchemaDocument>(content)
        .map(SchemaDocument::into_models)
        .map_err(|source| SchemaError::Json {
            path: origin.to_path_buf(),
            source,
        })
}

fn load_models_from_file(path: &Path) -> Result<Vec<Model>, SchemaError> {
    let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => parse_yaml(&content, path),
        Some("json") => parse_json(&content, path),
        _ => Err(SchemaError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Load every YAML file in a directory, sorted by file name
fn load_models_from_dir(dir: &Path) -> Result<Vec<Model>, SchemaError> {
    let read_dir = fs::read_dir(dir).map_err(|source| SchemaError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| SchemaError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        // Only process .yaml and .yml files
        if let Some(ext) = path.extension() {
            if ext == "yaml" || ext == "yml" {
                paths.push(path);
            }
        }
    }

    // read_dir order is platform dependent
    paths.sort();

    let mut models = Vec::new();
    for path in paths {
        models.extend(load_models_from_file(&path)?);
    }

    Ok(models)
}
