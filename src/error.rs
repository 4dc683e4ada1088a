//! Error types for schema loading, route building and materialization.

use std::path::PathBuf;

/// Errors raised while building a route tree.
///
/// Every variant carries the ancestor chain (`User > Post`) at the point of
/// failure so callers can tell which relation caused it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Missing root model, or two siblings that would share a path segment.
    #[error("configuration error at '{path}': {message}")]
    Configuration { message: String, path: String },

    /// A relation field points at a model the registry does not contain.
    #[error("unresolved relation {model}.{field} -> '{related}' at '{path}'")]
    UnresolvedRelation {
        model: String,
        field: String,
        related: String,
        path: String,
    },
}

impl RouteError {
    /// Ancestor chain reported with the error
    pub fn path(&self) -> &str {
        match self {
            RouteError::Configuration { path, .. } => path,
            RouteError::UnresolvedRelation { path, .. } => path,
        }
    }
}

/// Errors raised while loading or validating a model registry.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported schema file '{0}' (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("invalid name '{name}' in {context}: use letters, digits and '_', not starting with a digit")]
    InvalidName { name: String, context: String },

    #[error("duplicate model '{0}'")]
    DuplicateModel(String),

    #[error("field name cannot be empty in model '{0}'")]
    EmptyFieldName(String),

    #[error("duplicate field '{field}' in model '{model}'")]
    DuplicateField { model: String, field: String },
}

/// Errors raised while loading templates or stamping files.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template directory does not exist: {0}")]
    MissingDirectory(PathBuf),

    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("two routes materialize to the same file '{0}'")]
    DuplicateOutput(PathBuf),
}

/// Top-level error for a full generation run.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid project configuration: {0}")]
    Config(String),

    #[error("refusing to write outside the output directory: {0}")]
    UnsafeOutputPath(PathBuf),
}
