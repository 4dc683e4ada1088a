//! Normalized model registry and its loader.

pub mod loader;
pub mod types;

pub use loader::{load_registry, parse_json, parse_yaml};
pub use types::{is_valid_name, DanglingRelation, Field, FieldKind, Model, ModelRegistry};
