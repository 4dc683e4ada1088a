//! Identifier resolution.
//!
//! Works out which fields address exactly one record of a model. The result
//! decides whether a model gets a detail route, and in which order the
//! dynamic segments of that route appear.

use crate::schema::{FieldKind, Model};

/// Resolve the ordered identifier set of a model
///
/// - every `Identifier` field, in declaration order (composite key)
/// - otherwise the first field marked unique
/// - otherwise nothing, meaning the model has no per-record routes
pub fn resolve(model: &Model) -> Vec<String> {
    let identifiers: Vec<String> = model
        .fields
        .iter()
        .filter(|field| matches!(field.kind, FieldKind::Identifier))
        .map(|field| field.name.clone())
        .collect();

    if !identifiers.is_empty() {
        return identifiers;
    }

    model
        .fields
        .iter()
        .find(|field| field.is_unique)
        .map(|field| vec![field.name.clone()])
        .unwrap_or_default()
}
