//! Type definitions for the normalized model registry.
//!
//! These types represent the model/field/relation list handed over by
//! schema introspection and are consumed read-only by route generation.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::SchemaError;

/// Model and field names end up in URL segments, parameter names and
/// directory names, so they are restricted to identifier characters.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("name pattern is valid"));

/// Check that a model or field name is usable as a route component
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Kind of a model field
///
/// Relation kinds carry the related model's name. The name is resolved
/// lazily against the registry so forward references are fine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    Identifier,
    RelationToOne { related_model: String },
    RelationToMany { related_model: String },
}

impl FieldKind {
    /// Name of the related model, for relation kinds
    pub fn related_model(&self) -> Option<&str> {
        match self {
            FieldKind::Scalar | FieldKind::Identifier => None,
            FieldKind::RelationToOne { related_model } => Some(related_model),
            FieldKind::RelationToMany { related_model } => Some(related_model),
        }
    }

    pub fn is_relation(&self) -> bool {
        self.related_model().is_some()
    }

    /// Get the kind as it appears in schema files
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Scalar => "scalar",
            FieldKind::Identifier => "identifier",
            FieldKind::RelationToOne { .. } => "relation_to_one",
            FieldKind::RelationToMany { .. } => "relation_to_many",
        }
    }
}

/// Kind tag as written in schema files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
enum KindTag {
    Scalar,
    #[serde(alias = "id")]
    Identifier,
    #[serde(alias = "to_one")]
    RelationToOne,
    #[serde(alias = "to_many")]
    RelationToMany,
}

/// Field as written in schema files, before the kind/relation pairing is checked
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct RawField {
    name: String,
    kind: KindTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    related_model: Option<String>,
    #[serde(default, alias = "is_unique")]
    unique: bool,
    #[serde(default, alias = "is_required")]
    required: bool,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    scalar_type: Option<String>,
}

/// A single field of a model
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "RawField", into = "RawField")]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub is_unique: bool,
    pub is_required: bool,
    /// Scalar data type (e.g. "String", "Int"), used by templates for form inputs
    pub scalar_type: Option<String>,
}

impl TryFrom<RawField> for Field {
    type Error = String;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        let kind = match (raw.kind, raw.related_model) {
            (KindTag::Scalar, None) => FieldKind::Scalar,
            (KindTag::Identifier, None) => FieldKind::Identifier,
            (KindTag::RelationToOne, Some(related_model)) => FieldKind::RelationToOne { related_model },
            (KindTag::RelationToMany, Some(related_model)) => FieldKind::RelationToMany { related_model },
            (KindTag::RelationToOne | KindTag::RelationToMany, None) => {
                return Err(format!(
                    "relation field '{}' must specify related_model",
                    raw.name
                ));
            }
            (KindTag::Scalar | KindTag::Identifier, Some(related)) => {
                return Err(format!(
                    "non-relation field '{}' cannot reference related_model '{}'",
                    raw.name, related
                ));
            }
        };

        Ok(Field {
            name: raw.name,
            kind,
            is_unique: raw.unique,
            is_required: raw.required,
            scalar_type: raw.scalar_type,
        })
    }
}

impl From<Field> for RawField {
    fn from(field: Field) -> Self {
        let (kind, related_model) = match field.kind {
            FieldKind::Scalar => (KindTag::Scalar, None),
            FieldKind::Identifier => (KindTag::Identifier, None),
            FieldKind::RelationToOne { related_model } => (KindTag::RelationToOne, Some(related_model)),
            FieldKind::RelationToMany { related_model } => (KindTag::RelationToMany, Some(related_model)),
        };

        RawField {
            name: field.name,
            kind,
            related_model,
            unique: field.is_unique,
            required: field.is_required,
            scalar_type: field.scalar_type,
        }
    }
}

impl Field {
    fn with_kind(name: impl Into<String>, kind: FieldKind) -> Self {
        Field {
            name: name.into(),
            kind,
            is_unique: false,
            is_required: false,
            scalar_type: None,
        }
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::with_kind(name, FieldKind::Scalar)
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Self::with_kind(name, FieldKind::Identifier)
    }

    pub fn to_one(name: impl Into<String>, related_model: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            FieldKind::RelationToOne {
                related_model: related_model.into(),
            },
        )
    }

    pub fn to_many(name: impl Into<String>, related_model: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            FieldKind::RelationToMany {
                related_model: related_model.into(),
            },
        )
    }

    /// Mark the field as carrying a unique constraint
    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn with_type(mut self, scalar_type: impl Into<String>) -> Self {
        self.scalar_type = Some(scalar_type.into());
        self
    }
}

/// A named entity with an ordered field list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Model {
    pub name: String,
    /// Declaration order is significant: it drives default identifier
    /// selection and the order of nested routes.
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default, rename = "group_root", alias = "is_group_root")]
    pub is_group_root: bool,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Model {
            name: name.into(),
            fields: Vec::new(),
            is_group_root: false,
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn group_root(mut self) -> Self {
        self.is_group_root = true;
        self
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields holding plain record data (identifiers and scalars)
    pub fn data_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.kind.is_relation())
    }

    /// To-many relation fields, in declaration order
    pub fn to_many_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(|f| matches!(f.kind, FieldKind::RelationToMany { .. }))
    }
}

/// A relation field whose target model is missing from the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingRelation {
    pub model: String,
    pub field: String,
    pub related: String,
}

/// Read-only, name-indexed view of all models
///
/// Insertion order is preserved so iteration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelRegistry {
    models: IndexMap<String, Model>,
}

impl ModelRegistry {
    /// Build a registry from a batch of models, validating names
    pub fn from_models(models: Vec<Model>) -> Result<Self, SchemaError> {
        let mut registry = IndexMap::with_capacity(models.len());

        for model in models {
            validate_model(&model)?;
            if registry.contains_key(&model.name) {
                return Err(SchemaError::DuplicateModel(model.name));
            }
            registry.insert(model.name.clone(), model);
        }

        Ok(ModelRegistry { models: registry })
    }

    pub fn get(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// All models in declaration order
    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Relation fields pointing at models that are not registered
    pub fn unresolved_relations(&self) -> Vec<DanglingRelation> {
        self.models()
            .flat_map(|model| {
                model.fields.iter().filter_map(move |field| {
                    let related = field.kind.related_model()?;
                    if self.contains(related) {
                        None
                    } else {
                        Some(DanglingRelation {
                            model: model.name.clone(),
                            field: field.name.clone(),
                            related: related.to_string(),
                        })
                    }
                })
            })
            .collect()
    }
}

/// Validate model and field names
fn validate_model(model: &Model) -> Result<(), SchemaError> {
    if model.name.trim().is_empty() {
        return Err(SchemaError::EmptyModelName);
    }
    if !is_valid_name(&model.name) {
        return Err(SchemaError::InvalidName {
            name: model.name.clone(),
            context: "model list".to_string(),
        });
    }

    let mut seen = std::collections::HashSet::new();
    for field in &model.fields {
        if field.name.trim().is_empty() {
            return Err(SchemaError::EmptyFieldName(model.name.clone()));
        }
        if !is_valid_name(&field.name) {
            return Err(SchemaError::InvalidName {
                name: field.name.clone(),
                context: format!("model '{}'", model.name),
            });
        }
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                model: model.name.clone(),
                field: field.name.clone(),
            });
        }
    }

    Ok(())
}
