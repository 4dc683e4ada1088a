//! # Quikroute: Schema-Driven CRUD Route Generation
//!
//! Quikroute turns a normalized data-model schema into a tree of CRUD routes
//! and stamps that tree out as source files from a template set.
//!
//! ## Features
//!
//! - **Route graph builder**: List/Create per model, Read/Update/Delete per record,
//!   nested collections for to-many relations
//! - **Bounded traversal**: relation cycles and an optional max depth keep trees finite
//! - **Deterministic output**: same registry and options, same tree and files
//! - **Groups**: independent route trees under distinct path prefixes
//! - **Template materializer**: directory per segment, placeholder substitution
//!
//! ## Example schema
//!
//! ```yaml
//! models:
//!   - name: User
//!     fields:
//!       - name: id
//!         kind: identifier
//!       - name: posts
//!         kind: relation_to_many
//!         related_model: Post
//!   - name: Post
//!     fields:
//!       - name: id
//!         kind: identifier
//!       - name: authorId
//!         kind: relation_to_one
//!         related_model: User
//! ```
//!
//! Building from `User` yields `/user`, `/user/create`, `/user/[userId]`,
//! `/user/[userId]/edit`, `/user/[userId]/delete` and the same five routes
//! for `Post` nested under `/user/[userId]/post`.

// Normalized model registry
pub mod schema;

// Route building and materialization
pub mod codegen;

pub mod error;

// Re-export key types
pub use schema::{load_registry, Field, FieldKind, Model, ModelRegistry};
pub use error::{GenerateError, RouteError, SchemaError, TemplateError};

pub use codegen::{
    build, build_group, flatten, materialize, slug_for, to_runtime_expression, BuildOptions,
    NodeKind, Operation, RouteEntry, RouteNode, TemplateSet,
};
