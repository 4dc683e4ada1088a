//! Route graph construction.
//!
//! Walks the model registry from a root model and produces an owned tree of
//! route nodes: a collection level per model (List, Create), a detail level
//! per record (Read, Update, Delete) and, under each detail level, one nested
//! collection per to-many relation.
//!
//! ## Termination
//!
//! Each branch carries its own chain of visited model names. A relation whose
//! target is already on the chain is not followed, so no model repeats on a
//! root-to-leaf path and cyclic registries still yield a finite tree. An
//! optional `max_depth` caps the number of models on a path independently of
//! the cycle check.
//!
//! ## Layout
//!
//! ```text
//! /admin                       Root (group prefix)
//! └── user                     Collection(User)
//!     ├── ""                   List
//!     ├── create               Create
//!     └── [userId]             Detail(User)
//!         ├── ""               Read
//!         ├── edit             Update
//!         ├── delete           Delete
//!         └── post             Collection(Post), via User.posts
//!             └── ...
//! ```

use serde::Serialize;

use crate::codegen::identifier;
use crate::codegen::segments::{self, collection_segment, dynamic_segment, join_path, slugs_for};
use crate::error::RouteError;
use crate::schema::{FieldKind, Model, ModelRegistry};

/// CRUD action a route performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    List,
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    /// Operations emitted at a model's collection level, in order
    pub const COLLECTION: [Operation; 2] = [Operation::List, Operation::Create];

    /// Operations emitted at a model's detail level, in order
    pub const DETAIL: [Operation; 3] = [Operation::Read, Operation::Update, Operation::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Path component the operation adds to its level
    ///
    /// List and Read are index routes of their level and add nothing.
    pub fn segment(&self) -> &'static str {
        match self {
            Operation::List | Operation::Read => "",
            Operation::Create => "create",
            Operation::Update => "edit",
            Operation::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a node in the route tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Synthetic node wrapping a traversal; carries the group prefix
    Root,
    /// A model's collection level
    Collection,
    /// One dynamic identifier segment of a model's record level
    Detail,
    /// A concrete CRUD route
    Action(Operation),
}

/// The relation a nested collection was reached through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationRef {
    pub parent_model: String,
    pub field: String,
}

/// Parameters of a build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Group name used as the leading path segment
    pub group: Option<String>,
    /// Maximum number of models on any root-to-leaf path
    pub max_depth: Option<usize>,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// One node of the route tree
///
/// Nodes borrow their model from the registry and own their children.
#[derive(Debug, Clone)]
pub struct RouteNode<'a> {
    pub kind: NodeKind,
    /// None only for the synthetic root
    pub model: Option<&'a Model>,
    pub segment: String,
    /// Full URL path, bracket syntax for dynamic segments
    pub path: String,
    /// Distance from the synthetic root
    pub depth: usize,
    /// Models on the path from the root down to this node, inclusive
    pub parent_chain: Vec<String>,
    /// Identifier set of the node's model
    pub identifier_fields: Vec<String>,
    /// Dynamic parameter names for the identifier set, same order
    pub identifier_slugs: Vec<String>,
    /// Dynamic parameter names on the path from the root down to this node
    pub route_params: Vec<String>,
    /// Relation that nested this node's model under its parent record
    pub relation: Option<RelationRef>,
    pub children: Vec<RouteNode<'a>>,
}

impl<'a> RouteNode<'a> {
    fn root(segment: String) -> Self {
        let path = join_path(&[segment.as_str()]);
        RouteNode {
            kind: NodeKind::Root,
            model: None,
            segment,
            path,
            depth: 0,
            parent_chain: Vec::new(),
            identifier_fields: Vec::new(),
            identifier_slugs: Vec::new(),
            route_params: Vec::new(),
            relation: None,
            children: Vec::new(),
        }
    }

    /// Derive a child of this node that stays within the same model
    fn derive(&self, kind: NodeKind, segment: String) -> Self {
        let path = join_path(&[self.path.as_str(), segment.as_str()]);
        RouteNode {
            kind,
            model: self.model,
            segment,
            path,
            depth: self.depth + 1,
            parent_chain: self.parent_chain.clone(),
            identifier_fields: self.identifier_fields.clone(),
            identifier_slugs: self.identifier_slugs.clone(),
            route_params: self.route_params.clone(),
            relation: self.relation.clone(),
            children: Vec::new(),
        }
    }

    /// Attach a child, rejecting a segment already used by a sibling
    fn push_child(&mut self, child: RouteNode<'a>) -> Result<(), RouteError> {
        self.ensure_free_segment(&child.segment, &child.parent_chain)?;
        self.children.push(child);
        Ok(())
    }

    fn ensure_free_segment(&self, segment: &str, chain: &[String]) -> Result<(), RouteError> {
        if let Some(existing) = self.children.iter().find(|c| c.segment == segment) {
            return Err(RouteError::Configuration {
                message: format!(
                    "segment '{}' under '{}' is produced twice ({} and {})",
                    segment,
                    self.path,
                    existing.describe(),
                    describe_chain(chain),
                ),
                path: format_chain(chain),
            });
        }
        Ok(())
    }

    fn describe(&self) -> String {
        match (self.kind, self.model) {
            (NodeKind::Action(op), Some(model)) => format!("{} {}", op, model.name),
            (_, Some(model)) => model.name.clone(),
            (_, None) => "group root".to_string(),
        }
    }

    /// The CRUD operation, for action nodes
    pub fn operation(&self) -> Option<Operation> {
        match self.kind {
            NodeKind::Action(op) => Some(op),
            _ => None,
        }
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model.map(|m| m.name.as_str())
    }

    /// Path with dynamic segments turned into `${params.x}` expressions
    pub fn runtime_path(&self) -> String {
        segments::to_runtime_expression(&self.path)
    }

    /// Look up a direct child by segment
    pub fn child(&self, segment: &str) -> Option<&RouteNode<'a>> {
        self.children.iter().find(|c| c.segment == segment)
    }

    /// Look up a direct action child
    pub fn action(&self, operation: Operation) -> Option<&RouteNode<'a>> {
        self.children.iter().find(|c| c.operation() == Some(operation))
    }

    /// Pre-order, depth-first iteration over this node and its descendants
    pub fn iter(&self) -> RouteIter<'_, 'a> {
        RouteIter { stack: vec![self] }
    }

    /// All action nodes in traversal order
    pub fn actions(&self) -> impl Iterator<Item = &RouteNode<'a>> {
        self.iter().filter(|n| n.operation().is_some())
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }
}

/// Pre-order iterator over a route tree
pub struct RouteIter<'t, 'a> {
    stack: Vec<&'t RouteNode<'a>>,
}

impl<'t, 'a> Iterator for RouteIter<'t, 'a> {
    type Item = &'t RouteNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

fn format_chain(chain: &[String]) -> String {
    chain.join(" > ")
}

fn describe_chain(chain: &[String]) -> String {
    chain.last().cloned().unwrap_or_else(|| "group root".to_string())
}

/// Build the route tree for a single root model
///
/// The returned node is a synthetic root whose segment is the group name
/// (empty without a group). The build is all-or-nothing: any error discards
/// the partial tree.
///
/// # Example
///
/// ```ignore
/// use quikroute::codegen::route_graph::{build, BuildOptions};
///
/// let tree = build("User", &registry, &BuildOptions::new().with_group("admin"))?;
/// ```
pub fn build<'a>(
    root_model: &str,
    registry: &'a ModelRegistry,
    options: &BuildOptions,
) -> Result<RouteNode<'a>, RouteError> {
    build_group(registry, &[root_model], options)
}

/// Build one tree per root model under a shared group root
///
/// Roots are concatenated in the given order; their collection segments must
/// be pairwise distinct.
pub fn build_group<'a, S: AsRef<str>>(
    registry: &'a ModelRegistry,
    roots: &[S],
    options: &BuildOptions,
) -> Result<RouteNode<'a>, RouteError> {
    let builder = Builder::new(registry, options)?;
    let mut root = RouteNode::root(builder.group_segment.clone());

    for name in roots {
        let name = name.as_ref();
        let model = registry.get(name).ok_or_else(|| RouteError::Configuration {
            message: format!("root model '{}' not found in registry", name),
            path: root.path.clone(),
        })?;

        let collection = builder.collection(&root, model, None)?;
        root.push_child(collection)?;
    }

    tracing::info!(
        group = %root.segment,
        roots = roots.len(),
        nodes = root.node_count(),
        "route tree built"
    );

    Ok(root)
}

struct Builder<'a> {
    registry: &'a ModelRegistry,
    group_segment: String,
    max_depth: Option<usize>,
}

impl<'a> Builder<'a> {
    fn new(registry: &'a ModelRegistry, options: &BuildOptions) -> Result<Self, RouteError> {
        if options.max_depth == Some(0) {
            return Err(RouteError::Configuration {
                message: "max depth must be a positive integer".to_string(),
                path: String::new(),
            });
        }

        let group_segment = match options.group.as_deref() {
            Some(group) => validate_group(group)?,
            None => String::new(),
        };

        Ok(Builder {
            registry,
            group_segment,
            max_depth: options.max_depth,
        })
    }

    /// Build a model's collection level under `parent`
    fn collection(
        &self,
        parent: &RouteNode<'a>,
        model: &'a Model,
        relation: Option<RelationRef>,
    ) -> Result<RouteNode<'a>, RouteError> {
        let mut chain = parent.parent_chain.clone();
        chain.push(model.name.clone());

        self.check_relations(model, &chain)?;

        let identifier_fields = identifier::resolve(model);
        let identifier_slugs = slugs_for(&model.name, &identifier_fields);

        let segment = collection_segment(&model.name);
        let mut node = RouteNode {
            kind: NodeKind::Collection,
            model: Some(model),
            path: join_path(&[parent.path.as_str(), segment.as_str()]),
            segment,
            depth: parent.depth + 1,
            parent_chain: chain,
            identifier_fields,
            identifier_slugs,
            route_params: parent.route_params.clone(),
            relation,
            children: Vec::new(),
        };

        for op in Operation::COLLECTION {
            let action = node.derive(NodeKind::Action(op), op.segment().to_string());
            node.push_child(action)?;
        }

        if node.identifier_slugs.is_empty() {
            if model.to_many_fields().next().is_some() {
                tracing::debug!(
                    model = %model.name,
                    "no identifier; to-many relations have no record to nest under"
                );
            }
            return Ok(node);
        }

        let detail = self.detail(&node, model, 0)?;
        node.push_child(detail)?;

        Ok(node)
    }

    /// Build the detail level for identifier slug `index`
    ///
    /// Composite identifiers nest one dynamic segment per field; only the
    /// innermost level carries actions and nested relations.
    fn detail(
        &self,
        parent: &RouteNode<'a>,
        model: &'a Model,
        index: usize,
    ) -> Result<RouteNode<'a>, RouteError> {
        let slug = parent.identifier_slugs[index].clone();
        let segment = dynamic_segment(&slug);

        // Two models can map to one slug (User.postId, UserPost.id)
        if parent.route_params.contains(&slug) {
            return Err(RouteError::Configuration {
                message: format!(
                    "route parameter '{}' appears twice on '{}'",
                    slug,
                    join_path(&[parent.path.as_str(), segment.as_str()])
                ),
                path: format_chain(&parent.parent_chain),
            });
        }

        let mut node = parent.derive(NodeKind::Detail, segment);
        node.route_params.push(slug);

        if index + 1 < node.identifier_slugs.len() {
            let inner = self.detail(&node, model, index + 1)?;
            node.push_child(inner)?;
            return Ok(node);
        }

        for op in Operation::DETAIL {
            let action = node.derive(NodeKind::Action(op), op.segment().to_string());
            node.push_child(action)?;
        }

        for field in model.to_many_fields() {
            let related_name = match &field.kind {
                FieldKind::RelationToMany { related_model } => related_model,
                _ => continue,
            };
            // existence was checked when the model was entered
            let Some(related) = self.registry.get(related_name) else {
                continue;
            };

            if node.parent_chain.iter().any(|name| name == related_name) {
                tracing::debug!(
                    path = %format_chain(&node.parent_chain),
                    field = %field.name,
                    related = %related_name,
                    "relation cycle, branch not followed"
                );
                continue;
            }

            if let Some(max_depth) = self.max_depth {
                if node.parent_chain.len() >= max_depth {
                    tracing::debug!(
                        path = %format_chain(&node.parent_chain),
                        field = %field.name,
                        max_depth,
                        "max depth reached, branch not followed"
                    );
                    continue;
                }
            }

            let mut child_chain = node.parent_chain.clone();
            child_chain.push(related.name.clone());
            node.ensure_free_segment(&collection_segment(&related.name), &child_chain)?;

            let relation = RelationRef {
                parent_model: model.name.clone(),
                field: field.name.clone(),
            };
            let nested = self.collection(&node, related, Some(relation))?;
            node.push_child(nested)?;
        }

        Ok(node)
    }

    /// Every relation of a visited model must resolve
    fn check_relations(&self, model: &Model, chain: &[String]) -> Result<(), RouteError> {
        for field in &model.fields {
            if let Some(related) = field.kind.related_model() {
                if !self.registry.contains(related) {
                    return Err(RouteError::UnresolvedRelation {
                        model: model.name.clone(),
                        field: field.name.clone(),
                        related: related.to_string(),
                        path: format_chain(chain),
                    });
                }
            }
        }
        Ok(())
    }
}

/// A group name must be a single static path component
fn validate_group(group: &str) -> Result<String, RouteError> {
    let segment = group.trim().trim_matches('/');
    let valid = segment
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if segment.is_empty() || !valid {
        return Err(RouteError::Configuration {
            message: format!("group name '{}' is not a valid path segment", group),
            path: String::new(),
        });
    }
    Ok(segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;

    fn blog_registry() -> ModelRegistry {
        ModelRegistry::from_models(vec![
            Model::new("User")
                .with_field(Field::identifier("id"))
                .with_field(Field::to_many("posts", "Post")),
            Model::new("Post")
                .with_field(Field::identifier("id"))
                .with_field(Field::to_one("authorId", "User")),
        ])
        .unwrap()
    }

    fn segments_of(node: &RouteNode) -> Vec<String> {
        node.children.iter().map(|c| c.segment.clone()).collect()
    }

    #[test]
    fn test_blog_tree_shape() {
        let registry = blog_registry();
        let tree = build("User", &registry, &BuildOptions::new()).unwrap();

        assert_eq!(tree.kind, NodeKind::Root);
        assert_eq!(tree.path, "/");

        let user = tree.child("user").unwrap();
        assert_eq!(user.kind, NodeKind::Collection);
        assert_eq!(segments_of(user), vec!["", "create", "[userId]"]);
        assert_eq!(user.children[0].operation(), Some(Operation::List));
        assert_eq!(user.children[1].operation(), Some(Operation::Create));

        let user_detail = user.child("[userId]").unwrap();
        assert_eq!(segments_of(user_detail), vec!["", "edit", "delete", "post"]);

        let post = user_detail.child("post").unwrap();
        assert_eq!(post.path, "/user/[userId]/post");
        assert_eq!(post.parent_chain, vec!["User", "Post"]);
        assert_eq!(
            post.relation,
            Some(RelationRef {
                parent_model: "User".to_string(),
                field: "posts".to_string(),
            })
        );

        let post_detail = post.child("[postId]").unwrap();
        assert_eq!(segments_of(post_detail), vec!["", "edit", "delete"]);
        assert_eq!(
            post_detail.action(Operation::Update).unwrap().path,
            "/user/[userId]/post/[postId]/edit"
        );
    }

    #[test]
    fn test_depth_counts_from_root() {
        let registry = blog_registry();
        let tree = build("User", &registry, &BuildOptions::new()).unwrap();

        for node in tree.iter() {
            for child in &node.children {
                assert_eq!(child.depth, node.depth + 1);
            }
        }
    }

    #[test]
    fn test_missing_root_model() {
        let registry = blog_registry();
        let err = build("Ghost", &registry, &BuildOptions::new()).unwrap_err();
        assert!(matches!(err, RouteError::Configuration { .. }));
        assert!(err.to_string().contains("Ghost"));
    }

    #[test]
    fn test_self_relation_terminates() {
        let registry = ModelRegistry::from_models(vec![Model::new("Category")
            .with_field(Field::identifier("id"))
            .with_field(Field::to_many("children", "Category"))])
        .unwrap();

        let tree = build("Category", &registry, &BuildOptions::new()).unwrap();
        let collections = tree
            .iter()
            .filter(|n| n.kind == NodeKind::Collection)
            .count();
        assert_eq!(collections, 1);
    }

    #[test]
    fn test_mutual_relation_stops_at_repeat() {
        let registry = ModelRegistry::from_models(vec![
            Model::new("A")
                .with_field(Field::identifier("id"))
                .with_field(Field::to_many("bs", "B")),
            Model::new("B")
                .with_field(Field::identifier("id"))
                .with_field(Field::to_many("as", "A")),
        ])
        .unwrap();

        let tree = build("A", &registry, &BuildOptions::new()).unwrap();
        for node in tree.iter() {
            let mut seen = std::collections::HashSet::new();
            assert!(node.parent_chain.iter().all(|name| seen.insert(name)));
        }
        assert!(tree.iter().any(|n| n.path == "/a/[aId]/b/[bId]"));
        assert!(!tree.iter().any(|n| n.path.starts_with("/a/[aId]/b/[bId]/a")));
    }

    #[test]
    fn test_max_depth_cuts_chain() {
        let registry = ModelRegistry::from_models(vec![
            Model::new("A")
                .with_field(Field::identifier("id"))
                .with_field(Field::to_many("bs", "B")),
            Model::new("B")
                .with_field(Field::identifier("id"))
                .with_field(Field::to_many("cs", "C")),
            Model::new("C").with_field(Field::identifier("id")),
        ])
        .unwrap();

        let full = build("A", &registry, &BuildOptions::new()).unwrap();
        assert!(full.iter().any(|n| n.model_name() == Some("C")));

        let cut = build("A", &registry, &BuildOptions::new().with_max_depth(2)).unwrap();
        assert!(cut.iter().any(|n| n.model_name() == Some("B")));
        assert!(!cut.iter().any(|n| n.model_name() == Some("C")));

        let only_root = build("A", &registry, &BuildOptions::new().with_max_depth(1)).unwrap();
        assert!(only_root.iter().all(|n| n.model_name() != Some("B")));
    }

    #[test]
    fn test_zero_max_depth_rejected() {
        let registry = blog_registry();
        let err = build("User", &registry, &BuildOptions::new().with_max_depth(0)).unwrap_err();
        assert!(matches!(err, RouteError::Configuration { .. }));
    }

    #[test]
    fn test_model_without_identifier_has_no_detail() {
        let registry = ModelRegistry::from_models(vec![Model::new("Event")
            .with_field(Field::scalar("name"))
            .with_field(Field::to_many("tags", "Event"))])
        .unwrap();

        let tree = build("Event", &registry, &BuildOptions::new()).unwrap();
        let ops: Vec<Operation> = tree.actions().filter_map(|n| n.operation()).collect();
        assert_eq!(ops, vec![Operation::List, Operation::Create]);
    }

    #[test]
    fn test_composite_identifier_nests_segments() {
        let registry = ModelRegistry::from_models(vec![Model::new("Membership")
            .with_field(Field::identifier("teamId"))
            .with_field(Field::identifier("userId"))])
        .unwrap();

        let tree = build("Membership", &registry, &BuildOptions::new()).unwrap();
        let read = tree
            .actions()
            .find(|n| n.operation() == Some(Operation::Read))
            .unwrap();
        assert_eq!(read.path, "/membership/[membershipTeamId]/[membershipUserId]");

        let outer = tree
            .child("membership")
            .and_then(|c| c.child("[membershipTeamId]"))
            .unwrap();
        assert_eq!(outer.children.len(), 1);
    }

    #[test]
    fn test_unresolved_relation_aborts_build() {
        let registry = ModelRegistry::from_models(vec![
            Model::new("User")
                .with_field(Field::identifier("id"))
                .with_field(Field::to_many("posts", "Post")),
            Model::new("Post")
                .with_field(Field::identifier("id"))
                .with_field(Field::to_one("editor", "Editor")),
        ])
        .unwrap();

        let err = build("User", &registry, &BuildOptions::new()).unwrap_err();
        match err {
            RouteError::UnresolvedRelation { model, field, related, path } => {
                assert_eq!(model, "Post");
                assert_eq!(field, "editor");
                assert_eq!(related, "Editor");
                assert_eq!(path, "User > Post");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_two_relations_to_same_model_collide() {
        let registry = ModelRegistry::from_models(vec![
            Model::new("User")
                .with_field(Field::identifier("id"))
                .with_field(Field::to_many("authored", "Post"))
                .with_field(Field::to_many("reviewed", "Post")),
            Model::new("Post").with_field(Field::identifier("id")),
        ])
        .unwrap();

        let err = build("User", &registry, &BuildOptions::new()).unwrap_err();
        assert!(matches!(err, RouteError::Configuration { .. }));
        assert_eq!(err.path(), "User > Post");
        assert!(err.to_string().contains("/user/[userId]"));
    }

    #[test]
    fn test_model_named_like_operation_collides() {
        let registry = ModelRegistry::from_models(vec![
            Model::new("User")
                .with_field(Field::identifier("id"))
                .with_field(Field::to_many("edits", "Edit")),
            Model::new("Edit").with_field(Field::identifier("id")),
        ])
        .unwrap();

        let err = build("User", &registry, &BuildOptions::new()).unwrap_err();
        assert!(err.to_string().contains("segment 'edit'"));
    }

    #[test]
    fn test_group_prefix() {
        let registry = blog_registry();
        let tree = build("User", &registry, &BuildOptions::new().with_group("admin")).unwrap();

        assert_eq!(tree.segment, "admin");
        assert!(tree.iter().skip(1).all(|n| n.path.starts_with("/admin/")));
    }

    #[test]
    fn test_invalid_group_name() {
        let registry = blog_registry();
        for group in ["a/b", "..", "[admin]", "ad min"] {
            let err = build("User", &registry, &BuildOptions::new().with_group(group)).unwrap_err();
            assert!(matches!(err, RouteError::Configuration { .. }), "{} was accepted", group);
        }

        let tree = build("User", &registry, &BuildOptions::new().with_group("admin-area")).unwrap();
        assert_eq!(tree.path, "/admin-area");
    }

    #[test]
    fn test_repeated_route_parameter_rejected() {
        let registry = ModelRegistry::from_models(vec![
            Model::new("User")
                .with_field(Field::identifier("postId"))
                .with_field(Field::to_many("items", "UserPost")),
            Model::new("UserPost").with_field(Field::identifier("id")),
        ])
        .unwrap();

        let err = build("User", &registry, &BuildOptions::new()).unwrap_err();
        assert!(matches!(err, RouteError::Configuration { .. }));
        assert_eq!(err.path(), "User > UserPost");
        assert!(err.to_string().contains("'userPostId'"));
    }

    #[test]
    fn test_route_params_follow_path() {
        let registry = blog_registry();
        let tree = build("User", &registry, &BuildOptions::new()).unwrap();

        for node in tree.iter() {
            let mut seen = std::collections::HashSet::new();
            assert!(node.route_params.iter().all(|p| seen.insert(p)));
        }

        let delete = tree
            .iter()
            .find(|n| n.path == "/user/[userId]/post/[postId]/delete")
            .unwrap();
        assert_eq!(delete.route_params, vec!["userId", "postId"]);
    }

    #[test]
    fn test_build_group_concatenates_roots() {
        let registry = ModelRegistry::from_models(vec![
            Model::new("User").with_field(Field::identifier("id")),
            Model::new("Tag").with_field(Field::scalar("label").unique()),
        ])
        .unwrap();

        let tree = build_group(&registry, &["User", "Tag"], &BuildOptions::new()).unwrap();
        assert_eq!(segments_of(&tree), vec!["user", "tag"]);
        assert!(tree.iter().any(|n| n.path == "/tag/[tagLabel]"));
    }

    #[test]
    fn test_build_group_rejects_duplicate_root() {
        let registry = blog_registry();
        let err = build_group(&registry, &["User", "User"], &BuildOptions::new()).unwrap_err();
        assert!(matches!(err, RouteError::Configuration { .. }));
    }

    #[test]
    fn test_tree_and_registry_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ModelRegistry>();
        assert_send_sync::<RouteNode<'static>>();
    }

    #[test]
    fn test_runtime_path() {
        let registry = blog_registry();
        let tree = build("User", &registry, &BuildOptions::new()).unwrap();
        let post_detail = tree
            .iter()
            .find(|n| n.path == "/user/[userId]/post/[postId]")
            .unwrap();

        assert_eq!(
            post_detail.runtime_path(),
            "/user/${params.userId}/post/${params.postId}"
        );
    }
}
