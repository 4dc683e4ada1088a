/// Template materialization for route trees.
///
/// Stamps a template set over a route tree: every action node becomes one
/// file whose directory mirrors the node's URL path (dynamic segments become
/// bracketed directory names) and whose contents are the operation's
/// template with the node's values substituted. Static templates are stamped
/// once per tree, at the tree's root directory.
///
/// Materialization is a pure function of the tree and the template set and
/// returns files in traversal order; `write_files` is the only step that
/// touches the filesystem.
///
/// ## Placeholders
///
/// | Name | Example |
/// |------|---------|
/// | `model` | `BlogPost` |
/// | `model_camel` | `blogPost` |
/// | `model_title` / `model_plural_title` | `Blog Post` / `Blog Posts` |
/// | `operation` | `update` |
/// | `route_path` / `runtime_path` | `/user/[userId]/edit` / `/user/${params.userId}/edit` |
/// | `collection_path` / `collection_runtime_path` | `/user` |
/// | `detail_path` / `detail_runtime_path` | `/user/[userId]` |
/// | `identifier_fields` / `identifier_slugs` | `id` / `userId` |
/// | `identifier_where` | `id: Number(params.userId)` |
/// | `record_href` | `/user/${record.id}` |
/// | `related_model` / `relation_field` | `User` / `posts` |
/// | `field_list` / `form_inputs` | `title, body` |
/// | `group` / `group_title` | `admin` / `Admin` |

mod substitution;
mod templates;

pub use substitution::{
    render, replace_marked_block, replace_preserving_case, Substitutions, BLOCK_MARKER,
    TEMPLATE_MODEL_TOKEN,
};
pub use templates::{output_file_name, template_file_name, StaticTemplate, TemplateSet};

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::codegen::fs_utils;
use crate::codegen::route_graph::{NodeKind, Operation, RouteNode};
use crate::codegen::route_list::flatten;
use crate::codegen::segments::{is_dynamic, to_runtime_expression};
use crate::codegen::utils::{lower_first, pluralize, to_title_case};
use crate::error::{GenerateError, TemplateError};
use crate::schema::{Field, FieldKind, Model};

/// A file produced by materialization, relative to the output root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Nearest enclosing collection and detail levels of a node
#[derive(Clone, Copy, Default)]
struct Scope<'t, 'a> {
    collection: Option<&'t RouteNode<'a>>,
    detail: Option<&'t RouteNode<'a>>,
}

/// Stamp a single route tree
pub fn materialize(tree: &RouteNode<'_>, templates: &TemplateSet) -> Result<Vec<GeneratedFile>, TemplateError> {
    materialize_all(std::slice::from_ref(tree), templates)
}

/// Stamp several route trees (e.g. one per group) into one file list
///
/// Two routes landing on the same file is an error, whether they come from
/// the same tree or not.
pub fn materialize_all(
    trees: &[RouteNode<'_>],
    templates: &TemplateSet,
) -> Result<Vec<GeneratedFile>, TemplateError> {
    let mut files = Vec::new();

    for tree in trees {
        let group = tree.segment.as_str();
        visit(tree, Scope::default(), group, templates, &mut files);
        files.extend(static_files(tree, templates));
    }

    let mut seen = HashSet::new();
    for file in &files {
        if !seen.insert(file.path.clone()) {
            return Err(TemplateError::DuplicateOutput(file.path.clone()));
        }
    }

    tracing::info!(trees = trees.len(), files = files.len(), "route trees materialized");

    Ok(files)
}

/// Write generated files under `output_dir`, creating directories as needed
///
/// Every generated path must consist of plain names only; `..`, root or
/// prefix components are rejected before anything is written.
pub fn write_files(output_dir: &Path, files: &[GeneratedFile]) -> Result<(), GenerateError> {
    if let Some(file) = files.iter().find(|f| !is_contained(&f.path)) {
        return Err(GenerateError::UnsafeOutputPath(file.path.clone()));
    }

    for file in files {
        let path = output_dir.join(&file.path);
        fs_utils::write_file(&path, &file.contents)
            .map_err(|source| GenerateError::Write { path: path.clone(), source })?;
        tracing::debug!(path = %path.display(), "wrote file");
    }
    Ok(())
}

fn is_contained(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}

fn visit<'t, 'a>(
    node: &'t RouteNode<'a>,
    scope: Scope<'t, 'a>,
    group: &str,
    templates: &TemplateSet,
    files: &mut Vec<GeneratedFile>,
) {
    let scope = match node.kind {
        NodeKind::Collection => Scope {
            collection: Some(node),
            detail: None,
        },
        NodeKind::Detail => Scope {
            detail: Some(node),
            ..scope
        },
        NodeKind::Root | NodeKind::Action(_) => scope,
    };

    if let (NodeKind::Action(operation), Some(model)) = (node.kind, node.model) {
        let substitutions = action_substitutions(node, operation, model, scope, group);
        let rendered = render(templates.operation(operation), &substitutions);
        let contents = replace_preserving_case(&rendered, TEMPLATE_MODEL_TOKEN, &model.name);

        files.push(GeneratedFile {
            path: route_dir(&node.path).join(output_file_name(operation)),
            contents,
        });
    }

    for child in &node.children {
        visit(child, scope, group, templates, files);
    }
}

/// Static files of a tree, with the route list block filled in
fn static_files(tree: &RouteNode<'_>, templates: &TemplateSet) -> Vec<GeneratedFile> {
    let substitutions = group_substitutions(&tree.segment);

    // Only routes reachable without parameters can be linked from a static page
    let links: Vec<String> = flatten(tree)
        .into_iter()
        .filter(|entry| entry.operation == Operation::List && !entry.path.split('/').any(is_dynamic))
        .map(|entry| format!("<Link href={{`{}`}}>{}</Link>", entry.path, entry.description))
        .collect();

    let root = route_dir(&tree.path);
    templates
        .static_files()
        .iter()
        .map(|template| {
            let rendered = render(&template.contents, &substitutions);
            GeneratedFile {
                path: root.join(&template.path),
                contents: replace_marked_block(&rendered, "routeList", &links),
            }
        })
        .collect()
}

/// Directory for a URL path (`/user/[userId]` -> `user/[userId]`)
fn route_dir(route_path: &str) -> PathBuf {
    route_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn group_substitutions(group: &str) -> Substitutions {
    let mut subs = Substitutions::new();
    subs.insert("group".to_string(), group.to_string());
    let title = if group.is_empty() {
        "Home".to_string()
    } else {
        to_title_case(group)
    };
    subs.insert("group_title".to_string(), title);
    subs
}

fn action_substitutions(
    node: &RouteNode<'_>,
    operation: Operation,
    model: &Model,
    scope: Scope<'_, '_>,
    group: &str,
) -> Substitutions {
    let mut subs = group_substitutions(group);
    let mut set = |key: &str, value: String| {
        subs.insert(key.to_string(), value);
    };

    let title = to_title_case(&model.name);
    set("model", model.name.clone());
    set("model_camel", lower_first(&model.name));
    set("model_plural_title", pluralize(&title));
    set("model_title", title);
    set("operation", operation.as_str().to_string());
    set("route_path", node.path.clone());
    set("runtime_path", node.runtime_path());

    let collection_path = scope.collection.map(|c| c.path.clone()).unwrap_or_default();
    let collection_runtime = to_runtime_expression(&collection_path);
    let detail_path = scope.detail.map(|d| d.path.clone()).unwrap_or_default();
    set("detail_runtime_path", to_runtime_expression(&detail_path));
    set("detail_path", detail_path);

    let record_href = if node.identifier_fields.is_empty() {
        collection_runtime.clone()
    } else {
        let keys: Vec<String> = node
            .identifier_fields
            .iter()
            .map(|field| format!("${{record.{}}}", field))
            .collect();
        format!("{}/{}", collection_runtime, keys.join("/"))
    };
    set("record_href", record_href);
    set("collection_runtime_path", collection_runtime);
    set("collection_path", collection_path);

    set("identifier_fields", node.identifier_fields.join(", "));
    set("identifier_slugs", node.identifier_slugs.join(", "));
    set("identifier_where", identifier_where(node, model));

    let (related_model, relation_field) = match &node.relation {
        Some(relation) => (relation.parent_model.clone(), relation.field.clone()),
        None => (String::new(), String::new()),
    };
    set("related_model", related_model);
    set("relation_field", relation_field);

    let data_fields: Vec<&Field> = model.data_fields().collect();
    set(
        "field_list",
        data_fields
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    );
    set("form_inputs", form_inputs(&data_fields));

    subs
}

/// Lookup clause for the node's record (`id: Number(params.postId)`)
fn identifier_where(node: &RouteNode<'_>, model: &Model) -> String {
    node.identifier_fields
        .iter()
        .zip(&node.identifier_slugs)
        .map(|(field, slug)| {
            let numeric = model
                .field(field)
                .and_then(|f| f.scalar_type.as_deref())
                .map(is_numeric_type)
                .unwrap_or(false);
            if numeric {
                format!("{}: Number(params.{})", field, slug)
            } else {
                format!("{}: params.{}", field, slug)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// One labelled input per editable field; generated identifiers are skipped
fn form_inputs(fields: &[&Field]) -> String {
    fields
        .iter()
        .filter(|field| !matches!(field.kind, FieldKind::Identifier))
        .map(|field| {
            let required = if field.is_required { " required" } else { "" };
            format!(
                "      <label>{}<input name=\"{}\" type=\"{}\"{} /></label>",
                to_title_case(&field.name),
                field.name,
                input_type(field.scalar_type.as_deref()),
                required
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_numeric_type(scalar_type: &str) -> bool {
    matches!(scalar_type, "Int" | "BigInt" | "Float" | "Decimal")
}

fn input_type(scalar_type: Option<&str>) -> &'static str {
    match scalar_type {
        Some(t) if is_numeric_type(t) => "number",
        Some("Boolean") => "checkbox",
        Some("DateTime") => "datetime-local",
        _ => "text",
    }
}
