//! Flat route listing.
//!
//! Turns a route tree into one entry per CRUD route, in traversal order.
//! Used by the `routes` command and by the route-list block of static
//! templates.

use serde::Serialize;

use crate::codegen::route_graph::{Operation, RouteNode};
use crate::codegen::utils::{pluralize, to_title_case};

/// A single generated route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub path: String,
    pub runtime_path: String,
    pub operation: Operation,
    pub model: String,
    pub description: String,
}

/// Collect every action node of a tree
pub fn flatten(tree: &RouteNode<'_>) -> Vec<RouteEntry> {
    tree.actions()
        .filter_map(|node| {
            let operation = node.operation()?;
            let model = node.model_name()?.to_string();
            Some(RouteEntry {
                path: node.path.clone(),
                runtime_path: node.runtime_path(),
                operation,
                description: describe(node, operation, &model),
                model,
            })
        })
        .collect()
}

/// Human description of a route ("List all Blog Posts of a User")
fn describe(node: &RouteNode<'_>, operation: Operation, model: &str) -> String {
    let title = to_title_case(model);
    let base = match operation {
        Operation::List => format!("List all {}", pluralize(&title)),
        Operation::Create => format!("Create a {}", title),
        Operation::Read => format!("Show a {}", title),
        Operation::Update => format!("Edit a {}", title),
        Operation::Delete => format!("Delete a {}", title),
    };

    match &node.relation {
        Some(relation) => format!("{} of a {}", base, to_title_case(&relation.parent_model)),
        None => base,
    }
}

/// Render entries as an aligned text table
pub fn render_route_table(entries: &[RouteEntry]) -> String {
    let path_width = entries.iter().map(|e| e.path.len()).max().unwrap_or(0).max(5);
    let op_width = entries
        .iter()
        .map(|e| e.operation.as_str().len())
        .max()
        .unwrap_or(0)
        .max(9);

    let mut out = String::new();
    out.push_str(&format!(
        "{:<path_width$}  {:<op_width$}  {}\n",
        "Route", "Operation", "Description"
    ));
    out.push_str(&format!(
        "{}  {}  {}\n",
        "-".repeat(path_width),
        "-".repeat(op_width),
        "-".repeat(11)
    ));

    for entry in entries {
        out.push_str(&format!(
            "{:<path_width$}  {:<op_width$}  {}\n",
            entry.path,
            entry.operation.as_str(),
            entry.description
        ));
    }

    out
}
