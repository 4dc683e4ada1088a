/// Relation graph between models
///
/// Captures the to-many edges of a registry and picks the models that
/// should head their own route tree when the caller names no root.

use indexmap::{IndexMap, IndexSet};

use crate::schema::{FieldKind, ModelRegistry};

#[derive(Debug, Clone)]
pub struct RelationNode {
    pub model: String,
    /// Models reachable through this model's to-many fields
    pub children: Vec<String>,
    /// Other models whose to-many fields reach this model
    pub owners: Vec<String>,
}

#[derive(Debug)]
pub struct RelationGraph {
    pub nodes: IndexMap<String, RelationNode>,
}

impl RelationGraph {
    /// Build the to-many graph from a registry
    ///
    /// Dangling targets are skipped here; the route builder reports them.
    pub fn build(registry: &ModelRegistry) -> Self {
        let mut nodes: IndexMap<String, RelationNode> = registry
            .models()
            .map(|model| {
                (
                    model.name.clone(),
                    RelationNode {
                        model: model.name.clone(),
                        children: Vec::new(),
                        owners: Vec::new(),
                    },
                )
            })
            .collect();

        for model in registry.models() {
            for field in model.to_many_fields() {
                let FieldKind::RelationToMany { related_model } = &field.kind else {
                    continue;
                };
                if !nodes.contains_key(related_model) {
                    continue;
                }

                if let Some(node) = nodes.get_mut(&model.name) {
                    if !node.children.contains(related_model) {
                        node.children.push(related_model.clone());
                    }
                }

                // Self relations do not make a model owned
                if related_model != &model.name {
                    if let Some(target) = nodes.get_mut(related_model) {
                        if !target.owners.contains(&model.name) {
                            target.owners.push(model.name.clone());
                        }
                    }
                }
            }
        }

        RelationGraph { nodes }
    }

    /// Models no other model owns through a to-many relation
    pub fn unowned(&self) -> Vec<String> {
        self.nodes
            .values()
            .filter(|node| node.owners.is_empty())
            .map(|node| node.model.clone())
            .collect()
    }

    /// Check if `model` can reach `target` through to-many relations
    pub fn reaches(&self, model: &str, target: &str) -> bool {
        let mut visited = IndexSet::new();
        let mut stack = vec![model.to_string()];

        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            if let Some(node) = self.nodes.get(&current) {
                for child in &node.children {
                    if child == target {
                        return true;
                    }
                    stack.push(child.clone());
                }
            }
        }

        false
    }
}

/// Pick root models for a registry
///
/// 1. Models flagged as group roots
/// 2. Otherwise models no other model owns
/// 3. Otherwise (every model sits on an ownership cycle) all models
///
/// Registry order is kept in every case.
pub fn default_roots(registry: &ModelRegistry) -> Vec<String> {
    let flagged: Vec<String> = registry
        .models()
        .filter(|model| model.is_group_root)
        .map(|model| model.name.clone())
        .collect();
    if !flagged.is_empty() {
        return flagged;
    }

    let unowned = RelationGraph::build(registry).unowned();
    if !unowned.is_empty() {
        return unowned;
    }

    registry.models().map(|model| model.name.clone()).collect()
}
