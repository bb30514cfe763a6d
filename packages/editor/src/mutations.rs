//! # Tree Mutations
//!
//! Every change an editor UI can make to the tree, as data.
//!
//! ## Semantics
//!
//! - **Copy-on-write**: [`Mutation::apply`] never touches its input tree
//! - **No-op instead of error**: unknown ids, non-layout targets, id
//!   clashes and out-of-range values leave the tree unchanged, reported as
//!   `None`
//! - **Ids stay unique**: inserted subtrees must not reuse an id already
//!   in the tree; duplicated and synthesized nodes draw fresh ids

use crate::columns::{set_column_count, set_column_gap};
use crate::config::EditorConfig;
use crate::props::{set_class_name, set_prop};
use mailwright_model::{clone_with_fresh_ids, validate, ComponentNode, ComponentTree, IdSource};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Semantic mutations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Insert a node at a root index, or append
    InsertAtRoot {
        node: ComponentNode,
        #[serde(default)]
        index: Option<usize>,
    },

    /// Append a node to a layout node's children
    InsertIntoContainer { container_id: String, node: ComponentNode },

    /// Remove a node and its subtree
    Delete { node_id: String },

    /// Move a node among its current siblings
    Move { node_id: String, index: usize },

    /// Set a dotted prop path; `null` removes it
    SetProp {
        node_id: String,
        path: String,
        value: Value,
    },

    /// Set or clear the utility class string
    SetClassName {
        node_id: String,
        class_name: Option<String>,
    },

    /// Copy a subtree with fresh ids right after the original
    Duplicate { node_id: String },

    /// Resize a row's columns
    SetColumnCount { row_id: String, count: usize },

    /// Change a row's column gap
    SetColumnGap { row_id: String, gap: f64 },
}

impl Mutation {
    /// Apply to `tree`. Returns the new tree, or `None` when nothing changed.
    pub fn apply<S: IdSource>(
        &self,
        tree: &ComponentTree,
        ids: &mut S,
        config: &EditorConfig,
    ) -> Option<ComponentTree> {
        let next = match self {
            Mutation::InsertAtRoot { node, index } => {
                if !can_insert(tree, node) {
                    return None;
                }
                tree.insert_at_root(node.clone(), *index)
            }

            Mutation::InsertIntoContainer { container_id, node } => {
                if !can_insert(tree, node) {
                    return None;
                }
                tree.insert_into_container(container_id, node.clone())
            }

            Mutation::Delete { node_id } => tree.delete_by_id(node_id),

            Mutation::Move { node_id, index } => tree.move_within_siblings(node_id, *index),

            Mutation::SetProp {
                node_id,
                path,
                value,
            } => set_prop(tree, node_id, path, value.clone()),

            Mutation::SetClassName {
                node_id,
                class_name,
            } => set_class_name(tree, node_id, class_name.as_deref()),

            Mutation::Duplicate { node_id } => duplicate(tree, node_id, ids),

            Mutation::SetColumnCount { row_id, count } => set_column_count(
                tree,
                row_id,
                *count,
                config.max_columns,
                config.default_column_gap,
                ids,
            ),

            Mutation::SetColumnGap { row_id, gap } => set_column_gap(tree, row_id, *gap),
        };

        if next == *tree {
            debug!(mutation = self.name(), "Mutation changed nothing");
            None
        } else {
            Some(next)
        }
    }

    /// Short label, used for undo history.
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertAtRoot { .. } | Mutation::InsertIntoContainer { .. } => "Insert",
            Mutation::Delete { .. } => "Delete",
            Mutation::Move { .. } => "Move",
            Mutation::SetProp { .. } => "Edit property",
            Mutation::SetClassName { .. } => "Edit classes",
            Mutation::Duplicate { .. } => "Duplicate",
            Mutation::SetColumnCount { .. } => "Change columns",
            Mutation::SetColumnGap { .. } => "Change column gap",
        }
    }
}

/// Whether `node` is a well-formed subtree whose ids are all new to `tree`.
fn can_insert(tree: &ComponentTree, node: &ComponentNode) -> bool {
    let subtree = ComponentTree::from_nodes(vec![node.clone()]);
    if let Err(err) = validate(&subtree) {
        debug!(node_id = %node.id, error = %err, "Refusing malformed insert");
        return false;
    }

    let existing: HashSet<String> = tree.flatten_ids().into_iter().collect();
    match subtree.flatten_ids().into_iter().find(|id| existing.contains(id)) {
        Some(clash) => {
            debug!(node_id = %clash, "Refusing insert with an id already in the tree");
            false
        }
        None => true,
    }
}

/// Deep copy of `id` with fresh ids, inserted right after the original.
pub fn duplicate<S: IdSource>(tree: &ComponentTree, id: &str, ids: &mut S) -> ComponentTree {
    let Some(original) = tree.find_node(id) else {
        debug!(node_id = id, "Duplicate target not found");
        return tree.clone();
    };
    let position = tree
        .find_siblings_of(id)
        .and_then(|siblings| siblings.iter().position(|n| n.id == id))
        .unwrap_or_default();
    let copy = clone_with_fresh_ids(original, ids);

    match tree.parent_of(id) {
        None => tree.insert_at_root(copy, Some(position + 1)),
        Some(parent) => {
            let parent_id = parent.id.clone();
            tree.update_node(&parent_id, |parent| {
                if let Some(children) = parent.children_mut() {
                    children.insert(position + 1, copy);
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailwright_model::IdGenerator;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> ComponentTree {
        ComponentTree::from_nodes(vec![
            ComponentNode::new("s", "Section").with_children(vec![
                ComponentNode::new("t1", "Text"),
                ComponentNode::new("t2", "Text"),
            ]),
            ComponentNode::new("h", "Heading"),
        ])
    }

    fn apply(mutation: Mutation) -> Option<ComponentTree> {
        let mut ids = IdGenerator::from_seed("m");
        mutation.apply(&sample(), &mut ids, &EditorConfig::default())
    }

    #[test]
    fn test_insert_at_root() {
        let tree = apply(Mutation::InsertAtRoot {
            node: ComponentNode::new("b", "Button"),
            index: Some(0),
        })
        .unwrap();
        assert_eq!(tree.nodes[0].id, "b");
    }

    #[test]
    fn test_insert_refuses_duplicate_ids() {
        assert!(apply(Mutation::InsertAtRoot {
            node: ComponentNode::new("t1", "Text"),
            index: None,
        })
        .is_none());

        assert!(apply(Mutation::InsertIntoContainer {
            container_id: "s".into(),
            node: ComponentNode::new("x", "Section")
                .with_children(vec![ComponentNode::new("h", "Heading")]),
        })
        .is_none());
    }

    #[test]
    fn test_insert_refuses_children_on_leaf() {
        assert!(apply(Mutation::InsertAtRoot {
            node: ComponentNode::new("x", "Text").with_children(vec![ComponentNode::new("y", "Text")]),
            index: None,
        })
        .is_none());
    }

    #[test]
    fn test_insert_into_leaf_is_noop() {
        assert!(apply(Mutation::InsertIntoContainer {
            container_id: "h".into(),
            node: ComponentNode::new("x", "Text"),
        })
        .is_none());
    }

    #[test]
    fn test_delete_and_missing_delete() {
        let tree = apply(Mutation::Delete { node_id: "s".into() }).unwrap();
        assert_eq!(tree.flatten_ids(), vec!["h"]);
        assert!(apply(Mutation::Delete { node_id: "nope".into() }).is_none());
    }

    #[test]
    fn test_move_to_same_index_is_noop() {
        assert!(apply(Mutation::Move { node_id: "t1".into(), index: 0 }).is_none());
        let tree = apply(Mutation::Move { node_id: "t1".into(), index: 1 }).unwrap();
        assert_eq!(tree.flatten_ids(), vec!["s", "t2", "t1", "h"]);
    }

    #[test]
    fn test_set_prop() {
        let tree = apply(Mutation::SetProp {
            node_id: "h".into(),
            path: "style.color".into(),
            value: json!("#ff0000"),
        })
        .unwrap();
        assert_eq!(tree.find_node("h").unwrap().props["style"]["color"], "#ff0000");
    }

    #[test]
    fn test_duplicate_inserts_after_original() {
        let tree = apply(Mutation::Duplicate { node_id: "t1".into() }).unwrap();
        assert_eq!(tree.flatten_ids(), vec!["s", "t1", "m-1", "t2", "h"]);

        let tree = apply(Mutation::Duplicate { node_id: "s".into() }).unwrap();
        assert_eq!(tree.flatten_ids(), vec!["s", "t1", "t2", "m-1", "m-2", "m-3", "h"]);

        assert!(apply(Mutation::Duplicate { node_id: "nope".into() }).is_none());
    }

    #[test]
    fn test_wire_format() {
        let mutation: Mutation = serde_json::from_str(
            r#"{ "kind": "setProp", "nodeId": "h", "path": "style.color", "value": null }"#,
        )
        .unwrap();
        assert_eq!(
            mutation,
            Mutation::SetProp {
                node_id: "h".into(),
                path: "style.color".into(),
                value: Value::Null,
            }
        );

        let mutation: Mutation =
            serde_json::from_str(r#"{ "kind": "setColumnCount", "rowId": "r", "count": 3 }"#).unwrap();
        assert_eq!(mutation.name(), "Change columns");
    }
}
