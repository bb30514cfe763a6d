//! # Tree Serialization
//!
//! JSON is the only persisted form of a component tree: a bare array of
//! nodes, each `{id, type, props, className?, children?}`.
//!
//! Loading is strict. A tree that would break the model's invariants is
//! refused with the first problem found, instead of being coerced into
//! something installable.

use crate::error::{ModelError, ModelResult};
use crate::node::{ComponentNode, ComponentTree};
use crate::registry::ComponentKind;
use std::collections::HashSet;
use tracing::debug;

/// Serialize a tree to compact JSON.
pub fn serialize(tree: &ComponentTree) -> ModelResult<String> {
    Ok(serde_json::to_string(tree)?)
}

/// Serialize a tree to indented JSON.
pub fn serialize_pretty(tree: &ComponentTree) -> ModelResult<String> {
    Ok(serde_json::to_string_pretty(tree)?)
}

/// Parse and validate a serialized tree.
pub fn parse(json: &str) -> ModelResult<ComponentTree> {
    let tree: ComponentTree = serde_json::from_str(json)?;
    validate(&tree)?;
    debug!(roots = tree.nodes.len(), "Parsed component tree");
    Ok(tree)
}

/// Check the structural invariants of an in-memory tree.
///
/// Unknown types pass: they are rendered as placeholders later on.
pub fn validate(tree: &ComponentTree) -> ModelResult<()> {
    let mut seen = HashSet::new();
    for (index, node) in tree.nodes.iter().enumerate() {
        validate_node(node, &format!("[{}]", index), &mut seen)?;
    }
    Ok(())
}

fn validate_node<'a>(
    node: &'a ComponentNode,
    path: &str,
    seen: &mut HashSet<&'a str>,
) -> ModelResult<()> {
    if node.id.trim().is_empty() {
        return Err(ModelError::EmptyId {
            path: path.to_string(),
        });
    }

    if node.kind.trim().is_empty() {
        return Err(ModelError::EmptyType {
            id: node.id.clone(),
        });
    }

    if !seen.insert(node.id.as_str()) {
        return Err(ModelError::DuplicateId {
            id: node.id.clone(),
        });
    }

    if let Some(children) = &node.children {
        // Unknown kinds get the benefit of the doubt only when childless.
        let is_layout = ComponentKind::from_key(&node.kind).is_some_and(ComponentKind::is_layout);
        if !is_layout && !children.is_empty() {
            return Err(ModelError::ChildrenOnLeaf {
                id: node.id.clone(),
                kind: node.kind.clone(),
            });
        }

        for (index, child) in children.iter().enumerate() {
            validate_node(child, &format!("{}.children[{}]", path, index), seen)?;
        }
    }

    Ok(())
}

impl ComponentTree {
    pub fn from_json(json: &str) -> ModelResult<Self> {
        parse(json)
    }

    pub fn to_json(&self) -> ModelResult<String> {
        serialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip() {
        let json = r#"[
            {"id":"a","type":"Section","props":{"style":{"padding":"8px"}},"className":"bg-[#ffffff]","children":[
                {"id":"b","type":"Text","props":{"children":"Hi"}}
            ]},
            {"id":"c","type":"Row","props":{"columnCount":2},"children":[]}
        ]"#;

        let tree = parse(json).unwrap();
        let again = parse(&serialize(&tree).unwrap()).unwrap();
        assert_eq!(tree, again);
        assert_eq!(again.nodes[1].children, Some(vec![]));
        assert_eq!(again.nodes[0].children()[0].children, None);
    }

    #[test]
    fn test_missing_type_is_refused() {
        let err = parse(r#"[{"id":"a","props":{}}]"#).unwrap_err();
        assert!(matches!(err, ModelError::Json(_)));
        assert!(err.to_string().contains("type"));
    }

    #[test]
    fn test_props_default_to_empty() {
        let tree = parse(r#"[{"id":"a","type":"Text"}]"#).unwrap();
        assert!(tree.nodes[0].props.is_empty());
    }

    #[test]
    fn test_duplicate_ids_are_refused() {
        let err = parse(
            r#"[{"id":"a","type":"Section","children":[{"id":"a","type":"Text"}]}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateId { ref id } if id == "a"));
    }

    #[test]
    fn test_children_on_leaf_are_refused() {
        let err = parse(
            r#"[{"id":"a","type":"Text","children":[{"id":"b","type":"Text"}]}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::ChildrenOnLeaf { .. }));
    }

    #[test]
    fn test_unknown_type_is_accepted() {
        let tree = parse(r#"[{"id":"x","type":"TotallyUnknown","props":{}}]"#).unwrap();
        assert_eq!(tree.nodes[0].kind, "TotallyUnknown");
    }

    #[test]
    fn test_empty_id_reports_path() {
        let err = parse(r#"[{"id":"a","type":"Section","children":[{"id":"","type":"Text"}]}]"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "Node at [0].children[0] has an empty id");
    }
}
