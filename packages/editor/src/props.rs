//! Dotted-path prop patching.
//!
//! `style.color` addresses `props["style"]["color"]`. Every object along
//! the path is copied before it is changed, so the previous tree and any
//! snapshot holding it stay untouched. A `null` value removes the key.

use mailwright_model::{ComponentTree, Props};
use serde_json::{Map, Value};
use tracing::debug;

/// Set `path` on the props of node `id`. Unknown ids and malformed paths
/// are a no-op.
pub fn set_prop(tree: &ComponentTree, id: &str, path: &str, value: Value) -> ComponentTree {
    let Some(segments) = split_path(path) else {
        debug!(node_id = id, path, "Ignoring malformed prop path");
        return tree.clone();
    };
    let Some(node) = tree.find_node(id) else {
        debug!(node_id = id, "Prop target not found");
        return tree.clone();
    };

    let props = patched(&node.props, &segments, value);
    if props == node.props {
        return tree.clone();
    }
    tree.update_node(id, |node| node.props = props)
}

/// Set or clear the node's `className`. Blank strings clear it.
pub fn set_class_name(tree: &ComponentTree, id: &str, class_name: Option<&str>) -> ComponentTree {
    let class_name = class_name
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    tree.update_node(id, |node| node.class_name = class_name)
}

/// Read the value at `path`, if present.
pub fn get_prop<'a>(props: &'a Props, path: &str) -> Option<&'a Value> {
    let segments = split_path(path)?;
    let (first, rest) = segments.split_first()?;
    rest.iter()
        .try_fold(props.get(*first)?, |value, segment| value.get(*segment))
}

fn split_path(path: &str) -> Option<Vec<&str>> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        None
    } else {
        Some(segments)
    }
}

fn patched(map: &Map<String, Value>, segments: &[&str], value: Value) -> Map<String, Value> {
    let mut next = map.clone();
    let Some((key, rest)) = segments.split_first() else {
        return next;
    };

    if rest.is_empty() {
        if value.is_null() {
            next.remove(*key);
        } else {
            next.insert(key.to_string(), value);
        }
        return next;
    }

    // Intermediate segments that are missing or not objects become objects.
    let empty = Map::new();
    let child = map.get(*key).and_then(Value::as_object).unwrap_or(&empty);
    let patched_child = patched(child, rest, value);
    if patched_child.is_empty() && !map.contains_key(*key) {
        return next;
    }
    next.insert(key.to_string(), Value::Object(patched_child));
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailwright_model::ComponentNode;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tree() -> ComponentTree {
        ComponentTree::from_nodes(vec![ComponentNode::new("s", "Section").with_children(vec![
            ComponentNode::new("t", "Text")
                .with_prop("children", "Hi")
                .with_prop("style", json!({ "color": "#000000", "fontSize": "16px" })),
        ])])
    }

    #[test]
    fn test_set_nested_prop() {
        let original = tree();
        let next = set_prop(&original, "t", "style.color", json!("#ff0000"));

        let node = next.find_node("t").unwrap();
        assert_eq!(node.props["style"], json!({ "color": "#ff0000", "fontSize": "16px" }));

        // previous snapshot untouched
        assert_eq!(original.find_node("t").unwrap().props["style"]["color"], json!("#000000"));
    }

    #[test]
    fn test_set_top_level_prop() {
        let next = set_prop(&tree(), "t", "children", json!("Bye"));
        assert_eq!(next.find_node("t").unwrap().prop_str("children"), Some("Bye"));
    }

    #[test]
    fn test_null_removes_key() {
        let next = set_prop(&tree(), "t", "style.fontSize", Value::Null);
        assert_eq!(next.find_node("t").unwrap().props["style"], json!({ "color": "#000000" }));
    }

    #[test]
    fn test_creates_missing_objects() {
        let next = set_prop(&tree(), "s", "style.padding", json!("8px"));
        assert_eq!(next.find_node("s").unwrap().props["style"], json!({ "padding": "8px" }));
    }

    #[test]
    fn test_removing_missing_path_adds_nothing() {
        let original = tree();
        assert_eq!(set_prop(&original, "s", "style.padding", Value::Null), original);
    }

    #[test]
    fn test_unknown_id_or_bad_path_is_noop() {
        let original = tree();
        assert_eq!(set_prop(&original, "missing", "style.color", json!("red")), original);
        assert_eq!(set_prop(&original, "t", "style..color", json!("red")), original);
        assert_eq!(set_prop(&original, "t", "", json!("red")), original);
    }

    #[test]
    fn test_get_prop() {
        let tree = tree();
        let props = &tree.find_node("t").unwrap().props;
        assert_eq!(get_prop(props, "style.fontSize"), Some(&json!("16px")));
        assert_eq!(get_prop(props, "style.missing"), None);
        assert_eq!(get_prop(props, "children"), Some(&json!("Hi")));
    }

    #[test]
    fn test_class_name() {
        let next = set_class_name(&tree(), "t", Some("  text-center "));
        assert_eq!(next.find_node("t").unwrap().class_name.as_deref(), Some("text-center"));

        let cleared = set_class_name(&next, "t", Some("   "));
        assert_eq!(cleared.find_node("t").unwrap().class_name, None);
    }
}
