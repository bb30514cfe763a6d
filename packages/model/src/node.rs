use crate::registry::is_layout_kind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form property bag attached to every node.
///
/// The schema depends on the node's type and is only checked at render time,
/// where absent keys fall back to per-type defaults.
pub type Props = Map<String, Value>;

/// A single node of the component tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    pub id: String,

    /// Registry key. Unknown keys are kept verbatim so they can be surfaced
    /// as placeholders instead of being dropped.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub props: Props,

    #[serde(
        rename = "className",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub class_name: Option<String>,

    /// `None` means children were never created, `Some(vec![])` means the
    /// node explicitly has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ComponentNode>>,
}

impl ComponentNode {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            props: Props::new(),
            class_name: None,
            children: None,
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_children(mut self, children: Vec<ComponentNode>) -> Self {
        self.children = Some(children);
        self
    }

    /// Whether this node's type may own children.
    pub fn is_layout(&self) -> bool {
        is_layout_kind(&self.kind)
    }

    pub fn children(&self) -> &[ComponentNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<ComponentNode>> {
        self.children.as_mut()
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// String prop, treating an empty string as absent.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Numeric prop. Accepts JSON numbers and numeric strings with an
    /// optional `px` suffix, the two shapes the property panel writes.
    pub fn prop_f64(&self, key: &str) -> Option<f64> {
        match self.props.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().trim_end_matches("px").trim().parse().ok(),
            _ => None,
        }
    }

    /// Array-of-records prop used by composite components (`stats`, `items`, ...).
    pub fn prop_list(&self, key: &str) -> &[Value] {
        self.props
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Inline style map (`props.style`), if any.
    pub fn style(&self) -> Option<&Map<String, Value>> {
        self.props.get("style").and_then(Value::as_object)
    }
}

/// Root list of a document. Serializes as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentTree {
    pub nodes: Vec<ComponentNode>,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn from_nodes(nodes: Vec<ComponentNode>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComponentNode> {
        self.nodes.iter()
    }
}

impl From<Vec<ComponentNode>> for ComponentTree {
    fn from(nodes: Vec<ComponentNode>) -> Self {
        Self::from_nodes(nodes)
    }
}

impl<'a> IntoIterator for &'a ComponentTree {
    type Item = &'a ComponentNode;
    type IntoIter = std::slice::Iter<'a, ComponentNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
