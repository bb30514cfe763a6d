use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// camelCase style declarations, ordered for deterministic output.
pub type StyleMap = BTreeMap<String, String>;

/// Element attributes. Values keep their JSON type so the JSX target can
/// print numbers and booleans as expressions.
pub type AttributeMap = BTreeMap<String, Value>;

/// The email primitives every component expands into.
///
/// These mirror the React-Email component set one to one; the HTML target
/// maps each onto its table-based, email-client-safe markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EmailTag {
    Html,
    Head,
    Body,
    Preview,
    Container,
    Section,
    Row,
    Column,
    Heading,
    Text,
    Button,
    Link,
    Img,
    Hr,
    CodeBlock,
    CodeInline,
    Markdown,
}

impl EmailTag {
    /// React-Email component name.
    pub fn component_name(self) -> &'static str {
        match self {
            EmailTag::Html => "Html",
            EmailTag::Head => "Head",
            EmailTag::Body => "Body",
            EmailTag::Preview => "Preview",
            EmailTag::Container => "Container",
            EmailTag::Section => "Section",
            EmailTag::Row => "Row",
            EmailTag::Column => "Column",
            EmailTag::Heading => "Heading",
            EmailTag::Text => "Text",
            EmailTag::Button => "Button",
            EmailTag::Link => "Link",
            EmailTag::Img => "Img",
            EmailTag::Hr => "Hr",
            EmailTag::CodeBlock => "CodeBlock",
            EmailTag::CodeInline => "CodeInline",
            EmailTag::Markdown => "Markdown",
        }
    }

    /// Tags rendered without children.
    pub fn is_void(self) -> bool {
        matches!(self, EmailTag::Img | EmailTag::Hr | EmailTag::CodeBlock)
    }
}

/// Virtual email node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    Element {
        tag: EmailTag,
        attributes: AttributeMap,
        styles: StyleMap,
        /// Type defaults. Targets apply these only where neither `styles`
        /// nor the utility classes in `class_name` set the property.
        #[serde(default, skip_serializing_if = "StyleMap::is_empty")]
        default_styles: StyleMap,
        #[serde(skip_serializing_if = "Option::is_none")]
        class_name: Option<String>,
        children: Vec<VNode>,
        /// Id of the tree node this element was expanded from. Synthetic
        /// children of composite components share their parent's id.
        #[serde(skip_serializing_if = "Option::is_none")]
        source_id: Option<String>,
    },

    /// Text node
    Text { content: String },

    /// Visible stand-in for a node whose type is not registered.
    Placeholder {
        kind: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        source_id: Option<String>,
    },
}

impl VNode {
    pub fn element(tag: EmailTag) -> Self {
        VNode::Element {
            tag,
            attributes: AttributeMap::new(),
            styles: StyleMap::new(),
            default_styles: StyleMap::new(),
            class_name: None,
            children: Vec::new(),
            source_id: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn placeholder(kind: impl Into<String>, source_id: Option<String>) -> Self {
        VNode::Placeholder {
            kind: kind.into(),
            source_id,
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_styles(mut self, new_styles: StyleMap) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.extend(new_styles);
        }
        self
    }

    pub fn with_default_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut default_styles,
            ..
        } = self
        {
            default_styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_default_styles(mut self, styles: StyleMap) -> Self {
        if let VNode::Element {
            ref mut default_styles,
            ..
        } = self
        {
            default_styles.extend(styles);
        }
        self
    }

    pub fn with_class_name(mut self, class: Option<String>) -> Self {
        if let VNode::Element {
            ref mut class_name, ..
        } = self
        {
            *class_name = class.filter(|c| !c.trim().is_empty());
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn with_source(mut self, id: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut source_id, ..
        } = self
        {
            *source_id = Some(id.into());
        }
        self
    }

    pub fn tag(&self) -> Option<EmailTag> {
        match self {
            VNode::Element { tag, .. } => Some(*tag),
            _ => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children.as_slice(),
            _ => &[],
        }
    }

    pub fn styles(&self) -> Option<&StyleMap> {
        match self {
            VNode::Element { styles, .. } => Some(styles),
            _ => None,
        }
    }

    pub fn default_styles(&self) -> Option<&StyleMap> {
        match self {
            VNode::Element { default_styles, .. } => Some(default_styles),
            _ => None,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(key),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text { content } => content.clone(),
            VNode::Element { children, .. } => children.iter().map(VNode::text_content).collect(),
            VNode::Placeholder { kind, .. } => format!("Unknown component: {}", kind),
        }
    }

    /// Pre-order search for every element with `tag`.
    pub fn find_all(&self, tag: EmailTag) -> Vec<&VNode> {
        let mut found = Vec::new();
        self.collect(tag, &mut found);
        found
    }

    fn collect<'a>(&'a self, tag: EmailTag, found: &mut Vec<&'a VNode>) {
        if self.tag() == Some(tag) {
            found.push(self);
        }
        for child in self.children() {
            child.collect(tag, found);
        }
    }

    /// Whether any element in this subtree lists `class` among its classes.
    pub fn has_class(&self, class: &str) -> bool {
        match self {
            VNode::Element {
                class_name,
                children,
                ..
            } => {
                class_name
                    .as_deref()
                    .is_some_and(|c| c.split_whitespace().any(|t| t == class))
                    || children.iter().any(|c| c.has_class(class))
            }
            _ => false,
        }
    }

    /// Whether any element in this subtree carries a class name.
    pub fn uses_class_names(&self) -> bool {
        match self {
            VNode::Element {
                class_name,
                children,
                ..
            } => class_name.is_some() || children.iter().any(VNode::uses_class_names),
            _ => false,
        }
    }
}

/// Fully evaluated email: the `Html` root with global styles applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualEmailDocument {
    pub root: VNode,
}

impl VirtualEmailDocument {
    /// Root-level content nodes inside the body container.
    pub fn body(&self) -> Option<&VNode> {
        self.root
            .children()
            .iter()
            .find(|n| n.tag() == Some(EmailTag::Body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let node = VNode::element(EmailTag::Link)
            .with_attr("href", "https://example.com")
            .with_style("color", "#2563eb")
            .with_child(VNode::text("Go"));

        assert_eq!(node.tag(), Some(EmailTag::Link));
        assert_eq!(node.attr("href").and_then(Value::as_str), Some("https://example.com"));
        assert_eq!(node.styles().unwrap()["color"], "#2563eb");
        assert_eq!(node.text_content(), "Go");
    }

    #[test]
    fn test_blank_class_name_is_dropped() {
        let node = VNode::element(EmailTag::Text).with_class_name(Some("  ".to_string()));
        assert!(!node.uses_class_names());
    }

    #[test]
    fn test_has_class_searches_descendants() {
        let tree = VNode::element(EmailTag::Row).with_child(
            VNode::element(EmailTag::Column).with_class_name(Some("p-2 mw-stack".to_string())),
        );
        assert!(tree.has_class("mw-stack"));
        assert!(!tree.has_class("mw"));
    }

    #[test]
    fn test_find_all_is_preorder() {
        let tree = VNode::element(EmailTag::Row)
            .with_child(VNode::element(EmailTag::Column).with_child(VNode::element(EmailTag::Column)))
            .with_child(VNode::element(EmailTag::Column));
        assert_eq!(tree.find_all(EmailTag::Column).len(), 3);
    }
}
