//! # Component Registry
//!
//! Static catalog of every component type the builder knows about. Each
//! entry carries display metadata, the default props a freshly dropped
//! component starts with, and the child template layout components are
//! created with.
//!
//! The set is closed: there is no runtime registration. Lookups of unknown
//! keys return `None` and every consumer degrades gracefully.

use crate::node::{ComponentNode, Props};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Closed set of component types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    Container,
    Section,
    Row,
    Column,
    Heading,
    Text,
    Button,
    Link,
    Image,
    Divider,
    Footer,
    SocialLinks,
    SocialIcons,
    CodeBlock,
    CodeInline,
    Markdown,
    Stats,
    NumberedList,
    Gallery,
    Marketing,
    Testimonial,
    Preview,
}

/// Palette grouping shown in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Layout,
    Content,
    Media,
    Social,
    Code,
    Blocks,
    Meta,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 22] = [
        ComponentKind::Container,
        ComponentKind::Section,
        ComponentKind::Row,
        ComponentKind::Column,
        ComponentKind::Heading,
        ComponentKind::Text,
        ComponentKind::Button,
        ComponentKind::Link,
        ComponentKind::Image,
        ComponentKind::Divider,
        ComponentKind::Footer,
        ComponentKind::SocialLinks,
        ComponentKind::SocialIcons,
        ComponentKind::CodeBlock,
        ComponentKind::CodeInline,
        ComponentKind::Markdown,
        ComponentKind::Stats,
        ComponentKind::NumberedList,
        ComponentKind::Gallery,
        ComponentKind::Marketing,
        ComponentKind::Testimonial,
        ComponentKind::Preview,
    ];

    /// Resolve a serialized `type` key. `Hr` is accepted as an alias of `Divider`.
    pub fn from_key(key: &str) -> Option<Self> {
        let kind = match key {
            "Container" => ComponentKind::Container,
            "Section" => ComponentKind::Section,
            "Row" => ComponentKind::Row,
            "Column" => ComponentKind::Column,
            "Heading" => ComponentKind::Heading,
            "Text" => ComponentKind::Text,
            "Button" => ComponentKind::Button,
            "Link" => ComponentKind::Link,
            "Image" => ComponentKind::Image,
            "Divider" | "Hr" => ComponentKind::Divider,
            "Footer" => ComponentKind::Footer,
            "SocialLinks" => ComponentKind::SocialLinks,
            "SocialIcons" => ComponentKind::SocialIcons,
            "CodeBlock" => ComponentKind::CodeBlock,
            "CodeInline" => ComponentKind::CodeInline,
            "Markdown" => ComponentKind::Markdown,
            "Stats" => ComponentKind::Stats,
            "NumberedList" => ComponentKind::NumberedList,
            "Gallery" => ComponentKind::Gallery,
            "Marketing" => ComponentKind::Marketing,
            "Testimonial" => ComponentKind::Testimonial,
            "Preview" => ComponentKind::Preview,
            _ => return None,
        };
        Some(kind)
    }

    pub fn key(self) -> &'static str {
        match self {
            ComponentKind::Container => "Container",
            ComponentKind::Section => "Section",
            ComponentKind::Row => "Row",
            ComponentKind::Column => "Column",
            ComponentKind::Heading => "Heading",
            ComponentKind::Text => "Text",
            ComponentKind::Button => "Button",
            ComponentKind::Link => "Link",
            ComponentKind::Image => "Image",
            ComponentKind::Divider => "Divider",
            ComponentKind::Footer => "Footer",
            ComponentKind::SocialLinks => "SocialLinks",
            ComponentKind::SocialIcons => "SocialIcons",
            ComponentKind::CodeBlock => "CodeBlock",
            ComponentKind::CodeInline => "CodeInline",
            ComponentKind::Markdown => "Markdown",
            ComponentKind::Stats => "Stats",
            ComponentKind::NumberedList => "NumberedList",
            ComponentKind::Gallery => "Gallery",
            ComponentKind::Marketing => "Marketing",
            ComponentKind::Testimonial => "Testimonial",
            ComponentKind::Preview => "Preview",
        }
    }

    /// Layout types are the only ones allowed to own children.
    pub fn is_layout(self) -> bool {
        matches!(
            self,
            ComponentKind::Container
                | ComponentKind::Section
                | ComponentKind::Row
                | ComponentKind::Column
                | ComponentKind::Footer
                | ComponentKind::SocialLinks
        )
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Whether a raw `type` key names a layout type. Unknown keys are never layout.
pub fn is_layout_kind(key: &str) -> bool {
    ComponentKind::from_key(key).is_some_and(ComponentKind::is_layout)
}

/// Registry entry for one component type.
#[derive(Debug, Clone)]
pub struct ComponentDefinition {
    pub kind: ComponentKind,
    pub display_name: &'static str,
    pub category: Category,
    pub default_props: Props,
    /// Child template with blank ids. Ids are assigned when instantiated.
    pub default_children: Option<Vec<ComponentNode>>,
}

impl ComponentDefinition {
    /// Build a node from this definition. Ids are left blank; callers run the
    /// result through an id generator before inserting it into a tree.
    pub fn template(&self) -> ComponentNode {
        ComponentNode {
            id: String::new(),
            kind: self.kind.key().to_string(),
            props: self.default_props.clone(),
            class_name: None,
            children: self.default_children.clone(),
        }
    }
}

fn props(value: Value) -> Props {
    match value {
        Value::Object(map) => map,
        _ => Props::new(),
    }
}

fn blank(kind: ComponentKind, value: Value) -> ComponentNode {
    ComponentNode::new("", kind.key()).with_props(props(value))
}

/// Half-gap padding for column `index` of `count`, outer edges flush.
pub fn column_padding(index: usize, count: usize, gap: f64) -> (f64, f64) {
    let half = gap / 2.0;
    let left = if index == 0 { 0.0 } else { half };
    let right = if index + 1 >= count { 0.0 } else { half };
    (left, right)
}

/// Format a pixel length the way the property panel writes it.
pub fn px(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}px", value as i64)
    } else {
        format!("{}px", value)
    }
}

/// Width fraction for one of `count` equal columns, e.g. `"50%"`.
pub fn column_width(count: usize) -> String {
    let count = count.max(1) as f64;
    let width = 100.0 / count;
    if width.fract() == 0.0 {
        format!("{}%", width as i64)
    } else {
        format!("{:.4}%", width)
    }
}

/// A Column node laid out as column `index` of `count`.
pub fn column_template(index: usize, count: usize, gap: f64) -> ComponentNode {
    let (left, right) = column_padding(index, count, gap);
    blank(
        ComponentKind::Column,
        json!({
            "style": {
                "width": column_width(count),
                "paddingLeft": px(left),
                "paddingRight": px(right),
                "verticalAlign": "top"
            }
        }),
    )
    .with_children(vec![blank(
        ComponentKind::Text,
        json!({ "children": format!("Column {}", index + 1) }),
    )])
}

pub const DEFAULT_COLUMN_COUNT: usize = 2;
pub const DEFAULT_COLUMN_GAP: f64 = 16.0;

/// Look up a component type by its serialized key.
pub fn lookup(key: &str) -> Option<ComponentDefinition> {
    ComponentKind::from_key(key).map(definition)
}

/// Every registered definition in palette order.
pub fn all() -> Vec<ComponentDefinition> {
    ComponentKind::ALL.iter().copied().map(definition).collect()
}

/// Registry entry for a known kind.
pub fn definition(kind: ComponentKind) -> ComponentDefinition {
    let (display_name, category, default_props, default_children) = match kind {
        ComponentKind::Container => (
            "Container",
            Category::Layout,
            json!({ "style": { "maxWidth": "600px", "margin": "0 auto" } }),
            Some(vec![]),
        ),
        ComponentKind::Section => (
            "Section",
            Category::Layout,
            json!({ "style": { "padding": "16px 0" } }),
            Some(vec![]),
        ),
        ComponentKind::Row => (
            "Columns",
            Category::Layout,
            json!({ "columnCount": DEFAULT_COLUMN_COUNT, "columnGap": DEFAULT_COLUMN_GAP }),
            Some(
                (0..DEFAULT_COLUMN_COUNT)
                    .map(|i| column_template(i, DEFAULT_COLUMN_COUNT, DEFAULT_COLUMN_GAP))
                    .collect(),
            ),
        ),
        ComponentKind::Column => (
            "Column",
            Category::Layout,
            json!({ "style": { "verticalAlign": "top" } }),
            Some(vec![]),
        ),
        ComponentKind::Heading => (
            "Heading",
            Category::Content,
            json!({ "as": "h2", "children": "Your heading here" }),
            None,
        ),
        ComponentKind::Text => (
            "Text",
            Category::Content,
            json!({ "children": "Write something memorable." }),
            None,
        ),
        ComponentKind::Button => (
            "Button",
            Category::Content,
            json!({
                "href": "https://example.com",
                "children": "Click me",
                "style": {
                    "backgroundColor": "#000000",
                    "color": "#ffffff",
                    "padding": "12px 20px",
                    "borderRadius": "4px"
                }
            }),
            None,
        ),
        ComponentKind::Link => (
            "Link",
            Category::Content,
            json!({ "href": "https://example.com", "children": "Visit our website" }),
            None,
        ),
        ComponentKind::Image => (
            "Image",
            Category::Media,
            json!({
                "src": "https://placehold.co/600x300",
                "alt": "Image",
                "width": "600",
                "align": "center"
            }),
            None,
        ),
        ComponentKind::Divider => (
            "Divider",
            Category::Content,
            json!({ "style": { "borderColor": "#e4e4e7", "margin": "16px 0" } }),
            None,
        ),
        ComponentKind::Footer => (
            "Footer",
            Category::Layout,
            json!({ "style": { "padding": "24px 0", "textAlign": "center" } }),
            Some(vec![
                blank(
                    ComponentKind::Text,
                    json!({ "children": "© 2026 Your Company. All rights reserved." }),
                ),
                blank(
                    ComponentKind::Link,
                    json!({ "href": "https://example.com/unsubscribe", "children": "Unsubscribe" }),
                ),
            ]),
        ),
        ComponentKind::SocialLinks => (
            "Social Links",
            Category::Social,
            json!({ "style": { "textAlign": "center" } }),
            Some(
                ["Facebook", "Twitter", "Instagram"]
                    .iter()
                    .map(|name| {
                        blank(
                            ComponentKind::Link,
                            json!({
                                "href": format!("https://{}.com", name.to_lowercase()),
                                "children": name,
                                "style": { "margin": "0 8px" }
                            }),
                        )
                    })
                    .collect(),
            ),
        ),
        ComponentKind::SocialIcons => (
            "Social Icons",
            Category::Social,
            json!({
                "platforms": [
                    { "platform": "facebook", "url": "https://facebook.com" },
                    { "platform": "x", "url": "https://x.com" },
                    { "platform": "instagram", "url": "https://instagram.com" },
                    { "platform": "linkedin", "url": "https://linkedin.com" }
                ],
                "iconSize": 32,
                "iconShape": "circle",
                "iconStyle": "colored",
                "spacing": 8,
                "align": "center"
            }),
            None,
        ),
        ComponentKind::CodeBlock => (
            "Code Block",
            Category::Code,
            json!({
                "code": "const greeting = \"Hello, world!\";\nconsole.log(greeting);",
                "language": "javascript",
                "theme": "dark",
                "lineNumbers": false
            }),
            None,
        ),
        ComponentKind::CodeInline => (
            "Inline Code",
            Category::Code,
            json!({ "children": "npm install" }),
            None,
        ),
        ComponentKind::Markdown => (
            "Markdown",
            Category::Content,
            json!({ "children": "## Hello\n\nThis is **markdown** content." }),
            None,
        ),
        ComponentKind::Stats => (
            "Stats",
            Category::Blocks,
            json!({
                "stats": [
                    { "value": "42", "title": "Projects", "description": "Shipped this year" },
                    { "value": "99%", "title": "Uptime", "description": "" },
                    { "value": "24/7", "title": "Support" }
                ],
                "valueColor": "#4f46e5",
                "titleColor": "#1a1a1a",
                "descriptionColor": "#6b7280"
            }),
            None,
        ),
        ComponentKind::NumberedList => (
            "Numbered List",
            Category::Blocks,
            json!({
                "items": [
                    { "title": "Sign up", "description": "Create your account in seconds." },
                    { "title": "Customize", "description": "Pick a template and make it yours." },
                    { "title": "Send", "description": "Deliver to your audience." }
                ],
                "numberBgColor": "#4f46e5",
                "numberColor": "#ffffff"
            }),
            None,
        ),
        ComponentKind::Gallery => (
            "Gallery",
            Category::Blocks,
            json!({
                "title": "Our products",
                "headline": "Elegant style",
                "description": "A curated selection for the season.",
                "columns": 2,
                "gap": 16,
                "images": [
                    { "src": "https://placehold.co/288x288", "alt": "Item 1", "href": "#" },
                    { "src": "https://placehold.co/288x288", "alt": "Item 2", "href": "#" },
                    { "src": "https://placehold.co/288x288", "alt": "Item 3", "href": "#" },
                    { "src": "https://placehold.co/288x288", "alt": "Item 4", "href": "#" }
                ]
            }),
            None,
        ),
        ComponentKind::Marketing => (
            "Marketing",
            Category::Blocks,
            json!({
                "title": "Coffee storage",
                "description": "Keep your coffee fresher for longer with our airtight canisters.",
                "ctaText": "Shop now",
                "ctaUrl": "https://example.com",
                "headerImage": "https://placehold.co/276x320",
                "headerBgColor": "#292524",
                "headerTextColor": "#ffffff",
                "products": [
                    {
                        "imageUrl": "https://placehold.co/288x288",
                        "altText": "Canister",
                        "title": "Canister",
                        "description": "Airtight and stylish.",
                        "linkUrl": "https://example.com/canister"
                    },
                    {
                        "imageUrl": "https://placehold.co/288x288",
                        "altText": "Grinder",
                        "title": "Grinder",
                        "description": "Consistent grind every time.",
                        "linkUrl": "https://example.com/grinder"
                    }
                ]
            }),
            None,
        ),
        ComponentKind::Testimonial => (
            "Testimonial",
            Category::Blocks,
            json!({
                "quote": "This product changed the way our team works.",
                "author": "Jordan Lee",
                "role": "Head of Design",
                "avatar": "https://placehold.co/64x64"
            }),
            None,
        ),
        ComponentKind::Preview => (
            "Preview Text",
            Category::Meta,
            json!({ "children": "A short summary shown in the inbox" }),
            None,
        ),
    };

    ComponentDefinition {
        kind,
        display_name,
        category,
        default_props: props(default_props),
        default_children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_and_unknown() {
        let heading = lookup("Heading").expect("Heading is registered");
        assert_eq!(heading.display_name, "Heading");
        assert_eq!(heading.category, Category::Content);
        assert!(lookup("TotallyUnknown").is_none());
    }

    #[test]
    fn test_hr_alias() {
        assert_eq!(ComponentKind::from_key("Hr"), Some(ComponentKind::Divider));
    }

    #[test]
    fn test_keys_round_trip() {
        for kind in ComponentKind::ALL {
            assert_eq!(ComponentKind::from_key(kind.key()), Some(kind));
        }
    }

    #[test]
    fn test_only_layout_kinds_have_child_templates() {
        for def in all() {
            if def.default_children.is_some() {
                assert!(def.kind.is_layout(), "{} has children", def.kind);
            }
        }
    }

    #[test]
    fn test_row_template_padding() {
        let row = lookup("Row").unwrap().template();
        let columns = row.children();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].style().unwrap()["paddingLeft"], "0px");
        assert_eq!(columns[0].style().unwrap()["paddingRight"], "8px");
        assert_eq!(columns[1].style().unwrap()["paddingLeft"], "8px");
        assert_eq!(columns[1].style().unwrap()["paddingRight"], "0px");
    }

    #[test]
    fn test_column_width_fractions() {
        assert_eq!(column_width(2), "50%");
        assert_eq!(column_width(4), "25%");
        assert_eq!(column_width(3), "33.3333%");
    }

    #[test]
    fn test_px_formatting() {
        assert_eq!(px(16.0), "16px");
        assert_eq!(px(7.5), "7.5px");
        assert_eq!(px(1e30), "1000000000000000000000000000000px");
        assert_ne!(px(1e30), "9223372036854775807px");
    }
}
