//! Per-type render functions.
//!
//! Each registered component type maps to exactly one [`RenderFn`]. Plain
//! types expand 1:1 into an email primitive; composite types (stats,
//! galleries, social strips, ...) expand one tree node into a whole
//! subtree of rows and columns.

mod basic;
mod gallery;
mod image;
mod marketing;
mod numbered_list;
mod social_icons;
mod stats;
mod testimonial;

pub use social_icons::{platform, Platform, PLATFORMS};

use crate::evaluator::Evaluator;
use crate::style_resolution::{default_style, inline_style};
use crate::vdom::{AttributeMap, EmailTag, VNode};
use mailwright_model::{ComponentKind, ComponentNode};
use serde_json::Value;

/// Class carried by columns that should stack on narrow screens.
pub const STACK_CLASS: &str = "mw-stack";

/// Media rule that collapses `mw-stack` columns to full width on narrow
/// screens. Emitted into the document head when any column uses it.
pub const STACK_STYLES: &str = "@media only screen and (max-width: 600px) { \
.mw-stack { display: block !important; width: 100% !important; \
padding-left: 0 !important; padding-right: 0 !important; } }";

pub type RenderFn = fn(&Evaluator, &ComponentNode) -> VNode;

/// Render function for a registered type.
pub fn renderer_for(kind: ComponentKind) -> RenderFn {
    match kind {
        ComponentKind::Container => basic::container,
        ComponentKind::Section => basic::section,
        ComponentKind::Row => basic::row,
        ComponentKind::Column => basic::column,
        ComponentKind::Footer => basic::footer,
        ComponentKind::SocialLinks => basic::social_links,
        ComponentKind::Heading => basic::heading,
        ComponentKind::Text => basic::text,
        ComponentKind::Button => basic::button,
        ComponentKind::Link => basic::link,
        ComponentKind::Divider => basic::divider,
        ComponentKind::CodeBlock => basic::code_block,
        ComponentKind::CodeInline => basic::code_inline,
        ComponentKind::Markdown => basic::markdown,
        ComponentKind::Preview => basic::preview,
        ComponentKind::Image => image::render,
        ComponentKind::SocialIcons => social_icons::render,
        ComponentKind::Stats => stats::render,
        ComponentKind::NumberedList => numbered_list::render,
        ComponentKind::Gallery => gallery::render,
        ComponentKind::Marketing => marketing::render,
        ComponentKind::Testimonial => testimonial::render,
    }
}

/// Props that only drive the editor and never reach the output.
const EDITOR_ONLY_PROPS: &[&str] = &["children", "style", "columnCount", "columnGap"];

/// Props of `node` passed through as element attributes.
fn passthrough_attributes(node: &ComponentNode, skip: &[&str]) -> AttributeMap {
    node.props
        .iter()
        .filter(|(k, _)| !EDITOR_ONLY_PROPS.contains(&k.as_str()) && !skip.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Element for `node` with its inline style, type defaults, class name and
/// source id. Class names are left for the target's utility compiler.
fn styled_element(tag: EmailTag, node: &ComponentNode) -> VNode {
    let defaults = ComponentKind::from_key(&node.kind)
        .map(default_style)
        .unwrap_or_default();
    VNode::element(tag)
        .with_styles(inline_style(node))
        .with_default_styles(defaults)
        .with_class_name(node.class_name.clone())
        .with_source(node.id.clone())
}

/// Text content stored in `props.children`.
fn content_of(node: &ComponentNode) -> String {
    match node.prop("children") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Non-blank string field of a composite record.
fn record_str<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Scalar field of a composite record as text, numbers included.
fn record_text(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn str_prop<'a>(node: &'a ComponentNode, key: &str, default: &'a str) -> &'a str {
    node.prop_str(key).unwrap_or(default)
}

fn number_prop(node: &ComponentNode, key: &str, default: f64) -> f64 {
    node.prop_f64(key).filter(|n| n.is_finite()).unwrap_or(default)
}

fn align_prop<'a>(node: &'a ComponentNode, default: &'a str) -> &'a str {
    match node.prop_str("align") {
        Some(a @ ("left" | "center" | "right")) => a,
        _ => default,
    }
}

/// Plain text element with fixed styling, used inside composites.
fn styled_text(tag: EmailTag, content: impl Into<String>, styles: &[(&str, &str)]) -> VNode {
    let mut node = VNode::element(tag);
    for (k, v) in styles {
        node = node.with_style(*k, *v);
    }
    node.with_child(VNode::text(content))
}
