//! Style Resolution
//!
//! Effective style of a node, cascaded from three layers (lowest first):
//!
//! 1. the component type's default style
//! 2. declarations derived from `className` utility tokens
//! 3. the node's inline `props.style`
//!
//! A higher layer always wins. When a higher layer sets a shorthand such as
//! `padding`, lower-layer longhands (`paddingLeft`, ...) are dropped so the
//! shorthand is not overridden by a weaker declaration.

use crate::utility_classes::parse_class_name;
use crate::vdom::StyleMap;
use mailwright_model::{ComponentKind, ComponentNode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Which cascade layer produced a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleSource {
    TypeDefault,
    UtilityClass,
    Inline,
}

/// A resolved value and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedValue {
    pub value: String,
    pub source: StyleSource,
}

/// Properties that take plain numbers without a unit.
fn is_unitless(property: &str) -> bool {
    matches!(
        property,
        "fontWeight" | "lineHeight" | "opacity" | "zIndex" | "flex" | "flexGrow" | "flexShrink"
    )
}

/// Convert a JSON style value into CSS text. Numbers get `px` unless the
/// property is unitless; empty strings and non-scalars yield `None`.
pub fn css_value(property: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => {
            let text = n.to_string();
            if is_unitless(property) || n.as_f64() == Some(0.0) {
                Some(text)
            } else {
                Some(format!("{}px", text))
            }
        }
        _ => None,
    }
}

/// Hardcoded per-type defaults.
pub fn default_style(kind: ComponentKind) -> StyleMap {
    let pairs: &[(&str, &str)] = match kind {
        ComponentKind::Heading => &[
            ("fontWeight", "bold"),
            ("fontSize", "20px"),
            ("margin", "0 0 12px"),
        ],
        ComponentKind::Text => &[
            ("fontSize", "16px"),
            ("lineHeight", "24px"),
            ("margin", "0 0 12px"),
        ],
        ComponentKind::Button => &[
            ("display", "inline-block"),
            ("textDecoration", "none"),
            ("textAlign", "center"),
            ("backgroundColor", "#000000"),
            ("color", "#ffffff"),
            ("padding", "12px 20px"),
            ("borderRadius", "4px"),
        ],
        ComponentKind::Link => &[("color", "#2563eb"), ("textDecoration", "underline")],
        ComponentKind::Divider => &[("borderColor", "#e4e4e7"), ("margin", "16px 0")],
        ComponentKind::CodeInline => &[
            ("fontFamily", "monospace"),
            ("backgroundColor", "#f4f4f5"),
            ("padding", "2px 4px"),
            ("borderRadius", "4px"),
        ],
        ComponentKind::CodeBlock => &[
            ("fontFamily", "monospace"),
            ("padding", "16px"),
            ("borderRadius", "6px"),
        ],
        ComponentKind::Column => &[("verticalAlign", "top")],
        ComponentKind::Footer => &[("textAlign", "center")],
        _ => &[],
    };

    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Declarations derived from the node's `className`.
pub fn class_style(node: &ComponentNode) -> StyleMap {
    node.class_name
        .as_deref()
        .map(parse_class_name)
        .unwrap_or_default()
}

/// The node's inline `props.style`, skipping empty values.
pub fn inline_style(node: &ComponentNode) -> StyleMap {
    node.style()
        .map(|style| {
            style
                .iter()
                .filter_map(|(k, v)| css_value(k, v).map(|v| (k.clone(), v)))
                .collect()
        })
        .unwrap_or_default()
}

/// Whether `longhand` is one of the properties covered by `shorthand`,
/// e.g. `paddingLeft` under `padding`.
pub fn is_longhand_of(longhand: &str, shorthand: &str) -> bool {
    longhand
        .strip_prefix(shorthand)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

fn apply_layer(
    resolved: &mut BTreeMap<String, ResolvedValue>,
    layer: StyleMap,
    source: StyleSource,
) {
    for (property, value) in layer {
        resolved.retain(|existing, v| v.source == source || !is_longhand_of(existing, &property));
        resolved.insert(property, ResolvedValue { value, source });
    }
}

/// `authoritative` layered over `fallback`. Fallback longhands under an
/// authoritative shorthand are dropped.
pub fn merge_layers(fallback: &StyleMap, authoritative: &StyleMap) -> StyleMap {
    let mut merged: StyleMap = fallback
        .iter()
        .filter(|(property, _)| !authoritative.keys().any(|a| is_longhand_of(property, a)))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    merged.extend(authoritative.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Resolve every property with its origin.
pub fn resolve_with_sources(node: &ComponentNode) -> BTreeMap<String, ResolvedValue> {
    let mut resolved = BTreeMap::new();
    if let Some(kind) = ComponentKind::from_key(&node.kind) {
        apply_layer(&mut resolved, default_style(kind), StyleSource::TypeDefault);
    }
    apply_layer(&mut resolved, class_style(node), StyleSource::UtilityClass);
    apply_layer(&mut resolved, inline_style(node), StyleSource::Inline);
    resolved
}

/// Effective style of `node`.
pub fn resolve_style(node: &ComponentNode) -> StyleMap {
    resolve_with_sources(node)
        .into_iter()
        .map(|(k, v)| (k, v.value))
        .collect()
}

/// Effective value of a single property.
pub fn resolve_property(node: &ComponentNode, property: &str) -> Option<String> {
    resolve_with_sources(node)
        .remove(property)
        .map(|v| v.value)
}
