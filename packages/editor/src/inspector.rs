//! Property panel model.
//!
//! What the panel shows for the selected node: registry metadata, the prop
//! keys it can edit, and every style property with the layer it was
//! resolved from. Unknown types get a fallback entry instead of an error.

use mailwright_evaluator::{resolve_with_sources, ResolvedValue};
use mailwright_model::registry::{self, Category};
use mailwright_model::ComponentNode;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

pub const UNKNOWN_COMPONENT: &str = "Unknown component";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Inspection {
    #[serde(rename_all = "camelCase")]
    Known {
        node_id: String,
        display_name: &'static str,
        category: Category,
        /// Prop keys the panel offers, excluding `style` and `children`
        /// which have dedicated editors
        editable_props: Vec<String>,
        styles: BTreeMap<String, ResolvedValue>,
    },
    #[serde(rename_all = "camelCase")]
    Unknown {
        node_id: String,
        kind: String,
        message: String,
    },
}

impl Inspection {
    pub fn is_known(&self) -> bool {
        matches!(self, Inspection::Known { .. })
    }
}

pub fn inspect(node: &ComponentNode) -> Inspection {
    let Some(definition) = registry::lookup(&node.kind) else {
        warn!(node_id = %node.id, kind = %node.kind, "Inspecting unregistered component");
        return Inspection::Unknown {
            node_id: node.id.clone(),
            kind: node.kind.clone(),
            message: format!("{}: {}", UNKNOWN_COMPONENT, node.kind),
        };
    };

    let editable_props: BTreeSet<String> = definition
        .default_props
        .keys()
        .chain(node.props.keys())
        .filter(|key| !matches!(key.as_str(), "style" | "children"))
        .cloned()
        .collect();

    Inspection::Known {
        node_id: node.id.clone(),
        display_name: definition.display_name,
        category: definition.category,
        editable_props: editable_props.into_iter().collect(),
        styles: resolve_with_sources(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailwright_evaluator::StyleSource;
    use serde_json::json;

    #[test]
    fn test_known_component() {
        let node = ComponentNode::new("h", "Heading")
            .with_prop("children", "Hi")
            .with_prop("style", json!({ "color": "#ff0000" }))
            .with_prop("tagline", "extra");

        let Inspection::Known {
            display_name,
            editable_props,
            styles,
            ..
        } = inspect(&node)
        else {
            panic!("expected a known component");
        };

        assert_eq!(display_name, "Heading");
        assert!(editable_props.contains(&"tagline".to_string()));
        assert!(!editable_props.contains(&"style".to_string()));
        assert_eq!(styles["color"].value, "#ff0000");
        assert_eq!(styles["color"].source, StyleSource::Inline);
    }

    #[test]
    fn test_unknown_component_fallback() {
        let inspection = inspect(&ComponentNode::new("x", "Carousel"));
        assert!(!inspection.is_known());
        assert_eq!(
            inspection,
            Inspection::Unknown {
                node_id: "x".into(),
                kind: "Carousel".into(),
                message: "Unknown component: Carousel".into(),
            }
        );
    }
}
