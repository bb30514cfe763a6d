use super::{record_text, str_prop, styled_text};
use crate::evaluator::Evaluator;
use crate::vdom::{EmailTag, VNode};
use mailwright_model::ComponentNode;

const CIRCLE_SIZE: &str = "32px";

fn number_circle(position: usize, background: &str, color: &str) -> VNode {
    styled_text(
        EmailTag::Text,
        position.to_string(),
        &[
            ("backgroundColor", background),
            ("color", color),
            ("width", CIRCLE_SIZE),
            ("height", CIRCLE_SIZE),
            ("lineHeight", CIRCLE_SIZE),
            ("borderRadius", "50%"),
            ("textAlign", "center"),
            ("fontWeight", "bold"),
            ("fontSize", "16px"),
            ("margin", "0"),
        ],
    )
}

/// One row per item: a numbered circle, then title and description.
/// Numbers are positions, not stored data.
pub(super) fn render(_ev: &Evaluator, node: &ComponentNode) -> VNode {
    let background = str_prop(node, "numberBgColor", "#111827");
    let color = str_prop(node, "numberColor", "#ffffff");

    let rows = node
        .prop_list("items")
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let circle = VNode::element(EmailTag::Column)
                .with_style("width", "48px")
                .with_style("verticalAlign", "top")
                .with_child(number_circle(index + 1, background, color));

            let mut body = VNode::element(EmailTag::Column).with_style("verticalAlign", "top");
            if let Some(title) = record_text(item, "title") {
                body = body.with_child(styled_text(
                    EmailTag::Text,
                    title,
                    &[("fontSize", "18px"), ("fontWeight", "bold"), ("margin", "4px 0 0")],
                ));
            }
            if let Some(description) = record_text(item, "description") {
                body = body.with_child(styled_text(
                    EmailTag::Text,
                    description,
                    &[("fontSize", "14px"), ("color", "#6b7280"), ("margin", "4px 0 0")],
                ));
            }

            VNode::element(EmailTag::Row)
                .with_style("marginBottom", "16px")
                .with_child(circle)
                .with_child(body)
        })
        .collect();

    VNode::element(EmailTag::Section)
        .with_source(node.id.clone())
        .with_class_name(node.class_name.clone())
        .with_children(rows)
}
