use super::{record_text, str_prop, styled_text, STACK_CLASS};
use crate::evaluator::Evaluator;
use crate::vdom::{EmailTag, VNode};
use mailwright_model::registry::column_width;
use mailwright_model::ComponentNode;

/// One column per stat, in input order. A blank description is left out
/// entirely so the column only carries value and title.
pub(super) fn render(_ev: &Evaluator, node: &ComponentNode) -> VNode {
    let stats = node.prop_list("stats");
    let width = column_width(stats.len());
    let value_color = str_prop(node, "valueColor", "#111827");
    let title_color = str_prop(node, "titleColor", "#374151");
    let description_color = str_prop(node, "descriptionColor", "#6b7280");

    let columns = stats.iter().map(|stat| {
        let mut column = VNode::element(EmailTag::Column)
            .with_class_name(Some(STACK_CLASS.to_string()))
            .with_style("width", width.as_str())
            .with_style("textAlign", "center")
            .with_style("verticalAlign", "top")
            .with_style("padding", "8px");

        if let Some(value) = record_text(stat, "value") {
            column = column.with_child(styled_text(
                EmailTag::Text,
                value,
                &[
                    ("color", value_color),
                    ("fontSize", "32px"),
                    ("fontWeight", "bold"),
                    ("lineHeight", "40px"),
                    ("margin", "0"),
                ],
            ));
        }
        if let Some(title) = record_text(stat, "title") {
            column = column.with_child(styled_text(
                EmailTag::Text,
                title,
                &[
                    ("color", title_color),
                    ("fontSize", "16px"),
                    ("fontWeight", "600"),
                    ("margin", "4px 0 0"),
                ],
            ));
        }
        if let Some(description) = record_text(stat, "description") {
            column = column.with_child(styled_text(
                EmailTag::Text,
                description,
                &[
                    ("color", description_color),
                    ("fontSize", "14px"),
                    ("margin", "4px 0 0"),
                ],
            ));
        }
        column
    });

    VNode::element(EmailTag::Section)
        .with_source(node.id.clone())
        .with_class_name(node.class_name.clone())
        .with_child(VNode::element(EmailTag::Row).with_children(columns.collect()))
}
