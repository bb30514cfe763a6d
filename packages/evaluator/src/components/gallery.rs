use super::{number_prop, record_str, styled_text, STACK_CLASS};
use crate::evaluator::Evaluator;
use crate::vdom::{EmailTag, VNode};
use mailwright_model::registry::{column_padding, column_width, px, DEFAULT_COLUMN_GAP};
use mailwright_model::ComponentNode;
use serde_json::Value;

const DEFAULT_COLUMNS: usize = 2;

fn header(node: &ComponentNode) -> Option<VNode> {
    let mut section = VNode::element(EmailTag::Section).with_style("textAlign", "center");
    let mut any = false;

    if let Some(title) = node.prop_str("title") {
        section = section.with_child(styled_text(
            EmailTag::Text,
            title,
            &[
                ("fontSize", "14px"),
                ("fontWeight", "600"),
                ("textTransform", "uppercase"),
                ("color", "#4f46e5"),
                ("margin", "0"),
            ],
        ));
        any = true;
    }
    if let Some(headline) = node.prop_str("headline") {
        section = section.with_child(
            styled_text(
                EmailTag::Heading,
                headline,
                &[("fontSize", "24px"), ("fontWeight", "bold"), ("margin", "8px 0")],
            )
            .with_attr("as", "h2"),
        );
        any = true;
    }
    if let Some(description) = node.prop_str("description") {
        section = section.with_child(styled_text(
            EmailTag::Text,
            description,
            &[("fontSize", "16px"), ("color", "#6b7280"), ("margin", "0 0 16px")],
        ));
        any = true;
    }

    any.then_some(section)
}

fn cell(image: &Value, index: usize, row_len: usize, width: &str, gap: f64) -> VNode {
    let (left, right) = column_padding(index, row_len, gap);

    let mut img = VNode::element(EmailTag::Img)
        .with_attr("src", record_str(image, "src").unwrap_or_default())
        .with_attr("alt", record_str(image, "alt").unwrap_or_default())
        .with_style("width", "100%")
        .with_style("display", "block")
        .with_style("borderRadius", "8px");
    if let Some(href) = record_str(image, "href") {
        img = VNode::element(EmailTag::Link).with_attr("href", href).with_child(img);
    }

    VNode::element(EmailTag::Column)
        .with_class_name(Some(STACK_CLASS.to_string()))
        .with_style("width", width)
        .with_style("verticalAlign", "top")
        .with_style("paddingLeft", px(left))
        .with_style("paddingRight", px(right))
        .with_style("paddingBottom", px(gap))
        .with_child(img)
}

/// Header block, then the images chunked into rows of `columns`. Every
/// cell uses the same `100/columns %` width, including cells of a short
/// last row.
pub(super) fn render(_ev: &Evaluator, node: &ComponentNode) -> VNode {
    let columns = node
        .prop_f64("columns")
        .filter(|c| c.is_finite() && *c >= 1.0)
        .map(|c| c as usize)
        .unwrap_or(DEFAULT_COLUMNS);
    let gap = number_prop(node, "gap", DEFAULT_COLUMN_GAP).max(0.0);
    let width = column_width(columns);

    let rows = node.prop_list("images").chunks(columns).map(|chunk| {
        let cells = chunk
            .iter()
            .enumerate()
            .map(|(j, image)| cell(image, j, chunk.len(), &width, gap))
            .collect();
        VNode::element(EmailTag::Row).with_children(cells)
    });

    let mut section = VNode::element(EmailTag::Section)
        .with_source(node.id.clone())
        .with_class_name(node.class_name.clone());
    if let Some(header) = header(node) {
        section = section.with_child(header);
    }
    section.with_children(rows.collect())
}
