use super::{record_str, str_prop, styled_text, STACK_CLASS};
use crate::evaluator::Evaluator;
use crate::vdom::{EmailTag, VNode};
use mailwright_model::registry::column_width;
use mailwright_model::ComponentNode;
use serde_json::Value;

fn header_band(node: &ComponentNode) -> VNode {
    let background = str_prop(node, "headerBgColor", "#111827");
    let color = str_prop(node, "headerTextColor", "#ffffff");

    let mut copy = VNode::element(EmailTag::Column)
        .with_class_name(Some(STACK_CLASS.to_string()))
        .with_style("width", "60%")
        .with_style("verticalAlign", "middle")
        .with_style("padding", "24px");
    if let Some(title) = node.prop_str("title") {
        copy = copy.with_child(
            styled_text(
                EmailTag::Heading,
                title,
                &[("color", color), ("fontSize", "28px"), ("fontWeight", "bold"), ("margin", "0 0 12px")],
            )
            .with_attr("as", "h1"),
        );
    }
    if let Some(description) = node.prop_str("description") {
        copy = copy.with_child(styled_text(
            EmailTag::Text,
            description,
            &[("color", color), ("fontSize", "16px"), ("margin", "0 0 16px")],
        ));
    }
    if let (Some(text), Some(url)) = (node.prop_str("ctaText"), node.prop_str("ctaUrl")) {
        copy = copy.with_child(
            styled_text(
                EmailTag::Button,
                text,
                &[
                    ("backgroundColor", color),
                    ("color", background),
                    ("padding", "12px 20px"),
                    ("borderRadius", "4px"),
                    ("fontWeight", "600"),
                    ("textDecoration", "none"),
                    ("display", "inline-block"),
                ],
            )
            .with_attr("href", url),
        );
    }

    let mut row = VNode::element(EmailTag::Row).with_child(copy);
    if let Some(src) = node.prop_str("headerImage") {
        row = row.with_child(
            VNode::element(EmailTag::Column)
                .with_class_name(Some(STACK_CLASS.to_string()))
                .with_style("width", "40%")
                .with_style("verticalAlign", "middle")
                .with_child(
                    VNode::element(EmailTag::Img)
                        .with_attr("src", src)
                        .with_attr("alt", node.prop_str("title").unwrap_or_default())
                        .with_style("width", "100%")
                        .with_style("display", "block"),
                ),
        );
    }

    VNode::element(EmailTag::Section)
        .with_style("backgroundColor", background)
        .with_style("borderRadius", "8px")
        .with_child(row)
}

fn product_card(product: &Value, width: &str) -> VNode {
    let mut card = VNode::element(EmailTag::Column)
        .with_class_name(Some(STACK_CLASS.to_string()))
        .with_style("width", width)
        .with_style("verticalAlign", "top")
        .with_style("padding", "8px");

    if let Some(src) = record_str(product, "imageUrl") {
        let img = VNode::element(EmailTag::Img)
            .with_attr("src", src)
            .with_attr("alt", record_str(product, "altText").unwrap_or_default())
            .with_style("width", "100%")
            .with_style("display", "block")
            .with_style("borderRadius", "6px");
        card = card.with_child(match record_str(product, "linkUrl") {
            Some(href) => VNode::element(EmailTag::Link).with_attr("href", href).with_child(img),
            None => img,
        });
    }
    if let Some(title) = record_str(product, "title") {
        card = card.with_child(styled_text(
            EmailTag::Text,
            title,
            &[("fontSize", "16px"), ("fontWeight", "bold"), ("margin", "8px 0 4px")],
        ));
    }
    if let Some(description) = record_str(product, "description") {
        card = card.with_child(styled_text(
            EmailTag::Text,
            description,
            &[("fontSize", "14px"), ("color", "#6b7280"), ("margin", "0")],
        ));
    }
    card
}

/// Header band with copy, call to action and side image, followed by a
/// strip of product cards.
pub(super) fn render(_ev: &Evaluator, node: &ComponentNode) -> VNode {
    let products = node.prop_list("products");
    let width = column_width(products.len());

    let mut section = VNode::element(EmailTag::Section)
        .with_source(node.id.clone())
        .with_class_name(node.class_name.clone())
        .with_child(header_band(node));

    if !products.is_empty() {
        let cards = products.iter().map(|p| product_card(p, &width)).collect();
        section = section.with_child(
            VNode::element(EmailTag::Section)
                .with_style("paddingTop", "16px")
                .with_child(VNode::element(EmailTag::Row).with_children(cards)),
        );
    }
    section
}
