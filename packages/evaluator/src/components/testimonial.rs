use super::{styled_text, STACK_CLASS};
use crate::evaluator::Evaluator;
use crate::vdom::{EmailTag, VNode};
use mailwright_model::ComponentNode;

pub(super) fn render(_ev: &Evaluator, node: &ComponentNode) -> VNode {
    let mut row = VNode::element(EmailTag::Row);

    if let Some(avatar) = node.prop_str("avatar") {
        row = row.with_child(
            VNode::element(EmailTag::Column)
                .with_class_name(Some(STACK_CLASS.to_string()))
                .with_style("width", "72px")
                .with_style("verticalAlign", "top")
                .with_child(
                    VNode::element(EmailTag::Img)
                        .with_attr("src", avatar)
                        .with_attr("alt", node.prop_str("author").unwrap_or_default())
                        .with_attr("width", "56")
                        .with_attr("height", "56")
                        .with_style("borderRadius", "50%")
                        .with_style("display", "block"),
                ),
        );
    }

    let mut body = VNode::element(EmailTag::Column).with_style("verticalAlign", "top");
    if let Some(quote) = node.prop_str("quote") {
        body = body.with_child(styled_text(
            EmailTag::Text,
            format!("\u{201c}{}\u{201d}", quote),
            &[("fontSize", "18px"), ("fontStyle", "italic"), ("lineHeight", "28px"), ("margin", "0 0 12px")],
        ));
    }
    if let Some(author) = node.prop_str("author") {
        body = body.with_child(styled_text(
            EmailTag::Text,
            author,
            &[("fontSize", "16px"), ("fontWeight", "bold"), ("margin", "0")],
        ));
    }
    if let Some(role) = node.prop_str("role") {
        body = body.with_child(styled_text(
            EmailTag::Text,
            role,
            &[("fontSize", "14px"), ("color", "#6b7280"), ("margin", "0")],
        ));
    }

    VNode::element(EmailTag::Section)
        .with_source(node.id.clone())
        .with_class_name(node.class_name.clone())
        .with_styles(crate::style_resolution::inline_style(node))
        .with_child(row.with_child(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_column_is_optional() {
        let base = ComponentNode::new("t", "Testimonial")
            .with_prop("quote", "Great product")
            .with_prop("author", "Sam");

        let out = Evaluator::new().evaluate_node(&base);
        assert_eq!(out.find_all(EmailTag::Column).len(), 1);
        assert_eq!(out.find_all(EmailTag::Text).len(), 2);

        let out = Evaluator::new().evaluate_node(&base.with_prop("avatar", "https://example.com/sam.png"));
        assert_eq!(out.find_all(EmailTag::Column).len(), 2);
        assert_eq!(out.find_all(EmailTag::Img).len(), 1);
    }
}
