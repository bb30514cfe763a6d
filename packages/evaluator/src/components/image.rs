use super::{align_prop, styled_element};
use crate::evaluator::Evaluator;
use crate::vdom::{EmailTag, VNode};
use mailwright_model::ComponentNode;

/// Image props consumed by the wrapper rather than passed to `<Img>`.
const WRAPPER_PROPS: &[&str] = &["align", "backgroundColor", "padding", "href"];

/// `Section[textAlign] > (Section[bg, padding])? > (Link)? > Img`
///
/// Alignment lives on the outer section so the image itself never needs
/// margins, which several mail clients ignore.
pub(super) fn render(_ev: &Evaluator, node: &ComponentNode) -> VNode {
    let align = align_prop(node, "center");

    let mut img = styled_element(EmailTag::Img, node);
    for (k, v) in super::passthrough_attributes(node, WRAPPER_PROPS) {
        img = img.with_attr(k, v);
    }
    let img = img
        .with_default_style("display", "inline-block")
        .with_default_style("maxWidth", "100%");

    let mut inner = match node.prop_str("href") {
        Some(href) => VNode::element(EmailTag::Link)
            .with_attr("href", href)
            .with_child(img),
        None => img,
    };

    if let Some(background) = node.prop_str("backgroundColor") {
        let padding = node.prop_str("padding").unwrap_or("16px");
        inner = VNode::element(EmailTag::Section)
            .with_style("backgroundColor", background)
            .with_style("padding", padding)
            .with_style("textAlign", align)
            .with_child(inner);
    }

    VNode::element(EmailTag::Section)
        .with_style("textAlign", align)
        .with_source(node.id.clone())
        .with_child(inner)
}

#[cfg(test)]
mod tests {
    use crate::evaluator::Evaluator;
    use crate::vdom::EmailTag;
    use mailwright_model::ComponentNode;
    use serde_json::Value;

    fn image() -> ComponentNode {
        ComponentNode::new("img", "Image")
            .with_prop("src", "https://example.com/a.png")
            .with_prop("alt", "A")
    }

    #[test]
    fn test_alignment_lives_on_wrapper() {
        let out = Evaluator::new().evaluate_node(&image().with_prop("align", "right"));

        assert_eq!(out.tag(), Some(EmailTag::Section));
        assert_eq!(out.styles().unwrap()["textAlign"], "right");

        let img = out.find_all(EmailTag::Img)[0];
        assert!(!img.styles().unwrap().contains_key("textAlign"));
        assert!(img.attr("align").is_none());
        assert_eq!(img.attr("src").and_then(Value::as_str), Some("https://example.com/a.png"));
    }

    #[test]
    fn test_background_adds_padded_box() {
        let out = Evaluator::new().evaluate_node(&image().with_prop("backgroundColor", "#111111"));
        let sections = out.find_all(EmailTag::Section);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].styles().unwrap()["backgroundColor"], "#111111");
        assert_eq!(sections[1].styles().unwrap()["padding"], "16px");
    }

    #[test]
    fn test_no_background_single_wrapper() {
        let out = Evaluator::new().evaluate_node(&image());
        assert_eq!(out.find_all(EmailTag::Section).len(), 1);
        assert_eq!(out.styles().unwrap()["textAlign"], "center");
    }

    #[test]
    fn test_img_display_is_a_default() {
        let out = Evaluator::new()
            .evaluate_node(&image().with_prop("style", serde_json::json!({ "display": "block" })));
        let img = out.find_all(EmailTag::Img)[0];

        assert_eq!(img.styles().unwrap()["display"], "block");
        assert_eq!(img.default_styles().unwrap()["display"], "inline-block");
        assert_eq!(img.default_styles().unwrap()["maxWidth"], "100%");
    }
}
