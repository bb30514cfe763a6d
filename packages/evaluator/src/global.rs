//! Document-wide wrapper built from [`GlobalStyles`].
//!
//! `Html > Head + Body[background, font] > previews + Container[max width]`

use crate::vdom::{EmailTag, VNode};
use mailwright_model::GlobalStyles;

pub fn wrap_document(previews: Vec<VNode>, content: Vec<VNode>, globals: &GlobalStyles) -> VNode {
    let container = VNode::element(EmailTag::Container)
        .with_style("maxWidth", globals.max_width())
        .with_style("backgroundColor", globals.container_background())
        .with_style("padding", globals.container_padding())
        .with_style("color", globals.text_color())
        .with_style("fontSize", globals.font_size())
        .with_style("fontFamily", globals.font_family())
        .with_children(content);

    let body = VNode::element(EmailTag::Body)
        .with_style("backgroundColor", globals.body_background())
        .with_style("fontFamily", globals.font_family())
        .with_style("margin", "0")
        .with_style("padding", "24px 0")
        .with_children(previews)
        .with_child(container);

    VNode::element(EmailTag::Html)
        .with_attr("lang", "en")
        .with_child(VNode::element(EmailTag::Head))
        .with_child(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_the_wrapper() {
        let root = wrap_document(Vec::new(), Vec::new(), &GlobalStyles::default());
        let body = &root.children()[1];
        let container = &body.children()[0];

        assert_eq!(body.styles().unwrap()["backgroundColor"], "#f4f4f5");
        assert_eq!(container.styles().unwrap()["maxWidth"], "600px");
        assert_eq!(container.styles().unwrap()["padding"], "20px");
    }

    #[test]
    fn test_overrides_apply() {
        let globals = GlobalStyles {
            max_width: Some("480px".to_string()),
            body_background: Some("#000000".to_string()),
            ..GlobalStyles::default()
        };
        let root = wrap_document(Vec::new(), Vec::new(), &globals);
        let body = &root.children()[1];

        assert_eq!(body.styles().unwrap()["backgroundColor"], "#000000");
        assert_eq!(body.children()[0].styles().unwrap()["maxWidth"], "480px");
    }
}
