use super::{content_of, passthrough_attributes, styled_element};
use crate::evaluator::Evaluator;
use crate::vdom::{EmailTag, VNode};
use mailwright_model::ComponentNode;

fn layout(tag: EmailTag, ev: &Evaluator, node: &ComponentNode) -> VNode {
    let mut element = styled_element(tag, node).with_children(ev.evaluate_nodes(node.children()));
    for (k, v) in passthrough_attributes(node, &[]) {
        element = element.with_attr(k, v);
    }
    element
}

fn leaf_with_text(tag: EmailTag, node: &ComponentNode) -> VNode {
    let mut element = styled_element(tag, node);
    for (k, v) in passthrough_attributes(node, &[]) {
        element = element.with_attr(k, v);
    }
    let content = content_of(node);
    if content.is_empty() {
        element
    } else {
        element.with_child(VNode::text(content))
    }
}

pub(super) fn container(ev: &Evaluator, node: &ComponentNode) -> VNode {
    layout(EmailTag::Container, ev, node)
}

pub(super) fn section(ev: &Evaluator, node: &ComponentNode) -> VNode {
    layout(EmailTag::Section, ev, node)
}

pub(super) fn row(ev: &Evaluator, node: &ComponentNode) -> VNode {
    layout(EmailTag::Row, ev, node)
}

pub(super) fn column(ev: &Evaluator, node: &ComponentNode) -> VNode {
    layout(EmailTag::Column, ev, node)
}

pub(super) fn footer(ev: &Evaluator, node: &ComponentNode) -> VNode {
    layout(EmailTag::Section, ev, node)
}

pub(super) fn social_links(ev: &Evaluator, node: &ComponentNode) -> VNode {
    layout(EmailTag::Section, ev, node)
}

pub(super) fn heading(_ev: &Evaluator, node: &ComponentNode) -> VNode {
    let element = leaf_with_text(EmailTag::Heading, node);
    match node.prop_str("as") {
        Some(level) if matches!(level, "h1" | "h2" | "h3" | "h4" | "h5" | "h6") => element,
        _ => element.with_attr("as", "h2"),
    }
}

pub(super) fn text(_ev: &Evaluator, node: &ComponentNode) -> VNode {
    leaf_with_text(EmailTag::Text, node)
}

pub(super) fn button(_ev: &Evaluator, node: &ComponentNode) -> VNode {
    leaf_with_text(EmailTag::Button, node)
}

pub(super) fn link(_ev: &Evaluator, node: &ComponentNode) -> VNode {
    leaf_with_text(EmailTag::Link, node)
}

pub(super) fn code_inline(_ev: &Evaluator, node: &ComponentNode) -> VNode {
    leaf_with_text(EmailTag::CodeInline, node)
}

pub(super) fn markdown(_ev: &Evaluator, node: &ComponentNode) -> VNode {
    leaf_with_text(EmailTag::Markdown, node)
}

pub(super) fn preview(_ev: &Evaluator, node: &ComponentNode) -> VNode {
    leaf_with_text(EmailTag::Preview, node)
}

pub(super) fn divider(_ev: &Evaluator, node: &ComponentNode) -> VNode {
    leaf_with_text(EmailTag::Hr, node)
}

pub(super) fn code_block(_ev: &Evaluator, node: &ComponentNode) -> VNode {
    let mut element = styled_element(EmailTag::CodeBlock, node);
    for (k, v) in passthrough_attributes(node, &[]) {
        element = element.with_attr(k, v);
    }
    if node.prop("code").is_none() {
        element = element.with_attr("code", content_of(node));
    }
    element
}
