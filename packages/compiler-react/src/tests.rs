use crate::{compile_to_react, render_jsx, CompileOptions};
use mailwright_evaluator::{EmailTag, VNode, VirtualEmailDocument};
use mailwright_model::{ComponentNode, ComponentTree, GlobalStyles};
use serde_json::json;
use pretty_assertions::assert_eq;

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn render(nodes: Vec<ComponentNode>) -> String {
    let result = render_jsx(
        &ComponentTree::from_nodes(nodes),
        &GlobalStyles::default(),
        CompileOptions::default(),
    );
    println!("Generated code:\n{}", result);
    result
}

#[test]
fn test_module_shape() {
    let result = render(vec![ComponentNode::new("t", "Text").with_prop("children", "Hello")]);

    assert!(result.starts_with(
        "import { Body, Container, Head, Html, Text } from \"@react-email/components\";"
    ));
    assert!(result.contains("export default function Email() {"));
    assert!(result.contains("return ("));
    assert!(result.contains(">Hello</Text>"));
    assert!(result.trim_end().ends_with('}'));
}

#[test]
fn test_styles_and_attributes() {
    let result = render(vec![ComponentNode::new("b", "Button")
        .with_prop("href", "https://example.com")
        .with_prop("children", "Go")
        .with_prop("style", json!({ "backgroundColor": "#ff0000" }))]);

    assert!(result.contains("<Button href=\"https://example.com\" style={{ "));
    assert!(result.contains("backgroundColor: \"#ff0000\""));
    assert!(result.contains(">Go</Button>"));
}

#[test]
fn test_non_string_attributes_are_expressions() {
    let result = render(vec![ComponentNode::new("i", "Image")
        .with_prop("src", "a.png")
        .with_prop("width", 600)]);

    assert!(result.contains("width={600}"));
    assert!(result.contains("src=\"a.png\""));
}

#[test]
fn test_text_escaping() {
    let result = render(vec![
        ComponentNode::new("t", "Text").with_prop("children", "a < b & {c}"),
        ComponentNode::new("l", "Link").with_prop("title", "say \"hi\""),
    ]);

    assert!(result.contains(r#">{"a < b & {c}"}</Text>"#));
    assert!(result.contains(r#"title={"say \"hi\""}"#));
}

#[test]
fn test_unknown_component_placeholder() {
    let result = render(vec![ComponentNode::new("x", "Carousel")]);

    assert!(result.contains(">Unknown component: Carousel</Text>"));
    assert!(result.contains("Text"));
}

#[test]
fn test_tailwind_wrapper_only_with_class_names() {
    let plain = render(vec![ComponentNode::new("t", "Text").with_prop("children", "x")]);
    assert!(!plain.contains("<Tailwind>"));

    let classed = render(vec![ComponentNode::new("t", "Text")
        .with_prop("children", "x")
        .with_class_name("text-center")]);
    assert!(classed.contains("<Tailwind>"));
    assert!(classed.contains("className=\"text-center\""));
    assert!(classed.contains("Tailwind, Text } from"));

    let opted_out = render_jsx(
        &ComponentTree::from_nodes(vec![ComponentNode::new("t", "Text").with_class_name("p-2")]),
        &GlobalStyles::default(),
        CompileOptions {
            tailwind_wrapper: false,
            ..CompileOptions::default()
        },
    );
    assert!(!opted_out.contains("<Tailwind>"));
}

#[test]
fn test_class_properties_drop_type_defaults() {
    let result = render(vec![ComponentNode::new("b", "Button")
        .with_prop("children", "Go")
        .with_prop("style", json!({ "color": "#111111" }))
        .with_class_name("bg-blue-600 px-8")]);

    assert!(result.contains(
        "style={{ borderRadius: \"4px\", color: \"#111111\", display: \"inline-block\", \
         textAlign: \"center\", textDecoration: \"none\" }} className=\"bg-blue-600 px-8\""
    ));
    assert!(!result.contains("#000000"));
}

#[test]
fn test_unknown_classes_keep_defaults() {
    let result = render(vec![ComponentNode::new("l", "Link")
        .with_prop("children", "x")
        .with_class_name("brand-link")]);

    assert!(result.contains("style={{ color: \"#2563eb\", textDecoration: \"underline\" }}"));
}

#[test]
fn test_code_block_theme_import() {
    let result = render(vec![ComponentNode::new("c", "CodeBlock")
        .with_prop("code", "let x = 1;\nlet y = 2;")
        .with_prop("language", "rust")
        .with_prop("theme", "unknown-theme")]);

    assert!(result.contains("theme={dracula}"));
    assert!(result.contains(r#"code={"let x = 1;\nlet y = 2;"}"#));
    assert!(result.contains("dracula"));
    assert!(result.contains("<CodeBlock "));
}

#[test]
fn test_responsive_head_styles() {
    let result = render(vec![ComponentNode::new("s", "Stats")
        .with_prop("stats", json!([{ "value": "1", "title": "One" }]))]);

    assert!(result.contains("<style>{\"@media only screen"));
    assert!(result.contains("</Head>"));
}

#[test]
fn test_compact_output() {
    let doc = VirtualEmailDocument {
        root: VNode::element(EmailTag::Html)
            .with_child(VNode::element(EmailTag::Body).with_child(VNode::text("Hi"))),
    };
    let result = compile_to_react(
        &doc,
        CompileOptions {
            pretty: false,
            component_name: "Welcome".to_string(),
            ..CompileOptions::default()
        },
    );

    assert!(result.contains("export default function Welcome() {"));
    assert!(result.contains("<Html><Body>Hi</Body></Html>"));
    assert_eq!(
        normalize_whitespace(&result),
        normalize_whitespace(
            "import { Body, Html } from \"@react-email/components\";
             export default function Welcome() { return ( <Html><Body>Hi</Body></Html> ); }"
        )
    );
}

#[test]
fn test_invalid_component_name_falls_back() {
    let doc = VirtualEmailDocument {
        root: VNode::element(EmailTag::Html),
    };
    let result = compile_to_react(
        &doc,
        CompileOptions {
            component_name: "my email".to_string(),
            ..CompileOptions::default()
        },
    );
    assert!(result.contains("export default function Email()"));
}

#[test]
fn test_deterministic() {
    let nodes = vec![
        ComponentNode::new("h", "Heading").with_prop("children", "Hi"),
        ComponentNode::new("g", "Gallery").with_prop("images", json!([{ "src": "a.png" }])),
    ];
    assert_eq!(render(nodes.clone()), render(nodes));
}
