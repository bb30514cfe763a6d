use crate::compiler::kebab_case;
use crate::{compile_to_html, CompileOptions};
use mailwright_evaluator::{EmailTag, Evaluator, VNode, VirtualEmailDocument};
use mailwright_model::{ComponentNode, ComponentTree, GlobalStyles};
use pretty_assertions::assert_eq;
use serde_json::json;

fn render(nodes: Vec<ComponentNode>) -> String {
    let doc = Evaluator::new().evaluate(&ComponentTree::from_nodes(nodes), &GlobalStyles::default());
    let html = compile_to_html(&doc, CompileOptions::default());
    println!("Generated HTML:\n{}", html);
    html
}

#[test]
fn test_document_shape() {
    let html = render(vec![ComponentNode::new("t", "Text").with_prop("children", "Hello")]);

    assert!(html.starts_with("<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\""));
    assert!(html.contains("<html lang=\"en\" dir=\"ltr\">"));
    assert!(html.contains("<meta content=\"text/html; charset=UTF-8\" http-equiv=\"Content-Type\" />"));
    assert!(html.contains("<body style=\""));
    assert!(html.contains(">Hello</p>"));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn test_text_is_escaped() {
    let html = render(vec![ComponentNode::new("t", "Text").with_prop("children", "a < b & \"c\"")]);

    assert!(html.contains(">a &lt; b &amp; &quot;c&quot;</p>"));
    assert!(!html.contains("a < b"));
}

#[test]
fn test_layout_becomes_presentation_tables() {
    let html = render(vec![ComponentNode::new("s", "Section")
        .with_children(vec![ComponentNode::new("t", "Text").with_prop("children", "Inside")])]);

    assert!(html.contains(
        "<table align=\"center\" width=\"100%\" border=\"0\" cellpadding=\"0\" cellspacing=\"0\" role=\"presentation\""
    ));
    assert!(html.contains("<tbody style=\"width:100%\">"));
    assert!(html.contains("<tr style=\"width:100%\">"));
    assert!(html.contains(">Inside</p>"));
}

#[test]
fn test_row_columns_are_cells() {
    let html = render(vec![ComponentNode::new("r", "Row").with_children(vec![
        ComponentNode::new("c1", "Column").with_children(vec![]),
        ComponentNode::new("c2", "Column").with_children(vec![]),
        ComponentNode::new("t", "Text").with_prop("children", "Loose"),
    ])]);

    // Two columns plus one wrapper cell for the loose text, and the
    // container's own cell.
    assert_eq!(html.matches("<td").count(), 4);
    assert!(html.contains("<td style=\"vertical-align:top\"></td>"));
}

#[test]
fn test_column_outside_row_gets_a_row() {
    let html = render(vec![ComponentNode::new("c", "Column")
        .with_children(vec![ComponentNode::new("t", "Text").with_prop("children", "Alone")])]);

    let column = html.find(">Alone</p>").unwrap_or_default();
    let before = &html[..column];
    assert!(before.rfind("<tr").unwrap_or_default() > before.rfind("<table").unwrap_or_default());
}

#[test]
fn test_unknown_component_placeholder() {
    let html = render(vec![ComponentNode::new("x", "Carousel")]);

    assert!(html.contains(">Unknown component: Carousel</p>"));
    assert!(html.contains("border:1px dashed #fca5a5"));
}

#[test]
fn test_heading_level() {
    let html = render(vec![
        ComponentNode::new("h1", "Heading").with_prop("as", "h1").with_prop("children", "Big"),
        ComponentNode::new("h2", "Heading").with_prop("as", "h9").with_prop("children", "Default"),
    ]);

    assert!(html.contains(">Big</h1>"));
    assert!(html.contains(">Default</h2>"));
    assert!(!html.contains(" as=\""));
}

#[test]
fn test_image_attributes_are_filtered() {
    let html = render(vec![ComponentNode::new("i", "Image")
        .with_prop("src", "https://example.com/a.png")
        .with_prop("alt", "Logo")
        .with_prop("width", 120)
        .with_prop("onerror", "alert(1)")]);

    assert!(html.contains("<img "));
    assert!(html.contains("src=\"https://example.com/a.png\""));
    assert!(html.contains("alt=\"Logo\""));
    assert!(html.contains("width=\"120\""));
    assert!(!html.contains("onerror"));
    assert!(html.contains(" />"));
}

#[test]
fn test_button_and_link_open_in_new_tab() {
    let html = render(vec![
        ComponentNode::new("b", "Button")
            .with_prop("href", "https://example.com")
            .with_prop("children", "Go"),
        ComponentNode::new("l", "Link")
            .with_prop("href", "https://example.com/docs")
            .with_prop("target", "_self")
            .with_prop("children", "Docs"),
    ]);

    assert!(html.contains("<a href=\"https://example.com\" target=\"_blank\""));
    assert!(html.contains("display:inline-block"));
    assert!(html.contains("target=\"_self\""));
    assert_eq!(html.matches("target=").count(), 2);
}

#[test]
fn test_inline_styles_override_base_styles() {
    let html = render(vec![ComponentNode::new("t", "Text")
        .with_prop("children", "x")
        .with_prop("style", json!({ "fontSize": "20px" }))]);

    assert!(html.contains("style=\"font-size:20px;line-height:24px;margin:0 0 12px\">x</p>"));
    assert!(!html.contains("font-size:14px"));
}

#[test]
fn test_class_names_are_kept_for_the_utility_compiler() {
    let html = render(vec![ComponentNode::new("t", "Text")
        .with_prop("children", "x")
        .with_class_name("text-center p-4")]);

    assert!(html.contains(
        "<p class=\"text-center p-4\" data-mw-fallback=\"font-size:16px;line-height:24px;margin:0 0 12px\">x</p>"
    ));
}

#[test]
fn test_classed_element_keeps_only_inline_style_authoritative() {
    let html = render(vec![ComponentNode::new("b", "Button")
        .with_prop("children", "Go")
        .with_prop("style", json!({ "color": "#111111" }))
        .with_class_name("bg-blue-600")]);

    assert!(html.contains(
        "<a target=\"_blank\" class=\"bg-blue-600\" style=\"color:#111111\" \
         data-mw-fallback=\"background-color:#000000;border-radius:4px;display:inline-block;\
         line-height:100%;max-width:100%;padding:12px 20px;text-align:center;text-decoration:none\">Go</a>"
    ));
}

#[test]
fn test_stacking_rule_in_head() {
    let stats = render(vec![ComponentNode::new("s", "Stats")
        .with_prop("stats", json!([{ "value": "1", "title": "One" }, { "value": "2", "title": "Two" }]))]);
    let plain = render(vec![ComponentNode::new("t", "Text").with_prop("children", "x")]);

    let head_end = stats.find("</head>").unwrap_or_default();
    assert!(stats[..head_end].contains("<style>@media only screen and (max-width: 600px)"));
    assert!(stats.contains("class=\"mw-stack\""));
    assert!(!plain.contains("<style>"));
}

#[test]
fn test_code_block() {
    let html = render(vec![ComponentNode::new("c", "CodeBlock")
        .with_prop("code", "if a < b {\n    return;\n}")
        .with_prop("language", "rust")
        .with_prop("theme", "unknown")]);

    assert!(html.contains("<pre "));
    assert!(html.contains("background-color:#282a36"));
    assert!(html.contains("<code data-language=\"rust\">if a &lt; b {\n    return;\n}</code></pre>"));
}

#[test]
fn test_code_block_theme() {
    let html = render(vec![ComponentNode::new("c", "CodeBlock")
        .with_prop("code", "x")
        .with_prop("theme", "github")]);

    assert!(html.contains("background-color:#ffffff"));
    assert!(html.contains("color:#24292e"));
}

#[test]
fn test_markdown() {
    let html = render(vec![ComponentNode::new("m", "Markdown")
        .with_prop("children", "# Title\n\nSome **bold** and ~~old~~ text.")]);

    assert!(html.contains("<h1>Title</h1>"));
    assert!(html.contains("<strong>bold</strong>"));
    assert!(html.contains("<del>old</del>"));
}

#[test]
fn test_preview_is_hidden_and_first() {
    let long = "p".repeat(200);
    let html = render(vec![
        ComponentNode::new("t", "Text").with_prop("children", "Body text"),
        ComponentNode::new("p", "Preview").with_prop("children", long.as_str()),
    ]);

    assert!(html.contains("display:none"));
    assert!(html.contains(&format!(">{}</div>", "p".repeat(150))));
    assert!(!html.contains(&"p".repeat(151)));
    let preview = html.find("display:none").unwrap_or_default();
    let body_text = html.find("Body text").unwrap_or_default();
    assert!(preview < body_text);
}

#[test]
fn test_compact_output() {
    let doc = VirtualEmailDocument {
        root: VNode::element(EmailTag::Html).with_child(
            VNode::element(EmailTag::Body)
                .with_child(VNode::element(EmailTag::Hr))
                .with_child(VNode::text("Hi")),
        ),
    };
    let html = compile_to_html(&doc, CompileOptions::compact());

    assert!(!html.contains('\n'));
    assert!(html.ends_with(
        "<html lang=\"en\" dir=\"ltr\"><body><hr style=\"border:none;border-top:1px solid #eaeaea;width:100%\" />Hi</body></html>"
    ));
}

#[test]
fn test_custom_indent() {
    let doc = VirtualEmailDocument {
        root: VNode::element(EmailTag::Html).with_child(VNode::element(EmailTag::Body)),
    };
    let html = compile_to_html(
        &doc,
        CompileOptions {
            indent: "\t".to_string(),
            ..CompileOptions::default()
        },
    );

    assert!(html.contains("\n\t<body></body>\n"));
}

#[test]
fn test_kebab_case() {
    assert_eq!(kebab_case("backgroundColor"), "background-color");
    assert_eq!(kebab_case("borderTopLeftRadius"), "border-top-left-radius");
    assert_eq!(kebab_case("WebkitTextSizeAdjust"), "-webkit-text-size-adjust");
    assert_eq!(kebab_case("color"), "color");
    assert_eq!(kebab_case("line-height"), "line-height");
}

#[test]
fn test_deterministic() {
    let nodes = vec![
        ComponentNode::new("g", "Gallery")
            .with_prop("images", json!([{ "src": "a.png" }, { "src": "b.png" }, { "src": "c.png" }])),
        ComponentNode::new("s", "SocialIcons").with_prop("platforms", json!(["x", "github"])),
    ];
    assert_eq!(render(nodes.clone()), render(nodes));
}
