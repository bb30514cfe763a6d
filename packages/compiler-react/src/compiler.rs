use crate::context::{CompileOptions, CompilerContext};
use mailwright_compiler_css::resolve_class;
use mailwright_evaluator::{
    is_longhand_of, merge_layers, EmailTag, Evaluator, StyleMap, VNode, VirtualEmailDocument,
    STACK_CLASS, STACK_STYLES,
};
use mailwright_model::{ComponentTree, GlobalStyles};
use serde_json::Value;
use tracing::{debug, info};

const PACKAGE: &str = "@react-email/components";

/// Code themes exported by the component package.
const CODE_THEMES: &[&str] = &["dracula", "github", "nightOwl", "oneDark", "oneLight", "vsDark"];
const DEFAULT_CODE_THEME: &str = "dracula";

const PLACEHOLDER_STYLE: &str =
    "{{ color: \"#b91c1c\", backgroundColor: \"#fef2f2\", border: \"1px dashed #fca5a5\", padding: \"8px\" }}";

/// Evaluate `tree` and compile it to a JSX module.
pub fn render_jsx(tree: &ComponentTree, globals: &GlobalStyles, options: CompileOptions) -> String {
    info!(roots = tree.len(), "Rendering JSX");
    let doc = Evaluator::new().evaluate(tree, globals);
    compile_to_react(&doc, options)
}

/// Compile an evaluated document to a JSX module exporting one component.
pub fn compile_to_react(doc: &VirtualEmailDocument, options: CompileOptions) -> String {
    let ctx = CompilerContext::new(options);

    // Body first so imports reflect what was actually used.
    let body = ctx.with_new_buffer();
    body.indent();
    body.indent();
    compile_root(&doc.root, &body);
    body.dedent();
    body.dedent();

    compile_imports(&ctx);
    ctx.add_line(&format!(
        "export default function {}() {{",
        component_name(&ctx.options.component_name)
    ));
    ctx.indent();
    ctx.add_line("return (");
    ctx.merge_buffer(&body);
    if !ctx.options.pretty {
        ctx.add("\n");
    }
    ctx.add_line(");");
    ctx.dedent();
    ctx.add_line("}");

    ctx.get_output()
}

fn compile_imports(ctx: &CompilerContext) {
    ctx.add_line(&format!(
        "import {{ {} }} from \"{}\";",
        ctx.imports().join(", "),
        PACKAGE
    ));
    ctx.add("\n");
}

fn component_name(name: &str) -> &str {
    let valid = name.starts_with(|c: char| c.is_ascii_uppercase()) && is_identifier(name);
    if valid {
        name
    } else {
        "Email"
    }
}

/// `<Html>` with the optional `<Tailwind>` wrapper around its children.
fn compile_root(root: &VNode, ctx: &CompilerContext) {
    let tailwind = ctx.options.tailwind_wrapper && root.uses_class_names();
    let responsive = root.has_class(STACK_CLASS);
    if root.tag() != Some(EmailTag::Html) || !tailwind {
        compile_node(root, ctx, responsive);
        return;
    }

    debug!("Wrapping document in Tailwind");
    ctx.use_import("Html");
    ctx.use_import("Tailwind");
    ctx.add_markup(&format!("{}>", open_tag(root, ctx)));
    ctx.indent();
    ctx.add_markup("<Tailwind>");
    ctx.indent();
    for child in root.children() {
        compile_node(child, ctx, responsive);
    }
    ctx.dedent();
    ctx.add_markup("</Tailwind>");
    ctx.dedent();
    ctx.add_markup("</Html>");
}

fn compile_node(node: &VNode, ctx: &CompilerContext, responsive: bool) {
    match node {
        VNode::Text { content } => ctx.add_markup(&jsx_text(content)),

        VNode::Placeholder { kind, .. } => {
            ctx.use_import("Text");
            ctx.add_markup(&format!(
                "<Text style={}>{}</Text>",
                PLACEHOLDER_STYLE,
                jsx_text(&format!("Unknown component: {}", kind))
            ));
        }

        VNode::Element { tag, children, .. } => {
            let name = tag.component_name();
            ctx.use_import(name);
            let open = open_tag(node, ctx);

            if *tag == EmailTag::Head && responsive {
                ctx.add_markup(&format!("{}>", open));
                ctx.indent();
                ctx.add_markup(&format!("<style>{}</style>", jsx_expression(STACK_STYLES)));
                ctx.dedent();
                ctx.add_markup("</Head>");
            } else if tag.is_void() || children.is_empty() {
                ctx.add_markup(&format!("{} />", open));
            } else if children.iter().all(|c| matches!(c, VNode::Text { .. })) {
                let text: String = children.iter().map(|c| jsx_text(&c.text_content())).collect();
                ctx.add_markup(&format!("{}>{}</{}>", open, text, name));
            } else {
                ctx.add_markup(&format!("{}>", open));
                ctx.indent();
                for child in children {
                    compile_node(child, ctx, responsive);
                }
                ctx.dedent();
                ctx.add_markup(&format!("</{}>", name));
            }
        }
    }
}

/// `<Name attr=... style={{...}} className="..."` without the closing `>`.
fn open_tag(node: &VNode, ctx: &CompilerContext) -> String {
    let VNode::Element {
        tag,
        attributes,
        styles,
        default_styles,
        class_name,
        ..
    } = node
    else {
        return String::new();
    };

    let mut out = format!("<{}", tag.component_name());
    for (name, value) in attributes {
        if !is_attribute_name(name) {
            debug!(attribute = %name, "Skipping attribute that is not valid JSX");
            continue;
        }
        if *tag == EmailTag::CodeBlock && name == "theme" {
            let theme = value
                .as_str()
                .filter(|t| CODE_THEMES.contains(t))
                .unwrap_or(DEFAULT_CODE_THEME);
            ctx.use_import(theme);
            out.push_str(&format!(" theme={{{}}}", theme));
            continue;
        }
        if let Some(value) = attribute_value(value) {
            out.push_str(&format!(" {}={}", name, value));
        }
    }

    if *tag == EmailTag::CodeBlock && !attributes.contains_key("theme") {
        ctx.use_import(DEFAULT_CODE_THEME);
        out.push_str(&format!(" theme={{{}}}", DEFAULT_CODE_THEME));
    }

    let styles = match class_name {
        Some(class_name) => merge_layers(&unset_by_classes(default_styles, class_name), styles),
        None => merge_layers(default_styles, styles),
    };
    if !styles.is_empty() {
        // Markdown takes its container style under a dedicated prop.
        let prop = if *tag == EmailTag::Markdown {
            "markdownContainerStyles"
        } else {
            "style"
        };
        out.push_str(&format!(" {}={}", prop, style_object(&styles)));
    }

    if let Some(class_name) = class_name {
        out.push_str(&format!(" className={}", string_literal(class_name)));
    }

    out
}

/// Defaults for properties none of the utility classes in `class_name`
/// set. `style={{}}` outranks `className`, so a default left in place
/// would hide the class.
fn unset_by_classes(defaults: &StyleMap, class_name: &str) -> StyleMap {
    let from_classes: Vec<String> = class_name
        .split_whitespace()
        .filter_map(resolve_class)
        .flat_map(|rule| rule.declarations)
        .map(|(property, _)| camel_case(&property))
        .collect();

    defaults
        .iter()
        .filter(|(property, _)| {
            !from_classes.iter().any(|c| {
                c == *property || is_longhand_of(property, c) || is_longhand_of(c, property)
            })
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// `background-color` to `backgroundColor`.
fn camel_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut upper = false;
    for c in property.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn attribute_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(string_literal(s)),
        other => Some(format!("{{{}}}", other)),
    }
}

/// `"text"` when it can be written as a JSX attribute string, otherwise a
/// `{"..."}` expression.
fn string_literal(s: &str) -> String {
    if s.contains(['"', '\n', '\r']) {
        jsx_expression(s)
    } else {
        format!("\"{}\"", s)
    }
}

/// A JavaScript string expression in braces.
fn jsx_expression(s: &str) -> String {
    format!("{{{}}}", Value::from(s))
}

/// Text content, wrapped in an expression when it holds characters JSX
/// would interpret.
fn jsx_text(s: &str) -> String {
    if s.contains(['{', '}', '<', '>', '&', '\n', '\r']) || s.trim() != s {
        jsx_expression(s)
    } else {
        s.to_string()
    }
}

fn style_object(styles: &StyleMap) -> String {
    let entries: Vec<String> = styles
        .iter()
        .map(|(k, v)| {
            let key = if is_identifier(k) {
                k.clone()
            } else {
                Value::from(k.as_str()).to_string()
            };
            format!("{}: {}", key, Value::from(v.as_str()))
        })
        .collect();
    format!("{{{{ {} }}}}", entries.join(", "))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn is_attribute_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '-'))
}
