use crate::context::{CompileOptions, Context};
use mailwright_compiler_css::FALLBACK_ATTRIBUTE;
use mailwright_evaluator::{
    merge_layers, AttributeMap, EmailTag, StyleMap, VNode, VirtualEmailDocument, STACK_CLASS,
    STACK_STYLES,
};
use pulldown_cmark::{html, Options, Parser};
use serde_json::Value;
use std::slice;
use tracing::debug;

const DOCTYPE: &str = "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" \
\"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">";

/// Attributes every layout table carries.
const TABLE_ATTRIBUTES: &[(&str, &str)] = &[
    ("align", "center"),
    ("width", "100%"),
    ("border", "0"),
    ("cellpadding", "0"),
    ("cellspacing", "0"),
    ("role", "presentation"),
];

const GLOBAL_ATTRIBUTES: &[&str] = &["id", "title", "dir", "lang"];

const PREVIEW_MAX_LENGTH: usize = 150;

const CONTAINER_STYLES: &[(&str, &str)] = &[("maxWidth", "37.5em")];
const TEXT_STYLES: &[(&str, &str)] = &[
    ("fontSize", "14px"),
    ("lineHeight", "24px"),
    ("margin", "16px 0"),
];
const BUTTON_STYLES: &[(&str, &str)] = &[
    ("display", "inline-block"),
    ("lineHeight", "100%"),
    ("maxWidth", "100%"),
    ("textDecoration", "none"),
];
const LINK_STYLES: &[(&str, &str)] = &[("color", "#067df7"), ("textDecoration", "none")];
const IMG_STYLES: &[(&str, &str)] = &[
    ("border", "none"),
    ("display", "block"),
    ("outline", "none"),
    ("textDecoration", "none"),
];
const HR_STYLES: &[(&str, &str)] = &[
    ("border", "none"),
    ("borderTop", "1px solid #eaeaea"),
    ("width", "100%"),
];
const PREVIEW_STYLES: &[(&str, &str)] = &[
    ("display", "none"),
    ("lineHeight", "1px"),
    ("maxHeight", "0"),
    ("maxWidth", "0"),
    ("opacity", "0"),
    ("overflow", "hidden"),
];
const PLACEHOLDER_STYLES: &[(&str, &str)] = &[
    ("backgroundColor", "#fef2f2"),
    ("border", "1px dashed #fca5a5"),
    ("color", "#b91c1c"),
    ("padding", "8px"),
];

/// Background and foreground per code theme, `dracula` first as the default.
const CODE_THEMES: &[(&str, &str, &str)] = &[
    ("dracula", "#282a36", "#f8f8f2"),
    ("github", "#ffffff", "#24292e"),
    ("nightOwl", "#011627", "#d6deeb"),
    ("oneDark", "#282c34", "#abb2bf"),
    ("oneLight", "#fafafa", "#383a42"),
    ("vsDark", "#1e1e1e", "#d4d4d4"),
];

/// Serialize an evaluated document to table-based, email-client-safe HTML.
///
/// Layout primitives become `role="presentation"` tables, styles are
/// written inline and class names are kept as `class` attributes for the
/// utility compiler to resolve afterwards. On elements with a class, type
/// defaults and base styles are held back in a `data-mw-fallback`
/// attribute so resolved classes can override them; see
/// [`mailwright_compiler_css::apply_fallback_styles`].
pub fn compile_to_html(doc: &VirtualEmailDocument, options: CompileOptions) -> String {
    let mut ctx = Context::new(options);
    let responsive = doc.root.has_class(STACK_CLASS);

    ctx.add_line(DOCTYPE);
    compile_node(&doc.root, &mut ctx, false, responsive);

    ctx.get_output()
}

fn compile_node(node: &VNode, ctx: &mut Context, in_row: bool, responsive: bool) {
    // Table rows only take cells.
    if in_row && node.tag() != Some(EmailTag::Column) {
        write_element(ctx, &Tag::new("td"), slice::from_ref(node), responsive);
        return;
    }

    match node {
        VNode::Text { content } => ctx.add_line(&escape_html(content)),

        VNode::Placeholder { kind, .. } => {
            debug!(kind = %kind, "Writing placeholder");
            let tag = Tag::new("p").with_styles(base_styles(PLACEHOLDER_STYLES));
            ctx.add_line(&format!(
                "{}Unknown component: {}{}",
                tag.open(),
                escape_html(kind),
                tag.close()
            ));
        }

        VNode::Element {
            tag,
            attributes,
            styles,
            default_styles,
            class_name,
            children,
            ..
        } => {
            let element = Element {
                tag: *tag,
                attributes,
                styles,
                default_styles,
                class_name: class_name.as_deref(),
                children,
            };
            compile_element(&element, ctx, in_row, responsive);
        }
    }
}

struct Element<'a> {
    tag: EmailTag,
    attributes: &'a AttributeMap,
    styles: &'a StyleMap,
    default_styles: &'a StyleMap,
    class_name: Option<&'a str>,
    children: &'a [VNode],
}

impl<'a> Element<'a> {
    /// HTML tag carrying this element's allowed attributes, class and
    /// styles. `base` and the type defaults only fill what the inline style
    /// leaves unset; with a class present they become fallbacks.
    fn html_tag(&self, name: &'a str, base: &[(&str, &str)]) -> Tag<'a> {
        let mut fallback = base_styles(base);
        fallback.extend(self.default_styles.iter().map(|(k, v)| (k.clone(), v.clone())));
        let merged = merge_layers(&fallback, self.styles);

        let mut tag = match self.class_name {
            Some(_) => {
                let mut tag = Tag::new(name).with_styles(self.styles.clone());
                tag.fallback = merged
                    .into_iter()
                    .filter(|(k, _)| !self.styles.contains_key(k))
                    .collect();
                tag
            }
            None => Tag::new(name).with_styles(merged),
        };
        tag.class_name = self.class_name;
        for (key, value) in self.attributes {
            if !is_allowed_attribute(self.tag, key) {
                continue;
            }
            if let Some(value) = attribute_text(value) {
                tag = tag.with_attr(key.as_str(), value);
            }
        }
        tag
    }

    fn attr_str(&self, key: &str) -> Option<&'a str> {
        self.attributes.get(key).and_then(Value::as_str)
    }
}

fn compile_element(el: &Element, ctx: &mut Context, in_row: bool, responsive: bool) {
    match el.tag {
        EmailTag::Html => {
            let mut tag = Tag::new("html");
            tag = tag.with_attr("lang", el.attr_str("lang").unwrap_or("en"));
            tag = tag.with_attr("dir", el.attr_str("dir").unwrap_or("ltr"));
            write_element(ctx, &tag, el.children, responsive);
        }

        EmailTag::Head => compile_head(el, ctx, responsive),

        EmailTag::Body => write_element(ctx, &el.html_tag("body", &[]), el.children, responsive),

        EmailTag::Preview => {
            let text: String = el
                .children
                .iter()
                .map(VNode::text_content)
                .collect::<String>()
                .chars()
                .take(PREVIEW_MAX_LENGTH)
                .collect();
            let tag = Tag::new("div").with_styles(base_styles(PREVIEW_STYLES));
            ctx.add_line(&format!("{}{}{}", tag.open(), escape_html(&text), tag.close()));
        }

        EmailTag::Container => {
            let table = table_tag(el.html_tag("table", CONTAINER_STYLES));
            write_table(ctx, &table, el.children, false, responsive);
        }

        EmailTag::Section => {
            let table = table_tag(el.html_tag("table", &[]));
            write_table(ctx, &table, el.children, false, responsive);
        }

        EmailTag::Row => {
            let table = table_tag(el.html_tag("table", &[]));
            write_table(ctx, &table, el.children, true, responsive);
        }

        EmailTag::Column if in_row => {
            write_element(ctx, &el.html_tag("td", &[]), el.children, responsive)
        }

        EmailTag::Column => {
            // A column outside a row gets a one-cell row of its own.
            let table = table_tag(Tag::new("table"));
            open_table(ctx, &table);
            compile_element(el, ctx, true, responsive);
            close_table(ctx, &table);
        }

        EmailTag::Heading => {
            let level = match el.attr_str("as") {
                Some(level @ ("h1" | "h2" | "h3" | "h4" | "h5" | "h6")) => level,
                _ => "h2",
            };
            write_element(ctx, &el.html_tag(level, &[]), el.children, responsive);
        }

        EmailTag::Text => write_element(ctx, &el.html_tag("p", TEXT_STYLES), el.children, responsive),

        EmailTag::Button => {
            let tag = with_default_target(el.html_tag("a", BUTTON_STYLES));
            write_element(ctx, &tag, el.children, responsive);
        }

        EmailTag::Link => {
            let tag = with_default_target(el.html_tag("a", LINK_STYLES));
            write_element(ctx, &tag, el.children, responsive);
        }

        EmailTag::Img => ctx.add_line(&el.html_tag("img", IMG_STYLES).self_closing()),

        EmailTag::Hr => ctx.add_line(&el.html_tag("hr", HR_STYLES).self_closing()),

        EmailTag::CodeBlock => compile_code_block(el, ctx),

        EmailTag::CodeInline => write_element(ctx, &el.html_tag("code", &[]), el.children, responsive),

        EmailTag::Markdown => {
            let source: String = el.children.iter().map(VNode::text_content).collect();
            let tag = el.html_tag("div", &[]);
            ctx.add_line(&tag.open());
            ctx.add(&markdown_to_html(&source));
            ctx.add_line(&tag.close());
        }
    }
}

fn compile_head(el: &Element, ctx: &mut Context, responsive: bool) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta content=\"text/html; charset=UTF-8\" http-equiv=\"Content-Type\" />");
    ctx.add_line("<meta name=\"x-apple-disable-message-reformatting\" />");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />");

    if responsive {
        ctx.add_line(&format!("<style>{}</style>", STACK_STYLES));
    }
    for child in el.children {
        compile_node(child, ctx, false, responsive);
    }

    ctx.dedent();
    ctx.add_line("</head>");
}

fn compile_code_block(el: &Element, ctx: &mut Context) {
    let code = el.attr_str("code").unwrap_or_default();
    let (_, background, foreground) = el
        .attr_str("theme")
        .and_then(|theme| CODE_THEMES.iter().find(|(name, _, _)| *name == theme))
        .unwrap_or(&CODE_THEMES[0]);

    let base = [
        ("backgroundColor", *background),
        ("borderRadius", "4px"),
        ("color", *foreground),
        ("fontFamily", "Menlo, Monaco, Consolas, \"Courier New\", monospace"),
        ("fontSize", "13px"),
        ("lineHeight", "1.5"),
        ("overflow", "auto"),
        ("padding", "16px"),
    ];
    let pre = el.html_tag("pre", &base);
    let mut code_tag = Tag::new("code");
    if let Some(language) = el.attr_str("language").filter(|l| !l.trim().is_empty()) {
        code_tag = code_tag.with_attr("data-language", language);
    }

    // Written on one line so indentation never leaks into the code.
    ctx.add_line(&format!(
        "{}{}{}{}{}",
        pre.open(),
        code_tag.open(),
        escape_html(code),
        code_tag.close(),
        pre.close()
    ));
}

/// `<table ...><tbody><tr>` around `children`. Rows place each child in
/// its own cell; every other layout puts all children in a single cell.
fn write_table(ctx: &mut Context, table: &Tag, children: &[VNode], cells: bool, responsive: bool) {
    open_table(ctx, table);
    if cells {
        for child in children {
            compile_node(child, ctx, true, responsive);
        }
    } else {
        write_element(ctx, &Tag::new("td"), children, responsive);
    }
    close_table(ctx, table);
}

fn open_table(ctx: &mut Context, table: &Tag) {
    ctx.add_line(&table.open());
    ctx.indent();
    ctx.add_line("<tbody style=\"width:100%\">");
    ctx.indent();
    ctx.add_line("<tr style=\"width:100%\">");
    ctx.indent();
}

fn close_table(ctx: &mut Context, table: &Tag) {
    ctx.dedent();
    ctx.add_line("</tr>");
    ctx.dedent();
    ctx.add_line("</tbody>");
    ctx.dedent();
    ctx.add_line(&table.close());
}

/// Element with text-only children on one line, otherwise one child per line.
fn write_element(ctx: &mut Context, tag: &Tag, children: &[VNode], responsive: bool) {
    if children.iter().all(|c| matches!(c, VNode::Text { .. })) {
        let text: String = children.iter().map(|c| escape_html(&c.text_content())).collect();
        ctx.add_line(&format!("{}{}{}", tag.open(), text, tag.close()));
        return;
    }

    ctx.add_line(&tag.open());
    ctx.indent();
    for child in children {
        compile_node(child, ctx, false, responsive);
    }
    ctx.dedent();
    ctx.add_line(&tag.close());
}

fn table_tag(mut tag: Tag) -> Tag {
    for (name, value) in TABLE_ATTRIBUTES {
        if !tag.attributes.iter().any(|(k, _)| k == name) {
            tag = tag.with_attr(*name, *value);
        }
    }
    tag
}

fn with_default_target(tag: Tag) -> Tag {
    if tag.attributes.iter().any(|(k, _)| *k == "target") {
        tag
    } else {
        tag.with_attr("target", "_blank")
    }
}

/// An HTML start tag under construction.
struct Tag<'a> {
    name: &'a str,
    attributes: Vec<(&'a str, String)>,
    class_name: Option<&'a str>,
    styles: StyleMap,
    fallback: StyleMap,
}

impl<'a> Tag<'a> {
    fn new(name: &'a str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            class_name: None,
            styles: StyleMap::new(),
            fallback: StyleMap::new(),
        }
    }

    fn with_attr(mut self, name: &'a str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    fn with_styles(mut self, styles: StyleMap) -> Self {
        self.styles = styles;
        self
    }

    fn open(&self) -> String {
        format!("<{}>", self.head())
    }

    fn self_closing(&self) -> String {
        format!("<{} />", self.head())
    }

    fn close(&self) -> String {
        format!("</{}>", self.name)
    }

    fn head(&self) -> String {
        let mut out = self.name.to_string();
        for (name, value) in &self.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
        }
        if let Some(class_name) = self.class_name {
            out.push_str(&format!(" class=\"{}\"", escape_html(class_name)));
        }
        if !self.styles.is_empty() {
            out.push_str(&format!(" style=\"{}\"", escape_html(&style_attribute(&self.styles))));
        }
        if !self.fallback.is_empty() {
            out.push_str(&format!(
                " {}=\"{}\"",
                FALLBACK_ATTRIBUTE,
                escape_html(&style_attribute(&self.fallback))
            ));
        }
        out
    }
}

fn base_styles(base: &[(&str, &str)]) -> StyleMap {
    base.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// `background-color:#fff;padding:0` from camelCase declarations.
fn style_attribute(styles: &StyleMap) -> String {
    styles
        .iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(k, v)| format!("{}:{}", kebab_case(k), v))
        .collect::<Vec<_>>()
        .join(";")
}

pub(crate) fn kebab_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn is_allowed_attribute(tag: EmailTag, name: &str) -> bool {
    let specific: &[&str] = match tag {
        EmailTag::Img => &["src", "alt", "width", "height"],
        EmailTag::Button | EmailTag::Link => &["href", "target", "rel"],
        EmailTag::Column => &["align", "valign", "width", "colspan"],
        _ => &[],
    };
    GLOBAL_ATTRIBUTES.contains(&name) || specific.contains(&name)
}

fn attribute_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn markdown_to_html(source: &str) -> String {
    let parser = Parser::new_ext(source, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
