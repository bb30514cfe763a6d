//! Class-to-style inlining.
//!
//! For every start tag with a `class` attribute, recognised utility classes
//! are turned into declarations and merged into the tag's `style`
//! attribute. Existing inline declarations always win: a class declaration
//! is dropped when the inline style already sets the same property or a
//! shorthand covering it. Inlined classes are removed; unrecognised ones
//! (responsive hooks such as `mw-stack`, variants such as `sm:p-4`) stay.

use crate::error::CompileResult;
use crate::parser::{extract_classes, tokenize, StartTag, Token};
use crate::registry::resolve_class;
use tracing::debug;

/// Inline every recognised utility class in `html`.
pub fn inline_classes(html: &str) -> CompileResult<String> {
    let tokens = tokenize(html)?;
    let mut out = String::with_capacity(html.len());
    let mut inlined = 0usize;

    for token in &tokens {
        match token {
            Token::Text(text) | Token::Markup(text) => out.push_str(text),
            Token::StartTag(tag) => match rewrite(tag) {
                Some((text, count)) => {
                    out.push_str(&text);
                    inlined += count;
                }
                None => out.push_str(tag.raw),
            },
        }
    }

    debug!(classes = inlined, "Inlined utility classes");
    Ok(out)
}

/// Class tokens in `html` that the inliner leaves in place.
pub fn unresolved_classes(html: &str) -> CompileResult<Vec<String>> {
    Ok(extract_classes(html)?
        .into_iter()
        .filter(|c| resolve_class(c).is_none())
        .collect())
}

/// Rewritten tag text and the number of classes inlined, or `None` when
/// the tag has nothing to inline.
fn rewrite(tag: &StartTag<'_>) -> Option<(String, usize)> {
    let class_value = tag.attribute("class")?;

    let mut declarations: Vec<(String, String)> = Vec::new();
    let mut kept: Vec<&str> = Vec::new();
    let mut count = 0;
    for class in class_value.split_whitespace() {
        match resolve_class(class) {
            Some(rule) => {
                count += 1;
                for (property, value) in rule.declarations {
                    declarations.retain(|(p, _)| *p != property);
                    declarations.push((property, value));
                }
            }
            None => kept.push(class),
        }
    }
    if count == 0 {
        return None;
    }

    let inline = tag.attribute("style").map(split_declarations).unwrap_or_default();
    let mut style: Vec<String> = declarations
        .into_iter()
        .filter(|(p, _)| !inline.iter().any(|(ip, _)| ip == p || covers(ip, p)))
        .map(|(p, v)| format!("{}:{}", p, v))
        .collect();
    style.extend(inline.into_iter().map(|(_, raw)| raw.to_string()));

    let mut text = format!("<{}", tag.name);
    for attr in &tag.attributes {
        if attr.name.eq_ignore_ascii_case("class") || attr.name.eq_ignore_ascii_case("style") {
            continue;
        }
        match attr.value {
            Some(value) => push_attribute(&mut text, attr.name, value),
            None => {
                text.push(' ');
                text.push_str(attr.name);
            }
        }
    }
    if !kept.is_empty() {
        push_attribute(&mut text, "class", &kept.join(" "));
    }
    if !style.is_empty() {
        push_attribute(&mut text, "style", &style.join(";"));
    }
    text.push_str(if tag.self_closing { " />" } else { ">" });

    Some((text, count))
}

pub(crate) fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&value.replace('"', "&quot;"));
    out.push('"');
}

/// Whether setting `shorthand` inline overrides a class-provided `longhand`.
/// `border` does not reset radii.
pub(crate) fn covers(shorthand: &str, longhand: &str) -> bool {
    longhand
        .strip_prefix(shorthand)
        .is_some_and(|rest| rest.starts_with('-'))
        && !(shorthand == "border" && longhand.ends_with("radius"))
}

/// `(property, raw declaration)` pairs of a style attribute. Semicolons
/// that end an HTML entity such as `&quot;` do not split declarations.
pub(crate) fn split_declarations(style: &str) -> Vec<(String, &str)> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_entity = false;

    for (i, c) in style.char_indices() {
        match c {
            '&' => in_entity = true,
            ';' if in_entity => in_entity = false,
            ';' => {
                parts.push(&style[start..i]);
                start = i + 1;
            }
            c if in_entity && !(c.is_ascii_alphanumeric() || c == '#') => in_entity = false,
            _ => {}
        }
    }
    parts.push(&style[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter_map(|decl| {
            let (property, _) = decl.split_once(':')?;
            Some((property.trim().to_ascii_lowercase(), decl))
        })
        .collect()
}
