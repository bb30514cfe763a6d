//! Fallback declarations.
//!
//! The HTML target cannot know which classes a utility compiler resolves,
//! so elements carrying a class keep their type defaults in a
//! [`FALLBACK_ATTRIBUTE`] until utility compilation has run. This pass then
//! fills in each fallback declaration whose property the element's `style`
//! still leaves unset, and removes the attribute.

use crate::error::CompileResult;
use crate::inliner::{covers, push_attribute, split_declarations};
use crate::parser::{tokenize, StartTag, Token};
use tracing::debug;

/// Attribute holding an element's fallback declarations.
pub const FALLBACK_ATTRIBUTE: &str = "data-mw-fallback";

/// Merge every [`FALLBACK_ATTRIBUTE`] in `html` into its element's style.
pub fn apply_fallback_styles(html: &str) -> CompileResult<String> {
    let tokens = tokenize(html)?;
    let mut out = String::with_capacity(html.len());
    let mut applied = 0usize;

    for token in &tokens {
        match token {
            Token::Text(text) | Token::Markup(text) => out.push_str(text),
            Token::StartTag(tag) => match rewrite(tag) {
                Some(text) => {
                    out.push_str(&text);
                    applied += 1;
                }
                None => out.push_str(tag.raw),
            },
        }
    }

    debug!(elements = applied, "Applied fallback styles");
    Ok(out)
}

fn rewrite(tag: &StartTag<'_>) -> Option<String> {
    let fallback = split_declarations(tag.attribute(FALLBACK_ATTRIBUTE)?);
    let style = tag.attribute("style").map(split_declarations).unwrap_or_default();

    // Fallbacks go first so a later longhand from a class still wins.
    let mut declarations: Vec<&str> = fallback
        .iter()
        .filter(|(p, _)| !style.iter().any(|(sp, _)| sp == p || covers(sp, p)))
        .map(|(_, raw)| *raw)
        .collect();
    declarations.extend(style.iter().map(|(_, raw)| *raw));

    let mut text = format!("<{}", tag.name);
    for attr in &tag.attributes {
        if attr.name.eq_ignore_ascii_case(FALLBACK_ATTRIBUTE) || attr.name.eq_ignore_ascii_case("style") {
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
    if !declarations.is_empty() {
        push_attribute(&mut text, "style", &declarations.join(";"));
    }
    text.push_str(if tag.self_closing { " />" } else { ">" });

    Some(text)
}
