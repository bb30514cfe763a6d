use crate::error::{CompileError, CompileResult};
use std::collections::HashSet;

/// A slice of markup, borrowed from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Character data, including the bodies of `<style>` and `<script>`.
    Text(&'a str),
    /// End tags, comments, doctypes. Copied through untouched.
    Markup(&'a str),
    StartTag(StartTag<'a>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag<'a> {
    pub name: &'a str,
    pub attributes: Vec<Attribute<'a>>,
    pub self_closing: bool,
    /// The tag exactly as written.
    pub raw: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub name: &'a str,
    /// Raw value without quotes. Entities are left encoded.
    pub value: Option<&'a str>,
}

impl<'a> StartTag<'a> {
    /// First attribute named `name`, ignoring ASCII case.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .and_then(|a| a.value)
    }
}

/// Split `html` into text, passthrough markup and start tags.
pub fn tokenize(html: &str) -> CompileResult<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < html.len() {
        let Some(rel) = html[pos..].find('<') else {
            tokens.push(Token::Text(&html[pos..]));
            break;
        };
        let start = pos + rel;
        if start > pos {
            tokens.push(Token::Text(&html[pos..start]));
        }

        let rest = &html[start..];
        if rest.starts_with("<!--") {
            let end = rest
                .find("-->")
                .ok_or(CompileError::UnterminatedComment { offset: start })?;
            pos = start + end + 3;
            tokens.push(Token::Markup(&html[start..pos]));
        } else if rest.starts_with("</") || rest.starts_with("<!") || rest.starts_with("<?") {
            let end = rest
                .find('>')
                .ok_or(CompileError::UnterminatedTag { offset: start })?;
            pos = start + end + 1;
            tokens.push(Token::Markup(&html[start..pos]));
        } else if rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
            let tag = parse_start_tag(html, start)?;
            pos = start + tag.raw.len();

            let raw_text = !tag.self_closing
                && (tag.name.eq_ignore_ascii_case("style") || tag.name.eq_ignore_ascii_case("script"));
            let close = format!("</{}", tag.name.to_ascii_lowercase());
            tokens.push(Token::StartTag(tag));

            if raw_text {
                let body = &html[pos..];
                let end = body.to_ascii_lowercase().find(&close).unwrap_or(body.len());
                if end > 0 {
                    tokens.push(Token::Text(&body[..end]));
                }
                pos += end;
            }
        } else {
            // A lone '<' is text.
            tokens.push(Token::Text(&html[start..start + 1]));
            pos = start + 1;
        }
    }

    Ok(tokens)
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b':' || b == b'_'
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn parse_start_tag(html: &str, start: usize) -> CompileResult<StartTag<'_>> {
    let bytes = html.as_bytes();
    let mut i = start + 1;
    while i < bytes.len() && is_name_byte(bytes[i]) {
        i += 1;
    }
    let name = &html[start + 1..i];
    let mut attributes = Vec::new();

    loop {
        i = skip_whitespace(bytes, i);
        if i >= bytes.len() {
            return Err(CompileError::UnterminatedTag { offset: start });
        }
        match bytes[i] {
            b'>' => {
                return Ok(StartTag {
                    name,
                    attributes,
                    self_closing: false,
                    raw: &html[start..i + 1],
                })
            }
            b'/' if bytes.get(i + 1) == Some(&b'>') => {
                return Ok(StartTag {
                    name,
                    attributes,
                    self_closing: true,
                    raw: &html[start..i + 2],
                })
            }
            b'/' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let attr_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'>' | b'/') {
            i += 1;
        }
        let attr_name = &html[attr_start..i];

        let j = skip_whitespace(bytes, i);
        if j >= bytes.len() || bytes[j] != b'=' {
            attributes.push(Attribute {
                name: attr_name,
                value: None,
            });
            continue;
        }

        let j = skip_whitespace(bytes, j + 1);
        let unterminated = || CompileError::UnterminatedAttribute {
            tag: name.to_string(),
            offset: attr_start,
        };
        if j >= bytes.len() {
            return Err(unterminated());
        }

        let value = match bytes[j] {
            quote @ (b'"' | b'\'') => {
                let close = html[j + 1..].find(quote as char).ok_or_else(unterminated)?;
                i = j + 1 + close + 1;
                &html[j + 1..j + 1 + close]
            }
            _ => {
                let mut k = j;
                while k < bytes.len()
                    && !bytes[k].is_ascii_whitespace()
                    && bytes[k] != b'>'
                    && !(bytes[k] == b'/' && bytes.get(k + 1) == Some(&b'>'))
                {
                    k += 1;
                }
                i = k;
                &html[j..k]
            }
        };
        attributes.push(Attribute {
            name: attr_name,
            value: Some(value),
        });
    }
}

/// Every unique class token in `html`, in order of first appearance.
pub fn extract_classes(html: &str) -> CompileResult<Vec<String>> {
    let mut seen = HashSet::new();
    let mut classes = Vec::new();

    for token in tokenize(html)? {
        let Token::StartTag(tag) = token else {
            continue;
        };
        for class in tag.attribute("class").unwrap_or_default().split_whitespace() {
            if seen.insert(class.to_string()) {
                classes.push(class.to_string());
            }
        }
    }

    Ok(classes)
}
