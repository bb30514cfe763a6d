//! # Live-Preview Utility Classes
//!
//! A deliberately small reader for the utility tokens users type into a
//! node's `className`. It covers what the live canvas needs to look right
//! while editing:
//!
//! - colors: `bg-[#hex]`, `bg-{name}`, `text-[#hex]`, `text-{name}`
//! - spacing: `p-N`, `px-N`, `py-N`, `pt/pr/pb/pl-N`, `m-N`, `mx-auto`, `my-N`, `mt/mb-N`
//!   and bracketed lengths such as `p-[12px]`
//! - text: `text-left|center|right|justify`, `text-[18px]`, `text-sm..text-4xl`
//! - weight: `font-light..font-black`
//!
//! Anything else is ignored here. Exported HTML goes through the full
//! utility compiler instead, so the two may disagree outside this grammar.

use crate::vdom::StyleMap;

/// Spacing scale step, in px.
const SPACING_UNIT: f64 = 4.0;

/// Parse every recognised token of `class_name` into style declarations.
/// Later tokens win over earlier ones.
pub fn parse_class_name(class_name: &str) -> StyleMap {
    let mut styles = StyleMap::new();
    for token in class_name.split_whitespace() {
        for (property, value) in parse_token(token) {
            styles.insert(property.to_string(), value);
        }
    }
    styles
}

/// Declarations produced by a single token. Empty for unknown tokens.
pub fn parse_token(token: &str) -> Vec<(&'static str, String)> {
    if let Some(rest) = token.strip_prefix("bg-") {
        return color_value(rest)
            .map(|c| vec![("backgroundColor", c)])
            .unwrap_or_default();
    }

    if let Some(rest) = token.strip_prefix("text-") {
        return text_token(rest);
    }

    if let Some(rest) = token.strip_prefix("font-") {
        return font_weight(rest)
            .map(|w| vec![("fontWeight", w.to_string())])
            .unwrap_or_default();
    }

    if token == "mx-auto" {
        return vec![("marginLeft", "auto".to_string()), ("marginRight", "auto".to_string())];
    }

    spacing_token(token).unwrap_or_default()
}

fn text_token(rest: &str) -> Vec<(&'static str, String)> {
    match rest {
        "left" | "center" | "right" | "justify" => return vec![("textAlign", rest.to_string())],
        _ => {}
    }

    if let Some(size) = named_font_size(rest) {
        return vec![("fontSize", size.to_string())];
    }

    if let Some(inner) = bracketed(rest) {
        if inner.starts_with('#') {
            return if is_hex_color(inner) {
                vec![("color", inner.to_string())]
            } else {
                Vec::new()
            };
        }
        if is_length(inner) {
            return vec![("fontSize", inner.to_string())];
        }
        return Vec::new();
    }

    named_color(rest)
        .map(|c| vec![("color", c.to_string())])
        .unwrap_or_default()
}

fn spacing_token(token: &str) -> Option<Vec<(&'static str, String)>> {
    let (prefix, value) = token.split_once('-')?;
    let properties: &[&'static str] = match prefix {
        "p" => &["padding"],
        "px" => &["paddingLeft", "paddingRight"],
        "py" => &["paddingTop", "paddingBottom"],
        "pt" => &["paddingTop"],
        "pr" => &["paddingRight"],
        "pb" => &["paddingBottom"],
        "pl" => &["paddingLeft"],
        "m" => &["margin"],
        "mx" => &["marginLeft", "marginRight"],
        "my" => &["marginTop", "marginBottom"],
        "mt" => &["marginTop"],
        "mb" => &["marginBottom"],
        _ => return None,
    };

    let length = spacing_length(value)?;
    Some(properties.iter().map(|p| (*p, length.clone())).collect())
}

fn spacing_length(value: &str) -> Option<String> {
    if let Some(inner) = bracketed(value) {
        return is_length(inner).then(|| inner.to_string());
    }
    let steps: f64 = value.parse().ok()?;
    if !steps.is_finite() || steps < 0.0 {
        return None;
    }
    let px = steps * SPACING_UNIT;
    Some(if px == 0.0 {
        "0".to_string()
    } else if px.fract() == 0.0 && px.abs() < 1e15 {
        format!("{}px", px as i64)
    } else {
        format!("{}px", px)
    })
}

fn color_value(value: &str) -> Option<String> {
    if let Some(inner) = bracketed(value) {
        return is_hex_color(inner).then(|| inner.to_string());
    }
    named_color(value).map(str::to_string)
}

fn bracketed(value: &str) -> Option<&str> {
    value.strip_prefix('[')?.strip_suffix(']')
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

fn is_length(value: &str) -> bool {
    let number = ["px", "rem", "em", "%"]
        .iter()
        .find_map(|unit| value.strip_suffix(unit));
    number.is_some_and(|n| n.parse::<f64>().is_ok())
}

/// Small fixed palette understood by the live preview.
pub fn named_color(name: &str) -> Option<&'static str> {
    let hex = match name {
        "white" => "#ffffff",
        "black" => "#000000",
        "transparent" => "transparent",
        "gray" => "#6b7280",
        "red" => "#ef4444",
        "orange" => "#f97316",
        "yellow" => "#eab308",
        "green" => "#22c55e",
        "blue" => "#3b82f6",
        "indigo" => "#6366f1",
        "purple" => "#a855f7",
        "pink" => "#ec4899",
        _ => return None,
    };
    Some(hex)
}

fn named_font_size(name: &str) -> Option<&'static str> {
    let size = match name {
        "xs" => "12px",
        "sm" => "14px",
        "base" => "16px",
        "lg" => "18px",
        "xl" => "20px",
        "2xl" => "24px",
        "3xl" => "30px",
        "4xl" => "36px",
        _ => return None,
    };
    Some(size)
}

fn font_weight(name: &str) -> Option<&'static str> {
    let weight = match name {
        "thin" => "100",
        "light" => "300",
        "normal" => "400",
        "medium" => "500",
        "semibold" => "600",
        "bold" => "bold",
        "extrabold" => "800",
        "black" => "900",
        _ => return None,
    };
    Some(weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_colors() {
        let styles = parse_class_name("bg-[#ff0000]");
        assert_eq!(styles["backgroundColor"], "#ff0000");

        let styles = parse_class_name("bg-white");
        assert_eq!(styles["backgroundColor"], "#ffffff");

        assert!(parse_class_name("bg-[#zzz]").is_empty());
    }

    #[test]
    fn test_text_tokens() {
        let styles = parse_class_name("text-center text-[18px] text-green");
        assert_eq!(styles["textAlign"], "center");
        assert_eq!(styles["fontSize"], "18px");
        assert_eq!(styles["color"], "#22c55e");

        let styles = parse_class_name("text-[#123abc] text-lg");
        assert_eq!(styles["color"], "#123abc");
        assert_eq!(styles["fontSize"], "18px");
    }

    #[test]
    fn test_non_finite_spacing_is_ignored() {
        for class in ["p-inf", "p-NaN", "p-1e400", "mt-infinity"] {
            assert!(parse_class_name(class).is_empty(), "{} produced a style", class);
        }
        assert_eq!(parse_class_name("p-1e20")["padding"], "400000000000000000000px");
    }

    #[test]
    fn test_spacing_tokens() {
        let styles = parse_class_name("p-4 px-2 my-0 mx-auto pt-[10px]");
        assert_eq!(styles["padding"], "16px");
        assert_eq!(styles["paddingLeft"], "8px");
        assert_eq!(styles["paddingRight"], "8px");
        assert_eq!(styles["marginTop"], "0");
        assert_eq!(styles["marginBottom"], "0");
        assert_eq!(styles["marginLeft"], "auto");
        assert_eq!(styles["paddingTop"], "10px");
    }

    #[test]
    fn test_font_weight() {
        assert_eq!(parse_class_name("font-bold")["fontWeight"], "bold");
        assert_eq!(parse_class_name("font-semibold")["fontWeight"], "600");
    }

    #[test]
    fn test_unknown_tokens_are_ignored() {
        assert!(parse_class_name("flex shadow-lg hover:bg-red rounded-full").is_empty());
    }

    #[test]
    fn test_last_token_wins() {
        assert_eq!(parse_class_name("text-red text-blue")["color"], "#3b82f6");
    }
}
