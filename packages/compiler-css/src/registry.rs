use super::colors;

/// Declarations produced by one utility class, in kebab-case CSS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub class: String,
    pub declarations: Vec<(String, String)>,
}

impl CssRule {
    fn new(class: &str, props: &[(&str, &str)]) -> Self {
        Self {
            class: class.to_string(),
            declarations: props
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn dynamic(class: &str, props: Vec<(String, String)>) -> Self {
        Self {
            class: class.to_string(),
            declarations: props,
        }
    }

    fn each(class: &str, props: &[&str], value: String) -> Self {
        Self::dynamic(
            class,
            props.iter().map(|p| (p.to_string(), value.clone())).collect(),
        )
    }
}

// ─── Public resolver ────────────────────────────────────────────────────────

/// Resolves a single utility class to its declarations.
///
/// Returns `None` for anything outside the email-safe subset, including
/// variant-prefixed classes such as `sm:p-4` or `hover:underline` that
/// cannot be expressed inline.
pub fn resolve_class(class: &str) -> Option<CssRule> {
    if class.contains(':') {
        return None;
    }
    resolve_display(class)
        .or_else(|| resolve_vertical_align(class))
        .or_else(|| resolve_typography(class))
        .or_else(|| resolve_spacing(class))
        .or_else(|| resolve_sizing(class))
        .or_else(|| resolve_rounded(class))
        .or_else(|| resolve_border(class))
        .or_else(|| resolve_opacity(class))
        .or_else(|| resolve_bg_color(class))
        .or_else(|| resolve_text(class))
}

// ─── Display ────────────────────────────────────────────────────────────────

fn resolve_display(class: &str) -> Option<CssRule> {
    let display = match class {
        "block"        => "block",
        "inline-block" => "inline-block",
        "inline"       => "inline",
        "table"        => "table",
        "table-cell"   => "table-cell",
        "table-row"    => "table-row",
        "hidden"       => "none",
        _ => return None,
    };
    Some(CssRule::new(class, &[("display", display)]))
}

fn resolve_vertical_align(class: &str) -> Option<CssRule> {
    let align = match class.strip_prefix("align-")? {
        "baseline" => "baseline",
        "top"      => "top",
        "middle"   => "middle",
        "bottom"   => "bottom",
        _ => return None,
    };
    Some(CssRule::new(class, &[("vertical-align", align)]))
}

// ─── Typography ─────────────────────────────────────────────────────────────

fn resolve_typography(class: &str) -> Option<CssRule> {
    let rule = match class {
        "italic"       => CssRule::new(class, &[("font-style", "italic")]),
        "not-italic"   => CssRule::new(class, &[("font-style", "normal")]),
        "underline"    => CssRule::new(class, &[("text-decoration", "underline")]),
        "line-through" => CssRule::new(class, &[("text-decoration", "line-through")]),
        "no-underline" => CssRule::new(class, &[("text-decoration", "none")]),
        "uppercase"    => CssRule::new(class, &[("text-transform", "uppercase")]),
        "lowercase"    => CssRule::new(class, &[("text-transform", "lowercase")]),
        "capitalize"   => CssRule::new(class, &[("text-transform", "capitalize")]),
        "normal-case"  => CssRule::new(class, &[("text-transform", "none")]),
        "whitespace-nowrap" => CssRule::new(class, &[("white-space", "nowrap")]),
        "whitespace-pre"    => CssRule::new(class, &[("white-space", "pre")]),
        "break-words"  => CssRule::new(class, &[("overflow-wrap", "break-word")]),
        "font-sans"    => CssRule::new(
            class,
            &[("font-family", "ui-sans-serif, system-ui, -apple-system, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif")],
        ),
        "font-serif"   => CssRule::new(class, &[("font-family", "ui-serif, Georgia, Cambria, 'Times New Roman', Times, serif")]),
        "font-mono"    => CssRule::new(class, &[("font-family", "ui-monospace, SFMono-Regular, Menlo, Consolas, monospace")]),
        _ => return resolve_font_weight(class)
            .or_else(|| resolve_leading(class))
            .or_else(|| resolve_tracking(class)),
    };
    Some(rule)
}

fn resolve_font_weight(class: &str) -> Option<CssRule> {
    let weight = match class.strip_prefix("font-")? {
        "thin"       => "100",
        "extralight" => "200",
        "light"      => "300",
        "normal"     => "400",
        "medium"     => "500",
        "semibold"   => "600",
        "bold"       => "700",
        "extrabold"  => "800",
        "black"      => "900",
        _ => return None,
    };
    Some(CssRule::new(class, &[("font-weight", weight)]))
}

fn resolve_leading(class: &str) -> Option<CssRule> {
    let val = class.strip_prefix("leading-")?;
    let css_val = match val {
        "none"    => "1".to_string(),
        "tight"   => "1.25".to_string(),
        "snug"    => "1.375".to_string(),
        "normal"  => "1.5".to_string(),
        "relaxed" => "1.625".to_string(),
        "loose"   => "2".to_string(),
        _ => resolve_spacing_or_arbitrary(val)?,
    };
    Some(CssRule::dynamic(class, vec![("line-height".into(), css_val)]))
}

fn resolve_tracking(class: &str) -> Option<CssRule> {
    let spacing = match class.strip_prefix("tracking-")? {
        "tighter" => "-0.05em",
        "tight"   => "-0.025em",
        "normal"  => "0",
        "wide"    => "0.025em",
        "wider"   => "0.05em",
        "widest"  => "0.1em",
        _ => return None,
    };
    Some(CssRule::new(class, &[("letter-spacing", spacing)]))
}

/// `text-*` covers alignment, size and color.
fn resolve_text(class: &str) -> Option<CssRule> {
    let val = class.strip_prefix("text-")?;

    let align = match val {
        "left" | "center" | "right" | "justify" => Some(val),
        "start" => Some("left"),
        "end" => Some("right"),
        _ => None,
    };
    if let Some(align) = align {
        return Some(CssRule::new(class, &[("text-align", align)]));
    }

    if let Some((size, line_height)) = font_size(val) {
        return Some(CssRule::new(
            class,
            &[("font-size", size), ("line-height", line_height)],
        ));
    }

    // text-[18px] is a size, text-[#333] a color.
    if let Some(inner) = arbitrary(val) {
        if is_color_literal(&inner) {
            return Some(CssRule::dynamic(class, vec![("color".into(), inner)]));
        }
        return Some(CssRule::dynamic(class, vec![("font-size".into(), inner)]));
    }

    resolve_color(val).map(|c| CssRule::dynamic(class, vec![("color".into(), c)]))
}

fn font_size(name: &str) -> Option<(&'static str, &'static str)> {
    let pair = match name {
        "xs"   => ("12px", "16px"),
        "sm"   => ("14px", "20px"),
        "base" => ("16px", "24px"),
        "lg"   => ("18px", "28px"),
        "xl"   => ("20px", "28px"),
        "2xl"  => ("24px", "32px"),
        "3xl"  => ("30px", "36px"),
        "4xl"  => ("36px", "40px"),
        "5xl"  => ("48px", "1"),
        "6xl"  => ("60px", "1"),
        "7xl"  => ("72px", "1"),
        "8xl"  => ("96px", "1"),
        "9xl"  => ("128px", "1"),
        _ => return None,
    };
    Some(pair)
}

// ─── Spacing (padding & margin) ─────────────────────────────────────────────

fn resolve_spacing(class: &str) -> Option<CssRule> {
    let (neg, rest) = match class.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, class),
    };

    let (props, val_str): (&[&str], &str) = if let Some(v) = rest.strip_prefix("p-") {
        (&["padding"], v)
    } else if let Some(v) = rest.strip_prefix("px-") {
        (&["padding-left", "padding-right"], v)
    } else if let Some(v) = rest.strip_prefix("py-") {
        (&["padding-top", "padding-bottom"], v)
    } else if let Some(v) = rest.strip_prefix("pt-") {
        (&["padding-top"], v)
    } else if let Some(v) = rest.strip_prefix("pr-") {
        (&["padding-right"], v)
    } else if let Some(v) = rest.strip_prefix("pb-") {
        (&["padding-bottom"], v)
    } else if let Some(v) = rest.strip_prefix("pl-") {
        (&["padding-left"], v)
    } else if let Some(v) = rest.strip_prefix("m-") {
        (&["margin"], v)
    } else if let Some(v) = rest.strip_prefix("mx-") {
        (&["margin-left", "margin-right"], v)
    } else if let Some(v) = rest.strip_prefix("my-") {
        (&["margin-top", "margin-bottom"], v)
    } else if let Some(v) = rest.strip_prefix("mt-") {
        (&["margin-top"], v)
    } else if let Some(v) = rest.strip_prefix("mr-") {
        (&["margin-right"], v)
    } else if let Some(v) = rest.strip_prefix("mb-") {
        (&["margin-bottom"], v)
    } else if let Some(v) = rest.strip_prefix("ml-") {
        (&["margin-left"], v)
    } else {
        return None;
    };

    let padding = props.iter().any(|p| p.starts_with("padding"));
    if neg && padding {
        return None;
    }

    if val_str == "auto" {
        if padding {
            return None;
        }
        return Some(CssRule::each(class, props, "auto".to_string()));
    }

    let base_val = resolve_spacing_or_arbitrary(val_str)?;
    let css_val = if neg && base_val != "0" {
        format!("-{}", base_val)
    } else {
        base_val
    };
    Some(CssRule::each(class, props, css_val))
}

// ─── Sizing ─────────────────────────────────────────────────────────────────

fn resolve_sizing(class: &str) -> Option<CssRule> {
    let (prop, val) = if let Some(v) = class.strip_prefix("w-") {
        ("width", v)
    } else if let Some(v) = class.strip_prefix("h-") {
        ("height", v)
    } else if let Some(v) = class.strip_prefix("min-w-") {
        ("min-width", v)
    } else if let Some(v) = class.strip_prefix("max-w-") {
        ("max-width", v)
    } else if let Some(v) = class.strip_prefix("min-h-") {
        ("min-height", v)
    } else if let Some(v) = class.strip_prefix("max-h-") {
        ("max-height", v)
    } else if let Some(v) = class.strip_prefix("size-") {
        let css_val = resolve_size_value(v)?;
        return Some(CssRule::each(class, &["width", "height"], css_val));
    } else {
        return None;
    };

    let css_val = match (prop, val) {
        (_, "none") if prop.starts_with("max-") => "none".to_string(),
        ("max-width", _) => max_width_value(val).or_else(|| resolve_size_value(val))?,
        _ => resolve_size_value(val)?,
    };
    Some(CssRule::dynamic(class, vec![(prop.into(), css_val)]))
}

fn max_width_value(val: &str) -> Option<String> {
    let width = match val {
        "xs"  => "320px",
        "sm"  => "384px",
        "md"  => "448px",
        "lg"  => "512px",
        "xl"  => "576px",
        "2xl" => "672px",
        "3xl" => "768px",
        "4xl" => "896px",
        "5xl" => "1024px",
        "6xl" => "1152px",
        "7xl" => "1280px",
        "prose" => "65ch",
        _ => return None,
    };
    Some(width.to_string())
}

fn resolve_size_value(val: &str) -> Option<String> {
    match val {
        "auto" => return Some("auto".into()),
        "px"   => return Some("1px".into()),
        "full" => return Some("100%".into()),
        "min"  => return Some("min-content".into()),
        "max"  => return Some("max-content".into()),
        "fit"  => return Some("fit-content".into()),
        _ => {}
    }

    // Fraction: "1/2", "2/3", etc.
    if let Some((num, den)) = val.split_once('/') {
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        if den == 0.0 {
            return None;
        }
        let s = format!("{:.6}", num / den * 100.0);
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        return Some(format!("{}%", trimmed));
    }

    resolve_spacing_or_arbitrary(val)
}

// ─── Borders ────────────────────────────────────────────────────────────────

fn resolve_rounded(class: &str) -> Option<CssRule> {
    let val = if class == "rounded" {
        ""
    } else {
        class.strip_prefix("rounded-")?
    };
    let radius = match val {
        "none" => "0".to_string(),
        "sm"   => "2px".to_string(),
        ""     => "4px".to_string(),
        "md"   => "6px".to_string(),
        "lg"   => "8px".to_string(),
        "xl"   => "12px".to_string(),
        "2xl"  => "16px".to_string(),
        "3xl"  => "24px".to_string(),
        "full" => "9999px".to_string(),
        _ => arbitrary(val)?,
    };
    Some(CssRule::dynamic(class, vec![("border-radius".into(), radius)]))
}

fn border_width(val: &str) -> Option<String> {
    match val {
        "" => Some("1px".into()),
        "0" | "2" | "4" | "8" => Some(if val == "0" { "0".into() } else { format!("{}px", val) }),
        _ => arbitrary(val).filter(|v| !is_color_literal(v)),
    }
}

fn resolve_border(class: &str) -> Option<CssRule> {
    let rest = if class == "border" {
        ""
    } else {
        class.strip_prefix("border-")?
    };

    let style = match rest {
        "solid" | "dashed" | "dotted" | "double" | "none" => Some(rest),
        _ => None,
    };
    if let Some(style) = style {
        return Some(CssRule::new(class, &[("border-style", style)]));
    }

    // border, border-2, border-t, border-t-2
    let (side, width) = match rest.split_once('-') {
        Some((side @ ("t" | "r" | "b" | "l" | "x" | "y"), w)) => (Some(side), w),
        _ if matches!(rest, "t" | "r" | "b" | "l" | "x" | "y") => (Some(rest), ""),
        _ => (None, rest),
    };
    if let Some(width) = border_width(width) {
        let sides: &[&str] = match side {
            None => &[""],
            Some("t") => &["-top"],
            Some("r") => &["-right"],
            Some("b") => &["-bottom"],
            Some("l") => &["-left"],
            Some("x") => &["-left", "-right"],
            Some(_) => &["-top", "-bottom"],
        };
        let mut decls = Vec::new();
        for s in sides {
            decls.push((format!("border{}-width", s), width.clone()));
            decls.push((format!("border{}-style", s), "solid".to_string()));
        }
        return Some(CssRule::dynamic(class, decls));
    }

    resolve_color(rest).map(|c| CssRule::dynamic(class, vec![("border-color".into(), c)]))
}

fn resolve_opacity(class: &str) -> Option<CssRule> {
    let val: u16 = class.strip_prefix("opacity-")?.parse().ok()?;
    if val > 100 {
        return None;
    }
    let css_val = if val == 100 {
        "1".to_string()
    } else {
        format!("{}", f64::from(val) / 100.0)
    };
    Some(CssRule::dynamic(class, vec![("opacity".into(), css_val)]))
}

// ─── Colors ─────────────────────────────────────────────────────────────────

fn resolve_bg_color(class: &str) -> Option<CssRule> {
    let val = class.strip_prefix("bg-")?;
    resolve_color(val).map(|c| CssRule::dynamic(class, vec![("background-color".into(), c)]))
}

/// `white`, `blue-500`, `blue-500/50`, `[#ff0000]`
fn resolve_color(val: &str) -> Option<String> {
    match val {
        "transparent" => return Some("transparent".into()),
        "current" => return Some("currentColor".into()),
        "inherit" => return Some("inherit".into()),
        "black" => return Some("#000000".into()),
        "white" => return Some("#ffffff".into()),
        _ => {}
    }

    if let Some(inner) = arbitrary(val) {
        return is_color_literal(&inner).then_some(inner);
    }

    let (color_part, opacity) = match val.rsplit_once('/') {
        Some((c, o)) => (c, Some(o)),
        None => (val, None),
    };

    let (color_name, shade_str) = color_part.rsplit_once('-')?;
    let shade: u16 = shade_str.parse().ok()?;
    let hex = colors::lookup(color_name, shade)?;

    match opacity {
        Some(op_str) => {
            let op = op_str.parse::<f64>().ok()? / 100.0;
            let (r, g, b) = colors::hex_to_rgb(hex)?;
            Some(format!("rgba({}, {}, {}, {})", r, g, b, op))
        }
        None => Some(hex.to_string()),
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Inner text of `[...]`, with `_` standing for a space.
fn arbitrary(val: &str) -> Option<String> {
    let inner = val.strip_prefix('[')?.strip_suffix(']')?;
    (!inner.is_empty()).then(|| inner.replace('_', " "))
}

fn is_color_literal(val: &str) -> bool {
    val.starts_with('#') || val.starts_with("rgb") || val.starts_with("hsl")
}

/// Spacing scale in px: one step is 4px, `px` is 1px.
fn spacing_value(val: &str) -> Option<String> {
    if val == "px" {
        return Some("1px".into());
    }
    let steps: f64 = val.parse().ok()?;
    if !steps.is_finite() || steps < 0.0 || (steps * 2.0).fract() != 0.0 {
        return None;
    }
    let px = steps * 4.0;
    Some(if px == 0.0 {
        "0".to_string()
    } else if px.fract() == 0.0 && px < 1e15 {
        format!("{}px", px as i64)
    } else {
        format!("{}px", px)
    })
}

fn resolve_spacing_or_arbitrary(val: &str) -> Option<String> {
    arbitrary(val).or_else(|| spacing_value(val))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
