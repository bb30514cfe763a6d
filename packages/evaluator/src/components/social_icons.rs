use super::{align_prop, str_prop, number_prop};
use crate::evaluator::Evaluator;
use crate::vdom::{EmailTag, VNode};
use mailwright_model::registry::px;
use mailwright_model::ComponentNode;
use serde_json::Value;
use tracing::debug;

/// A supported social network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub key: &'static str,
    pub label: &'static str,
    /// Icon slug on the icon CDN.
    pub slug: &'static str,
    /// Brand color, without the leading `#`.
    pub color: &'static str,
}

const fn p(key: &'static str, label: &'static str, slug: &'static str, color: &'static str) -> Platform {
    Platform {
        key,
        label,
        slug,
        color,
    }
}

pub static PLATFORMS: &[Platform] = &[
    p("facebook", "Facebook", "facebook", "1877F2"),
    p("x", "X", "x", "000000"),
    p("twitter", "Twitter", "x", "000000"),
    p("instagram", "Instagram", "instagram", "E4405F"),
    p("linkedin", "LinkedIn", "linkedin", "0A66C2"),
    p("youtube", "YouTube", "youtube", "FF0000"),
    p("tiktok", "TikTok", "tiktok", "000000"),
    p("github", "GitHub", "github", "181717"),
    p("pinterest", "Pinterest", "pinterest", "BD081C"),
    p("discord", "Discord", "discord", "5865F2"),
    p("threads", "Threads", "threads", "000000"),
    p("whatsapp", "WhatsApp", "whatsapp", "25D366"),
    p("telegram", "Telegram", "telegram", "26A5E4"),
    p("reddit", "Reddit", "reddit", "FF4500"),
    p("dribbble", "Dribbble", "dribbble", "EA4C89"),
    p("behance", "Behance", "behance", "1769FF"),
    p("medium", "Medium", "medium", "000000"),
    p("twitch", "Twitch", "twitch", "9146FF"),
    p("snapchat", "Snapchat", "snapchat", "FFFC00"),
    p("mastodon", "Mastodon", "mastodon", "6364FF"),
];

/// Look up a platform by key, case-insensitively.
pub fn platform(key: &str) -> Option<&'static Platform> {
    let key = key.trim().to_ascii_lowercase();
    PLATFORMS.iter().find(|p| p.key == key)
}

const ICON_CDN: &str = "https://cdn.simpleicons.org";

fn border_radius(shape: &str) -> &'static str {
    match shape {
        "rounded" => "20%",
        "square" => "0",
        _ => "50%",
    }
}

/// (background, icon foreground) for an icon style, both without `#`.
fn palette(style: &str, platform: &Platform) -> (&'static str, &'static str) {
    match style {
        "dark" => ("1a1a1a", "ffffff"),
        "light" => ("f4f4f5", platform.color),
        _ => (platform.color, "ffffff"),
    }
}

/// A `{ platform, url }` entry, or a bare platform key.
fn entry(value: &Value) -> Option<(&str, &str)> {
    match value {
        Value::String(key) => Some((key.as_str(), "#")),
        Value::Object(record) => {
            let key = record.get("platform").and_then(Value::as_str)?;
            let url = record
                .get("url")
                .and_then(Value::as_str)
                .filter(|u| !u.trim().is_empty())
                .unwrap_or("#");
            Some((key, url))
        }
        _ => None,
    }
}

pub(super) fn render(_ev: &Evaluator, node: &ComponentNode) -> VNode {
    let size = number_prop(node, "iconSize", 32.0).max(1.0);
    let spacing = number_prop(node, "spacing", 8.0).max(0.0);
    let shape = str_prop(node, "iconShape", "circle");
    let style = str_prop(node, "iconStyle", "colored");
    let align = align_prop(node, "center");

    let mut section = VNode::element(EmailTag::Section)
        .with_style("textAlign", align)
        .with_source(node.id.clone());

    for value in node.prop_list("platforms") {
        let Some((key, url)) = entry(value) else {
            continue;
        };
        let Some(platform) = platform(key) else {
            debug!(platform = key, node = %node.id, "skipping unknown social platform");
            continue;
        };

        let (background, foreground) = palette(style, platform);
        let icon = VNode::element(EmailTag::Img)
            .with_attr("src", format!("{}/{}/{}", ICON_CDN, platform.slug, foreground))
            .with_attr("alt", platform.label)
            .with_attr("width", px(size * 3.0 / 5.0))
            .with_attr("height", px(size * 3.0 / 5.0))
            .with_style("display", "block");

        let link = VNode::element(EmailTag::Link)
            .with_attr("href", url)
            .with_style("display", "inline-block")
            .with_style("backgroundColor", format!("#{}", background))
            .with_style("borderRadius", border_radius(shape))
            .with_style("padding", px(size / 5.0))
            .with_style("margin", format!("0 {}", px(spacing / 2.0)))
            .with_style("lineHeight", "0")
            .with_child(icon);

        section = section.with_child(link);
    }

    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_platform_lookup() {
        assert_eq!(platform("Facebook").map(|p| p.label), Some("Facebook"));
        assert_eq!(platform("twitter").map(|p| p.slug), Some("x"));
        assert!(platform("myspace").is_none());
    }

    #[test]
    fn test_unknown_platforms_are_skipped() {
        let node = ComponentNode::new("s", "SocialIcons").with_prop(
            "platforms",
            json!([
                { "platform": "facebook", "url": "https://facebook.com/acme" },
                { "platform": "myspace", "url": "https://myspace.com/acme" }
            ]),
        );
        let out = Evaluator::new().evaluate_node(&node);
        let links = out.find_all(EmailTag::Link);

        assert_eq!(links.len(), 1);
        assert_eq!(
            links[0].attr("href").and_then(Value::as_str),
            Some("https://facebook.com/acme")
        );
    }

    #[test]
    fn test_shape_and_style() {
        let node = ComponentNode::new("s", "SocialIcons")
            .with_prop("platforms", json!(["github"]))
            .with_prop("iconShape", "square")
            .with_prop("iconStyle", "light")
            .with_prop("iconSize", 40);
        let out = Evaluator::new().evaluate_node(&node);
        let link = out.find_all(EmailTag::Link)[0];
        let styles = link.styles().unwrap();

        assert_eq!(styles["borderRadius"], "0");
        assert_eq!(styles["backgroundColor"], "#f4f4f5");
        assert_eq!(styles["padding"], "8px");

        let img = out.find_all(EmailTag::Img)[0];
        assert_eq!(
            img.attr("src").and_then(Value::as_str),
            Some("https://cdn.simpleicons.org/github/181717")
        );
        assert_eq!(img.attr("width").and_then(Value::as_str), Some("24px"));
    }
}
