use serde::{Deserialize, Serialize};

pub const DEFAULT_BODY_BACKGROUND: &str = "#f4f4f5";
pub const DEFAULT_CONTAINER_BACKGROUND: &str = "#ffffff";
pub const DEFAULT_TEXT_COLOR: &str = "#1a1a1a";
pub const DEFAULT_MAX_WIDTH: &str = "600px";
pub const DEFAULT_FONT_FAMILY: &str =
    "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif";
pub const DEFAULT_FONT_SIZE: &str = "16px";
pub const DEFAULT_CONTAINER_PADDING: &str = "20px";

/// Document-wide settings applied as the outermost wrapper of a render.
///
/// Every field is optional on the wire; absent fields resolve through the
/// accessor methods to the documented defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_padding: Option<String>,
}

fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

impl GlobalStyles {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn body_background(&self) -> &str {
        or_default(&self.body_background, DEFAULT_BODY_BACKGROUND)
    }

    pub fn container_background(&self) -> &str {
        or_default(&self.container_background, DEFAULT_CONTAINER_BACKGROUND)
    }

    pub fn text_color(&self) -> &str {
        or_default(&self.text_color, DEFAULT_TEXT_COLOR)
    }

    pub fn max_width(&self) -> &str {
        or_default(&self.max_width, DEFAULT_MAX_WIDTH)
    }

    pub fn font_family(&self) -> &str {
        or_default(&self.font_family, DEFAULT_FONT_FAMILY)
    }

    pub fn font_size(&self) -> &str {
        or_default(&self.font_size, DEFAULT_FONT_SIZE)
    }

    pub fn container_padding(&self) -> &str {
        or_default(&self.container_padding, DEFAULT_CONTAINER_PADDING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_resolves_defaults() {
        let styles = GlobalStyles::from_json("{}").unwrap();

        assert_eq!(styles.body_background(), "#f4f4f5");
        assert_eq!(styles.container_background(), "#ffffff");
        assert_eq!(styles.max_width(), "600px");
        assert_eq!(styles.text_color(), "#1a1a1a");
        assert_eq!(styles.font_size(), "16px");
        assert_eq!(styles.container_padding(), "20px");
    }

    #[test]
    fn test_partial_object_keeps_overrides() {
        let styles =
            GlobalStyles::from_json(r##"{"bodyBackground":"#000000","maxWidth":"640px"}"##).unwrap();

        assert_eq!(styles.body_background(), "#000000");
        assert_eq!(styles.max_width(), "640px");
        assert_eq!(styles.container_background(), "#ffffff");
    }

    #[test]
    fn test_blank_value_falls_back() {
        let styles = GlobalStyles {
            font_size: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(styles.font_size(), "16px");
    }

    #[test]
    fn test_defaults_are_not_serialized() {
        assert_eq!(GlobalStyles::default().to_json().unwrap(), "{}");
    }
}
