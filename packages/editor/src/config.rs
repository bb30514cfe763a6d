use mailwright_model::registry::DEFAULT_COLUMN_GAP;
use mailwright_model::IdGenerator;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "mailwright.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Seed for generated node ids. A clock-based seed is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_prefix: Option<String>,

    /// Gap between columns of a newly resized row, in px
    #[serde(default = "default_column_gap")]
    pub default_column_gap: f64,

    /// Upper bound for a row's column count
    #[serde(default = "default_max_columns")]
    pub max_columns: usize,

    /// Undo levels kept per session
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Pretty-print exported JSX and HTML
    #[serde(default)]
    pub render_pretty: bool,
}

fn default_column_gap() -> f64 {
    DEFAULT_COLUMN_GAP
}

fn default_max_columns() -> usize {
    6
}

fn default_history_limit() -> usize {
    100
}

impl EditorConfig {
    /// Load config from a directory
    pub fn load(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: EditorConfig = serde_json::from_str(&content)?;
            Ok(config.normalized())
        } else {
            Ok(EditorConfig::default())
        }
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: EditorConfig = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    /// Id source for a session using this config.
    pub fn id_generator(&self) -> IdGenerator {
        match self.id_prefix.as_deref().map(str::trim) {
            Some(prefix) if !prefix.is_empty() => IdGenerator::from_seed(prefix),
            _ => IdGenerator::from_clock(),
        }
    }

    fn normalized(mut self) -> Self {
        self.max_columns = self.max_columns.max(1);
        if !self.default_column_gap.is_finite() || self.default_column_gap < 0.0 {
            self.default_column_gap = DEFAULT_COLUMN_GAP;
        }
        self
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            id_prefix: None,
            default_column_gap: default_column_gap(),
            max_columns: default_max_columns(),
            history_limit: default_history_limit(),
            render_pretty: false,
        }
    }
}
