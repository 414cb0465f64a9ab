//! Configuration schema (lineascope.toml)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Connection settings for one lineage backend
///
/// Backends are always named explicitly; nothing is inferred from
/// ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the lineage service (e.g. "https://reporting.internal")
    pub base_url: String,

    /// Optional bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl BackendConfig {
    /// Create a backend config with no token
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Node box dimensions and spacing used by the layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Nominal node box width
    #[serde(default = "default_node_width")]
    pub node_width: f64,

    /// Nominal node box height
    #[serde(default = "default_node_height")]
    pub node_height: f64,

    /// Gap between adjacent ranks
    #[serde(default = "default_rank_gap")]
    pub rank_gap: f64,

    /// Gap between nodes within a rank
    #[serde(default = "default_node_gap")]
    pub node_gap: f64,
}

fn default_node_width() -> f64 {
    172.0
}

fn default_node_height() -> f64 {
    36.0
}

fn default_rank_gap() -> f64 {
    80.0
}

fn default_node_gap() -> f64 {
    24.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: default_node_width(),
            node_height: default_node_height(),
            rank_gap: default_rank_gap(),
            node_gap: default_node_gap(),
        }
    }
}

/// Edge stroke styling for selected and unselected edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// Default edge color
    #[serde(default = "default_edge_color")]
    pub default_color: String,

    /// Default edge stroke width
    #[serde(default = "default_edge_stroke")]
    pub default_stroke_width: f64,

    /// Color of edges carrying the selected rule
    #[serde(default = "default_selected_color")]
    pub selected_color: String,

    /// Stroke width of edges carrying the selected rule
    #[serde(default = "default_selected_stroke")]
    pub selected_stroke_width: f64,
}

fn default_edge_color() -> String {
    "#b1b1b7".to_string()
}

fn default_edge_stroke() -> f64 {
    1.0
}

fn default_selected_color() -> String {
    "#ff0072".to_string()
}

fn default_selected_stroke() -> f64 {
    3.0
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            default_color: default_edge_color(),
            default_stroke_width: default_edge_stroke(),
            selected_color: default_selected_color(),
            selected_stroke_width: default_selected_stroke(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Backend to use when none is named on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_backend: Option<String>,

    /// Named backend services
    #[serde(default)]
    pub backends: BTreeMap<String, BackendConfig>,

    /// Layout spacing
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Edge highlight styling
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_backend: None,
            backends: BTreeMap::new(),
            layout: LayoutConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Look up a backend by name, falling back to the configured default
    pub fn backend(&self, name: Option<&str>) -> Result<(&str, &BackendConfig), ConfigError> {
        let name = name
            .or(self.default_backend.as_deref())
            .ok_or(ConfigError::NoBackendSelected)?;

        self.backends
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| ConfigError::UnknownBackend(name.to_string()))
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("No backend selected and no default_backend configured")]
    NoBackendSelected,

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),
}
