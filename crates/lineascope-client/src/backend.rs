//! Lineage backend trait

use lineascope_core::{Connection, FlowDirection, LineageLayer, TransformationRule};

/// Errors that can occur when fetching lineage data
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned HTTP {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Trait for backends that serve lineage data
///
/// A failed fetch is reported, never retried; callers keep whatever data
/// they already had. An empty result is not an error.
#[async_trait::async_trait]
pub trait LineageBackend: Send + Sync {
    /// Backend name used in notifications and logs
    fn name(&self) -> &str;

    /// Fetch the layer listing for a direction
    async fn fetch_layers(
        &self,
        direction: FlowDirection,
    ) -> Result<Vec<LineageLayer>, FetchError>;

    /// Fetch the connections on the lineage path of a dataset
    ///
    /// `Forward` follows data out of the dataset, `Reverse` follows data
    /// into it.
    async fn fetch_path(
        &self,
        direction: FlowDirection,
        dataset: &str,
    ) -> Result<Vec<Connection>, FetchError>;

    /// Fetch transformation rule detail by rule id and source dataset
    async fn fetch_rule(
        &self,
        rule_id: &str,
        source_dataset: &str,
    ) -> Result<Vec<TransformationRule>, FetchError>;
}
