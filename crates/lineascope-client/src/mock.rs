//! Mock lineage backend for testing
//!
//! Returns canned lineage data without any network access. Useful for:
//! - Unit testing view assembly and classification
//! - Integration tests and demos without a running lineage service
//! - Simulating error conditions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lineascope_client::{LineageBackend, MockLineageBackend};
//! use lineascope_core::{Connection, FlowDirection};
//!
//! let backend = MockLineageBackend::new();
//! backend
//!     .add_path(
//!         FlowDirection::Forward,
//!         "raw.trades",
//!         vec![Connection::new("raw.trades", "staging.trades", "r1")],
//!     )
//!     .await;
//!
//! let fetched = backend.fetch_path(FlowDirection::Forward, "raw.trades").await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use lineascope_core::{
    Connection, DatasetId, FlowDirection, LineageLayer, RuleId, TransformationRule,
};

use crate::backend::{FetchError, LineageBackend};

/// Mock lineage backend
///
/// Stores canned responses in memory. Unknown datasets and rules return
/// empty results, matching the service's "no data" behavior.
pub struct MockLineageBackend {
    /// Layer listings per direction
    layers: Arc<RwLock<HashMap<FlowDirection, Vec<LineageLayer>>>>,

    /// Path connections per (direction, starting dataset)
    paths: Arc<RwLock<HashMap<(FlowDirection, DatasetId), Vec<Connection>>>>,

    /// Rule details per (rule id, source dataset)
    rules: Arc<RwLock<HashMap<(RuleId, DatasetId), Vec<TransformationRule>>>>,

    /// Error returned by every call while set
    error: Arc<RwLock<Option<FetchError>>>,

    /// Simulated latency (milliseconds)
    latency_ms: u64,

    /// Name to return from name()
    backend_name: &'static str,
}

impl MockLineageBackend {
    /// Create a mock backend with no canned data
    pub fn new() -> Self {
        Self {
            layers: Arc::new(RwLock::new(HashMap::new())),
            paths: Arc::new(RwLock::new(HashMap::new())),
            rules: Arc::new(RwLock::new(HashMap::new())),
            error: Arc::new(RwLock::new(None)),
            latency_ms: 0,
            backend_name: "Mock",
        }
    }

    /// Set the layer listing for a direction
    pub async fn add_layers(&self, direction: FlowDirection, layers: Vec<LineageLayer>) {
        self.layers.write().await.insert(direction, layers);
    }

    /// Set the path connections for a (direction, dataset) pair
    pub async fn add_path(
        &self,
        direction: FlowDirection,
        dataset: impl Into<DatasetId>,
        connections: Vec<Connection>,
    ) {
        self.paths
            .write()
            .await
            .insert((direction, dataset.into()), connections);
    }

    /// Add a transformation rule detail record
    pub async fn add_rule(&self, rule: TransformationRule) {
        self.rules
            .write()
            .await
            .entry((rule.rule_id.clone(), rule.source_dataset.clone()))
            .or_default()
            .push(rule);
    }

    /// Fail every subsequent call with the given error
    pub async fn fail_with(&self, error: FetchError) {
        *self.error.write().await = Some(error);
    }

    /// Stop failing calls
    pub async fn clear_failure(&self) {
        *self.error.write().await = None;
    }

    /// Configure simulated latency for all operations
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Set a custom backend name
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.backend_name = name;
        self
    }

    async fn simulate_latency(&self) {
        if self.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.latency_ms)).await;
        }
    }

    async fn check_failure(&self) -> Result<(), FetchError> {
        match self.error.read().await.as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl Default for MockLineageBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MockLineageBackend {
    fn clone(&self) -> Self {
        Self {
            layers: Arc::clone(&self.layers),
            paths: Arc::clone(&self.paths),
            rules: Arc::clone(&self.rules),
            error: Arc::clone(&self.error),
            latency_ms: self.latency_ms,
            backend_name: self.backend_name,
        }
    }
}

#[async_trait::async_trait]
impl LineageBackend for MockLineageBackend {
    fn name(&self) -> &str {
        self.backend_name
    }

    async fn fetch_layers(
        &self,
        direction: FlowDirection,
    ) -> Result<Vec<LineageLayer>, FetchError> {
        self.simulate_latency().await;
        self.check_failure().await?;

        Ok(self
            .layers
            .read()
            .await
            .get(&direction)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_path(
        &self,
        direction: FlowDirection,
        dataset: &str,
    ) -> Result<Vec<Connection>, FetchError> {
        self.simulate_latency().await;
        self.check_failure().await?;

        Ok(self
            .paths
            .read()
            .await
            .get(&(direction, dataset.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_rule(
        &self,
        rule_id: &str,
        source_dataset: &str,
    ) -> Result<Vec<TransformationRule>, FetchError> {
        self.simulate_latency().await;
        self.check_failure().await?;

        Ok(self
            .rules
            .read()
            .await
            .get(&(rule_id.to_string(), source_dataset.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}
