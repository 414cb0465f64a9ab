//! REST lineage client
//!
//! Talks to the lineage API: responses arrive in a `{ "data": ... }`
//! envelope, and a missing or null `data` field means "no data" rather
//! than an error.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use lineascope_core::{
    BackendConfig, Connection, FlowDirection, LineageLayer, TransformationRule,
};

use crate::backend::{FetchError, LineageBackend};

/// Response envelope used by all lineage endpoints
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    data: Option<T>,
}

/// Client for one lineage backend service
///
/// Explicitly constructed and passed to callers; one client per backend.
#[derive(Debug, Clone)]
pub struct RestLineageClient {
    name: String,
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl RestLineageClient {
    /// Create a client for a named backend
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    /// Create a client from a backend config entry
    pub fn from_config(name: impl Into<String>, config: &BackendConfig) -> Self {
        let mut client = Self::new(name, config.base_url.clone());
        client.token = config.token.clone();
        client
    }

    /// Set the bearer token sent with every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// GET an endpoint and unwrap its `{ data }` envelope
    async fn get_data<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, FetchError>
    where
        T: DeserializeOwned + Default,
    {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        tracing::debug!(backend = %self.name, %url, "lineage request");

        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        Ok(envelope.data.unwrap_or_default())
    }
}

/// Endpoint path for the layer listing
fn layers_path(direction: FlowDirection) -> String {
    format!("/api/v1/lineage/{}-layers/", direction.as_str())
}

/// Endpoint path for the path query
fn path_path(direction: FlowDirection) -> String {
    format!("/api/v1/lineage/{}-path/", direction.as_str())
}

/// Query parameter naming the starting dataset of a path query
fn path_param(direction: FlowDirection) -> &'static str {
    match direction {
        FlowDirection::Forward => "source_dataset",
        FlowDirection::Reverse => "destination_dataset",
    }
}

#[async_trait::async_trait]
impl LineageBackend for RestLineageClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_layers(
        &self,
        direction: FlowDirection,
    ) -> Result<Vec<LineageLayer>, FetchError> {
        self.get_data(&layers_path(direction), &[]).await
    }

    async fn fetch_path(
        &self,
        direction: FlowDirection,
        dataset: &str,
    ) -> Result<Vec<Connection>, FetchError> {
        self.get_data(&path_path(direction), &[(path_param(direction), dataset)])
            .await
    }

    async fn fetch_rule(
        &self,
        rule_id: &str,
        source_dataset: &str,
    ) -> Result<Vec<TransformationRule>, FetchError> {
        self.get_data(
            "/api/v1/lineage/transformation-rule/",
            &[("rule_id", rule_id), ("source_dataset", source_dataset)],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths() {
        assert_eq!(
            layers_path(FlowDirection::Forward),
            "/api/v1/lineage/forward-layers/"
        );
        assert_eq!(
            path_path(FlowDirection::Reverse),
            "/api/v1/lineage/reverse-path/"
        );
        assert_eq!(path_param(FlowDirection::Forward), "source_dataset");
        assert_eq!(path_param(FlowDirection::Reverse), "destination_dataset");
    }

    #[test]
    fn envelope_with_data() {
        let json = r#"{"data": [{"layer": "staging", "datasets": ["a", "b"]}]}"#;
        let envelope: Envelope<Vec<LineageLayer>> = serde_json::from_str(json).unwrap();
        let layers = envelope.data.unwrap_or_default();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].datasets, vec!["a", "b"]);
    }

    #[test]
    fn missing_data_field_means_empty() {
        let envelope: Envelope<Vec<Connection>> = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.unwrap_or_default().is_empty());

        let envelope: Envelope<Vec<Connection>> =
            serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(envelope.data.unwrap_or_default().is_empty());
    }

    #[test]
    fn client_carries_token_from_config() {
        let config = BackendConfig::new("https://reporting.internal").with_token("t0ken");
        let client = RestLineageClient::from_config("reporting", &config);

        assert_eq!(client.name(), "reporting");
        assert_eq!(client.token.as_deref(), Some("t0ken"));
    }
}
