//! Dataset, connection, and layer types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dataset identifier as it appears in lineage records
pub type DatasetId = String;

/// Transformation rule identifier
pub type RuleId = String;

/// Role of a dataset within a connection set
///
/// Derived from how the dataset appears across all connections:
/// only ever a source, only ever a destination, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetRole {
    /// Appears only on the source side of connections
    Source,

    /// Appears only on the destination side of connections
    Destination,

    /// Appears on both sides (flows through)
    Intermediate,

    /// Not seen in any connection
    Unknown,
}

impl std::fmt::Display for DatasetRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Destination => write!(f, "destination"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Flow direction for lineage queries and layout orientation
///
/// `Forward` follows data from sources to destinations (left to right);
/// `Reverse` mirrors the orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    Forward,
    Reverse,
}

impl FlowDirection {
    /// Stable string form, used in endpoint paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }
}

impl Default for FlowDirection {
    fn default() -> Self {
        Self::Forward
    }
}

impl std::fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A lineage connection: data flows from one dataset to another via a
/// named transformation rule
///
/// Immutable once fetched; presentation attributes are derived separately
/// and never written back onto the record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    /// Source dataset id
    pub source_dataset: DatasetId,

    /// Destination dataset id
    pub destination_dataset: DatasetId,

    /// Transformation rule linking the two
    #[serde(rename = "logical_transformation_rule_id")]
    pub rule_id: RuleId,
}

impl Connection {
    /// Create a new connection record
    pub fn new(
        source: impl Into<DatasetId>,
        destination: impl Into<DatasetId>,
        rule_id: impl Into<RuleId>,
    ) -> Self {
        Self {
            source_dataset: source.into(),
            destination_dataset: destination.into(),
            rule_id: rule_id.into(),
        }
    }
}

/// A named reporting layer and the datasets assigned to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageLayer {
    /// Layer name (e.g. "staging", "enriched", "reporting")
    pub layer: String,

    /// Datasets belonging to this layer
    pub datasets: Vec<DatasetId>,
}

/// Detail record for a transformation rule
///
/// The service returns a small fixed core plus backend-specific fields,
/// which are preserved as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationRule {
    /// Rule identifier
    pub rule_id: RuleId,

    /// Source dataset the rule reads from
    pub source_dataset: DatasetId,

    /// Destination dataset the rule writes to
    #[serde(default)]
    pub destination_dataset: Option<DatasetId>,

    /// Backend-specific rule attributes
    #[serde(flatten)]
    pub attributes: HashMap<String, serde_json::Value>,
}
