//! Lineage report schema (stable v1)
//!
//! This schema is STABLE and VERSIONED.
//! Breaking changes require a new version.

use serde::{Deserialize, Serialize};

use crate::dataset::{DatasetRole, FlowDirection};
use crate::notification::Notification;
use crate::view::{LaidOutNode, StyledConnection};

/// Report schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportVersion {
    /// Major version (breaking changes)
    pub major: u32,

    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl ReportVersion {
    /// Current report schema version
    pub const CURRENT: ReportVersion = ReportVersion { major: 1, minor: 0 };
}

impl std::fmt::Display for ReportVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Summary statistics for a lineage report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReportSummary {
    /// Total datasets in the view
    pub datasets: usize,

    /// Total connections in the view
    pub connections: usize,

    /// Datasets classified as sources
    pub sources: usize,

    /// Datasets classified as destinations
    pub destinations: usize,

    /// Datasets classified as intermediates
    pub intermediates: usize,

    /// Edges rendered with the selected style
    pub selected_edges: usize,
}

/// Lineage report (report.json v1)
///
/// This is the stable output format.
/// All fields are versioned and backward-compatible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageReport {
    /// Schema version
    pub version: ReportVersion,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Flow direction the view was assembled for
    pub direction: FlowDirection,

    /// Summary statistics
    pub summary: ReportSummary,

    /// Laid-out dataset nodes
    pub nodes: Vec<LaidOutNode>,

    /// Styled connections
    pub edges: Vec<StyledConnection>,

    /// Notifications raised while assembling the view
    pub notifications: Vec<Notification>,
}

impl LineageReport {
    /// Create an empty report for a direction
    pub fn new(direction: FlowDirection) -> Self {
        Self {
            version: ReportVersion::CURRENT,
            timestamp: chrono::Utc::now().to_rfc3339(),
            direction,
            summary: ReportSummary::default(),
            nodes: Vec::new(),
            edges: Vec::new(),
            notifications: Vec::new(),
        }
    }

    /// Build a report from an assembled view
    pub fn from_view(
        direction: FlowDirection,
        nodes: Vec<LaidOutNode>,
        edges: Vec<StyledConnection>,
        notifications: Vec<Notification>,
    ) -> Self {
        let summary = ReportSummary {
            datasets: nodes.len(),
            connections: edges.len(),
            sources: nodes
                .iter()
                .filter(|n| n.role == DatasetRole::Source)
                .count(),
            destinations: nodes
                .iter()
                .filter(|n| n.role == DatasetRole::Destination)
                .count(),
            intermediates: nodes
                .iter()
                .filter(|n| n.role == DatasetRole::Intermediate)
                .count(),
            selected_edges: edges.iter().filter(|e| e.style.selected).count(),
        };

        Self {
            version: ReportVersion::CURRENT,
            timestamp: chrono::Utc::now().to_rfc3339(),
            direction,
            summary,
            nodes,
            edges,
            notifications,
        }
    }

    /// Whether the report carries any lineage data
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}
