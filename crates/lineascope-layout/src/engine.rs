//! Layout engine trait and input types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use lineascope_core::{DatasetId, FlowDirection, Position};

/// A node as the layout sees it: an id and a nominal box size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    /// Dataset id
    pub id: DatasetId,

    /// Box width
    pub width: f64,

    /// Box height
    pub height: f64,
}

impl LayoutNode {
    pub fn new(id: impl Into<DatasetId>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }
}

/// A directed edge between two layout nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEdge {
    /// Source node id
    pub source: DatasetId,

    /// Target node id
    pub target: DatasetId,
}

impl LayoutEdge {
    pub fn new(source: impl Into<DatasetId>, target: impl Into<DatasetId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Layout tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Flow orientation: `Forward` lays ranks out left to right,
    /// `Reverse` mirrors them
    pub direction: FlowDirection,

    /// Gap between adjacent ranks
    pub rank_gap: f64,

    /// Gap between nodes within a rank
    pub node_gap: f64,

    /// Maximum barycenter sweep iterations
    pub max_sweeps: usize,
}

impl LayoutOptions {
    /// Options for a direction with default spacing
    pub fn new(direction: FlowDirection) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Set the rank gap
    pub fn with_rank_gap(mut self, rank_gap: f64) -> Self {
        self.rank_gap = rank_gap;
        self
    }

    /// Set the in-rank node gap
    pub fn with_node_gap(mut self, node_gap: f64) -> Self {
        self.node_gap = node_gap;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: FlowDirection::Forward,
            rank_gap: 80.0,
            node_gap: 24.0,
            max_sweeps: 4,
        }
    }
}

/// A pluggable directed-graph layout
///
/// The contract: return a top-left position for every known node such
/// that edges flow along the rank axis in the requested direction, with
/// ties broken by insertion order. Implementations must not error; a
/// graph with cycles still gets every node placed.
pub trait LayoutEngine: Send + Sync {
    /// Compute positions for the given graph
    fn layout(
        &self,
        nodes: &[LayoutNode],
        edges: &[LayoutEdge],
        options: &LayoutOptions,
    ) -> HashMap<DatasetId, Position>;
}
