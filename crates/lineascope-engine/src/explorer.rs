//! Explorer view assembly
//!
//! Turns a connection list into laid-out nodes and styled edges:
//! classify roles, derive the node set, run the injected layout engine,
//! merge positions back, and apply selection styling.

use lineascope_core::{
    Connection, DatasetRole, FlowDirection, HighlightConfig, LaidOutNode, LayoutConfig,
    LineageReport, Notification, StyledConnection,
};
use lineascope_graph::{classify_roles, dataset_ids};
use lineascope_layout::{LayoutEdge, LayoutEngine, LayoutNode, LayoutOptions};

use crate::selection::{style_connections, SelectionState};

/// An assembled, renderable lineage view
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerView {
    /// Flow direction the view was assembled for
    pub direction: FlowDirection,

    /// Dataset nodes with roles and positions
    pub nodes: Vec<LaidOutNode>,

    /// Connections with derived styles
    pub edges: Vec<StyledConnection>,
}

impl ExplorerView {
    /// Whether the view carries any lineage data
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Find a node by dataset id
    pub fn node(&self, id: &str) -> Option<&LaidOutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Convert into the stable report format
    pub fn into_report(self, notifications: Vec<Notification>) -> LineageReport {
        LineageReport::from_view(self.direction, self.nodes, self.edges, notifications)
    }
}

/// Assembles explorer views from connection lists
///
/// The layout engine is injected so alternate engines can be swapped in
/// without touching classification or styling.
pub struct ViewBuilder {
    layout_engine: Box<dyn LayoutEngine>,
    layout: LayoutConfig,
    highlight: HighlightConfig,
}

impl ViewBuilder {
    /// Create a builder around a layout engine, with default spacing
    /// and styling
    pub fn new(layout_engine: Box<dyn LayoutEngine>) -> Self {
        Self {
            layout_engine,
            layout: LayoutConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }

    /// Set layout spacing
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Set highlight styling
    pub fn with_highlight(mut self, highlight: HighlightConfig) -> Self {
        self.highlight = highlight;
        self
    }

    /// Assemble a view from a connection list
    ///
    /// The node set is derived from scratch on every call; nothing
    /// survives from previous assemblies. An empty connection list
    /// produces an empty view without invoking the layout engine.
    pub fn build(
        &self,
        connections: &[Connection],
        direction: FlowDirection,
        selection: &SelectionState,
    ) -> ExplorerView {
        if connections.is_empty() {
            return ExplorerView {
                direction,
                nodes: Vec::new(),
                edges: Vec::new(),
            };
        }

        let roles = classify_roles(connections);
        let mut nodes: Vec<LaidOutNode> = dataset_ids(connections)
            .into_iter()
            .map(|id| {
                let role = roles.get(&id).copied().unwrap_or(DatasetRole::Unknown);
                LaidOutNode::new(id, role, self.layout.node_width, self.layout.node_height)
            })
            .collect();

        let layout_nodes: Vec<LayoutNode> = nodes
            .iter()
            .map(|n| LayoutNode::new(n.id.clone(), n.width, n.height))
            .collect();
        let layout_edges: Vec<LayoutEdge> = connections
            .iter()
            .map(|c| LayoutEdge::new(c.source_dataset.clone(), c.destination_dataset.clone()))
            .collect();

        let options = LayoutOptions::new(direction)
            .with_rank_gap(self.layout.rank_gap)
            .with_node_gap(self.layout.node_gap);
        let positions = self
            .layout_engine
            .layout(&layout_nodes, &layout_edges, &options);

        // Merge positions back; every other node attribute stays as-is
        for node in &mut nodes {
            node.position = positions.get(&node.id).copied();
        }

        let edges = style_connections(connections, selection, &self.highlight);

        ExplorerView {
            direction,
            nodes,
            edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineascope_layout::LayeredLayout;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use lineascope_core::Position;

    /// Layout stub that counts invocations through a shared counter
    struct CountingLayout {
        calls: Arc<AtomicUsize>,
    }

    impl LayoutEngine for CountingLayout {
        fn layout(
            &self,
            nodes: &[LayoutNode],
            _edges: &[LayoutEdge],
            _options: &LayoutOptions,
        ) -> HashMap<String, Position> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            nodes
                .iter()
                .map(|n| (n.id.clone(), Position::new(0.0, 0.0)))
                .collect()
        }
    }

    fn counting_builder() -> (ViewBuilder, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let builder = ViewBuilder::new(Box::new(CountingLayout {
            calls: Arc::clone(&calls),
        }));
        (builder, calls)
    }

    fn chain() -> Vec<Connection> {
        vec![
            Connection::new("A", "B", "r1"),
            Connection::new("B", "C", "r2"),
        ]
    }

    #[test]
    fn empty_input_skips_layout() {
        let (builder, calls) = counting_builder();
        let view = builder.build(&[], FlowDirection::Forward, &SelectionState::new());

        assert!(view.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn assembles_roles_positions_and_styles() {
        let builder = ViewBuilder::new(Box::new(LayeredLayout));
        let mut selection = SelectionState::new();
        selection.select("r1");

        let view = builder.build(&chain(), FlowDirection::Forward, &selection);

        assert_eq!(view.nodes.len(), 3);
        assert_eq!(view.node("A").unwrap().role, DatasetRole::Source);
        assert_eq!(view.node("B").unwrap().role, DatasetRole::Intermediate);
        assert_eq!(view.node("C").unwrap().role, DatasetRole::Destination);

        // Every node got a position and they advance with the flow
        let ax = view.node("A").unwrap().position.unwrap().x;
        let bx = view.node("B").unwrap().position.unwrap().x;
        let cx = view.node("C").unwrap().position.unwrap().x;
        assert!(ax < bx && bx < cx);

        // Exactly one edge is highlighted
        assert_eq!(view.edges.iter().filter(|e| e.style.selected).count(), 1);
    }

    #[test]
    fn merge_preserves_node_attributes() {
        let layout = LayoutConfig {
            node_width: 200.0,
            node_height: 50.0,
            ..LayoutConfig::default()
        };
        let builder = ViewBuilder::new(Box::new(LayeredLayout)).with_layout(layout);

        let view = builder.build(&chain(), FlowDirection::Forward, &SelectionState::new());

        let node = view.node("B").unwrap();
        assert_eq!(node.label, "B");
        assert_eq!(node.width, 200.0);
        assert_eq!(node.height, 50.0);
        assert_eq!(node.role, DatasetRole::Intermediate);
        assert!(node.position.is_some());
    }

    #[test]
    fn rebuild_recomputes_node_set() {
        let builder = ViewBuilder::new(Box::new(LayeredLayout));
        let selection = SelectionState::new();

        let first = builder.build(&chain(), FlowDirection::Forward, &selection);
        assert_eq!(first.nodes.len(), 3);

        let second = builder.build(
            &[Connection::new("X", "Y", "r9")],
            FlowDirection::Forward,
            &selection,
        );

        // Nothing from the first assembly leaks into the second
        assert_eq!(second.nodes.len(), 2);
        assert!(second.node("A").is_none());
        assert_eq!(second.node("X").unwrap().role, DatasetRole::Source);
    }

    #[test]
    fn layout_runs_once_per_populated_build() {
        let (builder, calls) = counting_builder();

        builder.build(&chain(), FlowDirection::Forward, &SelectionState::new());
        builder.build(&[], FlowDirection::Forward, &SelectionState::new());

        // One call for the populated build, none for the empty one
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn report_roundtrip() {
        let builder = ViewBuilder::new(Box::new(LayeredLayout));
        let view = builder.build(&chain(), FlowDirection::Reverse, &SelectionState::new());

        let report = view.into_report(vec![]);
        assert_eq!(report.summary.datasets, 3);
        assert_eq!(report.summary.connections, 2);
        assert_eq!(report.direction, FlowDirection::Reverse);
    }
}
