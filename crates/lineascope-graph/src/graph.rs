//! Lineage graph construction and traversal
//!
//! Builds forward and reverse adjacency for upstream/downstream analysis.

use std::collections::{HashMap, HashSet, VecDeque};

use lineascope_core::{Connection, DatasetId, FlowDirection};

/// Lineage graph with forward and reverse edges
#[derive(Debug, Clone)]
pub struct LineageGraph {
    /// Forward edges: dataset -> datasets it feeds
    forward: HashMap<DatasetId, Vec<DatasetId>>,

    /// Reverse edges: dataset -> datasets feeding it
    reverse: HashMap<DatasetId, Vec<DatasetId>>,

    /// All datasets in the graph
    nodes: HashSet<DatasetId>,

    /// The connection records the graph was built from
    connections: Vec<Connection>,
}

impl LineageGraph {
    /// Build a lineage graph from a connection list
    ///
    /// The node set is the union of all edge endpoints, so every edge's
    /// source and destination is always present.
    pub fn from_connections(connections: &[Connection]) -> Self {
        let mut forward: HashMap<DatasetId, Vec<DatasetId>> = HashMap::new();
        let mut reverse: HashMap<DatasetId, Vec<DatasetId>> = HashMap::new();
        let mut nodes: HashSet<DatasetId> = HashSet::new();

        for conn in connections {
            nodes.insert(conn.source_dataset.clone());
            nodes.insert(conn.destination_dataset.clone());

            forward
                .entry(conn.source_dataset.clone())
                .or_default()
                .push(conn.destination_dataset.clone());

            reverse
                .entry(conn.destination_dataset.clone())
                .or_default()
                .push(conn.source_dataset.clone());
        }

        Self {
            forward,
            reverse,
            nodes,
            connections: connections.to_vec(),
        }
    }

    /// Number of datasets in the graph
    pub fn dataset_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether a dataset appears in any connection
    pub fn contains(&self, dataset: &str) -> bool {
        self.nodes.contains(dataset)
    }

    /// The connection records the graph was built from
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Immediate upstream neighbors: the datasets feeding this one
    pub fn fed_by(&self, dataset: &str) -> Vec<&DatasetId> {
        self.reverse
            .get(dataset)
            .map(|ids| ids.iter().collect())
            .unwrap_or_default()
    }

    /// Immediate downstream neighbors: the datasets this one feeds
    pub fn feeds(&self, dataset: &str) -> Vec<&DatasetId> {
        self.forward
            .get(dataset)
            .map(|ids| ids.iter().collect())
            .unwrap_or_default()
    }

    /// All downstream datasets (transitive closure over forward edges)
    pub fn downstream(&self, dataset: &str) -> Vec<DatasetId> {
        self.traverse(dataset, &self.forward)
    }

    /// All upstream datasets (transitive closure over reverse edges)
    pub fn upstream(&self, dataset: &str) -> Vec<DatasetId> {
        self.traverse(dataset, &self.reverse)
    }

    /// BFS over one adjacency direction
    fn traverse(&self, start: &str, adjacency: &HashMap<DatasetId, Vec<DatasetId>>) -> Vec<DatasetId> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        let mut result = Vec::new();

        if let Some(neighbors) = adjacency.get(start) {
            for neighbor in neighbors {
                queue.push_back(neighbor.clone());
            }
        }

        while let Some(current) = queue.pop_front() {
            if visited.contains(&current) {
                continue;
            }

            visited.insert(current.clone());
            result.push(current.clone());

            if let Some(neighbors) = adjacency.get(&current) {
                for neighbor in neighbors {
                    if !visited.contains(neighbor) {
                        queue.push_back(neighbor.clone());
                    }
                }
            }
        }

        result
    }

    /// Check if data can flow from `source` to `target`
    pub fn has_path(&self, source: &str, target: &str) -> bool {
        self.downstream(source).iter().any(|id| id == target)
    }

    /// Connections reachable from a starting dataset in one direction
    ///
    /// `Forward` collects every connection on a path leaving `start`;
    /// `Reverse` collects every connection on a path into it. Matches the
    /// connection set the path endpoints return when computed server-side.
    pub fn path_connections(&self, start: &str, direction: FlowDirection) -> Vec<Connection> {
        let mut reachable: HashSet<DatasetId> = match direction {
            FlowDirection::Forward => self.downstream(start).into_iter().collect(),
            FlowDirection::Reverse => self.upstream(start).into_iter().collect(),
        };
        reachable.insert(start.to_string());

        self.connections
            .iter()
            .filter(|conn| match direction {
                FlowDirection::Forward => reachable.contains(&conn.source_dataset),
                FlowDirection::Reverse => reachable.contains(&conn.destination_dataset),
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> LineageGraph {
        // A feeds B and C, both feed D
        LineageGraph::from_connections(&[
            Connection::new("A", "B", "r1"),
            Connection::new("A", "C", "r2"),
            Connection::new("B", "D", "r3"),
            Connection::new("C", "D", "r4"),
        ])
    }

    #[test]
    fn node_set_is_union_of_endpoints() {
        let graph = diamond();
        assert_eq!(graph.dataset_count(), 4);
        for conn in graph.connections() {
            assert!(graph.contains(&conn.source_dataset));
            assert!(graph.contains(&conn.destination_dataset));
        }
    }

    #[test]
    fn immediate_neighbors() {
        let graph = diamond();

        let mut feeds = graph.feeds("A");
        feeds.sort();
        assert_eq!(feeds, vec!["B", "C"]);

        let mut fed_by = graph.fed_by("D");
        fed_by.sort();
        assert_eq!(fed_by, vec!["B", "C"]);

        assert!(graph.feeds("D").is_empty());
        assert!(graph.fed_by("A").is_empty());
    }

    #[test]
    fn downstream_closure() {
        let graph = diamond();
        let mut downstream = graph.downstream("A");
        downstream.sort();
        assert_eq!(downstream, vec!["B", "C", "D"]);
        assert!(graph.downstream("D").is_empty());
    }

    #[test]
    fn upstream_closure() {
        let graph = diamond();
        let mut upstream = graph.upstream("D");
        upstream.sort();
        assert_eq!(upstream, vec!["A", "B", "C"]);
        assert!(graph.upstream("A").is_empty());
    }

    #[test]
    fn path_checks() {
        let graph = diamond();
        assert!(graph.has_path("A", "D"));
        assert!(!graph.has_path("D", "A"));
        assert!(!graph.has_path("B", "C"));
    }

    #[test]
    fn forward_path_connections() {
        let graph = diamond();
        let path = graph.path_connections("B", FlowDirection::Forward);
        assert_eq!(path, vec![Connection::new("B", "D", "r3")]);
    }

    #[test]
    fn reverse_path_connections() {
        let graph = diamond();
        let mut path = graph.path_connections("B", FlowDirection::Reverse);
        path.sort_by(|a, b| a.rule_id.cmp(&b.rule_id));
        assert_eq!(path, vec![Connection::new("A", "B", "r1")]);
    }

    #[test]
    fn unknown_dataset_has_no_paths() {
        let graph = diamond();
        assert!(!graph.contains("Z"));
        assert!(graph.downstream("Z").is_empty());
        assert!(graph.path_connections("Z", FlowDirection::Forward).is_empty());
    }

    #[test]
    fn cycle_traversal_terminates() {
        let graph = LineageGraph::from_connections(&[
            Connection::new("A", "B", "r1"),
            Connection::new("B", "A", "r2"),
        ]);

        let mut downstream = graph.downstream("A");
        downstream.sort();
        // A reaches B, and B reaches back to A
        assert_eq!(downstream, vec!["A", "B"]);
    }
}
