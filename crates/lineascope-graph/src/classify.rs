//! Dataset role classification
//!
//! A dataset's role is a pure function of where it appears across the
//! connection list: only as a source, only as a destination, or both.

use std::collections::{HashMap, HashSet};

use lineascope_core::{Connection, DatasetId, DatasetRole};

/// Classify every dataset touched by the connection list
///
/// A dataset that appears only on the source side is a `Source`, only on
/// the destination side a `Destination`, and on both sides an
/// `Intermediate`. Empty input yields an empty map.
pub fn classify_roles(connections: &[Connection]) -> HashMap<DatasetId, DatasetRole> {
    let mut as_source: HashSet<&str> = HashSet::new();
    let mut as_destination: HashSet<&str> = HashSet::new();

    for conn in connections {
        as_source.insert(&conn.source_dataset);
        as_destination.insert(&conn.destination_dataset);
    }

    let mut roles = HashMap::new();
    for id in as_source.union(&as_destination) {
        let role = match (as_source.contains(id), as_destination.contains(id)) {
            (true, true) => DatasetRole::Intermediate,
            (true, false) => DatasetRole::Source,
            (false, true) => DatasetRole::Destination,
            // Unreachable: every id in the union is in at least one set
            (false, false) => DatasetRole::Unknown,
        };
        roles.insert(id.to_string(), role);
    }

    roles
}

/// Distinct dataset ids in first-appearance order
///
/// Sources are visited before destinations within each record, so the
/// ordering is stable for identical input.
pub fn dataset_ids(connections: &[Connection]) -> Vec<DatasetId> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut ids = Vec::new();

    for conn in connections {
        if seen.insert(&conn.source_dataset) {
            ids.push(conn.source_dataset.clone());
        }
        if seen.insert(&conn.destination_dataset) {
            ids.push(conn.destination_dataset.clone());
        }
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chain() -> Vec<Connection> {
        vec![
            Connection::new("A", "B", "r1"),
            Connection::new("B", "C", "r2"),
        ]
    }

    #[test]
    fn roles_for_simple_chain() {
        let roles = classify_roles(&chain());

        assert_eq!(roles.len(), 3);
        assert_eq!(roles["A"], DatasetRole::Source);
        assert_eq!(roles["B"], DatasetRole::Intermediate);
        assert_eq!(roles["C"], DatasetRole::Destination);
    }

    #[test]
    fn empty_input_yields_empty_map() {
        let roles = classify_roles(&[]);
        assert!(roles.is_empty());
        assert!(dataset_ids(&[]).is_empty());
    }

    #[test]
    fn classification_is_idempotent() {
        let connections = chain();
        assert_eq!(classify_roles(&connections), classify_roles(&connections));
    }

    #[test]
    fn node_set_matches_ids_touched_by_edges() {
        let connections = vec![
            Connection::new("A", "B", "r1"),
            Connection::new("C", "B", "r2"),
            Connection::new("B", "D", "r3"),
        ];
        let roles = classify_roles(&connections);

        // Every id touched by an edge is classified, and nothing else is.
        let mut touched: Vec<&str> = connections
            .iter()
            .flat_map(|c| [c.source_dataset.as_str(), c.destination_dataset.as_str()])
            .collect();
        touched.sort_unstable();
        touched.dedup();

        let mut classified: Vec<&str> = roles.keys().map(|k| k.as_str()).collect();
        classified.sort_unstable();

        assert_eq!(classified, touched);
    }

    #[test]
    fn self_loop_is_intermediate() {
        let roles = classify_roles(&[Connection::new("A", "A", "r1")]);
        assert_eq!(roles["A"], DatasetRole::Intermediate);
    }

    #[test]
    fn first_appearance_order() {
        let ids = dataset_ids(&[
            Connection::new("X", "Y", "r1"),
            Connection::new("W", "X", "r2"),
        ]);
        assert_eq!(ids, vec!["X", "Y", "W"]);
    }
}
