//! Sugiyama-style layered layout
//!
//! Ranks are assigned by longest-path layering over a Kahn traversal,
//! orderings within ranks are refined by iterated barycenter sweeps, and
//! coordinates follow rank and order. All tie-breaking uses node
//! insertion order, so identical input produces identical output.

use std::collections::{HashMap, VecDeque};

use lineascope_core::{DatasetId, FlowDirection, Position};

use crate::engine::{LayoutEdge, LayoutEngine, LayoutNode, LayoutOptions};

/// The default layered layout engine
#[derive(Debug, Clone, Copy, Default)]
pub struct LayeredLayout;

impl LayoutEngine for LayeredLayout {
    fn layout(
        &self,
        nodes: &[LayoutNode],
        edges: &[LayoutEdge],
        options: &LayoutOptions,
    ) -> HashMap<DatasetId, Position> {
        if nodes.is_empty() {
            return HashMap::new();
        }

        let graph = IndexGraph::build(nodes, edges);
        let ranks = assign_ranks(&graph);
        let mut rank_order = build_rank_buckets(&ranks);
        minimize_crossings(&mut rank_order, &graph, options.max_sweeps);

        assign_coordinates(nodes, &rank_order, options)
    }
}

/// Adjacency lists over node indices (insertion order)
struct IndexGraph {
    n: usize,
    /// Forward edges: adj[u] = list of v where u -> v
    adj: Vec<Vec<usize>>,
    /// Reverse edges: rev[v] = list of u where u -> v
    rev: Vec<Vec<usize>>,
}

impl IndexGraph {
    fn build(nodes: &[LayoutNode], edges: &[LayoutEdge]) -> Self {
        let n = nodes.len();
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(n);
        for (i, node) in nodes.iter().enumerate() {
            index.entry(&node.id).or_insert(i);
        }

        let mut adj = vec![vec![]; n];
        let mut rev = vec![vec![]; n];

        // Edges referencing unknown nodes and self-loops are skipped
        for edge in edges {
            let source = index.get(edge.source.as_str());
            let target = index.get(edge.target.as_str());
            if let (Some(&u), Some(&v)) = (source, target) {
                if u != v {
                    adj[u].push(v);
                    rev[v].push(u);
                }
            }
        }

        // Sort adjacency lists by index for deterministic traversal
        for list in &mut adj {
            list.sort_unstable();
            list.dedup();
        }
        for list in &mut rev {
            list.sort_unstable();
            list.dedup();
        }

        Self { n, adj, rev }
    }
}

/// Assign ranks via longest-path layering
///
/// Nodes with no predecessors get rank 0; every other reachable node gets
/// 1 + max(rank of predecessors). Nodes left unvisited by the traversal
/// (cycle members) are placed on one rank past the deepest ranked node.
fn assign_ranks(graph: &IndexGraph) -> Vec<usize> {
    let n = graph.n;
    let mut in_degree: Vec<usize> = graph.rev.iter().map(|preds| preds.len()).collect();

    let mut queue: VecDeque<usize> = (0..n).filter(|&v| in_degree[v] == 0).collect();
    let mut ranks = vec![0usize; n];
    let mut visited = vec![false; n];
    let mut visited_count = 0usize;

    while let Some(u) = queue.pop_front() {
        visited[u] = true;
        visited_count += 1;

        for &v in &graph.adj[u] {
            ranks[v] = ranks[v].max(ranks[u] + 1);
            in_degree[v] -= 1;
            if in_degree[v] == 0 {
                queue.push_back(v);
            }
        }
    }

    if visited_count < n {
        let max_rank = ranks
            .iter()
            .zip(&visited)
            .filter(|(_, &seen)| seen)
            .map(|(&r, _)| r)
            .max()
            .unwrap_or(0);

        for (v, rank) in ranks.iter_mut().enumerate() {
            if !visited[v] {
                *rank = max_rank + 1;
            }
        }
    }

    ranks
}

/// Build rank buckets: rank_order[r] = node indices at rank r,
/// initially in insertion order
fn build_rank_buckets(ranks: &[usize]) -> Vec<Vec<usize>> {
    let max_rank = match ranks.iter().copied().max() {
        Some(max) => max,
        None => return vec![],
    };

    let mut buckets = vec![vec![]; max_rank + 1];
    for (v, &r) in ranks.iter().enumerate() {
        buckets[r].push(v);
    }
    buckets
}

/// Barycenter of a node relative to a fixed adjacent rank
///
/// Nodes with no neighbors in that rank sort last, keeping their
/// relative order.
fn barycenter(fixed_order: &[usize], neighbors: &[usize]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &nb in neighbors {
        if let Some(pos) = fixed_order.iter().position(|&x| x == nb) {
            sum += pos as f64;
            count += 1;
        }
    }

    if count == 0 {
        f64::MAX
    } else {
        sum / count as f64
    }
}

/// Reorder rank `r` by barycenters against rank `r - 1`
fn sweep_forward(rank_order: &mut [Vec<usize>], graph: &IndexGraph, r: usize) {
    let prev = rank_order[r - 1].clone();
    let mut scored: Vec<(usize, f64)> = rank_order[r]
        .iter()
        .map(|&v| (v, barycenter(&prev, &graph.rev[v])))
        .collect();

    // Stable sort keeps insertion order on ties
    scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    rank_order[r] = scored.into_iter().map(|(v, _)| v).collect();
}

/// Reorder rank `r` by barycenters against rank `r + 1`
fn sweep_backward(rank_order: &mut [Vec<usize>], graph: &IndexGraph, r: usize) {
    let next = rank_order[r + 1].clone();
    let mut scored: Vec<(usize, f64)> = rank_order[r]
        .iter()
        .map(|&v| (v, barycenter(&next, &graph.adj[v])))
        .collect();

    scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    rank_order[r] = scored.into_iter().map(|(v, _)| v).collect();
}

/// Count edge crossings between two adjacent ranks
fn count_crossings(rank_a: &[usize], rank_b: &[usize], graph: &IndexGraph) -> usize {
    let mut pos_b = vec![usize::MAX; graph.n];
    for (i, &v) in rank_b.iter().enumerate() {
        pos_b[v] = i;
    }

    let mut spans: Vec<(usize, usize)> = Vec::new();
    for (i, &u) in rank_a.iter().enumerate() {
        for &v in &graph.adj[u] {
            if pos_b[v] != usize::MAX {
                spans.push((i, pos_b[v]));
            }
        }
    }

    // Inversion count by brute force; rank sizes stay small
    let mut crossings = 0;
    for i in 0..spans.len() {
        for j in (i + 1)..spans.len() {
            let (a1, b1) = spans[i];
            let (a2, b2) = spans[j];
            if (a1 < a2 && b1 > b2) || (a1 > a2 && b1 < b2) {
                crossings += 1;
            }
        }
    }
    crossings
}

/// Total crossings across all adjacent rank pairs
fn total_crossings(rank_order: &[Vec<usize>], graph: &IndexGraph) -> usize {
    let mut total = 0;
    for r in 0..rank_order.len().saturating_sub(1) {
        total += count_crossings(&rank_order[r], &rank_order[r + 1], graph);
    }
    total
}

/// Iterated barycenter heuristic
///
/// Alternates forward and backward sweeps, keeping the best ordering
/// seen. Stops when a full iteration brings no improvement or the sweep
/// budget runs out.
fn minimize_crossings(rank_order: &mut Vec<Vec<usize>>, graph: &IndexGraph, max_sweeps: usize) {
    if rank_order.len() <= 1 {
        return;
    }

    let mut best_crossings = total_crossings(rank_order, graph);
    let mut best_order = rank_order.clone();

    for _ in 0..max_sweeps {
        if best_crossings == 0 {
            break;
        }

        for r in 1..rank_order.len() {
            sweep_forward(rank_order, graph, r);
        }
        for r in (0..rank_order.len() - 1).rev() {
            sweep_backward(rank_order, graph, r);
        }

        let crossings = total_crossings(rank_order, graph);
        if crossings < best_crossings {
            best_crossings = crossings;
            best_order = rank_order.clone();
        } else {
            break;
        }
    }

    *rank_order = best_order;
}

/// Map rank and in-rank order to top-left coordinates
///
/// Ranks advance along x; nodes stack along y, each rank centered
/// against the tallest one. `Reverse` mirrors the x axis so edges flow
/// right to left.
fn assign_coordinates(
    nodes: &[LayoutNode],
    rank_order: &[Vec<usize>],
    options: &LayoutOptions,
) -> HashMap<DatasetId, Position> {
    // Rank x offsets accumulate the widest node of each preceding rank
    let mut x_offsets = Vec::with_capacity(rank_order.len());
    let mut x = 0.0;
    for rank_nodes in rank_order {
        x_offsets.push(x);
        let max_width = rank_nodes
            .iter()
            .map(|&v| nodes[v].width)
            .fold(0.0_f64, f64::max);
        x += max_width + options.rank_gap;
    }

    let rank_heights: Vec<f64> = rank_order
        .iter()
        .map(|rank_nodes| {
            let boxes: f64 = rank_nodes.iter().map(|&v| nodes[v].height).sum();
            let gaps = rank_nodes.len().saturating_sub(1) as f64 * options.node_gap;
            boxes + gaps
        })
        .collect();
    let max_height = rank_heights.iter().copied().fold(0.0_f64, f64::max);

    let mut positions = HashMap::with_capacity(nodes.len());
    for (r, rank_nodes) in rank_order.iter().enumerate() {
        let mut y = (max_height - rank_heights[r]) / 2.0;
        for &v in rank_nodes {
            positions.insert(nodes[v].id.clone(), Position::new(x_offsets[r], y));
            y += nodes[v].height + options.node_gap;
        }
    }

    if options.direction == FlowDirection::Reverse {
        let total_width = nodes
            .iter()
            .filter_map(|node| positions.get(&node.id).map(|p| p.x + node.width))
            .fold(0.0_f64, f64::max);

        for node in nodes {
            if let Some(pos) = positions.get_mut(&node.id) {
                pos.x = total_width - (pos.x + node.width);
            }
        }
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn boxes(ids: &[&str]) -> Vec<LayoutNode> {
        ids.iter().map(|id| LayoutNode::new(*id, 100.0, 40.0)).collect()
    }

    fn chain_edges() -> Vec<LayoutEdge> {
        vec![LayoutEdge::new("A", "B"), LayoutEdge::new("B", "C")]
    }

    #[test]
    fn empty_graph_produces_no_positions() {
        let positions = LayeredLayout.layout(&[], &[], &LayoutOptions::default());
        assert!(positions.is_empty());
    }

    #[test]
    fn chain_flows_left_to_right() {
        let positions = LayeredLayout.layout(
            &boxes(&["A", "B", "C"]),
            &chain_edges(),
            &LayoutOptions::default(),
        );

        assert_eq!(positions.len(), 3);
        assert!(positions["A"].x < positions["B"].x);
        assert!(positions["B"].x < positions["C"].x);
    }

    #[test]
    fn reverse_mirrors_rank_axis() {
        let positions = LayeredLayout.layout(
            &boxes(&["A", "B", "C"]),
            &chain_edges(),
            &LayoutOptions::new(FlowDirection::Reverse),
        );

        assert!(positions["A"].x > positions["B"].x);
        assert!(positions["B"].x > positions["C"].x);
        // Mirroring keeps the layout anchored at zero
        assert_eq!(positions["C"].x, 0.0);
    }

    #[test]
    fn diamond_shares_middle_rank() {
        let positions = LayeredLayout.layout(
            &boxes(&["A", "B", "C", "D"]),
            &[
                LayoutEdge::new("A", "B"),
                LayoutEdge::new("A", "C"),
                LayoutEdge::new("B", "D"),
                LayoutEdge::new("C", "D"),
            ],
            &LayoutOptions::default(),
        );

        assert_eq!(positions["B"].x, positions["C"].x);
        assert!(positions["B"].y != positions["C"].y);
        assert!(positions["A"].x < positions["B"].x);
        assert!(positions["C"].x < positions["D"].x);
    }

    #[test]
    fn barycenter_sweep_removes_crossing() {
        // a->y and b->x cross in insertion order; one sweep uncrosses them
        let positions = LayeredLayout.layout(
            &boxes(&["a", "b", "x", "y"]),
            &[LayoutEdge::new("a", "y"), LayoutEdge::new("b", "x")],
            &LayoutOptions::default(),
        );

        assert!(positions["a"].y < positions["b"].y);
        assert!(positions["y"].y < positions["x"].y);
    }

    #[test]
    fn cycle_members_are_still_placed() {
        let positions = LayeredLayout.layout(
            &boxes(&["A", "B", "C"]),
            &[
                LayoutEdge::new("A", "B"),
                LayoutEdge::new("B", "C"),
                LayoutEdge::new("C", "B"),
            ],
            &LayoutOptions::default(),
        );

        assert_eq!(positions.len(), 3);
        // A ranks normally; the cycle members land past it
        assert!(positions["A"].x < positions["B"].x);
        assert!(positions["A"].x < positions["C"].x);
    }

    #[test]
    fn unknown_edge_endpoints_are_ignored() {
        let positions = LayeredLayout.layout(
            &boxes(&["A", "B"]),
            &[LayoutEdge::new("A", "B"), LayoutEdge::new("A", "ghost")],
            &LayoutOptions::default(),
        );

        assert_eq!(positions.len(), 2);
        assert!(!positions.contains_key("ghost"));
    }

    #[test]
    fn layout_is_deterministic() {
        let nodes = boxes(&["A", "B", "C", "D"]);
        let edges = vec![
            LayoutEdge::new("A", "C"),
            LayoutEdge::new("B", "C"),
            LayoutEdge::new("B", "D"),
        ];
        let options = LayoutOptions::default();

        let first = LayeredLayout.layout(&nodes, &edges, &options);
        let second = LayeredLayout.layout(&nodes, &edges, &options);
        assert_eq!(first, second);
    }

    #[test]
    fn wide_nodes_push_later_ranks_out() {
        let nodes = vec![
            LayoutNode::new("A", 300.0, 40.0),
            LayoutNode::new("B", 100.0, 40.0),
        ];
        let positions = LayeredLayout.layout(
            &nodes,
            &[LayoutEdge::new("A", "B")],
            &LayoutOptions::default().with_rank_gap(50.0),
        );

        assert_eq!(positions["A"].x, 0.0);
        assert_eq!(positions["B"].x, 350.0);
    }
}
