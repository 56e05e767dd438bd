//! Summary statistics recorded while a network grows.
//!
//! A [`MetricsSnapshot`] is taken after every simulation step and appended
//! to a [`History`]. Snapshots are plain values; the history only grows.

use std::collections::BTreeMap;

use crate::error::{GraphError, Result};
use crate::graph::GraphStore;

/// Size and density of a graph at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of undirected edges.
    pub edge_count: usize,
    /// Mean node degree.
    pub average_degree: f64,
}

/// Compute a snapshot of `graph`.
///
/// Fails with [`GraphError::EmptyGraph`] when there are no nodes, since the
/// average degree is undefined.
pub fn snapshot(graph: &GraphStore) -> Result<MetricsSnapshot> {
    let node_count = graph.node_count();
    if node_count == 0 {
        return Err(GraphError::EmptyGraph);
    }
    let degree_sum: usize = graph.degrees().iter().map(|&(_, d)| d).sum();

    Ok(MetricsSnapshot {
        node_count,
        edge_count: graph.edge_count(),
        average_degree: degree_sum as f64 / node_count as f64,
    })
}

/// Each distinct degree with the number of nodes that have it, ascending.
pub fn degree_distribution(graph: &GraphStore) -> Vec<(usize, usize)> {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for (_, degree) in graph.degrees() {
        *counts.entry(degree).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Append-only sequence of snapshots, one per step.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<MetricsSnapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, snapshot: MetricsSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn last(&self) -> Option<&MetricsSnapshot> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricsSnapshot> {
        self.snapshots.iter()
    }

    pub fn as_slice(&self) -> &[MetricsSnapshot] {
        &self.snapshots
    }

    pub fn node_counts(&self) -> Vec<f64> {
        self.iter().map(|s| s.node_count as f64).collect()
    }

    pub fn edge_counts(&self) -> Vec<f64> {
        self.iter().map(|s| s.edge_count as f64).collect()
    }

    pub fn average_degrees(&self) -> Vec<f64> {
        self.iter().map(|s| s.average_degree).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_path_graph_snapshot() {
        let graph = GraphStore::from_edges(0..3, [(0, 1), (1, 2)]).unwrap();
        let snap = snapshot(&graph).unwrap();

        assert_eq!(snap.node_count, 3);
        assert_eq!(snap.edge_count, 2);
        assert_relative_eq!(snap.average_degree, 4.0 / 3.0);
    }

    #[test]
    fn test_snapshot_is_repeatable() {
        let graph = GraphStore::erdos_renyi(20, 0.2, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(snapshot(&graph).unwrap(), snapshot(&graph).unwrap());
    }

    #[test]
    fn test_average_degree_matches_handshake_lemma() {
        let mut rng = StdRng::seed_from_u64(11);
        for n in 1..25 {
            let graph = GraphStore::erdos_renyi(n, 0.25, &mut rng).unwrap();
            let snap = snapshot(&graph).unwrap();
            let expected = (2 * graph.edge_count()) as f64 / graph.node_count() as f64;
            assert_eq!(snap.average_degree, expected);
        }
    }

    #[test]
    fn test_empty_graph_has_no_snapshot() {
        assert_eq!(snapshot(&GraphStore::new()), Err(GraphError::EmptyGraph));
    }

    #[test]
    fn test_isolated_nodes_have_zero_average() {
        let graph = GraphStore::from_edges([4, 5], []).unwrap();
        assert_eq!(snapshot(&graph).unwrap().average_degree, 0.0);
    }

    #[test]
    fn test_degree_distribution_counts() {
        // Star with centre 0 plus one isolated node.
        let graph = GraphStore::from_edges(0..5, [(0, 1), (0, 2), (0, 3)]).unwrap();
        assert_eq!(degree_distribution(&graph), vec![(0, 1), (1, 3), (3, 1)]);
    }

    #[test]
    fn test_history_series() {
        let mut history = History::new();
        history.push(MetricsSnapshot {
            node_count: 3,
            edge_count: 2,
            average_degree: 4.0 / 3.0,
        });
        history.push(MetricsSnapshot {
            node_count: 4,
            edge_count: 3,
            average_degree: 1.5,
        });

        assert_eq!(history.len(), 2);
        assert_eq!(history.node_counts(), vec![3.0, 4.0]);
        assert_eq!(history.edge_counts(), vec![2.0, 3.0]);
        assert_eq!(history.last().map(|s| s.average_degree), Some(1.5));
    }
}
