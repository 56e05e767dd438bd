//! Degree-proportional attachment of a single new node.

use rand::Rng;
use tracing::trace;

use crate::error::{GraphError, Result};
use crate::graph::{GraphStore, NodeId};

/// Add one node to `graph` and connect it to existing nodes.
///
/// The new node gets id `max + 1`. Each existing node `v`, visited in
/// ascending id order, is linked with probability
/// `degree(v) / (2 * edge_count)`, where both terms are read at the moment
/// `v` is visited. Returns the id of the new node.
///
/// Fails with [`GraphError::DegenerateGraph`] when the graph has no edges;
/// the graph is not touched in that case.
pub fn attach_node<R: Rng + ?Sized>(graph: &mut GraphStore, rng: &mut R) -> Result<NodeId> {
    if graph.edge_count() == 0 {
        return Err(GraphError::DegenerateGraph);
    }
    // An edge implies at least two nodes.
    let new_id = graph.max_node_id().ok_or(GraphError::DegenerateGraph)? + 1;

    let existing: Vec<NodeId> = graph.nodes().collect();
    graph.add_node(new_id);

    for node in existing {
        let threshold = graph.degree(node)? as f64 / (2 * graph.edge_count()) as f64;
        let r: f64 = rng.gen();
        if r < threshold {
            graph.add_edge(new_id, node)?;
            trace!(new_id, node, threshold, "attached");
        }
    }

    Ok(new_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_always_connect_on_single_edge() {
        let mut graph = GraphStore::from_edges([0, 1], [(0, 1)]).unwrap();
        // Every draw is 0.0, below any positive threshold.
        let mut rng = StepRng::new(0, 0);

        let new_id = attach_node(&mut graph, &mut rng).unwrap();

        assert_eq!(new_id, 2);
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec![0, 1, 2]);
        let edges: Vec<_> = graph.edges().into_iter().collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_never_connect_adds_isolated_node() {
        let mut graph = GraphStore::from_edges([0, 1], [(0, 1)]).unwrap();
        // Draws just below 1.0, above a 0.5 threshold.
        let mut rng = StepRng::new(u64::MAX, 0);

        let new_id = attach_node(&mut graph, &mut rng).unwrap();

        assert_eq!(new_id, 2);
        assert_eq!(graph.degree(2).unwrap(), 0);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_degenerate_graph_is_untouched() {
        let mut graph = GraphStore::from_edges([0, 1, 2], []).unwrap();
        let mut rng = StepRng::new(0, 0);

        assert_eq!(
            attach_node(&mut graph, &mut rng),
            Err(GraphError::DegenerateGraph)
        );
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_new_id_follows_max_with_gaps() {
        let mut graph = GraphStore::from_edges([3, 10], [(3, 10)]).unwrap();
        let new_id = attach_node(&mut graph, &mut StepRng::new(0, 0)).unwrap();
        assert_eq!(new_id, 11);
    }

    #[test]
    fn test_growth_properties_on_random_graphs() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..50 {
            let mut graph = GraphStore::erdos_renyi(12, 0.3, &mut rng).unwrap();
            if graph.edge_count() == 0 {
                continue;
            }
            let before_nodes = graph.node_count();
            let before_edges = graph.edges();
            let max_id = graph.max_node_id().unwrap();

            let new_id = attach_node(&mut graph, &mut rng).unwrap();

            assert_eq!(new_id, max_id + 1);
            assert_eq!(graph.node_count(), before_nodes + 1);
            assert!(graph.edge_count() >= before_edges.len());
            // Only edges touching the new node were added.
            for edge in graph.edges().difference(&before_edges) {
                assert!(edge.0 == new_id || edge.1 == new_id);
            }
        }
    }
}
