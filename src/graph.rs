//! Undirected simple graph keyed by integer node ids.
//!
//! Storage is a `petgraph` undirected graph; this wrapper keeps the id to
//! index mapping and enforces the simple-graph rules (no self-loops, no
//! parallel edges, edges only between known nodes). Iteration is always in
//! ascending node id so seeded runs are reproducible.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rand::Rng;

use crate::error::{GraphError, Result};

/// Node identifier. Ids are assigned by the caller and only need to be unique.
pub type NodeId = u64;

#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    inner: UnGraph<NodeId, ()>,
    /// Maps node id → petgraph NodeIndex, ordered by id.
    index: BTreeMap<NodeId, NodeIndex>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from explicit node and edge lists.
    pub fn from_edges(
        nodes: impl IntoIterator<Item = NodeId>,
        edges: impl IntoIterator<Item = (NodeId, NodeId)>,
    ) -> Result<Self> {
        let mut graph = Self::new();
        for id in nodes {
            graph.add_node(id);
        }
        for (a, b) in edges {
            graph.add_edge(a, b)?;
        }
        Ok(graph)
    }

    /// Generate an Erdos–Renyi graph on nodes `0..n`.
    ///
    /// Every pair `(i, j)` with `i < j` is visited in lexicographic order and
    /// kept when a uniform draw falls below `p`.
    pub fn erdos_renyi<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> Result<Self> {
        if n < 1 {
            return Err(GraphError::InvalidParameter(format!(
                "initial size must be at least 1, got {}",
                n
            )));
        }
        if !(0.0..=1.0).contains(&p) {
            return Err(GraphError::InvalidParameter(format!(
                "edge probability must be within [0, 1], got {}",
                p
            )));
        }

        let n = n as NodeId;
        let mut graph = Self::new();
        for id in 0..n {
            graph.add_node(id);
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if rng.gen::<f64>() < p {
                    graph.add_edge(i, j)?;
                }
            }
        }
        Ok(graph)
    }

    /// Add a node. Returns `false` if the id was already present.
    pub fn add_node(&mut self, id: NodeId) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        let idx = self.inner.add_node(id);
        self.index.insert(id, idx);
        true
    }

    /// Add an undirected edge. Returns `false` if the edge already existed.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<bool> {
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        let ia = self.node_index(a)?;
        let ib = self.node_index(b)?;
        if self.inner.find_edge(ia, ib).is_some() {
            return Ok(false);
        }
        self.inner.add_edge(ia, ib, ());
        Ok(true)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        match (self.index.get(&a), self.index.get(&b)) {
            (Some(&ia), Some(&ib)) => self.inner.find_edge(ia, ib).is_some(),
            _ => false,
        }
    }

    /// Node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.keys().copied()
    }

    /// Edges as `(low, high)` pairs.
    pub fn edges(&self) -> BTreeSet<(NodeId, NodeId)> {
        self.inner
            .edge_references()
            .map(|e| {
                let a = self.inner[e.source()];
                let b = self.inner[e.target()];
                (a.min(b), a.max(b))
            })
            .collect()
    }

    /// Number of edges incident to `id`.
    pub fn degree(&self, id: NodeId) -> Result<usize> {
        let idx = self.node_index(id)?;
        Ok(self.inner.edges(idx).count())
    }

    /// `(id, degree)` for every node, ascending by id.
    pub fn degrees(&self) -> Vec<(NodeId, usize)> {
        self.index
            .iter()
            .map(|(&id, &idx)| (id, self.inner.edges(idx).count()))
            .collect()
    }

    pub fn max_node_id(&self) -> Option<NodeId> {
        self.index.keys().next_back().copied()
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn node_index(&self, id: NodeId) -> Result<NodeIndex> {
        self.index
            .get(&id)
            .copied()
            .ok_or(GraphError::InvalidNode(id))
    }
}
