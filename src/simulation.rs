//! Growth simulation driver.
//!
//! Owns the graph, the random source and the metrics history. Each step
//! attaches one node and records a snapshot.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::attachment::attach_node;
use crate::error::Result;
use crate::graph::GraphStore;
use crate::metrics::{self, History};

/// Lifecycle of a simulation. `Complete` is never entered by the driver
/// itself; a caller decides when it is done with a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// Initial graph built, no steps taken.
    Ready,
    /// At least one step has been applied.
    Running,
}

pub struct NetworkSimulation<R: Rng = StdRng> {
    graph: GraphStore,
    history: History,
    rng: R,
    state: SimulationState,
}

impl NetworkSimulation<StdRng> {
    /// Start from an Erdos–Renyi graph generated with a seeded source.
    pub fn seeded(initial_size: usize, initial_probability: f64, seed: u64) -> Result<Self> {
        Self::new(
            initial_size,
            initial_probability,
            StdRng::seed_from_u64(seed),
        )
    }
}

impl<R: Rng> NetworkSimulation<R> {
    /// Start from an Erdos–Renyi graph on `initial_size` nodes.
    pub fn new(initial_size: usize, initial_probability: f64, mut rng: R) -> Result<Self> {
        let graph = GraphStore::erdos_renyi(initial_size, initial_probability, &mut rng)?;
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            initial_probability,
            "initial graph generated"
        );
        Ok(Self::from_graph(graph, rng))
    }

    /// Start from an existing graph.
    pub fn from_graph(graph: GraphStore, rng: R) -> Self {
        Self {
            graph,
            history: History::new(),
            rng,
            state: SimulationState::Ready,
        }
    }

    /// Attach one node and record the resulting metrics.
    pub fn step(&mut self) -> Result<()> {
        let new_id = attach_node(&mut self.graph, &mut self.rng)?;
        let snapshot = metrics::snapshot(&self.graph)?;
        debug!(
            step = self.history.len() + 1,
            new_id,
            nodes = snapshot.node_count,
            edges = snapshot.edge_count,
            average_degree = snapshot.average_degree,
            "step"
        );
        self.history.push(snapshot);
        self.state = SimulationState::Running;
        Ok(())
    }

    /// Apply `steps` steps in order. Steps completed before a failure stay
    /// in the history.
    pub fn run(&mut self, steps: usize) -> Result<()> {
        for _ in 0..steps {
            if let Err(e) = self.step() {
                warn!(steps_run = self.steps_run(), error = %e, "simulation stopped");
                return Err(e);
            }
        }
        if let Some(last) = self.history.last() {
            info!(
                steps_run = self.steps_run(),
                nodes = last.node_count,
                edges = last.edge_count,
                average_degree = last.average_degree,
                "simulation run finished"
            );
        }
        Ok(())
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn steps_run(&self) -> usize {
        self.history.len()
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Mutable access to the random source, e.g. to seed a layout after
    /// the run.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn into_parts(self) -> (GraphStore, History) {
        (self.graph, self.history)
    }
}
