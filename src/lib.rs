//! Netgrow - random graphs, preferential-attachment growth and SVG charts.
//!
//! A [`NetworkSimulation`] starts from an Erdos–Renyi graph and adds one node
//! per step, linking it to existing nodes with probability proportional to
//! their degree. Per-step metrics are kept in a [`History`]; the `viz` and
//! `render` modules turn graphs and histories into SVG figures.

pub mod attachment;
pub mod config;
pub mod demo;
pub mod error;
pub mod graph;
pub mod layout;
pub mod metrics;
pub mod render;
pub mod simulation;
pub mod viz;

pub use crate::config::NetgrowConfig;
pub use error::GraphError;
pub use graph::{GraphStore, NodeId};
pub use metrics::{History, MetricsSnapshot};
pub use simulation::NetworkSimulation;
