//! Adapters from graph and history state to chart primitives.
//!
//! Nothing here draws; each function returns a [`Figure`] that a
//! [`Renderer`](crate::render::Renderer) turns into an image.

pub mod chart;

use std::collections::BTreeMap;

use crate::graph::{GraphStore, NodeId};
use crate::metrics::{degree_distribution, History};

pub use chart::{AxisScale, Figure, LabeledPoint, LineSegment, Panel, Point, Series};

/// Options for drawing a network.
#[derive(Debug, Clone, Default)]
pub struct NetworkStyle {
    /// Label each node with its id.
    pub labels: bool,
    pub title: Option<String>,
}

/// One segment per edge and one point per node.
///
/// Nodes or edge endpoints missing from `positions` are skipped.
pub fn network_figure(
    graph: &GraphStore,
    positions: &BTreeMap<NodeId, Point>,
    style: &NetworkStyle,
) -> Figure {
    let segments = graph
        .edges()
        .into_iter()
        .filter_map(|(a, b)| {
            Some(LineSegment {
                from: *positions.get(&a)?,
                to: *positions.get(&b)?,
            })
        })
        .collect();

    let points = graph
        .nodes()
        .filter_map(|id| {
            let at = *positions.get(&id)?;
            Some(LabeledPoint {
                at,
                label: style.labels.then(|| id.to_string()),
            })
        })
        .collect();

    Figure::single(Panel {
        title: style.title.clone(),
        segments,
        points,
        ..Panel::default()
    })
}

/// Node count, edge count and average degree against step number.
pub fn metrics_figure(history: &History) -> Figure {
    let panels = [
        ("Number of Nodes", history.node_counts()),
        ("Number of Edges", history.edge_counts()),
        ("Average Degree", history.average_degrees()),
    ]
    .into_iter()
    .map(|(title, values)| Panel {
        x_label: Some("Step".to_string()),
        axes: true,
        series: vec![step_series(title, &values)],
        ..Panel::titled(title)
    })
    .collect();

    Figure {
        title: None,
        panels,
    }
}

/// Entry `i` of a history is the state after step `i + 1`.
fn step_series(name: &str, values: &[f64]) -> Series {
    Series {
        name: name.to_string(),
        points: values
            .iter()
            .enumerate()
            .map(|(i, &v)| Point::new((i + 1) as f64, v))
            .collect(),
    }
}

/// Degree histogram on log-log axes.
///
/// Degree zero has no logarithm, so isolated nodes are left out.
pub fn degree_distribution_figure(graph: &GraphStore) -> Figure {
    let points = degree_distribution(graph)
        .into_iter()
        .filter(|&(degree, _)| degree > 0)
        .map(|(degree, count)| LabeledPoint {
            at: Point::new(degree as f64, count as f64),
            label: None,
        })
        .collect();

    Figure::single(Panel {
        x_label: Some("Degree".to_string()),
        y_label: Some("Count".to_string()),
        scale: AxisScale::LogLog,
        axes: true,
        points,
        ..Panel::titled("Degree Distribution")
    })
}
