//! Node placement for drawing.
//!
//! Coordinates have no meaning beyond the picture. All layouts place nodes
//! inside `[-1, 1]²`.

use std::collections::{BTreeMap, HashMap};
use std::f64::consts::PI;

use rand::{Rng, RngCore};
use serde::Deserialize;

use crate::graph::{GraphStore, NodeId};
use crate::viz::chart::Point;

/// Trait for all layout algorithms.
pub trait Layout {
    /// Name of this layout.
    fn name(&self) -> &'static str;

    /// Assign a position to every node of `graph`.
    fn positions(&self, graph: &GraphStore, rng: &mut dyn RngCore) -> BTreeMap<NodeId, Point>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Force-directed placement
    #[default]
    Spring,
    /// Nodes evenly spaced on a circle
    Circular,
}

impl LayoutKind {
    pub fn build(self, iterations: usize) -> Box<dyn Layout> {
        match self {
            LayoutKind::Spring => Box::new(SpringLayout::new(iterations)),
            LayoutKind::Circular => Box::new(CircularLayout),
        }
    }
}

/// Force-directed layout.
///
/// Nodes start at random positions, repel each other pairwise and are pulled
/// together along edges. Per-iteration movement is capped by a temperature
/// that cools linearly to zero.
#[derive(Debug, Clone)]
pub struct SpringLayout {
    pub iterations: usize,
}

impl Default for SpringLayout {
    fn default() -> Self {
        Self { iterations: 50 }
    }
}

impl SpringLayout {
    pub fn new(iterations: usize) -> Self {
        Self { iterations }
    }
}

impl Layout for SpringLayout {
    fn name(&self) -> &'static str {
        "spring"
    }

    fn positions(&self, graph: &GraphStore, rng: &mut dyn RngCore) -> BTreeMap<NodeId, Point> {
        let ids: Vec<NodeId> = graph.nodes().collect();
        match ids.len() {
            0 => return BTreeMap::new(),
            1 => return BTreeMap::from([(ids[0], Point::ORIGIN)]),
            _ => {}
        }

        let slot: HashMap<NodeId, usize> = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let edges: Vec<(usize, usize)> = graph
            .edges()
            .iter()
            .map(|(a, b)| (slot[a], slot[b]))
            .collect();

        let mut positions: Vec<Point> = ids
            .iter()
            .map(|_| Point::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();

        // Ideal edge length for n nodes sharing an area of 4.
        let k = (4.0 / ids.len() as f64).sqrt();
        let mut temperature = 0.2;
        let cooling = temperature / (self.iterations + 1) as f64;

        for _ in 0..self.iterations {
            let mut forces: Vec<(f64, f64)> = vec![(0.0, 0.0); positions.len()];

            // Repulsion between all nodes
            for i in 0..positions.len() {
                for j in (i + 1)..positions.len() {
                    let dx = positions[j].x - positions[i].x;
                    let dy = positions[j].y - positions[i].y;
                    let dist = (dx * dx + dy * dy).sqrt().max(0.01);

                    let force = k * k / dist;
                    let fx = (dx / dist) * force;
                    let fy = (dy / dist) * force;

                    forces[i].0 -= fx;
                    forces[i].1 -= fy;
                    forces[j].0 += fx;
                    forces[j].1 += fy;
                }
            }

            // Attraction along edges
            for &(src, tgt) in &edges {
                let dx = positions[tgt].x - positions[src].x;
                let dy = positions[tgt].y - positions[src].y;
                let dist = (dx * dx + dy * dy).sqrt().max(0.01);

                let force = dist * dist / k;
                let fx = (dx / dist) * force;
                let fy = (dy / dist) * force;

                forces[src].0 += fx;
                forces[src].1 += fy;
                forces[tgt].0 -= fx;
                forces[tgt].1 -= fy;
            }

            for (pos, (fx, fy)) in positions.iter_mut().zip(forces) {
                let len = (fx * fx + fy * fy).sqrt();
                if len > 0.0 {
                    let step = len.min(temperature) / len;
                    pos.x += fx * step;
                    pos.y += fy * step;
                }
            }
            temperature -= cooling;
        }

        rescale(&mut positions);
        ids.into_iter().zip(positions).collect()
    }
}

/// Center on the origin and scale so the widest coordinate is 1.
fn rescale(positions: &mut [Point]) {
    let n = positions.len() as f64;
    let cx = positions.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = positions.iter().map(|p| p.y).sum::<f64>() / n;
    for p in positions.iter_mut() {
        p.x -= cx;
        p.y -= cy;
    }
    let extent = positions
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(0.0f64, f64::max);
    if extent > 0.0 {
        for p in positions.iter_mut() {
            p.x /= extent;
            p.y /= extent;
        }
    }
}

/// Nodes on the unit circle in ascending id order, starting at the top.
#[derive(Debug, Clone, Default)]
pub struct CircularLayout;

impl Layout for CircularLayout {
    fn name(&self) -> &'static str {
        "circular"
    }

    fn positions(&self, graph: &GraphStore, _rng: &mut dyn RngCore) -> BTreeMap<NodeId, Point> {
        let n = graph.node_count();
        if n == 1 {
            return graph.nodes().map(|id| (id, Point::ORIGIN)).collect();
        }
        graph
            .nodes()
            .enumerate()
            .map(|(i, id)| {
                let angle = (i as f64 / n as f64) * PI * 2.0 - PI / 2.0;
                (id, Point::new(angle.cos(), angle.sin()))
            })
            .collect()
    }
}
