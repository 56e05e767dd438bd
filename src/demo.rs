//! The two demonstration flows, callable with explicit options.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::NetgrowConfig;
use crate::graph::GraphStore;
use crate::layout::LayoutKind;
use crate::metrics::MetricsSnapshot;
use crate::render::{self, SvgRenderer};
use crate::simulation::NetworkSimulation;
use crate::viz::{self, NetworkStyle};

/// Where and how figures are drawn.
#[derive(Debug, Clone)]
pub struct DrawOptions {
    pub output_dir: PathBuf,
    pub layout: LayoutKind,
    pub layout_iterations: usize,
    pub panel_width: u32,
    pub panel_height: u32,
}

impl DrawOptions {
    pub fn from_config(config: &NetgrowConfig) -> Self {
        Self {
            output_dir: PathBuf::from(&config.output.directory),
            layout: config.layout.kind,
            layout_iterations: config.layout.iterations,
            panel_width: config.output.panel_width,
            panel_height: config.output.panel_height,
        }
    }

    fn renderer(&self) -> SvgRenderer {
        SvgRenderer::new(self.panel_width, self.panel_height)
    }
}

#[derive(Debug, Clone)]
pub struct VisualizeOptions {
    pub draw: DrawOptions,
    pub seed: u64,
}

#[derive(Debug, Clone)]
pub struct SimulateOptions {
    pub draw: DrawOptions,
    pub initial_size: usize,
    pub initial_probability: f64,
    pub steps: usize,
    pub seed: u64,
}

impl SimulateOptions {
    /// Options from configuration; `seed` is used when none is configured.
    pub fn from_config(config: &NetgrowConfig, seed: u64) -> Self {
        Self {
            draw: DrawOptions::from_config(config),
            initial_size: config.simulation.initial_size,
            initial_probability: config.simulation.initial_probability,
            steps: config.simulation.steps,
            seed: config.simulation.seed.unwrap_or(seed),
        }
    }
}

/// Outcome of a growth run.
#[derive(Debug, Clone)]
pub struct GrowthReport {
    pub steps_run: usize,
    pub final_metrics: Option<MetricsSnapshot>,
    pub figures: Vec<PathBuf>,
}

/// Draw the two-node graph `1 - 2` with labeled nodes.
pub fn visualize_static(options: &VisualizeOptions) -> Result<PathBuf> {
    let graph = GraphStore::from_edges([1, 2], [(1, 2)])?;
    let mut rng = StdRng::seed_from_u64(options.seed);

    let layout = options.draw.layout.build(options.draw.layout_iterations);
    let positions = layout.positions(&graph, &mut rng);
    let style = NetworkStyle {
        labels: true,
        title: Some("Simple Graph Visualization".to_string()),
    };
    let figure = viz::network_figure(&graph, &positions, &style);

    let path = render::save(
        &options.draw.renderer(),
        &figure,
        &options.draw.output_dir,
        "simple_graph",
    )?;
    info!(layout = layout.name(), path = %path.display(), "static graph rendered");
    Ok(path)
}

/// Grow a network and draw its metrics, final shape and degree distribution.
pub fn simulate_growth(options: &SimulateOptions) -> Result<GrowthReport> {
    info!(
        initial_size = options.initial_size,
        initial_probability = options.initial_probability,
        steps = options.steps,
        seed = options.seed,
        "starting growth simulation"
    );

    let mut sim = NetworkSimulation::seeded(
        options.initial_size,
        options.initial_probability,
        options.seed,
    )
    .context("failed to create simulation")?;
    sim.run(options.steps)
        .with_context(|| format!("simulation failed after {} steps", sim.steps_run()))?;

    let renderer = options.draw.renderer();
    let dir = &options.draw.output_dir;
    let mut figures = Vec::with_capacity(3);

    figures.push(render::save(
        &renderer,
        &viz::metrics_figure(sim.history()),
        dir,
        "metrics",
    )?);

    let layout = options.draw.layout.build(options.draw.layout_iterations);
    // Layout randomness continues the simulation's seeded stream.
    let mut layout_rng = StdRng::seed_from_u64(sim.rng_mut().gen());
    let positions = layout.positions(sim.graph(), &mut layout_rng);
    let network = viz::network_figure(sim.graph(), &positions, &NetworkStyle::default());
    figures.push(render::save(&renderer, &network, dir, "network")?);

    figures.push(render::save(
        &renderer,
        &viz::degree_distribution_figure(sim.graph()),
        dir,
        "degree_distribution",
    )?);

    info!(figures = figures.len(), dir = %dir.display(), "growth figures rendered");

    Ok(GrowthReport {
        steps_run: sim.steps_run(),
        final_metrics: sim.history().last().copied(),
        figures,
    })
}
