//! Netgrow CLI - draw a small graph or grow a network and chart it.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use netgrow::config::NetgrowConfig;
use netgrow::demo::{self, DrawOptions, SimulateOptions, VisualizeOptions};
use netgrow::layout::LayoutKind;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "netgrow")]
#[command(about = "Generate random graphs and simulate preferential-attachment growth")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "netgrow.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Draw a two-node graph (default when no command is given)
    Visualize(VisualizeArgs),

    /// Grow a random network and chart metrics, final graph and degrees
    Simulate(SimulateArgs),
}

#[derive(clap::Args, Debug, Default)]
struct VisualizeArgs {
    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Node layout
    #[arg(short, long, value_enum)]
    layout: Option<LayoutArg>,

    /// Seed for the layout
    #[arg(short = 'S', long)]
    seed: Option<u64>,
}

#[derive(clap::Args, Debug, Default)]
struct SimulateArgs {
    /// Number of nodes in the initial random graph
    #[arg(short = 'n', long)]
    initial_size: Option<usize>,

    /// Edge probability of the initial random graph
    #[arg(short, long)]
    probability: Option<f64>,

    /// Number of growth steps
    #[arg(short, long)]
    steps: Option<usize>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Node layout for the final graph
    #[arg(short, long, value_enum)]
    layout: Option<LayoutArg>,

    /// Seed for graph generation, attachment and layout
    #[arg(short = 'S', long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum LayoutArg {
    /// Force-directed placement
    Spring,
    /// Nodes on a circle
    Circular,
}

impl LayoutArg {
    fn to_kind(self) -> LayoutKind {
        match self {
            LayoutArg::Spring => LayoutKind::Spring,
            LayoutArg::Circular => LayoutKind::Circular,
        }
    }
}

const DEFAULT_LOG_FILTER: &str = "netgrow=info";

/// `RUST_LOG`-style directives, falling back to [`DEFAULT_LOG_FILTER`].
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn draw_options(
    config: &NetgrowConfig,
    output_dir: Option<PathBuf>,
    layout: Option<LayoutArg>,
) -> DrawOptions {
    let mut draw = DrawOptions::from_config(config);
    if let Some(dir) = output_dir {
        draw.output_dir = dir;
    }
    if let Some(layout) = layout {
        draw.layout = layout.to_kind();
    }
    draw
}

impl VisualizeArgs {
    /// Flags win over config; `fallback_seed` is used when neither has a seed.
    fn options(self, config: &NetgrowConfig, fallback_seed: u64) -> VisualizeOptions {
        VisualizeOptions {
            draw: draw_options(config, self.output_dir, self.layout),
            seed: self.seed.or(config.simulation.seed).unwrap_or(fallback_seed),
        }
    }
}

impl SimulateArgs {
    fn options(self, config: &NetgrowConfig, fallback_seed: u64) -> SimulateOptions {
        let mut options = SimulateOptions::from_config(config, fallback_seed);
        options.draw = draw_options(config, self.output_dir, self.layout);
        if let Some(n) = self.initial_size {
            options.initial_size = n;
        }
        if let Some(p) = self.probability {
            options.initial_probability = p;
        }
        if let Some(s) = self.steps {
            options.steps = s;
        }
        if let Some(seed) = self.seed {
            options.seed = seed;
        }
        options
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(env_directives.as_deref()))
        .init();

    let cli = Cli::parse();
    let config = NetgrowConfig::load(Path::new(&cli.config))?;
    info!(config = %cli.config.display(), "configuration loaded");

    match cli
        .command
        .unwrap_or_else(|| Commands::Visualize(VisualizeArgs::default()))
    {
        Commands::Visualize(args) => {
            let options = args.options(&config, rand::random());
            let path = demo::visualize_static(&options)?;
            println!("Saved to {}", path.display());
        }

        Commands::Simulate(args) => {
            let options = args.options(&config, rand::random());

            println!(
                "Growing {} steps from {} nodes (p = {}) with seed {}...",
                options.steps, options.initial_size, options.initial_probability, options.seed
            );
            let report = demo::simulate_growth(&options)?;

            if let Some(last) = report.final_metrics {
                println!("  Nodes: {}", last.node_count);
                println!("  Edges: {}", last.edge_count);
                println!("  Average degree: {:.3}", last.average_degree);
            }
            for path in &report.figures {
                println!("Saved to {}", path.display());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Option<Commands> {
        Cli::try_parse_from(args.iter().copied()).unwrap().command
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_filter_keeps_env_level() {
        let filter = log_filter(Some("netgrow=debug")).to_string();
        assert!(filter.contains("netgrow=debug"), "{filter}");
        assert!(!filter.contains("netgrow=info"), "{filter}");
    }

    #[test]
    fn test_log_filter_default() {
        assert_eq!(log_filter(None).to_string(), DEFAULT_LOG_FILTER);
        assert_eq!(log_filter(Some(" ")).to_string(), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_no_command_is_visualize() {
        assert!(parse(&["netgrow"]).is_none());
    }

    #[test]
    fn test_simulate_flags_override_config() {
        let mut config = NetgrowConfig::default();
        config.simulation.steps = 7;
        config.simulation.seed = Some(99);
        config.layout.iterations = 12;

        let Some(Commands::Simulate(args)) = parse(&[
            "netgrow", "simulate", "-n", "5", "-s", "20", "--layout", "circular", "-o",
            "out/run",
        ]) else {
            panic!("expected simulate");
        };
        let options = args.options(&config, 1);

        assert_eq!(options.initial_size, 5);
        assert_eq!(options.steps, 20);
        assert_eq!(options.initial_probability, 0.1);
        assert_eq!(options.seed, 99);
        assert_eq!(options.draw.layout, LayoutKind::Circular);
        assert_eq!(options.draw.layout_iterations, 12);
        assert_eq!(options.draw.output_dir, PathBuf::from("out/run"));
    }

    #[test]
    fn test_seed_precedence() {
        let mut config = NetgrowConfig::default();
        let flagged = || match parse(&["netgrow", "simulate", "-S", "3"]) {
            Some(Commands::Simulate(args)) => args,
            _ => panic!("expected simulate"),
        };

        assert_eq!(SimulateArgs::default().options(&config, 1).seed, 1);
        assert_eq!(VisualizeArgs::default().options(&config, 1).seed, 1);

        config.simulation.seed = Some(2);
        assert_eq!(SimulateArgs::default().options(&config, 1).seed, 2);
        assert_eq!(VisualizeArgs::default().options(&config, 1).seed, 2);
        assert_eq!(flagged().options(&config, 1).seed, 3);
    }

    #[test]
    fn test_visualize_flags_override_config() {
        let config = NetgrowConfig::default();
        let Some(Commands::Visualize(args)) =
            parse(&["netgrow", "visualize", "-l", "circular", "-S", "8"])
        else {
            panic!("expected visualize");
        };
        let options = args.options(&config, 1);

        assert_eq!(options.seed, 8);
        assert_eq!(options.draw.layout, LayoutKind::Circular);
        assert_eq!(options.draw.output_dir, PathBuf::from("output"));
    }
}
