//! Configuration loading for netgrow.
//!
//! Configuration is loaded from TOML files with environment variable overrides
//! (`NETGROW_SIMULATION__STEPS=500`).

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::layout::LayoutKind;

pub const DEFAULT_CONFIG_FILE: &str = "config.default.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct NetgrowConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_initial_size")]
    pub initial_size: usize,

    #[serde(default = "default_initial_probability")]
    pub initial_probability: f64,

    #[serde(default = "default_steps")]
    pub steps: usize,

    /// Fixed seed; a random one is drawn and logged when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_size: default_initial_size(),
            initial_probability: default_initial_probability(),
            steps: default_steps(),
            seed: None,
        }
    }
}

fn default_initial_size() -> usize {
    30
}

fn default_initial_probability() -> f64 {
    0.1
}

fn default_steps() -> usize {
    100
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub kind: LayoutKind,

    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            kind: LayoutKind::default(),
            iterations: default_iterations(),
        }
    }
}

fn default_iterations() -> usize {
    50
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: String,

    #[serde(default = "default_panel_size")]
    pub panel_width: u32,

    #[serde(default = "default_panel_size")]
    pub panel_height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            panel_width: default_panel_size(),
            panel_height: default_panel_size(),
        }
    }
}

fn default_directory() -> String {
    "output".to_string()
}

fn default_panel_size() -> u32 {
    480
}

impl NetgrowConfig {
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(path, Self::environment())
    }

    /// `NETGROW_<SECTION>__<KEY>` variables, e.g. `NETGROW_LAYOUT__KIND`.
    fn environment() -> Environment {
        Environment::with_prefix("NETGROW")
            .prefix_separator("_")
            .separator("__")
    }

    fn load_with(path: &Path, env: Environment) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .context("failed to read configuration")?;

        config
            .try_deserialize()
            .context("invalid configuration")
    }
}
