//! Renderers - turn a [`Figure`] into an image document.

pub mod svg;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::viz::Figure;

pub use svg::SvgRenderer;

/// Trait for all figure renderers.
pub trait Renderer {
    /// Name of this renderer.
    fn name(&self) -> &'static str;

    /// Render the figure.
    /// Returns the output as a string (SVG, etc.)
    fn render(&self, figure: &Figure) -> String;

    /// File extension for this renderer's output.
    fn extension(&self) -> &'static str;
}

/// Render `figure` and write it to `<dir>/<stem>.<extension>`.
///
/// The directory is created if needed. Returns the written path.
pub fn save(renderer: &dyn Renderer, figure: &Figure, dir: &Path, stem: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let path = dir.join(format!("{}.{}", stem, renderer.extension()));
    let document = renderer.render(figure);
    fs::write(&path, &document).with_context(|| format!("failed to write {}", path.display()))?;

    debug!(
        renderer = renderer.name(),
        path = %path.display(),
        bytes = document.len(),
        "figure written"
    );
    Ok(path)
}
