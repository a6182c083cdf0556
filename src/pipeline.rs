// src/pipeline.rs
//
// Everything between "read the file" and "draw": load -> reshape -> E field
// -> streamlines and contours. Nothing here touches a drawing backend, so the
// whole numerical path can be exercised headless.

use std::path::Path;
use std::time::Instant;

use crate::colormap::Normalize;
use crate::config::PlotConfig;
use crate::contour::{contour_set, ContourSet};
use crate::error::PlotResult;
use crate::gradient::electric_field;
use crate::loader::load_potential;
use crate::scalar_field::ScalarField2D;
use crate::streamlines::{trace_streamlines, Streamline};
use crate::vector_field::VectorField2D;

/// All data needed to draw the figure.
pub struct PreparedPlot {
    pub potential: ScalarField2D,
    pub field: VectorField2D,
    pub norm: Normalize,
    pub streamlines: Vec<Streamline>,
    pub contours: ContourSet,
}

impl PreparedPlot {
    /// Derive the overlays from an already loaded potential.
    pub fn from_potential(potential: ScalarField2D, cfg: &PlotConfig) -> PlotResult<Self> {
        let field = electric_field(&potential)?;

        let (vmin, vmax) = potential.min_max().unwrap_or((0.0, 1.0));
        let norm = Normalize::new(vmin, vmax);

        let streamlines = trace_streamlines(&field, &cfg.streamlines);
        let contours = contour_set(&potential, &cfg.contours);

        Ok(Self {
            potential,
            field,
            norm,
            streamlines,
            contours,
        })
    }

    /// Grid shape (nx, ny).
    pub fn shape(&self) -> (usize, usize) {
        (self.potential.grid.nx, self.potential.grid.ny)
    }
}

/// Load an N × N potential from `path` and prepare it for plotting.
pub fn prepare(path: &Path, n: usize, cfg: &PlotConfig) -> PlotResult<PreparedPlot> {
    let t0 = Instant::now();

    let potential = load_potential(path, n)?;
    if let Some((lo, hi)) = potential.min_max() {
        log::info!(
            "loaded {}x{} potential from {} (range {:.4e} .. {:.4e})",
            n,
            n,
            path.display(),
            lo,
            hi
        );
    } else {
        log::warn!("potential in {} has no finite samples", path.display());
    }

    let plot = PreparedPlot::from_potential(potential, cfg)?;
    let (nx, ny) = plot.shape();
    log::info!(
        "{}x{} field: max |E| = {:.4e}, {} streamlines, {} contour lines ({:.1} ms)",
        nx,
        ny,
        plot.field.max_magnitude(),
        plot.streamlines.len(),
        plot.contours.contours.len(),
        t0.elapsed().as_secs_f64() * 1e3
    );
    Ok(plot)
}
