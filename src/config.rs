// src/config.rs
//
// Plot configuration. Every field has a default, so a JSON file only needs to
// list what it overrides, e.g. {"geometry": {"bar_spacing": 0.4}}.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::PlotResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub figure: FigureConfig,
    pub geometry: GeometryConfig,
    pub contours: ContourConfig,
    pub streamlines: StreamConfig,
}

/// Output image layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Figure size in inches.
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: f64,
    pub title: String,
    pub colorbar_label: String,
}

/// The two electrode bars drawn on top of the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Horizontal distance between the bars (D).
    pub bar_spacing: f64,
    /// Bar length along y (L).
    pub bar_length: f64,
    /// Centre of the bar pair, used for both x and y.
    pub box_centre: f64,
    /// Stroke width in points.
    pub line_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    pub levels: Vec<f64>,
    pub label_font_size: f64,
    /// Polylines shorter than this (axes units) are drawn but not labelled.
    pub min_label_length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Streamline spacing; the occupancy mask has floor(30 * density) cells per side.
    pub density: f64,
    /// Line width (points) of the strongest field sample.
    pub max_line_width: f64,
    pub arrow_size: f64,
    /// Trajectory length limits in axes units.
    pub max_length: f64,
    pub min_length: f64,
    /// Integration step as a fraction of a mask cell.
    pub step_fraction: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            figure: FigureConfig::default(),
            geometry: GeometryConfig::default(),
            contours: ContourConfig::default(),
            streamlines: StreamConfig::default(),
        }
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_in: 10.0,
            height_in: 8.0,
            dpi: 100.0,
            title: "Poisson Solution with Electric Field Streamlines".to_string(),
            colorbar_label: "Potential".to_string(),
        }
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            bar_spacing: 0.5,
            bar_length: 0.3,
            box_centre: 0.5,
            line_width: 2.0,
        }
    }
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            levels: vec![-0.7, -0.25, -0.05, 0.05, 0.25, 0.7],
            label_font_size: 10.0,
            min_label_length: 0.05,
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            density: 1.2,
            max_line_width: 8.0,
            arrow_size: 0.7,
            max_length: 4.0,
            min_length: 0.1,
            step_fraction: 0.2,
        }
    }
}

impl FigureConfig {
    /// Pixel size of the rendered figure.
    pub fn pixel_size(&self) -> (u32, u32) {
        let w = (self.width_in * self.dpi).round().max(1.0) as u32;
        let h = (self.height_in * self.dpi).round().max(1.0) as u32;
        (w, h)
    }

    /// Convert a length in points (1/72 inch) to pixels.
    pub fn points_to_px(&self, pt: f64) -> f64 {
        pt * self.dpi / 72.0
    }
}

impl GeometryConfig {
    /// Bars as (x, y_min, y_max), left first.
    pub fn bars(&self) -> [(f64, f64, f64); 2] {
        let c = self.box_centre;
        let y0 = c - self.bar_length / 2.0;
        let y1 = c + self.bar_length / 2.0;
        [
            (c - self.bar_spacing / 2.0, y0, y1),
            (c + self.bar_spacing / 2.0, y0, y1),
        ]
    }
}

impl PlotConfig {
    pub fn load(path: &Path) -> PlotResult<Self> {
        let file = File::open(path)?;
        let cfg = serde_json::from_reader(BufReader::new(file))?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
