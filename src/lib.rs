// src/lib.rs

pub mod cli;
pub mod colormap;
pub mod config;
pub mod contour;
pub mod display;
pub mod error;
pub mod gradient;
pub mod grid;
pub mod loader;
pub mod logging;
pub mod pipeline;
pub mod scalar_field;
pub mod streamlines;
pub mod vector_field;
pub mod visualisation;
