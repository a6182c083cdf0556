// src/error.rs
//
// One error type for the whole pipeline. The Display text of each variant is
// exactly what the binary prints before exiting with status 1.

use std::path::PathBuf;

use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Usage: {program} <grid_size> [out=FILE.png] [config=FILE.json] [input=PATH]\nExample: {program} 100")]
    Usage { program: String },

    #[error("Error: Grid size must be an integer")]
    InvalidGridSize(String),

    #[error("Error: Grid size must be a non-negative integer (got {0})")]
    NegativeGridSize(i64),

    #[error(
        "Error: Input file '{}' not found\nMake sure to run the Poisson solver first to generate the solution data",
        .0.display()
    )]
    InputNotFound(PathBuf),

    #[error(
        "Error: Data size mismatch. Expected {expected} points, got {got}\nMake sure your grid size ({n}) matches the data in {file}",
        file = .path.display()
    )]
    SizeMismatch {
        /// N^2 can exceed `usize` for absurd grid sizes.
        expected: u128,
        got: usize,
        n: usize,
        path: PathBuf,
    },

    /// Shape errors of the numerical stage (reshape, differentiation). These
    /// fall under the generic failure message.
    #[error("An unexpected error occurred: {0}")]
    Processing(String),

    #[error("An unexpected error occurred: could not convert string to float: '{token}' (line {line})")]
    Parse { line: usize, token: String },

    #[error("An unexpected error occurred: the number of columns changed from {expected} to {got} at row {line}")]
    RaggedRow {
        line: usize,
        expected: usize,
        got: usize,
    },

    #[error("An unexpected error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("An unexpected error occurred: invalid plot configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("An unexpected error occurred: {0}")]
    Render(String),

    #[error("An unexpected error occurred: {0}")]
    Window(String),
}

impl From<Box<dyn std::error::Error>> for PlotError {
    fn from(e: Box<dyn std::error::Error>) -> Self {
        PlotError::Render(e.to_string())
    }
}

impl From<minifb::Error> for PlotError {
    fn from(e: minifb::Error) -> Self {
        PlotError::Window(e.to_string())
    }
}
