// src/loader.rs
//
// Reader for solver output: ASCII floats separated by whitespace/newlines.
// `#` starts a comment that runs to the end of the line, blank lines are
// ignored, and every data row must have the same number of columns.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{PlotError, PlotResult};
use crate::grid::Grid2D;
use crate::scalar_field::ScalarField2D;

/// Default solver output file, relative to the working directory.
pub const DEFAULT_INPUT: &str = "sol.dat";

/// Parse samples from any buffered reader. Line numbers in errors are 1-based.
pub fn parse_samples<R: BufRead>(reader: R) -> PlotResult<Vec<f64>> {
    let mut samples = Vec::new();
    let mut columns: Option<usize> = None;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let content = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line.as_str(),
        };

        let mut count = 0usize;
        for token in content.split_whitespace() {
            let v: f64 = token.parse().map_err(|_| PlotError::Parse {
                line: lineno + 1,
                token: token.to_string(),
            })?;
            samples.push(v);
            count += 1;
        }

        if count == 0 {
            continue;
        }
        match columns {
            None => columns = Some(count),
            Some(expected) if expected != count => {
                return Err(PlotError::RaggedRow {
                    line: lineno + 1,
                    expected,
                    got: count,
                });
            }
            Some(_) => {}
        }
    }

    Ok(samples)
}

/// Read every sample in `path`, in file order.
pub fn load_samples(path: &Path) -> PlotResult<Vec<f64>> {
    if !path.exists() {
        return Err(PlotError::InputNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let samples = parse_samples(BufReader::new(file))?;
    log::debug!("read {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

/// Load an N × N potential from `path`, checking the sample count first.
pub fn load_potential(path: &Path, n: usize) -> PlotResult<ScalarField2D> {
    let samples = load_samples(path)?;

    let expected = (n as u128) * (n as u128);
    if samples.len() as u128 != expected {
        return Err(PlotError::SizeMismatch {
            expected,
            got: samples.len(),
            n,
            path: path.to_path_buf(),
        });
    }

    ScalarField2D::from_flat(Grid2D::unit_square(n), &samples)
}
