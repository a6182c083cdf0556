// src/cli.rs
//
// Command line:
//
//   poisson-viz <grid_size> [out=FILE.png] [config=FILE.json] [input=PATH]
//
// The grid size is required and always comes first. Options use the same
// key=value form as the rest of the driver's settings.

use std::path::PathBuf;

use crate::error::{PlotError, PlotResult};
use crate::loader::DEFAULT_INPUT;

pub const PROGRAM: &str = "poisson-viz";

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    /// Side length N of the square grid.
    pub grid_size: usize,
    pub input: PathBuf,
    /// Render to this PNG instead of opening a window.
    pub out: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

fn usage() -> PlotError {
    PlotError::Usage {
        program: PROGRAM.to_string(),
    }
}

/// Parse a grid size the way a user would type it ("100", " 64 ", "+32").
pub fn parse_grid_size(s: &str) -> PlotResult<usize> {
    let n: i64 = s
        .trim()
        .parse()
        .map_err(|_| PlotError::InvalidGridSize(s.to_string()))?;
    if n < 0 {
        return Err(PlotError::NegativeGridSize(n));
    }
    usize::try_from(n).map_err(|_| PlotError::InvalidGridSize(s.to_string()))
}

/// Parse `argv` (program name first).
pub fn parse_args(argv: &[String]) -> PlotResult<CliArgs> {
    let Some(first) = argv.get(1) else {
        return Err(usage());
    };
    let grid_size = parse_grid_size(first)?;

    let mut args = CliArgs {
        grid_size,
        input: PathBuf::from(DEFAULT_INPUT),
        out: None,
        config: None,
    };

    for a in argv.iter().skip(2) {
        if let Some(v) = a.strip_prefix("out=") {
            args.out = Some(PathBuf::from(v));
        } else if let Some(v) = a.strip_prefix("config=") {
            args.config = Some(PathBuf::from(v));
        } else if let Some(v) = a.strip_prefix("input=") {
            args.input = PathBuf::from(v);
        } else {
            log::warn!("unrecognised argument '{}'", a);
            return Err(usage());
        }
    }

    Ok(args)
}
