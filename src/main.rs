// src/main.rs
//
// Plot the potential written by the Poisson solver, together with the
// electric field E = -grad(phi) as streamlines and a set of equipotentials.
//
// Examples:
//
//   cargo run --release -- 100
//       -> reads ./sol.dat (100 x 100 samples) and opens a window.
//
//   cargo run --release -- 100 out=poisson.png
//       -> same figure written to poisson.png, no window.
//
//   cargo run --release -- 200 input=runs/fine/sol.dat config=plot.json
//       -> custom input file and plot settings (see config.rs for keys).
//
// Every failure prints one message on stdout and exits with status 1.
// Set RUST_LOG=info (or debug) for progress output on stderr.

use std::env;
use std::process;

use poisson_viz::cli::parse_args;
use poisson_viz::config::PlotConfig;
use poisson_viz::display::show;
use poisson_viz::error::PlotResult;
use poisson_viz::logging::init_logging;
use poisson_viz::pipeline::prepare;
use poisson_viz::visualisation::{render_png, render_rgb};

fn run(argv: &[String]) -> PlotResult<()> {
    let args = parse_args(argv)?;

    let cfg = match &args.config {
        Some(path) => PlotConfig::load(path)?,
        None => PlotConfig::default(),
    };
    log::debug!("plot config: {}", cfg.to_json());

    let plot = prepare(&args.input, args.grid_size, &cfg)?;

    match &args.out {
        Some(path) => {
            render_png(path, &plot, &cfg)?;
            log::info!("wrote {}", path.display());
        }
        None => {
            let image = render_rgb(&plot, &cfg)?;
            show(&image, &cfg.figure.title)?;
        }
    }
    Ok(())
}

fn main() {
    init_logging();

    let argv: Vec<String> = env::args().collect();
    if let Err(e) = run(&argv) {
        println!("{}", e);
        process::exit(1);
    }
}
