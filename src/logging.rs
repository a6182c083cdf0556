// src/logging.rs

use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Install the global logger: warnings and errors by default, overridable
/// with RUST_LOG (e.g. `RUST_LOG=poisson_viz=debug`). Output goes to stderr
/// so it never mixes with the messages printed on stdout.
///
/// Calling it again is harmless: the logger already installed stays in place.
pub fn init_logging() {
    let installed = Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .try_init();
    if let Err(e) = installed {
        log::debug!("keeping existing logger: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_keeps_the_first_logger() {
        init_logging();
        let level = log::max_level();
        init_logging();
        assert_eq!(log::max_level(), level);
    }
}
