// tests/validation.rs
//
// End-to-end checks of the numerical path: solver-ordered file on disk ->
// potential -> electric field -> streamlines / contours.
// Run with: cargo test --test validation
// The PNG rendering test needs system fonts: cargo test --test validation -- --ignored

use std::fmt::Write as _;
use std::path::Path;

use approx::assert_relative_eq;
use poisson_viz::config::PlotConfig;
use poisson_viz::error::PlotError;
use poisson_viz::loader::load_potential;
use poisson_viz::pipeline::prepare;
use poisson_viz::visualisation::render_png;

/// Write phi(x_i, y_j) in solver order (index i * n + j), one value per line.
fn write_solution(path: &Path, n: usize, phi: impl Fn(f64, f64) -> f64) {
    let h = 1.0 / (n - 1) as f64;
    let mut text = String::new();
    for i in 0..n {
        for j in 0..n {
            writeln!(text, "{:.17e}", phi(i as f64 * h, j as f64 * h)).unwrap();
        }
    }
    std::fs::write(path, text).unwrap();
}

/// Two oppositely charged line electrodes at x = 0.25 and x = 0.75.
fn bar_pair(x: f64, y: f64) -> f64 {
    let q = |x0: f64| {
        let r2 = (x - x0).powi(2) + (y - 0.5).powi(2) + 1e-3;
        -0.25 * r2.ln()
    };
    (q(0.25) - q(0.75)) / 3.0
}

#[test]
fn exact_sample_count_gives_n_by_n_grid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sol.dat");
    let n = 12;
    write_solution(&path, n, |x, y| x + 10.0 * y);

    let phi = load_potential(&path, n).unwrap();
    assert_eq!((phi.grid.nx, phi.grid.ny), (n, n));

    for j in 0..n {
        for i in 0..n {
            let want = phi.grid.x(i) + 10.0 * phi.grid.y(j);
            assert_relative_eq!(phi.value(i, j), want, epsilon = 1e-12);
        }
    }
}

#[test]
fn wrong_sample_count_is_a_size_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sol.dat");
    write_solution(&path, 5, |x, _| x);

    match load_potential(&path, 6) {
        Err(PlotError::SizeMismatch { expected, got, n, .. }) => {
            assert_eq!((expected, got, n), (36, 25, 6));
        }
        Err(e) => panic!("expected size mismatch, got {}", e),
        Ok(_) => panic!("expected size mismatch, got a field"),
    }
}

#[test]
fn missing_file_is_reported_as_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sol.dat");
    let err = prepare(&path, 4, &PlotConfig::default()).err().unwrap();
    assert!(matches!(err, PlotError::InputNotFound(_)));
}

#[test]
fn capacitor_field_is_uniform_and_streamlines_run_downhill() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sol.dat");
    let n = 21;
    // phi = 1 on the left plate, -1 on the right
    write_solution(&path, n, |x, _| 1.0 - 2.0 * x);

    let plot = prepare(&path, n, &PlotConfig::default()).unwrap();

    for e in &plot.field.data {
        assert_relative_eq!(e[0], 2.0, epsilon = 1e-9);
        assert_relative_eq!(e[1], 0.0, epsilon = 1e-9);
    }

    assert!(!plot.streamlines.is_empty());
    for line in &plot.streamlines {
        let first = line.points.first().unwrap();
        let last = line.points.last().unwrap();
        assert!(last.0 > first.0, "E points toward +x, from high to low potential");
        assert_relative_eq!(first.1, last.1, epsilon = 1e-12);
    }

    // Every configured level lies in (-1, 1), so each gives one vertical line
    // at x = (1 - level) / 2.
    let cfg = PlotConfig::default();
    assert_eq!(plot.contours.contours.len(), cfg.contours.levels.len());
    for c in &plot.contours.contours {
        let x_want = (1.0 - c.level) / 2.0;
        for p in &c.points {
            assert_relative_eq!(p.0, x_want, epsilon = 1e-9);
        }
    }
}

#[test]
fn bar_pair_field_points_from_positive_to_negative_bar() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sol.dat");
    let n = 41;
    write_solution(&path, n, bar_pair);

    let plot = prepare(&path, n, &PlotConfig::default()).unwrap();
    let grid = plot.field.grid;

    // Midway between the bars E must point from the positive (left) bar to
    // the negative (right) one.
    let mid = plot.field.data[grid.idx(n / 2, n / 2)];
    assert!(mid[0] > 0.0);
    assert!(mid[1].abs() < 1e-9 * mid[0].abs().max(1.0));

    // Antisymmetry phi(x, y) = -phi(1 - x, y) survives load + reshape.
    let phi = &plot.potential;
    for j in 0..n {
        for i in 0..n {
            assert_relative_eq!(phi.value(i, j), -phi.value(n - 1 - i, j), epsilon = 1e-9);
        }
    }

    assert!(!plot.streamlines.is_empty());
    assert!(!plot.contours.contours.is_empty());
    assert!(!plot.contours.labels.is_empty());
}

#[test]
#[ignore]
fn renders_png_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sol.dat");
    let out = dir.path().join("poisson.png");
    let n = 32;
    write_solution(&input, n, bar_pair);

    let cfg = PlotConfig::default();
    let plot = prepare(&input, n, &cfg).unwrap();
    render_png(&out, &plot, &cfg).unwrap();

    let meta = std::fs::metadata(&out).unwrap();
    assert!(meta.len() > 0);
}
