// src/gradient.rs
//
// Finite-difference gradient on a uniform grid.
//
// Interior samples use second-order central differences, boundary samples
// first-order one-sided differences:
//
//   df/dx(i) = (f[i+1] - f[i-1]) / (2 dx)      0 < i < nx-1
//   df/dx(0) = (f[1] - f[0]) / dx
//   df/dx(nx-1) = (f[nx-1] - f[nx-2]) / dx
//
// The electric field is E = grad(-phi).

use rayon::prelude::*;

use crate::error::{PlotError, PlotResult};
use crate::grid::Grid2D;
use crate::scalar_field::ScalarField2D;
use crate::vector_field::VectorField2D;

fn check_shape(grid: &Grid2D) -> PlotResult<()> {
    if grid.nx < 2 || grid.ny < 2 {
        return Err(PlotError::Processing(format!(
            "Shape of array too small to calculate a numerical gradient, \
             at least 2 elements are required along each axis (got {}x{})",
            grid.ny, grid.nx
        )));
    }
    if !(grid.dx > 0.0 && grid.dy > 0.0) || !grid.dx.is_finite() || !grid.dy.is_finite() {
        return Err(PlotError::Processing(format!(
            "invalid grid spacing dx={}, dy={}",
            grid.dx, grid.dy
        )));
    }
    Ok(())
}

#[inline]
fn diff_1d(f: impl Fn(usize) -> f64, n: usize, k: usize, h: f64) -> f64 {
    if k == 0 {
        (f(1) - f(0)) / h
    } else if k == n - 1 {
        (f(n - 1) - f(n - 2)) / h
    } else {
        (f(k + 1) - f(k - 1)) / (2.0 * h)
    }
}

/// Gradient of `field` as a vector field whose samples are (df/dx, df/dy).
pub fn gradient(field: &ScalarField2D) -> PlotResult<VectorField2D> {
    let grid = field.grid;
    check_shape(&grid)?;

    let nx = grid.nx;
    let ny = grid.ny;
    let mut out = VectorField2D::new(grid);

    out.data
        .par_chunks_mut(nx)
        .enumerate()
        .for_each(|(j, row)| {
            for (i, cell) in row.iter_mut().enumerate() {
                let gx = diff_1d(|k| field.value(k, j), nx, i, grid.dx);
                let gy = diff_1d(|k| field.value(i, k), ny, j, grid.dy);
                *cell = [gx, gy];
            }
        });

    Ok(out)
}

/// E = -grad(phi), evaluated as the gradient of the negated potential.
pub fn electric_field(phi: &ScalarField2D) -> PlotResult<VectorField2D> {
    let e = gradient(&phi.negated())?;
    log::debug!(
        "electric field on {}x{} grid, max |E| = {:.6e}",
        e.grid.nx,
        e.grid.ny,
        e.max_magnitude()
    );
    Ok(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn field_from_fn(n: usize, f: impl Fn(f64, f64) -> f64) -> ScalarField2D {
        let grid = Grid2D::unit_square(n);
        let mut s = ScalarField2D::zeros(grid);
        for j in 0..n {
            for i in 0..n {
                let idx = grid.idx(i, j);
                s.data[idx] = f(grid.x(i), grid.y(j));
            }
        }
        s
    }

    #[test]
    fn linear_field_gradient_is_exact_including_edges() {
        let phi = field_from_fn(9, |x, y| 2.0 * x - 3.0 * y + 1.0);
        let g = gradient(&phi).unwrap();
        for v in &g.data {
            assert_relative_eq!(v[0], 2.0, epsilon = 1e-10);
            assert_relative_eq!(v[1], -3.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn quadratic_field_is_exact_in_interior() {
        let n = 11;
        let phi = field_from_fn(n, |x, y| x * x + x * y);
        let g = gradient(&phi).unwrap();
        let grid = phi.grid;
        for j in 1..n - 1 {
            for i in 1..n - 1 {
                let v = g.data[grid.idx(i, j)];
                let (x, y) = (grid.x(i), grid.y(j));
                assert_relative_eq!(v[0], 2.0 * x + y, epsilon = 1e-10);
                assert_relative_eq!(v[1], x, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn electric_field_points_down_the_potential() {
        // phi rises with x, so E points toward -x.
        let phi = field_from_fn(5, |x, _| 4.0 * x);
        let e = electric_field(&phi).unwrap();
        for v in &e.data {
            assert_relative_eq!(v[0], -4.0, epsilon = 1e-10);
            assert_relative_eq!(v[1], 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn too_small_grid_is_a_processing_error() {
        let phi = ScalarField2D::zeros(Grid2D::unit_square(1));
        match gradient(&phi) {
            Err(PlotError::Processing(msg)) => assert!(msg.contains("too small")),
            other => panic!("expected processing error, got {:?}", other),
        }
    }
}
