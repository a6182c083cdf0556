// src/scalar_field.rs

use crate::error::{PlotError, PlotResult};
use crate::grid::Grid2D;

/// Scalar potential sampled on a 2D grid.
///
/// `data[grid.idx(i, j)]` is the value at (x_i, y_j).
#[derive(Debug, Clone)]
pub struct ScalarField2D {
    pub grid: Grid2D,
    pub data: Vec<f64>,
}

impl ScalarField2D {
    pub fn zeros(grid: Grid2D) -> Self {
        Self {
            grid,
            data: vec![0.0; grid.n_cells()],
        }
    }

    /// Build a field from samples in solver output order.
    ///
    /// The file is read as a `(ny, nx)` row-major array and transposed, so
    /// the displayed array has `D[row][col] = flat[col * ny + row]` with rows
    /// along y and columns along x. In grid terms: `value(i, j) = flat[i * ny + j]`.
    pub fn from_flat(grid: Grid2D, flat: &[f64]) -> PlotResult<Self> {
        if flat.len() != grid.n_cells() {
            return Err(PlotError::Processing(format!(
                "cannot reshape array of size {} into shape ({}, {})",
                flat.len(),
                grid.ny,
                grid.nx
            )));
        }

        let mut field = Self::zeros(grid);
        for i in 0..grid.nx {
            for j in 0..grid.ny {
                let idx = grid.idx(i, j);
                field.data[idx] = flat[i * grid.ny + j];
            }
        }
        Ok(field)
    }

    /// Inverse of [`ScalarField2D::from_flat`]: samples back in file order.
    pub fn to_flat(&self) -> Vec<f64> {
        let g = self.grid;
        let mut flat = vec![0.0; g.n_cells()];
        for i in 0..g.nx {
            for j in 0..g.ny {
                flat[i * g.ny + j] = self.data[g.idx(i, j)];
            }
        }
        flat
    }

    #[inline]
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.data[self.grid.idx(i, j)]
    }

    /// Rows of the displayed array, bottom (y = 0) first.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.grid.nx.max(1))
    }

    pub fn negated(&self) -> Self {
        Self {
            grid: self.grid,
            data: self.data.iter().map(|v| -v).collect(),
        }
    }

    /// Bilinear interpolation at physical position (x, y); `None` outside
    /// the sampled rectangle.
    pub fn sample(&self, x: f64, y: f64) -> Option<f64> {
        let g = self.grid;
        if g.nx < 2 || g.ny < 2 || g.dx <= 0.0 || g.dy <= 0.0 {
            return None;
        }
        let (x_max, y_max) = g.extent();
        if !(0.0..=x_max).contains(&x) || !(0.0..=y_max).contains(&y) {
            return None;
        }

        let fx = x / g.dx;
        let fy = y / g.dy;
        let i0 = (fx.floor() as usize).min(g.nx - 2);
        let j0 = (fy.floor() as usize).min(g.ny - 2);
        let tx = fx - i0 as f64;
        let ty = fy - j0 as f64;

        let bottom = self.value(i0, j0) * (1.0 - tx) + self.value(i0 + 1, j0) * tx;
        let top = self.value(i0, j0 + 1) * (1.0 - tx) + self.value(i0 + 1, j0 + 1) * tx;
        Some(bottom * (1.0 - ty) + top * ty)
    }

    /// (min, max) over the finite samples, `None` if there are none.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in &self.data {
            if v.is_finite() {
                lo = lo.min(v);
                hi = hi.max(v);
            }
        }
        if lo.is_finite() && hi.is_finite() {
            Some((lo, hi))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flat_transposes_file_order() {
        let grid = Grid2D::unit_square(3);
        let flat: Vec<f64> = (0..9).map(|k| k as f64).collect();
        let f = ScalarField2D::from_flat(grid, &flat).unwrap();

        // reshape((3, 3)).T: D[row][col] = flat[col * 3 + row]
        assert_eq!(f.value(0, 0), 0.0);
        assert_eq!(f.value(0, 1), 1.0);
        assert_eq!(f.value(1, 0), 3.0);
        assert_eq!(f.value(2, 1), 7.0);

        let bottom_row: Vec<f64> = f.rows().next().unwrap().to_vec();
        assert_eq!(bottom_row, vec![0.0, 3.0, 6.0]);
    }

    #[test]
    fn round_trip_recovers_input_order() {
        let grid = Grid2D::unit_square(7);
        let flat: Vec<f64> = (0..49).map(|k| (k as f64 * 0.37).sin()).collect();
        let f = ScalarField2D::from_flat(grid, &flat).unwrap();
        assert_eq!(f.to_flat(), flat);
    }

    #[test]
    fn from_flat_rejects_wrong_length() {
        let grid = Grid2D::unit_square(3);
        let err = ScalarField2D::from_flat(grid, &[1.0; 8]).unwrap_err();
        assert!(matches!(err, PlotError::Processing(_)));
    }

    #[test]
    fn min_max_skips_non_finite_samples() {
        let grid = Grid2D::unit_square(2);
        let f = ScalarField2D::from_flat(grid, &[f64::NAN, -2.0, 3.0, f64::INFINITY]).unwrap();
        assert_eq!(f.min_max(), Some((-2.0, 3.0)));

        let empty = ScalarField2D::from_flat(grid, &[f64::NAN; 4]).unwrap();
        assert_eq!(empty.min_max(), None);
    }
}
