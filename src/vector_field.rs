// src/vector_field.rs

use crate::grid::Grid2D;

/// In-plane vector field defined on a 2D grid.
/// Each sample stores (vx, vy).
#[derive(Debug, Clone)]
pub struct VectorField2D {
    pub grid: Grid2D,
    pub data: Vec<[f64; 2]>,
}

impl VectorField2D {
    /// Create a new field on the given grid, initialised to zero.
    pub fn new(grid: Grid2D) -> Self {
        let n = grid.n_cells();
        Self {
            grid,
            data: vec![[0.0, 0.0]; n],
        }
    }

    /// Get the flat index in `data` for grid indices (i, j).
    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        self.grid.idx(i, j)
    }

    /// |v| per sample, in grid order.
    pub fn magnitude(&self) -> Vec<f64> {
        self.data
            .iter()
            .map(|v| (v[0] * v[0] + v[1] * v[1]).sqrt())
            .collect()
    }

    /// Largest finite |v|, or 0 when there is none.
    pub fn max_magnitude(&self) -> f64 {
        self.magnitude()
            .into_iter()
            .filter(|m| m.is_finite())
            .fold(0.0, f64::max)
    }

    /// Bilinear interpolation at physical position (x, y).
    ///
    /// Returns `None` outside the sampled rectangle or on a degenerate grid.
    pub fn sample(&self, x: f64, y: f64) -> Option<[f64; 2]> {
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

        let a = self.data[g.idx(i0, j0)];
        let b = self.data[g.idx(i0 + 1, j0)];
        let c = self.data[g.idx(i0, j0 + 1)];
        let d = self.data[g.idx(i0 + 1, j0 + 1)];

        let mut out = [0.0; 2];
        for k in 0..2 {
            let bottom = a[k] * (1.0 - tx) + b[k] * tx;
            let top = c[k] * (1.0 - tx) + d[k] * tx;
            out[k] = bottom * (1.0 - ty) + top * ty;
        }
        Some(out)
    }
}
