// src/grid.rs

/// Uniform 2D sampling grid.
///
/// Sample `i` along x sits at `x0 + i * dx` (likewise for y), so the first and
/// last samples lie exactly on the domain edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid2D {
    pub nx: usize,
    pub ny: usize,
    pub dx: f64,
    pub dy: f64,
}

impl Grid2D {
    /// Create a new 2D grid with nx × ny samples and spacings dx, dy.
    pub fn new(nx: usize, ny: usize, dx: f64, dy: f64) -> Self {
        Self { nx, ny, dx, dy }
    }

    /// N × N samples spanning [0, 1] × [0, 1] (linspace(0, 1, n) on both axes).
    pub fn unit_square(n: usize) -> Self {
        let h = if n > 1 { 1.0 / (n - 1) as f64 } else { 0.0 };
        Self::new(n, n, h, h)
    }

    /// Total number of samples.
    pub fn n_cells(&self) -> usize {
        self.nx * self.ny
    }

    /// Convert (i, j) indices to a flat index into a 1D array.
    /// `i` runs along x, `j` along y.
    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny);
        j * self.nx + i
    }

    #[inline]
    pub fn x(&self, i: usize) -> f64 {
        i as f64 * self.dx
    }

    #[inline]
    pub fn y(&self, j: usize) -> f64 {
        j as f64 * self.dy
    }

    /// Physical extent (x_max, y_max) of the sample positions.
    pub fn extent(&self) -> (f64, f64) {
        (
            self.nx.saturating_sub(1) as f64 * self.dx,
            self.ny.saturating_sub(1) as f64 * self.dy,
        )
    }
}
