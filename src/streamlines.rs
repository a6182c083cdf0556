// src/streamlines.rs
//
// Evenly spaced streamlines of a 2D vector field.
//
// A coarse occupancy mask (round-down of 30 * density cells per side) covers
// the axes. Seeds are taken one per mask cell in spiral order from the
// boundary inward; each seed is integrated backward and forward along the
// unit-speed field with midpoint (RK2) steps. A trajectory stops when it
// leaves the domain, meets a zero/non-finite field, enters a mask cell owned
// by another trajectory, or exceeds the maximum length. Trajectories shorter
// than the minimum length are dropped and give their cells back.
//
// Integration runs in axes units ([0, 1] on both axes); output points are in
// physical coordinates.

use crate::config::StreamConfig;
use crate::scalar_field::ScalarField2D;
use crate::vector_field::VectorField2D;

/// Arrow head placed halfway along a streamline, pointing tail -> head.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub tail: (f64, f64),
    pub head: (f64, f64),
}

#[derive(Debug, Clone)]
pub struct Streamline {
    pub points: Vec<(f64, f64)>,
    /// Line width in points at each entry of `points`.
    pub widths: Vec<f64>,
    pub arrow: Option<Arrow>,
}

/// Mask cells per side for a given density.
pub fn mask_size(density: f64) -> usize {
    let n = (30.0 * density).floor();
    if n.is_finite() && n >= 2.0 {
        n as usize
    } else {
        2
    }
}

/// Visit every cell of an nx × ny grid once, spiralling inward from (0, 0)
/// along the bottom row, up the right column, back along the top and down
/// the left.
pub fn spiral_order(nx: usize, ny: usize) -> Vec<(usize, usize)> {
    #[derive(Clone, Copy)]
    enum Dir {
        Right,
        Up,
        Left,
        Down,
    }

    let total = nx * ny;
    let mut out = Vec::with_capacity(total);
    let (mut x_first, mut y_first) = (0isize, 1isize);
    let (mut x_last, mut y_last) = (nx as isize - 1, ny as isize - 1);
    let (mut x, mut y) = (0isize, 0isize);
    let mut dir = Dir::Right;

    for _ in 0..total {
        out.push((x as usize, y as usize));
        match dir {
            Dir::Right => {
                x += 1;
                if x >= x_last {
                    x_last -= 1;
                    dir = Dir::Up;
                }
            }
            Dir::Up => {
                y += 1;
                if y >= y_last {
                    y_last -= 1;
                    dir = Dir::Left;
                }
            }
            Dir::Left => {
                x -= 1;
                if x <= x_first {
                    x_first += 1;
                    dir = Dir::Down;
                }
            }
            Dir::Down => {
                y -= 1;
                if y <= y_first {
                    y_first += 1;
                    dir = Dir::Right;
                }
            }
        }
    }
    out
}

/// Cells claimed by the trajectory being traced.
struct Trajectory {
    claimed: Vec<usize>,
    current: usize,
}

struct Tracer<'a> {
    field: &'a VectorField2D,
    x_max: f64,
    y_max: f64,
    n: usize,
    mask: Vec<bool>,
    step: f64,
    max_length: f64,
}

impl<'a> Tracer<'a> {
    fn cell_of(&self, p: (f64, f64)) -> usize {
        let last = (self.n - 1) as f64;
        let xm = (p.0 * last).round().clamp(0.0, last) as usize;
        let ym = (p.1 * last).round().clamp(0.0, last) as usize;
        ym * self.n + xm
    }

    fn inside(p: (f64, f64)) -> bool {
        (0.0..=1.0).contains(&p.0) && (0.0..=1.0).contains(&p.1)
    }

    /// Unit direction of the field (times `sign`) in axes units.
    fn direction(&self, p: (f64, f64), sign: f64) -> Option<(f64, f64)> {
        if !Self::inside(p) {
            return None;
        }
        let v = self.field.sample(p.0 * self.x_max, p.1 * self.y_max)?;
        let d = (v[0] / self.x_max, v[1] / self.y_max);
        let speed = (d.0 * d.0 + d.1 * d.1).sqrt();
        if !speed.is_finite() || speed <= 0.0 {
            return None;
        }
        Some((sign * d.0 / speed, sign * d.1 / speed))
    }

    /// Take ownership of the mask cell under `p`; false if another
    /// trajectory (or an earlier part of this one) already holds it.
    fn claim(&mut self, traj: &mut Trajectory, p: (f64, f64)) -> bool {
        let c = self.cell_of(p);
        if c == traj.current {
            return true;
        }
        if self.mask[c] {
            return false;
        }
        self.mask[c] = true;
        traj.claimed.push(c);
        traj.current = c;
        true
    }

    /// Largest step s along d that keeps p + s d inside the unit square.
    fn step_to_boundary(p: (f64, f64), d: (f64, f64)) -> f64 {
        let along = |pos: f64, dir: f64| {
            if dir > 0.0 {
                (1.0 - pos) / dir
            } else if dir < 0.0 {
                pos / -dir
            } else {
                f64::INFINITY
            }
        };
        along(p.0, d.0).min(along(p.1, d.1)).max(0.0)
    }

    /// Integrate from `seed` in one direction. Returns the new points (seed
    /// excluded) and the length travelled.
    fn integrate(
        &mut self,
        traj: &mut Trajectory,
        seed: (f64, f64),
        sign: f64,
    ) -> (Vec<(f64, f64)>, f64) {
        let mut p = seed;
        let mut points = Vec::new();
        let mut length = 0.0;
        traj.current = self.cell_of(seed);

        while length < self.max_length {
            let Some(k1) = self.direction(p, sign) else { break };
            let mid = (p.0 + 0.5 * self.step * k1.0, p.1 + 0.5 * self.step * k1.1);

            let next = self
                .direction(mid, sign)
                .map(|k2| (p.0 + self.step * k2.0, p.1 + self.step * k2.1))
                .filter(|&q| Self::inside(q));

            match next {
                Some(q) => {
                    if !self.claim(traj, q) {
                        break;
                    }
                    points.push(q);
                    length += self.step;
                    p = q;
                }
                None => {
                    // Finish with an Euler step onto the boundary.
                    let s = Self::step_to_boundary(p, k1).min(self.step);
                    if s > 1e-12 {
                        let q = (p.0 + s * k1.0, p.1 + s * k1.1);
                        if self.claim(traj, q) {
                            points.push(q);
                            length += s;
                        }
                    }
                    break;
                }
            }
        }

        (points, length)
    }
}

fn arc_lengths(points: &[(f64, f64)]) -> Vec<f64> {
    let mut s = Vec::with_capacity(points.len());
    let mut acc = 0.0;
    s.push(0.0);
    for w in points.windows(2) {
        acc += ((w[1].0 - w[0].0).powi(2) + (w[1].1 - w[0].1).powi(2)).sqrt();
        s.push(acc);
    }
    s
}

fn midway_arrow(points: &[(f64, f64)]) -> Option<Arrow> {
    if points.len() < 2 {
        return None;
    }
    let s = arc_lengths(points);
    let half = s[s.len() - 1] / 2.0;
    let n = s.iter().position(|&v| v >= half).unwrap_or(0).min(points.len() - 2);
    let tail = points[n];
    let head = (
        0.5 * (points[n].0 + points[n + 1].0),
        0.5 * (points[n].1 + points[n + 1].1),
    );
    Some(Arrow { tail, head })
}

/// Trace streamlines of `field` over its full extent.
pub fn trace_streamlines(field: &VectorField2D, cfg: &StreamConfig) -> Vec<Streamline> {
    let g = field.grid;
    if g.nx < 2 || g.ny < 2 {
        return Vec::new();
    }
    let (x_max, y_max) = g.extent();
    if !(x_max > 0.0 && y_max > 0.0) {
        return Vec::new();
    }

    let n = mask_size(cfg.density);
    let mut tracer = Tracer {
        field,
        x_max,
        y_max,
        n,
        mask: vec![false; n * n],
        step: cfg.step_fraction.max(1e-3) / (n - 1) as f64,
        max_length: cfg.max_length,
    };

    let magnitude = ScalarField2D {
        grid: g,
        data: field.magnitude(),
    };
    let e_max = field.max_magnitude();
    let width_at = |x: f64, y: f64| {
        if e_max > 0.0 {
            let m = magnitude.sample(x, y).unwrap_or(0.0);
            cfg.max_line_width * m / e_max
        } else {
            0.0
        }
    };

    let mut lines = Vec::new();
    for (xm, ym) in spiral_order(n, n) {
        if tracer.mask[ym * n + xm] {
            continue;
        }
        let seed = (xm as f64 / (n - 1) as f64, ym as f64 / (n - 1) as f64);
        let seed_cell = tracer.cell_of(seed);
        tracer.mask[seed_cell] = true;
        let mut traj = Trajectory {
            claimed: vec![seed_cell],
            current: seed_cell,
        };

        let (back, back_len) = tracer.integrate(&mut traj, seed, -1.0);
        let (fwd, fwd_len) = tracer.integrate(&mut traj, seed, 1.0);

        if back_len + fwd_len < cfg.min_length {
            for c in traj.claimed {
                tracer.mask[c] = false;
            }
            continue;
        }

        let points: Vec<(f64, f64)> = back
            .into_iter()
            .rev()
            .chain(std::iter::once(seed))
            .chain(fwd)
            .map(|(u, v)| (u * x_max, v * y_max))
            .collect();
        let widths = points.iter().map(|&(x, y)| width_at(x, y)).collect();
        let arrow = midway_arrow(&points);

        lines.push(Streamline {
            points,
            widths,
            arrow,
        });
    }

    log::debug!("traced {} streamlines on a {}x{} mask", lines.len(), n, n);
    lines
}
