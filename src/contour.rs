// src/contour.rs
//
// Isolines of a scalar field by marching squares.
//
// Each grid cell is classified by which of its four corners are >= level;
// crossings are placed on the cell edges by linear interpolation. Segments
// from neighbouring cells meet on a shared edge, which is how they are
// chained into polylines afterwards.
//
// Coordinates are physical: sample (i, j) sits at (grid.x(i), grid.y(j)).

use std::collections::HashMap;

use crate::config::ContourConfig;
use crate::scalar_field::ScalarField2D;

/// A grid edge that a contour can cross. `H(i, j)` joins samples (i, j) and
/// (i + 1, j); `V(i, j)` joins (i, j) and (i, j + 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Edge {
    H(usize, usize),
    V(usize, usize),
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: Edge,
    b: Edge,
}

/// One connected isoline.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub level: f64,
    pub points: Vec<(f64, f64)>,
    pub closed: bool,
}

impl Contour {
    pub fn length(&self) -> f64 {
        polyline_length(&self.points)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContourLabel {
    pub level: f64,
    pub text: String,
    pub position: (f64, f64),
}

#[derive(Debug, Clone, Default)]
pub struct ContourSet {
    pub contours: Vec<Contour>,
    pub labels: Vec<ContourLabel>,
}

pub fn polyline_length(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .map(|w| ((w[1].0 - w[0].0).powi(2) + (w[1].1 - w[0].1).powi(2)).sqrt())
        .sum()
}

/// Text used for a contour label.
pub fn format_level(level: f64) -> String {
    format!("{:.2}", level)
}

/// Segments for one cell, corners p00=(i,j), p10=(i+1,j), p11=(i+1,j+1), p01=(i,j+1).
fn cell_segments(i: usize, j: usize, v: [f64; 4], level: f64) -> ([Option<Segment>; 2], bool) {
    let [p00, p10, p11, p01] = v;

    let mut case = 0u8;
    if p00 >= level {
        case |= 1;
    }
    if p10 >= level {
        case |= 2;
    }
    if p11 >= level {
        case |= 4;
    }
    if p01 >= level {
        case |= 8;
    }

    let south = Edge::H(i, j);
    let north = Edge::H(i, j + 1);
    let west = Edge::V(i, j);
    let east = Edge::V(i + 1, j);
    let seg = |a, b| Some(Segment { a, b });

    // Saddles are resolved by the cell-centre average.
    let centre_high = 0.25 * (p00 + p10 + p11 + p01) >= level;

    let segs = match case {
        0 | 15 => [None, None],
        1 | 14 => [seg(west, south), None],
        2 | 13 => [seg(south, east), None],
        3 | 12 => [seg(west, east), None],
        4 | 11 => [seg(east, north), None],
        6 | 9 => [seg(south, north), None],
        7 | 8 => [seg(west, north), None],
        5 if centre_high => [seg(south, east), seg(west, north)],
        5 => [seg(west, south), seg(east, north)],
        10 if centre_high => [seg(west, south), seg(east, north)],
        10 => [seg(south, east), seg(west, north)],
        _ => [None, None],
    };
    (segs, case == 5 || case == 10)
}

/// Where the isoline crosses `edge`.
fn crossing(field: &ScalarField2D, edge: Edge, level: f64) -> (f64, f64) {
    let g = field.grid;
    let ((i0, j0), (i1, j1)) = match edge {
        Edge::H(i, j) => ((i, j), (i + 1, j)),
        Edge::V(i, j) => ((i, j), (i, j + 1)),
    };
    let v0 = field.value(i0, j0);
    let v1 = field.value(i1, j1);

    let t = if (v1 - v0).abs() < 1e-300 {
        0.5
    } else {
        ((level - v0) / (v1 - v0)).clamp(0.0, 1.0)
    };

    let (x0, y0) = (g.x(i0), g.y(j0));
    let (x1, y1) = (g.x(i1), g.y(j1));
    (x0 + t * (x1 - x0), y0 + t * (y1 - y0))
}

fn march(field: &ScalarField2D, level: f64) -> Vec<Segment> {
    let g = field.grid;
    let mut segments = Vec::new();
    if g.nx < 2 || g.ny < 2 {
        return segments;
    }

    for j in 0..g.ny - 1 {
        for i in 0..g.nx - 1 {
            let v = [
                field.value(i, j),
                field.value(i + 1, j),
                field.value(i + 1, j + 1),
                field.value(i, j + 1),
            ];
            if v.iter().any(|x| x.is_nan()) {
                continue;
            }
            let (segs, _) = cell_segments(i, j, v, level);
            segments.extend(segs.into_iter().flatten());
        }
    }
    segments
}

/// Chain segments that share an edge crossing into polylines.
///
/// Open lines are walked from one of their free ends first so they come out
/// in one piece; whatever remains afterwards is a closed loop.
fn connect(field: &ScalarField2D, segments: &[Segment], level: f64) -> Vec<Contour> {
    let mut by_edge: HashMap<Edge, Vec<usize>> = HashMap::new();
    for (k, s) in segments.iter().enumerate() {
        by_edge.entry(s.a).or_default().push(k);
        by_edge.entry(s.b).or_default().push(k);
    }

    let mut used = vec![false; segments.len()];
    let mut contours = Vec::new();

    let walk = |start: usize, from: Edge, used: &mut Vec<bool>| -> Contour {
        used[start] = true;
        let first = from;
        let mut current = if segments[start].a == from {
            segments[start].b
        } else {
            segments[start].a
        };
        let mut edges = vec![first, current];

        loop {
            let next = by_edge
                .get(&current)
                .and_then(|ids| ids.iter().copied().find(|&k| !used[k]));
            let Some(k) = next else { break };
            used[k] = true;
            current = if segments[k].a == current {
                segments[k].b
            } else {
                segments[k].a
            };
            edges.push(current);
        }

        Contour {
            level,
            points: edges.iter().map(|&e| crossing(field, e, level)).collect(),
            closed: edges.len() > 2 && current == first,
        }
    };

    let is_free_end = |e: Edge| by_edge.get(&e).map_or(false, |ids| ids.len() == 1);

    for k in 0..segments.len() {
        if used[k] {
            continue;
        }
        if is_free_end(segments[k].a) {
            contours.push(walk(k, segments[k].a, &mut used));
        } else if is_free_end(segments[k].b) {
            contours.push(walk(k, segments[k].b, &mut used));
        }
    }
    for k in 0..segments.len() {
        if !used[k] {
            contours.push(walk(k, segments[k].a, &mut used));
        }
    }

    contours
}

/// All isolines of `field` at `level`.
pub fn contour_lines(field: &ScalarField2D, level: f64) -> Vec<Contour> {
    if !level.is_finite() {
        return Vec::new();
    }
    let segments = march(field, level);
    connect(field, &segments, level)
}

/// Point at half the arc length of a polyline.
fn midpoint(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let total = polyline_length(points);
    let first = *points.first()?;
    if total <= 0.0 {
        return Some(first);
    }
    let half = 0.5 * total;
    let mut walked = 0.0;
    for w in points.windows(2) {
        let seg = ((w[1].0 - w[0].0).powi(2) + (w[1].1 - w[0].1).powi(2)).sqrt();
        if walked + seg >= half && seg > 0.0 {
            let t = (half - walked) / seg;
            return Some((w[0].0 + t * (w[1].0 - w[0].0), w[0].1 + t * (w[1].1 - w[0].1)));
        }
        walked += seg;
    }
    points.last().copied()
}

/// Isolines for every configured level plus one label per long-enough line.
pub fn contour_set(field: &ScalarField2D, cfg: &ContourConfig) -> ContourSet {
    let mut set = ContourSet::default();
    for &level in &cfg.levels {
        for c in contour_lines(field, level) {
            if c.length() >= cfg.min_label_length {
                if let Some(position) = midpoint(&c.points) {
                    set.labels.push(ContourLabel {
                        level,
                        text: format_level(level),
                        position,
                    });
                }
            }
            set.contours.push(c);
        }
    }
    log::debug!(
        "{} contour lines, {} labels over {} levels",
        set.contours.len(),
        set.labels.len(),
        cfg.levels.len()
    );
    set
}
