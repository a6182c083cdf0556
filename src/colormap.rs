// src/colormap.rs

use plotters::style::RGBColor;

/// Viridis sampled at nine evenly spaced stops (0.0, 0.125, ..., 1.0).
const VIRIDIS_STOPS: [(f64, f64, f64); 9] = [
    (68.0, 1.0, 84.0),
    (71.0, 44.0, 122.0),
    (59.0, 81.0, 139.0),
    (44.0, 113.0, 142.0),
    (33.0, 144.0, 141.0),
    (39.0, 173.0, 129.0),
    (92.0, 200.0, 99.0),
    (170.0, 220.0, 50.0),
    (253.0, 231.0, 37.0),
];

/// Map t in [0, 1] to a viridis colour. Out-of-range values are clamped,
/// NaN maps to the low end.
pub fn viridis(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let last = VIRIDIS_STOPS.len() - 1;
    let seg = t * last as f64;
    let i = (seg as usize).min(last - 1);
    let s = seg - i as f64;

    let (r0, g0, b0) = VIRIDIS_STOPS[i];
    let (r1, g1, b1) = VIRIDIS_STOPS[i + 1];

    RGBColor(
        (r0 + s * (r1 - r0)).round() as u8,
        (g0 + s * (g1 - g0)).round() as u8,
        (b0 + s * (b1 - b0)).round() as u8,
    )
}

/// Linear normalisation of a value into [vmin, vmax].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    pub vmin: f64,
    pub vmax: f64,
}

impl Normalize {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// Position of `v` in the range; a zero-width range maps everything to 0.5.
    pub fn apply(&self, v: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if !span.is_finite() || span.abs() < 1e-300 {
            return 0.5;
        }
        (v - self.vmin) / span
    }

    pub fn color(&self, v: f64) -> RGBColor {
        viridis(self.apply(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_stops() {
        assert_eq!(viridis(0.0), RGBColor(68, 1, 84));
        assert_eq!(viridis(1.0), RGBColor(253, 231, 37));
        assert_eq!(viridis(0.5), RGBColor(33, 144, 141));
    }

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(7.0), viridis(1.0));
        assert_eq!(viridis(f64::NAN), viridis(0.0));
    }

    #[test]
    fn degenerate_range_maps_to_middle() {
        let norm = Normalize::new(2.0, 2.0);
        assert_eq!(norm.apply(2.0), 0.5);
        assert_eq!(norm.color(123.0), viridis(0.5));
    }

    #[test]
    fn normalize_is_linear() {
        let norm = Normalize::new(-1.0, 3.0);
        assert_eq!(norm.apply(-1.0), 0.0);
        assert_eq!(norm.apply(1.0), 0.5);
        assert_eq!(norm.apply(3.0), 1.0);
    }
}
