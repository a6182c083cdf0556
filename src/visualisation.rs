// src/visualisation.rs

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

use crate::config::PlotConfig;
use crate::pipeline::PreparedPlot;

/// Fraction of the figure width given to the main axes; the rest holds the colourbar.
const MAIN_AXES_FRACTION: f64 = 0.86;
/// Number of colour steps in the colourbar.
const COLORBAR_STEPS: usize = 256;

/// Rendered figure as packed 8-bit RGB.
pub struct RgbImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Pad a zero-width (or non-finite) value range so it can be used as an axis.
fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < 1e-12 {
        let delta = if hi.abs() < 1e-12 { 0.5 } else { 0.1 * hi.abs() };
        return (lo - delta, hi + delta);
    }
    (lo, hi)
}

fn px(cfg: &PlotConfig, points: f64) -> u32 {
    cfg.figure.points_to_px(points).round().max(1.0) as u32
}

/// Draw the complete figure (heatmap, streamlines, contours, bars, colourbar)
/// onto `root`.
pub fn draw_figure<DB>(
    root: &DrawingArea<DB, Shift>,
    plot: &PreparedPlot,
    cfg: &PlotConfig,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (width, _) = root.dim_in_pixel();
    let split = (width as f64 * MAIN_AXES_FRACTION).round() as i32;
    let (main_area, bar_area) = root.split_horizontally(split);

    let phi = &plot.potential;
    let grid = phi.grid;
    let (x_max, y_max) = grid.extent();

    let mut chart = ChartBuilder::on(&main_area)
        .margin(20)
        .caption(&cfg.figure.title, ("sans-serif", 24))
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x")
        .y_desc("y")
        .label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 18))
        .draw()?;

    // Heatmap: each sample fills a 1/N cell of the extent, origin at the bottom
    let cw = x_max / grid.nx as f64;
    let ch = y_max / grid.ny as f64;
    let norm = plot.norm;
    chart.draw_series(phi.rows().enumerate().flat_map(|(j, row)| {
        row.iter().enumerate().map(move |(i, &v)| {
            let x0 = i as f64 * cw;
            let y0 = j as f64 * ch;
            Rectangle::new([(x0, y0), (x0 + cw, y0 + ch)], norm.color(v).filled())
        })
    }))?;

    // Streamlines, one path element per segment so the width can vary
    for line in &plot.streamlines {
        chart.draw_series(line.points.windows(2).zip(line.widths.windows(2)).map(
            |(p, w)| {
                let stroke = px(cfg, 0.5 * (w[0] + w[1]));
                PathElement::new(vec![p[0], p[1]], WHITE.stroke_width(stroke))
            },
        ))?;
    }

    // Arrow heads are built in pixel space so they are not skewed by the
    // axes aspect ratio.
    let head_len = cfg.figure.points_to_px(10.0 * cfg.streamlines.arrow_size);
    let head_half = 0.4 * head_len;
    for arrow in plot.streamlines.iter().filter_map(|l| l.arrow) {
        let (tx, ty) = chart.backend_coord(&arrow.tail);
        let (hx, hy) = chart.backend_coord(&arrow.head);
        let (dx, dy) = ((hx - tx) as f64, (hy - ty) as f64);
        let len = (dx * dx + dy * dy).sqrt();
        if len <= 0.0 {
            continue;
        }
        let (ux, uy) = (dx / len, dy / len);
        let tip = (hx as f64 + 0.5 * head_len * ux, hy as f64 + 0.5 * head_len * uy);
        let base = (tip.0 - head_len * ux, tip.1 - head_len * uy);
        let left = (base.0 - head_half * uy, base.1 + head_half * ux);
        let right = (base.0 + head_half * uy, base.1 - head_half * ux);
        let to_i = |p: (f64, f64)| (p.0.round() as i32, p.1.round() as i32);
        root.draw(&Polygon::new(
            vec![to_i(tip), to_i(left), to_i(right)],
            WHITE.filled(),
        ))?;
    }

    // Contour lines and their labels
    let contour_width = px(cfg, 1.5);
    chart.draw_series(
        plot.contours
            .contours
            .iter()
            .map(|c| PathElement::new(c.points.clone(), RED.stroke_width(contour_width))),
    )?;
    let label_style = ("sans-serif", cfg.figure.points_to_px(cfg.contours.label_font_size))
        .into_font()
        .color(&RED)
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(
        plot.contours
            .labels
            .iter()
            .map(|l| Text::new(l.text.clone(), l.position, label_style.clone())),
    )?;

    // Electrode bars
    let bar_width = px(cfg, cfg.geometry.line_width);
    chart.draw_series(
        cfg.geometry
            .bars()
            .into_iter()
            .map(|(x, y0, y1)| PathElement::new(vec![(x, y0), (x, y1)], BLUE.stroke_width(bar_width))),
    )?;

    draw_colorbar(&bar_area, plot, cfg)?;
    Ok(())
}

fn draw_colorbar<DB>(
    area: &DrawingArea<DB, Shift>,
    plot: &PreparedPlot,
    cfg: &PlotConfig,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (vmin, vmax) = padded_range(plot.norm.vmin, plot.norm.vmax);

    let mut bar = ChartBuilder::on(area)
        .margin_top(62)
        .margin_bottom(65)
        .margin_left(5)
        .margin_right(10)
        .right_y_label_area_size(70)
        .build_cartesian_2d(0f64..1f64, vmin..vmax)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc(cfg.figure.colorbar_label.as_str())
        .y_labels(8)
        .label_style(("sans-serif", 13))
        .axis_desc_style(("sans-serif", 16))
        .draw()?;

    let step = (vmax - vmin) / COLORBAR_STEPS as f64;
    let norm = plot.norm;
    bar.draw_series((0..COLORBAR_STEPS).map(|k| {
        let lo = vmin + k as f64 * step;
        let hi = lo + step;
        Rectangle::new([(0.0, lo), (1.0, hi)], norm.color(0.5 * (lo + hi)).filled())
    }))?;

    Ok(())
}

/// Render the figure to a PNG file.
pub fn render_png(
    path: &Path,
    plot: &PreparedPlot,
    cfg: &PlotConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let size = cfg.figure.pixel_size();
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw_figure(&root, plot, cfg)?;
    root.present()?;
    Ok(())
}

/// Render the figure into an in-memory RGB buffer.
pub fn render_rgb(
    plot: &PreparedPlot,
    cfg: &PlotConfig,
) -> Result<RgbImage, Box<dyn std::error::Error>> {
    let (width, height) = cfg.figure.pixel_size();
    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        draw_figure(&root, plot, cfg)?;
        root.present()?;
    }
    Ok(RgbImage {
        width,
        height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_widens_flat_fields() {
        let (lo, hi) = padded_range(2.0, 2.0);
        assert!((lo - 1.8).abs() < 1e-12 && (hi - 2.2).abs() < 1e-12);
        assert_eq!(padded_range(0.0, 0.0), (-0.5, 0.5));
        assert_eq!(padded_range(-1.0, 3.0), (-1.0, 3.0));
        assert_eq!(padded_range(f64::NAN, 1.0), (0.0, 1.0));
    }

    #[test]
    fn line_widths_never_drop_below_one_pixel() {
        let cfg = PlotConfig::default();
        assert_eq!(px(&cfg, 0.0), 1);
        assert_eq!(px(&cfg, 8.0), 11);
    }
}
