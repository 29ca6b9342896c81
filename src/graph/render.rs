//! src/graph/render.rs
//!
//! Auto-scaling draw algorithm.
//!
//! Maps the buffer mean onto the vertical centerline and `mean ± scale` onto
//! the top and bottom edges, drawing samples oldest (left) to newest (right).

use super::buffer::SampleBuffer;
use super::config::GraphConfig;
use super::style::{Rgb, Stroke};
use super::surface::{DrawingSurface, LabelSink};

/// Vertical offset from the centerline for `value`.
///
/// Zero when `scale` is zero, so a flat series sits on the centerline.
pub fn vertical_offset(value: f64, mean: f64, scale: f64, height: f64) -> f64 {
    if scale <= 0.0 || !scale.is_finite() {
        return 0.0;
    }
    0.5 * (height * (value - mean) / scale).round()
}

/// Surface y coordinate for `value`.
pub fn plot_y(value: f64, mean: f64, scale: f64, height: f64) -> f64 {
    0.5 * height - vertical_offset(value, mean, scale, height)
}

/// Evenly spaced reference lines, independent of the data.
pub fn draw_grid<S: DrawingSurface + ?Sized>(surface: &mut S, columns: usize, rows: usize) {
    let width = surface.width() as f64;
    let height = surface.height() as f64;
    let grid = Stroke::solid(Rgb::LIGHT_GREY, 1.0);

    if columns > 0 {
        let dx = (width / columns as f64).round();
        for i in 0..columns {
            let x = 0.5 + dx * i as f64;
            surface.begin_path();
            surface.move_to(x, 0.0);
            surface.line_to(x, height);
            surface.stroke(&grid);
        }
    }

    if rows > 0 {
        let dy = (height / rows as f64).round();
        for i in 0..rows {
            let y = 0.5 + dy * i as f64;
            surface.begin_path();
            surface.move_to(0.0, y);
            surface.line_to(width, y);
            surface.stroke(&grid);
        }
    }
}

/// Trace the series as a path. Empty slots break the line: the next value
/// after a gap starts a new subpath. Returns the number of points plotted.
pub fn trace_series<S: DrawingSurface + ?Sized>(buffer: &SampleBuffer, surface: &mut S) -> usize {
    let Some(mean) = buffer.mean() else {
        return 0;
    };
    let scale = buffer.scale();
    let height = surface.height() as f64;

    surface.begin_path();
    let mut pen_down = false;
    let mut plotted = 0;
    for (position, slot) in buffer.iter_oldest_to_newest() {
        let Some(value) = slot else {
            pen_down = false;
            continue;
        };
        let x = position as f64;
        let y = plot_y(value, mean, scale, height);
        if pen_down {
            surface.line_to(x, y);
        } else {
            surface.move_to(x, y);
            pen_down = true;
        }
        plotted += 1;
    }
    plotted
}

/// Min/max label text: `mean ∓ scale` rounded to integers, or empty strings
/// when there is nothing to show.
pub fn range_labels(buffer: &SampleBuffer) -> (String, String) {
    match buffer.range() {
        Some((lo, hi)) => (
            format!("{}", lo.round() as i64),
            format!("{}", hi.round() as i64),
        ),
        None => (String::new(), String::new()),
    }
}

/// Draw one full frame of `buffer` onto `surface` and refresh `labels`.
pub fn render_frame<S, L>(buffer: &SampleBuffer, config: &GraphConfig, surface: &mut S, labels: &mut L)
where
    S: DrawingSurface + ?Sized,
    L: LabelSink + ?Sized,
{
    surface.clear();

    if config.grid {
        draw_grid(surface, config.grid_columns, config.grid_rows);
    }

    if trace_series(buffer, surface) > 0 {
        surface.stroke(&Stroke {
            style: config.style.clone(),
            width: config.line_width,
        });
    }

    let (min, max) = range_labels(buffer);
    labels.set_min(&min);
    labels.set_max(&max);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::style::RenderStyle;
    use crate::graph::surface::{FrameSurface, TextLabels};

    fn surface(width: u32, height: u32) -> FrameSurface {
        let mut s = FrameSurface::new();
        s.resize(width, height);
        s
    }

    fn buffer(capacity: usize, values: &[f64]) -> SampleBuffer {
        let mut b = SampleBuffer::new(capacity).unwrap();
        for &v in values {
            b.insert(v);
        }
        b
    }

    #[test]
    fn offset_spans_half_height_at_extremes() {
        assert_eq!(vertical_offset(9.0, 5.0, 4.0, 80.0), 40.0);
        assert_eq!(vertical_offset(1.0, 5.0, 4.0, 80.0), -40.0);
        assert_eq!(plot_y(9.0, 5.0, 4.0, 80.0), 0.0);
        assert_eq!(plot_y(1.0, 5.0, 4.0, 80.0), 80.0);
        assert_eq!(plot_y(5.0, 5.0, 4.0, 80.0), 40.0);
    }

    #[test]
    fn zero_scale_maps_to_centerline() {
        assert_eq!(vertical_offset(3.0, 3.0, 0.0, 80.0), 0.0);
        assert_eq!(plot_y(3.0, 3.0, 0.0, 80.0), 40.0);
    }

    #[test]
    fn offset_rounds_before_halving() {
        // 80 * 1 / 3 = 26.67 -> 27 -> 13.5
        assert_eq!(vertical_offset(6.0, 5.0, 3.0, 80.0), 13.5);
    }

    #[test]
    fn grid_draws_configured_line_counts() {
        let mut s = surface(100, 80);
        draw_grid(&mut s, 20, 8);
        assert_eq!(s.strokes().len(), 28);
        let first = &s.strokes()[0].subpaths[0];
        assert_eq!(first, &vec![(0.5, 0.0), (0.5, 80.0)]);
        let second = &s.strokes()[1].subpaths[0];
        assert_eq!(second[0], (5.5, 0.0));
        let row = &s.strokes()[21].subpaths[0];
        assert_eq!(row, &vec![(0.0, 10.5), (100.0, 10.5)]);
    }

    #[test]
    fn empty_buffer_draws_no_series() {
        let b = buffer(5, &[]);
        let mut s = surface(5, 80);
        let mut labels = TextLabels {
            min: "old".into(),
            max: "old".into(),
        };
        let cfg = GraphConfig::new(5).with_grid(false);
        render_frame(&b, &cfg, &mut s, &mut labels);
        assert_eq!(s.frames(), 1);
        assert!(s.strokes().is_empty());
        assert_eq!(labels, TextLabels::default());
    }

    #[test]
    fn series_maps_mean_to_centerline() {
        let b = buffer(3, &[1.0, 5.0, 9.0]);
        let mut s = surface(3, 80);
        assert_eq!(trace_series(&b, &mut s), 3);
        s.stroke(&Stroke::solid(Rgb::SERIES_BLUE, 2.0));
        let path = &s.strokes()[0];
        assert_eq!(path.subpaths, vec![vec![(0.0, 80.0), (1.0, 40.0), (2.0, 0.0)]]);
    }

    #[test]
    fn constant_series_is_flat_on_centerline() {
        let b = buffer(4, &[7.0; 6]);
        let mut s = surface(4, 80);
        trace_series(&b, &mut s);
        s.stroke(&Stroke::solid(Rgb::SERIES_BLUE, 2.0));
        let ys: Vec<f64> = s.strokes()[0].subpaths[0].iter().map(|p| p.1).collect();
        assert_eq!(ys, vec![40.0; 4]);
    }

    #[test]
    fn partial_buffer_starts_path_at_first_sample() {
        let b = buffer(5, &[2.0, 4.0]);
        let mut s = surface(5, 80);
        trace_series(&b, &mut s);
        s.stroke(&Stroke::solid(Rgb::SERIES_BLUE, 2.0));
        let path = &s.strokes()[0];
        assert_eq!(path.subpaths.len(), 1);
        assert_eq!(path.subpaths[0][0].0, 3.0);
        assert_eq!(path.subpaths[0][1].0, 4.0);
    }

    #[test]
    fn labels_show_rounded_range() {
        let b = buffer(4, &[1.2, 2.0, 3.9]);
        let (min, max) = range_labels(&b);
        // mean 2.3667, scale 1.5333
        assert_eq!(min, "1");
        assert_eq!(max, "4");
    }

    #[test]
    fn full_frame_strokes_with_configured_style() {
        let b = buffer(4, &[1.0, 2.0, 3.0, 4.0]);
        let mut s = surface(4, 80);
        let mut labels = TextLabels::default();
        let style = RenderStyle::Gradient(Default::default());
        let cfg = GraphConfig::new(4).with_style(style.clone());
        render_frame(&b, &cfg, &mut s, &mut labels);

        let series = s.strokes().last().unwrap();
        assert_eq!(series.stroke.style, style);
        assert_eq!(series.stroke.width, 2.0);
        assert_eq!(s.strokes().len(), cfg.grid_columns + cfg.grid_rows + 1);
        assert_eq!(labels.min, "1");
        assert_eq!(labels.max, "4");
    }
}
