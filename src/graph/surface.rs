//! src/graph/surface.rs
//!
//! Drawing-surface and label abstractions the widget renders into, plus
//! recording implementations that front-ends replay and tests inspect.

use super::style::{Rgb, Stroke};

/// A 2D canvas-like target with path construction and stroking.
///
/// Coordinates are in surface pixels, origin top-left, y growing downwards.
pub trait DrawingSurface {
    /// Set the pixel dimensions; called once by the widget on construction.
    fn resize(&mut self, width: u32, height: u32);

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Discard the current path and start a new one.
    fn begin_path(&mut self);

    /// Start a new subpath at `(x, y)`.
    fn move_to(&mut self, x: f64, y: f64);

    /// Extend the current subpath to `(x, y)`.
    fn line_to(&mut self, x: f64, y: f64);

    /// Paint the current path.
    fn stroke(&mut self, stroke: &Stroke);
}

/// Receives the min/max text shown next to the graph.
pub trait LabelSink {
    fn set_min(&mut self, text: &str);
    fn set_max(&mut self, text: &str);
}

/// One painted path: its subpaths (each a polyline) and the paint used.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokedPath {
    pub subpaths: Vec<Vec<(f64, f64)>>,
    pub stroke: Stroke,
}

impl StrokedPath {
    /// Line segments `((x1, y1), (x2, y2))` across all subpaths.
    pub fn segments(&self) -> impl Iterator<Item = ((f64, f64), (f64, f64))> + '_ {
        self.subpaths
            .iter()
            .flat_map(|sp| sp.windows(2).map(|w| (w[0], w[1])))
    }

    /// Colour of a segment, sampled at its vertical midpoint.
    pub fn segment_color(&self, a: (f64, f64), b: (f64, f64), height: f64) -> Rgb {
        self.stroke.color_at((a.1 + b.1) / 2.0, height)
    }
}

/// Surface that records every stroked path of the current frame.
#[derive(Clone, Debug, Default)]
pub struct FrameSurface {
    width: u32,
    height: u32,
    path: Vec<Vec<(f64, f64)>>,
    strokes: Vec<StrokedPath>,
    /// number of `clear` calls, i.e. frames started
    frames: u64,
}

impl FrameSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths stroked since the last `clear`, in drawing order.
    pub fn strokes(&self) -> &[StrokedPath] {
        &self.strokes
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl DrawingSurface for FrameSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.path.clear();
        self.strokes.clear();
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.path.clear();
        self.strokes.clear();
        self.frames += 1;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(vec![(x, y)]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        // a line-to without a current point acts as a move-to
        match self.path.last_mut() {
            Some(sp) => sp.push((x, y)),
            None => self.path.push(vec![(x, y)]),
        }
    }

    fn stroke(&mut self, stroke: &Stroke) {
        self.strokes.push(StrokedPath {
            subpaths: self.path.clone(),
            stroke: stroke.clone(),
        });
    }
}

/// Plain-text min/max labels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextLabels {
    pub min: String,
    pub max: String,
}

impl LabelSink for TextLabels {
    fn set_min(&mut self, text: &str) {
        self.min.clear();
        self.min.push_str(text);
    }

    fn set_max(&mut self, text: &str) {
        self.max.clear();
        self.max.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_subpaths_per_stroke() {
        let mut s = FrameSurface::new();
        s.resize(10, 4);
        s.clear();
        s.begin_path();
        s.move_to(0.0, 1.0);
        s.line_to(1.0, 2.0);
        s.move_to(3.0, 0.0);
        s.line_to(4.0, 0.0);
        s.stroke(&Stroke::solid(Rgb::SERIES_BLUE, 2.0));

        assert_eq!(s.frames(), 1);
        let path = &s.strokes()[0];
        assert_eq!(path.subpaths.len(), 2);
        assert_eq!(path.segments().count(), 2);
    }

    #[test]
    fn clear_drops_previous_frame() {
        let mut s = FrameSurface::new();
        s.begin_path();
        s.move_to(0.0, 0.0);
        s.stroke(&Stroke::solid(Rgb::LIGHT_GREY, 1.0));
        s.clear();
        assert!(s.strokes().is_empty());
    }
}
