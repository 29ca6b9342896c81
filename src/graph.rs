//! src/graph.rs
//!
//! Top-level `graph` module exposing the buffer, renderer, widget and the
//! types they share.

pub mod buffer;
pub mod config;
pub mod render;
pub mod shared;
pub mod style;
pub mod surface;
pub mod widget;

/// Re-exports
pub use buffer::SampleBuffer;
pub use config::GraphConfig;
pub use style::{Gradient, RenderStyle, Rgb, Stroke};
pub use surface::{DrawingSurface, FrameSurface, LabelSink, StrokedPath, TextLabels};
pub use widget::{HoverSample, RunState, TimeSeriesWidget};
