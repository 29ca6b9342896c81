//! src/graph/widget.rs
//!
//! Live time-series widget: owns a sample buffer, a drawing surface and the
//! min/max labels, and drives redraws from pause/resume/reset and new samples.

use tracing::{debug, trace};

use super::buffer::SampleBuffer;
use super::config::GraphConfig;
use super::render::render_frame;
use super::style::RenderStyle;
use super::surface::{DrawingSurface, LabelSink};
use crate::error::{GraphError, Result};

/// Redraw state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunState {
    /// Every new sample triggers a redraw.
    #[default]
    Running,
    /// Samples are recorded but the visible frame stays frozen.
    Paused,
}

/// The sample under a pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverSample {
    /// Column from the left, 0 = oldest retained sample.
    pub position: usize,
    /// Absolute slot in the buffer.
    pub slot: usize,
    pub value: f64,
}

/// Map a pointer x coordinate on a surface shown `display_width` wide to a
/// relative buffer position in `[0, capacity)`.
///
/// The leftmost column resolves to the oldest sample and the rightmost to the
/// newest. Out-of-range pointers are clamped.
pub fn hover_position(capacity: usize, pointer_x: f64, display_width: f64) -> usize {
    if capacity == 0 {
        return 0;
    }
    let ratio = if display_width > 0.0 && pointer_x.is_finite() {
        pointer_x / display_width
    } else {
        0.0
    };
    let column = (capacity as f64 * ratio).round().clamp(1.0, capacity as f64);
    column as usize - 1
}

pub struct TimeSeriesWidget<S, L> {
    buffer: SampleBuffer,
    state: RunState,
    config: GraphConfig,
    surface: S,
    labels: L,
}

impl<S: DrawingSurface, L: LabelSink> TimeSeriesWidget<S, L> {
    /// Build a widget around `surface` and `labels`.
    ///
    /// The surface is resized to `capacity × height` and an initial (empty)
    /// frame is drawn. Fails before accepting any sample when the config is
    /// invalid.
    pub fn new(mut surface: S, labels: L, config: GraphConfig) -> Result<Self> {
        config.validate()?;
        let width = u32::try_from(config.capacity)
            .map_err(|_| GraphError::InvalidCapacity(config.capacity))?;
        let buffer = SampleBuffer::new(config.capacity)?;
        surface.resize(width, config.height);
        debug!(
            capacity = config.capacity,
            height = config.height,
            "time-series widget created"
        );
        let mut widget = Self {
            buffer,
            state: RunState::Running,
            config,
            surface,
            labels,
        };
        widget.render();
        Ok(widget)
    }

    /// Record a sample; redraw unless paused.
    pub fn add_sample(&mut self, value: f64) {
        self.buffer.insert(value);
        trace!(value, paused = self.is_paused(), "sample added");
        if self.state == RunState::Running {
            self.render();
        }
    }

    /// Flip Running/Paused and draw the frame for the new state.
    pub fn toggle_pause(&mut self) -> RunState {
        self.state = match self.state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        };
        debug!(state = ?self.state, "pause toggled");
        self.render();
        self.state
    }

    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            self.toggle_pause();
        }
    }

    pub fn resume(&mut self) {
        if self.state == RunState::Paused {
            self.toggle_pause();
        }
    }

    /// Drop all samples, force Running, and redraw.
    pub fn reset(&mut self) {
        self.state = RunState::Running;
        self.buffer = self.buffer.fresh();
        debug!(capacity = self.buffer.capacity(), "widget reset");
        self.render();
    }

    /// Switch between flat colour and gradient; redraws once.
    pub fn set_style(&mut self, style: RenderStyle) {
        self.config.style = style;
        self.render();
    }

    /// Draw the current buffer state.
    pub fn render(&mut self) {
        render_frame(&self.buffer, &self.config, &mut self.surface, &mut self.labels);
    }

    /// Resolve the sample under a pointer; `None` when that slot is empty.
    pub fn hover(&self, pointer_x: f64, display_width: f64) -> Option<HoverSample> {
        let capacity = self.buffer.capacity();
        let position = hover_position(capacity, pointer_x, display_width);
        let slot = (self.buffer.write_index() + position) % capacity;
        self.buffer.slot(slot).map(|value| HoverSample {
            position,
            slot,
            value,
        })
    }

    pub fn mean(&self) -> Option<f64> {
        self.buffer.mean()
    }

    pub fn scale(&self) -> f64 {
        self.buffer.scale()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn labels(&self) -> &L {
        &self.labels
    }
}
