//! src/graph/shared.rs
//!
//! Per-channel graph state shared between a feeder thread and the UI.
//!
//! The widget itself is single-threaded; this wrapper is how a front-end
//! hands one widget to a sampling thread and a render loop at once.

use std::sync::{Arc, RwLock};

use super::config::GraphConfig;
use super::style::{Gradient, RenderStyle};
use super::surface::{FrameSurface, TextLabels};
use super::widget::{HoverSample, TimeSeriesWidget};
use crate::error::Result;

/// Widget rendering into an in-memory frame that a UI replays.
pub type FrameWidget = TimeSeriesWidget<FrameSurface, TextLabels>;

/// Pointer x coordinate over a plot shown `display_width` wide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub display_width: f64,
}

/// The authoritative shared graph object used across threads.
pub struct GraphShared {
    pub name: String,
    pub widget: FrameWidget,
    /// Last pointer position over the plot, if any.
    pub pointer: Option<Pointer>,
    /// Total samples fed since start, including evicted ones.
    pub received: u64,
}

impl GraphShared {
    /// Construct `GraphShared`.
    pub fn new(cfg: GraphConfig, name: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            widget: TimeSeriesWidget::new(FrameSurface::new(), TextLabels::default(), cfg)?,
            pointer: None,
            received: 0,
        })
    }

    /// Feed one sample.
    pub fn push(&mut self, value: f64) {
        self.received += 1;
        self.widget.add_sample(value);
    }

    /// Sample currently under the pointer, resolved against the live buffer.
    pub fn hover(&self) -> Option<HoverSample> {
        self.pointer
            .and_then(|p| self.widget.hover(p.x, p.display_width))
    }

    /// Drop all samples.
    pub fn reset(&mut self) {
        self.widget.reset();
    }

    /// Flip between flat colour and the default gradient.
    pub fn toggle_gradient(&mut self) {
        let next = match self.widget.config().style {
            RenderStyle::Solid(_) => RenderStyle::Gradient(Gradient::default()),
            RenderStyle::Gradient(_) => RenderStyle::default(),
        };
        self.widget.set_style(next);
    }
}

/// Alias: Arc<RwLock<GraphShared>>
pub type SharedGraph = Arc<RwLock<GraphShared>>;

/// Alias for a write guard.
pub type GraphGuard<'a> = std::sync::RwLockWriteGuard<'a, GraphShared>;

/// Wrap a new graph for sharing.
pub fn shared(cfg: GraphConfig, name: &str) -> Result<SharedGraph> {
    Ok(Arc::new(RwLock::new(GraphShared::new(cfg, name)?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_counts_evicted_samples() {
        let mut g = GraphShared::new(GraphConfig::new(2), "ch").unwrap();
        for v in [1.0, 2.0, 3.0] {
            g.push(v);
        }
        assert_eq!(g.received, 3);
        assert_eq!(g.widget.buffer().len(), 2);
    }

    #[test]
    fn reset_clears_hover() {
        let mut g = GraphShared::new(GraphConfig::new(2), "ch").unwrap();
        g.push(1.0);
        g.pointer = Some(Pointer {
            x: 2.0,
            display_width: 2.0,
        });
        assert!(g.hover().is_some());
        g.reset();
        assert!(g.hover().is_none());
        assert!(g.widget.buffer().is_empty());
    }

    #[test]
    fn parked_pointer_follows_new_samples() {
        let mut g = GraphShared::new(GraphConfig::new(4), "ch").unwrap();
        for v in [1.0, 2.0, 3.0, 4.0] {
            g.push(v);
        }
        g.pointer = Some(Pointer {
            x: 4.0,
            display_width: 4.0,
        });
        assert_eq!(g.hover().map(|h| h.value), Some(4.0));

        g.push(5.0);
        g.push(6.0);
        let newest = g.hover().unwrap();
        assert_eq!(newest.value, 6.0);
        assert_eq!(newest.slot, 1);

        g.pointer = Some(Pointer {
            x: 0.0,
            display_width: 4.0,
        });
        // 1 and 2 were evicted; the oldest retained sample is 3
        assert_eq!(g.hover().map(|h| h.value), Some(3.0));
    }

    #[test]
    fn toggle_gradient_round_trips_style() {
        let mut g = GraphShared::new(GraphConfig::new(2), "ch").unwrap();
        g.toggle_gradient();
        assert!(matches!(g.widget.config().style, RenderStyle::Gradient(_)));
        g.toggle_gradient();
        assert_eq!(g.widget.config().style, RenderStyle::default());
    }
}
