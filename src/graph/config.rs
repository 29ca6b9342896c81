//! src/graph/config.rs
//!
//! Configuration values for a graph widget and its memory bound.
//!
//! Centralized parameters for buffer capacity, surface height, line style and
//! background grid density.

use super::style::{RenderStyle, Rgb};
use crate::error::{GraphError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
    /// Number of samples retained; also the surface width in pixel columns.
    pub capacity: usize,

    /// Surface height in pixels.
    pub height: u32,

    /// Series line width.
    pub line_width: f64,

    /// Draw the background grid before the series.
    pub grid: bool,

    /// Number of vertical grid lines.
    pub grid_columns: usize,

    /// Number of horizontal grid lines.
    pub grid_rows: usize,

    /// Flat colour or gradient for the series line.
    pub style: RenderStyle,
}

impl GraphConfig {
    pub const DEFAULT_HEIGHT: u32 = 80;

    /// Create a `GraphConfig` with default styling.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    /// Reject parameters that cannot produce a widget.
    pub fn validate(&self) -> Result<()> {
        // the surface is one column per slot and surface widths are u32
        if self.capacity == 0 || u32::try_from(self.capacity).is_err() {
            return Err(GraphError::InvalidCapacity(self.capacity));
        }
        if self.height == 0 {
            return Err(GraphError::InvalidHeight(self.height));
        }
        Ok(())
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            capacity: 15 * 30,
            height: Self::DEFAULT_HEIGHT,
            line_width: 2.0,
            grid: true,
            grid_columns: 20,
            grid_rows: 8,
            style: RenderStyle::Solid(Rgb::SERIES_BLUE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = GraphConfig::default();
        assert_eq!(cfg.capacity, 450);
        assert_eq!(cfg.height, 80);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(
            GraphConfig::new(0).validate(),
            Err(GraphError::InvalidCapacity(0))
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn capacity_wider_than_a_surface_is_rejected() {
        let too_wide = u32::MAX as usize + 1;
        assert_eq!(
            GraphConfig::new(too_wide).validate(),
            Err(GraphError::InvalidCapacity(too_wide))
        );
        assert!(GraphConfig::new(u32::MAX as usize).validate().is_ok());
    }

    #[test]
    fn zero_height_is_rejected() {
        assert_eq!(
            GraphConfig::new(10).with_height(0).validate(),
            Err(GraphError::InvalidHeight(0))
        );
    }
}
