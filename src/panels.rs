//! src/panels.rs
//!
//! Top-level panels module and re-exports.

pub mod controls;
pub mod graph;
pub mod history;
pub mod info;
pub mod title;

pub use controls::ControlsPanel;
pub use graph::GraphPanel;
pub use history::HistoryPanel;
pub use info::InfoPanel;
pub use title::TitlePanel;

use ratatui::style::Color;
use ringscope::graph::Rgb;

/// Toolkit colour for a graph colour.
pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}
