//! src/panels/controls.rs
//!
//! Key and mouse bindings help.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub const BINDINGS: &[(&str, &str)] = &[
    ("Tab", "focus next graph"),
    ("p / click", "pause or resume"),
    ("r / double-click", "reset"),
    ("g", "solid / gradient"),
    ("mouse move", "inspect sample"),
    ("q", "quit"),
];

pub struct ControlsPanel {
    pub bindings: &'static [(&'static str, &'static str)],
}

impl ControlsPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ControlsPanel {
    fn default() -> Self {
        Self { bindings: BINDINGS }
    }
}

impl crate::ui::Panel for ControlsPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let lines: Vec<Line> = self
            .bindings
            .iter()
            .map(|(key, action)| {
                Line::from(vec![
                    Span::styled(format!("{key:>16}"), Style::default().fg(Color::Yellow)),
                    Span::raw("  "),
                    Span::raw(*action),
                ])
            })
            .collect();
        let p = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Controls").borders(Borders::ALL));
        f.render_widget(p, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lists_every_binding() {
        let panel = ControlsPanel::default();
        assert_eq!(panel.bindings.len(), BINDINGS.len());
        assert!(panel.bindings.iter().any(|(key, _)| *key == "q"));
    }
}
