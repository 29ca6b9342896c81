//! src/panels/info.rs
//!
//! Graph info panel: run state, render style, statistics and hovered sample.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use ringscope::graph::shared::SharedGraph;
use ringscope::graph::{RenderStyle, RunState};

/// Read-only info panel; `highlighted` affects border style.
pub struct InfoPanel {
    pub shared: SharedGraph,
    pub highlighted: bool,
}

impl InfoPanel {
    pub fn new(shared: SharedGraph, highlighted: bool) -> Self {
        Self {
            shared,
            highlighted,
        }
    }
}

impl crate::ui::Panel for InfoPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let Ok(g) = self.shared.read() else {
            return;
        };
        let widget = &g.widget;
        let buffer = widget.buffer();

        let (state, state_style) = match widget.state() {
            RunState::Running => ("running", Style::default().fg(Color::Green)),
            RunState::Paused => ("paused", Style::default().fg(Color::Red)),
        };
        let style = match &widget.config().style {
            RenderStyle::Solid(c) => format!("solid {c}"),
            RenderStyle::Gradient(grad) => format!("gradient ({} stops)", grad.stops().len()),
        };
        let mean = widget
            .mean()
            .map_or_else(|| "-".to_string(), |m| format!("{:.3}", m));
        let hover = g.hover().map_or_else(
            || "-".to_string(),
            |h| format!("col {} slot {} = {:.3}", h.position, h.slot, h.value),
        );

        let lines = vec![
            Line::from(vec![
                Span::styled(&g.name, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(state, state_style),
                Span::raw(format!("  {style}")),
            ]),
            Line::from(format!(
                "mean={}  scale={:.3}",
                mean,
                widget.scale()
            )),
            Line::from(format!(
                "fill={}/{}  received={}",
                buffer.len(),
                buffer.capacity(),
                g.received
            )),
            Line::from(format!("hover {hover}")),
        ];

        let mut block = Block::default().title("Info").borders(Borders::ALL);
        if self.highlighted {
            block = block.style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
