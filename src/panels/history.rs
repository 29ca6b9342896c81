//! src/panels/history.rs
//!
//! History panel: the most recent retained samples of a graph, newest last.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use ringscope::graph::shared::SharedGraph;

/// Shows the tail of the graph's sample buffer.
pub struct HistoryPanel {
    pub shared: SharedGraph,
}

impl HistoryPanel {
    /// Create a new HistoryPanel.
    pub fn new(shared: SharedGraph) -> Self {
        Self { shared }
    }
}

impl crate::ui::Panel for HistoryPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let Ok(g) = self.shared.read() else {
            return;
        };
        let buffer = g.widget.buffer();
        let rows = area.height.saturating_sub(2) as usize;
        let len = buffer.len();
        let start = len.saturating_sub(rows);
        // sample number of the oldest retained value
        let first_seq = g.received.saturating_sub(len as u64);

        let lines: Vec<Line> = buffer
            .values()
            .enumerate()
            .skip(start)
            .map(|(i, v)| {
                let value_style = if i + 1 == len {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                Line::from(vec![
                    Span::styled("#", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        format!("{:<8}", first_seq + i as u64),
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(format!("{:.3}", v), value_style),
                ])
            })
            .collect();

        let block = Block::default().title("History").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
