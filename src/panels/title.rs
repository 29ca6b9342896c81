//! src/panels/title.rs
//!
//! Header panel: application name and the active sample source.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct TitlePanel {
    pub title: String,
    pub source: String,
}

impl TitlePanel {
    pub fn new(title: &str, source: &str) -> Self {
        Self {
            title: title.to_string(),
            source: source.to_string(),
        }
    }
}

impl crate::ui::Panel for TitlePanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                self.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  source: "),
            Span::styled(self.source.as_str(), Style::default().fg(Color::Cyan)),
        ]);
        f.render_widget(
            Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
            area,
        );
    }
}
