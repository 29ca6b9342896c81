//! src/panels/graph.rs
//!
//! Graph panel: replays the widget's recorded frame on a braille canvas, with
//! a stats row carrying the min/max labels and the paused marker.
//!
//! The widget draws in surface pixels (y down, one column per sample); the
//! canvas uses the same x range and a flipped y axis.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Line as CanvasLine, Points},
    },
};

use ringscope::graph::shared::SharedGraph;
use ringscope::graph::{DrawingSurface, RunState};

/// A lightweight wrapper around the shared graph state used for rendering.
pub struct GraphPanel {
    pub shared: SharedGraph,
    pub channel: usize,
    pub focused: bool,
}

impl GraphPanel {
    /// Create a new GraphPanel for a shared graph.
    pub fn new(shared: SharedGraph, channel: usize, focused: bool) -> Self {
        Self {
            shared,
            channel,
            focused,
        }
    }

    /// Split `area` into the stats row and the bordered chart block.
    fn layout(area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        (chunks[0], chunks[1])
    }

    fn chart_block(title: String, focused: bool) -> Block<'static> {
        let mut block = Block::default().title(title).borders(Borders::ALL);
        if focused {
            block = block.border_style(Style::default().fg(Color::Yellow));
        }
        block
    }
}

impl crate::ui::Panel for GraphPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let Ok(g) = self.shared.read() else {
            return;
        };
        let (stats_area, chart_area) = GraphPanel::layout(area);
        let widget = &g.widget;
        let hover = g.hover();
        let labels = widget.labels();

        // Stats row (min, max, state)
        let mut spans = vec![
            Span::styled("min ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{:>8}", labels.min)),
            Span::styled("  max ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{:>8}", labels.max)),
        ];
        if let Some(hover) = hover {
            spans.push(Span::styled("  @ ", Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(format!("{:.3}", hover.value)));
        }
        if widget.state() == RunState::Paused {
            spans.push(Span::styled(
                "  PAUSED",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        let stats = Paragraph::new(Line::from(spans))
            .block(Block::default().title("Range").borders(Borders::ALL));
        f.render_widget(stats, stats_area);

        let surface = widget.surface();
        let width = surface.width() as f64;
        let height = surface.height() as f64;
        let hover_x = hover.map(|h| h.position as f64);

        let canvas = Canvas::default()
            .block(GraphPanel::chart_block(g.name.clone(), self.focused))
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for path in surface.strokes() {
                    for sub in &path.subpaths {
                        if let [(x, y)] = sub.as_slice() {
                            let c = super::color(path.stroke.color_at(*y, height));
                            ctx.draw(&Points {
                                coords: &[(*x, height - *y)],
                                color: c,
                            });
                        }
                    }
                    for (a, b) in path.segments() {
                        let c = super::color(path.segment_color(a, b, height));
                        ctx.draw(&CanvasLine::new(a.0, height - a.1, b.0, height - b.1, c));
                    }
                }
                if let Some(x) = hover_x {
                    ctx.draw(&CanvasLine::new(x, 0.0, x, height, Color::Yellow));
                }
            });
        f.render_widget(canvas, chart_area);
    }

    fn pointer_target(&self, area: Rect) -> Option<(usize, Rect)> {
        let (_, chart_area) = GraphPanel::layout(area);
        let inner = Block::default().borders(Borders::ALL).inner(chart_area);
        (inner.width > 0 && inner.height > 0).then_some((self.channel, inner))
    }
}
