//! src/ui/node.rs
//!
//! Recursive layout Node + Panel trait used across the UI, plus the hit map
//! that routes pointer events back to the graph drawn under them.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

/// Panel trait: any renderable surface implements this.
pub trait Panel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect);

    /// Channel index and plot rectangle inside `area` that accepts pointer
    /// events, if any.
    fn pointer_target(&self, _area: Rect) -> Option<(usize, Rect)> {
        None
    }
}

/// Plot rectangles recorded during the last draw, keyed by channel.
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    targets: Vec<(usize, Rect)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.targets.clear();
    }

    pub fn record(&mut self, channel: usize, rect: Rect) {
        self.targets.push((channel, rect));
    }

    /// Channel and plot rectangle under terminal cell `(column, row)`.
    pub fn locate(&self, column: u16, row: u16) -> Option<(usize, Rect)> {
        let pos = Position::new(column, row);
        self.targets
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .copied()
    }
}

/// Node tree used to compose the UI each frame.
pub enum Node {
    Group {
        direction: Direction,
        constraints: Vec<Constraint>,
        children: Vec<Node>,
    },
    Leaf {
        panel: Box<dyn Panel>,
    },
}

impl Node {
    /// Draw the node into the given area, recording pointer targets.
    pub fn draw(&self, f: &mut Frame<'_>, area: Rect, hits: &mut HitMap) {
        match self {
            Node::Group {
                direction,
                constraints,
                children,
            } => {
                let chunks = Layout::default()
                    .direction(*direction)
                    .constraints(constraints.clone())
                    .split(area);
                for (child, chunk) in children.iter().zip(chunks.iter()) {
                    child.draw(f, *chunk, hits);
                }
            }
            Node::Leaf { panel } => {
                if let Some((channel, rect)) = panel.pointer_target(area) {
                    hits.record(channel, rect);
                }
                panel.draw(f, area);
            }
        }
    }
}

/// Helper: create a group node.
pub fn group(direction: Direction, constraints: Vec<Constraint>, children: Vec<Node>) -> Node {
    Node::Group {
        direction,
        constraints,
        children,
    }
}

/// Helper: create a leaf node.
pub fn leaf(panel: impl Panel + 'static) -> Node {
    Node::Leaf {
        panel: Box::new(panel),
    }
}
