//! src/app.rs
//!
//! Live time-series graphs in the terminal.
//!
//! # Top-Level Application (`app.rs`)
//!
//! Constructs one graph per channel, starts the feeder thread for the chosen
//! sample source, and runs the UI main loop.
//!
//! ## Overview
//! The application:
//! - Renders one auto-scaling graph per channel. Each graph keeps a fixed
//!   number of samples; once full, the oldest sample is overwritten.
//! - Feeds graphs from a simulated signal or from a serial port.
//! - Maps mouse and keyboard input onto pause/resume, reset and hover.
//!
//! # Building and Running
//!
//! ```text
//! cargo run --release -- --channels 2 --gradient
//! cargo run --release -- --source serial --port /dev/ttyUSB0 --baud 9600
//! ```
//!
//! Logs go to `ringscope.log` (see `--log-file`); set `RUST_LOG=debug` for
//! state changes or `RUST_LOG=trace` for every sample.
//!
//! # Controls
//!
//! - **click** on a graph: toggle pause. While paused, samples keep being
//!   recorded; the frame stays frozen until resumed.
//! - **double click** on a graph: reset it (drops all samples, resumes).
//! - **mouse move** over a graph: show the sample under the pointer.
//! - **Tab**: cycle keyboard focus among graphs.
//! - **p** / **r**: pause toggle / reset the focused graph.
//! - **g**: switch the focused graph between flat colour and gradient.
//! - **q** / **Esc**: quit and restore the terminal.
//!
//! # Auto-scaling
//!
//! The buffer mean sits on the vertical centerline; `mean ± scale` (scale is
//! the largest deviation from the mean) touch the top and bottom edges. The
//! Range row shows those two bounds rounded to integers. A flat signal is drawn
//! on the centerline.

use std::io::stdout;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use color_eyre::eyre::WrapErr;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use ratatui::layout::{Constraint, Direction};
use tracing::{debug, info};

use ringscope::graph::shared::{GraphGuard, Pointer, SharedGraph, shared};
use ringscope::source::{SampleSource, SerialSource, SimulatedSource, spawn_feeder};

use crate::cli::{Cli, SourceKind};
use crate::panels::{ControlsPanel, GraphPanel, HistoryPanel, InfoPanel, TitlePanel};
use crate::ui::{HitMap, Node, group, leaf};

/// Two clicks on the same graph within this window count as a double click.
const DOUBLE_CLICK: Duration = Duration::from_millis(400);

/// Whether the main loop keeps going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Input state: focus, pending click for double-click detection.
pub struct Controller {
    graphs: Vec<SharedGraph>,
    focused: usize,
    last_click: Option<(usize, Instant)>,
}

impl Controller {
    pub fn new(graphs: Vec<SharedGraph>) -> Self {
        Self {
            graphs,
            focused: 0,
            last_click: None,
        }
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    fn with_graph(&self, channel: usize, f: impl FnOnce(&mut GraphGuard<'_>)) {
        if let Some(Ok(mut g)) = self.graphs.get(channel).map(|gs| gs.write()) {
            f(&mut g);
        }
    }

    pub fn on_key(&mut self, code: KeyCode) -> Flow {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Tab => self.focused = (self.focused + 1) % self.graphs.len().max(1),
            KeyCode::Char('p') => self.with_graph(self.focused, |g| {
                g.widget.toggle_pause();
            }),
            KeyCode::Char('r') => self.with_graph(self.focused, |g| g.reset()),
            KeyCode::Char('g') => self.with_graph(self.focused, |g| g.toggle_gradient()),
            _ => {}
        }
        Flow::Continue
    }

    /// Route a mouse event using the plot rectangles of the last frame.
    pub fn on_mouse(&mut self, ev: MouseEvent, hits: &HitMap, now: Instant) {
        let target = hits.locate(ev.column, ev.row);
        match ev.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some((channel, _)) = target else {
                    return;
                };
                self.focused = channel;
                // every click toggles; a quick second click also resets
                self.with_graph(channel, |g| {
                    g.widget.toggle_pause();
                });
                let double = self
                    .last_click
                    .is_some_and(|(c, t)| c == channel && now.duration_since(t) <= DOUBLE_CLICK);
                if double {
                    debug!(channel, "double click");
                    self.with_graph(channel, |g| g.reset());
                    self.last_click = None;
                } else {
                    self.last_click = Some((channel, now));
                }
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                for (i, gs) in self.graphs.iter().enumerate() {
                    let Ok(mut g) = gs.write() else {
                        continue;
                    };
                    g.pointer = match target {
                        Some((channel, rect)) if channel == i => Some(Pointer {
                            x: f64::from(ev.column - rect.x) + 0.5,
                            display_width: f64::from(rect.width),
                        }),
                        _ => None,
                    };
                }
            }
            _ => {}
        }
    }
}

fn open_source(cli: &Cli) -> color_eyre::Result<(Box<dyn SampleSource + Send>, Duration)> {
    match cli.source {
        SourceKind::Sim => {
            let source: Box<dyn SampleSource + Send> =
                Box::new(SimulatedSource::new(cli.channels as usize, cli.seed));
            Ok((source, Duration::from_millis(cli.tick_ms)))
        }
        SourceKind::Serial => {
            let source: Box<dyn SampleSource + Send> = Box::new(
                SerialSource::open(&cli.port, cli.baud)
                    .wrap_err_with(|| format!("opening serial port {}", cli.port))?,
            );
            // reads block until a line arrives; the tick only yields the CPU
            Ok((source, Duration::from_millis(1)))
        }
    }
}

/// Compose this frame's layout.
fn build_layout(graphs: &[SharedGraph], focused: usize, title: &str, source: &str) -> Node {
    let share = 100 / graphs.len().max(1) as u16;
    let mut rows: Vec<Node> = Vec::new();
    for (i, g) in graphs.iter().enumerate() {
        rows.push(group(
            Direction::Horizontal,
            vec![
                Constraint::Percentage(70),
                Constraint::Percentage(15),
                Constraint::Percentage(15),
            ],
            vec![
                leaf(GraphPanel::new(g.clone(), i, i == focused)),
                leaf(HistoryPanel::new(g.clone())),
                leaf(InfoPanel::new(g.clone(), i == focused)),
            ],
        ));
    }

    group(
        Direction::Vertical,
        vec![
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(8),
        ],
        vec![
            leaf(TitlePanel::new(title, source)),
            group(
                Direction::Vertical,
                vec![Constraint::Percentage(share); graphs.len()],
                rows,
            ),
            leaf(ControlsPanel::new()),
        ],
    )
}

pub fn run(cli: Cli) -> color_eyre::Result<()> {
    let cfg = cli.graph_config();
    let graphs: Vec<SharedGraph> = (0..cli.channels)
        .map(|i| shared(cfg.clone(), &format!("Channel {i}")))
        .collect::<Result<_, _>>()
        .wrap_err("building graphs")?;

    let (source, tick) = open_source(&cli)?;
    let source_name = source.describe();
    let running = Arc::new(AtomicBool::new(true));
    // detached: a blocking serial read may outlive the UI by one timeout
    let _feeder = spawn_feeder(source, graphs.clone(), tick, running.clone());

    let mut terminal = ratatui::init();
    crossterm::execute!(stdout(), EnableMouseCapture)?;
    info!(channels = graphs.len(), capacity = cfg.capacity, "ui started");

    let result = ui_loop(&mut terminal, &graphs, &source_name);

    running.store(false, Ordering::Relaxed);
    let _ = crossterm::execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    info!("ui stopped");
    result
}

fn ui_loop(
    terminal: &mut ratatui::DefaultTerminal,
    graphs: &[SharedGraph],
    source_name: &str,
) -> color_eyre::Result<()> {
    let mut controller = Controller::new(graphs.to_vec());
    let mut hits = HitMap::default();
    let frame_time = Duration::from_millis(50);

    loop {
        let frame_start = Instant::now();

        let root = build_layout(graphs, controller.focused(), "ringscope", source_name);
        hits.clear();
        terminal.draw(|f| {
            let area = f.area();
            root.draw(f, area, &mut hits);
        })?;

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if controller.on_key(key.code) == Flow::Quit {
                        return Ok(());
                    }
                }
                Event::Mouse(ev) => controller.on_mouse(ev, &hits, Instant::now()),
                _ => {}
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
