//! src/source.rs
//!
//! Sample sources feeding graphs, and the feeder thread that drives them.
//!
//! Sources produce one frame per call: one value per channel, channel `i`
//! going to graph `i`. Frames shorter than the channel list leave the trailing
//! graphs untouched.

pub mod serial;
pub mod simulated;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::SourceError;
use crate::graph::shared::SharedGraph;

pub use serial::SerialSource;
pub use simulated::SimulatedSource;

/// Anything that yields sample frames.
pub trait SampleSource {
    /// Next frame of samples. An empty frame means "nothing this tick".
    fn next_frame(&mut self) -> Result<Vec<f64>, SourceError>;

    /// Short human-readable description used in logs and the title bar.
    fn describe(&self) -> String;
}

/// Push one frame into the graphs, channel by channel.
pub fn dispatch(frame: &[f64], graphs: &[SharedGraph]) {
    for (value, graph) in frame.iter().zip(graphs) {
        match graph.write() {
            Ok(mut g) => g.push(*value),
            Err(_) => warn!("graph lock poisoned; sample dropped"),
        }
    }
}

/// Spawn a thread pulling frames from `source` every `tick` until `running`
/// is cleared or the source fails.
pub fn spawn_feeder(
    mut source: Box<dyn SampleSource + Send>,
    graphs: Vec<SharedGraph>,
    tick: Duration,
    running: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        info!(source = %source.describe(), channels = graphs.len(), "feeder started");
        while running.load(Ordering::Relaxed) {
            match source.next_frame() {
                Ok(frame) if frame.is_empty() => {}
                Ok(frame) => dispatch(&frame, &graphs),
                Err(SourceError::Closed) => {
                    info!("source closed");
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "source failed; feeder stopping");
                    break;
                }
            }
            if !tick.is_zero() {
                thread::sleep(tick);
            }
        }
        debug!("feeder exiting");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphConfig;
    use crate::graph::shared::shared;

    struct Scripted(Vec<Vec<f64>>);

    impl SampleSource for Scripted {
        fn next_frame(&mut self) -> Result<Vec<f64>, SourceError> {
            if self.0.is_empty() {
                Err(SourceError::Closed)
            } else {
                Ok(self.0.remove(0))
            }
        }

        fn describe(&self) -> String {
            "scripted".into()
        }
    }

    #[test]
    fn dispatch_routes_values_by_channel() {
        let a = shared(GraphConfig::new(4), "a").unwrap();
        let b = shared(GraphConfig::new(4), "b").unwrap();
        dispatch(&[1.0, 2.0], &[a.clone(), b.clone()]);
        dispatch(&[3.0], &[a.clone(), b.clone()]);
        assert_eq!(a.read().unwrap().widget.buffer().len(), 2);
        assert_eq!(b.read().unwrap().widget.buffer().latest(), Some(2.0));
    }

    #[test]
    fn feeder_drains_source_until_closed() {
        let g = shared(GraphConfig::new(8), "g").unwrap();
        let source = Scripted(vec![vec![1.0], vec![], vec![2.0], vec![3.0]]);
        let running = Arc::new(AtomicBool::new(true));
        spawn_feeder(Box::new(source), vec![g.clone()], Duration::ZERO, running)
            .join()
            .unwrap();
        let values: Vec<f64> = g.read().unwrap().widget.buffer().values().collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }
}
