//! src/lib.rs
//!
//! Fixed-memory live time-series graph: a circular sample buffer, an
//! auto-scaling line renderer drawing onto an injected surface, and the
//! sample sources used to feed it.

pub mod error;
pub mod graph;
pub mod source;

pub use error::{GraphError, SourceError};
pub use graph::{GraphConfig, SampleBuffer, TimeSeriesWidget};
