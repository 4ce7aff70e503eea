//! Core library for the Sort Visualiser application.
//!
//! The crate owns the whole visualisation pipeline short of actual output:
//! a fixed-length random array, a family of ten trace-recording sorting
//! algorithms, a tick-driven replayer that drains a trace against the live
//! array, and the session control surface a host UI binds to. Rendering and
//! tone synthesis stay behind collaborator traits implemented by the host.

pub mod algorithms;
pub mod array;
pub mod config;
pub mod error;
pub mod replay;
pub mod session;
pub mod trace;

pub use algorithms::{counting_sort_with_key, Algorithm, MAX_COUNT_KEY};
pub use array::ArrayState;
pub use config::{AppConfig, ArrayConfig, ReplayConfig};
pub use error::{Result, SortVizError};
pub use replay::{Highlight, HighlightKind, Renderer, Replay, StepOutcome, ToneSink};
pub use session::VisualizerSession;
pub use trace::{Operation, Trace};
