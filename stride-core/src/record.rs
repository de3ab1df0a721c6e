//! Structured records for observability.
//!
//! The runner reports what happens (completed episodes, update sizes) as
//! [`Record`]s written to an injected [`Recorder`] instead of printing to the
//! console, so tests and callers can assert on emitted events.
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
