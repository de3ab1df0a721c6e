//! Owns the channel, the sampling thread and the stop flag.
mod base;
mod config;

pub use base::ThreadRunner;
pub use config::ThreadRunnerConfig;
