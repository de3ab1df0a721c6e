//! Runs agent-environment interaction on a dedicated thread.
mod base;
mod stat;

pub use base::EpisodeRunner;
pub use stat::{runner_stat_fmt, EpisodeRunnerStat};
