use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
    time::Duration,
};

/// Configuration of [`ThreadRunner`](crate::ThreadRunner).
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ThreadRunnerConfig {
    /// Total episode budget of the run.
    pub episodes: usize,

    /// Maximum steps per episode; the episode is cut when the step counter
    /// exceeds this value.
    pub max_episode_steps: usize,

    /// Environment steps taken per iteration before a batch is yielded.
    pub local_steps: usize,

    /// Number of consecutive elementary steps each chosen action is applied
    /// for. Must be at least 1.
    pub repeat_actions: usize,

    /// Capacity of the experience channel.
    pub channel_capacity: usize,

    /// Timeout ceiling of channel pushes and pulls, in seconds.
    pub timeout_secs: u64,
}

impl ThreadRunnerConfig {
    /// Constructs [`ThreadRunnerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`ThreadRunnerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }

    /// The timeout ceiling as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ThreadRunnerConfig {
    fn default() -> Self {
        Self {
            episodes: 100,
            max_episode_steps: 1000,
            local_steps: 20,
            repeat_actions: 1,
            channel_capacity: 10,
            timeout_secs: 600,
        }
    }
}
