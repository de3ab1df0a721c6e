use std::time::Duration;

/// Stats of the sampling loop in an [`EpisodeRunner`](crate::EpisodeRunner).
#[derive(Clone, Debug, Default)]
pub struct EpisodeRunnerStat {
    /// The number of elementary environment steps taken.
    pub env_steps: usize,

    /// The number of completed episodes.
    pub episodes: usize,

    /// Cumulative rewards of completed episodes, in completion order.
    pub episode_rewards: Vec<f32>,

    /// Duration of the sampling loop.
    pub duration: Duration,
}

/// Returns a formatted string of an [`EpisodeRunnerStat`] for reporting.
pub fn runner_stat_fmt(stat: &EpisodeRunnerStat) -> String {
    let d = stat.duration.as_secs_f32();
    let sps = (stat.env_steps as f32) / d;
    format!(
        "env steps: {}, episodes: {}, duration [sec]: {}, steps per sec: {}",
        stat.env_steps, stat.episodes, d, sps
    )
}
