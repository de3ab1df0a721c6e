use crate::{BatchMessage, EpisodeRunnerStat, RunnerError, ThreadRunnerConfig};
use anyhow::Result;
use crossbeam_channel::{SendTimeoutError, Sender};
use log::info;
use std::{
    sync::{Arc, Mutex},
    time::{Duration, SystemTime},
};
use stride_core::{
    record::{Record, RecordValue::Scalar, Recorder},
    util::repeat_action,
    Agent, Env, Preprocessor,
};

/// Runs interaction between an [`Agent`] and an [`Env`], taking samples.
///
/// The sampling loop takes up to `local_steps` environment steps per
/// iteration, breaking early at episode boundaries, then pushes the agent's
/// current batch snapshot into the experience channel. A full channel blocks
/// the push, throttling environment stepping to the pace of consumption.
pub struct EpisodeRunner<A, E, P, R>
where
    A: Agent<E>,
    E: Env,
    P: Preprocessor<E>,
    R: Recorder,
{
    id: usize,
    agent: Arc<Mutex<A>>,
    env_config: E::Config,
    preprocessor: Option<P>,
    recorder: R,
    episodes: usize,
    max_episode_steps: usize,
    local_steps: usize,
    repeat_actions: usize,
    timeout: Duration,
    env_seed: i64,

    /// Stops the sampling loop at the next iteration boundary when set to `true`.
    stop: Arc<Mutex<bool>>,

    /// Published when the sampling loop exits.
    stat: Arc<Mutex<Option<EpisodeRunnerStat>>>,
}

impl<A, E, P, R> EpisodeRunner<A, E, P, R>
where
    A: Agent<E>,
    E: Env,
    P: Preprocessor<E>,
    R: Recorder,
{
    /// Builds an [`EpisodeRunner`].
    pub fn build(
        id: usize,
        config: &ThreadRunnerConfig,
        agent: Arc<Mutex<A>>,
        env_config: E::Config,
        preprocessor: Option<P>,
        recorder: R,
        stop: Arc<Mutex<bool>>,
        stat: Arc<Mutex<Option<EpisodeRunnerStat>>>,
        env_seed: i64,
    ) -> Self {
        Self {
            id,
            agent,
            env_config,
            preprocessor,
            recorder,
            episodes: config.episodes,
            max_episode_steps: config.max_episode_steps,
            local_steps: config.local_steps,
            repeat_actions: config.repeat_actions,
            timeout: config.timeout(),
            env_seed,
            stop,
            stat,
        }
    }

    /// Runs the sampling loop until `self.stop` becomes `true`.
    ///
    /// Each iteration yields one batch snapshot into `sender`. A push that
    /// exceeds the timeout ceiling, an environment fault or an agent fault
    /// terminates the loop with an error; the owning thread's join handle
    /// carries it to the caller.
    pub fn run(mut self, sender: Sender<BatchMessage<E>>) -> Result<()> {
        info!("Runner {} starts sampling", self.id);
        let time = SystemTime::now();

        let mut env = E::build(&self.env_config, self.env_seed)?;
        let mut obs = env.reset()?;

        // Episode index starts at 1, supporting episode-dependent exploration
        let mut episode: usize = 1;
        let mut episode_step: usize = 0;
        let mut episode_reward: f32 = 0.0;
        let mut env_steps: usize = 0;
        let mut episode_rewards: Vec<f32> = Vec::new();

        loop {
            for _ in 0..self.local_steps {
                let processed = match &self.preprocessor {
                    Some(p) => p.process(obs),
                    None => obs,
                };
                episode_step += 1;

                let act = {
                    let mut agent = self.agent.lock().unwrap();
                    agent.get_action(&processed, episode)
                };
                let step = repeat_action(&mut env, &act, self.repeat_actions)?;
                {
                    let mut agent = self.agent.lock().unwrap();
                    agent.add_observation(processed, act, step.reward, step.is_terminal);
                }

                episode_reward += step.reward;
                env_steps += 1;
                obs = step.obs;

                if step.is_terminal || episode_step > self.max_episode_steps {
                    obs = env.reset()?;
                    episode_rewards.push(episode_reward);
                    info!(
                        "Runner {}: episode {}/{} finished, reward = {}",
                        self.id, episode, self.episodes, episode_reward
                    );
                    self.recorder.write(Record::from_slice(&[
                        ("episode", Scalar(episode as f32)),
                        ("episode_reward", Scalar(episode_reward)),
                    ]));
                    episode += 1;
                    episode_reward = 0.0;
                    episode_step = 0;
                    break;
                }
            }

            // Snapshot the accumulator; the pushed batch is frozen from here on
            let batch = self.agent.lock().unwrap().take_batch();
            sender
                .send_timeout(BatchMessage { id: self.id, batch }, self.timeout)
                .map_err(|e| match e {
                    SendTimeoutError::Timeout(_) => RunnerError::PushTimeout(self.timeout),
                    SendTimeoutError::Disconnected(_) => RunnerError::Disconnected,
                })?;

            if *self.stop.lock().unwrap() {
                break;
            }
        }

        let stat = EpisodeRunnerStat {
            env_steps,
            episodes: episode_rewards.len(),
            episode_rewards,
            duration: time.elapsed().unwrap_or_default(),
        };
        *self.stat.lock().unwrap() = Some(stat);
        info!("Runner {} stopped", self.id);

        Ok(())
    }
}
