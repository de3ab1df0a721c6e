use crate::{
    BatchMessage, EpisodeRunner, EpisodeRunnerStat, ThreadRunnerConfig, UpdateCoordinator,
};
use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, Sender};
use log::info;
use std::{
    sync::{Arc, Mutex},
    thread::JoinHandle,
};
use stride_core::{
    record::{Record, Recorder},
    Agent, Env, Preprocessor,
};

/// Wires an [`EpisodeRunner`] and an [`UpdateCoordinator`] together.
///
/// Owns the bounded experience channel, the sampling thread and the stop
/// flag. [`run`](ThreadRunner::run) binds the agent's runtime context and
/// spawns the sampling thread; the caller then drives updates through
/// [`update`](ThreadRunner::update) at its own cadence and finally calls
/// [`stop`](ThreadRunner::stop) and [`join`](ThreadRunner::join).
///
/// Each [`ThreadRunner`] owns a private channel; parallel rollouts are
/// multiple [`ThreadRunner`]s, never a shared channel.
pub struct ThreadRunner<A, E, P, R>
where
    A: Agent<E>,
    E: Env,
    P: Preprocessor<E>,
    R: Recorder,
{
    agent: Arc<Mutex<A>>,
    runner: Option<EpisodeRunner<A, E, P, R>>,
    coordinator: UpdateCoordinator<A, E>,
    sender: Option<Sender<BatchMessage<E>>>,
    handle: Option<JoinHandle<Result<()>>>,
    stop: Arc<Mutex<bool>>,
    stat: Arc<Mutex<Option<EpisodeRunnerStat>>>,
}

impl<A, E, P, R> ThreadRunner<A, E, P, R>
where
    A: Agent<E> + Send + 'static,
    E: Env + 'static,
    E::Config: Send,
    E::Obs: Send,
    E::Act: Send,
    P: Preprocessor<E> + Send + 'static,
    R: Recorder + Send + 'static,
{
    /// Builds a [`ThreadRunner`].
    ///
    /// The experience channel is created here with the configured capacity;
    /// the environment itself is built inside the sampling thread.
    pub fn build(
        config: ThreadRunnerConfig,
        agent: A,
        env_config: E::Config,
        preprocessor: Option<P>,
        recorder: R,
        env_seed: i64,
    ) -> Self {
        let agent = Arc::new(Mutex::new(agent));
        let stop = Arc::new(Mutex::new(false));
        let stat = Arc::new(Mutex::new(None));
        let (sender, receiver) = bounded(config.channel_capacity);
        let timeout = config.timeout();

        let runner = EpisodeRunner::build(
            0,
            &config,
            agent.clone(),
            env_config,
            preprocessor,
            recorder,
            stop.clone(),
            stat.clone(),
            env_seed,
        );
        let coordinator = UpdateCoordinator::new(agent.clone(), receiver, timeout);

        Self {
            agent,
            runner: Some(runner),
            coordinator,
            sender: Some(sender),
            handle: None,
            stop,
            stat,
        }
    }

    /// Binds the agent's runtime context and starts the sampling thread.
    pub fn run(&mut self, ctx: A::Context) {
        self.agent.lock().unwrap().set_session(ctx);

        let runner = self.runner.take().unwrap();
        let sender = self.sender.take().unwrap();
        let handle = std::thread::spawn(move || runner.run(sender));
        self.handle = Some(handle);
        info!("Started sampling thread");
    }

    /// Performs one update cycle on the caller's thread.
    ///
    /// See [`UpdateCoordinator::update_once`].
    pub fn update(&mut self) -> Result<Record> {
        self.coordinator.update_once()
    }

    /// The shared agent handle.
    pub fn agent(&self) -> Arc<Mutex<A>> {
        self.agent.clone()
    }

    /// Signals the sampling thread to stop at its next iteration boundary.
    pub fn stop(&self) {
        let mut stop = self.stop.lock().unwrap();
        *stop = true;
    }

    /// Waits until the sampling thread finishes and returns its stats.
    ///
    /// Surfaces the thread's terminal error if the sampling loop died, e.g.
    /// on a push timeout or an environment fault.
    pub fn join(&mut self) -> Result<EpisodeRunnerStat> {
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| anyhow!("sampling thread panicked"))??;
        }
        let stat = self.stat.lock().unwrap().clone();
        Ok(stat.unwrap_or_default())
    }

    /// Stops and joins the sampling thread.
    pub fn stop_and_join(&mut self) -> Result<EpisodeRunnerStat> {
        self.stop();
        self.join()
    }
}
