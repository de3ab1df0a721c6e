//! This module provides dummy implementations used for tests.
use crate::{Act, Agent, Env, ExperienceBatch, Obs, Step, Transition};
use anyhow::Result;

/// Dummy observation carrying the environment's step counter.
#[derive(Clone, Debug)]
pub struct DummyObs(pub usize);

impl Obs for DummyObs {}

/// Dummy action.
#[derive(Clone, Debug)]
pub struct DummyAct(pub usize);

impl Act for DummyAct {}

/// Configuration of [`DummyEnv`].
#[derive(Clone, Debug)]
pub struct DummyEnvConfig {
    /// Step at which a terminal state is reported. `None` never terminates.
    pub terminal_at: Option<usize>,

    /// Reward emitted at every elementary step.
    pub reward: f32,
}

impl Default for DummyEnvConfig {
    fn default() -> Self {
        Self {
            terminal_at: Some(10),
            reward: 1.0,
        }
    }
}

/// An environment emitting a fixed reward at every step and terminating
/// after a configurable number of steps.
pub struct DummyEnv {
    config: DummyEnvConfig,
    t: usize,
}

impl Env for DummyEnv {
    type Config = DummyEnvConfig;
    type Obs = DummyObs;
    type Act = DummyAct;

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            t: 0,
        })
    }

    fn step(&mut self, _a: &Self::Act) -> Result<Step<Self>> {
        self.t += 1;
        let is_terminal = self.config.terminal_at.map_or(false, |t| self.t >= t);
        Ok(Step::new(DummyObs(self.t), self.config.reward, is_terminal))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.t = 0;
        Ok(DummyObs(0))
    }
}

/// An agent sampling random actions and accumulating experience.
///
/// Update calls are counted so tests can assert on what reached the agent.
pub struct DummyAgent {
    n_acts: usize,
    batch: ExperienceBatch<DummyEnv>,

    /// True after [`Agent::set_session`] has been called.
    pub has_session: bool,

    /// Sizes of the batches passed to [`Agent::update`], in call order.
    pub update_sizes: Vec<usize>,

    /// Terminal flags of the batches passed to [`Agent::update`], in call order.
    pub update_terminals: Vec<bool>,
}

impl DummyAgent {
    /// Creates an agent choosing among `n_acts` actions.
    pub fn new(n_acts: usize) -> Self {
        Self {
            n_acts,
            batch: ExperienceBatch::new(),
            has_session: false,
            update_sizes: Vec::new(),
            update_terminals: Vec::new(),
        }
    }
}

impl Agent<DummyEnv> for DummyAgent {
    type Context = ();

    fn set_session(&mut self, _ctx: Self::Context) {
        self.has_session = true;
    }

    fn get_action(&mut self, _obs: &DummyObs, _episode: usize) -> DummyAct {
        DummyAct(fastrand::usize(0..self.n_acts))
    }

    fn add_observation(&mut self, obs: DummyObs, act: DummyAct, reward: f32, is_terminal: bool) {
        self.batch.push(Transition::new(obs, act, reward, is_terminal));
    }

    fn take_batch(&mut self) -> ExperienceBatch<DummyEnv> {
        std::mem::take(&mut self.batch)
    }

    fn update(&mut self, batch: &ExperienceBatch<DummyEnv>) -> Result<()> {
        self.update_sizes.push(batch.len());
        self.update_terminals.push(batch.terminal());
        Ok(())
    }
}
