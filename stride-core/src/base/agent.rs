//! Agent.
use super::{Env, ExperienceBatch};
use anyhow::Result;

/// A trainable policy with an internally owned experience accumulator.
///
/// The runner drives an agent through three operations: action selection,
/// observation recording and parameter updates. Experience collection is
/// managed inside the agent; the runner takes snapshots of the current batch
/// with [`Agent::take_batch`] at handoff points.
pub trait Agent<E: Env> {
    /// Runtime context bound before execution starts, e.g. a session handle.
    type Context;

    /// Binds the runtime context. Called once before the sampling thread starts.
    fn set_session(&mut self, ctx: Self::Context);

    /// Samples an action given a processed observation.
    ///
    /// `episode` is the current episode index, starting at 1. Passing it
    /// supports episode-dependent exploration schedules.
    fn get_action(&mut self, obs: &E::Obs, episode: usize) -> E::Act;

    /// Records one step of experience into the internal accumulator.
    fn add_observation(&mut self, obs: E::Obs, act: E::Act, reward: f32, is_terminal: bool);

    /// Moves the current batch out of the accumulator, leaving a fresh one.
    ///
    /// The returned batch is a frozen snapshot. The agent must not keep a
    /// handle through which it could mutate the batch afterwards.
    fn take_batch(&mut self) -> ExperienceBatch<E>;

    /// Performs an update with a merged batch of experience.
    fn update(&mut self, batch: &ExperienceBatch<E>) -> Result<()>;
}
