//! Environment step.
use super::Env;

/// The outcome of one or more elementary environment steps.
///
/// An environment emits a [`Step`] object at every interaction step. When
/// produced by [`repeat_action`](crate::util::repeat_action), `reward`
/// aggregates the rewards of all elementary steps covered.
pub struct Step<E: Env> {
    /// Observation after the step.
    pub obs: E::Obs,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if the episode terminated during the step.
    pub is_terminal: bool,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(obs: E::Obs, reward: f32, is_terminal: bool) -> Self {
        Step {
            obs,
            reward,
            is_terminal,
        }
    }
}
