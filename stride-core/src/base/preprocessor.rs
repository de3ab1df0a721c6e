//! Observation preprocessing.
use super::Env;

/// Transforms raw observations before they reach the agent.
///
/// Stateless from the runner's perspective. The same processed observation is
/// used for action selection and for experience recording.
pub trait Preprocessor<E: Env> {
    /// Processes an observation.
    fn process(&self, obs: E::Obs) -> E::Obs;
}

/// A preprocessor returning observations unchanged.
pub struct IdentityPreprocessor;

impl<E: Env> Preprocessor<E> for IdentityPreprocessor {
    fn process(&self, obs: E::Obs) -> E::Obs {
        obs
    }
}
