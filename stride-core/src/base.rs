//! Core traits and data types.
mod agent;
mod batch;
mod env;
mod preprocessor;
mod step;

pub use agent::Agent;
pub use batch::{ExperienceBatch, Transition};
pub use env::Env;
pub use preprocessor::{IdentityPreprocessor, Preprocessor};
pub use step::Step;

use std::fmt::Debug;

/// Represents an observation of an environment.
pub trait Obs: Clone + Debug {}

/// Represents an action on an environment.
pub trait Act: Clone + Debug {}
