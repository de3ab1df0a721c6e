#![warn(missing_docs)]
//! Core abstractions of the stride runner.
//!
//! This crate defines the seams between the runner and its collaborators:
//! the [`Env`] and [`Agent`] traits, the [`ExperienceBatch`] data model
//! handed between the execution and update stages, the optional
//! [`Preprocessor`] hook, the [`repeat_action`](util::repeat_action) helper
//! and the [`record`] module used as a structured event sink.
pub mod dummy;
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{
    Act, Agent, Env, ExperienceBatch, IdentityPreprocessor, Obs, Preprocessor, Step, Transition,
};
