//! Pulls experience from the channel and drives agent updates.
mod base;

pub use base::UpdateCoordinator;
