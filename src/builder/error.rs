//! Build errors for the state builder.

use crate::core::ModelError;
use thiserror::Error;

/// Errors that can occur when building an initial state.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No actors defined. Add at least one actor with .actor(id, transitions)")]
    NoActors,

    /// Every problem found in the model, not just the first
    #[error("Model is invalid ({} problem(s))", .0.len())]
    Invalid(Vec<ModelError>),

    #[error("Configuration could not be parsed: {0}")]
    Config(String),
}
