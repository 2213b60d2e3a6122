//! Builder API for constructing initial model states.
//!
//! The instrumentation layer describes a program as per-actor transition
//! sequences and a set of mailboxes; this module turns that description into
//! a validated initial [`State`](crate::core::State), applying the optional
//! bounds from [`ModelConfig`].

pub mod config;
pub mod error;
pub mod state;

pub use config::ModelConfig;
pub use error::BuildError;
pub use state::StateBuilder;
