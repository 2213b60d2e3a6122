//! Core model types and semantics.
//!
//! This module contains the pure semantic core of the checker:
//! - Transitions and the dependency relation between them
//! - Actors, mailboxes and rendezvous matching
//! - Immutable states with `execute` and the enabled-transition frontier
//! - Traces of fired transitions and their equivalence
//!
//! Nothing here performs I/O or mutates a value another state can observe.

mod actor;
mod error;
mod mailbox;
mod state;
mod trace;
mod transition;

pub use actor::Actor;
pub use error::ModelError;
pub use mailbox::{CommStatus, Communication, Mailbox};
pub use state::State;
pub use trace::Trace;
pub use transition::{
    AccessMode, ActorId, CommId, MailboxId, MutexId, Transition, TransitionKind, VariableId,
};
