//! Model errors.

use super::transition::{ActorId, MailboxId};
use thiserror::Error;

/// Errors raised while building or advancing a model state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The transition is not in the enabled set of the state it was fired in
    #[error("transition t{position}-p{owner} is not enabled")]
    InvalidTransition { owner: ActorId, position: usize },

    /// A configured bound on an actor or a mailbox log was hit
    #[error("{what} exceeds its capacity of {capacity}")]
    CapacityExceeded { what: String, capacity: usize },

    #[error("mailbox {0} does not exist")]
    UnknownMailbox(MailboxId),

    #[error("actor {0} does not exist")]
    UnknownActor(ActorId),

    /// A mailbox was asked to record a transition that is not a send or receive
    #[error("transition t{position}-p{owner} is not a send or receive")]
    NotACommunication { owner: ActorId, position: usize },

    #[error("state declares {declared} actors but {actual} were supplied")]
    ActorCountMismatch { declared: usize, actual: usize },

    #[error("actor id {0} is used more than once")]
    DuplicateActor(ActorId),

    #[error("mailbox id {0} is used more than once")]
    DuplicateMailbox(MailboxId),

    /// A deserialized snapshot stores an actor or mailbox under another id
    #[error("{what} stored under key {key} has id {id}")]
    MismatchedKey { what: String, key: usize, id: usize },
}
