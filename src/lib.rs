//! Unfolding: a branchable state model for partial-order-reduction model checking
//!
//! A program under test is modelled as a fixed set of sequential actors, each
//! running a fixed sequence of elementary operations: shared-memory reads and
//! writes, mutex operations, and asynchronous send/receive/wait through
//! mailboxes. This crate answers the two questions an exploration driver asks
//! at every step - "which transitions can fire now?" and "what state results
//! if this one fires?" - and provides the dependency relation the driver uses
//! to skip interleavings that are equivalent to ones already explored.
//!
//! # Core Concepts
//!
//! - **Transition**: one operation of one actor, with a symmetric dependency relation
//! - **Mailbox**: FIFO rendezvous between sends and receives
//! - **State**: immutable snapshot; `execute` returns a successor and never
//!   changes its parent, so states can be branched from freely
//! - **Trace**: immutable record of a path and its equivalence class
//!
//! Deciding what to explore, detecting deadlocks and checking properties are
//! left to the driver.
//!
//! # Example
//!
//! ```rust
//! use unfolding::builder::StateBuilder;
//! use unfolding::core::Transition;
//!
//! let s0 = StateBuilder::new()
//!     .actor(0, vec![Transition::send(1, 0)])
//!     .actor(1, vec![Transition::receive(1, 0), Transition::wait(1, 0)])
//!     .mailbox(1)
//!     .build()
//!     .unwrap();
//!
//! let send = s0.actor(0).unwrap().transitions()[0].clone();
//! let receive = s0.actor(1).unwrap().transitions()[0].clone();
//! assert!(!send.is_dependent(&receive));
//!
//! let s1 = s0.execute(&send).unwrap();
//! let s2 = s1.execute(&receive).unwrap();
//!
//! // the receive matched the pending send, so the wait may now fire
//! let enabled: Vec<_> = s2.enabled_transitions().into_iter().collect();
//! assert_eq!(enabled.len(), 1);
//! assert_eq!((enabled[0].owner(), enabled[0].position()), (1, 1));
//!
//! // earlier states are untouched
//! assert_eq!(s0.enabled_transitions().len(), 2);
//! ```

pub mod builder;
pub mod core;

// Re-export commonly used types
pub use crate::builder::{BuildError, ModelConfig, StateBuilder};
pub use crate::core::{Actor, Mailbox, ModelError, State, Trace, Transition, TransitionKind};
