//! Sequential actors.

use super::error::ModelError;
use super::transition::{ActorId, Transition};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A sequential process: a fixed, ordered sequence of transitions.
///
/// Constructing an actor places every transition: its `position` becomes its
/// index in the sequence and its `owner` becomes the actor id. The sequence
/// never grows or shrinks afterwards; only the executed flags change, and only
/// through [`State::execute`](super::State::execute).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Actor {
    id: ActorId,
    transitions: Vec<Transition>,
}

impl Actor {
    /// Create an actor from its transition sequence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use unfolding::core::{Actor, Transition};
    ///
    /// let actor = Actor::new(4, vec![Transition::lock(0), Transition::unlock(0)]);
    ///
    /// assert_eq!(actor.transitions()[1].position(), 1);
    /// assert_eq!(actor.transitions()[1].owner(), 4);
    /// assert_eq!(actor.next_transition().map(|t| t.position()), Some(0));
    /// ```
    pub fn new(id: ActorId, transitions: impl IntoIterator<Item = Transition>) -> Self {
        let transitions = transitions
            .into_iter()
            .enumerate()
            .map(|(position, mut t)| {
                t.position = position;
                t.owner = id;
                t.executed = false;
                t
            })
            .collect();
        Self { id, transitions }
    }

    /// Create an actor whose sequence may hold at most `capacity` transitions.
    pub fn with_capacity(
        id: ActorId,
        transitions: Vec<Transition>,
        capacity: usize,
    ) -> Result<Self, ModelError> {
        if transitions.len() > capacity {
            return Err(ModelError::CapacityExceeded {
                what: format!("actor {id} ({} transitions)", transitions.len()),
                capacity,
            });
        }
        Ok(Self::new(id, transitions))
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn is_executed(&self, position: usize) -> bool {
        self.transitions
            .get(position)
            .is_some_and(Transition::is_executed)
    }

    /// The earliest transition that has not been executed yet.
    pub fn next_transition(&self) -> Option<&Transition> {
        self.transitions.iter().find(|t| !t.executed)
    }

    /// True once every transition has been executed.
    pub fn is_finished(&self) -> bool {
        self.next_transition().is_none()
    }

    pub(crate) fn mark_executed(&mut self, position: usize) {
        if let Some(t) = self.transitions.get_mut(position) {
            t.executed = true;
        }
    }
}

impl PartialEq for Actor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Actor {}

impl PartialOrd for Actor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Actor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
