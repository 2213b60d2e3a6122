//! Execution traces.
//!
//! Provides an immutable record of the transitions fired along one path of the
//! state graph, and the equivalence of two such paths under the dependency
//! relation.

use super::error::ModelError;
use super::state::State;
use super::transition::Transition;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered sequence of fired transitions.
///
/// Traces are immutable - `record` returns a new trace with the transition
/// appended, so a driver can keep one trace per branch of its search tree.
///
/// # Example
///
/// ```rust
/// use unfolding::core::{Actor, State, Trace, Transition};
///
/// let s0 = State::new(
///     2,
///     vec![
///         Actor::new(0, vec![Transition::write(0)]),
///         Actor::new(1, vec![Transition::write(1)]),
///     ],
///     vec![],
/// )
/// .unwrap();
///
/// let enabled: Vec<_> = s0.enabled_transitions().into_iter().collect();
/// let forward = Trace::new().record(enabled[0].clone()).record(enabled[1].clone());
/// let backward = Trace::new().record(enabled[1].clone()).record(enabled[0].clone());
///
/// // writes to different variables commute
/// assert!(forward.is_equivalent(&backward));
/// assert_eq!(forward.replay(&s0).unwrap(), backward.replay(&s0).unwrap());
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Trace {
    transitions: Vec<Transition>,
}

impl Trace {
    /// Create a new empty trace.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new trace.
    pub fn record(&self, transition: Transition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
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

    /// Fire every transition in order, starting from `initial`.
    ///
    /// Stops at the first transition that is not enabled when its turn comes.
    pub fn replay(&self, initial: &State) -> Result<State, ModelError> {
        self.transitions
            .iter()
            .try_fold(initial.clone(), |state, t| state.execute(t))
    }

    /// Check whether two traces are interleavings of the same partial order.
    ///
    /// Both traces must contain the same transitions, and every dependent pair
    /// must appear in the same relative order in both.
    pub fn is_equivalent(&self, other: &Trace) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let positions: HashMap<&Transition, usize> = other
            .transitions
            .iter()
            .enumerate()
            .map(|(i, t)| (t, i))
            .collect();
        if positions.len() != other.len() {
            return false;
        }

        let mut used = vec![false; other.len()];
        let mut mapped = Vec::with_capacity(self.len());
        for t in &self.transitions {
            match positions.get(t) {
                Some(&i) if !used[i] => {
                    used[i] = true;
                    mapped.push(i);
                }
                _ => return false,
            }
        }

        for (i, a) in self.transitions.iter().enumerate() {
            for (j, b) in self.transitions.iter().enumerate().skip(i + 1) {
                if a.is_dependent(b) && mapped[i] > mapped[j] {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Actor, Mailbox};

    fn model() -> State {
        State::new(
            3,
            vec![
                Actor::new(0, vec![Transition::write(0), Transition::read(1)]),
                Actor::new(1, vec![Transition::read(0)]),
                Actor::new(2, vec![Transition::send(1, 0)]),
            ],
            vec![Mailbox::new(1)],
        )
        .unwrap()
    }

    fn t(state: &State, owner: usize, position: usize) -> Transition {
        state.actor(owner).unwrap().transitions()[position].clone()
    }

    #[test]
    fn new_trace_is_empty() {
        let trace = Trace::new();
        assert!(trace.is_empty());
        assert_eq!(trace.len(), 0);
    }

    #[test]
    fn record_is_immutable() {
        let s0 = model();
        let trace = Trace::new();
        let longer = trace.record(t(&s0, 0, 0));

        assert_eq!(trace.len(), 0);
        assert_eq!(longer.len(), 1);
    }

    #[test]
    fn replay_reaches_the_same_state_as_stepping() {
        let s0 = model();
        let s1 = s0.execute(&t(&s0, 0, 0)).unwrap();
        let s2 = s1.execute(&t(&s1, 2, 0)).unwrap();

        let trace = Trace::new().record(t(&s0, 0, 0)).record(t(&s0, 2, 0));
        assert_eq!(trace.replay(&s0).unwrap(), s2);
    }

    #[test]
    fn replay_stops_at_disabled_transition() {
        let s0 = model();
        let trace = Trace::new().record(t(&s0, 0, 1));
        assert_eq!(
            trace.replay(&s0),
            Err(ModelError::InvalidTransition {
                owner: 0,
                position: 1
            })
        );
    }

    #[test]
    fn swapping_independent_neighbours_is_equivalent() {
        let s0 = model();
        let a = Trace::new().record(t(&s0, 0, 0)).record(t(&s0, 2, 0));
        let b = Trace::new().record(t(&s0, 2, 0)).record(t(&s0, 0, 0));
        assert!(a.is_equivalent(&b));
        assert!(b.is_equivalent(&a));
    }

    #[test]
    fn swapping_dependent_pair_is_not_equivalent() {
        let s0 = model();
        // write(v0) then read(v0) in another actor
        let a = Trace::new().record(t(&s0, 0, 0)).record(t(&s0, 1, 0));
        let b = Trace::new().record(t(&s0, 1, 0)).record(t(&s0, 0, 0));
        assert!(!a.is_equivalent(&b));
    }

    #[test]
    fn different_transitions_are_not_equivalent() {
        let s0 = model();
        let a = Trace::new().record(t(&s0, 0, 0));
        let b = Trace::new().record(t(&s0, 2, 0));
        let c = Trace::new().record(t(&s0, 0, 0)).record(t(&s0, 2, 0));
        assert!(!a.is_equivalent(&b));
        assert!(!a.is_equivalent(&c));
    }

    #[test]
    fn duplicate_transitions_are_not_equivalent() {
        let s0 = model();
        let repeated = Trace::new().record(t(&s0, 0, 0)).record(t(&s0, 0, 0));
        let distinct = Trace::new().record(t(&s0, 0, 0)).record(t(&s0, 2, 0));

        assert!(!repeated.is_equivalent(&distinct));
        assert!(!distinct.is_equivalent(&repeated));
    }

    #[test]
    fn trace_serializes_correctly() {
        let s0 = model();
        let trace = Trace::new().record(t(&s0, 0, 0)).record(t(&s0, 2, 0));

        let json = serde_json::to_string(&trace).unwrap();
        let restored: Trace = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.transitions(), trace.transitions());
        assert_eq!(restored.replay(&s0).unwrap(), trace.replay(&s0).unwrap());
    }
}
