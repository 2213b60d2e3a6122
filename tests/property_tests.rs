//! Property-based tests for the model semantics.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated models and interleavings.

use proptest::prelude::*;
use std::collections::BTreeSet;
use unfolding::builder::StateBuilder;
use unfolding::core::{AccessMode, Actor, State, Trace, Transition, TransitionKind};

prop_compose! {
    fn arbitrary_kind()(variant in 0..8u8, a in 0..2usize, b in 0..3usize) -> TransitionKind {
        match variant {
            0 => TransitionKind::Send { mailbox: a, comm: b },
            1 => TransitionKind::Receive { mailbox: a, comm: b },
            2 => TransitionKind::Wait { mailbox: a, comm: b },
            3 => TransitionKind::Lock { mutex: a },
            4 => TransitionKind::Unlock { mutex: a },
            5 => TransitionKind::MutexWait,
            6 => TransitionKind::MutexTest,
            _ => TransitionKind::MemoryAccess {
                variable: b,
                mode: if a == 0 { AccessMode::Read } else { AccessMode::Write },
            },
        }
    }
}

prop_compose! {
    fn arbitrary_model()(
        actors in prop::collection::vec(prop::collection::vec(arbitrary_kind(), 0..5), 1..4)
    ) -> State {
        actors
            .into_iter()
            .enumerate()
            .fold(StateBuilder::new().mailboxes([0, 1]), |builder, (id, kinds)| {
                builder.actor(id, kinds.into_iter().map(Transition::new).collect())
            })
            .build()
            .unwrap()
    }
}

fn placed(owner: usize, kind: TransitionKind) -> Transition {
    Actor::new(owner, vec![Transition::new(kind)]).transitions()[0].clone()
}

/// Follow `picks` through the state graph, stopping early at a terminal state.
fn walk(initial: &State, picks: &[usize]) -> (Trace, Vec<State>) {
    let mut states = vec![initial.clone()];
    let mut trace = Trace::new();
    for &pick in picks {
        let current = states[states.len() - 1].clone();
        let enabled: Vec<Transition> = current.enabled_transitions().into_iter().collect();
        if enabled.is_empty() {
            break;
        }
        let t = enabled[pick % enabled.len()].clone();
        states.push(current.execute(&t).unwrap());
        trace = trace.record(t);
    }
    (trace, states)
}

proptest! {
    #[test]
    fn dependency_is_symmetric(k1 in arbitrary_kind(), k2 in arbitrary_kind(), owner in 0..2usize) {
        let a = placed(0, k1);
        let b = placed(owner, k2);
        prop_assert_eq!(a.is_dependent(&b), b.is_dependent(&a));
    }

    #[test]
    fn same_owner_is_dependent(k1 in arbitrary_kind(), k2 in arbitrary_kind()) {
        let actor = Actor::new(3, vec![Transition::new(k1), Transition::new(k2)]);
        let ts = actor.transitions();
        prop_assert!(ts[0].is_dependent(&ts[1]));
    }

    #[test]
    fn memory_access_dependency_needs_a_write(
        v1 in 0..3usize,
        v2 in 0..3usize,
        w1 in any::<bool>(),
        w2 in any::<bool>(),
    ) {
        let mode = |w: bool| if w { AccessMode::Write } else { AccessMode::Read };
        let a = placed(0, TransitionKind::MemoryAccess { variable: v1, mode: mode(w1) });
        let b = placed(1, TransitionKind::MemoryAccess { variable: v2, mode: mode(w2) });
        prop_assert_eq!(a.is_dependent(&b), v1 == v2 && (w1 || w2));
    }

    #[test]
    fn frontier_has_at_most_one_transition_per_actor(
        model in arbitrary_model(),
        picks in prop::collection::vec(any::<usize>(), 0..20),
    ) {
        let (_, states) = walk(&model, &picks);
        for state in &states {
            let enabled = state.enabled_transitions();
            let owners: BTreeSet<usize> = enabled.iter().map(|t| t.owner()).collect();
            prop_assert!(enabled.len() <= state.actor_count());
            prop_assert_eq!(owners.len(), enabled.len());
        }
    }

    #[test]
    fn enabled_waits_have_a_ready_communication(
        model in arbitrary_model(),
        picks in prop::collection::vec(any::<usize>(), 0..20),
    ) {
        let (_, states) = walk(&model, &picks);
        for state in &states {
            let enabled = state.enabled_transitions();
            for actor in state.actors() {
                let Some(next) = actor.next_transition() else { continue };
                if let TransitionKind::Wait { mailbox, .. } = next.kind() {
                    let ready = state.mailbox(mailbox).unwrap().check_comm(next);
                    prop_assert_eq!(enabled.contains(next), ready);
                } else {
                    prop_assert!(enabled.contains(next));
                }
            }
        }
    }

    #[test]
    fn execute_never_changes_the_parent(
        model in arbitrary_model(),
        picks in prop::collection::vec(any::<usize>(), 0..20),
    ) {
        let (_, states) = walk(&model, &picks);
        for state in &states {
            let before = state.clone();
            let enabled = state.enabled_transitions();
            for t in &enabled {
                let next = state.execute(t).unwrap();
                prop_assert!(next.actor(t.owner()).unwrap().is_executed(t.position()));
                prop_assert!(!state.actor(t.owner()).unwrap().is_executed(t.position()));
                prop_assert_ne!(&next, state);
            }
            prop_assert_eq!(state, &before);
            prop_assert_eq!(state.enabled_transitions(), enabled);
        }
    }

    #[test]
    fn every_step_executes_exactly_one_transition(
        model in arbitrary_model(),
        picks in prop::collection::vec(any::<usize>(), 0..20),
    ) {
        let (trace, states) = walk(&model, &picks);
        prop_assert_eq!(states.len(), trace.len() + 1);
        for (i, state) in states.iter().enumerate() {
            prop_assert_eq!(state.executed_transitions().count(), i);
        }
    }

    #[test]
    fn replay_reproduces_the_walk(
        model in arbitrary_model(),
        picks in prop::collection::vec(any::<usize>(), 0..20),
    ) {
        let (trace, states) = walk(&model, &picks);
        let replayed = trace.replay(&model).unwrap();
        prop_assert_eq!(&replayed, &states[states.len() - 1]);
    }

    #[test]
    fn swapping_independent_neighbours_reaches_the_same_state(
        model in arbitrary_model(),
        picks in prop::collection::vec(any::<usize>(), 0..20),
    ) {
        let (trace, states) = walk(&model, &picks);
        let last = &states[states.len() - 1];
        let ts = trace.transitions();

        for i in 1..ts.len() {
            if ts[i - 1].is_dependent(&ts[i]) {
                continue;
            }
            let mut swapped = ts.to_vec();
            swapped.swap(i - 1, i);
            let other = swapped
                .into_iter()
                .fold(Trace::new(), |acc, t| acc.record(t));

            prop_assert!(trace.is_equivalent(&other));
            // a send can enable a wait it is independent of, so not every
            // reordering is executable
            if let Ok(reached) = other.replay(&model) {
                prop_assert_eq!(&reached, last);
            }
        }
    }

    #[test]
    fn state_roundtrip_serialization(
        model in arbitrary_model(),
        picks in prop::collection::vec(any::<usize>(), 0..10),
    ) {
        let (_, states) = walk(&model, &picks);
        let state = &states[states.len() - 1];
        let json = serde_json::to_string(state).unwrap();
        let restored: State = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&restored, state);
    }
}
