//! Immutable model states.
//!
//! A [`State`] is a snapshot of every actor's progress and every mailbox's
//! matching progress. Firing a transition never touches the state it was fired
//! in: [`State::execute`] returns a successor that shares every untouched actor
//! and mailbox with its parent through `Arc`, and copies only the actor (and
//! mailbox) the transition changes. A search driver can therefore keep any
//! number of states alive, branch from any of them, and hand them to other
//! threads without locking.

use super::actor::Actor;
use super::error::ModelError;
use super::mailbox::Mailbox;
use super::transition::{ActorId, MailboxId, Transition, TransitionKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, trace};

/// Snapshot of a model: actors with executed flags, plus mailboxes.
///
/// # Example
///
/// ```rust
/// use unfolding::core::{Actor, Mailbox, State, Transition};
///
/// let a = Actor::new(0, vec![Transition::send(1, 0)]);
/// let b = Actor::new(1, vec![Transition::receive(1, 0), Transition::wait(1, 0)]);
/// let s0 = State::new(2, vec![a, b], vec![Mailbox::new(1)]).unwrap();
///
/// let send = s0.actor(0).unwrap().transitions()[0].clone();
/// let s1 = s0.execute(&send).unwrap();
///
/// assert_eq!(s0.enabled_transitions().len(), 2);
/// assert_eq!(s1.enabled_transitions().len(), 1);
/// assert_eq!(s1.to_string(), "s = (t0-p0 is executed)");
/// ```
///
/// Deserializing a snapshot runs the same checks as [`State::new`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "Snapshot")]
pub struct State {
    actors: BTreeMap<ActorId, Arc<Actor>>,
    mailboxes: BTreeMap<MailboxId, Arc<Mailbox>>,
}

/// Serialized form of a [`State`], checked before it becomes one.
#[derive(Deserialize)]
struct Snapshot {
    actors: BTreeMap<ActorId, Actor>,
    mailboxes: BTreeMap<MailboxId, Mailbox>,
}

impl TryFrom<Snapshot> for State {
    type Error = ModelError;

    fn try_from(snapshot: Snapshot) -> Result<Self, Self::Error> {
        if let Some((&key, actor)) = snapshot.actors.iter().find(|(k, a)| **k != a.id()) {
            return Err(ModelError::MismatchedKey {
                what: "actor".to_string(),
                key,
                id: actor.id(),
            });
        }
        if let Some((&key, mailbox)) = snapshot.mailboxes.iter().find(|(k, m)| **k != m.id()) {
            return Err(ModelError::MismatchedKey {
                what: "mailbox".to_string(),
                key,
                id: mailbox.id(),
            });
        }

        let actors: Vec<Actor> = snapshot.actors.into_values().collect();
        let mailboxes: Vec<Mailbox> = snapshot.mailboxes.into_values().collect();
        State::new(actors.len(), actors, mailboxes)
    }
}

impl State {
    /// Build an initial state.
    ///
    /// Fails if `actor_count` does not match the number of actors, if an id is
    /// used twice, or if a send, receive or wait names a mailbox that is not
    /// supplied.
    ///
    /// Only the first problem is returned. Use [`State::validate`] or
    /// [`StateBuilder::build`](crate::builder::StateBuilder::build) to get
    /// every problem at once.
    pub fn new(
        actor_count: usize,
        actors: impl IntoIterator<Item = Actor>,
        mailboxes: impl IntoIterator<Item = Mailbox>,
    ) -> Result<Self, ModelError> {
        let actors: Vec<Actor> = actors.into_iter().collect();
        let mailboxes: Vec<Mailbox> = mailboxes.into_iter().collect();

        if let Validation::Failure(errors) = Self::validate(actor_count, &actors, &mailboxes) {
            if let Some(first) = errors.iter().next() {
                return Err(first.clone());
            }
        }

        Ok(Self::from_parts(actors, mailboxes))
    }

    /// Check a set of actors and mailboxes, collecting every problem found.
    pub fn validate(
        actor_count: usize,
        actors: &[Actor],
        mailboxes: &[Mailbox],
    ) -> Validation<(), NonEmptyVec<ModelError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ModelError>>> = Vec::new();

        if actors.len() != actor_count {
            checks.push(Validation::fail(ModelError::ActorCountMismatch {
                declared: actor_count,
                actual: actors.len(),
            }));
        }

        let mut seen_actors = BTreeSet::new();
        for actor in actors {
            if !seen_actors.insert(actor.id()) {
                checks.push(Validation::fail(ModelError::DuplicateActor(actor.id())));
            }
        }

        let mut known_mailboxes = BTreeSet::new();
        for mailbox in mailboxes {
            if !known_mailboxes.insert(mailbox.id()) {
                checks.push(Validation::fail(ModelError::DuplicateMailbox(mailbox.id())));
            }
        }

        let missing: BTreeSet<MailboxId> = actors
            .iter()
            .flat_map(|a| a.transitions())
            .filter_map(Transition::mailbox)
            .filter(|id| !known_mailboxes.contains(id))
            .collect();
        for id in missing {
            checks.push(Validation::fail(ModelError::UnknownMailbox(id)));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    pub(crate) fn from_parts(actors: Vec<Actor>, mailboxes: Vec<Mailbox>) -> Self {
        debug!(
            actors = actors.len(),
            mailboxes = mailboxes.len(),
            "initial state built"
        );
        Self {
            actors: actors.into_iter().map(|a| (a.id(), Arc::new(a))).collect(),
            mailboxes: mailboxes
                .into_iter()
                .map(|m| (m.id(), Arc::new(m)))
                .collect(),
        }
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id).map(Arc::as_ref)
    }

    pub fn mailbox(&self, id: MailboxId) -> Option<&Mailbox> {
        self.mailboxes.get(&id).map(Arc::as_ref)
    }

    /// Actors in id order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.actors.values().map(Arc::as_ref)
    }

    /// Mailboxes in id order.
    pub fn mailboxes(&self) -> impl Iterator<Item = &Mailbox> + '_ {
        self.mailboxes.values().map(Arc::as_ref)
    }

    /// Every executed transition, by actor id then position.
    pub fn executed_transitions(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.actors()
            .flat_map(|a| a.transitions())
            .filter(|t| t.is_executed())
    }

    /// Fire `transition`, returning the successor state.
    ///
    /// The transition is looked up by `(owner, position)` and must be in
    /// [`enabled_transitions`](Self::enabled_transitions); anything else is an
    /// [`ModelError::InvalidTransition`]. `self` is left untouched.
    pub fn execute(&self, transition: &Transition) -> Result<State, ModelError> {
        let owner = transition.owner();
        let position = transition.position();

        let actor = self
            .actors
            .get(&owner)
            .ok_or(ModelError::UnknownActor(owner))?;
        let current = actor
            .next_transition()
            .filter(|next| next.position() == position && self.is_ready(next))
            .cloned()
            .ok_or(ModelError::InvalidTransition { owner, position })?;

        trace!(owner, position, kind = %current.kind(), "executing transition");

        let mut mailboxes = self.mailboxes.clone();
        if current.is_communication() {
            if let Some(id) = current.mailbox() {
                let mailbox = mailboxes
                    .get_mut(&id)
                    .ok_or(ModelError::UnknownMailbox(id))?;
                Arc::make_mut(mailbox).update(&current)?;
            }
        }

        let mut actors = self.actors.clone();
        if let Some(actor) = actors.get_mut(&owner) {
            Arc::make_mut(actor).mark_executed(position);
        }

        Ok(State { actors, mailboxes })
    }

    /// The transitions that may fire next: each actor's earliest unexecuted
    /// transition, minus waits whose communication is not ready yet.
    pub fn enabled_transitions(&self) -> BTreeSet<Transition> {
        self.actors()
            .filter_map(Actor::next_transition)
            .filter(|t| self.is_ready(t))
            .cloned()
            .collect()
    }

    /// True when no transition is enabled.
    pub fn is_terminal(&self) -> bool {
        self.enabled_transitions().is_empty()
    }

    // Construction rejects waits on unknown mailboxes, so a missing mailbox
    // here only means "not ready".
    fn is_ready(&self, transition: &Transition) -> bool {
        let TransitionKind::Wait { mailbox, .. } = transition.kind() else {
            return true;
        };
        let ready = self
            .mailboxes
            .get(&mailbox)
            .is_some_and(|m| m.check_comm(transition));
        if !ready {
            trace!(
                owner = transition.owner(),
                position = transition.position(),
                mailbox,
                "wait not ready"
            );
        }
        ready
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        let same_actors = self.actors.len() == other.actors.len()
            && self.actors().zip(other.actors()).all(|(a, b)| {
                a.id() == b.id()
                    && a.len() == b.len()
                    && a.transitions()
                        .iter()
                        .zip(b.transitions())
                        .all(|(x, y)| x.is_executed() == y.is_executed())
            });
        let same_mailboxes = self.mailboxes.len() == other.mailboxes.len()
            && self.mailboxes().zip(other.mailboxes()).all(|(a, b)| {
                a.id() == b.id() && a.sends() == b.sends() && a.receives() == b.receives()
            });
        same_actors && same_mailboxes
    }
}

impl Eq for State {}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("s = (")?;
        for t in self.executed_transitions() {
            write!(f, "t{}-p{} is executed", t.position(), t.owner())?;
        }
        f.write_str(")")
    }
}
