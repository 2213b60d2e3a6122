//! Builder for constructing initial states.

use crate::builder::config::ModelConfig;
use crate::builder::error::BuildError;
use crate::core::{Actor, ActorId, Mailbox, MailboxId, ModelError, State, Transition};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing an initial [`State`] with a fluent API.
///
/// Unlike [`State::new`], `build` reports every problem in the model at once.
///
/// # Example
///
/// ```rust
/// use unfolding::builder::StateBuilder;
/// use unfolding::core::Transition;
///
/// let state = StateBuilder::new()
///     .actor(0, vec![Transition::send(1, 0)])
///     .actor(1, vec![Transition::receive(1, 0), Transition::wait(1, 0)])
///     .mailbox(1)
///     .max_transitions_per_actor(30)
///     .build()
///     .unwrap();
///
/// assert_eq!(state.actor_count(), 2);
/// assert_eq!(state.enabled_transitions().len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StateBuilder {
    actors: Vec<(ActorId, Vec<Transition>)>,
    mailboxes: Vec<MailboxId>,
    config: ModelConfig,
}

impl StateBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an actor with its transition sequence.
    pub fn actor(mut self, id: ActorId, transitions: Vec<Transition>) -> Self {
        self.actors.push((id, transitions));
        self
    }

    /// Add a mailbox.
    pub fn mailbox(mut self, id: MailboxId) -> Self {
        self.mailboxes.push(id);
        self
    }

    /// Add several mailboxes at once.
    pub fn mailboxes(mut self, ids: impl IntoIterator<Item = MailboxId>) -> Self {
        self.mailboxes.extend(ids);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Bound the length of every actor's transition sequence.
    pub fn max_transitions_per_actor(mut self, n: usize) -> Self {
        self.config.max_transitions_per_actor = Some(n);
        self
    }

    /// Bound every mailbox log.
    pub fn max_mailbox_log(mut self, n: usize) -> Self {
        self.config.max_mailbox_log = Some(n);
        self
    }

    /// Build the initial state.
    /// Returns every validation problem if the model is inconsistent.
    pub fn build(self) -> Result<State, BuildError> {
        if self.actors.is_empty() {
            return Err(BuildError::NoActors);
        }

        let declared = self.actors.len();
        let mut checks: Vec<Validation<(), NonEmptyVec<ModelError>>> = Vec::new();
        let mut actors = Vec::with_capacity(declared);

        for (id, transitions) in self.actors {
            match self.config.max_transitions_per_actor {
                Some(capacity) => match Actor::with_capacity(id, transitions, capacity) {
                    Ok(actor) => actors.push(actor),
                    Err(e) => checks.push(Validation::fail(e)),
                },
                None => actors.push(Actor::new(id, transitions)),
            }
        }

        let mailboxes: Vec<Mailbox> = self
            .mailboxes
            .iter()
            .map(|&id| match self.config.max_mailbox_log {
                Some(capacity) => Mailbox::with_capacity(id, capacity),
                None => Mailbox::new(id),
            })
            .collect();

        checks.push(State::validate(actors.len(), &actors, &mailboxes));

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(State::from_parts(actors, mailboxes)),
            Validation::Failure(errors) => {
                Err(BuildError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }
}
