//! Mailboxes and rendezvous matching.
//!
//! A mailbox pairs sends with receives in first-pending-first-matched order.
//! Correlation ids are carried on each record so that a later `Wait` can find
//! its own communication, but they play no part in deciding who matches whom.

use super::error::ModelError;
use super::transition::{ActorId, CommId, MailboxId, Transition, TransitionKind};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Readiness of one side of a rendezvous.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommStatus {
    /// No partner has arrived yet
    #[default]
    Pending,
    /// Paired with a partner on the other side of the mailbox
    Ready,
}

/// Bookkeeping entry appended to a mailbox log when a send or receive fires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Communication {
    pub owner: ActorId,
    pub comm: CommId,
    pub status: CommStatus,
}

impl Communication {
    pub fn new(owner: ActorId, comm: CommId) -> Self {
        Self {
            owner,
            comm,
            status: CommStatus::Pending,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == CommStatus::Ready
    }
}

/// A rendezvous point with an append-only send log and receive log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Mailbox {
    id: MailboxId,
    sends: Vec<Communication>,
    receives: Vec<Communication>,
    capacity: Option<usize>,
}

impl Mailbox {
    pub fn new(id: MailboxId) -> Self {
        Self {
            id,
            sends: Vec::new(),
            receives: Vec::new(),
            capacity: None,
        }
    }

    /// Create a mailbox whose logs may each hold at most `capacity` records.
    pub fn with_capacity(id: MailboxId, capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::new(id)
        }
    }

    pub fn id(&self) -> MailboxId {
        self.id
    }

    pub fn sends(&self) -> &[Communication] {
        &self.sends
    }

    pub fn receives(&self) -> &[Communication] {
        &self.receives
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Record a fired send or receive, matching it against the oldest pending
    /// record on the opposite side.
    ///
    /// # Example
    ///
    /// ```rust
    /// use unfolding::core::{Actor, CommStatus, Mailbox, Transition};
    ///
    /// let sender = Actor::new(0, vec![Transition::send(1, 0)]);
    /// let receiver = Actor::new(1, vec![Transition::receive(1, 0)]);
    ///
    /// let mut mailbox = Mailbox::new(1);
    /// mailbox.update(&sender.transitions()[0]).unwrap();
    /// assert_eq!(mailbox.sends()[0].status, CommStatus::Pending);
    ///
    /// mailbox.update(&receiver.transitions()[0]).unwrap();
    /// assert_eq!(mailbox.sends()[0].status, CommStatus::Ready);
    /// assert_eq!(mailbox.receives()[0].status, CommStatus::Ready);
    /// ```
    pub fn update(&mut self, transition: &Transition) -> Result<(), ModelError> {
        let (own_log, partner_log, side) = match transition.kind() {
            TransitionKind::Send { mailbox, .. } if mailbox == self.id => {
                (&mut self.sends, &mut self.receives, "send")
            }
            TransitionKind::Receive { mailbox, .. } if mailbox == self.id => {
                (&mut self.receives, &mut self.sends, "receive")
            }
            TransitionKind::Send { mailbox, .. } | TransitionKind::Receive { mailbox, .. } => {
                return Err(ModelError::UnknownMailbox(mailbox));
            }
            _ => {
                return Err(ModelError::NotACommunication {
                    owner: transition.owner(),
                    position: transition.position(),
                })
            }
        };

        if let Some(capacity) = self.capacity {
            if own_log.len() >= capacity {
                return Err(ModelError::CapacityExceeded {
                    what: format!("{side} log of mailbox {}", self.id),
                    capacity,
                });
            }
        }

        let comm = transition.comm_id().unwrap_or_default();
        let mut record = Communication::new(transition.owner(), comm);

        if let Some(partner) = partner_log
            .iter_mut()
            .find(|c| c.status == CommStatus::Pending)
        {
            partner.status = CommStatus::Ready;
            record.status = CommStatus::Ready;
            debug!(
                mailbox = self.id,
                side,
                owner = record.owner,
                comm = record.comm,
                partner_owner = partner.owner,
                partner_comm = partner.comm,
                "rendezvous matched"
            );
        }

        own_log.push(record);
        Ok(())
    }

    /// True if a ready record exists for the transition's owner and correlation id.
    pub fn check_comm(&self, transition: &Transition) -> bool {
        let Some(comm) = transition.comm_id() else {
            return false;
        };
        self.sends
            .iter()
            .chain(self.receives.iter())
            .any(|c| c.owner == transition.owner() && c.comm == comm && c.is_ready())
    }
}

impl PartialEq for Mailbox {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Mailbox {}

impl PartialOrd for Mailbox {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Mailbox {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
