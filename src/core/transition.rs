//! Elementary actor operations and the dependency relation between them.
//!
//! A [`Transition`] is identified by its owner actor and its position in that
//! actor's sequence. Two transitions are *dependent* when swapping them in an
//! interleaving may change what the program observes; independent pairs only
//! need to be explored in one order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

pub type ActorId = usize;
pub type MailboxId = usize;
pub type MutexId = usize;
pub type VariableId = usize;
/// Correlation id linking a send or receive to the wait that completes it.
pub type CommId = usize;

/// Whether a memory access reads or writes its variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessMode {
    Read,
    Write,
}

/// What a transition does, together with the ids it correlates on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    Send { mailbox: MailboxId, comm: CommId },
    Receive { mailbox: MailboxId, comm: CommId },
    Wait { mailbox: MailboxId, comm: CommId },
    Lock { mutex: MutexId },
    Unlock { mutex: MutexId },
    MutexWait,
    MutexTest,
    MemoryAccess { variable: VariableId, mode: AccessMode },
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Send { mailbox, comm } => write!(f, "send(mb{mailbox}, c{comm})"),
            Self::Receive { mailbox, comm } => write!(f, "receive(mb{mailbox}, c{comm})"),
            Self::Wait { mailbox, comm } => write!(f, "wait(mb{mailbox}, c{comm})"),
            Self::Lock { mutex } => write!(f, "lock(m{mutex})"),
            Self::Unlock { mutex } => write!(f, "unlock(m{mutex})"),
            Self::MutexWait => f.write_str("mutex-wait"),
            Self::MutexTest => f.write_str("mutex-test"),
            Self::MemoryAccess {
                variable,
                mode: AccessMode::Read,
            } => write!(f, "read(v{variable})"),
            Self::MemoryAccess {
                variable,
                mode: AccessMode::Write,
            } => write!(f, "write(v{variable})"),
        }
    }
}

/// One operation of one actor.
///
/// `position` and `owner` are assigned by [`Actor`](super::Actor) when the
/// transition is placed in a sequence. Equality, hashing and ordering only
/// look at `(position, owner)`, so a transition taken from one state can be
/// used to look up the same operation in any other state of the same model.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transition {
    pub(crate) position: usize,
    pub(crate) owner: ActorId,
    pub(crate) kind: TransitionKind,
    pub(crate) executed: bool,
}

impl Transition {
    /// Create an unplaced transition of the given kind.
    pub fn new(kind: TransitionKind) -> Self {
        Self {
            position: 0,
            owner: 0,
            kind,
            executed: false,
        }
    }

    pub fn send(mailbox: MailboxId, comm: CommId) -> Self {
        Self::new(TransitionKind::Send { mailbox, comm })
    }

    pub fn receive(mailbox: MailboxId, comm: CommId) -> Self {
        Self::new(TransitionKind::Receive { mailbox, comm })
    }

    pub fn wait(mailbox: MailboxId, comm: CommId) -> Self {
        Self::new(TransitionKind::Wait { mailbox, comm })
    }

    pub fn lock(mutex: MutexId) -> Self {
        Self::new(TransitionKind::Lock { mutex })
    }

    pub fn unlock(mutex: MutexId) -> Self {
        Self::new(TransitionKind::Unlock { mutex })
    }

    pub fn mutex_wait() -> Self {
        Self::new(TransitionKind::MutexWait)
    }

    pub fn mutex_test() -> Self {
        Self::new(TransitionKind::MutexTest)
    }

    pub fn read(variable: VariableId) -> Self {
        Self::new(TransitionKind::MemoryAccess {
            variable,
            mode: AccessMode::Read,
        })
    }

    pub fn write(variable: VariableId) -> Self {
        Self::new(TransitionKind::MemoryAccess {
            variable,
            mode: AccessMode::Write,
        })
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn owner(&self) -> ActorId {
        self.owner
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    pub fn is_executed(&self) -> bool {
        self.executed
    }

    /// Mailbox this transition goes through, for sends, receives and waits.
    pub fn mailbox(&self) -> Option<MailboxId> {
        match self.kind {
            TransitionKind::Send { mailbox, .. }
            | TransitionKind::Receive { mailbox, .. }
            | TransitionKind::Wait { mailbox, .. } => Some(mailbox),
            _ => None,
        }
    }

    /// Correlation id, for sends, receives and waits.
    pub fn comm_id(&self) -> Option<CommId> {
        match self.kind {
            TransitionKind::Send { comm, .. }
            | TransitionKind::Receive { comm, .. }
            | TransitionKind::Wait { comm, .. } => Some(comm),
            _ => None,
        }
    }

    /// True for the kinds that append to a mailbox log when fired.
    pub fn is_communication(&self) -> bool {
        matches!(
            self.kind,
            TransitionKind::Send { .. } | TransitionKind::Receive { .. }
        )
    }

    /// Decide whether `self` and `other` must be explored in both orders.
    ///
    /// The relation is symmetric: `a.is_dependent(&b) == b.is_dependent(&a)`
    /// for every pair.
    ///
    /// # Example
    ///
    /// ```rust
    /// use unfolding::core::{Actor, Transition};
    ///
    /// let a = Actor::new(0, vec![Transition::write(7)]);
    /// let b = Actor::new(1, vec![Transition::read(7), Transition::read(8)]);
    ///
    /// let write_x = &a.transitions()[0];
    /// let read_x = &b.transitions()[0];
    /// let read_y = &b.transitions()[1];
    ///
    /// assert!(write_x.is_dependent(read_x));
    /// assert!(!write_x.is_dependent(read_y));
    /// // same actor, always ordered
    /// assert!(read_x.is_dependent(read_y));
    /// ```
    pub fn is_dependent(&self, other: &Transition) -> bool {
        if self.owner == other.owner {
            return true;
        }

        match (self.kind, other.kind) {
            (TransitionKind::Send { mailbox: a, .. }, TransitionKind::Send { mailbox: b, .. })
            | (
                TransitionKind::Receive { mailbox: a, .. },
                TransitionKind::Receive { mailbox: b, .. },
            ) => a == b,
            (TransitionKind::Lock { mutex: a }, TransitionKind::Lock { mutex: b }) => a == b,
            (
                TransitionKind::Unlock { .. },
                TransitionKind::MutexWait | TransitionKind::MutexTest,
            )
            | (
                TransitionKind::MutexWait | TransitionKind::MutexTest,
                TransitionKind::Unlock { .. },
            ) => true,
            (
                TransitionKind::MemoryAccess {
                    variable: a,
                    mode: mode_a,
                },
                TransitionKind::MemoryAccess {
                    variable: b,
                    mode: mode_b,
                },
            ) => a == b && (mode_a == AccessMode::Write || mode_b == AccessMode::Write),
            _ => false,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}-p{}", self.position, self.owner)
    }
}

impl PartialEq for Transition {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.owner == other.owner
    }
}

impl Eq for Transition {}

impl Hash for Transition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position.hash(state);
        self.owner.hash(state);
    }
}

impl PartialOrd for Transition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Transition {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.position, self.owner).cmp(&(other.position, other.owner))
    }
}
