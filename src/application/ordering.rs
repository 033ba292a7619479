//! Resolution of overlapping requests within one controller.
//!
//! Requests are never queued or cancelled; each runs to completion. The policy
//! decides whether a completion is still allowed to touch state when it lands.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

/// Which completion determines the visible state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionPolicy {
    /// Every completion is applied in arrival order; the slowest request wins
    /// even if a newer one was issued after it.
    #[default]
    LastCompleted,
    /// Only the completion of the most recently issued request is applied;
    /// older completions are dropped.
    LatestIssued,
}

impl fmt::Display for CompletionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastCompleted => write!(f, "completed"),
            Self::LatestIssued => write!(f, "issued"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("response ordering must be 'completed' or 'issued', got '{0}'")]
pub struct ParsePolicyError(String);

impl FromStr for CompletionPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "completed" | "last-completed" => Ok(Self::LastCompleted),
            "issued" | "latest-issued" => Ok(Self::LatestIssued),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Per-controller request counter.
///
/// Callers issue and check tickets while holding the controller's state lock, so
/// "is this still the latest?" and "apply the result" happen as one step.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    policy: CompletionPolicy,
    issued: AtomicU64,
}

impl RequestSequencer {
    pub fn new(policy: CompletionPolicy) -> Self {
        Self {
            policy,
            issued: AtomicU64::new(0),
        }
    }

    /// Issues the next ticket, superseding every earlier one.
    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether a completion holding `ticket` may be applied.
    pub fn accepts(&self, ticket: Ticket) -> bool {
        match self.policy {
            CompletionPolicy::LastCompleted => true,
            CompletionPolicy::LatestIssued => self.issued.load(Ordering::SeqCst) == ticket.0,
        }
    }
}

/// A controller's state behind a `watch` channel, paired with its sequencer.
///
/// The channel's lock is the single-writer boundary: every mutation, ticket issue
/// and guarded completion runs inside it, and renderers observe settled values
/// through [`SequencedState::subscribe`].
#[derive(Debug)]
pub struct SequencedState<S> {
    tx: watch::Sender<S>,
    sequencer: RequestSequencer,
}

impl<S> SequencedState<S> {
    pub fn new(initial: S, policy: CompletionPolicy) -> Self {
        let (tx, _) = watch::channel(initial);
        Self {
            tx,
            sequencer: RequestSequencer::new(policy),
        }
    }

    pub fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.tx.borrow().clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    /// Mutates state without touching the request sequence.
    pub fn modify(&self, f: impl FnOnce(&mut S)) {
        self.tx.send_modify(f);
    }

    /// Issues a ticket and applies `f` in the same critical section.
    pub fn begin(&self, f: impl FnOnce(&mut S)) -> Ticket {
        let mut ticket = Ticket(0);
        self.tx.send_modify(|state| {
            ticket = self.sequencer.issue();
            f(state);
        });
        ticket
    }

    /// Applies `f` if the policy still accepts `ticket`. Returns whether it did.
    pub fn complete(&self, ticket: Ticket, f: impl FnOnce(&mut S)) -> bool {
        self.tx.send_if_modified(|state| {
            if !self.sequencer.accepts(ticket) {
                return false;
            }
            f(state);
            true
        })
    }
}
