//! Eviction policy implementations.
//!
//! Every policy plugs into the same step driver through [`EvictionPolicy`]:
//! - [`FifoPolicy`] - rotating insertion pointer, ignores recency
//! - [`LruPolicy`] - evicts the page with the oldest last access
//! - [`OptimalPolicy`] - Belady's policy, looks ahead in the reference string

mod fifo;
mod lru;
mod optimal;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{Error, FrameId, PageId};
use crate::engine::FrameStore;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;
pub use optimal::OptimalPolicy;

/// The replacement policies a simulation can run.
///
/// Names are matched exactly: `"FIFO"`, `"LRU"`, `"Optimal"`.
///
/// # Example
/// ```
/// use pagesim::Policy;
///
/// let policy: Policy = "LRU".parse().unwrap();
/// assert_eq!(policy, Policy::Lru);
/// assert_eq!(policy.to_string(), "LRU");
/// assert!("lru".parse::<Policy>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    #[serde(rename = "FIFO")]
    Fifo,
    #[serde(rename = "LRU")]
    Lru,
    #[serde(rename = "Optimal")]
    Optimal,
}

impl Policy {
    /// All policies, in display order.
    pub const ALL: [Policy; 3] = [Policy::Fifo, Policy::Lru, Policy::Optimal];

    /// Wire name of the policy.
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fifo => "FIFO",
            Policy::Lru => "LRU",
            Policy::Optimal => "Optimal",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Policy::ALL
            .into_iter()
            .find(|policy| policy.name() == s)
            .ok_or_else(|| Error::UnknownPolicy(s.to_string()))
    }
}

/// Read-only view of the run a policy is deciding for.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// Zero-based position of the current reference.
    pub index: usize,
    /// The complete reference string, including already-processed entries.
    pub references: &'a [PageId],
}

impl StepContext<'_> {
    /// Page referenced at the current position.
    #[inline]
    pub fn page(&self) -> PageId {
        self.references[self.index]
    }

    /// References strictly after the current position.
    #[inline]
    pub fn remaining(&self) -> &[PageId] {
        &self.references[self.index + 1..]
    }
}

/// Why a policy picked the frame it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionReason {
    /// The frame was empty; nothing is evicted.
    EmptyFrame,
    /// The frame is next under the FIFO pointer.
    FirstIn,
    /// The frame holds the least recently used page, last touched at
    /// `last_used_step` (1-based).
    LeastRecentlyUsed { last_used_step: usize },
    /// The frame's page does not occur again.
    NeverUsedAgain,
    /// The frame's page is next needed at `next_use_step` (1-based), the
    /// farthest of all resident pages.
    FarthestNextUse { next_use_step: usize },
}

/// A policy's answer to "where does the faulting page go".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub frame: FrameId,
    pub reason: EvictionReason,
}

impl Selection {
    #[inline]
    pub fn new(frame: FrameId, reason: EvictionReason) -> Self {
        Self { frame, reason }
    }
}

/// A page-replacement policy driven by [`Simulator`](crate::engine::Simulator).
///
/// The driver owns the frame store and the statistics; a policy only keeps
/// its own bookkeeping and answers which frame receives a faulting page.
pub trait EvictionPolicy {
    /// Which policy this is.
    fn policy(&self) -> Policy;

    /// Observe a reference before the driver checks residency.
    ///
    /// Called exactly once per step, for hits and faults alike.
    fn record_access(&mut self, _page_id: PageId, _cx: &StepContext<'_>) {}

    /// Choose the frame that receives the faulting page.
    ///
    /// Called once per fault. The returned frame may be empty or occupied;
    /// an occupied frame's page is evicted.
    fn select_frame(&mut self, frames: &FrameStore, cx: &StepContext<'_>) -> Selection;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parse() {
        assert_eq!("FIFO".parse::<Policy>().unwrap(), Policy::Fifo);
        assert_eq!("LRU".parse::<Policy>().unwrap(), Policy::Lru);
        assert_eq!("Optimal".parse::<Policy>().unwrap(), Policy::Optimal);

        let err = "Clock".parse::<Policy>().unwrap_err();
        assert_eq!(err, Error::UnknownPolicy("Clock".into()));
    }

    #[test]
    fn test_policy_serde_names() {
        assert_eq!(serde_json::to_string(&Policy::Fifo).unwrap(), "\"FIFO\"");
        assert_eq!(
            serde_json::from_str::<Policy>("\"Optimal\"").unwrap(),
            Policy::Optimal
        );
    }

    #[test]
    fn test_step_context_remaining() {
        let refs: Vec<PageId> = [1, 2, 3].into_iter().map(PageId::new).collect();
        let cx = StepContext {
            index: 1,
            references: &refs,
        };
        assert_eq!(cx.page(), PageId::new(2));
        assert_eq!(cx.remaining(), &[PageId::new(3)]);

        let last = StepContext {
            index: 2,
            references: &refs,
        };
        assert!(last.remaining().is_empty());
    }
}
