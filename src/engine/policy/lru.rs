//! LRU (Least Recently Used) replacement policy.

use std::collections::HashMap;

use tracing::debug;

use crate::common::{FrameId, PageId};
use crate::engine::FrameStore;

use super::{EvictionPolicy, EvictionReason, Policy, Selection, StepContext};

/// Evicts the resident page whose last reference is oldest.
///
/// Every reference, hit or fault, stamps the page with the current step
/// index before residency is checked, so the page being referenced always
/// carries the newest stamp.
///
/// # Tie-break
/// Frames are scanned left to right and the candidate only changes on a
/// strictly older stamp, so among equal stamps the lowest frame wins.
#[derive(Debug, Clone, Default)]
pub struct LruPolicy {
    /// Page -> zero-based index of its most recent reference.
    last_used: HashMap<PageId, usize>,
}

impl LruPolicy {
    /// Create an LRU policy with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-based index of the most recent reference to `page_id`.
    pub fn last_used(&self, page_id: PageId) -> Option<usize> {
        self.last_used.get(&page_id).copied()
    }

    fn stamp(&self, page_id: PageId) -> usize {
        // Every resident page has been referenced at least once.
        self.last_used.get(&page_id).copied().unwrap_or(0)
    }
}

impl EvictionPolicy for LruPolicy {
    fn policy(&self) -> Policy {
        Policy::Lru
    }

    fn record_access(&mut self, page_id: PageId, cx: &StepContext<'_>) {
        self.last_used.insert(page_id, cx.index);
    }

    fn select_frame(&mut self, frames: &FrameStore, _cx: &StepContext<'_>) -> Selection {
        if let Some(frame) = frames.first_empty() {
            return Selection::new(frame, EvictionReason::EmptyFrame);
        }

        let mut victim = FrameId::new(0);
        let mut oldest = usize::MAX;
        for (frame, slot) in frames.iter() {
            let Some(page_id) = slot else { continue };
            let stamp = self.stamp(page_id);
            if stamp < oldest {
                oldest = stamp;
                victim = frame;
            }
        }

        debug!(frame = victim.0, last_used = oldest, "lru victim selected");
        Selection::new(
            victim,
            EvictionReason::LeastRecentlyUsed {
                last_used_step: oldest + 1,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(ids: &[u64]) -> Vec<PageId> {
        ids.iter().copied().map(PageId::new).collect()
    }

    fn store(pages: &[u64]) -> FrameStore {
        let mut frames = FrameStore::new(pages.len());
        for (i, &p) in pages.iter().enumerate() {
            frames.install(FrameId::new(i), PageId::new(p));
        }
        frames
    }

    fn touch_all(policy: &mut LruPolicy, references: &[PageId], upto: usize) {
        for index in 0..upto {
            let cx = StepContext { index, references };
            policy.record_access(references[index], &cx);
        }
    }

    #[test]
    fn test_lru_fills_empty_frame_first() {
        let references = refs(&[1, 2]);
        let mut policy = LruPolicy::new();
        let mut frames = FrameStore::new(3);
        frames.install(FrameId::new(0), PageId::new(1));

        let cx = StepContext {
            index: 1,
            references: &references,
        };
        let selection = policy.select_frame(&frames, &cx);
        assert_eq!(
            selection,
            Selection::new(FrameId::new(1), EvictionReason::EmptyFrame)
        );
    }

    #[test]
    fn test_lru_evicts_oldest_stamp() {
        // 1 2 3 1 -> page 2 is the oldest when 4 arrives.
        let references = refs(&[1, 2, 3, 1, 4]);
        let mut policy = LruPolicy::new();
        touch_all(&mut policy, &references, 5);

        let frames = store(&[1, 2, 3]);
        let cx = StepContext {
            index: 4,
            references: &references,
        };
        let selection = policy.select_frame(&frames, &cx);
        assert_eq!(selection.frame, FrameId::new(1));
        assert_eq!(
            selection.reason,
            EvictionReason::LeastRecentlyUsed { last_used_step: 2 }
        );
    }

    #[test]
    fn test_lru_stamps_every_access() {
        let references = refs(&[5, 6, 5]);
        let mut policy = LruPolicy::new();
        touch_all(&mut policy, &references, 3);

        assert_eq!(policy.last_used(PageId::new(5)), Some(2));
        assert_eq!(policy.last_used(PageId::new(6)), Some(1));
        assert_eq!(policy.last_used(PageId::new(7)), None);
    }

    #[test]
    fn test_lru_tie_prefers_lowest_frame() {
        // No history at all: every stamp falls back to the same value.
        let references = refs(&[1, 2, 3, 4]);
        let mut policy = LruPolicy::new();
        let frames = store(&[1, 2, 3]);

        let cx = StepContext {
            index: 3,
            references: &references,
        };
        assert_eq!(policy.select_frame(&frames, &cx).frame, FrameId::new(0));
    }
}
