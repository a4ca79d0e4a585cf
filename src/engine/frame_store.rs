//! Frame store - the fixed set of memory frames a simulation mutates.
//!
//! A [`FrameStore`] is an ordered row of slots, each either empty or holding
//! one [`PageId`]. Slot order matters: policies scan frames left to right and
//! break ties on the lowest index.

use crate::common::{FrameId, PageId};

/// Fixed-size ordered sequence of optional page identifiers.
///
/// # Invariants
/// - The number of slots never changes after construction.
/// - A page occupies at most one slot at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameStore {
    slots: Vec<Option<PageId>>,
}

impl FrameStore {
    /// Create a store with `frame_count` empty frames.
    pub fn new(frame_count: usize) -> Self {
        Self {
            slots: vec![None; frame_count],
        }
    }

    /// Number of frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if the store has no frames at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The page loaded in `frame_id`, or `None` if the frame is empty.
    ///
    /// # Panics
    /// Panics if `frame_id` is out of range.
    #[inline]
    pub fn page(&self, frame_id: FrameId) -> Option<PageId> {
        self.slots[frame_id.0]
    }

    /// Frame currently holding `page_id`, if resident.
    pub fn find(&self, page_id: PageId) -> Option<FrameId> {
        self.slots
            .iter()
            .position(|slot| *slot == Some(page_id))
            .map(FrameId::new)
    }

    /// Check whether `page_id` is resident.
    #[inline]
    pub fn contains(&self, page_id: PageId) -> bool {
        self.find(page_id).is_some()
    }

    /// Lowest-indexed empty frame, if any.
    pub fn first_empty(&self) -> Option<FrameId> {
        self.slots.iter().position(Option::is_none).map(FrameId::new)
    }

    /// Number of occupied frames.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// True when every frame holds a page.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.first_empty().is_none()
    }

    /// Load `page_id` into `frame_id`, returning the page it displaced.
    ///
    /// # Panics
    /// Panics if `frame_id` is out of range.
    pub fn install(&mut self, frame_id: FrameId, page_id: PageId) -> Option<PageId> {
        debug_assert!(
            self.find(page_id).is_none(),
            "page {} is already resident",
            page_id
        );
        self.slots[frame_id.0].replace(page_id)
    }

    /// Iterate `(frame, slot)` pairs in frame order.
    pub fn iter(&self) -> impl Iterator<Item = (FrameId, Option<PageId>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (FrameId::new(i), *slot))
    }

    /// Copy of the current slots, for recording.
    pub fn snapshot(&self) -> Vec<Option<PageId>> {
        self.slots.clone()
    }
}
