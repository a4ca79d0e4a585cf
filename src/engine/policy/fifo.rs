//! FIFO (First-In-First-Out) replacement policy.

use crate::common::FrameId;
use crate::engine::FrameStore;

use super::{EvictionPolicy, EvictionReason, Policy, Selection, StepContext};

/// Evicts pages in the order they were loaded.
///
/// A single pointer walks the frames round-robin and advances on every
/// fault. Re-accessing a resident page does not move it. The pointer wraps
/// at the size of the frame store it is selecting from.
#[derive(Debug, Clone, Default)]
pub struct FifoPolicy {
    /// Next frame to fill, `0..frames.len()`.
    pointer: usize,
}

impl FifoPolicy {
    /// Create a FIFO policy with the pointer on frame 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame the next fault will land in.
    #[inline]
    pub fn pointer(&self) -> FrameId {
        FrameId::new(self.pointer)
    }
}

impl EvictionPolicy for FifoPolicy {
    fn policy(&self) -> Policy {
        Policy::Fifo
    }

    fn select_frame(&mut self, frames: &FrameStore, _cx: &StepContext<'_>) -> Selection {
        let frame = FrameId::new(self.pointer % frames.len());
        self.pointer = (frame.0 + 1) % frames.len();

        let reason = match frames.page(frame) {
            Some(_) => EvictionReason::FirstIn,
            None => EvictionReason::EmptyFrame,
        };
        Selection::new(frame, reason)
    }
}
