//! Optimal (Belady) replacement policy.
//!
//! Evicts the resident page whose next reference lies farthest in the
//! future, or one that is never referenced again. It needs the whole
//! reference string up front, so it is an offline bound on what any online
//! policy can achieve rather than something a real pager could run.

use tracing::debug;

use crate::common::{FrameId, PageId};
use crate::engine::FrameStore;

use super::{EvictionPolicy, EvictionReason, Policy, Selection, StepContext};

/// Belady's policy. Keeps no state between steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimalPolicy;

impl OptimalPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Zero-based index of the next reference to `page_id` strictly after
    /// the current position, or `None` if it never recurs.
    pub fn next_use(page_id: PageId, cx: &StepContext<'_>) -> Option<usize> {
        cx.remaining()
            .iter()
            .position(|&p| p == page_id)
            .map(|offset| cx.index + 1 + offset)
    }
}

impl EvictionPolicy for OptimalPolicy {
    fn policy(&self) -> Policy {
        Policy::Optimal
    }

    fn select_frame(&mut self, frames: &FrameStore, cx: &StepContext<'_>) -> Selection {
        if let Some(frame) = frames.first_empty() {
            return Selection::new(frame, EvictionReason::EmptyFrame);
        }

        // (frame, next use) of the best candidate so far.
        let mut farthest: Option<(FrameId, usize)> = None;
        for (frame, slot) in frames.iter() {
            let Some(page_id) = slot else { continue };
            match Self::next_use(page_id, cx) {
                None => {
                    debug!(
                        frame = frame.0,
                        page = page_id.0,
                        "optimal victim never used again"
                    );
                    return Selection::new(frame, EvictionReason::NeverUsedAgain);
                }
                Some(next) => {
                    if farthest.map_or(true, |(_, best)| next > best) {
                        farthest = Some((frame, next));
                    }
                }
            }
        }

        let (frame, next) = farthest.unwrap_or((FrameId::new(0), cx.index));
        debug!(frame = frame.0, next_use = next + 1, "optimal victim selected");
        Selection::new(
            frame,
            EvictionReason::FarthestNextUse {
                next_use_step: next + 1,
            },
        )
    }
}
