//! Frame identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a frame (slot) in the frame store.
///
/// Frames are stored in a `Vec`, so the id is a plain index:
/// `slots[frame_id.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(pub usize);

impl FrameId {
    /// Create a new FrameId.
    #[inline]
    pub fn new(id: usize) -> Self {
        FrameId(id)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
