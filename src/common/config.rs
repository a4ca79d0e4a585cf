//! Configuration constants and the validated simulation configuration.

use crate::common::{Error, Result};
use crate::engine::Policy;

/// Smallest number of frames a simulation may use.
pub const MIN_FRAMES: usize = 1;

/// Largest number of frames a simulation may use.
///
/// The frame strip is rendered one box per frame, so the inbound layer
/// caps it at ten.
pub const MAX_FRAMES: usize = 10;

/// Frame count used when the caller does not pick one.
pub const DEFAULT_FRAMES: usize = 3;

/// Demo reference string (the classic Belady's-anomaly sequence).
pub const DEFAULT_REFERENCE_STRING: &str = "1,2,3,4,1,2,5,1,2,3,4,5";

/// A validated `(frame_count, policy)` pair.
///
/// # Example
/// ```
/// use pagesim::common::config::SimulationConfig;
/// use pagesim::Policy;
///
/// let config = SimulationConfig::new(4, Policy::Lru).unwrap();
/// assert_eq!(config.frame_count(), 4);
/// assert!(SimulationConfig::new(0, Policy::Lru).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    frame_count: usize,
    policy: Policy,
}

impl SimulationConfig {
    /// Create a config, rejecting frame counts outside `MIN_FRAMES..=MAX_FRAMES`.
    pub fn new(frame_count: usize, policy: Policy) -> Result<Self> {
        if !(MIN_FRAMES..=MAX_FRAMES).contains(&frame_count) {
            return Err(Error::InvalidFrameCount {
                got: frame_count.to_string(),
            });
        }
        Ok(Self {
            frame_count,
            policy,
        })
    }

    /// Number of frames in the frame store.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Replacement policy to run.
    #[inline]
    pub fn policy(&self) -> Policy {
        self.policy
    }
}

/// Validate an untrusted frame count.
pub fn frame_count_from_raw(value: i64) -> Result<usize> {
    usize::try_from(value)
        .ok()
        .filter(|n| (MIN_FRAMES..=MAX_FRAMES).contains(n))
        .ok_or_else(|| Error::InvalidFrameCount {
            got: value.to_string(),
        })
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frame_count: DEFAULT_FRAMES,
            policy: Policy::Fifo,
        }
    }
}
