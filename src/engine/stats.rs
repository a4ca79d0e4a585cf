//! Hit/fault statistics for a simulation run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Running hit/fault counters.
///
/// Ratios are always derived from the counters, never stored.
///
/// # Example
/// ```
/// use pagesim::SimulationStats;
///
/// let mut stats = SimulationStats::new();
/// stats.record_fault(false);
/// stats.record_hit();
/// assert_eq!(stats.hit_rate(), 0.5);
/// println!("{}", stats);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// References that found their page resident.
    pub hits: u64,

    /// References that had to load their page.
    pub faults: u64,

    /// Faults that displaced a resident page.
    pub evictions: u64,
}

impl SimulationStats {
    /// Create a stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a hit.
    #[inline]
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Count a fault; `evicted` says whether a resident page was displaced.
    #[inline]
    pub fn record_fault(&mut self, evicted: bool) {
        self.faults += 1;
        if evicted {
            self.evictions += 1;
        }
    }

    /// References processed so far.
    #[inline]
    pub fn total(&self) -> u64 {
        self.hits + self.faults
    }

    /// Hit ratio (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    /// Miss ratio (0.0 to 1.0).
    pub fn miss_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.faults as f64 / total as f64,
        }
    }
}

impl fmt::Display for SimulationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ hits: {}, faults: {}, evictions: {}, hit_rate: {:.2}% }}",
            self.hits,
            self.faults,
            self.evictions,
            self.hit_rate() * 100.0
        )
    }
}
