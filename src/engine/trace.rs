//! Step recording: per-reference snapshots and the final result.
//!
//! The driver hands every resolved step to a [`StepRecorder`], which keeps
//! the append-only trace plus the cumulative series the charts plot.

use serde::{Deserialize, Serialize};

use crate::common::{FrameId, PageId};
use crate::engine::policy::{EvictionReason, Policy};
use crate::engine::SimulationStats;

/// What happened to the frame store on one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// The page was already resident in `frame`.
    Hit { frame: FrameId },
    /// The page was loaded into an empty `frame`.
    Loaded { frame: FrameId },
    /// The page replaced `evicted` in `frame`.
    Replaced {
        frame: FrameId,
        evicted: PageId,
        reason: EvictionReason,
    },
}

impl StepEvent {
    /// Frame that was hit or filled.
    pub fn frame(&self) -> FrameId {
        match *self {
            StepEvent::Hit { frame }
            | StepEvent::Loaded { frame }
            | StepEvent::Replaced { frame, .. } => frame,
        }
    }

    pub fn is_fault(&self) -> bool {
        !matches!(self, StepEvent::Hit { .. })
    }

    pub fn evicted(&self) -> Option<PageId> {
        match *self {
            StepEvent::Replaced { evicted, .. } => Some(evicted),
            _ => None,
        }
    }

    /// Human-readable account of the step.
    pub fn explain(&self, page: PageId) -> String {
        match *self {
            StepEvent::Hit { frame } => {
                format!("Page {page} found in frame {frame} (Page Hit).")
            }
            StepEvent::Loaded { frame } => {
                format!("Page {page} loaded into empty frame {frame}.")
            }
            StepEvent::Replaced {
                frame,
                evicted,
                reason,
            } => match reason {
                EvictionReason::FirstIn => format!(
                    "Page {page} replaces page {evicted} in frame {frame} using FIFO policy."
                ),
                EvictionReason::LeastRecentlyUsed { .. } => format!(
                    "Page {page} replaces least recently used page {evicted} in frame {frame}."
                ),
                EvictionReason::NeverUsedAgain => format!(
                    "Page {page} replaces page {evicted} in frame {frame} (never used again)."
                ),
                EvictionReason::FarthestNextUse { next_use_step } => format!(
                    "Page {page} replaces page {evicted} in frame {frame} \
                     (used farthest in future at step {next_use_step})."
                ),
                EvictionReason::EmptyFrame => {
                    format!("Page {page} replaces page {evicted} in frame {frame}.")
                }
            },
        }
    }
}

/// Immutable record of one processed reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepState {
    /// 1-based step number.
    pub step: usize,
    /// Page referenced on this step.
    pub page: PageId,
    /// Frame contents after the step resolved.
    pub memory: Vec<Option<PageId>>,
    pub fault: bool,
    pub explanation: String,
    pub algorithm: Policy,
    /// Frame that was hit or filled.
    pub frame: FrameId,
    /// Page removed to make room, if any.
    pub evicted: Option<PageId>,
}

/// Outcome of a full run: the trace plus cumulative series, all index-aligned
/// with the reference string.
///
/// Serializes with the field names the visualizer consumes (`states`,
/// `pageFaults`, `hitRatio`, `missRatio`, `totalFaults`, `totalHits`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    #[serde(rename = "states")]
    pub trace: Vec<StepState>,
    /// Cumulative fault count after each step.
    #[serde(rename = "pageFaults")]
    pub faults_per_step: Vec<u64>,
    #[serde(rename = "hitRatio")]
    pub hit_ratio_per_step: Vec<f64>,
    #[serde(rename = "missRatio")]
    pub miss_ratio_per_step: Vec<f64>,
    pub total_faults: u64,
    pub total_hits: u64,
}

impl SimulationResult {
    /// Number of references simulated.
    #[inline]
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    /// Percentage of references that hit (0.0 to 100.0).
    pub fn efficiency(&self) -> f64 {
        if self.trace.is_empty() {
            0.0
        } else {
            self.total_hits as f64 / self.trace.len() as f64 * 100.0
        }
    }

    /// Final counters, including evictions.
    pub fn stats(&self) -> SimulationStats {
        let evictions = self.trace.iter().filter(|s| s.evicted.is_some()).count() as u64;
        SimulationStats {
            hits: self.total_hits,
            faults: self.total_faults,
            evictions,
        }
    }

    /// Hit ratio after the last step.
    pub fn final_hit_ratio(&self) -> f64 {
        self.hit_ratio_per_step.last().copied().unwrap_or(0.0)
    }

    /// Miss ratio after the last step.
    pub fn final_miss_ratio(&self) -> f64 {
        self.miss_ratio_per_step.last().copied().unwrap_or(0.0)
    }
}

/// Collects step states and the cumulative series as a run progresses.
#[derive(Debug)]
pub struct StepRecorder {
    policy: Policy,
    trace: Vec<StepState>,
    faults_per_step: Vec<u64>,
    hit_ratio_per_step: Vec<f64>,
    miss_ratio_per_step: Vec<f64>,
}

impl StepRecorder {
    /// Create a recorder sized for `capacity` steps.
    pub fn new(policy: Policy, capacity: usize) -> Self {
        Self {
            policy,
            trace: Vec::with_capacity(capacity),
            faults_per_step: Vec::with_capacity(capacity),
            hit_ratio_per_step: Vec::with_capacity(capacity),
            miss_ratio_per_step: Vec::with_capacity(capacity),
        }
    }

    /// Append one resolved step. `stats` must already include it.
    pub fn record(
        &mut self,
        page: PageId,
        event: StepEvent,
        memory: Vec<Option<PageId>>,
        stats: &SimulationStats,
    ) -> &StepState {
        let step = self.trace.len() + 1;
        debug_assert_eq!(stats.total(), step as u64);

        self.faults_per_step.push(stats.faults);
        self.hit_ratio_per_step.push(stats.hit_rate());
        self.miss_ratio_per_step.push(stats.miss_rate());

        self.trace.push(StepState {
            step,
            page,
            memory,
            fault: event.is_fault(),
            explanation: event.explain(page),
            algorithm: self.policy,
            frame: event.frame(),
            evicted: event.evicted(),
        });
        &self.trace[step - 1]
    }

    /// Steps recorded so far.
    pub fn trace(&self) -> &[StepState] {
        &self.trace
    }

    /// Consume the recorder into the final result.
    pub fn finish(self, stats: &SimulationStats) -> SimulationResult {
        SimulationResult {
            trace: self.trace,
            faults_per_step: self.faults_per_step,
            hit_ratio_per_step: self.hit_ratio_per_step,
            miss_ratio_per_step: self.miss_ratio_per_step,
            total_faults: stats.faults,
            total_hits: stats.hits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explanations() {
        let page = PageId::new(4);
        let frame = FrameId::new(1);
        let evicted = PageId::new(2);

        assert_eq!(
            StepEvent::Hit { frame }.explain(page),
            "Page 4 found in frame 1 (Page Hit)."
        );
        assert_eq!(
            StepEvent::Loaded { frame }.explain(page),
            "Page 4 loaded into empty frame 1."
        );

        let replaced = |reason| StepEvent::Replaced {
            frame,
            evicted,
            reason,
        };
        assert_eq!(
            replaced(EvictionReason::FirstIn).explain(page),
            "Page 4 replaces page 2 in frame 1 using FIFO policy."
        );
        assert_eq!(
            replaced(EvictionReason::LeastRecentlyUsed { last_used_step: 1 }).explain(page),
            "Page 4 replaces least recently used page 2 in frame 1."
        );
        assert_eq!(
            replaced(EvictionReason::NeverUsedAgain).explain(page),
            "Page 4 replaces page 2 in frame 1 (never used again)."
        );
        assert_eq!(
            replaced(EvictionReason::FarthestNextUse { next_use_step: 9 }).explain(page),
            "Page 4 replaces page 2 in frame 1 (used farthest in future at step 9)."
        );
    }

    #[test]
    fn test_recorder_series() {
        let mut recorder = StepRecorder::new(Policy::Lru, 2);
        let mut stats = SimulationStats::new();

        stats.record_fault(false);
        recorder.record(
            PageId::new(1),
            StepEvent::Loaded {
                frame: FrameId::new(0),
            },
            vec![Some(PageId::new(1))],
            &stats,
        );

        stats.record_hit();
        let state = recorder.record(
            PageId::new(1),
            StepEvent::Hit {
                frame: FrameId::new(0),
            },
            vec![Some(PageId::new(1))],
            &stats,
        );
        assert_eq!(state.step, 2);
        assert!(!state.fault);

        let result = recorder.finish(&stats);
        assert_eq!(result.faults_per_step, vec![1, 1]);
        assert_eq!(result.hit_ratio_per_step, vec![0.0, 0.5]);
        assert_eq!(result.miss_ratio_per_step, vec![1.0, 0.5]);
        assert_eq!(result.total_faults, 1);
        assert_eq!(result.total_hits, 1);
        assert_eq!(result.efficiency(), 50.0);
        assert_eq!(result.trace[0].algorithm, Policy::Lru);
    }

    #[test]
    fn test_result_wire_names() {
        let mut recorder = StepRecorder::new(Policy::Fifo, 1);
        let mut stats = SimulationStats::new();
        stats.record_fault(false);
        recorder.record(
            PageId::new(3),
            StepEvent::Loaded {
                frame: FrameId::new(0),
            },
            vec![Some(PageId::new(3)), None],
            &stats,
        );
        let json = serde_json::to_value(recorder.finish(&stats)).unwrap();

        for key in ["states", "pageFaults", "hitRatio", "missRatio", "totalFaults", "totalHits"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        let state = &json["states"][0];
        assert_eq!(state["memory"], serde_json::json!([3, null]));
        assert_eq!(state["algorithm"], "FIFO");
        assert_eq!(state["evicted"], serde_json::Value::Null);
    }
}
