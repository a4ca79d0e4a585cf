//! Simulator - the step driver shared by every policy.
//!
//! Each reference is resolved completely before the next one starts:
//! 1. The policy observes the access
//! 2. Residency check: hit, or fault
//! 3. On fault, the policy picks a frame and the page is installed
//! 4. The frame store is snapshotted and counters updated
//!
//! # Example
//! ```
//! use pagesim::engine::{FifoPolicy, Simulator};
//! use pagesim::PageId;
//!
//! let refs: Vec<PageId> = [1, 2, 1].into_iter().map(PageId::new).collect();
//! let mut sim = Simulator::new(&refs, 2, FifoPolicy::new());
//!
//! assert!(sim.step().unwrap().fault);
//! assert!(sim.step().unwrap().fault);
//! assert!(!sim.step().unwrap().fault);
//! assert!(sim.step().is_none());
//! ```

use tracing::{debug, info, trace};

use crate::common::config::{frame_count_from_raw, SimulationConfig};
use crate::common::{Error, PageId, Result};
use crate::engine::policy::{
    EvictionPolicy, FifoPolicy, LruPolicy, OptimalPolicy, Policy, StepContext,
};
use crate::engine::trace::{SimulationResult, StepEvent, StepRecorder, StepState};
use crate::engine::{FrameStore, SimulationStats};

/// Replays a reference string against one policy.
///
/// A simulator owns its frame store, policy state, and trace. Nothing is
/// shared between simulators, so independent runs can go on different
/// threads freely.
pub struct Simulator<'a, P: EvictionPolicy> {
    references: &'a [PageId],
    frames: FrameStore,
    policy: P,
    stats: SimulationStats,
    recorder: StepRecorder,
    /// Zero-based index of the next reference to process.
    next: usize,
}

impl<'a, P: EvictionPolicy> Simulator<'a, P> {
    /// Create a simulator with `frame_count` empty frames.
    ///
    /// # Panics
    /// Panics if `frame_count` is zero.
    pub fn new(references: &'a [PageId], frame_count: usize, policy: P) -> Self {
        assert!(frame_count > 0, "a simulation needs at least one frame");
        let recorder = StepRecorder::new(policy.policy(), references.len());
        Self {
            references,
            frames: FrameStore::new(frame_count),
            policy,
            stats: SimulationStats::new(),
            recorder,
            next: 0,
        }
    }

    // ========================================================================
    // Public API: Stepping
    // ========================================================================

    /// Process the next reference, returning its recorded state.
    ///
    /// Returns `None` once every reference has been processed.
    pub fn step(&mut self) -> Option<&StepState> {
        let index = self.next;
        let page = *self.references.get(index)?;
        let cx = StepContext {
            index,
            references: self.references,
        };

        self.policy.record_access(page, &cx);

        let event = match self.frames.find(page) {
            Some(frame) => {
                self.stats.record_hit();
                StepEvent::Hit { frame }
            }
            None => self.handle_fault(page, &cx),
        };
        self.next += 1;

        trace!(
            step = index + 1,
            page = page.0,
            fault = event.is_fault(),
            frame = event.frame().0,
            "step resolved"
        );

        Some(
            self.recorder
                .record(page, event, self.frames.snapshot(), &self.stats),
        )
    }

    /// Process every remaining reference and return the full result.
    pub fn run(mut self) -> SimulationResult {
        while self.step().is_some() {}

        info!(
            policy = %self.policy.policy(),
            references = self.references.len(),
            frames = self.frames.len(),
            faults = self.stats.faults,
            hits = self.stats.hits,
            "simulation complete"
        );
        self.recorder.finish(&self.stats)
    }

    // ========================================================================
    // Public API: Inspection
    // ========================================================================

    /// Current frame contents.
    pub fn frames(&self) -> &FrameStore {
        &self.frames
    }

    /// Counters so far.
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Steps recorded so far.
    pub fn trace(&self) -> &[StepState] {
        self.recorder.trace()
    }

    /// The policy and its bookkeeping.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// True once every reference has been processed.
    pub fn is_finished(&self) -> bool {
        self.next >= self.references.len()
    }

    // ========================================================================
    // Internal
    // ========================================================================

    fn handle_fault(&mut self, page: PageId, cx: &StepContext<'_>) -> StepEvent {
        let selection = self.policy.select_frame(&self.frames, cx);
        let frame = selection.frame;

        let event = match self.frames.install(frame, page) {
            None => StepEvent::Loaded { frame },
            Some(evicted) => {
                debug!(
                    policy = %self.policy.policy(),
                    step = cx.index + 1,
                    page = page.0,
                    evicted = evicted.0,
                    frame = frame.0,
                    "page evicted"
                );
                StepEvent::Replaced {
                    frame,
                    evicted,
                    reason: selection.reason,
                }
            }
        };
        self.stats.record_fault(event.evicted().is_some());
        event
    }
}

/// A reference string and configuration that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationInput {
    references: Vec<PageId>,
    config: SimulationConfig,
}

impl SimulationInput {
    /// Validate raw inputs.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// empty sequence, frame count, policy name, then each reference value.
    ///
    /// # Errors
    /// - [`Error::EmptyReferences`] if `references` is empty
    /// - [`Error::InvalidFrameCount`] if `frame_count` is outside `1..=10`
    /// - [`Error::UnknownPolicy`] if `policy` is not `FIFO`, `LRU` or `Optimal`
    /// - [`Error::InvalidReference`] for the first non-positive reference
    pub fn new(references: &[i64], frame_count: i64, policy: &str) -> Result<Self> {
        if references.is_empty() {
            return Err(Error::EmptyReferences);
        }
        let frame_count = frame_count_from_raw(frame_count)?;
        let policy: Policy = policy.parse()?;

        let references = references
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                PageId::from_raw(value).ok_or_else(|| Error::InvalidReference {
                    index,
                    value: value.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_pages(references, SimulationConfig::new(frame_count, policy)?)
    }

    /// Build from already-typed pages.
    ///
    /// # Errors
    /// - [`Error::EmptyReferences`] if `references` is empty
    pub fn from_pages(references: Vec<PageId>, config: SimulationConfig) -> Result<Self> {
        if references.is_empty() {
            return Err(Error::EmptyReferences);
        }
        Ok(Self { references, config })
    }

    pub fn references(&self) -> &[PageId] {
        &self.references
    }

    pub fn config(&self) -> SimulationConfig {
        self.config
    }

    /// Run the configured policy.
    pub fn run(&self) -> SimulationResult {
        run(&self.references, self.config)
    }

    /// Run another policy over the same references and frame count.
    pub fn run_with(&self, policy: Policy) -> SimulationResult {
        run_policy(&self.references, self.config.frame_count(), policy)
    }
}

/// Run `config`'s policy over `references` on fresh frames.
pub fn run(references: &[PageId], config: SimulationConfig) -> SimulationResult {
    run_policy(references, config.frame_count(), config.policy())
}

fn run_policy(references: &[PageId], frame_count: usize, policy: Policy) -> SimulationResult {
    match policy {
        Policy::Fifo => Simulator::new(references, frame_count, FifoPolicy::new()).run(),
        Policy::Lru => Simulator::new(references, frame_count, LruPolicy::new()).run(),
        Policy::Optimal => Simulator::new(references, frame_count, OptimalPolicy::new()).run(),
    }
}

/// Validate raw inputs and run one simulation.
///
/// # Example
/// ```
/// let result = pagesim::simulate(&[1, 2, 3, 4, 1, 2, 5], 4, "FIFO").unwrap();
/// assert_eq!(result.total_faults, 5);
/// assert_eq!(result.total_hits, 2);
/// ```
///
/// # Errors
/// See [`SimulationInput::new`].
pub fn simulate(references: &[i64], frame_count: i64, policy: &str) -> Result<SimulationResult> {
    let input = SimulationInput::new(references, frame_count, policy).map_err(|err| {
        debug!(error = %err, code = ?err.code(), "rejected simulation input");
        err
    })?;
    Ok(input.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::FrameId;

    fn pages(ids: &[u64]) -> Vec<PageId> {
        ids.iter().copied().map(PageId::new).collect()
    }

    fn memory(slots: &[u64]) -> Vec<Option<PageId>> {
        slots
            .iter()
            .map(|&p| if p == 0 { None } else { Some(PageId::new(p)) })
            .collect()
    }

    #[test]
    fn test_fifo_trace() {
        let refs = pages(&[1, 2, 3, 4, 1, 2, 5]);
        let result = Simulator::new(&refs, 3, FifoPolicy::new()).run();

        let faults: Vec<bool> = result.trace.iter().map(|s| s.fault).collect();
        assert_eq!(faults, vec![true, true, true, true, true, true, true]);
        assert_eq!(result.trace[3].memory, memory(&[4, 2, 3]));
        assert_eq!(result.trace[3].evicted, Some(PageId::new(1)));
        assert_eq!(
            result.trace[3].explanation,
            "Page 4 replaces page 1 in frame 0 using FIFO policy."
        );
    }

    #[test]
    fn test_step_by_step_matches_run() {
        let refs = pages(&[7, 0, 1, 2, 0, 3, 0, 4]);
        let mut sim = Simulator::new(&refs, 3, LruPolicy::new());

        let first = sim.step().unwrap().clone();
        assert_eq!(first.step, 1);
        assert_eq!(first.memory, memory(&[7, 0, 0]));
        assert_eq!(first.explanation, "Page 7 loaded into empty frame 0.");
        assert_eq!(sim.stats().faults, 1);
        assert!(!sim.is_finished());

        while sim.step().is_some() {}
        assert!(sim.is_finished());
        assert_eq!(sim.trace().len(), refs.len());

        let whole = Simulator::new(&refs, 3, LruPolicy::new()).run();
        assert_eq!(sim.trace(), whole.trace.as_slice());
    }

    #[test]
    fn test_hit_reports_frame() {
        let refs = pages(&[3, 8, 8]);
        let result = Simulator::new(&refs, 2, OptimalPolicy::new()).run();

        let hit = &result.trace[2];
        assert!(!hit.fault);
        assert_eq!(hit.frame, FrameId::new(1));
        assert_eq!(hit.explanation, "Page 8 found in frame 1 (Page Hit).");
        assert_eq!(hit.evicted, None);
    }

    #[test]
    fn test_snapshot_taken_after_step() {
        let refs = pages(&[1, 2]);
        let result = Simulator::new(&refs, 1, FifoPolicy::new()).run();

        assert_eq!(result.trace[0].memory, memory(&[1]));
        assert_eq!(result.trace[1].memory, memory(&[2]));
    }

    #[test]
    fn test_validation_order() {
        assert_eq!(
            SimulationInput::new(&[], 0, "nope").unwrap_err(),
            Error::EmptyReferences
        );
        assert_eq!(
            SimulationInput::new(&[0], 0, "nope").unwrap_err(),
            Error::InvalidFrameCount { got: "0".into() }
        );
        assert_eq!(
            SimulationInput::new(&[0], 3, "nope").unwrap_err(),
            Error::UnknownPolicy("nope".into())
        );
        assert_eq!(
            SimulationInput::new(&[1, 0], 3, "LRU").unwrap_err(),
            Error::InvalidReference {
                index: 1,
                value: "0".into()
            }
        );
    }

    #[test]
    fn test_input_run_with_other_policy() {
        let input = SimulationInput::new(&[1, 2, 3, 1], 2, "FIFO").unwrap();
        assert_eq!(input.references().len(), 4);
        assert_eq!(input.config().policy(), Policy::Fifo);

        let lru = input.run_with(Policy::Lru);
        assert_eq!(lru.trace[0].algorithm, Policy::Lru);
    }

    #[test]
    fn test_from_pages_rejects_empty() {
        let err = SimulationInput::from_pages(vec![], SimulationConfig::default()).unwrap_err();
        assert_eq!(err, Error::EmptyReferences);
    }
}
