//! pagesim - a page-replacement simulator with swappable eviction policies.
//!
//! Replays a reference string against a fixed number of frames under FIFO,
//! LRU or Optimal (Belady) replacement and records every step: the frame
//! contents afterwards, whether it was a hit or a fault, and why a page was
//! evicted. Cumulative fault counts and hit/miss ratios come with the trace.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            pagesim                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │     Request Layer (request/)   Comparison (compare/)     │   │
//! │  │   JSON in/out, error codes     policies side by side     │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                  Engine (engine/)                        │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │      Eviction Policies: FIFO | LRU | Optimal     │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │   Simulator + FrameStore + StepRecorder + Stats          │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, FrameId, Error, config)
//! - [`engine`] - Frame store, policies, step driver, trace
//! - [`request`] - JSON request/response and error codes
//! - [`compare`] - Running several policies over one input
//!
//! # Quick Start
//! ```
//! use pagesim::Policy;
//!
//! let result = pagesim::simulate(&[7, 0, 1, 2, 0, 3, 0, 4], 3, "LRU").unwrap();
//! assert_eq!(result.total_faults, 6);
//! assert_eq!(result.trace[3].explanation,
//!            "Page 2 replaces least recently used page 7 in frame 0.");
//! assert_eq!(result.trace[0].algorithm, Policy::Lru);
//! ```

pub mod common;
pub mod compare;
pub mod engine;
pub mod request;

// Re-export commonly used items at crate root for convenience
pub use common::config::{SimulationConfig, MAX_FRAMES, MIN_FRAMES};
pub use common::{Error, ErrorCode, FrameId, PageId, Result};

pub use compare::{compare, Comparison, PolicyOutcome};
pub use engine::{
    simulate, EvictionPolicy, Policy, SimulationInput, SimulationResult, SimulationStats,
    Simulator, StepState,
};
pub use request::{handle_request, SimulationRequest, SimulationResponse};
