//! The simulation engine.
//!
//! # Components
//! - [`FrameStore`] - The fixed row of frames being replayed into
//! - [`policy`] - Eviction policies (FIFO, LRU, Optimal) behind [`EvictionPolicy`]
//! - [`Simulator`] - Generic step driver parameterized over a policy
//! - [`StepRecorder`] / [`StepState`] - Per-step snapshots and explanations
//! - [`SimulationStats`] - Hit/fault counters

mod frame_store;
pub mod policy;
mod simulator;
mod stats;
mod trace;

pub use frame_store::FrameStore;
pub use policy::{
    EvictionPolicy, EvictionReason, FifoPolicy, LruPolicy, OptimalPolicy, Policy, Selection,
    StepContext,
};
pub use simulator::{run, simulate, SimulationInput, Simulator};
pub use stats::SimulationStats;
pub use trace::{SimulationResult, StepEvent, StepRecorder, StepState};
