//! Common types and utilities shared across pagesim.
//!
//! - Configuration constants and [`config::SimulationConfig`]
//! - Error types
//! - Identifiers (PageId, FrameId)

pub mod config;
pub mod error;
mod frame_id;
mod page_id;

pub use error::{Error, ErrorCode, Result};
pub use frame_id::FrameId;
pub use page_id::PageId;
