//! End-to-end test utilities for the blog API
//!
//! Each [`TestServer`] runs the real router on an ephemeral port over
//! in-memory storage, with outgoing mail captured for inspection.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
