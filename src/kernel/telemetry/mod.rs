//! Session counters.
//!
//! Telemetry is a read-only side channel. Decision logic never reads it;
//! it exists for the session summary and for tests.

pub mod event;
pub mod metrics;
pub mod recorder;
