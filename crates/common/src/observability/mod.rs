//! Observability primitives
//!
//! Currently tracing subscriber setup only; request-level spans and events
//! are emitted by the crates that own the work.

pub mod logging;

pub use logging::{init_tracing, ObservabilityError};
