//! Synchronization primitives for async coordination
//!
//! ## Submodules
//!
//! - **`single_flight`**: collapses concurrent invocations of one operation
//!   into a single execution whose result every caller receives

pub mod single_flight;

pub use single_flight::SingleFlight;
