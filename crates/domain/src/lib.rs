//! # Vocawik Domain
//!
//! Error model and configuration types for the Vocawik API client.
//!
//! This crate contains:
//! - The request failure taxonomy (`ApiError`, `TransportError`, `ClientError`)
//! - The backend error envelope and its recognition
//! - The normalized application error (`AppError`) and normalization
//! - Configuration structures and domain constants
//!
//! ## Architecture
//! - No dependencies on other Vocawik crates
//! - No I/O; pure data and classification logic

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
