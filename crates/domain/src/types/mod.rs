//! Request failure taxonomy and wire types
//!
//! - [`ApiError`]: the backend answered with a non-success status
//! - [`TransportError`]: no HTTP response exists
//! - [`ClientError`]: everything the request pipeline can return
//! - [`AppError`]: the normalized shape consumed by application code

pub mod api_error;
pub mod app_error;
pub mod auth;
pub mod client_error;

pub use api_error::{is_api_error_response, ApiError, ApiErrorResponse};
pub use app_error::{normalize_api_error, AppError, AppErrorKind};
pub use auth::AuthTokenResponse;
pub use client_error::{ClientError, TransportError, TransportErrorKind};
