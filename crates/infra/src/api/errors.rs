//! Failure classification for received responses

use vocawik_domain::{ApiError, ClientError};

use crate::http::TransportResponse;

/// Result type returned by the request pipeline
pub type ApiResult<T> = Result<T, ClientError>;

/// Builds the [`ApiError`] for a non-success response.
///
/// The body is decoded as JSON when possible; an empty or non-JSON body is
/// treated as absent.
pub fn parse_api_error(response: &TransportResponse) -> ApiError {
    let body = if response.is_empty() { None } else { response.json().ok() };
    ApiError::from_response(response.status.as_u16(), body)
}
