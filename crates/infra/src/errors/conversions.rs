//! Conversions from external infrastructure errors into crate errors.

use reqwest::Error as HttpError;
use vocawik_domain::{TransportError, TransportErrorKind, VocawikError};

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub VocawikError);

impl From<InfraError> for VocawikError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<VocawikError> for InfraError {
    fn from(value: VocawikError) -> Self {
        InfraError(value)
    }
}

/// Classifies a failed exchange for the request pipeline.
pub trait IntoTransportError {
    fn into_transport(self) -> TransportError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TransportError */
/* -------------------------------------------------------------------------- */

impl IntoTransportError for HttpError {
    fn into_transport(self) -> TransportError {
        let kind = if self.is_timeout() {
            TransportErrorKind::Timeout
        } else if self.is_connect() {
            TransportErrorKind::Connect
        } else if self.is_body() || self.is_decode() {
            TransportErrorKind::Body
        } else {
            TransportErrorKind::Request
        };

        TransportError::new(kind, self.to_string())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → VocawikError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        // Builder failures carry no URL and are configuration problems.
        if value.is_builder() {
            return InfraError(VocawikError::Config(format!("invalid HTTP client setup: {value}")));
        }

        let failure = value.into_transport();
        let message = match failure.kind() {
            TransportErrorKind::Timeout => "HTTP request timed out".to_string(),
            TransportErrorKind::Connect => "HTTP connection failure".to_string(),
            _ => failure.message().to_string(),
        };
        InfraError(VocawikError::Network(message))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::time::Duration;

    use reqwest::Client;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn timeout_maps_to_timeout_kind() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
            .mount(&server)
            .await;

        let client = Client::builder().timeout(Duration::from_millis(20)).build().unwrap();
        let err = client.get(server.uri()).send().await.unwrap_err();

        let failure = err.into_transport();
        assert_eq!(failure.kind(), TransportErrorKind::Timeout);
    }

    #[tokio::test]
    async fn connection_failure_maps_to_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = Client::new().get(format!("http://{addr}")).send().await.unwrap_err();

        let infra = InfraError::from(err);
        assert_eq!(VocawikError::from(infra), VocawikError::Network("HTTP connection failure".into()));
    }

    #[tokio::test]
    async fn malformed_url_maps_to_config_error() {
        let err = Client::new().get("not a url").send().await.unwrap_err();

        let infra = InfraError::from(err);
        assert!(matches!(infra.0, VocawikError::Config(_)));
    }

    #[test]
    fn wraps_and_unwraps_domain_errors() {
        let original = VocawikError::Internal("boom".into());
        let roundtrip: VocawikError = InfraError::from(original.clone()).into();

        assert_eq!(roundtrip, original);
    }
}
