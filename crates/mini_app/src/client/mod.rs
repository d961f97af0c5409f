use api_types::{
    Identity,
    action::{ActionRequest, ActionResponse, RequestEnvelope},
};
use reqwest::{StatusCode, Url};

use crate::error::{AppError, Result};

/// Failure modes of a single backend exchange.
///
/// Callers treat `Status` and `Protocol` exactly like `Network`; they stay
/// separate variants so the log can tell a dead transport from a
/// misbehaving backend.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(reqwest::Error),
    #[error("server returned {0}")]
    Status(StatusCode),
    #[error("malformed response: {0}")]
    Protocol(reqwest::Error),
}

/// Single-endpoint JSON gateway to the attendance backend.
///
/// One `send` is one attempt: no retries, no timeouts, no caching. The
/// caller identity fixed at construction is attached to every request.
#[derive(Clone, Debug)]
pub struct Gateway {
    http: reqwest::Client,
    endpoint: Url,
    identity: Identity,
}

impl Gateway {
    pub fn new(endpoint: &str, identity: Identity) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), endpoint, identity)
    }

    /// Build over a caller-supplied client when the content type or the
    /// redirect policy must differ from the `reqwest` defaults.
    pub fn with_client(http: reqwest::Client, endpoint: &str, identity: Identity) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| AppError::Endpoint(format!("{endpoint}: {err}")))?;
        Ok(Self {
            http,
            endpoint,
            identity,
        })
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub async fn send(
        &self,
        request: &ActionRequest,
    ) -> std::result::Result<ActionResponse, GatewayError> {
        let envelope = RequestEnvelope {
            identity: &self.identity,
            request,
        };

        let res = self
            .http
            .post(self.endpoint.clone())
            .json(&envelope)
            .send()
            .await
            .map_err(GatewayError::Network)?;

        let status = res.status();
        if !status.is_success() {
            tracing::debug!(%status, "backend rejected request");
            return Err(GatewayError::Status(status));
        }

        res.json::<ActionResponse>()
            .await
            .map_err(GatewayError::Protocol)
    }
}
