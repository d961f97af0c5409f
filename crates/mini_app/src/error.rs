use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures that abort session construction.
///
/// Per-request failures are [`crate::client::GatewayError`] and are surfaced
/// through the host instead of propagating.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}
