use thiserror::Error;

use netboot_types::{EndpointKind, ModelError};

/// Hard failures of a verification run.
///
/// Network conditions never show up here; they land in the report. These
/// errors mean the verifier itself was misconfigured or interrupted.
#[derive(Debug, Error)]
pub enum HealthError {
    #[error("no port configured for the {0} endpoint")]
    MissingPort(EndpointKind),

    #[error("no host configured for target {0}")]
    MissingHost(String),

    #[error("identity data error: {0}")]
    Model(#[from] ModelError),

    #[error("config error: {0}")]
    Config(String),

    #[error("addresses file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("verification cancelled by shutdown")]
    Cancelled,
}
