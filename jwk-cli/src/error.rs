//! Error types for the JWK CLI

use jwk_provider::Diagnostics;
use thiserror::Error;

/// Type alias for Results with CLI errors
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the JWK CLI
#[derive(Error, Debug)]
pub enum Error {
    /// Error from the provider library
    #[error(transparent)]
    Provider(#[from] jwk_provider::Error),

    /// A lifecycle call reported at least one error diagnostic
    #[error("{}", render(.0))]
    Diagnostics(Diagnostics),

    /// No instance recorded under this address
    #[error("No resource instance at {0}")]
    NotFound(String),

    /// An instance already exists where a new one was expected
    #[error("Resource instance {0} already exists in state")]
    AlreadyExists(String),

    /// Malformed command input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde JSON error
    #[error("Serde JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn render(diags: &Diagnostics) -> String {
    diags
        .errors()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
