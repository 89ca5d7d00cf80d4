//! Error handling for the JWK provider
//!
//! Configuration problems a user can fix are reported as
//! [`Diagnostics`](crate::diagnostics::Diagnostics); the errors here cover
//! everything that stops an operation outright.

use thiserror::Error;

/// Type alias for Results with JWK provider errors
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the JWK provider
#[derive(Error, Debug)]
pub enum Error {
    /// Error while generating key material
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// The JWK document is malformed or inconsistent
    #[error("Invalid JWK: {0}")]
    InvalidJwk(String),

    /// The key type cannot be used for the requested operation
    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),

    /// The algorithm is recognized but cannot be generated
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Elliptic curve outside P-256, P-384 and P-521
    #[error("Unsupported elliptic curve: {0}")]
    UnsupportedCurve(String),

    /// Error related to key set assembly or parsing
    #[error("Keyset error: {0}")]
    Keyset(String),

    /// PEM encoding failure
    #[error("PEM encoding error: {0}")]
    Pem(String),

    /// No resource type registered under this name
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    /// No provider function registered under this name
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number or type of function arguments
    #[error("Invalid function arguments: {0}")]
    InvalidArguments(String),

    /// Error related to the local state file
    #[error("State error: {0}")]
    State(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde JSON error
    #[error("Serde JSON error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl From<rsa::Error> for Error {
    fn from(err: rsa::Error) -> Self {
        Error::KeyGeneration(err.to_string())
    }
}
