//! JWK provider implementation
//!
//! This crate manages JSON Web Keys declaratively. Resources generate RSA, EC,
//! symmetric and OKP keys from a declared `use`/`alg`/`size`/`crv`, validate
//! those declarations against algorithm tables, and assemble keys into JWK
//! Sets. Provider functions extract public keys and convert keys to PEM.

/// Algorithm, key size and curve tables
pub mod algorithms;

/// Provider configuration
pub mod config;

/// User-facing diagnostics
pub mod diagnostics;

/// Error types
pub mod error;

/// Provider functions
pub mod functions;

/// JWK model, public-key extraction and PEM conversion
pub mod jwk;

/// Key generation
pub mod keygen;

/// JWK Set helpers
pub mod keyset;

/// Provider registry
pub mod provider;

/// Resource handlers
pub mod resources;

/// Attribute schemas
pub mod schema;

/// Local resource state
pub mod state;

// Re-export key types for convenience
pub use algorithms::{EcCurve, KeyUse, OkpCurve};
pub use config::ProviderConfig;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{Error, Result};
pub use functions::Function;
pub use jwk::{Jwk, KeyMaterial, KeyMetadata};
pub use keyset::{create_keyset, duplicate_kids, parse_keyset};
pub use provider::{JwkProvider, ProviderSchema, PROVIDER_TYPE_NAME};
pub use resources::Resource;
pub use state::{ResourceState, StateStore};

/// Version of the JWK provider
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
