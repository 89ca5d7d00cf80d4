//! JWK CLI library
//!
//! The `jwk` binary plays the role of an infrastructure-as-code host for the
//! JWK provider: it runs resource lifecycles against a local state file and
//! calls provider functions. The pieces are exposed here for testing.

pub mod commands;
pub mod error;
pub mod host;
pub mod output;

pub use error::{Error, Result};
pub use host::{Host, LifecycleOutcome};
