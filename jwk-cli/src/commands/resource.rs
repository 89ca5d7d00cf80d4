use crate::error::Result;
use crate::host::{read_argument, read_json_file, Host, LifecycleOutcome};
use crate::output::{print_success_with, OutputFormat};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct ValidateResponse<'a> {
    #[serde(rename = "type")]
    resource_type: &'a str,
    valid: bool,
}

/// Checks a configuration file against a resource type
pub async fn handle_validate(
    resource_type: &str,
    config: &Path,
    format: OutputFormat,
    host: &Host,
) -> Result<()> {
    let config = read_json_file(config)?;
    let diags = host.validate(resource_type, &config).await?;
    print_success_with(
        format,
        &ValidateResponse {
            resource_type,
            valid: true,
        },
        &diags,
    );
    Ok(())
}

/// Creates or updates an instance from a configuration file
pub async fn handle_apply(
    resource_type: &str,
    name: &str,
    config: &Path,
    reveal: bool,
    format: OutputFormat,
    host: &Host,
) -> Result<()> {
    let config = read_json_file(config)?;
    let outcome = host.apply(resource_type, name, &config).await?;
    print_outcome(resource_type, outcome, reveal, format, host)
}

/// Reads an instance back from state
pub async fn handle_show(
    resource_type: &str,
    name: &str,
    reveal: bool,
    format: OutputFormat,
    host: &Host,
) -> Result<()> {
    let outcome = host.show(resource_type, name).await?;
    print_outcome(resource_type, outcome, reveal, format, host)
}

/// Removes an instance from state
pub async fn handle_destroy(
    resource_type: &str,
    name: &str,
    format: OutputFormat,
    host: &Host,
) -> Result<()> {
    let outcome = host.destroy(resource_type, name).await?;
    print_outcome(resource_type, outcome, false, format, host)
}

/// Imports a JWK (or a JWK Set for `jwk_keyset`) given inline or as `@path`
pub async fn handle_import(
    resource_type: &str,
    name: &str,
    id: &str,
    reveal: bool,
    format: OutputFormat,
    host: &Host,
) -> Result<()> {
    let id = read_argument(id)?;
    let outcome = host.import(resource_type, name, id.trim()).await?;
    print_outcome(resource_type, outcome, reveal, format, host)
}

fn print_outcome(
    resource_type: &str,
    mut outcome: LifecycleOutcome,
    reveal: bool,
    format: OutputFormat,
    host: &Host,
) -> Result<()> {
    if !reveal {
        outcome.attributes = host.redact(resource_type, &outcome.attributes)?;
    }
    let diags = std::mem::take(&mut outcome.diagnostics);
    print_success_with(format, &outcome, &diags);
    Ok(())
}
