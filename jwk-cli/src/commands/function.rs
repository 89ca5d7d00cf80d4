use crate::error::Result;
use crate::host::{read_argument, Host};
use crate::output::{print_success, OutputFormat};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CallResponse {
    function: String,
    result: String,
}

/// Calls a provider function; `@path` arguments are read from files
pub async fn handle_call(
    function: &str,
    arguments: &[String],
    format: OutputFormat,
    host: &Host,
) -> Result<()> {
    let arguments = arguments
        .iter()
        .map(|a| read_argument(a).map(|s| s.trim().to_string()))
        .collect::<Result<Vec<_>>>()?;

    let result = host.call(function, &arguments).await?;
    print_success(
        format,
        &CallResponse {
            function: function.to_string(),
            result,
        },
    );
    Ok(())
}
