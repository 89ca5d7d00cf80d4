use crate::error::Result;
use crate::host::Host;
use crate::output::{print_success, OutputFormat};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct TypeListResponse<'a> {
    resources: Vec<&'a str>,
    functions: Vec<&'a str>,
}

/// Prints the full provider schema, or only type names with `--types`
pub async fn handle(types_only: bool, format: OutputFormat, host: &Host) -> Result<()> {
    if types_only {
        let provider = host.provider();
        print_success(
            format,
            &TypeListResponse {
                resources: provider.resource_types(),
                functions: provider.function_names(),
            },
        );
    } else {
        print_success(format, &host.schema());
    }
    Ok(())
}
