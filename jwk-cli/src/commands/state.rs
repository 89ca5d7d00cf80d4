use crate::error::Result;
use crate::host::Host;
use crate::output::{print_success, OutputFormat};
use clap::Subcommand;
use serde::Serialize;

#[derive(Subcommand, Debug)]
pub enum StateCommands {
    /// List resource instances recorded in state
    List,
    /// Print where state is stored and its serial
    Info,
}

#[derive(Debug, Serialize)]
struct InstanceInfo {
    address: String,
    #[serde(rename = "type")]
    resource_type: String,
    name: String,
    created_at: String,
    updated_at: String,
}

#[derive(Debug, Serialize)]
struct InstanceListResponse {
    resources: Vec<InstanceInfo>,
    total: usize,
}

#[derive(Debug, Serialize)]
struct StateInfoResponse {
    path: String,
    exists: bool,
    serial: u64,
    resources: usize,
}

pub async fn handle(cmd: &StateCommands, format: OutputFormat, host: &Host) -> Result<()> {
    let state = host.load_state()?;
    match cmd {
        StateCommands::List => {
            let resources: Vec<InstanceInfo> = state
                .list()
                .map(|r| InstanceInfo {
                    address: r.address(),
                    resource_type: r.resource_type.clone(),
                    name: r.name.clone(),
                    created_at: r.created_at.to_rfc3339(),
                    updated_at: r.updated_at.to_rfc3339(),
                })
                .collect();
            let total = resources.len();
            print_success(format, &InstanceListResponse { resources, total });
        }
        StateCommands::Info => {
            print_success(
                format,
                &StateInfoResponse {
                    path: host.state_path().display().to_string(),
                    exists: host.state_path().exists(),
                    serial: state.serial,
                    resources: state.resources.len(),
                },
            );
        }
    }
    Ok(())
}
