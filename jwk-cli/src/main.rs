use clap::{Parser, Subcommand};
use jwk_cli::commands;
use jwk_cli::host::Host;
use jwk_cli::output::{self, OutputFormat};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "jwk",
    about = "Manage JSON Web Keys declaratively against a local state file",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    debug: bool,

    /// State file [default: ~/.jwk/state.json]
    #[arg(long, global = true, env = "JWK_STATE")]
    state: Option<PathBuf>,

    /// Provider block as a JSON file, e.g. {"strict_keysets": true}
    #[arg(long, global = true, env = "JWK_PROVIDER_CONFIG")]
    provider_config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "json")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the provider, resource and function schemas
    Schema {
        /// Only list resource types and function names
        #[arg(long)]
        types: bool,
    },
    /// Validate a resource configuration without generating keys
    Validate {
        /// Resource type, e.g. jwk_rsa_key
        resource_type: String,
        /// Configuration attributes as a JSON file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Create a resource instance, or update it if state already has one
    Apply {
        /// Resource type, e.g. jwk_rsa_key
        resource_type: String,
        /// Instance name
        name: String,
        /// Configuration attributes as a JSON file
        #[arg(short, long)]
        config: PathBuf,
        /// Print sensitive attributes in clear
        #[arg(long)]
        reveal: bool,
    },
    /// Read a resource instance from state
    Show {
        resource_type: String,
        name: String,
        /// Print sensitive attributes in clear
        #[arg(long)]
        reveal: bool,
    },
    /// Destroy a resource instance and remove it from state
    Destroy { resource_type: String, name: String },
    /// Import an existing JWK (or JWK Set for jwk_keyset)
    Import {
        resource_type: String,
        name: String,
        /// JWK JSON, or @path to read it from a file
        #[arg(long)]
        id: String,
        /// Print sensitive attributes in clear
        #[arg(long)]
        reveal: bool,
    },
    /// Inspect recorded state
    State {
        #[command(subcommand)]
        cmd: commands::state::StateCommands,
    },
    /// Call a provider function (public_key, to_pem)
    Call {
        function: String,
        /// Arguments, each inline or as @path
        args: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let format = cli.format.parse::<OutputFormat>().unwrap_or_else(|_| {
        eprintln!("Warning: unknown format '{}', using json", cli.format);
        OutputFormat::Json
    });

    // Initialize logging to stderr
    let level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("jwk_cli={},jwk_provider={}", level, level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .init();

    let host = match Host::new(cli.state.clone(), cli.provider_config.as_deref()) {
        Ok(host) => host,
        Err(e) => {
            output::print_error(format, &e);
            std::process::exit(1);
        }
    };

    info!("JWK CLI using state at {}", host.state_path().display());

    let result = match cli.command {
        Commands::Schema { types } => commands::schema::handle(types, format, &host).await,
        Commands::Validate {
            ref resource_type,
            ref config,
        } => commands::resource::handle_validate(resource_type, config, format, &host).await,
        Commands::Apply {
            ref resource_type,
            ref name,
            ref config,
            reveal,
        } => {
            commands::resource::handle_apply(resource_type, name, config, reveal, format, &host)
                .await
        }
        Commands::Show {
            ref resource_type,
            ref name,
            reveal,
        } => commands::resource::handle_show(resource_type, name, reveal, format, &host).await,
        Commands::Destroy {
            ref resource_type,
            ref name,
        } => commands::resource::handle_destroy(resource_type, name, format, &host).await,
        Commands::Import {
            ref resource_type,
            ref name,
            ref id,
            reveal,
        } => {
            commands::resource::handle_import(resource_type, name, id, reveal, format, &host)
                .await
        }
        Commands::State { ref cmd } => commands::state::handle(cmd, format, &host).await,
        Commands::Call {
            ref function,
            ref args,
        } => commands::function::handle_call(function, args, format, &host).await,
    };

    if let Err(e) = result {
        output::print_error(format, &e);
        std::process::exit(1);
    }
}
