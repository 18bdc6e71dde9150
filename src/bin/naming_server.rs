//! `naming-server` — runs the Naming Server (spec §6 CLI).

use clap::Parser;

use dfs::config::{self, NamingServerFileConfig};
use dfs::naming::{self, NamingServerConfig};

#[derive(Debug, Parser)]
#[command(name = "naming-server", about = "Directory namespace and storage-server router")]
struct Args {
    /// Port to listen on.
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Entry capacity of the GET_LOCATION lookup cache.
    #[arg(short = 'c', long)]
    cache_size: Option<usize>,

    /// Optional TOML file supplying defaults for unset flags.
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let file_config = match &args.config {
        Some(path) => match config::load_toml::<NamingServerFileConfig>(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                eprintln!("failed to load config {path:?}: {err}");
                return std::process::ExitCode::FAILURE;
            }
        },
        None => NamingServerFileConfig::default(),
    };

    let port = match args.port.or(file_config.port) {
        Some(port) => port,
        None => {
            eprintln!("-p/--port is required");
            return std::process::ExitCode::FAILURE;
        }
    };

    const DEFAULT_CACHE_SIZE: usize = 1024;
    let cache_size = args.cache_size.or(file_config.cache_size).unwrap_or(DEFAULT_CACHE_SIZE);

    let config = NamingServerConfig { bind_addr: ("0.0.0.0".to_string(), port), cache_size };
    if let Err(err) = naming::run(config).await {
        tracing::error!(%err, "naming server exited");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}
