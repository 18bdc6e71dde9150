//! `storage-server` — runs a Storage Server (spec §6 CLI).

use clap::Parser;

use dfs::config::{self, parse_host_port, StorageServerFileConfig};
use dfs::storage::{self, StorageServerConfig};

#[derive(Debug, Parser)]
#[command(name = "storage-server", about = "Holds file bytes and serves data-plane operations")]
struct Args {
    /// Port to listen on for client/NS traffic.
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Naming server host to register with and heartbeat.
    #[arg(short = 'n', long)]
    ns_host: Option<String>,

    /// Naming server port.
    #[arg(short = 'N', long)]
    ns_port: Option<u16>,

    /// Directory on disk holding this server's files.
    #[arg(short = 'd', long)]
    data_dir: Option<String>,

    /// Replication secondary, `HOST:PORT`. Repeatable, up to 10 (spec §6).
    #[arg(short = 'b', long = "backup")]
    backup: Vec<String>,

    /// Optional TOML file supplying defaults for unset flags.
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

const MAX_BACKUPS: usize = 10;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let file_config = match &args.config {
        Some(path) => match config::load_toml::<StorageServerFileConfig>(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                eprintln!("failed to load config {path:?}: {err}");
                return std::process::ExitCode::FAILURE;
            }
        },
        None => StorageServerFileConfig::default(),
    };

    let port = args.port.or(file_config.port);
    let ns_host = args.ns_host.or(file_config.ns_host);
    let ns_port = args.ns_port.or(file_config.ns_port);
    let data_dir = args.data_dir.or(file_config.data_dir);
    let backup_strings = if args.backup.is_empty() { file_config.backup.unwrap_or_default() } else { args.backup };

    let (Some(port), Some(ns_host), Some(ns_port), Some(data_dir)) = (port, ns_host, ns_port, data_dir) else {
        eprintln!("-p/--port, -n/--ns-host, -N/--ns-port, and -d/--data-dir are all required");
        return std::process::ExitCode::FAILURE;
    };

    if backup_strings.len() > MAX_BACKUPS {
        eprintln!("at most {MAX_BACKUPS} --backup entries are supported");
        return std::process::ExitCode::FAILURE;
    }
    let mut backup_addrs = Vec::with_capacity(backup_strings.len());
    for raw in &backup_strings {
        match parse_host_port(raw) {
            Ok(addr) => backup_addrs.push(addr),
            Err(err) => {
                eprintln!("invalid --backup {raw:?}: {err}");
                return std::process::ExitCode::FAILURE;
            }
        }
    }

    let config = StorageServerConfig {
        bind_addr: ("0.0.0.0".to_string(), port),
        data_dir: std::path::PathBuf::from(data_dir),
        naming_server: (ns_host, ns_port),
        advertised_addr: ("127.0.0.1".to_string(), port),
        backup_addrs,
    };
    if let Err(err) = storage::run(config).await {
        tracing::error!(%err, "storage server exited");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}
