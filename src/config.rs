//! Optional TOML configuration layer shared by all three binaries.
//!
//! Each binary's `clap` flags are the source of truth (spec §6); an
//! optional `--config path.toml` file supplies defaults that flags
//! explicitly passed on the command line override.

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::{DfsError, Result};

/// File-backed defaults for `naming-server`.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct NamingServerFileConfig {
    pub port: Option<u16>,
    pub cache_size: Option<usize>,
}

/// File-backed defaults for `storage-server`.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct StorageServerFileConfig {
    pub port: Option<u16>,
    pub ns_host: Option<String>,
    pub ns_port: Option<u16>,
    pub data_dir: Option<String>,
    pub backup: Option<Vec<String>>,
}

/// Loads and parses a TOML file at `path` into `T`.
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)?;
    toml::from_str(&text).map_err(|err| DfsError::InvalidArgument(format!("invalid config {path:?}: {err}")))
}

/// Parses a `HOST:PORT` string, as used by `--backup` and `--ns-host`
/// pairings (spec §6's repeatable `-b/--backup HOST:PORT`).
pub fn parse_host_port(value: &str) -> Result<(String, u16)> {
    let (host, port) = value
        .rsplit_once(':')
        .ok_or_else(|| DfsError::InvalidArgument(format!("expected HOST:PORT, got {value:?}")))?;
    let port: u16 = port
        .parse()
        .map_err(|_| DfsError::InvalidArgument(format!("invalid port in {value:?}")))?;
    Ok((host.to_string(), port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_port() {
        assert_eq!(parse_host_port("127.0.0.1:9000").unwrap(), ("127.0.0.1".to_string(), 9000));
    }

    #[test]
    fn rejects_missing_port() {
        assert!(parse_host_port("127.0.0.1").is_err());
    }

    #[test]
    fn loads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ns.toml");
        std::fs::write(&path, "port = 9000\ncache_size = 2048\n").unwrap();
        let config: NamingServerFileConfig = load_toml(&path).unwrap();
        assert_eq!(config.port, Some(9000));
        assert_eq!(config.cache_size, Some(2048));
    }
}
