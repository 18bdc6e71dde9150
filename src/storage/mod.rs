//! Storage Server role: local byte storage, replication fan-out, heartbeat
//! reporting, and request dispatch (spec §4.5–§4.7).

pub mod backend;
pub mod dispatcher;
pub mod heartbeat;
pub mod replication;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use backend::LocalFsBackend;
use dispatcher::StorageDispatcher;
use heartbeat::LoadCounter;
use replication::ReplicationFanout;

use crate::error::{DfsError, Result};
use crate::transport::{primitive, read_header, read_payload, write_frame, MessageType};

/// Everything a storage server needs to run: where to listen, where its
/// bytes live on disk, how to reach the naming server, and who its
/// replication secondaries are.
pub struct StorageServerConfig {
    pub bind_addr: (String, u16),
    pub data_dir: PathBuf,
    pub naming_server: (String, u16),
    pub advertised_addr: (String, u16),
    pub backup_addrs: Vec<(String, u16)>,
}

/// Starts a storage server: binds its listener, registers its existing
/// files with the naming server, spawns the heartbeat and replication
/// background tasks, then serves connections forever.
pub async fn run(config: StorageServerConfig) -> std::io::Result<()> {
    let backend: Arc<dyn backend::Backend> = Arc::new(LocalFsBackend::new(config.data_dir.clone()));
    let fanout = ReplicationFanout::spawn(config.backup_addrs);
    let load = LoadCounter::new();

    let (ns_host, ns_port) = config.naming_server;
    let (advertised_host, advertised_port) = config.advertised_addr;

    if let Err(err) = register_with_naming_server(&ns_host, ns_port, advertised_port, &config.data_dir).await {
        warn!(%ns_host, ns_port, %err, "initial SS_REGISTER failed; heartbeat will keep retrying liveness");
    }
    heartbeat::spawn(ns_host, ns_port, advertised_host, advertised_port, load.clone());

    let dispatcher = StorageDispatcher::new(backend, fanout, load);
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = ?listener.local_addr()?, "storage server listening");
    dispatcher.serve(listener).await
}

/// Recursively lists `data_dir` and sends an `SS_REGISTER` frame advertising
/// every file found, so a freshly started naming server can route to files
/// that already exist on disk (spec §8 scenario S1).
async fn register_with_naming_server(ns_host: &str, ns_port: u16, port: u16, data_dir: &Path) -> Result<()> {
    let paths = list_files(data_dir).await?;
    let mut payload = vec![0u8; 6];
    primitive::write_u16(&mut payload[0..2], port);
    primitive::write_u32(&mut payload[2..6], paths.len() as u32);
    for path in &paths {
        let mut bytes = path.as_bytes().to_vec();
        bytes.push(0);
        let mut len_buf = [0u8; 4];
        primitive::write_u32(&mut len_buf, bytes.len() as u32);
        payload.extend_from_slice(&len_buf);
        payload.extend_from_slice(&bytes);
    }

    let mut stream = TcpStream::connect((ns_host, ns_port)).await?;
    write_frame(&mut stream, 0, MessageType::SsRegister, &payload).await?;
    let header = read_header(&mut stream).await?;
    if header.msg_type != MessageType::SsRegisterAck {
        let response = read_payload(&mut stream, &header).await?;
        return Err(DfsError::Protocol(format!("unexpected SS_REGISTER reply {:?}: {response:?}", header.msg_type)));
    }
    info!(ns_host, ns_port, files = paths.len(), "registered with naming server");
    Ok(())
}

async fn list_files(root: &Path) -> Result<Vec<String>> {
    let mut paths = Vec::new();
    let mut stack = vec![PathBuf::new()];
    while let Some(relative) = stack.pop() {
        let absolute = root.join(&relative);
        let mut entries = match tokio::fs::read_dir(&absolute).await {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        while let Some(entry) = entries.next_entry().await? {
            let child_relative = relative.join(entry.file_name());
            if entry.file_type().await?.is_dir() {
                stack.push(child_relative);
            } else {
                paths.push(child_relative.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    Ok(paths)
}
