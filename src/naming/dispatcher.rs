//! NS Request Dispatcher (C4): one task per accepted connection, reading
//! frames in a loop and dispatching by message type (spec §4.4).

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::directory::{FileMetadata, SharedDirectoryTree};
use crate::error::{DfsError, Result};
use crate::health::HealthRegistry;
use crate::naming::cache::LookupCache;
use crate::naming::router::Router;
use crate::transport::{primitive, read_header, read_payload, write_error, write_frame, MessageType};

const PATH_FIELD_LEN: usize = 256;
const INET_ADDRSTRLEN: usize = 16;

pub struct NamingDispatcher {
    tree: SharedDirectoryTree,
    registry: Arc<HealthRegistry>,
    router: Arc<Router>,
    cache: LookupCache,
}

impl NamingDispatcher {
    pub fn new(
        tree: SharedDirectoryTree,
        registry: Arc<HealthRegistry>,
        router: Arc<Router>,
        cache: LookupCache,
    ) -> Arc<Self> {
        Arc::new(Self { tree, registry, router, cache })
    }

    /// Accepts connections forever; each gets its own long-lived task that
    /// reads and dispatches frames until EOF or a transport error.
    pub async fn serve(self: Arc<Self>, listener: TcpListener) -> std::io::Result<()> {
        loop {
            let (socket, peer_addr) = listener.accept().await?;
            socket.set_nodelay(true)?;
            let dispatcher = self.clone();
            tokio::spawn(async move {
                dispatcher.handle_connection(socket, peer_addr).await;
            });
        }
    }

    async fn handle_connection(&self, mut socket: TcpStream, peer_addr: SocketAddr) {
        loop {
            let header = match read_header(&mut socket).await {
                Ok(h) => h,
                Err(err) => {
                    debug!(%peer_addr, %err, "naming connection closed");
                    return;
                }
            };

            let result = match header.msg_type {
                MessageType::GetLocation => self.handle_get_location(&mut socket, &header).await,
                MessageType::SsRegister => {
                    self.handle_ss_register(&mut socket, &header, peer_addr).await
                }
                MessageType::Heartbeat => self.handle_heartbeat(&mut socket, &header).await,
                MessageType::Create => self.handle_create(&mut socket, &header).await,
                MessageType::Read | MessageType::Write => {
                    self.handle_forwarded(&mut socket, &header).await
                }
                other => Err(DfsError::Protocol(format!("unexpected message type {other:?} at NS"))),
            };

            if let Err(err) = result {
                warn!(%peer_addr, %err, "naming request failed");
                if write_error(&mut socket, header.request_id, err.code()).await.is_err() {
                    return;
                }
                if matches!(err, DfsError::Network(_)) {
                    return;
                }
            }
        }
    }

    async fn handle_get_location(&self, socket: &mut TcpStream, header: &crate::transport::FrameHeader) -> Result<()> {
        let payload = read_payload(socket, header).await?;
        let path = primitive::read_fixed_str(&payload[..payload.len().min(PATH_FIELD_LEN)]);

        let metadata = match self.cache.get(&path) {
            Some(metadata) => metadata,
            None => {
                let metadata = self.tree.get_metadata(&path).await.map_err(|err| match err {
                    // A GET_LOCATION miss is a namespace-level miss (spec
                    // §7: "FILE_NOT_FOUND: namespace-level miss distinct
                    // from directory NOT_FOUND"), not the directory tree's
                    // own NOT_FOUND.
                    DfsError::NotFound(_) => DfsError::FileNotFound(path.clone()),
                    other => other,
                })?;
                self.cache.put(&path, metadata.clone());
                metadata
            }
        };
        let response = encode_location(&metadata)?;
        write_frame(socket, header.request_id, MessageType::Location, &response).await
    }

    async fn handle_ss_register(
        &self,
        socket: &mut TcpStream,
        header: &crate::transport::FrameHeader,
        peer_addr: SocketAddr,
    ) -> Result<()> {
        let payload = read_payload(socket, header).await?;
        let (port, paths) = parse_ss_register(&payload)?;
        let host = peer_addr.ip().to_string();
        for path in paths {
            self.tree
                .register_file(&path, FileMetadata { ss_host: host.clone(), ss_port: port, size: 0, permissions: 0o644 })
                .await?;
            // Last-writer-wins (spec §4.2): drop any cached location so a
            // later GET_LOCATION re-reads the fresh owner from the tree.
            self.cache.invalidate(&path);
        }
        info!(%host, port, "storage server registered");
        write_frame(socket, header.request_id, MessageType::SsRegisterAck, &[]).await
    }

    async fn handle_heartbeat(&self, socket: &mut TcpStream, header: &crate::transport::FrameHeader) -> Result<()> {
        let payload = read_payload(socket, header).await?;
        let (host, port, load) = parse_heartbeat(&payload)?;
        self.registry.receive_heartbeat(&host, port, load).await;
        Ok(())
    }

    async fn handle_create(&self, socket: &mut TcpStream, header: &crate::transport::FrameHeader) -> Result<()> {
        let payload = read_payload(socket, header).await?;
        let path = primitive::read_fixed_str(&payload[..payload.len().min(PATH_FIELD_LEN)]);
        self.tree.create(&path).await?;
        write_frame(socket, header.request_id, MessageType::Create, &[]).await
    }

    /// Forwards `READ`/`WRITE` to the lowest-loaded active storage server
    /// and relays its reply back verbatim (spec §4.4's router-mediated
    /// path; the client library normally resolves and connects directly
    /// instead, per §4.5).
    async fn handle_forwarded(&self, socket: &mut TcpStream, header: &crate::transport::FrameHeader) -> Result<()> {
        let payload = read_payload(socket, header).await?;
        let conn = self.router.acquire().await?;
        let (response_header, response_payload) =
            conn.relay(header.request_id, header.msg_type, &payload).await?;
        write_frame(socket, header.request_id, response_header.msg_type, &response_payload).await
    }
}

fn encode_location(metadata: &FileMetadata) -> Result<[u8; INET_ADDRSTRLEN + 2]> {
    if metadata.ss_host.len() >= INET_ADDRSTRLEN {
        return Err(DfsError::Internal(format!("ss host too long: {}", metadata.ss_host)));
    }
    let mut response = [0u8; INET_ADDRSTRLEN + 2];
    primitive::write_fixed_str(&mut response[0..INET_ADDRSTRLEN], &metadata.ss_host);
    primitive::write_u16(&mut response[INET_ADDRSTRLEN..INET_ADDRSTRLEN + 2], metadata.ss_port);
    Ok(response)
}

/// `SSRegisterMessage`: `port:u16, num_paths:u32`, then `num_paths` records
/// of `{len:u32, bytes[len] including NUL}`.
fn parse_ss_register(payload: &[u8]) -> Result<(u16, Vec<String>)> {
    if payload.len() < 6 {
        return Err(DfsError::Protocol("SS_REGISTER payload too short".into()));
    }
    let port = primitive::read_u16(&payload[0..2]);
    let num_paths = primitive::read_u32(&payload[2..6]) as usize;
    let mut offset = 6;
    let mut paths = Vec::with_capacity(num_paths);
    for _ in 0..num_paths {
        if payload.len() < offset + 4 {
            return Err(DfsError::Protocol("SS_REGISTER path record truncated".into()));
        }
        let len = primitive::read_u32(&payload[offset..offset + 4]) as usize;
        offset += 4;
        if payload.len() < offset + len {
            return Err(DfsError::Protocol("SS_REGISTER path bytes truncated".into()));
        }
        let raw = &payload[offset..offset + len];
        paths.push(primitive::read_fixed_str(raw));
        offset += len;
    }
    Ok((port, paths))
}

/// `HeartbeatMessage`: `host[256], port[32], load:i32`.
fn parse_heartbeat(payload: &[u8]) -> Result<(String, u16, i32)> {
    if payload.len() < 256 + 32 + 4 {
        return Err(DfsError::Protocol("HEARTBEAT payload too short".into()));
    }
    let host = primitive::read_fixed_str(&payload[0..256]);
    let port_str = primitive::read_fixed_str(&payload[256..288]);
    let port: u16 = port_str
        .parse()
        .map_err(|_| DfsError::Protocol(format!("invalid heartbeat port {port_str:?}")))?;
    let load = primitive::read_i32(&payload[288..292]);
    Ok((host, port, load))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_ss_register_payload() {
        let mut payload = vec![0u8; 6];
        primitive::write_u16(&mut payload[0..2], 9100);
        primitive::write_u32(&mut payload[2..6], 2);
        for name in ["a.txt", "b.txt"] {
            let mut bytes = name.as_bytes().to_vec();
            bytes.push(0);
            let mut len_buf = [0u8; 4];
            primitive::write_u32(&mut len_buf, bytes.len() as u32);
            payload.extend_from_slice(&len_buf);
            payload.extend_from_slice(&bytes);
        }
        let (port, paths) = parse_ss_register(&payload).unwrap();
        assert_eq!(port, 9100);
        assert_eq!(paths, vec!["a.txt".to_string(), "b.txt".to_string()]);
    }

    #[test]
    fn rejects_truncated_ss_register() {
        let payload = vec![0u8; 3];
        assert!(parse_ss_register(&payload).is_err());
    }

    #[test]
    fn round_trips_heartbeat_payload() {
        let mut payload = vec![0u8; 256 + 32 + 4];
        primitive::write_fixed_str(&mut payload[0..256], "127.0.0.1");
        primitive::write_fixed_str(&mut payload[256..288], "9100");
        primitive::write_i32(&mut payload[288..292], 3);
        let (host, port, load) = parse_heartbeat(&payload).unwrap();
        assert_eq!(host, "127.0.0.1");
        assert_eq!(port, 9100);
        assert_eq!(load, 3);
    }

    #[test]
    fn location_response_rejects_oversized_host() {
        let metadata = FileMetadata {
            ss_host: "a-hostname-far-too-long-for-the-field".into(),
            ss_port: 1,
            size: 0,
            permissions: 0,
        };
        assert!(encode_location(&metadata).is_err());
    }
}
