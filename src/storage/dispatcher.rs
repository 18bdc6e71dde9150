//! SS Request Dispatcher (C6): serves reads, writes, deletes, stat, stream.
//! Per-request connections (spec §4.6): accept, read one frame, dispatch,
//! reply, close.

use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, warn};

use crate::error::{DfsError, Result};
use crate::storage::backend::Backend;
use crate::storage::heartbeat::LoadCounter;
use crate::storage::replication::ReplicationFanout;
use crate::transport::{
    primitive, read_header, read_payload, write_error, write_frame, FrameHeader, MessageType,
};

const PATH_FIELD_LEN: usize = 256;
pub const STREAM_CHUNK: usize = 8 * 1024;

pub struct StorageDispatcher {
    backend: Arc<dyn Backend>,
    fanout: Arc<ReplicationFanout>,
    load: LoadCounter,
}

impl StorageDispatcher {
    pub fn new(backend: Arc<dyn Backend>, fanout: Arc<ReplicationFanout>, load: LoadCounter) -> Arc<Self> {
        Arc::new(Self { backend, fanout, load })
    }

    /// Accepts connections forever, spawning one handler task per connection.
    pub async fn serve(self: Arc<Self>, listener: TcpListener) -> std::io::Result<()> {
        loop {
            let (socket, _) = listener.accept().await?;
            socket.set_nodelay(true)?;
            let dispatcher = self.clone();
            tokio::spawn(async move {
                if let Err(err) = dispatcher.handle_connection(socket).await {
                    debug!(%err, "storage connection ended");
                }
            });
        }
    }

    async fn handle_connection(&self, mut socket: TcpStream) -> Result<()> {
        let header = match read_header(&mut socket).await {
            Ok(h) => h,
            Err(_) => return Ok(()), // peer closed before sending anything
        };
        let _load_guard = self.load.enter();

        let result = match header.msg_type {
            MessageType::Read => self.handle_read(&mut socket, &header).await,
            MessageType::Write => self.handle_write(&mut socket, &header).await,
            MessageType::Delete => self.handle_delete(&mut socket, &header).await,
            MessageType::ReplicateWrite => self.handle_replicate_write(&mut socket, &header).await,
            MessageType::ReplicateDelete => self.handle_replicate_delete(&mut socket, &header).await,
            MessageType::Stream => self.handle_stream(&mut socket, &header).await,
            MessageType::GetFileInfo => self.handle_get_file_info(&mut socket, &header).await,
            other => Err(DfsError::Protocol(format!("unexpected message type {other:?} at SS"))),
        };

        if let Err(err) = result {
            let msg_type = header.msg_type;
            warn!(%err, ?msg_type, "storage request failed");
            let _ = write_error(&mut socket, header.request_id, err.code()).await;
        }
        let _ = socket.shutdown().await;
        Ok(())
    }

    async fn handle_read(&self, socket: &mut TcpStream, header: &FrameHeader) -> Result<()> {
        let payload = read_payload(socket, header).await?;
        let (path, offset, length) = parse_read_request(&payload)?;
        let data = self.backend.read(&path, offset, length).await?;
        write_frame(socket, header.request_id, MessageType::Read, &data).await
    }

    async fn handle_write(&self, socket: &mut TcpStream, header: &FrameHeader) -> Result<()> {
        let payload = read_payload(socket, header).await?;
        let (path, offset, data) = parse_write_request(&payload)?;
        self.backend.write(&path, offset, &data).await?;
        self.fanout.enqueue_write(&path, offset, &data);
        write_frame(socket, header.request_id, MessageType::Write, &[]).await
    }

    async fn handle_delete(&self, socket: &mut TcpStream, header: &FrameHeader) -> Result<()> {
        let payload = read_payload(socket, header).await?;
        let path = parse_delete_request(&payload)?;
        self.backend.delete(&path).await?;
        self.fanout.enqueue_delete(&path);
        write_frame(socket, header.request_id, MessageType::Delete, &[]).await
    }

    /// Same as write, but never re-replicates and never replies (spec §4.6).
    async fn handle_replicate_write(&self, socket: &mut TcpStream, header: &FrameHeader) -> Result<()> {
        let payload = read_payload(socket, header).await?;
        let (path, offset, data) = parse_write_request(&payload)?;
        self.backend.write(&path, offset, &data).await?;
        Ok(())
    }

    async fn handle_replicate_delete(&self, socket: &mut TcpStream, header: &FrameHeader) -> Result<()> {
        let payload = read_payload(socket, header).await?;
        let path = parse_delete_request(&payload)?;
        self.backend.delete(&path).await?;
        Ok(())
    }

    async fn handle_stream(&self, socket: &mut TcpStream, header: &FrameHeader) -> Result<()> {
        let payload = read_payload(socket, header).await?;
        let (path, start_position, _chunk_size, metadata_only) = parse_stream_request(&payload)?;
        write_frame(socket, header.request_id, MessageType::StreamMetadata, &[]).await?;
        if metadata_only {
            return Ok(());
        }
        let mut file = self.backend.open_for_stream(&path, start_position).await?;
        let mut buf = vec![0u8; STREAM_CHUNK];
        use tokio::io::AsyncReadExt;
        loop {
            let n = file.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            socket.write_all(&buf[..n]).await?;
        }
        Ok(())
    }

    async fn handle_get_file_info(&self, socket: &mut TcpStream, header: &FrameHeader) -> Result<()> {
        let payload = read_payload(socket, header).await?;
        let path = primitive::read_fixed_str(&payload[..payload.len().min(PATH_FIELD_LEN)]);
        let info = self.backend.stat(&path).await?;
        let mut response = [0u8; 12];
        primitive::write_u64(&mut response[0..8], info.file_size);
        primitive::write_u32(&mut response[8..12], info.permissions);
        write_frame(socket, header.request_id, MessageType::GetFileInfoResponse, &response).await
    }
}

fn require_len(payload: &[u8], min: usize) -> Result<()> {
    if payload.len() < min {
        return Err(DfsError::Protocol(format!("payload too short: {} < {min}", payload.len())));
    }
    Ok(())
}

/// `ReadRequest`: `path[256], offset:u64, length:u32`.
fn parse_read_request(payload: &[u8]) -> Result<(String, u64, u32)> {
    require_len(payload, PATH_FIELD_LEN + 12)?;
    let path = primitive::read_fixed_str(&payload[0..PATH_FIELD_LEN]);
    let offset = primitive::read_u64(&payload[PATH_FIELD_LEN..PATH_FIELD_LEN + 8]);
    let length = primitive::read_u32(&payload[PATH_FIELD_LEN + 8..PATH_FIELD_LEN + 12]);
    Ok((path, offset, length))
}

/// `WriteRequest`: `path[256], offset:u64, length:u32` + `length` bytes.
fn parse_write_request(payload: &[u8]) -> Result<(String, u64, Vec<u8>)> {
    require_len(payload, PATH_FIELD_LEN + 12)?;
    let path = primitive::read_fixed_str(&payload[0..PATH_FIELD_LEN]);
    let offset = primitive::read_u64(&payload[PATH_FIELD_LEN..PATH_FIELD_LEN + 8]);
    let length = primitive::read_u32(&payload[PATH_FIELD_LEN + 8..PATH_FIELD_LEN + 12]) as usize;
    require_len(payload, PATH_FIELD_LEN + 12 + length)?;
    let data = payload[PATH_FIELD_LEN + 12..PATH_FIELD_LEN + 12 + length].to_vec();
    Ok((path, offset, data))
}

/// `DeleteRequest`: `path[256]`.
fn parse_delete_request(payload: &[u8]) -> Result<String> {
    require_len(payload, PATH_FIELD_LEN)?;
    Ok(primitive::read_fixed_str(&payload[0..PATH_FIELD_LEN]))
}

/// `StreamRequest`: `path[256], start_position:u64, chunk_size:u32, metadata_only:u8`.
fn parse_stream_request(payload: &[u8]) -> Result<(String, u64, u32, bool)> {
    require_len(payload, PATH_FIELD_LEN + 13)?;
    let path = primitive::read_fixed_str(&payload[0..PATH_FIELD_LEN]);
    let start_position = primitive::read_u64(&payload[PATH_FIELD_LEN..PATH_FIELD_LEN + 8]);
    let chunk_size = primitive::read_u32(&payload[PATH_FIELD_LEN + 8..PATH_FIELD_LEN + 12]);
    let metadata_only = payload[PATH_FIELD_LEN + 12] != 0;
    Ok((path, start_position, chunk_size, metadata_only))
}
