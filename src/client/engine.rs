//! Client Operation Engine (C9): resolves a path to its owning storage
//! server, then talks to it directly (spec §4.5's resolution protocol).

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use crate::client::cache::LruCache;
use crate::client::worker_pool::WorkerPool;
use crate::error::{DfsError, ErrorCode, Result};
use crate::storage::backend::FileInfo;
use crate::transport::{primitive, read_header, read_payload, write_frame, FrameHeader, MessageType};

const PATH_FIELD_LEN: usize = 256;
const INET_ADDRSTRLEN: usize = 16;
const STREAM_CHUNK: usize = 8 * 1024;
const ASYNC_WORKERS: usize = 4;
const ASYNC_QUEUE_CAPACITY: usize = 256;

/// The client library's entry point: one engine per naming-server session,
/// holding the NS connection, the read cache, and the `*_async` worker pool.
pub struct ClientEngine {
    ns_host: String,
    ns_port: u16,
    ns_conn: Mutex<Option<TcpStream>>,
    cache: LruCache,
    next_request_id: AtomicU32,
    workers: WorkerPool,
}

impl ClientEngine {
    pub fn new(ns_host: impl Into<String>, ns_port: u16, cache_capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            ns_host: ns_host.into(),
            ns_port,
            ns_conn: Mutex::new(None),
            cache: LruCache::new(cache_capacity),
            next_request_id: AtomicU32::new(1),
            workers: WorkerPool::new(ASYNC_WORKERS, ASYNC_QUEUE_CAPACITY),
        })
    }

    fn next_id(&self) -> u32 {
        self.next_request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Sends one frame on the held NS connection (lazily establishing it)
    /// and returns its reply. Drops the connection on any I/O error so the
    /// next call reconnects.
    async fn ns_request(&self, msg_type: MessageType, payload: &[u8]) -> Result<(FrameHeader, Vec<u8>)> {
        let request_id = self.next_id();
        let mut guard = self.ns_conn.lock().await;
        if guard.is_none() {
            *guard = Some(TcpStream::connect((self.ns_host.as_str(), self.ns_port)).await?);
        }
        let stream = guard.as_mut().expect("just populated");
        if let Err(err) = write_frame(stream, request_id, msg_type, payload).await {
            *guard = None;
            return Err(err);
        }
        match read_header(stream).await {
            Ok(header) => match read_payload(stream, &header).await {
                Ok(response) => Ok((header, response)),
                Err(err) => {
                    *guard = None;
                    Err(err)
                }
            },
            Err(err) => {
                *guard = None;
                Err(err)
            }
        }
    }

    /// GET_LOCATION: asks the naming server which storage server owns
    /// `path`.
    async fn resolve(&self, path: &str) -> Result<(String, u16)> {
        let mut payload = vec![0u8; PATH_FIELD_LEN];
        primitive::write_fixed_str(&mut payload, path);
        let (header, response) = self.ns_request(MessageType::GetLocation, &payload).await?;
        match header.msg_type {
            MessageType::Location => {
                if response.len() < INET_ADDRSTRLEN + 2 {
                    return Err(DfsError::Protocol("LOCATION payload too short".into()));
                }
                let host = primitive::read_fixed_str(&response[0..INET_ADDRSTRLEN]);
                let port = primitive::read_u16(&response[INET_ADDRSTRLEN..INET_ADDRSTRLEN + 2]);
                Ok((host, port))
            }
            MessageType::Error => Err(decode_error(&response)),
            other => Err(DfsError::Protocol(format!("unexpected NS reply {other:?}"))),
        }
    }

    async fn connect_storage(&self, host: &str, port: u16) -> Result<TcpStream> {
        Ok(TcpStream::connect((host, port)).await?)
    }

    /// `CREATE`: namespace-only operation handled entirely by the naming
    /// server (no storage server is involved).
    pub async fn create(&self, path: &str, mode: u32) -> Result<()> {
        let mut payload = vec![0u8; PATH_FIELD_LEN + 4];
        primitive::write_fixed_str(&mut payload[0..PATH_FIELD_LEN], path);
        primitive::write_u32(&mut payload[PATH_FIELD_LEN..PATH_FIELD_LEN + 4], mode);
        let (header, response) = self.ns_request(MessageType::Create, &payload).await?;
        expect_ok(header.msg_type, MessageType::Create, &response)
    }

    /// `READ`: consults the LRU cache first, otherwise fetches from the
    /// owning storage server and populates the cache on success.
    pub async fn read(&self, path: &str, offset: u64, length: u32) -> Result<Vec<u8>> {
        if let Some(cached) = self.cache.get(path, offset, length as usize) {
            return Ok(cached);
        }
        let (host, port) = self.resolve(path).await?;
        let mut stream = self.connect_storage(&host, port).await?;
        let mut payload = vec![0u8; PATH_FIELD_LEN + 12];
        primitive::write_fixed_str(&mut payload[0..PATH_FIELD_LEN], path);
        primitive::write_u64(&mut payload[PATH_FIELD_LEN..PATH_FIELD_LEN + 8], offset);
        primitive::write_u32(&mut payload[PATH_FIELD_LEN + 8..PATH_FIELD_LEN + 12], length);
        write_frame(&mut stream, self.next_id(), MessageType::Read, &payload).await?;
        let header = read_header(&mut stream).await?;
        let response = read_payload(&mut stream, &header).await?;
        match header.msg_type {
            MessageType::Read => {
                self.cache.put(path, offset, &response);
                Ok(response)
            }
            MessageType::Error => Err(decode_error(&response)),
            other => Err(DfsError::Protocol(format!("unexpected SS reply {other:?}"))),
        }
    }

    /// `WRITE`: write-through to the storage server; invalidates the cache
    /// entry at `(path, offset)` on success (spec §4.5).
    pub async fn write(&self, path: &str, offset: u64, data: &[u8]) -> Result<()> {
        let (host, port) = self.resolve(path).await?;
        let mut stream = self.connect_storage(&host, port).await?;
        let mut payload = vec![0u8; PATH_FIELD_LEN + 12];
        primitive::write_fixed_str(&mut payload[0..PATH_FIELD_LEN], path);
        primitive::write_u64(&mut payload[PATH_FIELD_LEN..PATH_FIELD_LEN + 8], offset);
        primitive::write_u32(&mut payload[PATH_FIELD_LEN + 8..PATH_FIELD_LEN + 12], data.len() as u32);
        payload.extend_from_slice(data);
        write_frame(&mut stream, self.next_id(), MessageType::Write, &payload).await?;
        let header = read_header(&mut stream).await?;
        let response = read_payload(&mut stream, &header).await?;
        let outcome = expect_ok(header.msg_type, MessageType::Write, &response);
        if outcome.is_ok() {
            self.cache.invalidate(path, offset);
        }
        outcome
    }

    /// `DELETE`: forwarded to the owning storage server, which removes the
    /// local file and fans it out to secondaries (spec §4.6).
    pub async fn delete(&self, path: &str) -> Result<()> {
        let (host, port) = self.resolve(path).await?;
        let mut stream = self.connect_storage(&host, port).await?;
        let mut payload = vec![0u8; PATH_FIELD_LEN];
        primitive::write_fixed_str(&mut payload, path);
        write_frame(&mut stream, self.next_id(), MessageType::Delete, &payload).await?;
        let header = read_header(&mut stream).await?;
        let response = read_payload(&mut stream, &header).await?;
        expect_ok(header.msg_type, MessageType::Delete, &response)
    }

    /// `GET_FILE_INFO`.
    pub async fn get_file_info(&self, path: &str) -> Result<FileInfo> {
        let (host, port) = self.resolve(path).await?;
        let mut stream = self.connect_storage(&host, port).await?;
        let mut payload = vec![0u8; PATH_FIELD_LEN];
        primitive::write_fixed_str(&mut payload, path);
        write_frame(&mut stream, self.next_id(), MessageType::GetFileInfo, &payload).await?;
        let header = read_header(&mut stream).await?;
        let response = read_payload(&mut stream, &header).await?;
        match header.msg_type {
            MessageType::GetFileInfoResponse => {
                if response.len() < 12 {
                    return Err(DfsError::Protocol("GET_FILE_INFO_RESPONSE too short".into()));
                }
                Ok(FileInfo {
                    file_size: primitive::read_u64(&response[0..8]),
                    permissions: primitive::read_u32(&response[8..12]),
                })
            }
            MessageType::Error => Err(decode_error(&response)),
            other => Err(DfsError::Protocol(format!("unexpected SS reply {other:?}"))),
        }
    }

    /// `STREAM`: invokes `on_chunk` once per received block until EOF.
    pub async fn stream(&self, path: &str, start_position: u64, mut on_chunk: impl FnMut(&[u8])) -> Result<()> {
        let mut stream = self.open_stream(path, start_position).await?;
        let mut buf = vec![0u8; STREAM_CHUNK];
        loop {
            let n = stream.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            on_chunk(&buf[..n]);
        }
        Ok(())
    }

    /// Convenience variant piping a stream into an external process's
    /// stdin, matching the source's "forward bytes until EOF or write
    /// failure" contract for the out-of-scope media player (spec §4.5).
    pub async fn stream_to_process(
        &self,
        path: &str,
        start_position: u64,
        mut sink: impl AsyncWrite + Unpin,
    ) -> Result<()> {
        let mut stream = self.open_stream(path, start_position).await?;
        let mut buf = vec![0u8; STREAM_CHUNK];
        loop {
            let n = stream.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            sink.write_all(&buf[..n]).await?;
        }
        Ok(())
    }

    async fn open_stream(&self, path: &str, start_position: u64) -> Result<TcpStream> {
        let (host, port) = self.resolve(path).await?;
        let mut stream = self.connect_storage(&host, port).await?;
        let mut payload = vec![0u8; PATH_FIELD_LEN + 13];
        primitive::write_fixed_str(&mut payload[0..PATH_FIELD_LEN], path);
        primitive::write_u64(&mut payload[PATH_FIELD_LEN..PATH_FIELD_LEN + 8], start_position);
        primitive::write_u32(&mut payload[PATH_FIELD_LEN + 8..PATH_FIELD_LEN + 12], STREAM_CHUNK as u32);
        payload[PATH_FIELD_LEN + 12] = 0; // metadata_only = false
        write_frame(&mut stream, self.next_id(), MessageType::Stream, &payload).await?;
        let header = read_header(&mut stream).await?;
        let response = read_payload(&mut stream, &header).await?;
        if header.msg_type == MessageType::Error {
            return Err(decode_error(&response));
        }
        Ok(stream)
    }

    /// Schedules `read` on the worker pool, invoking `callback` with the
    /// outcome. No cancellation is provided (spec §4.5).
    pub fn read_async(
        self: &Arc<Self>,
        path: String,
        offset: u64,
        length: u32,
        callback: impl FnOnce(Result<Vec<u8>>) + Send + 'static,
    ) {
        let engine = self.clone();
        let _ = self.workers.submit(Box::pin(async move {
            let outcome = engine.read(&path, offset, length).await;
            callback(outcome);
        }));
    }

    /// Schedules `write` on the worker pool, invoking `callback` with the
    /// outcome.
    pub fn write_async(
        self: &Arc<Self>,
        path: String,
        offset: u64,
        data: Vec<u8>,
        callback: impl FnOnce(Result<()>) + Send + 'static,
    ) {
        let engine = self.clone();
        let _ = self.workers.submit(Box::pin(async move {
            let outcome = engine.write(&path, offset, &data).await;
            callback(outcome);
        }));
    }

    /// Schedules `delete` on the worker pool, invoking `callback` with the
    /// outcome.
    pub fn delete_async(self: &Arc<Self>, path: String, callback: impl FnOnce(Result<()>) + Send + 'static) {
        let engine = self.clone();
        let _ = self.workers.submit(Box::pin(async move {
            let outcome = engine.delete(&path).await;
            callback(outcome);
        }));
    }
}

fn decode_error(response: &[u8]) -> DfsError {
    if response.len() < 4 {
        return DfsError::Protocol("ERROR payload too short".into());
    }
    DfsError::Remote(ErrorCode::from_i32(primitive::read_i32(&response[0..4])))
}

fn expect_ok(actual: MessageType, expected: MessageType, response: &[u8]) -> Result<()> {
    if actual == expected {
        return Ok(());
    }
    if actual == MessageType::Error {
        return Err(decode_error(response));
    }
    Err(DfsError::Protocol(format!("unexpected reply {actual:?}, wanted {expected:?}")))
}
