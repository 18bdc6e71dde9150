//! Router (C5): pooled NS→SS connections, load-balanced by the health
//! registry (spec §4.4). The pool itself sits behind one coarse `Mutex`
//! (spec §5: "the router pool... each have a single coarse mutex"); the
//! lock is held only to find or create an entry, never across I/O.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::net::TcpStream;
use tokio::sync::Mutex;

use crate::error::{DfsError, Result};
use crate::health::HealthRegistry;
use crate::transport::{read_header, read_payload, write_frame, FrameHeader, MessageType};

const POOL_CAPACITY: usize = 100;

struct PoolEntry {
    host: String,
    port: u16,
    conn: Mutex<Option<TcpStream>>,
    in_use: AtomicBool,
}

pub struct Router {
    registry: Arc<HealthRegistry>,
    pool: Mutex<Vec<Arc<PoolEntry>>>,
}

impl Router {
    pub fn new(registry: Arc<HealthRegistry>) -> Arc<Self> {
        Arc::new(Self { registry, pool: Mutex::new(Vec::new()) })
    }

    /// Picks the lowest-load active storage server (ties by registration
    /// order, per spec §4.4) and checks out a pooled connection to it.
    pub async fn acquire(&self) -> Result<PooledConnection> {
        let active = self.registry.get_active().await?;
        let chosen = active
            .into_iter()
            .min_by_key(|server| server.load)
            .expect("get_active never returns an empty snapshot");
        let entry = self.checkout(&chosen.host, chosen.port).await?;
        Ok(PooledConnection { entry })
    }

    async fn checkout(&self, host: &str, port: u16) -> Result<Arc<PoolEntry>> {
        let mut pool = self.pool.lock().await;
        if let Some(entry) = pool
            .iter()
            .find(|e| e.host == host && e.port == port && !e.in_use.load(Ordering::Acquire))
        {
            entry.in_use.store(true, Ordering::Release);
            return Ok(entry.clone());
        }
        if pool.len() >= POOL_CAPACITY {
            return Err(DfsError::Internal("router pool exhausted".into()));
        }
        let entry = Arc::new(PoolEntry {
            host: host.to_string(),
            port,
            conn: Mutex::new(None),
            in_use: AtomicBool::new(true),
        });
        pool.push(entry.clone());
        Ok(entry)
    }
}

/// A checked-out pooled connection. Marks itself free again on drop.
pub struct PooledConnection {
    entry: Arc<PoolEntry>,
}

impl PooledConnection {
    /// Relays one request frame to the storage server and returns its
    /// response. Drops the underlying socket on any I/O error so the next
    /// checkout reconnects from scratch.
    pub async fn relay(
        &self,
        request_id: u32,
        msg_type: MessageType,
        payload: &[u8],
    ) -> Result<(FrameHeader, Vec<u8>)> {
        let mut guard = self.entry.conn.lock().await;
        if guard.is_none() {
            *guard = Some(TcpStream::connect((self.entry.host.as_str(), self.entry.port)).await?);
        }
        let stream = guard.as_mut().expect("just populated");

        if let Err(err) = write_frame(stream, request_id, msg_type, payload).await {
            *guard = None;
            return Err(err);
        }
        let header = match read_header(stream).await {
            Ok(h) => h,
            Err(err) => {
                *guard = None;
                return Err(err);
            }
        };
        let response = match read_payload(stream, &header).await {
            Ok(p) => p,
            Err(err) => {
                *guard = None;
                return Err(err);
            }
        };
        Ok((header, response))
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        self.entry.in_use.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    async fn echo_server() -> (TcpListener, u16) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        (listener, port)
    }

    #[tokio::test]
    async fn relay_round_trips_through_pool() {
        let (listener, port) = echo_server().await;
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let header = read_header(&mut socket).await.unwrap();
            let payload = read_payload(&mut socket, &header).await.unwrap();
            write_frame(&mut socket, header.request_id, MessageType::Read, &payload).await.unwrap();
        });

        let registry = HealthRegistry::new();
        registry.receive_heartbeat("127.0.0.1", port, 0).await;
        let router = Router::new(registry);
        let conn = router.acquire().await.unwrap();
        let (header, response) = conn.relay(7, MessageType::Read, b"ping").await.unwrap();
        assert_eq!(header.request_id, 7);
        assert_eq!(response, b"ping");
    }

    #[tokio::test]
    async fn lowest_load_server_is_chosen() {
        let registry = HealthRegistry::new();
        registry.receive_heartbeat("busy", 1, 10).await;
        registry.receive_heartbeat("idle", 2, 0).await;
        let router = Router::new(registry);
        let conn = router.acquire().await.unwrap();
        assert_eq!(conn.entry.host, "idle");
    }

    #[tokio::test]
    async fn pool_reuses_entry_for_same_target() {
        let registry = HealthRegistry::new();
        registry.receive_heartbeat("127.0.0.1", 1, 0).await;
        let router = Router::new(registry);
        {
            let _conn = router.acquire().await.unwrap();
        }
        let _conn2 = router.acquire().await.unwrap();
        assert_eq!(router.pool.lock().await.len(), 1);
    }
}
