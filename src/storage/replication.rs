//! Replication Fan-out (C7): push writes/deletes to configured secondaries.
//!
//! Mirrors the original C `replication.c`: a singly-owned list of
//! secondaries behind one coarse mutex (spec §5), a background task that
//! retries dead secondaries every 5s, and best-effort fan-out that never
//! fails the client (spec §4.6, §7 "replication errors are absorbed").

use std::sync::Arc;
use std::time::Duration;

use async_channel::{Receiver, Sender};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::interval;
use tracing::warn;

use crate::transport::{write_frame, MessageType};

const RECONNECT_INTERVAL: Duration = Duration::from_secs(5);

struct Secondary {
    host: String,
    port: u16,
    conn: Option<TcpStream>,
    alive: bool,
}

/// A replication command enqueued by the dispatcher off the request path.
pub enum ReplicationCommand {
    Write { path: String, offset: u64, data: Vec<u8> },
    Delete { path: String },
}

pub struct ReplicationFanout {
    secondaries: Mutex<Vec<Secondary>>,
    sender: Sender<ReplicationCommand>,
}

impl ReplicationFanout {
    /// Spawns the fan-out worker and the reconnect loop, returning a handle
    /// whose `enqueue` is cheap and non-blocking for callers on the request
    /// path (spec: "asynchronously fans out to secondaries").
    pub fn spawn(backup_addrs: Vec<(String, u16)>) -> Arc<Self> {
        let (sender, receiver) = async_channel::unbounded();
        let secondaries = backup_addrs
            .into_iter()
            .map(|(host, port)| Secondary { host, port, conn: None, alive: false })
            .collect();
        let fanout = Arc::new(Self { secondaries: Mutex::new(secondaries), sender });

        let worker = fanout.clone();
        tokio::spawn(async move { worker.run_fanout(receiver).await });

        let reconnector = fanout.clone();
        tokio::spawn(async move { reconnector.run_reconnect_loop().await });

        fanout
    }

    /// Enqueues a write for fan-out; never blocks the caller on network I/O.
    pub fn enqueue_write(&self, path: &str, offset: u64, data: &[u8]) {
        let _ = self.sender.try_send(ReplicationCommand::Write {
            path: path.to_string(),
            offset,
            data: data.to_vec(),
        });
    }

    pub fn enqueue_delete(&self, path: &str) {
        let _ = self.sender.try_send(ReplicationCommand::Delete { path: path.to_string() });
    }

    async fn run_fanout(&self, receiver: Receiver<ReplicationCommand>) {
        while let Ok(command) = receiver.recv().await {
            let mut secondaries = self.secondaries.lock().await;
            for secondary in secondaries.iter_mut() {
                if !secondary.alive {
                    continue;
                }
                let result = match &command {
                    ReplicationCommand::Write { path, offset, data } => {
                        replicate_write(secondary, path, *offset, data).await
                    }
                    ReplicationCommand::Delete { path } => replicate_delete(secondary, path).await,
                };
                if let Err(err) = result {
                    warn!(host = %secondary.host, port = secondary.port, %err, "secondary marked dead");
                    secondary.alive = false;
                    secondary.conn = None;
                }
            }
        }
    }

    async fn run_reconnect_loop(&self) {
        let mut ticker = interval(RECONNECT_INTERVAL);
        loop {
            ticker.tick().await;
            let mut secondaries = self.secondaries.lock().await;
            for secondary in secondaries.iter_mut() {
                if secondary.alive {
                    continue;
                }
                match TcpStream::connect((secondary.host.as_str(), secondary.port)).await {
                    Ok(stream) => {
                        secondary.conn = Some(stream);
                        secondary.alive = true;
                    }
                    Err(_) => secondary.conn = None,
                }
            }
        }
    }
}

async fn replicate_write(
    secondary: &mut Secondary,
    path: &str,
    offset: u64,
    data: &[u8],
) -> crate::error::Result<()> {
    let conn = secondary.conn.as_mut().ok_or_else(|| {
        crate::error::DfsError::Network(format!("no connection to {}:{}", secondary.host, secondary.port))
    })?;
    let mut payload = vec![0u8; 256 + 8 + 4];
    crate::transport::primitive::write_fixed_str(&mut payload[0..256], path);
    crate::transport::primitive::write_u64(&mut payload[256..264], offset);
    crate::transport::primitive::write_u32(&mut payload[264..268], data.len() as u32);
    payload.extend_from_slice(data);
    write_frame(conn, 0, MessageType::ReplicateWrite, &payload).await
}

async fn replicate_delete(secondary: &mut Secondary, path: &str) -> crate::error::Result<()> {
    let conn = secondary.conn.as_mut().ok_or_else(|| {
        crate::error::DfsError::Network(format!("no connection to {}:{}", secondary.host, secondary.port))
    })?;
    let mut payload = vec![0u8; 256];
    crate::transport::primitive::write_fixed_str(&mut payload, path);
    write_frame(conn, 0, MessageType::ReplicateDelete, &payload).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn write_to_dead_secondary_does_not_panic() {
        let fanout = ReplicationFanout::spawn(vec![("127.0.0.1".to_string(), 1)]);
        fanout.enqueue_write("a.txt", 0, b"data");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn reconnect_brings_secondary_back_alive() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            loop {
                let _ = listener.accept().await;
            }
        });

        let fanout = ReplicationFanout::spawn(vec![("127.0.0.1".to_string(), port)]);
        // Force an immediate reconnect attempt rather than waiting 5s.
        {
            let mut secondaries = fanout.secondaries.lock().await;
            for secondary in secondaries.iter_mut() {
                if let Ok(stream) = TcpStream::connect((secondary.host.as_str(), secondary.port)).await {
                    secondary.conn = Some(stream);
                    secondary.alive = true;
                }
            }
        }
        let secondaries = fanout.secondaries.lock().await;
        assert!(secondaries[0].alive);
    }
}
