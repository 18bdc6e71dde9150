//! Heartbeat Reporter (C8): periodic liveness+load message from SS to NS
//! (spec §4.7). `current_load` is a shared in-flight-operation counter
//! incremented on entry and decremented on exit of each read/write/stream.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::interval;
use tracing::warn;

use crate::transport::{primitive, write_frame, MessageType};

pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);

/// Shared in-flight load counter; clone and hand to the dispatcher.
#[derive(Clone, Default)]
pub struct LoadCounter(Arc<AtomicI64>);

impl LoadCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> i32 {
        self.0.load(Ordering::Relaxed) as i32
    }

    /// RAII guard: increments on creation, decrements on drop.
    pub fn enter(&self) -> LoadGuard {
        self.0.fetch_add(1, Ordering::Relaxed);
        LoadGuard(self.0.clone())
    }
}

pub struct LoadGuard(Arc<AtomicI64>);

impl Drop for LoadGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Spawns the heartbeat task: every [`HEARTBEAT_INTERVAL`], opens a fresh
/// connection to the naming server, sends one `HEARTBEAT` frame, closes.
pub fn spawn(
    ns_host: String,
    ns_port: u16,
    advertised_host: String,
    advertised_port: u16,
    load: LoadCounter,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(HEARTBEAT_INTERVAL);
        loop {
            ticker.tick().await;
            if let Err(err) =
                send_once(&ns_host, ns_port, &advertised_host, advertised_port, load.current()).await
            {
                warn!(%ns_host, ns_port, %err, "heartbeat failed");
            }
        }
    })
}

async fn send_once(
    ns_host: &str,
    ns_port: u16,
    advertised_host: &str,
    advertised_port: u16,
    load: i32,
) -> crate::error::Result<()> {
    let mut stream = TcpStream::connect((ns_host, ns_port)).await?;
    // HeartbeatMessage: host[256], port[32], load: i32 (spec §6).
    let mut payload = vec![0u8; 256 + 32 + 4];
    primitive::write_fixed_str(&mut payload[0..256], advertised_host);
    primitive::write_fixed_str(&mut payload[256..288], &advertised_port.to_string());
    primitive::write_i32(&mut payload[288..292], load);
    write_frame(&mut stream, 0, MessageType::Heartbeat, &payload).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_guard_increments_and_decrements() {
        let counter = LoadCounter::new();
        assert_eq!(counter.current(), 0);
        {
            let _guard = counter.enter();
            assert_eq!(counter.current(), 1);
        }
        assert_eq!(counter.current(), 0);
    }

    #[test]
    fn nested_guards_stack() {
        let counter = LoadCounter::new();
        let g1 = counter.enter();
        let g2 = counter.enter();
        assert_eq!(counter.current(), 2);
        drop(g1);
        assert_eq!(counter.current(), 1);
        drop(g2);
        assert_eq!(counter.current(), 0);
    }
}
