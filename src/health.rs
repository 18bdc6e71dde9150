//! Health Registry (C3): liveness + load of known storage servers.
//!
//! Spec §4.3 is explicit that this is "protected by a single mutex", so a
//! plain `Mutex<Vec<ServerRecord>>` is used here rather than a sharded map.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::time::interval;
use tracing::{info, warn};

use crate::error::{DfsError, Result};

pub const MAX_SERVERS: usize = 100;
pub const HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct ServerRecord {
    pub host: String,
    pub port: u16,
    pub last_heartbeat: Instant,
    pub load: i32,
    pub active: bool,
}

pub struct HealthRegistry {
    servers: Mutex<Vec<ServerRecord>>,
}

impl HealthRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { servers: Mutex::new(Vec::new()) })
    }

    /// Updates or inserts the record for `(host, port)`, marking it active.
    pub async fn receive_heartbeat(&self, host: &str, port: u16, load: i32) {
        let mut servers = self.servers.lock().await;
        if let Some(existing) = servers.iter_mut().find(|s| s.host == host && s.port == port) {
            existing.last_heartbeat = Instant::now();
            existing.load = load;
            existing.active = true;
            return;
        }
        if servers.len() >= MAX_SERVERS {
            warn!(host, port, "health registry full, dropping heartbeat");
            return;
        }
        info!(host, port, "storage server registered with health registry");
        servers.push(ServerRecord {
            host: host.to_string(),
            port,
            last_heartbeat: Instant::now(),
            load,
            active: true,
        });
    }

    /// Snapshot of all active records, or `NotFound` if none are active.
    pub async fn get_active(&self) -> Result<Vec<ServerRecord>> {
        let servers = self.servers.lock().await;
        let active: Vec<ServerRecord> = servers.iter().filter(|s| s.active).cloned().collect();
        if active.is_empty() {
            return Err(DfsError::NotFound("no active storage servers".into()));
        }
        Ok(active)
    }

    /// Marks inactive any record whose last heartbeat predates the timeout.
    async fn sweep(&self) {
        let mut servers = self.servers.lock().await;
        let now = Instant::now();
        for server in servers.iter_mut() {
            if server.active && now.duration_since(server.last_heartbeat) > HEARTBEAT_TIMEOUT {
                server.active = false;
                warn!(host = %server.host, port = server.port, "storage server is inactive");
            }
        }
    }

    /// Spawns the background sweeper, waking every `HEARTBEAT_TIMEOUT`.
    pub fn spawn_sweeper(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = interval(HEARTBEAT_TIMEOUT);
            loop {
                ticker.tick().await;
                registry.sweep().await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn heartbeat_registers_and_reports_active() {
        let registry = HealthRegistry::new();
        registry.receive_heartbeat("127.0.0.1", 9000, 3).await;
        let active = registry.get_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].load, 3);
    }

    #[tokio::test]
    async fn no_servers_is_not_found() {
        let registry = HealthRegistry::new();
        assert!(registry.get_active().await.is_err());
    }

    #[tokio::test]
    async fn repeated_heartbeat_updates_in_place() {
        let registry = HealthRegistry::new();
        registry.receive_heartbeat("h", 1, 1).await;
        registry.receive_heartbeat("h", 1, 5).await;
        let active = registry.get_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].load, 5);
    }

    #[tokio::test]
    async fn sweep_marks_stale_servers_inactive() {
        let registry = HealthRegistry::new();
        registry.receive_heartbeat("h", 1, 0).await;
        {
            let mut servers = registry.servers.lock().await;
            servers[0].last_heartbeat = Instant::now() - Duration::from_secs(16);
        }
        registry.sweep().await;
        assert!(registry.get_active().await.is_err());
    }

    #[tokio::test]
    async fn reheartbeat_reactivates() {
        let registry = HealthRegistry::new();
        registry.receive_heartbeat("h", 1, 0).await;
        {
            let mut servers = registry.servers.lock().await;
            servers[0].last_heartbeat = Instant::now() - Duration::from_secs(16);
        }
        registry.sweep().await;
        assert!(registry.get_active().await.is_err());
        registry.receive_heartbeat("h", 1, 2).await;
        assert!(registry.get_active().await.is_ok());
    }

    #[tokio::test]
    async fn full_registry_drops_new_servers() {
        let registry = HealthRegistry::new();
        for i in 0..MAX_SERVERS {
            registry.receive_heartbeat(&format!("h{i}"), i as u16, 0).await;
        }
        registry.receive_heartbeat("overflow", 1, 0).await;
        assert_eq!(registry.get_active().await.unwrap().len(), MAX_SERVERS);
    }
}
