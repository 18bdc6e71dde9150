//! Naming Server role: directory namespace, health registry, router, and
//! request dispatch (spec §4.2–§4.4).

pub mod cache;
pub mod dispatcher;
pub mod router;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::directory::DirectoryTree;
use crate::health::HealthRegistry;
use cache::LookupCache;
use dispatcher::NamingDispatcher;
use router::Router;

pub struct NamingServerConfig {
    pub bind_addr: (String, u16),
    pub cache_size: usize,
}

/// Starts a naming server: builds the directory tree, health registry,
/// router, and lookup cache, spawns the health sweeper, then serves
/// connections forever.
pub async fn run(config: NamingServerConfig) -> std::io::Result<()> {
    let tree = Arc::new(DirectoryTree::new());
    let registry = HealthRegistry::new();
    registry.spawn_sweeper();
    let router = Router::new(registry.clone());
    let cache = LookupCache::new(config.cache_size);

    let dispatcher = NamingDispatcher::new(tree, registry, router, cache);
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = ?listener.local_addr()?, "naming server listening");
    dispatcher.serve(listener).await
}
