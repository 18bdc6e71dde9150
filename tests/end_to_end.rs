//! End-to-end scenarios driving a real naming server, storage server, and
//! client engine over localhost TCP sockets.

use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;

use dfs::client::ClientEngine;
use dfs::directory::{DirectoryTree, FileMetadata};
use dfs::health::HealthRegistry;
use dfs::naming::cache::LookupCache;
use dfs::naming::dispatcher::NamingDispatcher;
use dfs::naming::router::Router;
use dfs::storage::backend::{Backend, LocalFsBackend};
use dfs::storage::dispatcher::StorageDispatcher;
use dfs::storage::heartbeat::LoadCounter;
use dfs::storage::replication::ReplicationFanout;
use dfs::ErrorCode;

async fn spawn_naming_server() -> (String, u16, Arc<DirectoryTree>) {
    let tree = Arc::new(DirectoryTree::new());
    let registry = HealthRegistry::new();
    let router = Router::new(registry.clone());
    let dispatcher = NamingDispatcher::new(tree.clone(), registry, router, LookupCache::new(16));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(dispatcher.serve(listener));
    ("127.0.0.1".to_string(), port, tree)
}

async fn spawn_storage_server(dir: &Path, backup_addrs: Vec<(String, u16)>) -> (String, u16) {
    let backend: Arc<dyn Backend> = Arc::new(LocalFsBackend::new(dir));
    let fanout = ReplicationFanout::spawn(backup_addrs);
    let dispatcher = StorageDispatcher::new(backend, fanout, LoadCounter::new());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(dispatcher.serve(listener));
    ("127.0.0.1".to_string(), port)
}

/// S1 — Register & locate: a storage server advertises an existing file and
/// the client resolves its location through `GET_LOCATION`.
#[tokio::test]
async fn register_and_locate() {
    let (ns_host, ns_port, tree) = spawn_naming_server().await;
    let dir = tempfile::tempdir().unwrap();
    tokio::fs::write(dir.path().join("a.txt"), b"preexisting").await.unwrap();
    let (ss_host, ss_port) = spawn_storage_server(dir.path(), vec![]).await;

    tree.register_file(
        "a.txt",
        FileMetadata { ss_host: ss_host.clone(), ss_port, size: 0, permissions: 0o644 },
    )
    .await
    .unwrap();

    let engine = ClientEngine::new(ns_host, ns_port, 16);
    let info = engine.get_file_info("a.txt").await.unwrap();
    assert_eq!(info.file_size, "preexisting".len() as u64);
}

/// S2 — Write-then-read against the storage server returned by resolution.
#[tokio::test]
async fn write_then_read() {
    let (ns_host, ns_port, tree) = spawn_naming_server().await;
    let dir = tempfile::tempdir().unwrap();
    let (ss_host, ss_port) = spawn_storage_server(dir.path(), vec![]).await;
    tree.register_file("a.txt", FileMetadata { ss_host, ss_port, size: 0, permissions: 0o644 }).await.unwrap();

    let engine = ClientEngine::new(ns_host, ns_port, 16);
    engine.write("a.txt", 0, b"hello").await.unwrap();
    let data = engine.read("a.txt", 0, 5).await.unwrap();
    assert_eq!(data, b"hello");
}

/// S3 — Directory create/delete: refuses to delete a non-empty directory,
/// succeeds once the child is gone. Exercised directly against the NS's
/// in-memory tree, since neither `CREATE` nor directory `DELETE` crosses the
/// wire to a storage server (spec §4.6's `DELETE` is a file operation).
#[tokio::test]
async fn directory_create_and_delete() {
    let (_ns_host, _ns_port, tree) = spawn_naming_server().await;
    tree.create("/d").await.unwrap();
    tree.create("/d/x").await.unwrap();

    let err = tree.delete("/d").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidArgument);

    tree.delete("/d/x").await.unwrap();
    tree.delete("/d").await.unwrap();
    assert!(tree.lookup("/d").await.is_err());
}

/// S5 — Replication to a dead secondary never surfaces to the client.
#[tokio::test]
async fn write_survives_dead_secondary() {
    let (ns_host, ns_port, tree) = spawn_naming_server().await;
    let dir = tempfile::tempdir().unwrap();
    let dead_secondary = ("127.0.0.1".to_string(), 1u16);
    let (ss_host, ss_port) = spawn_storage_server(dir.path(), vec![dead_secondary]).await;
    tree.register_file("a.txt", FileMetadata { ss_host, ss_port, size: 0, permissions: 0o644 }).await.unwrap();

    let engine = ClientEngine::new(ns_host, ns_port, 16);
    engine.write("a.txt", 0, b"hello").await.unwrap();
    let data = engine.read("a.txt", 0, 5).await.unwrap();
    assert_eq!(data, b"hello");
}

/// A client asking for a path nobody registered gets `FILE_NOT_FOUND`, not a
/// hang or an internal error.
#[tokio::test]
async fn unregistered_path_is_not_found() {
    let (ns_host, ns_port, _tree) = spawn_naming_server().await;
    let engine = ClientEngine::new(ns_host, ns_port, 16);
    let err = engine.read("nope.txt", 0, 1).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::FileNotFound);
}

/// Streaming delivers the whole file across multiple 8 KiB-scale chunks to
/// the caller's callback, in order.
#[tokio::test]
async fn stream_delivers_full_file() {
    let (ns_host, ns_port, tree) = spawn_naming_server().await;
    let dir = tempfile::tempdir().unwrap();
    let (ss_host, ss_port) = spawn_storage_server(dir.path(), vec![]).await;
    tree.register_file("movie.bin", FileMetadata { ss_host, ss_port, size: 0, permissions: 0o644 }).await.unwrap();

    let engine = ClientEngine::new(ns_host, ns_port, 16);
    let payload = vec![7u8; 20_000];
    engine.write("movie.bin", 0, &payload).await.unwrap();

    let mut received = Vec::new();
    engine
        .stream("movie.bin", 0, |chunk| received.extend_from_slice(chunk))
        .await
        .unwrap();
    assert_eq!(received, payload);
}
