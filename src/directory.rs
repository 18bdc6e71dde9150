//! Directory Tree (C2): hierarchical path -> metadata map with per-node
//! locking over an arena of nodes (spec §4.2, §9 "Cyclic parent links").

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;

use crate::error::{DfsError, Result};

/// Arena handle. Never an owning pointer — resolved through the tree's
/// arena on every use, per spec §9.
pub type NodeId = u64;

const ROOT_ID: NodeId = 0;

/// File metadata (spec §3), overwritten atomically by registration.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetadata {
    pub ss_host: String,
    pub ss_port: u16,
    pub size: u64,
    pub permissions: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

struct NodeData {
    kind: NodeKind,
    metadata: Option<FileMetadata>,
    parent: Option<NodeId>,
    children: Vec<(String, NodeId)>,
}

/// Hierarchical path -> node map. Nodes live in an arena keyed by [`NodeId`]
/// so the parent back-reference can never be an owning cycle.
pub struct DirectoryTree {
    arena: DashMap<NodeId, RwLock<NodeData>>,
    next_id: AtomicU64,
    /// Guards only wholesale teardown; never taken during normal traversal.
    teardown: RwLock<()>,
}

impl DirectoryTree {
    pub fn new() -> Self {
        let arena = DashMap::new();
        arena.insert(
            ROOT_ID,
            RwLock::new(NodeData {
                kind: NodeKind::Directory,
                metadata: None,
                parent: None,
                children: Vec::new(),
            }),
        );
        Self { arena, next_id: AtomicU64::new(ROOT_ID + 1), teardown: RwLock::new(()) }
    }

    fn alloc_id(&self) -> NodeId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn split(path: &str) -> Result<Vec<&str>> {
        if path.is_empty() {
            return Err(DfsError::InvalidArgument("empty path".into()));
        }
        if path == "/" {
            return Ok(Vec::new());
        }
        let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
        for component in &components {
            if component.contains('\0') {
                return Err(DfsError::InvalidArgument(format!("NUL byte in path {path}")));
            }
        }
        Ok(components)
    }

    /// Finds the child of `parent` named `name`, if any.
    async fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        let guard = self.arena.get(&parent)?;
        let data = guard.read().await;
        data.children.iter().find(|(n, _)| n == name).map(|(_, id)| *id)
    }

    /// Walks `path`, optionally creating missing intermediate/terminal
    /// nodes. `terminal_kind` is only used when creating the last
    /// component; intermediates are always directories.
    async fn resolve(
        &self,
        path: &str,
        create: bool,
        terminal_kind: NodeKind,
    ) -> Result<NodeId> {
        let _teardown_guard = self.teardown.read().await;
        let components = Self::split(path)?;
        let mut current = ROOT_ID;

        for (i, component) in components.iter().enumerate() {
            let is_last = i == components.len() - 1;
            if let Some(child) = self.find_child(current, component).await {
                current = child;
                continue;
            }
            if !create {
                return Err(DfsError::NotFound(path.to_string()));
            }

            let kind = if is_last { terminal_kind } else { NodeKind::Directory };
            let new_id = self.alloc_id();

            let guard = self.arena.get(&current).ok_or_else(|| {
                DfsError::Internal(format!("dangling node {current} while resolving {path}"))
            })?;
            let mut data = guard.write().await;
            // Re-check under the write lock: another writer may have
            // created this child while we were allocating an id.
            if let Some((_, existing)) = data.children.iter().find(|(n, _)| n == component) {
                current = *existing;
                continue;
            }
            data.children.push((component.to_string(), new_id));
            drop(data);
            drop(guard);

            self.arena.insert(
                new_id,
                RwLock::new(NodeData {
                    kind,
                    metadata: None,
                    parent: Some(current),
                    children: Vec::new(),
                }),
            );
            current = new_id;
        }

        Ok(current)
    }

    /// `lookup(path) -> node | NOT_FOUND`. `lookup("/")` returns the root.
    pub async fn lookup(&self, path: &str) -> Result<NodeId> {
        self.resolve(path, false, NodeKind::Directory).await
    }

    /// Creates all missing intermediate directories and a terminal
    /// directory; idempotent on an existing directory of matching kind.
    pub async fn create(&self, path: &str) -> Result<()> {
        let id = self.resolve(path, true, NodeKind::Directory).await?;
        let guard = self.arena.get(&id).expect("node just resolved");
        let data = guard.read().await;
        if data.kind != NodeKind::Directory {
            return Err(DfsError::InvalidArgument(format!("{path} exists as a file")));
        }
        Ok(())
    }

    /// Ensures `path` exists as a file node and replaces its metadata
    /// (last-writer-wins).
    pub async fn register_file(&self, path: &str, metadata: FileMetadata) -> Result<()> {
        let id = self.resolve(path, true, NodeKind::File).await?;
        let guard = self.arena.get(&id).expect("node just resolved");
        let mut data = guard.write().await;
        data.kind = NodeKind::File;
        data.metadata = Some(metadata);
        Ok(())
    }

    /// Returns a copy of the file metadata at `path`.
    pub async fn get_metadata(&self, path: &str) -> Result<FileMetadata> {
        let id = self.lookup(path).await?;
        let guard = self.arena.get(&id).expect("node just resolved");
        let data = guard.read().await;
        data.metadata.clone().ok_or_else(|| DfsError::NotFound(path.to_string()))
    }

    /// Deletes `path`. Fails with `InvalidArgument` if it has children.
    pub async fn delete(&self, path: &str) -> Result<()> {
        if path == "/" {
            return Err(DfsError::InvalidArgument("cannot delete root".into()));
        }
        let _teardown_guard = self.teardown.read().await;
        let id = self.lookup(path).await?;

        let parent_id = {
            let guard = self.arena.get(&id).expect("node just resolved");
            let data = guard.read().await;
            if !data.children.is_empty() {
                return Err(DfsError::InvalidArgument(format!("{path} is not empty")));
            }
            data.parent
        };

        if let Some(parent_id) = parent_id {
            let parent_guard = self.arena.get(&parent_id).expect("parent must exist");
            let mut parent_data = parent_guard.write().await;
            parent_data.children.retain(|(_, child_id)| *child_id != id);
        }
        self.arena.remove(&id);
        Ok(())
    }

    /// Snapshot of `path`'s kind, for tests and diagnostics.
    pub async fn kind_of(&self, path: &str) -> Result<NodeKind> {
        let id = self.lookup(path).await?;
        let guard = self.arena.get(&id).expect("node just resolved");
        let kind = guard.read().await.kind;
        Ok(kind)
    }

    /// Names of the direct children of `path`, in insertion order.
    pub async fn list_children(&self, path: &str) -> Result<Vec<String>> {
        let id = self.lookup(path).await?;
        let guard = self.arena.get(&id).expect("node just resolved");
        let data = guard.read().await;
        Ok(data.children.iter().map(|(name, _)| name.clone()).collect())
    }
}

impl Default for DirectoryTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper matching how both NS binaries share one tree.
pub type SharedDirectoryTree = Arc<DirectoryTree>;
