//! Client Library role: path resolution, the LRU read cache, and the async
//! worker pool sitting in front of a synchronous-looking operation API
//! (spec §4.5).

pub mod cache;
pub mod engine;
pub mod worker_pool;

pub use engine::ClientEngine;
