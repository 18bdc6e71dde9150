//! Fixed worker pool backing the `*_async` client operations (spec §9
//! Design Notes: "a small fixed worker pool with a request queue is
//! equivalent and preferable" to the source's one-thread-per-call model).
//!
//! Jobs are boxed futures pulled off a bounded lock-free queue; workers
//! block on a `Notify` when the queue is empty. No cancellation is offered,
//! matching spec §4.5's "`*_async` ... no cancellation is provided".

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crossbeam_queue::ArrayQueue;
use tokio::sync::Notify;

pub type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

pub struct WorkerPool {
    queue: Arc<ArrayQueue<Job>>,
    notify: Arc<Notify>,
}

impl WorkerPool {
    /// Spawns `worker_count` tokio tasks pulling from a queue of capacity
    /// `queue_capacity`.
    pub fn new(worker_count: usize, queue_capacity: usize) -> Self {
        let queue = Arc::new(ArrayQueue::new(queue_capacity));
        let notify = Arc::new(Notify::new());
        for _ in 0..worker_count {
            let queue = queue.clone();
            let notify = notify.clone();
            tokio::spawn(async move {
                loop {
                    match queue.pop() {
                        Some(job) => job.await,
                        None => notify.notified().await,
                    }
                }
            });
        }
        Self { queue, notify }
    }

    /// Enqueues `job` for execution on a worker. Returns the job back as an
    /// error if the queue is momentarily full (spec §7: `INTERNAL_ERROR`,
    /// "pool exhausted").
    pub fn submit(&self, job: Job) -> Result<(), Job> {
        let result = self.queue.push(job);
        self.notify.notify_one();
        result
    }
}
