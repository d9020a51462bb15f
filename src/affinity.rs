//! Thread-affinity execution.
//!
//! Host project state may only be read on one designated thread. The
//! executor is an injected capability: the production implementation owns a
//! dedicated worker thread and marshals closures onto it, while the inline
//! implementation runs closures in the caller's context for deterministic
//! tests. Normalization logic sees only the trait and stays thread-model
//! agnostic.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{channel, Sender};
use std::thread::{self, JoinHandle, ThreadId};

use crate::error::RestoreError;

/// A unit of work marshaled onto the affinity thread.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Execution under project-state affinity.
pub trait AffinityExecutor: Send + Sync {
    /// Queue a job for the affinity thread. Implementations already on the
    /// affinity thread may run it immediately.
    fn schedule(&self, job: Job);

    /// Whether the calling thread is the affinity thread.
    fn holds_affinity(&self) -> bool;

    /// Fail unless the calling thread holds affinity. Never retried: an
    /// off-thread read is a precondition violation, not a transient state.
    fn ensure_affinity(&self) -> Result<(), RestoreError> {
        if self.holds_affinity() {
            Ok(())
        } else {
            Err(RestoreError::AffinityViolation)
        }
    }
}

/// Run `operation` under affinity and hand its value back to the caller.
///
/// A caller already holding affinity runs the operation in place. Otherwise
/// the closure is marshaled to the affinity thread and the caller blocks
/// until it completes; if the operation panics or the thread goes away, the
/// caller observes [`RestoreError::AffinityLost`] rather than a hang.
pub fn run_under_affinity<E, T, F>(executor: &E, operation: F) -> Result<T, RestoreError>
where
    E: AffinityExecutor + ?Sized,
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    if executor.holds_affinity() {
        return Ok(operation());
    }

    let (tx, rx) = channel();
    executor.schedule(Box::new(move || {
        let _ = tx.send(operation());
    }));
    rx.recv().map_err(|_| RestoreError::AffinityLost)
}

/// Production executor: one named worker thread owning all project-state
/// reads, fed through an mpsc queue.
pub struct DedicatedThreadExecutor {
    sender: Sender<Job>,
    affinity: ThreadId,
    worker: Option<JoinHandle<()>>,
}

impl DedicatedThreadExecutor {
    pub fn spawn() -> Self {
        let (sender, receiver) = channel::<Job>();
        let worker = thread::Builder::new()
            .name("project-affinity".into())
            .spawn(move || {
                for job in receiver {
                    // A panicking job must not take the affinity thread down
                    // with it; the caller sees AffinityLost via its dropped
                    // result channel.
                    if let Err(panic) = catch_unwind(AssertUnwindSafe(job)) {
                        tracing::error!(?panic, "affinity job panicked");
                    }
                }
            })
            .expect("failed to spawn affinity thread");

        let affinity = worker.thread().id();
        DedicatedThreadExecutor {
            sender,
            affinity,
            worker: Some(worker),
        }
    }
}

impl AffinityExecutor for DedicatedThreadExecutor {
    fn schedule(&self, job: Job) {
        // Send only fails after the worker has exited; the caller's result
        // channel then reports AffinityLost.
        let _ = self.sender.send(job);
    }

    fn holds_affinity(&self) -> bool {
        thread::current().id() == self.affinity
    }
}

impl Drop for DedicatedThreadExecutor {
    fn drop(&mut self) {
        // Closing the queue lets the worker drain and exit.
        let (closed, _) = channel();
        self.sender = closed;
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Test/bypass executor: runs every job synchronously in the caller's
/// context and always claims affinity, so unit tests need no real
/// affinity-bearing host.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineExecutor;

impl AffinityExecutor for InlineExecutor {
    fn schedule(&self, job: Job) {
        job();
    }

    fn holds_affinity(&self) -> bool {
        true
    }
}
