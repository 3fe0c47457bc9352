//! Runtime abstraction layer for async operations
//!
//! The console's timers and their per-tick requests are spawned through the
//! [`AsyncSpawner`] installed here. Tokio is the default; hosts embedding the
//! library in another executor can install their own spawner before starting
//! any loop.

use crate::prelude::{Future, Pin};
use std::time::Duration;

/// A trait for spawning async tasks (object-safe version)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future and return a handle to it
    fn spawn_boxed(
        &self,
        future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
    ) -> Box<dyn AsyncHandle>;
}

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task. Tasks it spawned itself keep running.
    fn cancel(&self);
}

/// Spawn a future on the installed runtime
pub fn spawn<F>(future: F) -> Box<dyn AsyncHandle>
where
    F: Future<Output = ()> + Send + 'static,
{
    runtime().spawn_boxed(Box::pin(future))
}

/// Spawn a task that calls `tick` every `period`, the first call one period
/// after start. Dropping the returned handle does not stop it; call
/// [`AsyncHandle::cancel`].
pub fn spawn_interval<F>(period: Duration, mut tick: F) -> Box<dyn AsyncHandle>
where
    F: FnMut() + Send + 'static,
{
    spawn(async move {
        let start = tokio::time::Instant::now() + period;
        let mut interval = tokio::time::interval_at(start, period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            tick();
        }
    })
}

/// Default spawner implementations
pub mod spawners {
    use super::*;
    use tokio::task::JoinHandle;

    /// Tokio-based async spawner
    pub struct TokioSpawner;

    impl AsyncSpawner for TokioSpawner {
        fn spawn_boxed(
            &self,
            future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
        ) -> Box<dyn AsyncHandle> {
            let handle = tokio::spawn(future);
            Box::new(TokioHandle(handle))
        }
    }

    struct TokioHandle(JoinHandle<()>);

    impl AsyncHandle for TokioHandle {
        fn is_finished(&self) -> bool {
            self.0.is_finished()
        }

        fn cancel(&self) {
            self.0.abort();
        }
    }
}

/// Global runtime instance
static RUNTIME: std::sync::OnceLock<Box<dyn AsyncSpawner>> = std::sync::OnceLock::new();

/// Initialize the runtime with a specific spawner. Has no effect once a task
/// has been spawned.
pub fn init_runtime(spawner: Box<dyn AsyncSpawner>) {
    if RUNTIME.set(spawner).is_err() {
        log::warn!("runtime spawner already installed, keeping the existing one");
    }
}

/// Get the global runtime spawner
pub fn runtime() -> &'static dyn AsyncSpawner {
    RUNTIME
        .get_or_init(|| Box::new(spawners::TokioSpawner))
        .as_ref()
}
