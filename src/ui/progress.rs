//! Progress bar for server calls that take a while without reporting progress.
//!
//! The bar moves at a fixed speed towards an expected duration and stalls at
//! 100 % until the call returns.

use crate::{
    runtime::{self, AsyncHandle},
    ui::traits::ProgressView,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Fraction of `expected` covered after `elapsed`, capped at 1.
pub fn estimate(elapsed: Duration, expected: Duration) -> f64 {
    if expected.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / expected.as_secs_f64()).min(1.0)
}

pub struct ProgressTracker {
    view: Arc<dyn ProgressView>,
    tick: Duration,
    finish_delay: Duration,
    timer: Mutex<Option<Box<dyn AsyncHandle>>>,
}

impl ProgressTracker {
    pub fn new(view: Arc<dyn ProgressView>, tick: Duration, finish_delay: Duration) -> Self {
        Self {
            view,
            tick,
            finish_delay,
            timer: Mutex::new(None),
        }
    }

    /// Show the bar titled `title` and start moving it.
    pub fn run(&self, title: &str, expected: Duration) {
        self.stop_timer();
        self.view.show(title);
        self.view.set_progress(0.0);

        let view = self.view.clone();
        let started = Instant::now();
        let handle = runtime::spawn_interval(self.tick, move || {
            view.set_progress(estimate(started.elapsed(), expected));
        });
        if let Ok(mut timer) = self.timer.lock() {
            *timer = Some(handle);
        }
    }

    /// Jump to 100 %, keep it on screen for a moment, then hide it.
    pub async fn finish(&self) {
        self.stop_timer();
        self.view.set_progress(1.0);
        tokio::time::sleep(self.finish_delay).await;
        self.view.hide();
    }

    /// Hide the bar right away.
    pub fn dismiss(&self) {
        self.stop_timer();
        self.view.hide();
    }

    pub fn is_running(&self) -> bool {
        self.timer
            .lock()
            .map(|timer| timer.as_ref().map_or(false, |t| !t.is_finished()))
            .unwrap_or(false)
    }

    fn stop_timer(&self) {
        if let Ok(mut timer) = self.timer.lock() {
            if let Some(handle) = timer.take() {
                handle.cancel();
            }
        }
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.stop_timer();
    }
}
