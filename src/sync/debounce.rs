// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-slot trailing-edge debouncer.

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::error::Error;

/// Runs an action once a quiet period has elapsed since the last trigger.
///
/// Each call to [`arm`](Self::arm) aborts the pending timer, if any, and
/// starts a new one. There is no maximum delay: triggers arriving faster
/// than the window postpone the action indefinitely.
///
/// When the timer expires the action is spawned as its own task. Re-arming
/// afterwards only cancels the timer, never an action that already started.
/// A trigger arriving at or after the deadline leaves the expired timer to
/// fire and starts a fresh window.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use heater_cooler_bridge::sync::Debouncer;
///
/// # #[tokio::main]
/// # async fn main() -> heater_cooler_bridge::Result<()> {
/// let debouncer = Debouncer::new(Duration::from_millis(10))?;
/// debouncer.arm(|| async { println!("fired once") });
/// debouncer.arm(|| async { println!("fired once") });
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    runtime: Handle,
    pending: Mutex<Option<PendingTimer>>,
}

#[derive(Debug)]
struct PendingTimer {
    deadline: Instant,
    handle: JoinHandle<()>,
}

impl Debouncer {
    /// Creates a debouncer on the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoRuntime` when called outside a Tokio runtime.
    pub fn new(window: Duration) -> Result<Self, Error> {
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        Ok(Self::with_handle(window, runtime))
    }

    /// Creates a debouncer that schedules on `runtime`.
    #[must_use]
    pub fn with_handle(window: Duration, runtime: Handle) -> Self {
        Self {
            window,
            runtime,
            pending: Mutex::new(None),
        }
    }

    /// Returns the quiet period.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedules `action` after the window, replacing any pending schedule.
    ///
    /// May be called from any thread.
    pub fn arm<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let runtime = self.runtime.clone();
        let deadline = Instant::now() + self.window;

        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take()
            && previous.deadline > Instant::now()
        {
            tracing::trace!(window_ms = self.window.as_millis(), "Re-arming debounce timer");
            previous.handle.abort();
        }

        let handle = self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            runtime.spawn(action());
        });
        *pending = Some(PendingTimer { deadline, handle });
    }

    /// Returns `true` if a timer is waiting to expire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|timer| !timer.handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(timer) = self.pending.get_mut().take() {
            timer.handle.abort();
        }
    }
}
