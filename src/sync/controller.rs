// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Debounced synchronization of the state mirror.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use crate::error::Error;
use crate::protocol::SyncTransport;
use crate::state::{DeviceStateStore, StateChange};
use crate::subscription::SubscriptionId;

use super::{Debouncer, WireParameters};

/// Counters describing synchronization outcomes.
///
/// Failures never reach the writer of a state change; these counters (and
/// the `warn` logs) are how an operator sees them.
#[derive(Debug, Default)]
pub struct SyncStats {
    attempted: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
}

impl SyncStats {
    /// Number of requests started.
    #[must_use]
    pub fn attempted(&self) -> u64 {
        self.attempted.load(Ordering::Relaxed)
    }

    /// Number of requests the appliance accepted.
    #[must_use]
    pub fn succeeded(&self) -> u64 {
        self.succeeded.load(Ordering::Relaxed)
    }

    /// Number of requests that failed.
    #[must_use]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

/// Pushes the state mirror to the appliance, coalescing bursts of writes.
///
/// The controller subscribes to its [`DeviceStateStore`] on construction.
/// Every write re-arms a [`Debouncer`]; when the window passes without a
/// further write, one request is sent with parameters derived from the
/// state at that moment. The controller never writes to the store.
///
/// Dropping the controller unsubscribes it and cancels a pending timer.
/// Requests already in flight run to completion.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use heater_cooler_bridge::protocol::HttpClient;
/// use heater_cooler_bridge::state::DeviceStateStore;
/// use heater_cooler_bridge::sync::SyncController;
/// use heater_cooler_bridge::types::CharacteristicValue;
///
/// # async fn example() -> heater_cooler_bridge::Result<()> {
/// let store = Arc::new(DeviceStateStore::default());
/// let transport = HttpClient::new("http://localhost:1337")?;
/// let _controller = SyncController::new(store.clone(), transport, Duration::from_millis(500))?;
///
/// // Three writes, one request
/// store.set("rotationSpeed", CharacteristicValue::Integer(1))?;
/// store.set("rotationSpeed", CharacteristicValue::Integer(3))?;
/// store.set("rotationSpeed", CharacteristicValue::Integer(2))?;
/// # Ok(())
/// # }
/// ```
pub struct SyncController<T: SyncTransport> {
    store: Arc<DeviceStateStore>,
    transport: Arc<T>,
    stats: Arc<SyncStats>,
    debouncer: Debouncer,
    subscription: SubscriptionId,
}

impl<T: SyncTransport> SyncController<T> {
    /// Creates a controller and subscribes it to `store`.
    ///
    /// Timers and requests run on the Tokio runtime current at this call,
    /// so the store may be written from any thread afterwards.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoRuntime` when called outside a Tokio runtime.
    pub fn new(
        store: Arc<DeviceStateStore>,
        transport: T,
        window: Duration,
    ) -> Result<Arc<Self>, Error> {
        let debouncer = Debouncer::new(window)?;

        Ok(Arc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            let subscription = store.subscribe(move |change| {
                if let Some(controller) = weak.upgrade() {
                    controller.on_state_changed(change);
                }
            });

            Self {
                store,
                transport: Arc::new(transport),
                stats: Arc::new(SyncStats::default()),
                debouncer,
                subscription,
            }
        }))
    }

    /// Handles a write to the store by re-arming the debounce timer.
    ///
    /// Nothing is sent here; the request carries the state as of timer
    /// expiry, not as of this call.
    pub fn on_state_changed(&self, change: &StateChange) {
        tracing::debug!(
            change = %change,
            window_ms = self.debouncer.window().as_millis(),
            "Scheduling synchronization"
        );

        let store = Arc::clone(&self.store);
        let transport = Arc::clone(&self.transport);
        let stats = Arc::clone(&self.stats);
        self.debouncer.arm(move || async move {
            flush(&store, transport.as_ref(), &stats).await;
        });
    }

    /// Sends the current state to the appliance now.
    ///
    /// This is what the debounce timer runs on expiry. Failures are logged
    /// and counted in [`stats`](Self::stats), never returned.
    pub async fn flush_sync(&self) {
        flush(&self.store, self.transport.as_ref(), &self.stats).await;
    }

    /// Returns synchronization counters.
    #[must_use]
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Returns the transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the debounce window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.debouncer.window()
    }

    /// Returns `true` if a synchronization is scheduled but not yet started.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

impl<T: SyncTransport> Drop for SyncController<T> {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}

impl<T: SyncTransport> std::fmt::Debug for SyncController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncController")
            .field("window", &self.debouncer.window())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

async fn flush<T: SyncTransport>(store: &DeviceStateStore, transport: &T, stats: &SyncStats) {
    let params = WireParameters::from_state(&store.snapshot());
    stats.attempted.fetch_add(1, Ordering::Relaxed);

    tracing::debug!(params = %params, "Synchronizing parameters");

    match transport.sync(&params).await {
        Ok(()) => {
            stats.succeeded.fetch_add(1, Ordering::Relaxed);
        }
        Err(error) => {
            stats.failed.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(error = %error, params = %params, "Synchronization failed");
        }
    }
}
