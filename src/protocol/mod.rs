// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transports that push wire parameters to the remote appliance.
//!
//! # Transports
//!
//! - [`HttpClient`]: `GET <endpoint>/remote?power=&mode=&temp=&fan=`
//!
//! Any other transport (including test fakes) plugs into
//! [`SyncController`](crate::sync::SyncController) by implementing
//! [`SyncTransport`].

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use std::future::Future;

use crate::error::ProtocolError;
use crate::sync::WireParameters;

/// Capability to deliver one synchronization request.
///
/// Implementations perform a single best-effort attempt. Retrying is not
/// their job: the next state change triggers a fresh request anyway.
pub trait SyncTransport: Send + Sync + 'static {
    /// Sends `params` to the appliance.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails, times out, or the
    /// appliance answers with a failure status.
    fn sync(
        &self,
        params: &WireParameters,
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send;
}
