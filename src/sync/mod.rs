// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Synchronization of the state mirror with the remote appliance.
//!
//! - [`WireParameters`]: the query parameters derived from the mirror
//! - [`Debouncer`]: a cancel-and-replace timer
//! - [`SyncController`]: subscribes to the store and sends debounced requests

mod controller;
mod debounce;
mod wire;

pub use controller::{SyncController, SyncStats};
pub use debounce::Debouncer;
pub use wire::{Mode, WireParameters};
