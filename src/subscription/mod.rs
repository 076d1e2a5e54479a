// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Change notification for the state mirror.
//!
//! [`DeviceStateStore`](crate::state::DeviceStateStore) notifies every
//! subscriber after a write. The synchronization controller is one such
//! subscriber; hosts may register their own to push updates to the platform.

mod callback;

pub use callback::{ChangeListeners, SubscriptionId};
