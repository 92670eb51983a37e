// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod wait;

pub use wait::{DEFAULT_TIMEOUT, wait_for};
