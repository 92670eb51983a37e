// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Types shared across the zupsql workspace: the error taxonomy every crate
//! reports through, and the policies selecting how a migration is executed.

pub mod error;
pub mod policy;

pub use error::{Error, Result};
pub use policy::{ExecutionMode, FailurePolicy};
