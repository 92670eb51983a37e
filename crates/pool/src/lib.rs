// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Runs generated statements as independent external client processes, with
//! at most `max_parallel` of them alive at any time.
//!
//! The pool only sees the [`Launcher`] / [`PooledTask`] abstraction;
//! [`ClientLauncher`] is the process-backed implementation used in
//! production.

mod client;
mod outcome;
mod pool;
mod task;

pub use client::{ClientLauncher, ClientTask};
pub use outcome::{Halt, PoolReport, TaskOutcome, TaskStatus};
pub use pool::{PoolConfig, WorkerPool};
pub use task::{Launcher, PooledTask, TaskExit, TaskOutput};
