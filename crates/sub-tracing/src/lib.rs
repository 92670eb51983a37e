// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Installs the global `tracing` subscriber.
//!
//! Every event is written as `[YYYYMMDD HH:MM:SS] message key=value` to
//! standard output and, when configured, appended to a log file.

mod builder;
mod format;

pub use builder::TracingBuilder;
pub use format::{LineFormat, TIMESTAMP_FORMAT};
