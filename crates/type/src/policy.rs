// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use crate::Error;

/// How generated statements reach the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
	/// Statements run through the worker pool, each in its own client
	/// session. The held transaction only brackets the DROP statements, so a
	/// rollback does not undo pooled statements that already ran.
	#[default]
	Parallel,
	/// Statements run one after another on the held session inside the
	/// transaction. Any failure rolls back everything.
	Sequential,
}

impl ExecutionMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			ExecutionMode::Parallel => "parallel",
			ExecutionMode::Sequential => "sequential",
		}
	}
}

impl Display for ExecutionMode {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ExecutionMode {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"parallel" => Ok(ExecutionMode::Parallel),
			"sequential" => Ok(ExecutionMode::Sequential),
			other => Err(Error::Config(format!(
				"unknown execution mode `{other}`, expected `parallel` or `sequential`"
			))),
		}
	}
}

/// What a runtime failure of a pooled task does to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
	/// Log the failure and keep dispatching; the run still commits.
	#[default]
	Record,
	/// Stop dispatching, drain running tasks and roll back.
	Abort,
}

impl FailurePolicy {
	pub fn as_str(&self) -> &'static str {
		match self {
			FailurePolicy::Record => "record",
			FailurePolicy::Abort => "abort",
		}
	}
}

impl Display for FailurePolicy {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for FailurePolicy {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"record" => Ok(FailurePolicy::Record),
			"abort" => Ok(FailurePolicy::Abort),
			other => Err(Error::Config(format!("unknown task failure policy `{other}`, expected `record` or `abort`"))),
		}
	}
}
