// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	io,
	time::Duration,
};

use zupsql_type::Error;

use crate::TaskExit;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
	/// Exited with code 0 and wrote nothing to stderr.
	Succeeded,
	/// Exited non-zero, or exited zero but wrote to stderr.
	Failed(TaskExit),
	/// Still running when the task timeout elapsed; it was killed.
	TimedOut(Duration),
	/// Waiting for the task or reading its output failed.
	Errored(String),
}

impl Display for TaskStatus {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			TaskStatus::Succeeded => f.write_str("succeeded"),
			TaskStatus::Failed(exit) if exit.success() => f.write_str("failed: wrote to stderr"),
			TaskStatus::Failed(exit) => write!(f, "failed: {exit}"),
			TaskStatus::TimedOut(after) => write!(f, "timed out after {after:?}"),
			TaskStatus::Errored(reason) => write!(f, "errored: {reason}"),
		}
	}
}

/// What happened to one launched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
	/// Position of the command in the batch, starting at 0.
	pub index: usize,
	pub command: String,
	pub status: TaskStatus,
	pub stdout: String,
	pub stderr: String,
	pub elapsed: Duration,
}

impl TaskOutcome {
	pub fn is_failure(&self) -> bool {
		self.status != TaskStatus::Succeeded
	}

	/// Short description used in logs and errors.
	pub fn detail(&self) -> String {
		let stderr = self.stderr.trim();
		if stderr.is_empty() {
			self.status.to_string()
		} else {
			format!("{}: {stderr}", self.status)
		}
	}
}

/// Why the pool stopped dispatching before the batch was exhausted.
#[derive(Debug)]
pub enum Halt {
	Launch {
		index: usize,
		command: String,
		error: io::Error,
	},
	TaskFailed {
		index: usize,
		command: String,
		detail: String,
	},
}

impl From<Halt> for Error {
	fn from(halt: Halt) -> Self {
		match halt {
			Halt::Launch {
				index,
				command,
				error,
			} => Error::TaskLaunch {
				index,
				command,
				source: error,
			},
			Halt::TaskFailed {
				index,
				command,
				detail,
			} => Error::TaskFailed {
				index,
				command,
				detail,
			},
		}
	}
}

#[derive(Debug, Default)]
pub struct PoolReport {
	/// One entry per launched task, in completion order.
	pub outcomes: Vec<TaskOutcome>,
	/// Most tasks observed in flight at the same time.
	pub peak_in_flight: usize,
	pub halt: Option<Halt>,
}

impl PoolReport {
	pub fn launched(&self) -> usize {
		self.outcomes.len()
	}

	pub fn failures(&self) -> impl Iterator<Item = &TaskOutcome> {
		self.outcomes.iter().filter(|o| o.is_failure())
	}

	pub fn failure_count(&self) -> usize {
		self.failures().count()
	}

	/// Outcomes ordered by batch position instead of completion.
	pub fn sorted(&self) -> Vec<&TaskOutcome> {
		let mut result: Vec<_> = self.outcomes.iter().collect();
		result.sort_by_key(|o| o.index);
		result
	}
}
