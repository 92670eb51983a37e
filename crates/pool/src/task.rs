// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	future::Future,
	io,
};

/// Starts one task per command.
pub trait Launcher: Send + Sync + 'static {
	type Task: PooledTask;

	/// Starts `command`. An error here is a launch failure, which halts the
	/// pool. Called from within the tokio runtime.
	fn launch(&self, command: &str) -> io::Result<Self::Task>;
}

/// A running task, owned by the pool from launch until its output has been
/// collected.
pub trait PooledTask: Send + 'static {
	/// Resolves once the task has exited.
	fn wait(&mut self) -> impl Future<Output = io::Result<TaskExit>> + Send;

	/// Terminates a task that outlived its timeout.
	fn kill(&mut self) -> impl Future<Output = io::Result<()>> + Send;

	/// Drains everything the task wrote. Called once, after the task exited
	/// or was killed.
	fn collect_output(self) -> impl Future<Output = io::Result<TaskOutput>> + Send;
}

/// Exit code of a finished task; `None` when it was terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskExit(pub Option<i32>);

impl TaskExit {
	pub const SUCCESS: TaskExit = TaskExit(Some(0));

	pub fn success(&self) -> bool {
		self.0 == Some(0)
	}
}

impl Display for TaskExit {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self.0 {
			Some(code) => write!(f, "exit code {code}"),
			None => f.write_str("terminated by signal"),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskOutput {
	pub stdout: String,
	pub stderr: String,
}
