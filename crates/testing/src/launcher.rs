// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::HashMap,
	future, io,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use parking_lot::Mutex;
use tokio::time::sleep;
use zupsql_pool::{Launcher, PooledTask, TaskExit, TaskOutput};

/// How a scripted task behaves once launched.
#[derive(Debug, Clone, Default)]
pub struct Behavior {
	pub delay: Duration,
	pub exit_code: i32,
	pub stdout: String,
	pub stderr: String,
	/// Never exits on its own; only a kill ends it.
	pub hang: bool,
}

impl Behavior {
	pub fn succeed_after(delay: Duration) -> Self {
		Self {
			delay,
			..Self::default()
		}
	}

	pub fn exit(code: i32) -> Self {
		Self {
			exit_code: code,
			..Self::default()
		}
	}

	pub fn hang() -> Self {
		Self {
			hang: true,
			..Self::default()
		}
	}

	pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
		self.stdout = stdout.into();
		self
	}

	pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
		self.stderr = stderr.into();
		self
	}
}

/// In-process [`Launcher`] whose tasks follow a [`Behavior`] per command.
///
/// Clones share state, so a test keeps one handle and gives the other to the
/// pool.
#[derive(Clone, Default)]
pub struct ScriptedLauncher {
	inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
	default: Mutex<Behavior>,
	behaviors: Mutex<HashMap<String, Behavior>>,
	fail_launch_at: Mutex<Option<usize>>,
	attempts: AtomicUsize,
	launched: Mutex<Vec<String>>,
	running: AtomicUsize,
	peak: AtomicUsize,
	killed: AtomicUsize,
}

impl ScriptedLauncher {
	pub fn new() -> Self {
		Self::default()
	}

	/// Every command without its own behavior succeeds after `delay`.
	pub fn with_delay(self, delay: Duration) -> Self {
		*self.inner.default.lock() = Behavior::succeed_after(delay);
		self
	}

	pub fn on(self, command: impl Into<String>, behavior: Behavior) -> Self {
		self.inner.behaviors.lock().insert(command.into(), behavior);
		self
	}

	/// The launch attempt with this index, starting at 0, fails.
	pub fn fail_launch_at(self, attempt: usize) -> Self {
		*self.inner.fail_launch_at.lock() = Some(attempt);
		self
	}

	/// Commands successfully launched, in launch order.
	pub fn launched(&self) -> Vec<String> {
		self.inner.launched.lock().clone()
	}

	/// Tasks launched whose output has not been collected yet.
	pub fn running(&self) -> usize {
		self.inner.running.load(Ordering::SeqCst)
	}

	pub fn peak(&self) -> usize {
		self.inner.peak.load(Ordering::SeqCst)
	}

	pub fn killed(&self) -> usize {
		self.inner.killed.load(Ordering::SeqCst)
	}
}

impl Launcher for ScriptedLauncher {
	type Task = ScriptedTask;

	fn launch(&self, command: &str) -> io::Result<ScriptedTask> {
		let attempt = self.inner.attempts.fetch_add(1, Ordering::SeqCst);
		if *self.inner.fail_launch_at.lock() == Some(attempt) {
			return Err(io::Error::new(io::ErrorKind::NotFound, format!("cannot launch {command}")));
		}

		let behavior = match self.inner.behaviors.lock().get(command) {
			Some(behavior) => behavior.clone(),
			None => self.inner.default.lock().clone(),
		};

		self.inner.launched.lock().push(command.to_string());
		let now = self.inner.running.fetch_add(1, Ordering::SeqCst) + 1;
		self.inner.peak.fetch_max(now, Ordering::SeqCst);

		Ok(ScriptedTask {
			behavior,
			inner: self.inner.clone(),
			killed: false,
		})
	}
}

pub struct ScriptedTask {
	behavior: Behavior,
	inner: Arc<Inner>,
	killed: bool,
}

impl PooledTask for ScriptedTask {
	async fn wait(&mut self) -> io::Result<TaskExit> {
		if self.behavior.hang {
			future::pending::<()>().await;
		}
		sleep(self.behavior.delay).await;
		Ok(TaskExit(Some(self.behavior.exit_code)))
	}

	async fn kill(&mut self) -> io::Result<()> {
		self.killed = true;
		self.inner.killed.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}

	async fn collect_output(self) -> io::Result<TaskOutput> {
		self.inner.running.fetch_sub(1, Ordering::SeqCst);
		if self.killed {
			return Ok(TaskOutput::default());
		}
		Ok(TaskOutput {
			stdout: self.behavior.stdout,
			stderr: self.behavior.stderr,
		})
	}
}
