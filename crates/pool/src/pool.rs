// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	sync::{
		Arc, OnceLock,
		atomic::{AtomicUsize, Ordering},
	},
	time::{Duration, Instant},
};

use tokio::{
	sync::{OwnedSemaphorePermit, Semaphore},
	task::{JoinError, JoinSet},
	time,
};
use tracing::{debug, error, info, warn};
use zupsql_type::FailurePolicy;

use crate::{Halt, Launcher, PoolReport, PooledTask, TaskOutcome, TaskOutput, TaskStatus};

#[derive(Debug, Clone)]
pub struct PoolConfig {
	/// Maximum number of tasks in flight. Values below 1 are treated as 1.
	pub max_parallel: usize,
	pub failure_policy: FailurePolicy,
	/// Kill tasks that run longer than this. Reading a task's output after
	/// it exited or was killed gets the same limit, so a grandchild holding
	/// the pipes open cannot stall the pool.
	pub task_timeout: Option<Duration>,
}

impl Default for PoolConfig {
	fn default() -> Self {
		Self {
			max_parallel: 4,
			failure_policy: FailurePolicy::Record,
			task_timeout: None,
		}
	}
}

/// Dispatches commands to a [`Launcher`] with admission control.
///
/// A semaphore with `max_parallel` permits guards every launch. Each launched
/// task is drained on its own tokio task that holds the permit until the
/// task's output has been collected, so no more than `max_parallel` tasks are
/// ever unfinished. There is no ordering between tasks in flight.
pub struct WorkerPool<L: Launcher> {
	launcher: Arc<L>,
	config: PoolConfig,
}

#[derive(Default)]
struct Gauge {
	in_flight: AtomicUsize,
	peak: AtomicUsize,
}

impl Gauge {
	fn enter(&self) {
		let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
		self.peak.fetch_max(now, Ordering::SeqCst);
	}

	fn leave(&self) {
		self.in_flight.fetch_sub(1, Ordering::SeqCst);
	}
}

/// State shared between the dispatcher and the drain tasks of one batch.
struct Shared {
	config: PoolConfig,
	gauge: Gauge,
	/// First runtime failure; only set under [`FailurePolicy::Abort`].
	first_failure: OnceLock<(usize, String, String)>,
}

impl<L: Launcher> WorkerPool<L> {
	pub fn new(launcher: L, config: PoolConfig) -> Self {
		Self {
			launcher: Arc::new(launcher),
			config,
		}
	}

	pub fn config(&self) -> &PoolConfig {
		&self.config
	}

	pub fn launcher(&self) -> &L {
		&self.launcher
	}

	/// Runs every command and waits for all launched tasks to finish.
	///
	/// A launch failure stops dispatch and is reported as [`Halt::Launch`];
	/// under [`FailurePolicy::Abort`] the first failed task stops dispatch
	/// as [`Halt::TaskFailed`]. Tasks already running are always drained,
	/// never killed.
	pub async fn run<I, S>(&self, commands: I) -> PoolReport
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let max_parallel = self.config.max_parallel.max(1);
		let permits = Arc::new(Semaphore::new(max_parallel));
		let shared = Arc::new(Shared {
			config: self.config.clone(),
			gauge: Gauge::default(),
			first_failure: OnceLock::new(),
		});

		let mut tasks = JoinSet::new();
		let mut report = PoolReport::default();

		for (index, command) in commands.into_iter().enumerate() {
			let Ok(permit) = permits.clone().acquire_owned().await else {
				break;
			};

			while let Some(joined) = tasks.try_join_next() {
				record(&mut report, joined);
			}

			if let Some((index, command, detail)) = shared.first_failure.get() {
				warn!("task #{index} failed, no further statements are dispatched");
				report.halt = Some(Halt::TaskFailed {
					index: *index,
					command: command.clone(),
					detail: detail.clone(),
				});
				break;
			}

			let command = command.into();
			match self.launcher.launch(&command) {
				Ok(task) => {
					shared.gauge.enter();
					debug!("launched task #{index}: {command}");
					tasks.spawn(drain(index, command, task, permit, shared.clone()));
				}
				Err(err) => {
					error!("failed to launch task #{index} for {command}: {err}");
					report.halt = Some(Halt::Launch {
						index,
						command,
						error: err,
					});
					break;
				}
			}
		}

		while let Some(joined) = tasks.join_next().await {
			record(&mut report, joined);
		}

		if report.halt.is_none() {
			if let Some((index, command, detail)) = shared.first_failure.get() {
				report.halt = Some(Halt::TaskFailed {
					index: *index,
					command: command.clone(),
					detail: detail.clone(),
				});
			}
		}

		report.peak_in_flight = shared.gauge.peak.load(Ordering::SeqCst);
		report
	}
}

fn record(report: &mut PoolReport, joined: Result<TaskOutcome, JoinError>) {
	match joined {
		Ok(outcome) => {
			log_outcome(&outcome);
			report.outcomes.push(outcome);
		}
		Err(err) => error!("drain task did not complete: {err}"),
	}
}

fn log_outcome(outcome: &TaskOutcome) {
	let TaskOutcome {
		index,
		command,
		status,
		stdout,
		stderr,
		elapsed,
	} = outcome;

	if outcome.is_failure() {
		warn!("task #{index} {status} after {elapsed:?}: {command}");
	} else {
		info!("task #{index} {status} after {elapsed:?}: {command}");
	}
	if !stdout.trim().is_empty() {
		info!("task #{index} output: {}", stdout.trim_end());
	}
	if !stderr.trim().is_empty() {
		warn!("task #{index} error output: {}", stderr.trim_end());
	}
}

async fn drain<T: PooledTask>(
	index: usize,
	command: String,
	mut task: T,
	permit: OwnedSemaphorePermit,
	shared: Arc<Shared>,
) -> TaskOutcome {
	let started = Instant::now();

	let exited = match shared.config.task_timeout {
		Some(limit) => time::timeout(limit, task.wait()).await.ok(),
		None => Some(task.wait().await),
	};

	let mut status = match exited {
		Some(Ok(exit)) => TaskStatus::Failed(exit),
		Some(Err(err)) => TaskStatus::Errored(err.to_string()),
		None => {
			let limit = shared.config.task_timeout.unwrap_or_default();
			if let Err(err) = task.kill().await {
				error!("failed to kill task #{index} after {limit:?}: {err}");
			}
			TaskStatus::TimedOut(limit)
		}
	};

	let collected = match shared.config.task_timeout {
		Some(limit) => time::timeout(limit, task.collect_output()).await.map_err(|_| limit),
		None => Ok(task.collect_output().await),
	};

	let output = match collected {
		Ok(Ok(output)) => output,
		Ok(Err(err)) => {
			if !matches!(status, TaskStatus::Errored(_)) {
				status = TaskStatus::Errored(format!("reading output: {err}"));
			}
			TaskOutput::default()
		}
		Err(limit) => {
			warn!("task #{index} kept its output open for {limit:?} after exiting, output discarded");
			if !matches!(status, TaskStatus::TimedOut(_)) {
				status = TaskStatus::Errored(format!("output still open after {limit:?}"));
			}
			TaskOutput::default()
		}
	};

	if let TaskStatus::Failed(exit) = status {
		if exit.success() && output.stderr.trim().is_empty() {
			status = TaskStatus::Succeeded;
		}
	}

	let outcome = TaskOutcome {
		index,
		command,
		status,
		stdout: output.stdout,
		stderr: output.stderr,
		elapsed: started.elapsed(),
	};

	if outcome.is_failure() && shared.config.failure_policy == FailurePolicy::Abort {
		let _ = shared.first_failure.set((outcome.index, outcome.command.clone(), outcome.detail()));
	}

	shared.gauge.leave();
	drop(permit);
	outcome
}
