// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Instant;

use tracing::{error, info, warn};
use zupsql_pool::{Launcher, TaskOutcome, TaskStatus, WorkerPool};
use zupsql_sql::Script;
use zupsql_type::{Error, ExecutionMode, Result};

use crate::Session;

/// Summary of a committed run.
#[derive(Debug)]
pub struct RunReport {
	pub mode: ExecutionMode,
	/// DROP statements executed on the held session.
	pub drops: usize,
	/// One outcome per generated statement that was executed.
	pub outcomes: Vec<TaskOutcome>,
	/// Most statements observed running at once.
	pub peak_in_flight: usize,
}

impl RunReport {
	pub fn failure_count(&self) -> usize {
		self.outcomes.iter().filter(|o| o.is_failure()).count()
	}
}

pub struct Coordinator<S: Session, L: Launcher> {
	session: S,
	pool: WorkerPool<L>,
	mode: ExecutionMode,
}

impl<S: Session, L: Launcher> Coordinator<S, L> {
	pub fn new(session: S, pool: WorkerPool<L>, mode: ExecutionMode) -> Self {
		Self {
			session,
			pool,
			mode,
		}
	}

	/// Applies `script` and closes the held session, whatever the result.
	pub async fn run(self, script: &Script) -> Result<RunReport> {
		let Self {
			mut session,
			pool,
			mode,
		} = self;

		let result = apply(&mut session, &pool, mode, script).await;

		if let Err(err) = session.close().await {
			warn!("closing the held session failed: {err}");
		}
		result
	}
}

async fn apply<S: Session, L: Launcher>(
	session: &mut S,
	pool: &WorkerPool<L>,
	mode: ExecutionMode,
	script: &Script,
) -> Result<RunReport> {
	session.execute("BEGIN").await?;

	for statement in &script.drops {
		info!("executing: {statement}");
		if let Err(err) = session.execute(statement).await {
			return Err(rollback(session, err).await);
		}
	}

	let (outcomes, peak_in_flight) = match mode {
		ExecutionMode::Parallel => {
			info!(
				"dispatching {} statement(s) to up to {} client(s)",
				script.statements.len(),
				pool.config().max_parallel.max(1)
			);
			let report = pool.run(script.statements.iter().cloned()).await;
			if let Some(halt) = report.halt {
				return Err(rollback(session, halt.into()).await);
			}
			(report.outcomes, report.peak_in_flight)
		}
		ExecutionMode::Sequential => {
			info!("executing {} statement(s) on the held session", script.statements.len());
			let mut outcomes = Vec::with_capacity(script.statements.len());
			for (index, statement) in script.statements.iter().enumerate() {
				let started = Instant::now();
				if let Err(err) = session.execute(statement).await {
					return Err(rollback(session, err).await);
				}
				info!("statement #{index} succeeded: {statement}");
				outcomes.push(TaskOutcome {
					index,
					command: statement.clone(),
					status: TaskStatus::Succeeded,
					stdout: String::new(),
					stderr: String::new(),
					elapsed: started.elapsed(),
				});
			}
			let peak = usize::from(!outcomes.is_empty());
			(outcomes, peak)
		}
	};

	session.execute("COMMIT").await?;

	let report = RunReport {
		mode,
		drops: script.drops.len(),
		outcomes,
		peak_in_flight,
	};
	match report.failure_count() {
		0 => info!("all SQL statements were executed successfully"),
		failed => warn!("transaction committed, {failed} pooled statement(s) failed and were not rolled back"),
	}
	Ok(report)
}

/// Rolls the held transaction back and hands `cause` back for the caller to
/// return.
async fn rollback<S: Session>(session: &mut S, cause: Error) -> Error {
	error!("error encountered: {cause}");
	match session.execute("ROLLBACK").await {
		Ok(()) => warn!("the transaction was rolled back"),
		Err(err) => error!("rollback failed: {err}"),
	}
	cause
}
