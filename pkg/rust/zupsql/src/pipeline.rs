// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::PathBuf;

use tracing::{info, warn};
use zupsql_config::Config;
use zupsql_descriptor::SchemaChangeDocument;
use zupsql_ledger::{Ledger, ledger_name, output_path, select};
use zupsql_pool::{ClientLauncher, Launcher, PoolConfig, WorkerPool};
use zupsql_sql::Script;
use zupsql_transaction::{Coordinator, PostgresSession, RunReport, Session};
use zupsql_type::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
	/// Descriptor to process. `None` picks the first unprocessed `.ZUP` file
	/// in the work directory.
	pub input: Option<PathBuf>,
	/// Stop after writing the script.
	pub dry_run: bool,
}

/// A descriptor turned into a script that has been written to disk.
#[derive(Debug)]
pub struct Prepared {
	pub input: PathBuf,
	pub output: PathBuf,
	pub script: Script,
}

#[derive(Debug)]
pub struct RunSummary {
	pub input: PathBuf,
	pub output: PathBuf,
	pub drops: usize,
	pub statements: usize,
	/// `None` for a dry run.
	pub report: Option<RunReport>,
}

/// Processes one descriptor end to end against the configured database.
pub async fn run(config: &Config, options: &RunOptions) -> Result<RunSummary> {
	let prepared = prepare(config, options)?;
	if options.dry_run {
		info!("dry run, the database was not touched");
		return Ok(summarize(prepared, None));
	}

	let session = PostgresSession::connect(&config.connection).await?;
	let launcher = ClientLauncher::psql(&config.client_program, &config.connection);
	execute(config, prepared, session, launcher).await
}

/// Selects the input, records it in the ledger, parses it and writes the
/// generated script next to the other work files.
pub fn prepare(config: &Config, options: &RunOptions) -> Result<Prepared> {
	config.validate()?;
	let mut ledger = Ledger::in_dir(&config.work_dir)?;

	let input = match &options.input {
		Some(input) => input.clone(),
		None => select(&config.work_dir, &ledger)?,
	};
	if !input.is_file() {
		return Err(Error::InputNotFound(input));
	}

	info!("processing file {}", input.display());
	ledger.record(&ledger_name(&input))?;

	let doc = SchemaChangeDocument::load(&input)?;
	if doc.is_empty() {
		return Err(Error::NoRecognizedNodes(input));
	}

	let script = Script::generate(&doc, &config.dialect)?;
	let output = output_path(&config.work_dir, &input);
	script.write(&output)?;

	info!("SQL script written to {}", output.display());
	info!(
		"{} statement(s) generated, {} table(s) to drop before execution",
		script.statements.len(),
		script.drops.len()
	);

	Ok(Prepared {
		input,
		output,
		script,
	})
}

/// Applies a prepared script on `session`, running pooled statements
/// through `launcher`.
pub async fn execute<S, L>(config: &Config, prepared: Prepared, session: S, launcher: L) -> Result<RunSummary>
where
	S: Session,
	L: Launcher,
{
	let pool = WorkerPool::new(
		launcher,
		PoolConfig {
			max_parallel: config.max_parallel,
			failure_policy: config.failure_policy,
			task_timeout: config.task_timeout,
		},
	);

	info!("executing in {} mode, failed statements are handled with policy {}", config.mode, config.failure_policy);
	let report = Coordinator::new(session, pool, config.mode).run(&prepared.script).await?;

	match report.failure_count() {
		0 => info!("{} processed successfully", prepared.input.display()),
		failed => warn!("{} processed, {failed} statement(s) failed", prepared.input.display()),
	}
	Ok(summarize(prepared, Some(report)))
}

fn summarize(prepared: Prepared, report: Option<RunReport>) -> RunSummary {
	RunSummary {
		drops: prepared.script.drops.len(),
		statements: prepared.script.statements.len(),
		input: prepared.input,
		output: prepared.output,
		report,
	}
}
