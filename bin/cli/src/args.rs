// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use zupsql::{Config, ExecutionMode, FailurePolicy, Result, RunOptions};

const LONG_ABOUT: &str = "\
Translates a ZUP schema-change descriptor into a SQL script and applies it to PostgreSQL.

Every table touched by the descriptor is dropped inside a transaction on one held
connection. In parallel mode the generated statements then run in separate psql
sessions that the transaction does not cover: a rollback undoes the drops only,
and statements that already ran stay applied. Use --mode sequential to run
everything inside the held transaction, or --on-task-failure abort to stop
dispatching after the first failed statement.

Connection settings are read from the environment or a .env file in the work
directory: DB_HOST, DB_PORT, DB_NAME, DB_USER, DB_PASSWORD and DB_TYPE.";

#[derive(Parser, Debug)]
#[command(name = "zupsql", version, about = "Apply ZUP schema-change descriptors to PostgreSQL", long_about = LONG_ABOUT)]
pub struct Cli {
	/// Descriptor to process; defaults to the first unprocessed .ZUP file in
	/// the work directory
	pub input: Option<PathBuf>,

	/// Child tag of <SQL> nodes to emit (overrides DB_TYPE)
	#[arg(long)]
	pub dialect: Option<String>,

	/// Maximum number of concurrent psql processes (overrides ZUP_MAX_PARALLEL)
	#[arg(short = 'j', long = "parallel", value_parser = clap::value_parser!(u16).range(1..))]
	pub parallel: Option<u16>,

	/// parallel or sequential (overrides ZUP_EXECUTION_MODE)
	#[arg(long)]
	pub mode: Option<ExecutionMode>,

	/// record or abort (overrides ZUP_ON_TASK_FAILURE)
	#[arg(long = "on-task-failure")]
	pub on_task_failure: Option<FailurePolicy>,

	/// Kill statements running longer than this many seconds; 0 disables
	/// the limit (overrides ZUP_TASK_TIMEOUT_SECS)
	#[arg(long = "task-timeout", value_name = "SECS")]
	pub task_timeout: Option<u64>,

	/// SQL client program (overrides ZUP_CLIENT)
	#[arg(long)]
	pub client: Option<PathBuf>,

	/// Directory holding inputs, scripts, the ledger and the log
	#[arg(short = 'C', long = "work-dir", default_value = ".")]
	pub work_dir: PathBuf,

	/// Write the script without touching the database
	#[arg(long = "dry-run")]
	pub dry_run: bool,
}

impl Cli {
	/// Reads the environment through `lookup`, applies the command-line
	/// overrides and validates the result.
	pub fn resolve<F>(&self, lookup: F) -> Result<Config>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut config = Config::from_lookup(&self.work_dir, lookup)?;
		self.apply(&mut config);
		config.validate()?;
		Ok(config)
	}

	/// Applies command-line overrides on top of the environment.
	pub fn apply(&self, config: &mut Config) {
		if let Some(dialect) = &self.dialect {
			config.dialect = dialect.clone();
		}
		if let Some(parallel) = self.parallel {
			config.max_parallel = usize::from(parallel);
		}
		if let Some(mode) = self.mode {
			config.mode = mode;
		}
		if let Some(policy) = self.on_task_failure {
			config.failure_policy = policy;
		}
		if let Some(secs) = self.task_timeout {
			config.task_timeout = (secs > 0).then(|| Duration::from_secs(secs));
		}
		if let Some(client) = &self.client {
			config.client_program = client.clone();
		}
	}

	pub fn options(&self) -> RunOptions {
		RunOptions {
			input: self.input.clone(),
			dry_run: self.dry_run,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	fn config() -> Config {
		let vars: HashMap<&str, &str> =
			HashMap::from([("DB_HOST", "localhost"), ("DB_NAME", "erp"), ("DB_USER", "admin"), ("DB_TYPE", "postgres")]);
		Config::from_lookup(".", move |key: &str| vars.get(key).map(|v| v.to_string())).unwrap()
	}

	#[test]
	fn test_no_arguments_keeps_environment() {
		let cli = Cli::try_parse_from(["zupsql"]).unwrap();
		let mut config = config();
		cli.apply(&mut config);

		assert_eq!(config.max_parallel, 4);
		assert_eq!(config.mode, ExecutionMode::Parallel);
		assert_eq!(cli.work_dir, PathBuf::from("."));
		assert_eq!(cli.options().input, None);
		assert!(!cli.options().dry_run);
	}

	#[test]
	fn test_overrides() {
		let cli = Cli::try_parse_from([
			"zupsql",
			"cliente.ZUP",
			"--dialect",
			"oracle",
			"-j",
			"8",
			"--mode",
			"Sequential",
			"--on-task-failure",
			"abort",
			"--task-timeout",
			"0",
			"--client",
			"/opt/pg/bin/psql",
			"--dry-run",
		])
		.unwrap();
		let mut config = config();
		config.task_timeout = Some(Duration::from_secs(30));
		cli.apply(&mut config);

		assert_eq!(config.dialect, "oracle");
		assert_eq!(config.max_parallel, 8);
		assert_eq!(config.mode, ExecutionMode::Sequential);
		assert_eq!(config.failure_policy, FailurePolicy::Abort);
		assert_eq!(config.task_timeout, None);
		assert_eq!(config.client_program, PathBuf::from("/opt/pg/bin/psql"));
		assert_eq!(cli.options().input, Some(PathBuf::from("cliente.ZUP")));
		assert!(cli.options().dry_run);
	}

	#[test]
	fn test_dialect_flag_supplies_missing_db_type() {
		let vars: HashMap<&str, &str> = HashMap::from([("DB_HOST", "localhost"), ("DB_NAME", "erp"), ("DB_USER", "admin")]);
		let lookup = move |key: &str| vars.get(key).map(|v| v.to_string());

		let cli = Cli::try_parse_from(["zupsql", "--dialect", "postgres"]).unwrap();
		let config = cli.resolve(&lookup).unwrap();
		assert_eq!(config.dialect, "postgres");

		let cli = Cli::try_parse_from(["zupsql"]).unwrap();
		assert!(matches!(cli.resolve(&lookup), Err(zupsql::Error::Config(_))));
	}

	#[test]
	fn test_rejects_zero_parallelism_and_unknown_mode() {
		assert!(Cli::try_parse_from(["zupsql", "-j", "0"]).is_err());
		assert!(Cli::try_parse_from(["zupsql", "--mode", "eventually"]).is_err());
	}
}
