// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Run configuration.
//!
//! A [`Config`] is assembled once at startup from built-in defaults, an
//! optional `.env` file, the process environment and command-line overrides,
//! and is then handed by reference to every component that needs it.

mod connection;
mod env;

use std::{path::PathBuf, time::Duration};

pub use connection::{ConnectionConfig, Password};
pub use env::load_dotenv;
use zupsql_type::{ExecutionMode, FailurePolicy, Result};

pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_MAX_PARALLEL: usize = 4;
pub const DEFAULT_CLIENT: &str = "psql";

#[derive(Debug, Clone)]
pub struct Config {
	pub connection: ConnectionConfig,
	/// Child tag of `<SQL>` nodes emitted for this database engine.
	pub dialect: String,
	/// Upper bound of simultaneously running client processes.
	pub max_parallel: usize,
	pub mode: ExecutionMode,
	pub failure_policy: FailurePolicy,
	/// Pooled tasks still running after this long are killed. `None` waits
	/// forever.
	pub task_timeout: Option<Duration>,
	/// SQL client program launched for every pooled statement.
	pub client_program: PathBuf,
	/// Directory holding inputs, generated scripts, the ledger and the log.
	pub work_dir: PathBuf,
}

impl Config {
	/// Reads the configuration from the process environment.
	pub fn from_env(work_dir: impl Into<PathBuf>) -> Result<Self> {
		Self::from_lookup(work_dir, |key| std::env::var(key).ok())
	}

	/// Reads the configuration through `lookup`, which maps a variable name
	/// to its value.
	///
	/// `DB_TYPE` may be left unset here for a command-line override to fill
	/// in; call [`Config::validate`] once every override has been applied.
	pub fn from_lookup<F>(work_dir: impl Into<PathBuf>, lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let vars = env::Vars::new(lookup);

		let connection = ConnectionConfig {
			host: vars.required("DB_HOST")?,
			port: vars.parsed("DB_PORT")?.unwrap_or(DEFAULT_PORT),
			database: vars.required("DB_NAME")?,
			user: vars.required("DB_USER")?,
			password: Password::new(vars.optional("DB_PASSWORD").unwrap_or_default()),
		};

		let max_parallel = vars.parsed::<usize>("ZUP_MAX_PARALLEL")?.unwrap_or(DEFAULT_MAX_PARALLEL);
		if max_parallel == 0 {
			return Err(zupsql_type::Error::Config("ZUP_MAX_PARALLEL must be at least 1".to_string()));
		}

		let task_timeout = match vars.parsed::<u64>("ZUP_TASK_TIMEOUT_SECS")? {
			None | Some(0) => None,
			Some(secs) => Some(Duration::from_secs(secs)),
		};

		Ok(Self {
			connection,
			dialect: vars.optional("DB_TYPE").unwrap_or_default(),
			max_parallel,
			mode: vars.parsed("ZUP_EXECUTION_MODE")?.unwrap_or_default(),
			failure_policy: vars.parsed("ZUP_ON_TASK_FAILURE")?.unwrap_or_default(),
			task_timeout,
			client_program: vars.optional("ZUP_CLIENT").unwrap_or_else(|| DEFAULT_CLIENT.to_string()).into(),
			work_dir: work_dir.into(),
		})
	}

	/// Checks the assembled configuration: at least one worker and a dialect
	/// from either `DB_TYPE` or an override.
	pub fn validate(&self) -> Result<()> {
		if self.max_parallel == 0 {
			return Err(zupsql_type::Error::Config("ZUP_MAX_PARALLEL must be at least 1".to_string()));
		}
		if self.dialect.trim().is_empty() {
			return Err(zupsql_type::Error::Config("no dialect configured, set DB_TYPE or pass --dialect".to_string()));
		}
		Ok(())
	}
}
