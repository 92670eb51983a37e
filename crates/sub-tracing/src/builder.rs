// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fs::{File, OpenOptions},
	io,
	path::{Path, PathBuf},
	sync::Mutex,
};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use zupsql_type::{Error, Result};

use crate::LineFormat;

const DEFAULT_FILTER: &str = "info";

/// Builder for the global subscriber.
pub struct TracingBuilder {
	filter: Option<String>,
	console: bool,
	log_file: Option<PathBuf>,
}

impl TracingBuilder {
	/// Console output only, filtered by `RUST_LOG` or `info`.
	pub fn new() -> Self {
		Self {
			filter: None,
			console: true,
			log_file: None,
		}
	}

	/// Uses `directives` instead of `RUST_LOG`.
	pub fn with_filter(mut self, directives: impl Into<String>) -> Self {
		self.filter = Some(directives.into());
		self
	}

	pub fn without_console(mut self) -> Self {
		self.console = false;
		self
	}

	/// Also appends every line to `path`, creating it if needed.
	pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
		self.log_file = Some(path.into());
		self
	}

	/// Installs the subscriber. Fails if one is already installed.
	pub fn init(self) -> Result<()> {
		let filter = match &self.filter {
			Some(directives) => EnvFilter::try_new(directives)
				.map_err(|err| Error::Config(format!("invalid log filter `{directives}`: {err}")))?,
			None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
		};

		let console = self.console.then(|| fmt::layer().event_format(LineFormat).with_writer(io::stdout));

		let file = match &self.log_file {
			Some(path) => {
				let file = open_log_file(path).map_err(|source| Error::OutputCreation {
					path: path.clone(),
					source,
				})?;
				Some(fmt::layer().event_format(LineFormat).with_ansi(false).with_writer(Mutex::new(file)))
			}
			None => None,
		};

		tracing_subscriber::registry()
			.with(filter)
			.with(console)
			.with(file)
			.try_init()
			.map_err(|err| Error::Config(format!("tracing already initialized: {err}")))
	}
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self::new()
	}
}

fn open_log_file(path: &Path) -> io::Result<File> {
	OpenOptions::new().create(true).append(true).open(path)
}
