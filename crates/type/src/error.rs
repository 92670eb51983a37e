// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{io, path::PathBuf};

/// Every failure a zupsql run can report. All variants are fatal to the run;
/// a pooled task failing at runtime is only an error under
/// [`FailurePolicy::Abort`](crate::FailurePolicy::Abort).
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("no .ZUP file found to process")]
	NoCandidate,

	#[error("input file not found: {}", .0.display())]
	InputNotFound(PathBuf),

	#[error("input is not valid XML: {}: {reason}", .path.display())]
	MalformedDocument {
		path: PathBuf,
		reason: String,
	},

	#[error("no <SQL>, <CriarCampo> or <CriarIndice> tag found in {}", .0.display())]
	NoRecognizedNodes(PathBuf),

	#[error("could not create output file {}: {source}", .path.display())]
	OutputCreation {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("database connection failed: {0}")]
	Connection(String),

	#[error("invalid configuration: {0}")]
	Config(String),

	#[error("invalid data type `{data_type}` for column {table}.{column}")]
	InvalidDataType {
		table: String,
		column: String,
		data_type: String,
	},

	#[error("invalid {attribute} `{value}` for column {table}.{column}: expected decimal digits")]
	InvalidSize {
		table: String,
		column: String,
		attribute: &'static str,
		value: String,
	},

	#[error("statement failed on the held session: {statement}: {reason}")]
	Statement {
		statement: String,
		reason: String,
	},

	#[error("failed to launch task #{index} for `{command}`: {source}")]
	TaskLaunch {
		index: usize,
		command: String,
		#[source]
		source: io::Error,
	},

	#[error("task #{index} for `{command}` failed: {detail}")]
	TaskFailed {
		index: usize,
		command: String,
		detail: String,
	},

	#[error("ledger {}: {source}", .path.display())]
	Ledger {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

impl Error {
	/// Process exit code reported for this error.
	pub fn exit_code(&self) -> u8 {
		1
	}

	/// True for failures raised after the held transaction was opened, which
	/// the coordinator answers with a rollback.
	pub fn is_rollback(&self) -> bool {
		matches!(self, Error::Statement { .. } | Error::TaskLaunch { .. } | Error::TaskFailed { .. })
	}
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_launch_error_message() {
		let err = Error::TaskLaunch {
			index: 4,
			command: "SELECT 1;".to_string(),
			source: io::Error::new(io::ErrorKind::NotFound, "psql: not found"),
		};
		assert_eq!(err.to_string(), "failed to launch task #4 for `SELECT 1;`: psql: not found");
		assert!(err.is_rollback());
		assert_eq!(err.exit_code(), 1);
	}

	#[test]
	fn test_discovery_errors_are_not_rollbacks() {
		assert!(!Error::NoCandidate.is_rollback());
		assert!(!Error::InputNotFound(PathBuf::from("a.ZUP")).is_rollback());
		assert_eq!(Error::NoRecognizedNodes(PathBuf::from("a.ZUP")).to_string(),
			"no <SQL>, <CriarCampo> or <CriarIndice> tag found in a.ZUP");
	}
}
