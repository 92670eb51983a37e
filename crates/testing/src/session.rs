// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};

use parking_lot::Mutex;
use zupsql_transaction::Session;
use zupsql_type::{Error, Result};

/// [`Session`] that records every statement it is given.
///
/// Clones share the log, so a test can inspect it after the coordinator has
/// consumed its handle.
#[derive(Clone, Default)]
pub struct RecordingSession {
	statements: Arc<Mutex<Vec<String>>>,
	failing_on: Option<String>,
	closed: Arc<AtomicBool>,
}

impl RecordingSession {
	pub fn new() -> Self {
		Self::default()
	}

	/// Statements containing `pattern` are recorded, then fail.
	pub fn failing_on(mut self, pattern: impl Into<String>) -> Self {
		self.failing_on = Some(pattern.into());
		self
	}

	pub fn statements(&self) -> Vec<String> {
		self.statements.lock().clone()
	}

	pub fn is_closed(&self) -> bool {
		self.closed.load(Ordering::SeqCst)
	}
}

impl Session for RecordingSession {
	async fn execute(&mut self, sql: &str) -> Result<()> {
		self.statements.lock().push(sql.to_string());
		match &self.failing_on {
			Some(pattern) if sql.contains(pattern.as_str()) => Err(Error::Statement {
				statement: sql.to_string(),
				reason: "relation is locked".to_string(),
			}),
			_ => Ok(()),
		}
	}

	async fn close(self) -> Result<()> {
		self.closed.store(true, Ordering::SeqCst);
		Ok(())
	}
}
