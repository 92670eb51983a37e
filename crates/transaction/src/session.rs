// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::future::Future;

use zupsql_type::Result;

/// A database connection the coordinator can run statements on.
pub trait Session: Send {
	/// Runs `sql`, which may hold several `;`-separated statements. Failures
	/// are reported as [`Error::Statement`](zupsql_type::Error::Statement).
	fn execute(&mut self, sql: &str) -> impl Future<Output = Result<()>> + Send;

	/// Closes the connection.
	fn close(self) -> impl Future<Output = Result<()>> + Send
	where
		Self: Sized;
}
