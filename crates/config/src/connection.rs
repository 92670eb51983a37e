// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Debug, Formatter};

/// Where the held session and every pooled client connect to.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
	pub host: String,
	pub port: u16,
	pub database: String,
	pub user: String,
	pub password: Password,
}

/// Database password. Never rendered by `Debug`.
#[derive(Clone, Default)]
pub struct Password(String);

impl Password {
	pub fn new(password: impl Into<String>) -> Self {
		Self(password.into())
	}

	pub fn expose(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl Debug for Password {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str("Password(***)")
	}
}
