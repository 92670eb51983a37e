// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fmt::Display, path::Path, str::FromStr};

use tracing::debug;
use zupsql_type::{Error, Result};

/// Loads `.env` from `dir` into the process environment. Variables that are
/// already set keep their value; a missing file is not an error.
pub fn load_dotenv(dir: &Path) -> Result<()> {
	let path = dir.join(".env");
	match dotenvy::from_path(&path) {
		Ok(()) => {
			debug!("loaded environment from {}", path.display());
			Ok(())
		}
		Err(err) if err.not_found() => Ok(()),
		Err(err) => Err(Error::Config(format!("{}: {err}", path.display()))),
	}
}

pub(crate) struct Vars<F> {
	lookup: F,
}

impl<F> Vars<F>
where
	F: Fn(&str) -> Option<String>,
{
	pub(crate) fn new(lookup: F) -> Self {
		Self {
			lookup,
		}
	}

	/// Returns the trimmed value, treating blank as unset.
	pub(crate) fn optional(&self, key: &str) -> Option<String> {
		(self.lookup)(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
	}

	pub(crate) fn required(&self, key: &str) -> Result<String> {
		self.optional(key).ok_or_else(|| Error::Config(format!("{key} is not set")))
	}

	pub(crate) fn parsed<T>(&self, key: &str) -> Result<Option<T>>
	where
		T: FromStr,
		T::Err: Display,
	{
		match self.optional(key) {
			None => Ok(None),
			Some(raw) => raw.parse::<T>().map(Some).map_err(|err| Error::Config(format!("{key}=`{raw}`: {err}"))),
		}
	}
}
