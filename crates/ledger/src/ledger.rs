// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fs::{self, OpenOptions},
	io::{self, Write},
	path::{Path, PathBuf},
};

use indexmap::IndexSet;
use tracing::debug;
use zupsql_type::{Error, Result};

use crate::LEDGER_FILE;

/// Append-only list of inputs that have been handed to a run.
///
/// An input is recorded before it is parsed, so a file that fails later is
/// still skipped by the next discovery.
#[derive(Debug)]
pub struct Ledger {
	path: PathBuf,
	entries: IndexSet<String>,
}

impl Ledger {
	/// Reads the ledger at `path`. A missing file is an empty ledger; blank
	/// lines are ignored.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
		let path = path.into();
		let entries = match fs::read_to_string(&path) {
			Ok(text) => text.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string).collect(),
			Err(err) if err.kind() == io::ErrorKind::NotFound => IndexSet::new(),
			Err(source) => {
				return Err(Error::Ledger {
					path,
					source,
				});
			}
		};
		debug!("ledger {} lists {} processed file(s)", path.display(), entries.len());
		Ok(Self {
			path,
			entries,
		})
	}

	/// Opens the ledger kept in `work_dir`.
	pub fn in_dir(work_dir: &Path) -> Result<Self> {
		Self::open(work_dir.join(LEDGER_FILE))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains(name)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(String::as_str)
	}

	/// Appends `name` to the ledger file.
	pub fn record(&mut self, name: &str) -> Result<()> {
		let mut file = OpenOptions::new().create(true).append(true).open(&self.path).map_err(|source| {
			Error::Ledger {
				path: self.path.clone(),
				source,
			}
		})?;
		writeln!(file, "{name}").map_err(|source| Error::Ledger {
			path: self.path.clone(),
			source,
		})?;
		self.entries.insert(name.to_string());
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use zupsql_testing::TempDir;

	use super::*;

	#[test]
	fn test_missing_file_is_empty() {
		let dir = TempDir::new().unwrap();
		let ledger = Ledger::in_dir(dir.path()).unwrap();
		assert!(ledger.is_empty());
		assert!(!ledger.contains("a.ZUP"));
		assert_eq!(ledger.path(), dir.path().join(LEDGER_FILE));
	}

	#[test]
	fn test_blank_lines_are_ignored() {
		let dir = TempDir::new().unwrap();
		let path = dir.write(LEDGER_FILE, "a.ZUP\n\n  \nb.ZUP\r\n").unwrap();

		let ledger = Ledger::open(&path).unwrap();
		assert_eq!(ledger.iter().collect::<Vec<_>>(), vec!["a.ZUP", "b.ZUP"]);
		assert_eq!(ledger.len(), 2);
	}
}
