// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	ffi::OsStr,
	fs,
	path::{Path, PathBuf},
};

use tracing::debug;
use zupsql_type::{Error, Result};

use crate::{INPUT_EXTENSION, Ledger};

/// `.ZUP` files in `dir` not yet listed in `ledger`, sorted by name.
pub fn discover(dir: &Path, ledger: &Ledger) -> Result<Vec<PathBuf>> {
	let read_err = |source| Error::Ledger {
		path: dir.to_path_buf(),
		source,
	};

	let mut result = Vec::new();
	for entry in fs::read_dir(dir).map_err(read_err)? {
		let entry = entry.map_err(read_err)?;
		let path = entry.path();

		if path.extension() != Some(OsStr::new(INPUT_EXTENSION)) {
			continue;
		}
		if !entry.file_type().map_err(read_err)?.is_file() {
			continue;
		}

		let name = entry.file_name().to_string_lossy().into_owned();
		if ledger.contains(&name) {
			debug!("skipping {name}: already processed");
			continue;
		}
		result.push(path);
	}

	result.sort();
	Ok(result)
}

/// The first unprocessed input in `dir`.
pub fn select(dir: &Path, ledger: &Ledger) -> Result<PathBuf> {
	discover(dir, ledger)?.into_iter().next().ok_or(Error::NoCandidate)
}
