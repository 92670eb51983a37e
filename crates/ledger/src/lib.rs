// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Work directory bookkeeping.
//!
//! A work directory holds the `.ZUP` inputs, the generated `.sql` scripts,
//! the [`Ledger`] of inputs already handed to a run and the run log.

mod discover;
mod ledger;

use std::path::{Path, PathBuf};

pub use discover::{discover, select};
pub use ledger::Ledger;

/// Ledger of processed inputs, one file name per line.
pub const LEDGER_FILE: &str = "processed_files.txt";
/// Append-only run log.
pub const LOG_FILE: &str = "process_log.txt";
/// Extension of descriptor files, matched exactly.
pub const INPUT_EXTENSION: &str = "ZUP";

/// Where the script generated from `input` is written: `<work_dir>/<stem>.sql`.
pub fn output_path(work_dir: &Path, input: &Path) -> PathBuf {
	let stem = input.file_stem().unwrap_or(input.as_os_str());
	let mut name = stem.to_os_string();
	name.push(".sql");
	work_dir.join(name)
}

/// Name under which `input` is recorded in the ledger.
pub fn ledger_name(input: &Path) -> String {
	match input.file_name() {
		Some(name) => name.to_string_lossy().into_owned(),
		None => input.to_string_lossy().into_owned(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_output_path() {
		assert_eq!(output_path(Path::new("/srv/zup"), Path::new("cliente.ZUP")), PathBuf::from("/srv/zup/cliente.sql"));
		assert_eq!(
			output_path(Path::new("/srv/zup"), Path::new("/tmp/in/v2.1-pedido.ZUP")),
			PathBuf::from("/srv/zup/v2.1-pedido.sql")
		);
		assert_eq!(output_path(Path::new("out"), Path::new("noext")), PathBuf::from("out/noext.sql"));
	}

	#[test]
	fn test_ledger_name() {
		assert_eq!(ledger_name(Path::new("/srv/zup/cliente.ZUP")), "cliente.ZUP");
		assert_eq!(ledger_name(Path::new("pedido.ZUP")), "pedido.ZUP");
	}
}
