// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fs, path::Path};

use tracing::debug;
use zupsql_descriptor::SchemaChangeDocument;
use zupsql_type::{Error, Result};

use crate::{
	TableDropSet,
	emit::{emit_dialect_sql, emit_field_addition, emit_index_creation},
};

/// Everything a descriptor turns into: the drop statements executed first on
/// the held session, and the generated statements in emission order (field
/// additions, index creations, dialect SQL).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
	pub drops: Vec<String>,
	pub statements: Vec<String>,
}

impl Script {
	pub fn generate(doc: &SchemaChangeDocument, dialect: &str) -> Result<Self> {
		let drops = TableDropSet::plan(doc).statements();

		let mut statements = Vec::with_capacity(doc.node_count());
		for field in &doc.fields {
			statements.push(emit_field_addition(field)?);
		}
		for index in &doc.indexes {
			statements.push(emit_index_creation(index));
		}

		let mut skipped = 0;
		for sql in &doc.dialect_sql {
			match emit_dialect_sql(sql, dialect) {
				Some(statement) => statements.push(statement),
				None => skipped += 1,
			}
		}
		if skipped > 0 {
			debug!("{skipped} <SQL> node(s) have no statement for dialect {dialect}");
		}

		Ok(Self {
			drops,
			statements,
		})
	}

	/// The script file contents: one generated statement per line. Drops are
	/// not part of the file.
	///
	/// Dialect SQL spanning several lines keeps its line breaks, so such a
	/// statement occupies several lines of the file. Its text may hold `--`
	/// comments or multi-line literals that folding would break.
	pub fn render(&self) -> String {
		let mut result = String::new();
		for statement in &self.statements {
			result.push_str(statement);
			result.push('\n');
		}
		result
	}

	pub fn write(&self, path: &Path) -> Result<()> {
		fs::write(path, self.render()).map_err(|source| Error::OutputCreation {
			path: path.to_path_buf(),
			source,
		})
	}
}
