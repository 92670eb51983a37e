// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;

/// `<CriarCampo>`: adds one column to an existing table.
///
/// Absent attributes are empty strings. `precision` only matters when `size`
/// is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAddition {
	pub table: String,
	pub column: String,
	pub data_type: String,
	pub size: String,
	pub precision: String,
	pub nullable: bool,
	pub default: String,
	pub comment: String,
}

/// `<CriarIndice>`: creates an index over `columns`, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexCreation {
	pub index_name: String,
	pub table_name: String,
	pub unique: bool,
	pub columns: Vec<String>,
}

/// `<SQL>`: raw statement text keyed by dialect identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialectSql {
	pub statements: IndexMap<String, String>,
}

impl DialectSql {
	pub fn get(&self, dialect: &str) -> Option<&str> {
		self.statements.get(dialect).map(String::as_str)
	}
}

/// Every recognized node of one descriptor, grouped by kind. Each group keeps
/// document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaChangeDocument {
	pub fields: Vec<FieldAddition>,
	pub indexes: Vec<IndexCreation>,
	pub dialect_sql: Vec<DialectSql>,
}

impl SchemaChangeDocument {
	/// True when the descriptor contains none of the recognized elements.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty() && self.indexes.is_empty() && self.dialect_sql.is_empty()
	}

	pub fn node_count(&self) -> usize {
		self.fields.len() + self.indexes.len() + self.dialect_sql.len()
	}
}
