// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexSet;
use zupsql_descriptor::SchemaChangeDocument;

use crate::emit::emit_drop_table;

/// Tables touched by field additions and index creations, deduplicated in
/// first-seen order. Field additions are scanned before index creations;
/// dialect SQL never contributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableDropSet {
	tables: IndexSet<String>,
}

impl TableDropSet {
	pub fn plan(doc: &SchemaChangeDocument) -> Self {
		let fields = doc.fields.iter().map(|f| f.table.as_str());
		let indexes = doc.indexes.iter().map(|i| i.table_name.as_str());

		let tables = fields
			.chain(indexes)
			// a nameless table cannot be dropped
			.filter(|table| !table.is_empty())
			.map(str::to_string)
			.collect();

		Self {
			tables,
		}
	}

	pub fn len(&self) -> usize {
		self.tables.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}

	pub fn contains(&self, table: &str) -> bool {
		self.tables.contains(table)
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.tables.iter().map(String::as_str)
	}

	/// `DROP TABLE IF EXISTS <table> CASCADE;` for every table, in plan order.
	pub fn statements(&self) -> Vec<String> {
		self.iter().map(emit_drop_table).collect()
	}
}

#[cfg(test)]
mod tests {
	use zupsql_descriptor::{DialectSql, FieldAddition, IndexCreation};

	use super::*;

	fn field(table: &str) -> FieldAddition {
		FieldAddition {
			table: table.to_string(),
			column: "C".to_string(),
			data_type: "INTEGER".to_string(),
			..FieldAddition::default()
		}
	}

	fn index(table: &str) -> IndexCreation {
		IndexCreation {
			index_name: format!("IDX_{table}"),
			table_name: table.to_string(),
			unique: false,
			columns: vec!["C".to_string()],
		}
	}

	#[test]
	fn test_each_table_once_in_first_seen_order() {
		let doc = SchemaChangeDocument {
			fields: vec![field("PEDIDO"), field("CLIENTE"), field("PEDIDO")],
			indexes: vec![index("ITEM"), index("CLIENTE"), index("ITEM")],
			dialect_sql: vec![],
		};
		let plan = TableDropSet::plan(&doc);
		assert_eq!(plan.iter().collect::<Vec<_>>(), vec!["PEDIDO", "CLIENTE", "ITEM"]);
		assert_eq!(plan.len(), 3);
	}

	#[test]
	fn test_index_tables_after_field_tables() {
		let doc = SchemaChangeDocument {
			fields: vec![field("B")],
			indexes: vec![index("A")],
			dialect_sql: vec![],
		};
		assert_eq!(
			TableDropSet::plan(&doc).statements(),
			vec!["DROP TABLE IF EXISTS B CASCADE;", "DROP TABLE IF EXISTS A CASCADE;"]
		);
	}

	#[test]
	fn test_dialect_sql_never_contributes() {
		let mut sql = DialectSql::default();
		sql.statements.insert("postgres".to_string(), "CREATE TABLE LOG (ID INTEGER);".to_string());
		let doc = SchemaChangeDocument {
			fields: vec![],
			indexes: vec![],
			dialect_sql: vec![sql],
		};
		let plan = TableDropSet::plan(&doc);
		assert!(plan.is_empty());
		assert!(!plan.contains("LOG"));
	}

	#[test]
	fn test_nameless_tables_skipped() {
		let doc = SchemaChangeDocument {
			fields: vec![field(""), field("CLIENTE")],
			indexes: vec![index("")],
			dialect_sql: vec![],
		};
		assert_eq!(TableDropSet::plan(&doc).iter().collect::<Vec<_>>(), vec!["CLIENTE"]);
	}
}
