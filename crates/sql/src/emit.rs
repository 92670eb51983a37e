// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use zupsql_descriptor::{DialectSql, FieldAddition, IndexCreation};
use zupsql_type::Error;

use crate::quote::{identifier, is_data_type, is_digits, literal};

// ── CriarCampo → ALTER TABLE ... ADD COLUMN ─────────────────────────────

/// Emits `ALTER TABLE <table> ADD COLUMN <column> <type>[(size[, precision])]
/// NULL|NOT NULL [DEFAULT '<default>']`, followed on the same line by
/// `COMMENT ON COLUMN` when the field carries a comment.
pub fn emit_field_addition(field: &FieldAddition) -> Result<String, Error> {
	let table = identifier(&field.table);
	let column = identifier(&field.column);

	if !is_data_type(&field.data_type) {
		return Err(Error::InvalidDataType {
			table: field.table.clone(),
			column: field.column.clone(),
			data_type: field.data_type.clone(),
		});
	}
	let size = digits(field, "size", &field.size)?;
	let precision = digits(field, "precision", &field.precision)?;

	let mut result = format!("ALTER TABLE {table} ADD COLUMN {column} {}", field.data_type);

	// precision without a size is dropped
	if !size.is_empty() {
		result.push('(');
		result.push_str(size);
		if !precision.is_empty() {
			result.push_str(", ");
			result.push_str(precision);
		}
		result.push(')');
	}

	let nullability = if field.nullable {
		"NULL"
	} else {
		"NOT NULL"
	};
	result.push(' ');
	result.push_str(nullability);

	if !field.default.is_empty() {
		result.push_str(" DEFAULT ");
		result.push_str(&literal(&field.default));
	}

	if !field.comment.is_empty() {
		result.push_str(&format!("; COMMENT ON COLUMN {table}.{column} IS {}", literal(&field.comment)));
	}

	result.push(';');
	Ok(result)
}

fn digits<'a>(field: &FieldAddition, attribute: &'static str, value: &'a str) -> Result<&'a str, Error> {
	let trimmed = value.trim();
	if !is_digits(trimmed) {
		return Err(Error::InvalidSize {
			table: field.table.clone(),
			column: field.column.clone(),
			attribute,
			value: value.to_string(),
		});
	}
	Ok(trimmed)
}

// ── CriarIndice → CREATE INDEX ──────────────────────────────────────────

pub fn emit_index_creation(index: &IndexCreation) -> String {
	let unique = if index.unique {
		"UNIQUE "
	} else {
		""
	};
	let columns = index.columns.iter().map(|c| identifier(c)).collect::<Vec<_>>().join(", ");

	format!(
		"CREATE {unique}INDEX {} ON {} ({columns});",
		identifier(&index.index_name),
		identifier(&index.table_name)
	)
}

// ── SQL → raw dialect statement ─────────────────────────────────────────

/// Returns the statement written for `dialect`, or `None` when the node has
/// no non-blank child for it. The text, line breaks included, is passed
/// through untouched apart from a terminating `;`.
pub fn emit_dialect_sql(sql: &DialectSql, dialect: &str) -> Option<String> {
	let text = sql.get(dialect)?.trim();
	if text.is_empty() {
		return None;
	}
	if text.ends_with(';') {
		Some(text.to_string())
	} else {
		Some(format!("{text};"))
	}
}

// ── DROP TABLE ──────────────────────────────────────────────────────────

pub fn emit_drop_table(table: &str) -> String {
	format!("DROP TABLE IF EXISTS {} CASCADE;", identifier(table))
}
