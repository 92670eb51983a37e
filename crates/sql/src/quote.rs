// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Escaping for values embedded into generated SQL.

use std::borrow::Cow;

/// Renders `value` as a single-quoted string literal, doubling embedded
/// quotes.
pub fn literal(value: &str) -> String {
	let mut result = String::with_capacity(value.len() + 2);
	result.push('\'');
	for c in value.chars() {
		if c == '\'' {
			result.push('\'');
		}
		result.push(c);
	}
	result.push('\'');
	result
}

/// Renders a possibly schema-qualified name. Each dot-separated part that is
/// a plain identifier is kept verbatim, so `CLIENTE` and `public.CLIENTE`
/// come out unchanged; any other part is double-quoted.
pub fn identifier(name: &str) -> Cow<'_, str> {
	if name.split('.').all(is_plain) {
		return Cow::Borrowed(name);
	}
	Cow::Owned(name.split('.').map(quote_part).collect::<Vec<_>>().join("."))
}

fn is_plain(part: &str) -> bool {
	let mut chars = part.chars();
	match chars.next() {
		// empty names are passed through
		None => true,
		Some(first) if first.is_alphabetic() || first == '_' => {
			chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
		}
		Some(_) => false,
	}
}

fn quote_part(part: &str) -> Cow<'_, str> {
	if is_plain(part) {
		return Cow::Borrowed(part);
	}
	Cow::Owned(format!("\"{}\"", part.replace('"', "\"\"")))
}

/// Data types may only use letters, digits, `_`, spaces and array brackets,
/// e.g. `DOUBLE PRECISION` or `INTEGER[]`.
pub fn is_data_type(value: &str) -> bool {
	value.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ' ' | '[' | ']'))
}

pub fn is_digits(value: &str) -> bool {
	value.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_literal() {
		assert_eq!(literal("0"), "'0'");
		assert_eq!(literal(""), "''");
		assert_eq!(literal("D'Ávila"), "'D''Ávila'");
		assert_eq!(literal("'; DROP TABLE CLIENTE; --"), "'''; DROP TABLE CLIENTE; --'");
	}

	#[test]
	fn test_plain_identifiers_unchanged() {
		assert_eq!(identifier("CLIENTE"), "CLIENTE");
		assert_eq!(identifier("public.CLIENTE"), "public.CLIENTE");
		assert_eq!(identifier("_tmp$1"), "_tmp$1");
		assert_eq!(identifier("DESCRIÇÃO"), "DESCRIÇÃO");
		assert_eq!(identifier(""), "");
		assert!(matches!(identifier("CLIENTE"), Cow::Borrowed(_)));
	}

	#[test]
	fn test_other_identifiers_quoted() {
		assert_eq!(identifier("DATA NASC"), "\"DATA NASC\"");
		assert_eq!(identifier("1COL"), "\"1COL\"");
		assert_eq!(identifier("x\"y"), "\"x\"\"y\"");
		assert_eq!(identifier("public.MY TABLE"), "public.\"MY TABLE\"");
		assert_eq!(identifier("CLIENTE; DROP TABLE X"), "\"CLIENTE; DROP TABLE X\"");
	}

	#[test]
	fn test_data_type() {
		assert!(is_data_type("INTEGER"));
		assert!(is_data_type("DOUBLE PRECISION"));
		assert!(is_data_type("TEXT[]"));
		assert!(is_data_type(""));
		assert!(!is_data_type("INTEGER; DROP TABLE X"));
		assert!(!is_data_type("VARCHAR(10)"));
	}

	#[test]
	fn test_digits() {
		assert!(is_digits("10"));
		assert!(is_digits(""));
		assert!(!is_digits("1,5"));
		assert!(!is_digits("-1"));
	}
}
