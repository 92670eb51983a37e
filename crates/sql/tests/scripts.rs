// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Every `scripts/<name>.ZUP` must render to exactly `scripts/<name>.sql`
//! for the `postgres` dialect.

use test_each_file::test_each_file;
use zupsql_descriptor::SchemaChangeDocument;
use zupsql_sql::Script;

test_each_file! { for ["ZUP", "sql"] in "crates/sql/tests/scripts" as scripts => test_script }

fn test_script([descriptor, expected]: [&str; 2]) {
	let doc = SchemaChangeDocument::parse(descriptor).expect("descriptor should parse");
	let script = Script::generate(&doc, "postgres").expect("descriptor should translate");
	assert_eq!(script.render(), expected);
}
