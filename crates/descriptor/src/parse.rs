// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fs, io,
	path::{Path, PathBuf},
};

use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;
use zupsql_type::{Error, Result};

use crate::{DialectSql, FieldAddition, IndexCreation, SchemaChangeDocument};

const FIELD_ADDITION: &str = "CriarCampo";
const INDEX_CREATION: &str = "CriarIndice";
const INDEX_COLUMN: &str = "Campo";
const DIALECT_SQL: &str = "SQL";

/// Attribute value meaning "yes" for `Null` and `Unique`.
const FLAG_SET: &str = "S";

impl SchemaChangeDocument {
	/// Reads and parses the descriptor at `path`.
	pub fn load(path: &Path) -> Result<Self> {
		let bytes = fs::read(path).map_err(|err| match err.kind() {
			io::ErrorKind::NotFound => Error::InputNotFound(path.to_path_buf()),
			_ => Error::MalformedDocument {
				path: path.to_path_buf(),
				reason: err.to_string(),
			},
		})?;
		Self::parse_at(&decode(path, bytes), path)
	}

	/// Parses descriptor text that did not come from a file.
	pub fn parse(text: &str) -> Result<Self> {
		Self::parse_at(text, Path::new("<memory>"))
	}

	fn parse_at(text: &str, path: &Path) -> Result<Self> {
		let options = ParsingOptions {
			allow_dtd: true,
			..ParsingOptions::default()
		};
		let doc = Document::parse_with_options(text, options).map_err(|err| Error::MalformedDocument {
			path: PathBuf::from(path),
			reason: err.to_string(),
		})?;

		let mut result = SchemaChangeDocument::default();
		for node in doc.descendants().filter(Node::is_element) {
			match node.tag_name().name() {
				FIELD_ADDITION => result.fields.push(field_addition(node)),
				INDEX_CREATION => result.indexes.push(index_creation(node)),
				DIALECT_SQL => result.dialect_sql.push(dialect_sql(node)),
				_ => {}
			}
		}

		debug!(
			fields = result.fields.len(),
			indexes = result.indexes.len(),
			dialect_sql = result.dialect_sql.len(),
			"parsed descriptor {}",
			path.display()
		);
		Ok(result)
	}
}

/// Descriptors exported by older tools are Latin-1; anything that is not
/// valid UTF-8 is read as such.
fn decode(path: &Path, bytes: Vec<u8>) -> String {
	match String::from_utf8(bytes) {
		Ok(text) => text,
		Err(err) => {
			debug!("{} is not UTF-8, reading as Latin-1", path.display());
			err.into_bytes().into_iter().map(char::from).collect()
		}
	}
}

fn attribute(node: Node, name: &str) -> String {
	node.attribute(name).unwrap_or_default().to_string()
}

/// All direct text of `node`, trimmed. Comments and child elements split
/// the text into several nodes; their pieces are joined.
fn text(node: Node) -> String {
	let joined: String = node.children().filter(Node::is_text).filter_map(|child| child.text()).collect();
	joined.trim().to_string()
}

fn flag(node: Node, name: &str) -> bool {
	node.attribute(name) == Some(FLAG_SET)
}

fn field_addition(node: Node) -> FieldAddition {
	FieldAddition {
		table: attribute(node, "NomeTabela"),
		column: attribute(node, "NomeCampo"),
		data_type: attribute(node, "TipoDado"),
		size: attribute(node, "Tamanho"),
		precision: attribute(node, "Precisao"),
		nullable: flag(node, "Null"),
		default: attribute(node, "Default"),
		comment: attribute(node, "Comentario"),
	}
}

fn index_creation(node: Node) -> IndexCreation {
	IndexCreation {
		index_name: attribute(node, "NomeIndice"),
		table_name: attribute(node, "NomeTabela"),
		unique: flag(node, "Unique"),
		columns: node
			.children()
			.filter(|child| child.has_tag_name(INDEX_COLUMN))
			.map(text)
			.collect(),
	}
}

fn dialect_sql(node: Node) -> DialectSql {
	let mut result = DialectSql::default();
	for child in node.children().filter(Node::is_element) {
		// first child wins for a repeated dialect
		result.statements.entry(child.tag_name().name().to_string()).or_insert_with(|| text(child));
	}
	result
}

#[cfg(test)]
mod tests {
	use super::*;

	const DESCRIPTOR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Atualizacao versao="12">
	<Tabelas>
		<CriarCampo NomeTabela="CLIENTE" NomeCampo="IDADE" TipoDado="INTEGER" Null="S"/>
		<CriarCampo NomeTabela="CLIENTE" NomeCampo="SALDO" TipoDado="NUMERIC" Tamanho="10" Precisao="2"
			Null="N" Default="0" Comentario="Saldo atual"/>
	</Tabelas>
	<CriarIndice NomeIndice="IDX1" NomeTabela="CLIENTE" Unique="S">
		<Campo>NOME</Campo>
		<Campo> IDADE </Campo>
	</CriarIndice>
	<SQL>
		<postgres>
			UPDATE CLIENTE SET IDADE = 0;
		</postgres>
		<oracle>UPDATE CLIENTE SET IDADE = 0</oracle>
		<postgres>SELECT 1;</postgres>
	</SQL>
</Atualizacao>"#;

	#[test]
	fn test_parse_all_node_kinds() {
		let doc = SchemaChangeDocument::parse(DESCRIPTOR).unwrap();
		assert_eq!(doc.node_count(), 4);

		assert_eq!(
			doc.fields[0],
			FieldAddition {
				table: "CLIENTE".to_string(),
				column: "IDADE".to_string(),
				data_type: "INTEGER".to_string(),
				nullable: true,
				..FieldAddition::default()
			}
		);

		let saldo = &doc.fields[1];
		assert_eq!(saldo.size, "10");
		assert_eq!(saldo.precision, "2");
		assert!(!saldo.nullable);
		assert_eq!(saldo.default, "0");
		assert_eq!(saldo.comment, "Saldo atual");

		let index = &doc.indexes[0];
		assert_eq!(index.index_name, "IDX1");
		assert_eq!(index.table_name, "CLIENTE");
		assert!(index.unique);
		assert_eq!(index.columns, vec!["NOME", "IDADE"]);
	}

	#[test]
	fn test_dialect_first_child_wins() {
		let doc = SchemaChangeDocument::parse(DESCRIPTOR).unwrap();
		let sql = &doc.dialect_sql[0];
		assert_eq!(sql.get("postgres"), Some("UPDATE CLIENTE SET IDADE = 0;"));
		assert_eq!(sql.get("oracle"), Some("UPDATE CLIENTE SET IDADE = 0"));
		assert_eq!(sql.get("mssql"), None);
	}

	#[test]
	fn test_comments_do_not_cut_text() {
		let doc = SchemaChangeDocument::parse(
			r#"<Atualizacao>
	<CriarIndice NomeIndice="IDX2" NomeTabela="CLIENTE"><Campo>NO<!--x-->ME</Campo></CriarIndice>
	<SQL><postgres>UPDATE CLIENTE<!-- ativa --> SET ATIVO = 1 WHERE ID = 2</postgres></SQL>
	<SQL><postgres>DELETE FROM X<!-- c --> WHERE ID = 1<![CDATA[ AND A < 2]]></postgres></SQL>
</Atualizacao>"#,
		)
		.unwrap();

		assert_eq!(doc.indexes[0].columns, vec!["NOME"]);
		assert_eq!(doc.dialect_sql[0].get("postgres"), Some("UPDATE CLIENTE SET ATIVO = 1 WHERE ID = 2"));
		assert_eq!(doc.dialect_sql[1].get("postgres"), Some("DELETE FROM X WHERE ID = 1 AND A < 2"));
	}

	#[test]
	fn test_flags_other_than_s_are_false() {
		let doc = SchemaChangeDocument::parse(
			r#"<Z><CriarCampo Null="s"/><CriarIndice Unique="SIM"/><CriarIndice/></Z>"#,
		)
		.unwrap();
		assert!(!doc.fields[0].nullable);
		assert!(!doc.indexes[0].unique);
		assert!(!doc.indexes[1].unique);
		assert!(doc.indexes[1].columns.is_empty());
	}

	#[test]
	fn test_unrecognized_document_is_empty() {
		let doc = SchemaChangeDocument::parse("<Atualizacao><Outro/></Atualizacao>").unwrap();
		assert!(doc.is_empty());
	}

	#[test]
	fn test_malformed() {
		let err = SchemaChangeDocument::parse("<Atualizacao><CriarCampo></Atualizacao>").unwrap_err();
		assert!(matches!(err, Error::MalformedDocument { .. }));
	}

	#[test]
	fn test_latin1_fallback() {
		let bytes = b"<Z><CriarCampo NomeTabela=\"CLIENTE\" Comentario=\"Endere\xe7o\"/></Z>".to_vec();
		let text = decode(Path::new("a.ZUP"), bytes);
		let doc = SchemaChangeDocument::parse(&text).unwrap();
		assert_eq!(doc.fields[0].comment, "Endereço");
	}
}
