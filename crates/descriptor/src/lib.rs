// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! ZUP schema-change descriptors.
//!
//! A ZUP document is XML carrying three kinds of recognized elements, found at
//! any depth:
//!
//! ```xml
//! <CriarCampo NomeTabela="CLIENTE" NomeCampo="IDADE" TipoDado="INTEGER" Null="S"/>
//! <CriarIndice NomeIndice="IDX1" NomeTabela="CLIENTE" Unique="S">
//!     <Campo>NOME</Campo>
//! </CriarIndice>
//! <SQL><postgres>UPDATE CLIENTE SET IDADE = 0;</postgres></SQL>
//! ```

mod node;
mod parse;

pub use node::{DialectSql, FieldAddition, IndexCreation, SchemaChangeDocument};
