// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! SQL synthesis for ZUP descriptors: one statement per descriptor node, plus
//! the `DROP TABLE` statements that clear every touched table beforehand.

pub mod emit;
pub mod plan;
pub mod quote;
mod script;

pub use emit::{emit_dialect_sql, emit_drop_table, emit_field_addition, emit_index_creation};
pub use plan::TableDropSet;
pub use script::Script;
