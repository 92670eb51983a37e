// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Applies a generated [`Script`](zupsql_sql::Script) to the database.
//!
//! The [`Coordinator`] owns one held [`Session`] for the whole run. It opens a
//! transaction, runs the DROP statements on it and then executes the
//! generated statements according to the
//! [`ExecutionMode`](zupsql_type::ExecutionMode).
//!
//! In parallel mode every generated statement runs in its own client
//! session, outside the held transaction. COMMIT and ROLLBACK only cover the
//! DROP statements; a rollback after a failed launch leaves every statement
//! that already ran applied. Sequential mode runs everything inside the held
//! transaction instead.

mod coordinator;
mod postgres;
mod session;

pub use coordinator::{Coordinator, RunReport};
pub use postgres::PostgresSession;
pub use session::Session;
