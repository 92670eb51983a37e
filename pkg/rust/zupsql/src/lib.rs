// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Translates ZUP schema-change descriptors into SQL scripts and applies
//! them to a PostgreSQL database.
//!
//! ```no_run
//! # async fn example() -> zupsql::Result<()> {
//! use zupsql::{Config, RunOptions, run};
//!
//! let config = Config::from_env(".")?;
//! config.validate()?;
//! let summary = run(&config, &RunOptions::default()).await?;
//! println!("{} statement(s) written to {}", summary.statements, summary.output.display());
//! # Ok(())
//! # }
//! ```

mod pipeline;

pub use pipeline::{Prepared, RunOptions, RunSummary, execute, prepare, run};
pub use zupsql_config as config;
pub use zupsql_config::Config;
pub use zupsql_descriptor as descriptor;
pub use zupsql_ledger as ledger;
pub use zupsql_pool as pool;
pub use zupsql_sql as sql;
pub use zupsql_sub_tracing as sub_tracing;
pub use zupsql_transaction as transaction;
pub use zupsql_type::{Error, ExecutionMode, FailurePolicy, Result};
