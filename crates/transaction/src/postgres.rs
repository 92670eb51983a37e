// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, error, info};
use zupsql_config::ConnectionConfig;
use zupsql_type::{Error, Result};

use crate::Session;

/// Held session on a PostgreSQL server.
pub struct PostgresSession {
	client: Client,
	connection: JoinHandle<()>,
}

impl PostgresSession {
	pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
		let mut pg = tokio_postgres::Config::new();
		pg.host(&config.host)
			.port(config.port)
			.dbname(&config.database)
			.user(&config.user)
			.application_name("zupsql");
		if !config.password.is_empty() {
			pg.password(config.password.expose());
		}

		let (client, connection) = pg.connect(NoTls).await.map_err(|err| Error::Connection(err.to_string()))?;

		let connection = tokio::spawn(async move {
			if let Err(err) = connection.await {
				error!("database connection error: {err}");
			}
		});

		info!("database connection established to {}:{}/{}", config.host, config.port, config.database);
		Ok(Self {
			client,
			connection,
		})
	}
}

impl Session for PostgresSession {
	async fn execute(&mut self, sql: &str) -> Result<()> {
		debug!("executing on held session: {sql}");
		self.client.batch_execute(sql).await.map_err(|err| Error::Statement {
			statement: sql.to_string(),
			reason: match err.as_db_error() {
				Some(db) => db.message().to_string(),
				None => err.to_string(),
			},
		})
	}

	async fn close(self) -> Result<()> {
		drop(self.client);
		self.connection.await.map_err(|err| Error::Connection(err.to_string()))
	}
}
