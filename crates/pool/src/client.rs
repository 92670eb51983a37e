// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	ffi::OsString,
	io,
	path::{Path, PathBuf},
	process::Stdio,
};

use tokio::{
	io::{AsyncRead, AsyncReadExt},
	process::{Child, Command},
	task::JoinHandle,
};
use zupsql_config::ConnectionConfig;

use crate::{Launcher, PooledTask, TaskExit, TaskOutput};

/// Launches `<program> <args...> <command>` for every statement.
///
/// stdin is closed. stdout and stderr are read concurrently while the
/// process runs, so a client that writes a lot cannot stall on a full pipe.
#[derive(Debug, Clone)]
pub struct ClientLauncher {
	program: PathBuf,
	args: Vec<OsString>,
	envs: Vec<(OsString, OsString)>,
}

impl ClientLauncher {
	pub fn new(program: impl Into<PathBuf>) -> Self {
		Self {
			program: program.into(),
			args: Vec::new(),
			envs: Vec::new(),
		}
	}

	pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
		self.args.push(arg.into());
		self
	}

	pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
		self.envs.push((key.into(), value.into()));
		self
	}

	/// `psql` connecting with `connection`, one statement per invocation.
	///
	/// The password travels in the child's `PGPASSWORD` variable; `-w` keeps
	/// psql from ever prompting for one.
	pub fn psql(program: impl Into<PathBuf>, connection: &ConnectionConfig) -> Self {
		let launcher = Self::new(program)
			.arg("-X")
			.arg("-q")
			.arg("-w")
			.arg("-v")
			.arg("ON_ERROR_STOP=1")
			.arg("-h")
			.arg(&connection.host)
			.arg("-p")
			.arg(connection.port.to_string())
			.arg("-U")
			.arg(&connection.user)
			.arg("-d")
			.arg(&connection.database)
			.arg("-c");

		if connection.password.is_empty() {
			launcher
		} else {
			launcher.env("PGPASSWORD", connection.password.expose())
		}
	}

	pub fn program(&self) -> &Path {
		&self.program
	}

	pub fn args(&self) -> &[OsString] {
		&self.args
	}
}

impl Launcher for ClientLauncher {
	type Task = ClientTask;

	fn launch(&self, command: &str) -> io::Result<ClientTask> {
		let mut child = Command::new(&self.program)
			.args(&self.args)
			.arg(command)
			.envs(self.envs.iter().map(|(k, v)| (k, v)))
			.stdin(Stdio::null())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.kill_on_drop(true)
			.spawn()?;

		let stdout = child.stdout.take().map(capture);
		let stderr = child.stderr.take().map(capture);

		Ok(ClientTask {
			child,
			stdout,
			stderr,
		})
	}
}

pub struct ClientTask {
	child: Child,
	stdout: Option<JoinHandle<io::Result<Vec<u8>>>>,
	stderr: Option<JoinHandle<io::Result<Vec<u8>>>>,
}

impl PooledTask for ClientTask {
	async fn wait(&mut self) -> io::Result<TaskExit> {
		let status = self.child.wait().await?;
		Ok(TaskExit(status.code()))
	}

	async fn kill(&mut self) -> io::Result<()> {
		self.child.kill().await
	}

	async fn collect_output(self) -> io::Result<TaskOutput> {
		Ok(TaskOutput {
			stdout: collect(self.stdout).await?,
			stderr: collect(self.stderr).await?,
		})
	}
}

fn capture<R>(mut pipe: R) -> JoinHandle<io::Result<Vec<u8>>>
where
	R: AsyncRead + Unpin + Send + 'static,
{
	tokio::spawn(async move {
		let mut buf = Vec::new();
		pipe.read_to_end(&mut buf).await?;
		Ok(buf)
	})
}

async fn collect(handle: Option<JoinHandle<io::Result<Vec<u8>>>>) -> io::Result<String> {
	let Some(handle) = handle else {
		return Ok(String::new());
	};
	let bytes = handle.await.map_err(io::Error::other)??;
	Ok(String::from_utf8_lossy(&bytes).into_owned())
}
