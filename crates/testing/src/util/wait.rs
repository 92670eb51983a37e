// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::{Duration, Instant};

use tokio::time::sleep;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Polls `condition` until it holds.
///
/// # Panics
/// Panics with `message` if the condition does not hold within
/// [`DEFAULT_TIMEOUT`].
pub async fn wait_for<F>(condition: F, message: &str)
where
	F: Fn() -> bool,
{
	let start = Instant::now();
	while !condition() {
		if start.elapsed() > DEFAULT_TIMEOUT {
			panic!("timeout after {DEFAULT_TIMEOUT:?}: {message}");
		}
		sleep(POLL_INTERVAL).await;
	}
}
