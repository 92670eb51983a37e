// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use zupsql_pool::{PoolConfig, WorkerPool};
use zupsql_sql::Script;
use zupsql_testing::{Behavior, RecordingSession, ScriptedLauncher};
use zupsql_transaction::Coordinator;
use zupsql_type::{Error, ExecutionMode, FailurePolicy};

fn script(statements: usize) -> Script {
	Script {
		drops: vec![
			"DROP TABLE IF EXISTS CLIENTE CASCADE;".to_string(),
			"DROP TABLE IF EXISTS PEDIDO CASCADE;".to_string(),
		],
		statements: (0..statements).map(|i| format!("ALTER TABLE CLIENTE ADD COLUMN C{i} INTEGER NULL;")).collect(),
	}
}

fn pool(launcher: &ScriptedLauncher, failure_policy: FailurePolicy) -> WorkerPool<ScriptedLauncher> {
	WorkerPool::new(
		launcher.clone(),
		PoolConfig {
			max_parallel: 4,
			failure_policy,
			task_timeout: None,
		},
	)
}

#[tokio::test]
async fn test_parallel_run_commits_after_the_drain() {
	let session = RecordingSession::new();
	let launcher = ScriptedLauncher::new().with_delay(Duration::from_millis(5));
	let coordinator =
		Coordinator::new(session.clone(), pool(&launcher, FailurePolicy::Record), ExecutionMode::Parallel);

	let report = coordinator.run(&script(10)).await.unwrap();

	assert_eq!(report.drops, 2);
	assert_eq!(report.outcomes.len(), 10);
	assert_eq!(report.failure_count(), 0);
	assert!(report.peak_in_flight <= 4);
	assert!(launcher.peak() <= 4);

	assert_eq!(
		session.statements(),
		vec!["BEGIN", "DROP TABLE IF EXISTS CLIENTE CASCADE;", "DROP TABLE IF EXISTS PEDIDO CASCADE;", "COMMIT"]
	);
	assert!(session.is_closed());
}

#[tokio::test]
async fn test_launch_failure_rolls_back() {
	let session = RecordingSession::new();
	let launcher = ScriptedLauncher::new().with_delay(Duration::from_millis(5)).fail_launch_at(4);
	let coordinator =
		Coordinator::new(session.clone(), pool(&launcher, FailurePolicy::Record), ExecutionMode::Parallel);

	let script = script(10);
	let err = coordinator.run(&script).await.unwrap_err();

	match &err {
		Error::TaskLaunch {
			index,
			command,
			..
		} => {
			assert_eq!(*index, 4);
			assert_eq!(command, &script.statements[4]);
		}
		other => panic!("expected launch error, got {other:?}"),
	}
	assert!(err.is_rollback());

	// statements launched before the failure ran in their own sessions
	assert_eq!(launcher.launched(), script.statements[..4].to_vec());
	assert_eq!(launcher.running(), 0);

	assert_eq!(session.statements().last().map(String::as_str), Some("ROLLBACK"));
	assert!(!session.statements().iter().any(|s| s == "COMMIT"));
	assert!(session.is_closed());
}

#[tokio::test]
async fn test_failed_statement_is_recorded_and_committed() {
	let session = RecordingSession::new();
	let script = script(3);
	let launcher = ScriptedLauncher::new().on(script.statements[1].clone(), Behavior::exit(1).with_stderr("ERROR: boom"));
	let coordinator =
		Coordinator::new(session.clone(), pool(&launcher, FailurePolicy::Record), ExecutionMode::Parallel);

	let report = coordinator.run(&script).await.unwrap();

	assert_eq!(report.failure_count(), 1);
	assert_eq!(session.statements().last().map(String::as_str), Some("COMMIT"));
}

#[tokio::test]
async fn test_abort_policy_rolls_back_on_failed_statement() {
	let session = RecordingSession::new();
	let script = script(3);
	let launcher = ScriptedLauncher::new().on(script.statements[1].clone(), Behavior::exit(1));
	let coordinator =
		Coordinator::new(session.clone(), pool(&launcher, FailurePolicy::Abort), ExecutionMode::Parallel);

	let err = coordinator.run(&script).await.unwrap_err();

	assert!(matches!(err, Error::TaskFailed { index: 1, .. }));
	assert_eq!(session.statements().last().map(String::as_str), Some("ROLLBACK"));
	assert!(session.is_closed());
}

#[tokio::test]
async fn test_failing_drop_rolls_back_before_dispatch() {
	let session = RecordingSession::new().failing_on("PEDIDO");
	let launcher = ScriptedLauncher::new();
	let coordinator =
		Coordinator::new(session.clone(), pool(&launcher, FailurePolicy::Record), ExecutionMode::Parallel);

	let err = coordinator.run(&script(5)).await.unwrap_err();

	assert!(matches!(err, Error::Statement { .. }));
	assert!(launcher.launched().is_empty());
	assert_eq!(
		session.statements(),
		vec!["BEGIN", "DROP TABLE IF EXISTS CLIENTE CASCADE;", "DROP TABLE IF EXISTS PEDIDO CASCADE;", "ROLLBACK"]
	);
	assert!(session.is_closed());
}

#[tokio::test]
async fn test_sequential_mode_runs_everything_on_the_held_session() {
	let session = RecordingSession::new();
	let launcher = ScriptedLauncher::new();
	let coordinator =
		Coordinator::new(session.clone(), pool(&launcher, FailurePolicy::Record), ExecutionMode::Sequential);

	let script = script(3);
	let report = coordinator.run(&script).await.unwrap();

	assert!(launcher.launched().is_empty());
	assert_eq!(report.outcomes.len(), 3);
	assert_eq!(report.peak_in_flight, 1);

	let mut expected = vec!["BEGIN".to_string()];
	expected.extend(script.drops.iter().cloned());
	expected.extend(script.statements.iter().cloned());
	expected.push("COMMIT".to_string());
	assert_eq!(session.statements(), expected);
}

#[tokio::test]
async fn test_sequential_failure_rolls_everything_back() {
	let session = RecordingSession::new().failing_on("C1 ");
	let coordinator = Coordinator::new(
		session.clone(),
		pool(&ScriptedLauncher::new(), FailurePolicy::Record),
		ExecutionMode::Sequential,
	);

	let err = coordinator.run(&script(3)).await.unwrap_err();

	assert!(err.is_rollback());
	let statements = session.statements();
	assert_eq!(statements.last().map(String::as_str), Some("ROLLBACK"));
	assert!(!statements.iter().any(|s| s.contains("C2 ")));
	assert!(session.is_closed());
}

#[tokio::test]
async fn test_empty_script_still_commits() {
	let session = RecordingSession::new();
	let coordinator = Coordinator::new(
		session.clone(),
		pool(&ScriptedLauncher::new(), FailurePolicy::Record),
		ExecutionMode::Parallel,
	);

	let report = coordinator.run(&Script::default()).await.unwrap();

	assert_eq!(report.outcomes.len(), 0);
	assert_eq!(session.statements(), vec!["BEGIN", "COMMIT"]);
}
