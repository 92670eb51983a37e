// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod launcher;
pub mod session;
pub mod tempdir;
pub mod util;

pub use launcher::{Behavior, ScriptedLauncher};
pub use session::RecordingSession;
pub use tempdir::{TempDir, temp_dir};
