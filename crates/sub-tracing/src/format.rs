// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt;

use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
	fmt::{FmtContext, FormatEvent, FormatFields, format::Writer},
	registry::LookupSpan,
};

/// `chrono` format of the local-time prefix of every line.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d %H:%M:%S";

/// Renders `[YYYYMMDD HH:MM:SS] message key=value`.
///
/// Events below INFO carry their level after the timestamp, so warnings and
/// errors stand out in the log file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
	S: Subscriber + for<'a> LookupSpan<'a>,
	N: for<'a> FormatFields<'a> + 'static,
{
	fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
		write!(writer, "[{}] ", Local::now().format(TIMESTAMP_FORMAT))?;

		let level = *event.metadata().level();
		if level == Level::WARN || level == Level::ERROR {
			write!(writer, "{level}: ")?;
		}

		ctx.field_format().format_fields(writer.by_ref(), event)?;
		writeln!(writer)
	}
}
