//! Interop with the `log` facade.

use crate::encoder::Caller;
use crate::field::Field;
use crate::level::Level;
use crate::logger::Logger;

/// Adapter that lets `log`-facade consumers write through a [`Logger`].
///
/// Facade records are forwarded at their mapped severity (`trace` collapses
/// into `DEBUG`, the registry has no lower rung) with the facade target
/// attached as a `target` field. Install it globally with
/// [`log::set_boxed_logger`] or hand it to any component that accepts a
/// `&dyn log::Log`.
pub struct StdLog {
    logger: Logger,
}

impl StdLog {
    pub(crate) fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

fn map_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

impl log::Log for StdLog {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.logger.enabled(map_level(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = record.args().to_string();
        let fields = [Field::new("target", record.target())];
        let caller = record.file().map(|file| Caller {
            file,
            line: record.line().unwrap_or(0),
        });
        self.logger
            .emit_at(map_level(record.level()), &msg, &fields, caller);
    }

    fn flush(&self) {}
}
