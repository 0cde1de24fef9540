//! The logger handle: leveled, structured, cheap to clone.

use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::process;
use std::sync::Arc;

use smallvec::SmallVec;
use time::OffsetDateTime;

use crate::config::{EncoderConfig, Encoding};
use crate::encoder::{self, Caller, Record};
use crate::field::Field;
use crate::level::{AtomicLevel, Level};
use crate::stdlog::StdLog;
use crate::writer::Sink;

/// The compiled pipeline: everything frozen out of a [`Config`](crate::Config)
/// at build time. Shared by a handle and all of its children.
pub(crate) struct Core {
    pub(crate) level: AtomicLevel,
    pub(crate) development: bool,
    pub(crate) disable_caller: bool,
    pub(crate) disable_stacktrace: bool,
    pub(crate) encoding: Encoding,
    pub(crate) encoder: EncoderConfig,
    pub(crate) sinks: Vec<Sink>,
}

/// Leveled, structured logging handle.
///
/// Clones share the compiled pipeline and are safe to use from any number of
/// threads. [`with_fields`](Self::with_fields) and [`named`](Self::named)
/// derive child handles without touching the parent.
#[derive(Clone)]
pub struct Logger {
    core: Arc<Core>,
    name: Option<Arc<str>>,
    fields: SmallVec<[Field; 4]>,
}

impl Logger {
    pub(crate) fn from_parts(core: Core, fields: SmallVec<[Field; 4]>) -> Self {
        Self {
            core: Arc::new(core),
            name: None,
            fields,
        }
    }

    /// Current severity threshold.
    #[must_use]
    pub fn level(&self) -> Level {
        self.core.level.get()
    }

    /// Adjust the threshold at runtime. Affects every handle sharing this
    /// pipeline, including the config the logger was built from.
    pub fn set_level(&self, level: Level) {
        self.core.level.set(level);
    }

    /// Whether a record at `level` would currently be emitted.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.core.level.get()
    }

    /// Child handle that appends `fields` to every record it emits.
    #[must_use]
    pub fn with_fields(&self, fields: impl IntoIterator<Item = Field>) -> Self {
        let mut child = self.clone();
        child.fields.extend(fields);
        child
    }

    /// Child handle named `name`, rendered under the logger-name key.
    /// Nested names join with `.`.
    #[must_use]
    pub fn named(&self, name: impl AsRef<str>) -> Self {
        let mut child = self.clone();
        child.name = Some(match &self.name {
            None => Arc::from(name.as_ref()),
            Some(parent) => Arc::from(format!("{parent}.{}", name.as_ref())),
        });
        child
    }

    /// Shim implementing the `log` crate's facade, for components that only
    /// speak the unstructured interface.
    ///
    /// ```no_run
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let logger = svclog::Logger::new("billing", [])?;
    /// log::set_boxed_logger(Box::new(logger.std_log()))?;
    /// log::set_max_level(log::LevelFilter::Info);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn std_log(&self) -> StdLog {
        StdLog::new(self.clone())
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Debug, msg, fields);
    }

    #[track_caller]
    pub fn info(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Info, msg, fields);
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Warn, msg, fields);
    }

    #[track_caller]
    pub fn error(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Error, msg, fields);
    }

    /// Log at `DPANIC`: panics after the record is written, but only in
    /// development mode.
    #[track_caller]
    pub fn dpanic(&self, msg: &str, fields: &[Field]) {
        self.log(Level::DPanic, msg, fields);
    }

    /// Log at `PANIC`, then panic. The panic fires even when the record is
    /// below the threshold.
    #[track_caller]
    pub fn panic(&self, msg: &str, fields: &[Field]) -> ! {
        self.emit(Level::Panic, msg, fields);
        panic!("{msg}");
    }

    /// Log at `FATAL`, then terminate the process with status 1.
    #[track_caller]
    pub fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        self.emit(Level::Fatal, msg, fields);
        process::exit(1);
    }

    /// Generic leveled entry point. `PANIC`/`FATAL` side effects apply here
    /// too; prefer [`panic`](Self::panic)/[`fatal`](Self::fatal) when the
    /// divergence should be visible in the signature.
    #[track_caller]
    pub fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        self.emit(level, msg, fields);
        match level {
            Level::DPanic if self.core.development => panic!("{msg}"),
            Level::Panic => panic!("{msg}"),
            Level::Fatal => process::exit(1),
            _ => {}
        }
    }

    #[track_caller]
    fn emit(&self, level: Level, msg: &str, fields: &[Field]) {
        let location = Location::caller();
        let caller = (!self.core.disable_caller).then(|| Caller {
            file: location.file(),
            line: location.line(),
        });
        self.emit_at(level, msg, fields, caller);
    }

    /// Emission with an explicit caller, used by the facade shim to forward
    /// the facade's own call-site metadata.
    pub(crate) fn emit_at(
        &self,
        level: Level,
        msg: &str,
        fields: &[Field],
        caller: Option<Caller<'_>>,
    ) {
        if !self.enabled(level) {
            return;
        }

        let stacktrace = (!self.core.disable_stacktrace && level >= Level::Error)
            .then(|| Backtrace::force_capture().to_string());

        let record = Record {
            time: OffsetDateTime::now_utc(),
            level,
            name: self.name.as_deref(),
            caller: if self.core.disable_caller { None } else { caller },
            message: msg,
            handle_fields: &self.fields,
            fields,
            stacktrace: stacktrace.as_deref(),
        };
        let line = encoder::encode(&self.core.encoder, self.core.encoding, &record);
        for sink in &self.core.sinks {
            sink.write(line.as_bytes());
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.core.level.get())
            .field("name", &self.name)
            .field("sinks", &self.core.sinks.len())
            .finish_non_exhaustive()
    }
}
