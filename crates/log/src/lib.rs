//! # svclog
//!
//! Structured, leveled logging for service fleets.
//!
//! Every service gets the same baseline (ISO8601 timestamps, info-level
//! threshold, a `service` field on every record, stdout, caller annotation,
//! no stack traces) and call sites opt into variations through an ordered
//! list of adjustments:
//!
//! ```
//! use svclog::{fields, with_level, Logger};
//!
//! let log = Logger::new("billing", vec![with_level("debug")])?;
//! log.info("invoice settled", &fields!["invoice_id" => "inv-582", "attempt" => 2]);
//! # Ok::<(), svclog::LogError>(())
//! ```
//!
//! ## Key Components
//!
//! - **Levels**: a fixed, case-insensitive registry from `DEBUG` to `FATAL`,
//!   with a shared [`AtomicLevel`] cell for runtime threshold changes
//! - **Adjustments**: [`with_level`], [`with_config`], [`with_output_paths`],
//!   [`with_gcp_mapping`], applied in caller order; later writes win and the
//!   first failure aborts the build
//! - **Encoding**: JSON or console lines, with configurable field names and
//!   time/duration/caller/level rendering ([`config::EncoderConfig`])
//! - **Sinks**: stdout, stderr, files, `file://` URLs, in any combination;
//!   every record delivered to all of them
//! - **Facade interop**: [`Logger::std_log`] adapts a handle to the `log`
//!   crate for components that only speak the unstructured facade
//!
//! Building never falls back: an unknown level name or an unopenable sink
//! aborts construction and the error is returned to the caller.

pub mod config;

mod builder;
mod core;
mod encoder;
mod field;
mod level;
mod logger;
mod macros;
mod options;
mod stdlog;
mod writer;

pub use self::core::{LogError, LogResult};
pub use config::Config;
pub use field::Field;
pub use level::{AtomicLevel, Level};
pub use logger::Logger;
pub use options::{LoggerOpt, with_config, with_gcp_mapping, with_level, with_output_paths};
pub use stdlog::StdLog;

/// Common prelude for service binaries.
pub mod prelude {
    pub use super::{
        AtomicLevel, Config, Field, Level, LogError, LogResult, Logger, LoggerOpt, with_config,
        with_gcp_mapping, with_level, with_output_paths,
    };

    pub use crate::fields;
}
