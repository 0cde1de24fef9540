//! Configuration presets for common scenarios

use std::collections::BTreeMap;

use super::{Config, EncoderConfig, Encoding, LevelEncoder, TimeEncoder};
use crate::level::{AtomicLevel, Level};

impl Config {
    /// Production configuration (JSON, info level, epoch timestamps).
    ///
    /// Writes to stderr; [`Logger::new`](crate::Logger::new) retargets the
    /// fleet baseline to stdout on top of this preset.
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: AtomicLevel::new(Level::Info),
            development: false,
            disable_caller: false,
            disable_stacktrace: false,
            initial_fields: BTreeMap::new(),
            output_paths: vec!["stderr".to_owned()],
            encoding: Encoding::Json,
            encoder: EncoderConfig::default(),
        }
    }

    /// Development configuration (console, debug level, ISO8601 timestamps).
    ///
    /// Development mode upgrades `DPANIC` records to panics so invariant
    /// violations fail loudly on a workstation.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: AtomicLevel::new(Level::Debug),
            development: true,
            encoding: Encoding::Console,
            encoder: EncoderConfig {
                encode_time: TimeEncoder::Iso8601,
                encode_level: LevelEncoder::Uppercase,
                ..EncoderConfig::default()
            },
            ..Self::production()
        }
    }
}
