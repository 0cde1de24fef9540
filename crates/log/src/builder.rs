//! Logger construction: baseline seeding, the adjustment fold, compilation.

use std::collections::BTreeMap;

use serde_json::Value;
use smallvec::SmallVec;

use crate::config::{Config, TimeEncoder};
use crate::core::LogResult;
use crate::field::Field;
use crate::level::{AtomicLevel, Level};
use crate::logger::{Core, Logger};
use crate::options::LoggerOpt;
use crate::writer;

/// The fleet baseline every build starts from: the production preset with
/// ISO8601 timestamps, stack traces off, a `service` field, and stdout.
fn baseline(service: String) -> Config {
    let mut config = Config::production();
    config.encoder.encode_time = TimeEncoder::Iso8601;
    config.disable_stacktrace = true;
    config.initial_fields = BTreeMap::from([("service".to_owned(), Value::String(service))]);
    config.output_paths = vec!["stdout".to_owned()];
    config.level = AtomicLevel::new(Level::Info);
    config
}

impl Logger {
    /// Construct a logger for `service`.
    ///
    /// Starts from the fleet baseline, then applies each adjustment in the
    /// exact order given. A later adjustment overwrites a conflicting
    /// earlier one. The first failure aborts the build: remaining
    /// adjustments never run and no handle is produced.
    ///
    /// ```
    /// use svclog::{fields, with_level, Logger};
    ///
    /// let log = Logger::new("billing", vec![with_level("warn")])?;
    /// log.warn("payment retried", &fields!["attempt" => 2]);
    /// # Ok::<(), svclog::LogError>(())
    /// ```
    ///
    /// The service name is stored verbatim; empty names are accepted.
    pub fn new(
        service: impl Into<String>,
        opts: impl IntoIterator<Item = LoggerOpt>,
    ) -> LogResult<Self> {
        let mut config = baseline(service.into());
        for opt in opts {
            opt(&mut config)?;
        }
        config.build()
    }
}

impl Config {
    /// Compile this configuration into a live handle: open every sink and
    /// freeze the encoder. A sink failure surfaces unchanged as the build
    /// error.
    pub fn build(self) -> LogResult<Logger> {
        let sinks = writer::open_sinks(&self.output_paths)?;
        let fields: SmallVec<[Field; 4]> = self
            .initial_fields
            .into_iter()
            .map(|(key, value)| Field::from_value(key, value))
            .collect();
        let core = Core {
            level: self.level,
            development: self.development,
            disable_caller: self.disable_caller,
            disable_stacktrace: self.disable_stacktrace,
            encoding: self.encoding,
            encoder: self.encoder,
            sinks,
        };
        Ok(Logger::from_parts(core, fields))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::{Encoding, LevelEncoder};

    #[test]
    fn baseline_matches_the_fleet_contract() {
        let config = baseline("billing".to_owned());
        assert_eq!(config.level.get(), Level::Info);
        assert_eq!(config.output_paths, ["stdout"]);
        assert!(config.disable_stacktrace);
        assert!(!config.disable_caller);
        assert_eq!(config.encoder.encode_time, TimeEncoder::Iso8601);
        assert_eq!(config.encoder.encode_level, LevelEncoder::Lowercase);
        assert_eq!(config.encoding, Encoding::Json);
        assert_eq!(
            config.initial_fields.get("service"),
            Some(&Value::String("billing".to_owned()))
        );
    }

    #[test]
    fn empty_service_names_are_stored_verbatim() {
        let config = baseline(String::new());
        assert_eq!(
            config.initial_fields.get("service"),
            Some(&Value::String(String::new()))
        );
    }
}
