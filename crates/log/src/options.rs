//! Adjustments: ordered, fallible edits applied to a [`Config`] during build.
//!
//! [`Logger::new`](crate::Logger::new) applies adjustments in the exact order
//! given. A later adjustment overwrites a conflicting earlier one; this is
//! how call sites layer a full replacement config and then fine-tune it. The
//! first failing adjustment aborts the whole build.

use crate::config::{
    CallerEncoder, Config, DurationEncoder, LevelEncoder, LineEnding, TimeEncoder,
};
use crate::core::LogResult;
use crate::level::{AtomicLevel, Level};

/// A single configuration adjustment.
///
/// Receives the configuration being built; either mutates it, or reports a
/// failure that aborts construction.
pub type LoggerOpt = Box<dyn FnOnce(&mut Config) -> LogResult<()>>;

/// Set the severity threshold by registry name, case-insensitively.
///
/// An unrecognized name aborts the build with
/// [`LogError::UnknownLevel`](crate::LogError::UnknownLevel).
#[must_use]
pub fn with_level(level: &str) -> LoggerOpt {
    let level = level.to_owned();
    Box::new(move |cfg| {
        let resolved: Level = level.parse()?;
        cfg.level = AtomicLevel::new(resolved);
        Ok(())
    })
}

/// Replace the entire configuration built so far with `config`.
///
/// Adjustments later in the list keep mutating the replacement; anything
/// applied earlier is erased. Both orders are meaningful: put this first to
/// start from your own baseline, last to discard the pipeline's work.
#[must_use]
pub fn with_config(config: Config) -> LoggerOpt {
    Box::new(move |cfg| {
        *cfg = config;
        Ok(())
    })
}

/// Replace the sink list wholesale.
///
/// Destinations are `"stdout"`, `"stderr"`, file paths, or `file://` URLs,
/// and may be combined:
///
/// ```
/// use svclog::{with_output_paths, Logger};
///
/// # let dir = tempfile::tempdir().unwrap();
/// # let path = dir.path().join("app.log").display().to_string();
/// let log = Logger::new("billing", vec![with_output_paths(["stdout", path.as_str()])])?;
/// # Ok::<(), svclog::LogError>(())
/// ```
#[must_use]
pub fn with_output_paths<I>(paths: I) -> LoggerOpt
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
    Box::new(move |cfg| {
        cfg.output_paths = paths;
        Ok(())
    })
}

/// Rewrite the encoder description to what Google Cloud Logging ingests
/// natively: `severity`/`time`/`message` keys, RFC 3339 timestamps,
/// millisecond durations, short caller form, and the platform's severity
/// vocabulary (`WARN` → `WARNING`, `FATAL` → `EMERGENCY`, ...).
///
/// Applying it twice is the same as applying it once.
#[must_use]
pub fn with_gcp_mapping() -> LoggerOpt {
    Box::new(|cfg| {
        let enc = &mut cfg.encoder;
        enc.time_key = "time".to_owned();
        enc.level_key = "severity".to_owned();
        enc.name_key = "logger".to_owned();
        enc.caller_key = "caller".to_owned();
        enc.message_key = "message".to_owned();
        enc.stacktrace_key = "stacktrace".to_owned();
        enc.line_ending = LineEnding::Newline;
        enc.encode_time = TimeEncoder::Rfc3339;
        enc.encode_duration = DurationEncoder::Millis;
        enc.encode_caller = CallerEncoder::Short;
        enc.encode_level = LevelEncoder::Gcp;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::LogError;

    fn apply(cfg: &mut Config, opt: LoggerOpt) -> LogResult<()> {
        opt(cfg)
    }

    #[test]
    fn with_level_resolves_through_the_registry() {
        let mut cfg = Config::production();
        apply(&mut cfg, with_level("dEbUg")).unwrap();
        assert_eq!(cfg.level.get(), Level::Debug);
    }

    #[test]
    fn with_level_rejects_unknown_names() {
        let mut cfg = Config::production();
        let err = apply(&mut cfg, with_level("verbose")).unwrap_err();
        assert!(matches!(err, LogError::UnknownLevel(ref name) if name == "verbose"));
        // The threshold is untouched.
        assert_eq!(cfg.level.get(), Level::Info);
    }

    #[test]
    fn later_level_wins() {
        let mut cfg = Config::production();
        apply(&mut cfg, with_level("ERROR")).unwrap();
        apply(&mut cfg, with_level("DEBUG")).unwrap();
        assert_eq!(cfg.level.get(), Level::Debug);
    }

    #[test]
    fn replacement_then_fine_tuning_composes() {
        let mut cfg = Config::production();
        apply(&mut cfg, with_config(Config::development())).unwrap();
        apply(&mut cfg, with_output_paths(["stdout", "/tmp/a.log"])).unwrap();
        assert!(cfg.development);
        assert_eq!(cfg.output_paths, ["stdout", "/tmp/a.log"]);
    }

    #[test]
    fn replacement_erases_earlier_adjustments() {
        let mut cfg = Config::production();
        apply(&mut cfg, with_output_paths(["/tmp/a.log"])).unwrap();
        apply(&mut cfg, with_config(Config::development())).unwrap();
        assert_eq!(cfg.output_paths, ["stderr"]);
    }

    #[test]
    fn gcp_mapping_is_idempotent() {
        let mut once = Config::production();
        apply(&mut once, with_gcp_mapping()).unwrap();

        let mut twice = Config::production();
        apply(&mut twice, with_gcp_mapping()).unwrap();
        apply(&mut twice, with_gcp_mapping()).unwrap();

        assert_eq!(once.encoder, twice.encoder);
        assert_eq!(once.encoder.level_key, "severity");
        assert_eq!(once.encoder.encode_level, LevelEncoder::Gcp);
    }
}
