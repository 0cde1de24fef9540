//! Logger configuration: the mutable value the adjustment pipeline folds over.
//!
//! A [`Config`] is created fresh for every build, threaded through the
//! caller's adjustments in order, and consumed by [`Config::build`]. Nothing
//! here performs I/O; sinks are only opened at compile time.

mod presets;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::level::{AtomicLevel, Level};

/// Desired behavior of the logger-to-be.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum severity threshold.
    ///
    /// The cell is shared with handles compiled from this config, so the
    /// threshold of a live logger can be adjusted afterwards.
    pub level: AtomicLevel,
    /// Development mode. Upgrades `DPANIC` records to panics.
    pub development: bool,
    /// Drop caller annotation from every record.
    pub disable_caller: bool,
    /// Drop stack-trace capture at `ERROR` and above.
    pub disable_stacktrace: bool,
    /// Fields attached to every record emitted through the handle.
    pub initial_fields: BTreeMap<String, serde_json::Value>,
    /// Sink identifiers: `"stdout"`, `"stderr"`, a file path, or a
    /// `file://` URL.
    pub output_paths: Vec<String>,
    /// Record encoding.
    pub encoding: Encoding,
    /// Field naming and rendering rules.
    pub encoder: EncoderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::production()
    }
}

/// How records are laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// One JSON object per line.
    #[default]
    Json,
    /// Tab-separated human-readable lines.
    Console,
}

/// Rules governing how a record's parts are named and formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub time_key: String,
    pub level_key: String,
    /// Key for the logger name; only rendered for named handles.
    pub name_key: String,
    pub caller_key: String,
    pub message_key: String,
    pub stacktrace_key: String,
    pub encode_time: TimeEncoder,
    pub encode_duration: DurationEncoder,
    pub encode_caller: CallerEncoder,
    pub encode_level: LevelEncoder,
    pub line_ending: LineEnding,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            time_key: "ts".to_owned(),
            level_key: "level".to_owned(),
            name_key: "logger".to_owned(),
            caller_key: "caller".to_owned(),
            message_key: "msg".to_owned(),
            stacktrace_key: "stacktrace".to_owned(),
            encode_time: TimeEncoder::Epoch,
            encode_duration: DurationEncoder::Seconds,
            encode_caller: CallerEncoder::Short,
            encode_level: LevelEncoder::Lowercase,
            line_ending: LineEnding::Newline,
        }
    }
}

/// Timestamp rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeEncoder {
    /// `2026-01-02T15:04:05.000Z`
    Iso8601,
    /// `2026-01-02T15:04:05Z` (RFC 3339)
    Rfc3339,
    /// Seconds since the Unix epoch, fractional.
    #[default]
    Epoch,
    /// Whole milliseconds since the Unix epoch.
    EpochMillis,
}

/// Duration-field rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationEncoder {
    /// Fractional seconds.
    #[default]
    Seconds,
    /// Whole milliseconds.
    Millis,
    /// Human form, e.g. `"1.5s"`.
    Text,
}

/// Caller-location rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallerEncoder {
    /// Final two path segments, `dir/file.rs:42`.
    #[default]
    Short,
    /// Full path and line.
    Full,
}

/// Severity-name rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelEncoder {
    /// `info`, `warn`, ...
    #[default]
    Lowercase,
    /// `INFO`, `WARN`, ...
    Uppercase,
    /// The severity vocabulary Google Cloud Logging ingests natively.
    Gcp,
}

impl LevelEncoder {
    /// Render a level through this rule.
    #[must_use]
    pub const fn encode(self, level: Level) -> &'static str {
        match self {
            Self::Lowercase => level.lower_str(),
            Self::Uppercase => level.as_str(),
            Self::Gcp => match level {
                Level::Debug => "DEBUG",
                Level::Info => "INFO",
                Level::Warn => "WARNING",
                Level::Error => "ERROR",
                Level::DPanic => "CRITICAL",
                Level::Panic => "ALERT",
                Level::Fatal => "EMERGENCY",
            },
        }
    }
}

/// Record terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Newline,
    CrLf,
}

impl LineEnding {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newline => "\n",
            Self::CrLf => "\r\n",
        }
    }
}
