//! Level registry: fixed names, fixed ordinals.
//!
//! The registry is a closed, case-insensitive table. `"info"`, `"INFO"` and
//! `"InFo"` all resolve to the same ordinal; anything outside the table is an
//! [`LogError::UnknownLevel`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::LogError;

/// Log severity.
///
/// A record is emitted when its level is at least the configured threshold.
/// The three highest severities additionally carry process-level semantics at
/// emit time (see [`Logger`](crate::Logger)); the registry itself only
/// assigns ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Level {
    Debug = -1,
    Info = 0,
    Warn = 1,
    Error = 2,
    /// Panics after logging, but only in development mode.
    DPanic = 3,
    /// Panics after logging.
    Panic = 4,
    /// Terminates the process after logging.
    Fatal = 5,
}

impl Level {
    /// Every recognized level, in increasing severity.
    pub const ALL: [Self; 7] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::DPanic,
        Self::Panic,
        Self::Fatal,
    ];

    /// Canonical uppercase name, as accepted by the registry.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::DPanic => "DPANIC",
            Self::Panic => "PANIC",
            Self::Fatal => "FATAL",
        }
    }

    /// Lowercase rendering used by the default JSON encoder.
    #[must_use]
    pub const fn lower_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::DPanic => "dpanic",
            Self::Panic => "panic",
            Self::Fatal => "fatal",
        }
    }

    /// Comparable severity rank.
    #[must_use]
    pub const fn ordinal(self) -> i8 {
        self as i8
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            "DPANIC" => Ok(Self::DPanic),
            "PANIC" => Ok(Self::Panic),
            "FATAL" => Ok(Self::Fatal),
            _ => Err(LogError::UnknownLevel(s.to_owned())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Shared, lock-free severity threshold.
///
/// Cloning shares the cell: a handle compiled from a configuration keeps
/// observing `set` calls made through any clone, so the threshold of a live
/// logger can be adjusted without rebuilding it.
#[derive(Clone)]
pub struct AtomicLevel {
    inner: Arc<ArcSwap<Level>>,
}

impl AtomicLevel {
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(level)),
        }
    }

    /// Current threshold.
    #[must_use]
    pub fn get(&self) -> Level {
        **self.inner.load()
    }

    /// Replace the threshold, visible to every clone immediately.
    pub fn set(&self, level: Level) {
        self.inner.store(Arc::new(level));
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl From<Level> for AtomicLevel {
    fn from(level: Level) -> Self {
        Self::new(level)
    }
}

impl fmt::Debug for AtomicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicLevel").field(&self.get()).finish()
    }
}

impl Serialize for AtomicLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.get().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AtomicLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Level::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ordinals_increase_with_severity() {
        for pair in Level::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
        assert_eq!(Level::Debug.ordinal(), -1);
        assert_eq!(Level::Info.ordinal(), 0);
        assert_eq!(Level::Fatal.ordinal(), 5);
    }

    #[test]
    fn parse_is_case_insensitive() {
        for level in Level::ALL {
            assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
            assert_eq!(level.lower_str().parse::<Level>().unwrap(), level);
        }
        assert_eq!("InFo".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("dPaNiC".parse::<Level>().unwrap(), Level::DPanic);
    }

    #[test]
    fn unknown_name_is_reported_verbatim() {
        let err = "verbose".parse::<Level>().unwrap_err();
        assert!(matches!(err, LogError::UnknownLevel(ref name) if name == "verbose"));
    }

    #[test]
    fn serde_round_trips_through_names() {
        let json = serde_json::to_string(&Level::Warn).unwrap();
        assert_eq!(json, r#""WARN""#);
        let back: Level = serde_json::from_str(r#""warn""#).unwrap();
        assert_eq!(back, Level::Warn);
        assert!(serde_json::from_str::<Level>(r#""verbose""#).is_err());
    }

    #[test]
    fn atomic_level_clones_share_the_cell() {
        let level = AtomicLevel::new(Level::Info);
        let other = level.clone();
        other.set(Level::Debug);
        assert_eq!(level.get(), Level::Debug);
    }
}
