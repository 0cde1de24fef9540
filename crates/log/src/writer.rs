//! Sink resolution and fan-out.
//!
//! Sinks are opened once, at build time; any open failure aborts the build.
//! Emission is best-effort: a logger has no channel to report its own write
//! failures through.

use std::fs::{File, OpenOptions};
use std::io::Write as _;

use parking_lot::Mutex;

use crate::core::{LogError, LogResult};

/// One open destination for encoded records.
#[derive(Debug)]
pub(crate) struct Sink {
    target: Target,
}

#[derive(Debug)]
enum Target {
    Stdout,
    Stderr,
    File(Mutex<File>),
}

impl Sink {
    /// Write one encoded record. Concurrent emitters interleave whole
    /// records: the std stream handles lock internally, files lock here.
    pub(crate) fn write(&self, bytes: &[u8]) {
        match &self.target {
            Target::Stdout => {
                let _ = std::io::stdout().lock().write_all(bytes);
            }
            Target::Stderr => {
                let _ = std::io::stderr().lock().write_all(bytes);
            }
            Target::File(file) => {
                let _ = file.lock().write_all(bytes);
            }
        }
    }
}

/// Resolve sink identifiers into open sinks, preserving order.
pub(crate) fn open_sinks(paths: &[String]) -> LogResult<Vec<Sink>> {
    paths.iter().map(|path| open_sink(path)).collect()
}

fn open_sink(path: &str) -> LogResult<Sink> {
    let target = match path {
        "stdout" => Target::Stdout,
        "stderr" => Target::Stderr,
        other => {
            let fs_path = if let Some(rest) = other.strip_prefix("file://") {
                rest
            } else if other.contains("://") {
                return Err(LogError::UnsupportedSink(other.to_owned()));
            } else {
                other
            };
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(fs_path)
                .map_err(|source| LogError::Sink {
                    path: other.to_owned(),
                    source,
                })?;
            Target::File(Mutex::new(file))
        }
    };
    Ok(Sink { target })
}
