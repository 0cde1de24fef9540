//! Record encoding: turns one record into one line, per the encoder
//! description frozen at build time.
//!
//! JSON objects are hand-assembled so key order follows the configured
//! layout (time, level, name, caller, message, fields, stacktrace) instead
//! of whatever a map implementation would pick.

use std::fmt::Write as _;
use std::time::Duration;

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use crate::config::{CallerEncoder, DurationEncoder, EncoderConfig, Encoding, TimeEncoder};
use crate::field::{Field, FieldValue};
use crate::level::Level;

/// ISO8601 with millisecond precision, always UTC.
static ISO8601: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

/// Call-site annotation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Caller<'a> {
    pub file: &'a str,
    pub line: u32,
}

/// One record, ready for encoding. Field slices are borrowed: handle fields
/// first, then call-site fields.
pub(crate) struct Record<'a> {
    pub time: OffsetDateTime,
    pub level: Level,
    pub name: Option<&'a str>,
    pub caller: Option<Caller<'a>>,
    pub message: &'a str,
    pub handle_fields: &'a [Field],
    pub fields: &'a [Field],
    pub stacktrace: Option<&'a str>,
}

pub(crate) fn encode(cfg: &EncoderConfig, encoding: Encoding, rec: &Record<'_>) -> String {
    match encoding {
        Encoding::Json => encode_json(cfg, rec),
        Encoding::Console => encode_console(cfg, rec),
    }
}

fn encode_json(cfg: &EncoderConfig, rec: &Record<'_>) -> String {
    let mut buf = String::with_capacity(256);
    buf.push('{');

    push_json_str(&mut buf, &cfg.time_key);
    buf.push(':');
    if time_is_numeric(cfg.encode_time) {
        buf.push_str(&time_text(cfg.encode_time, rec.time));
    } else {
        push_json_str(&mut buf, &time_text(cfg.encode_time, rec.time));
    }

    push_entry_sep(&mut buf, &cfg.level_key);
    push_json_str(&mut buf, cfg.encode_level.encode(rec.level));

    if let Some(name) = rec.name {
        push_entry_sep(&mut buf, &cfg.name_key);
        push_json_str(&mut buf, name);
    }

    if let Some(caller) = rec.caller {
        push_entry_sep(&mut buf, &cfg.caller_key);
        push_json_str(&mut buf, &caller_text(cfg.encode_caller, caller));
    }

    push_entry_sep(&mut buf, &cfg.message_key);
    push_json_str(&mut buf, rec.message);

    for field in rec.handle_fields.iter().chain(rec.fields) {
        push_entry_sep(&mut buf, &field.key);
        push_field_value(&mut buf, cfg.encode_duration, &field.value);
    }

    if let Some(stack) = rec.stacktrace {
        push_entry_sep(&mut buf, &cfg.stacktrace_key);
        push_json_str(&mut buf, stack);
    }

    buf.push('}');
    buf.push_str(cfg.line_ending.as_str());
    buf
}

fn encode_console(cfg: &EncoderConfig, rec: &Record<'_>) -> String {
    let mut buf = String::with_capacity(128);
    buf.push_str(&time_text(cfg.encode_time, rec.time));
    buf.push('\t');
    buf.push_str(cfg.encode_level.encode(rec.level));
    if let Some(name) = rec.name {
        buf.push('\t');
        buf.push_str(name);
    }
    if let Some(caller) = rec.caller {
        buf.push('\t');
        buf.push_str(&caller_text(cfg.encode_caller, caller));
    }
    buf.push('\t');
    buf.push_str(rec.message);

    if !rec.handle_fields.is_empty() || !rec.fields.is_empty() {
        buf.push('\t');
        buf.push('{');
        let mut first = true;
        for field in rec.handle_fields.iter().chain(rec.fields) {
            if !first {
                buf.push(',');
            }
            first = false;
            push_json_str(&mut buf, &field.key);
            buf.push(':');
            push_field_value(&mut buf, cfg.encode_duration, &field.value);
        }
        buf.push('}');
    }

    if let Some(stack) = rec.stacktrace {
        buf.push('\n');
        buf.push_str(stack);
    }

    buf.push_str(cfg.line_ending.as_str());
    buf
}

/// `,"key":` for every entry after the first.
fn push_entry_sep(buf: &mut String, key: &str) {
    buf.push(',');
    push_json_str(buf, key);
    buf.push(':');
}

fn push_json_str(buf: &mut String, s: &str) {
    match serde_json::to_string(s) {
        Ok(quoted) => buf.push_str(&quoted),
        Err(_) => buf.push_str("\"\""),
    }
}

fn push_field_value(buf: &mut String, durations: DurationEncoder, value: &FieldValue) {
    match value {
        FieldValue::Json(v) => match serde_json::to_string(v) {
            Ok(text) => buf.push_str(&text),
            Err(_) => buf.push_str("null"),
        },
        FieldValue::Duration(d) => push_duration(buf, durations, *d),
    }
}

fn push_duration(buf: &mut String, encoder: DurationEncoder, d: Duration) {
    match encoder {
        DurationEncoder::Seconds => {
            let _ = write!(buf, "{}", d.as_secs_f64());
        }
        DurationEncoder::Millis => {
            let _ = write!(buf, "{}", d.as_millis());
        }
        DurationEncoder::Text => push_json_str(buf, &format!("{d:?}")),
    }
}

const fn time_is_numeric(encoder: TimeEncoder) -> bool {
    matches!(encoder, TimeEncoder::Epoch | TimeEncoder::EpochMillis)
}

fn time_text(encoder: TimeEncoder, t: OffsetDateTime) -> String {
    match encoder {
        TimeEncoder::Iso8601 => t.format(&ISO8601).unwrap_or_default(),
        TimeEncoder::Rfc3339 => t.format(&Rfc3339).unwrap_or_default(),
        TimeEncoder::Epoch => {
            let secs = t.unix_timestamp_nanos() as f64 / 1e9;
            format!("{secs}")
        }
        TimeEncoder::EpochMillis => format!("{}", t.unix_timestamp_nanos() / 1_000_000),
    }
}

fn caller_text(encoder: CallerEncoder, caller: Caller<'_>) -> String {
    let file = match encoder {
        CallerEncoder::Full => caller.file,
        CallerEncoder::Short => short_file(caller.file),
    };
    format!("{file}:{}", caller.line)
}

/// Final two path segments, `dir/file.rs`.
fn short_file(file: &str) -> &str {
    match file.rfind('/') {
        None => file,
        Some(last) => match file[..last].rfind('/') {
            None => file,
            Some(prev) => &file[prev + 1..],
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;
    use crate::config::LevelEncoder;

    fn record<'a>(fields: &'a [Field]) -> Record<'a> {
        Record {
            time: OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
            level: Level::Warn,
            name: None,
            caller: Some(Caller {
                file: "src/billing/invoice.rs",
                line: 42,
            }),
            message: "payment retried",
            handle_fields: &[],
            fields,
            stacktrace: None,
        }
    }

    #[test]
    fn json_layout_follows_configured_key_order() {
        let fields = [Field::new("attempt", 2)];
        let line = encode_json(&EncoderConfig::default(), &record(&fields));
        assert_eq!(
            line,
            "{\"ts\":1700000000,\"level\":\"warn\",\"caller\":\"billing/invoice.rs:42\",\
             \"msg\":\"payment retried\",\"attempt\":2}\n"
        );
    }

    #[test]
    fn gcp_severity_replaces_level() {
        let cfg = EncoderConfig {
            level_key: "severity".to_owned(),
            encode_level: LevelEncoder::Gcp,
            encode_time: TimeEncoder::Rfc3339,
            ..EncoderConfig::default()
        };
        let line = encode_json(&cfg, &record(&[]));
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["severity"], json!("WARNING"));
        assert!(parsed.get("level").is_none());
        // RFC 3339 timestamps parse back.
        OffsetDateTime::parse(parsed["ts"].as_str().unwrap(), &Rfc3339).unwrap();
    }

    #[test]
    fn iso8601_renders_millis_utc() {
        assert_eq!(
            time_text(
                TimeEncoder::Iso8601,
                OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
            ),
            "2023-11-14T22:13:20.000Z"
        );
    }

    #[test]
    fn epoch_millis_is_integral() {
        assert_eq!(
            time_text(
                TimeEncoder::EpochMillis,
                OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
            ),
            "1700000000000"
        );
    }

    #[test]
    fn duration_fields_honor_the_duration_rule() {
        let d = Duration::from_millis(1500);

        let mut buf = String::new();
        push_duration(&mut buf, DurationEncoder::Seconds, d);
        assert_eq!(buf, "1.5");

        buf.clear();
        push_duration(&mut buf, DurationEncoder::Millis, d);
        assert_eq!(buf, "1500");

        buf.clear();
        push_duration(&mut buf, DurationEncoder::Text, d);
        assert_eq!(buf, "\"1.5s\"");
    }

    #[test]
    fn messages_are_json_escaped() {
        let fields = [];
        let mut rec = record(&fields);
        rec.message = "quote \" and newline \n";
        let line = encode_json(&EncoderConfig::default(), &rec);
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["msg"], json!("quote \" and newline \n"));
    }

    #[test]
    fn short_caller_keeps_two_segments() {
        assert_eq!(short_file("a/b/c/invoice.rs"), "c/invoice.rs");
        assert_eq!(short_file("c/invoice.rs"), "c/invoice.rs");
        assert_eq!(short_file("invoice.rs"), "invoice.rs");
    }

    #[test]
    fn console_lines_are_tab_separated() {
        let cfg = EncoderConfig {
            encode_time: TimeEncoder::EpochMillis,
            encode_level: LevelEncoder::Uppercase,
            ..EncoderConfig::default()
        };
        let fields = [Field::new("attempt", 2)];
        let line = encode_console(&cfg, &record(&fields));
        assert_eq!(
            line,
            "1700000000000\tWARN\tbilling/invoice.rs:42\tpayment retried\t{\"attempt\":2}\n"
        );
    }

    #[test]
    fn crlf_line_ending_is_honored() {
        let cfg = EncoderConfig {
            line_ending: crate::config::LineEnding::CrLf,
            ..EncoderConfig::default()
        };
        let line = encode_json(&cfg, &record(&[]));
        assert!(line.ends_with("}\r\n"));
    }
}
