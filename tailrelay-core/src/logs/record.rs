use chrono::{DateTime, FixedOffset};

/// Number of space separated fields that make up a log line header:
/// four date fields followed by the bracketed source tag.
const HEADER_FIELDS: usize = 5;
const DATE_FIELDS: usize = 4;

/// One rendered unit of log output.
///
/// Records are built from a raw line and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Date header exactly as it appeared on the wire, e.g.
    /// `2024-03-01 10:00:00.123456789 +0100 CET`.
    pub date: String,
    pub timestamp: Option<DateTime<FixedOffset>>,
    /// Container or process tag without its brackets, e.g. `web-1`, `router`.
    pub source: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Record(LogRecord),
    /// Line that does not carry a recognizable header. Rendered untouched.
    Raw(String),
}

impl LogRecord {
    pub fn parse(line: &str) -> ParsedLine {
        let fields: Vec<&str> = line.split(' ').collect();
        if fields.len() < HEADER_FIELDS {
            return ParsedLine::Raw(line.to_string());
        }

        let Some(source) = fields[DATE_FIELDS]
            .strip_prefix('[')
            .and_then(|tag| tag.strip_suffix(']'))
        else {
            return ParsedLine::Raw(line.to_string());
        };

        let date = fields[..DATE_FIELDS].join(" ");
        let timestamp = parse_timestamp(&fields[..DATE_FIELDS - 1].join(" "));

        ParsedLine::Record(LogRecord {
            date,
            timestamp,
            source: source.to_string(),
            content: fields[HEADER_FIELDS..].join(" "),
        })
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f %z").ok()
}
