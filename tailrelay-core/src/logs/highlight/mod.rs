mod keyword;
mod palette;
pub mod router;

pub use keyword::highlight_errors;
pub use palette::{ROUTER_COLOR_OFFSET, SOURCE_PALETTE, source_color_index};

use crate::logs::record::{LogRecord, ParsedLine};
use owo_colors::OwoColorize;

/// Source tag whose content is `key=value` structured.
pub const ROUTER_SOURCE: &str = "router";

/// Turns a raw log line into terminal output.
///
/// Colouring only ever adds escape sequences; stripping them gives back the
/// input line.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter {
    colors: bool,
}

impl Highlighter {
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> bool {
        self.colors
    }

    pub fn render(&self, line: &str) -> String {
        if !self.colors {
            return line.to_string();
        }

        match LogRecord::parse(line) {
            ParsedLine::Raw(raw) => raw,
            ParsedLine::Record(record) => self.render_record(line, &record),
        }
    }

    fn render_record(&self, line: &str, record: &LogRecord) -> String {
        let color = SOURCE_PALETTE[source_color_index(&record.source, SOURCE_PALETTE.len())];

        let content = if record.source == ROUTER_SOURCE {
            router::colorize(&record.content)
        } else {
            highlight_errors(&record.content).into_owned()
        };

        // A header with nothing after it keeps no trailing separator.
        let header_len = record.date.len() + record.source.len() + 3;
        let separator = if line.len() > header_len { " " } else { "" };

        format!(
            "{} [{}]{separator}{content}",
            record.date.yellow(),
            record.source.color(color),
        )
    }
}
