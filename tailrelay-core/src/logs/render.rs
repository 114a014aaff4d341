use crate::logs::error::StreamError;
use crate::logs::highlight::Highlighter;
use owo_colors::OwoColorize;
use std::io::{self, Write};

pub type Sink = Box<dyn Write + Send>;

/// Terminal side of the pipeline. Rendered lines go to `out`, operator
/// notices go to `notices`.
pub struct LineRenderer {
    out: Sink,
    notices: Sink,
    highlighter: Highlighter,
}

impl LineRenderer {
    pub fn new(out: Sink, notices: Sink, highlighter: Highlighter) -> Self {
        Self {
            out,
            notices,
            highlighter,
        }
    }

    pub fn stdio(colors: bool) -> Self {
        Self::new(
            Box::new(io::stdout()),
            Box::new(io::stderr()),
            Highlighter::new(colors),
        )
    }

    /// Renders every non-empty line of `payload`.
    pub fn render_line(&mut self, payload: &str) -> Result<(), StreamError> {
        for line in payload.split('\n').filter(|l| !l.is_empty()) {
            let rendered = self.highlighter.render(line);
            writeln!(self.out, "{rendered}").map_err(StreamError::Render)?;
        }
        Ok(())
    }

    /// Writes a line as-is, without header parsing or highlighting.
    pub fn write_plain(&mut self, line: &str) -> Result<(), StreamError> {
        writeln!(self.out, "{line}").map_err(StreamError::Render)
    }

    pub fn error_notice(&mut self, message: &str) -> Result<(), StreamError> {
        let line = if self.highlighter.colors() {
            format!(" !     {}", message.red())
        } else {
            format!(" !     {message}")
        };
        writeln!(self.notices, "{line}").map_err(StreamError::Render)
    }

    pub fn notice(&mut self, message: &str) -> Result<(), StreamError> {
        writeln!(self.notices, "       {message}").map_err(StreamError::Render)
    }

    pub fn flush(&mut self) -> Result<(), StreamError> {
        self.out.flush().map_err(StreamError::Render)?;
        self.notices.flush().map_err(StreamError::Render)
    }
}
