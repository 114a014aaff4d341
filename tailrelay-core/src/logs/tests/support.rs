use crate::logs::highlight::Highlighter;
use crate::logs::render::LineRenderer;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Cloneable in-memory sink; every clone writes to the same buffer.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink that refuses every write, like a closed stdout.
pub struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn plain_renderer() -> (LineRenderer, SharedBuf, SharedBuf) {
    let out = SharedBuf::default();
    let notices = SharedBuf::default();
    let renderer = LineRenderer::new(
        Box::new(out.clone()),
        Box::new(notices.clone()),
        Highlighter::new(false),
    );
    (renderer, out, notices)
}

static ANSI: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").unwrap());

pub fn strip_ansi(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}
