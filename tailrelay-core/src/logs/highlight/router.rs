//! Scanner for router access lines such as
//! `method=GET path="/a b" status=200 duration=0.007s`.
//!
//! States advance `VarName -> Equals -> Text (<-> QuotedString) -> VarName`.
//! Inside a quoted string a backslash escapes the following character, so an
//! escaped quote never closes the string. Whatever is pending when input ends
//! is flushed with the kind of the state the scanner stopped in.

use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Key,
    Separator,
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    VarName,
    Equals,
    Text,
    QuotedString { escaped: bool },
}

struct Scanner<'a> {
    input: &'a str,
    state: State,
    start: usize,
    segments: Vec<Segment<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            state: State::VarName,
            start: 0,
            segments: Vec::new(),
        }
    }

    fn emit(&mut self, kind: SegmentKind, end: usize) {
        if end > self.start {
            self.segments.push(Segment {
                kind,
                text: &self.input[self.start..end],
            });
        }
        self.start = end;
    }

    /// Feed one character. Returns `true` when the same character has to be
    /// fed again to the new state.
    fn step(&mut self, idx: usize, c: char) -> bool {
        let next = idx + c.len_utf8();

        match self.state {
            State::VarName => {
                if c.is_alphabetic() || c == '_' {
                    return false;
                }
                self.emit(SegmentKind::Key, idx);
                self.state = State::Equals;
                true
            }
            State::Equals => {
                self.emit(SegmentKind::Separator, next);
                self.state = State::Text;
                false
            }
            State::Text => {
                if c == '"' {
                    self.state = State::QuotedString { escaped: false };
                } else if c == ' ' {
                    self.emit(SegmentKind::Value, next);
                    self.state = State::VarName;
                }
                false
            }
            State::QuotedString { escaped: true } => {
                self.state = State::QuotedString { escaped: false };
                false
            }
            State::QuotedString { escaped: false } => {
                if c == '\\' {
                    self.state = State::QuotedString { escaped: true };
                } else if c == '"' {
                    self.state = State::Text;
                }
                false
            }
        }
    }

    fn finish(mut self) -> Vec<Segment<'a>> {
        let kind = match self.state {
            State::VarName => SegmentKind::Key,
            State::Equals => SegmentKind::Separator,
            State::Text | State::QuotedString { .. } => SegmentKind::Value,
        };
        self.emit(kind, self.input.len());
        self.segments
    }
}

pub fn scan(content: &str) -> Vec<Segment<'_>> {
    let mut scanner = Scanner::new(content);
    for (idx, c) in content.char_indices() {
        while scanner.step(idx, c) {}
    }
    scanner.finish()
}

pub fn colorize(content: &str) -> String {
    let mut out = String::with_capacity(content.len() * 2);
    for segment in scan(content) {
        let painted = match segment.kind {
            SegmentKind::Key => segment.text.green().to_string(),
            SegmentKind::Separator => segment.text.red().to_string(),
            SegmentKind::Value => segment.text.white().to_string(),
        };
        out.push_str(&painted);
    }
    out
}
