use once_cell::sync::Lazy;
use owo_colors::OwoColorize;
use regex::{Captures, Regex};
use std::borrow::Cow;

static ERROR_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\berr(or)?\b").expect("static regex is valid"));

/// Puts a red background behind standalone `err` / `error` words.
pub fn highlight_errors(content: &str) -> Cow<'_, str> {
    ERROR_WORD.replace_all(content, |caps: &Captures<'_>| {
        (&caps[0]).on_red().to_string()
    })
}
