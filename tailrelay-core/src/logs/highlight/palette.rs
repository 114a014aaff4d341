use owo_colors::AnsiColors;

pub const SOURCE_PALETTE: [AnsiColors; 9] = [
    AnsiColors::Blue,
    AnsiColors::Cyan,
    AnsiColors::Green,
    AnsiColors::Magenta,
    AnsiColors::BrightYellow,
    AnsiColors::BrightBlue,
    AnsiColors::BrightCyan,
    AnsiColors::BrightGreen,
    AnsiColors::BrightMagenta,
];

/// Shift applied to the router tag so it does not share a colour with the
/// common `web-*` containers.
pub const ROUTER_COLOR_OFFSET: usize = 6;

/// Deterministic palette slot for a source tag: byte sum modulo palette size.
pub fn source_color_index(source: &str, palette_len: usize) -> usize {
    let mut index: usize = source.bytes().map(usize::from).sum();
    if source == super::ROUTER_SOURCE {
        index += ROUTER_COLOR_OFFSET;
    }
    index % palette_len
}
