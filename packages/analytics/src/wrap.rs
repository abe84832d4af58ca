//! Hover-text wrapping for cluster descriptions.
//!
//! Notes are joined with `/`, so each `/` becomes a paragraph break. Long
//! runs are then broken at the first whitespace after [`WRAP_WIDTH`]
//! characters. Break markers already in the text are treated as single
//! tokens that reset the run, which keeps the transform idempotent.

/// Line break marker understood by the map's hover renderer.
pub const LINE_BREAK: &str = "<br>";

/// Paragraph break inserted in place of each note separator.
pub const PARAGRAPH_BREAK: &str = "<br><br>";

/// Separator placed between distinct notes.
pub const NOTE_SEPARATOR: char = '/';

/// Characters a line may accumulate before the next whitespace is replaced
/// with a line break.
pub const WRAP_WIDTH: usize = 50;

/// Wraps a joined note string for hover display.
///
/// Words are never split: a line longer than [`WRAP_WIDTH`] with no
/// whitespace stays intact until its next whitespace.
#[must_use]
pub fn wrap_description(text: &str) -> String {
    let text = text.replace(NOTE_SEPARATOR, PARAGRAPH_BREAK);
    let mut out = String::with_capacity(text.len());
    let mut run: usize = 0;
    let mut rest = text.as_str();

    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix(LINE_BREAK) {
            out.push_str(LINE_BREAK);
            run = 0;
            rest = after;
            continue;
        }

        if c.is_whitespace() && run >= WRAP_WIDTH {
            out.push_str(LINE_BREAK);
            run = 0;
        } else {
            out.push(c);
            run += 1;
        }
        rest = &rest[c.len_utf8()..];
    }

    out
}
