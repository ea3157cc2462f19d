use std::iter::FusedIterator;

use super::cursor::Cursor;

/// The literal marker that opens and closes a fenced region.
pub const FENCE: &str = "```";

/// Lazy iterator over the raw text between matching fence markers.
///
/// Created by [`detect_fences`]. Yields borrowed slices of the input in
/// left-to-right order; a trailing unterminated fence yields nothing.
#[derive(Clone)]
pub struct Fences<'a> {
    cur: Cursor<'a>,
}

impl<'a> Iterator for Fences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if !self.cur.seek(FENCE) {
            return None;
        }
        self.cur.bump_n(FENCE.len());

        let start = self.cur.pos();
        if !self.cur.seek(FENCE) {
            // Unterminated: the dangling span is dropped.
            return None;
        }
        let body = self.cur.slice_from(start);
        self.cur.bump_n(FENCE.len());
        Some(body)
    }
}

impl FusedIterator for Fences<'_> {}

/// Scans `text` for fenced regions.
///
/// Each opening marker is consumed exactly once, so six backticks in a row
/// are an empty region rather than nothing. Markers may touch content on
/// either side: "```code```" yields `"code"`.
pub fn detect_fences(text: &str) -> Fences<'_> {
    Fences {
        cur: Cursor::new(text),
    }
}

/// Whether `text` contains at least one complete open+close fence pair.
pub fn has_fence(text: &str) -> bool {
    detect_fences(text).next().is_some()
}

/// Whether `text` consists only of complete fenced regions separated by
/// whitespace.
///
/// Empty and whitespace-only input is not exclusively fenced.
pub fn is_exclusively_fenced(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }

    let mut cur = Cursor::new(text);
    loop {
        cur.skip_whitespace();
        if cur.eof() {
            return true;
        }
        if !cur.starts_with(FENCE.as_bytes()) {
            return false;
        }
        cur.bump_n(FENCE.len());
        if !cur.seek(FENCE) {
            return false;
        }
        cur.bump_n(FENCE.len());
    }
}
