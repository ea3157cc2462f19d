/// A byte cursor over message text.
///
/// Only ever asked to match ASCII patterns, so any index at which a match
/// starts or ends is also a char boundary and safe to slice at.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The text being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s`.
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns the current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Moves to the next occurrence of `pat`, or to the end when there is none.
    ///
    /// Returns whether `pat` was found.
    pub fn seek(&mut self, pat: &str) -> bool {
        match self.s.get(self.i..).and_then(|rest| rest.find(pat)) {
            Some(offset) => {
                self.i += offset;
                true
            }
            None => {
                self.i = self.s.len();
                false
            }
        }
    }

    /// Skips over leading whitespace.
    pub fn skip_whitespace(&mut self) {
        let rest = self.s.get(self.i..).unwrap_or("");
        self.i += rest.len() - rest.trim_start().len();
    }

    /// Returns the text between `start` and the current position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.s[start..self.i]
    }
}
