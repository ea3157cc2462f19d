/// A codeblock taken from a message: its body and optional language tag.
///
/// Content is never whitespace-only (it collapses to `""`), and a blank
/// language collapses to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codeblock {
    content: String,
    language: Option<String>,
}

impl Codeblock {
    /// Creates a codeblock from known content and language.
    pub fn new(content: impl Into<String>, language: Option<&str>) -> Self {
        let mut content = content.into();
        if content.trim().is_empty() {
            content.clear();
        }
        let language = language
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string);
        Self { content, language }
    }

    /// Splits the raw text between two fences into language and content.
    ///
    /// The first line is a language tag only when it is made up entirely of
    /// ASCII letters and digits (`cs`, `rust`, `py3`); otherwise it is the
    /// first line of the content. Without a newline the whole input is judged
    /// the same way, so `"rust"` is a tag with no content while `"foo bar"`
    /// is content.
    pub fn parse(raw: &str) -> Self {
        let (first_line, rest) = raw.split_once('\n').unwrap_or((raw, ""));
        let first_line = first_line.strip_suffix('\r').unwrap_or(first_line);

        if is_language_tag(first_line) {
            Self::new(rest.trim(), Some(first_line))
        } else {
            Self::from_body(raw)
        }
    }

    /// Builds a codeblock from text that is already a body, such as the
    /// content of another codeblock. No line is ever taken as a language.
    pub fn from_body(body: &str) -> Self {
        Self::new(body.trim(), None)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Number of lines in the content: newlines + 1, so an empty block has one.
    pub fn line_count(&self) -> usize {
        self.content.matches('\n').count() + 1
    }
}

fn is_language_tag(line: &str) -> bool {
    line.bytes().all(|b| b.is_ascii_alphanumeric())
}
