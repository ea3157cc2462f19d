use std::path::Path;

/// Filename the chat client gives to over-long messages it turns into files.
pub const PLACEHOLDER_FILENAME: &str = "message.txt";

const PLAIN_TEXT: &str = "text/plain";

/// Opaque channel identity, only compared against a guild's ignore list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DestinationId(pub u64);

/// The user a message or paste is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: u64,
    pub name: String,
}

impl Author {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Chat markup that pings this user.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// Metadata for a file attached to a message. The body is fetched separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    /// Declared MIME type, possibly with parameters (`text/plain; charset=utf-8`).
    pub media_type: String,
    /// Locator handed back to the attachment source when fetching.
    pub url: String,
}

impl Attachment {
    pub fn new(
        filename: impl Into<String>,
        media_type: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            media_type: media_type.into(),
            url: url.into(),
        }
    }

    /// The MIME type without parameters.
    pub fn mime_type(&self) -> &str {
        let essence = match self.media_type.split_once(';') {
            Some((essence, _params)) => essence,
            None => &self.media_type,
        };
        essence.trim()
    }

    pub fn is_plain_text(&self) -> bool {
        self.mime_type().eq_ignore_ascii_case(PLAIN_TEXT)
    }

    pub fn is_placeholder(&self) -> bool {
        self.filename == PLACEHOLDER_FILENAME
    }

    /// File extension without the leading dot.
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
    }
}

/// A chat message as handed over by the chat client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub author: Author,
    pub channel: DestinationId,
    pub content: String,
    pub attachments: Vec<Attachment>,
}

impl Message {
    pub fn new(author: Author, channel: DestinationId, content: impl Into<String>) -> Self {
        Self {
            author,
            channel,
            content: content.into(),
            attachments: vec![],
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}
