//! Seams to the services around the engine: fetching attachment bodies,
//! naming languages, and creating pastes.

use serde::Serialize;

use crate::batch::PasteUnit;
use crate::policy::{Attachment, Author};

/// Language name used when no language could be resolved.
pub const AUTODETECT: &str = "Autodetect";

#[derive(Debug, thiserror::Error)]
pub enum CollabError {
    #[error("Failed to fetch attachment {filename}: {reason}")]
    Fetch { filename: String, reason: String },
    #[error("Paste service rejected the paste: {0}")]
    Rejected(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetches the decoded text of an attachment.
pub trait AttachmentSource {
    fn fetch(&self, attachment: &Attachment) -> Result<String, CollabError>;
}

/// Maps file extensions and free-text tags to the paste service's language names.
///
/// Lookups never fail: an unknown input is `None`.
pub trait LanguageResolver {
    fn by_extension(&self, extension: &str) -> Option<String>;
    fn by_name(&self, name: &str) -> Option<String>;
}

/// Everything the paste service needs to create one paste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasteRequest {
    pub title: String,
    pub author: String,
    pub units: Vec<PasteUnit>,
}

impl PasteRequest {
    pub fn new(author: &Author, units: Vec<PasteUnit>) -> Self {
        Self {
            title: format!("Automatic paste by {}", author.name),
            author: author.name.clone(),
            units,
        }
    }
}

/// Creates pastes, returning the locator (usually a URL) of the new paste.
pub trait PasteSink {
    fn create_paste(&self, request: &PasteRequest) -> Result<String, CollabError>;
}

/// Language name for a file extension, with or without its leading dot.
pub fn language_for_extension(resolver: &dyn LanguageResolver, extension: Option<&str>) -> String {
    let extension = extension.map(|e| e.strip_prefix('.').unwrap_or(e).trim());
    match extension {
        Some(ext) if !ext.is_empty() => resolver
            .by_extension(ext)
            .unwrap_or_else(|| AUTODETECT.to_string()),
        _ => AUTODETECT.to_string(),
    }
}

/// Language name for a codeblock tag: tried as an extension first (`rs`,
/// `cs`), then as a language name (`rust`).
pub fn language_for_tag(resolver: &dyn LanguageResolver, tag: Option<&str>) -> String {
    let Some(tag) = tag.map(str::trim).filter(|t| !t.is_empty()) else {
        return AUTODETECT.to_string();
    };
    resolver
        .by_extension(tag)
        .or_else(|| resolver.by_name(tag))
        .unwrap_or_else(|| AUTODETECT.to_string())
}
