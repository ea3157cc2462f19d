use serde::Serialize;

use crate::collab::{AUTODETECT, LanguageResolver, language_for_extension, language_for_tag};
use crate::parsing::Codeblock;
use crate::policy::Attachment;

/// Title used for units with no meaningful name.
pub const UNTITLED: &str = "(untitled)";

/// One file of a paste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasteUnit {
    pub title: String,
    pub language: String,
    pub content: String,
}

/// An attachment whose body has been fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedAttachment {
    pub attachment: Attachment,
    pub content: String,
}

impl FetchedAttachment {
    pub fn new(attachment: &Attachment, content: impl Into<String>) -> Self {
        Self {
            attachment: attachment.clone(),
            content: content.into(),
        }
    }
}

/// A non-empty, ordered list of paste units: attachments first, in message
/// order, then codeblocks in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteBatch {
    units: Vec<PasteUnit>,
}

impl PasteBatch {
    /// Builds the batch, or `None` when there is nothing to paste.
    pub fn build(
        attachments: &[FetchedAttachment],
        codeblocks: &[Codeblock],
        resolver: &dyn LanguageResolver,
    ) -> Option<Self> {
        let from_attachments = attachments.iter().map(|fetched| {
            let a = &fetched.attachment;
            if a.is_placeholder() {
                PasteUnit {
                    title: UNTITLED.to_string(),
                    language: AUTODETECT.to_string(),
                    content: fetched.content.clone(),
                }
            } else {
                PasteUnit {
                    title: a.filename.clone(),
                    language: language_for_extension(resolver, a.extension()),
                    content: fetched.content.clone(),
                }
            }
        });

        let from_codeblocks = codeblocks.iter().map(|c| PasteUnit {
            title: UNTITLED.to_string(),
            language: language_for_tag(resolver, c.language()),
            content: c.content().to_string(),
        });

        Self::from_units(from_attachments.chain(from_codeblocks).collect())
    }

    /// A single untitled unit holding `text` as-is.
    pub fn raw_text(text: &str) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        Self::from_units(vec![PasteUnit {
            title: UNTITLED.to_string(),
            language: AUTODETECT.to_string(),
            content: text.to_string(),
        }])
    }

    fn from_units(units: Vec<PasteUnit>) -> Option<Self> {
        if units.is_empty() {
            None
        } else {
            Some(Self { units })
        }
    }

    pub fn units(&self) -> &[PasteUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Always false; an empty batch is never built.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn into_units(self) -> Vec<PasteUnit> {
        self.units
    }
}
