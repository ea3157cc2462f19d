use std::str::FromStr;

use codepaste_config::DestinationConfig;

use crate::parsing::{Codeblock, detect_codeblocks, is_exclusively_fenced};

use super::message::{Attachment, DestinationId};

/// What happens to the source message once its content has been pasted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeletionMode {
    /// Always delete.
    Delete,
    /// Never delete.
    Keep,
    /// Delete only when nothing unpasted would be lost.
    #[default]
    Auto,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown deletion mode `{0}` (expected delete, keep or auto)")]
pub struct UnknownDeletionMode(pub String);

impl FromStr for DeletionMode {
    type Err = UnknownDeletionMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delete" => Ok(Self::Delete),
            "keep" => Ok(Self::Keep),
            "auto" => Ok(Self::Auto),
            _ => Err(UnknownDeletionMode(s.to_string())),
        }
    }
}

/// The parts of one message selected for pasting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qualification<'a> {
    /// Qualifying codeblocks, in order of appearance.
    pub codeblocks: Vec<Codeblock>,
    /// Qualifying attachments, in message order.
    pub attachments: Vec<&'a Attachment>,
    /// How many codeblocks the text contained before filtering.
    pub detected: usize,
}

impl Qualification<'_> {
    pub fn is_empty(&self) -> bool {
        self.codeblocks.is_empty() && self.attachments.is_empty()
    }
}

/// Codeblocks in `text` that the destination's rules select for pasting.
///
/// Exceeding the count threshold selects every codeblock; otherwise each
/// codeblock longer than the line threshold is selected on its own. Text
/// outside fences blocks everything unless the guild opted in to pasting it.
pub fn qualifying_codeblocks(
    text: &str,
    destination: DestinationId,
    config: &DestinationConfig,
) -> Vec<Codeblock> {
    select_codeblocks(text, detect_codeblocks(text), destination, config)
}

pub(crate) fn select_codeblocks(
    text: &str,
    detected: Vec<Codeblock>,
    destination: DestinationId,
    config: &DestinationConfig,
) -> Vec<Codeblock> {
    if config.is_ignored(destination.0) {
        log::debug!("channel {} is exempt from auto-pasting", destination.0);
        return vec![];
    }
    if detected.is_empty() {
        return vec![];
    }
    if !config.auto_paste_if_text && !is_exclusively_fenced(text) {
        log::debug!("message has text outside codeblocks, not pasting");
        return vec![];
    }

    if let Some(limit) = config.count_limit()
        && detected.len() > limit
    {
        log::debug!("{} codeblocks exceed count threshold {limit}", detected.len());
        return detected;
    }

    if let Some(limit) = config.line_limit() {
        return detected
            .into_iter()
            .filter(|block| block.line_count() > limit)
            .collect();
    }

    vec![]
}

/// Attachments the destination's rules select for pasting: `text/plain`
/// files and `message.txt`, when attachment pasting is on.
pub fn qualifying_attachments<'a>(
    attachments: &'a [Attachment],
    destination: DestinationId,
    config: &DestinationConfig,
) -> Vec<&'a Attachment> {
    if config.is_ignored(destination.0) || !config.paste_attachments {
        return vec![];
    }

    attachments.iter().filter(|a| is_pasteable(a)).collect()
}

/// Whether an attachment's body can be pasted as text.
pub fn is_pasteable(attachment: &Attachment) -> bool {
    attachment.is_plain_text() || attachment.is_placeholder()
}

/// Whether the source message may be deleted after its qualifying content
/// was pasted.
///
/// Under [`DeletionMode::Auto`] the message goes only if nothing would be
/// lost: its text is nothing but codeblocks which all qualified, and every
/// attachment is plain text and was pasted.
pub fn qualifies_for_deletion(
    text: &str,
    attachments: &[Attachment],
    qualification: &Qualification<'_>,
    mode: DeletionMode,
) -> bool {
    match mode {
        DeletionMode::Delete => true,
        DeletionMode::Keep => false,
        DeletionMode::Auto => {
            if qualification.is_empty() {
                return false;
            }

            let text_extracted = text.trim().is_empty()
                || (is_exclusively_fenced(text)
                    && qualification.detected == qualification.codeblocks.len());
            let attachments_extracted = attachments.iter().all(Attachment::is_plain_text)
                && qualification.attachments.len() == attachments.len();

            text_extracted && attachments_extracted
        }
    }
}
