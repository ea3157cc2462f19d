//! # Qualification Policy
//!
//! Decides which parts of a message are pasted, and whether the message is
//! deleted afterwards, from a guild's [`DestinationConfig`] snapshot.
//!
//! - **`message`**: the chat message, author and attachment metadata
//! - **`qualify`**: the codeblock, attachment and deletion decisions
//!
//! Every decision is a pure function of its inputs; nothing here performs I/O.

pub mod message;
pub mod qualify;

use codepaste_config::DestinationConfig;

use crate::parsing::detect_codeblocks;

pub use message::{Attachment, Author, DestinationId, Message, PLACEHOLDER_FILENAME};
pub use qualify::{
    DeletionMode, Qualification, UnknownDeletionMode, is_pasteable, qualifies_for_deletion,
    qualifying_attachments, qualifying_codeblocks,
};

/// Runs codeblock and attachment qualification for `message` in one pass.
pub fn qualify<'a>(message: &'a Message, config: &DestinationConfig) -> Qualification<'a> {
    let detected = detect_codeblocks(&message.content);
    let detected_count = detected.len();

    Qualification {
        codeblocks: qualify::select_codeblocks(
            &message.content,
            detected,
            message.channel,
            config,
        ),
        attachments: qualifying_attachments(&message.attachments, message.channel, config),
        detected: detected_count,
    }
}
