pub mod batch;
pub mod collab;
pub mod languages;
pub mod parsing;
pub mod pasting;
pub mod policy;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use batch::{FetchedAttachment, PasteBatch, PasteUnit, UNTITLED};
pub use codepaste_config::DestinationConfig;
pub use collab::{
    AUTODETECT, AttachmentSource, CollabError, LanguageResolver, PasteRequest, PasteSink,
};
pub use languages::BuiltinLanguages;
pub use parsing::{Codeblock, detect_codeblocks, detect_fences, has_fence, is_exclusively_fenced};
pub use pasting::{PasteError, PasteOutcome, PastingService};
pub use policy::{
    Attachment, Author, DeletionMode, DestinationId, Message, Qualification,
    qualifies_for_deletion, qualify, qualifying_attachments, qualifying_codeblocks,
};
