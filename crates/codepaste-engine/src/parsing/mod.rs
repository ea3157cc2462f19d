//! # Codeblock Parsing
//!
//! Two-phase extraction of codeblocks from chat message text.
//!
//! ## Parsing Phases
//!
//! 1. **Fence scanning** (`fence`): the text is walked left to right for
//!    triple-backtick markers, yielding the raw text strictly between each
//!    matching pair
//!
//! 2. **Codeblock parsing** (`codeblock`): each raw region is split into an
//!    optional language tag and a trimmed content body
//!
//! ## Key Invariants
//!
//! - Malformed input is never an error: an unterminated fence is dropped,
//!   text outside fences is ignored
//! - Scanning borrows the input and allocates nothing per fence
//! - Language tags are not validated here; resolving them to a real language
//!   is left to a [`LanguageResolver`](crate::collab::LanguageResolver)

pub mod codeblock;
pub mod cursor;
pub mod fence;

pub use codeblock::Codeblock;
pub use fence::{FENCE, Fences, detect_fences, has_fence, is_exclusively_fenced};

/// Every codeblock in `text`, in order of appearance.
pub fn detect_codeblocks(text: &str) -> Vec<Codeblock> {
    if text.trim().is_empty() {
        return vec![];
    }
    detect_fences(text).map(Codeblock::parse).collect()
}
