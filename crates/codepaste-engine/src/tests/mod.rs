//! Test doubles for the collaborator seams.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::collab::{AttachmentSource, CollabError, PasteRequest, PasteSink};
use crate::policy::Attachment;

/// Serves attachment bodies keyed by URL; unknown URLs fail to fetch.
#[derive(Default)]
pub struct MapSource(HashMap<String, String>);

impl MapSource {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        Self(
            entries
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
        )
    }
}

impl AttachmentSource for MapSource {
    fn fetch(&self, attachment: &Attachment) -> Result<String, CollabError> {
        self.0
            .get(&attachment.url)
            .cloned()
            .ok_or_else(|| CollabError::Fetch {
                filename: attachment.filename.clone(),
                reason: "not found".to_string(),
            })
    }
}

/// Accepts every paste and remembers it.
#[derive(Default)]
pub struct RecordingSink(RefCell<Vec<PasteRequest>>);

impl RecordingSink {
    pub fn requests(&self) -> Vec<PasteRequest> {
        self.0.borrow().clone()
    }
}

impl PasteSink for RecordingSink {
    fn create_paste(&self, request: &PasteRequest) -> Result<String, CollabError> {
        let mut requests = self.0.borrow_mut();
        requests.push(request.clone());
        Ok(format!("https://paste.example/{}", requests.len()))
    }
}

/// Rejects every paste.
pub struct FailingSink;

impl PasteSink for FailingSink {
    fn create_paste(&self, _request: &PasteRequest) -> Result<String, CollabError> {
        Err(CollabError::Rejected("service unavailable".to_string()))
    }
}
