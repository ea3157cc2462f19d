//! Drives one paste end to end: qualify, fetch, build, submit, and decide
//! what to do with the source message.
//!
//! The chat client stays outside: the outcome says whether to delete the
//! message and what to reply, and the caller acts on it.

use codepaste_config::DestinationConfig;

use crate::batch::{FetchedAttachment, PasteBatch};
use crate::collab::{AttachmentSource, CollabError, LanguageResolver, PasteRequest, PasteSink};
use crate::parsing::{detect_codeblocks, is_exclusively_fenced};
use crate::policy::{
    self, Attachment, Author, DeletionMode, Message, Qualification, is_pasteable,
    qualifies_for_deletion,
};

#[derive(Debug, thiserror::Error)]
pub enum PasteError {
    #[error("Failed to create paste: {0}")]
    Sink(#[source] CollabError),
}

/// Result of a successful paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteOutcome {
    /// Locator of the created paste.
    pub url: String,
    /// Whether the caller should delete the source message.
    pub delete_source: bool,
    /// Reply to post in the source channel.
    pub reply: String,
    /// Number of units in the paste.
    pub unit_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subject {
    Codeblocks,
    Attachments,
    Mixed,
    Message,
}

impl Subject {
    fn of(attachments: usize, codeblocks: usize) -> Self {
        match (attachments, codeblocks) {
            (0, _) => Self::Codeblocks,
            (_, 0) => Self::Attachments,
            _ => Self::Mixed,
        }
    }

    fn phrase(self, count: usize) -> &'static str {
        match (self, count) {
            (Self::Codeblocks, 1) => "codeblock was",
            (Self::Codeblocks, _) => "codeblocks were",
            (Self::Attachments, 1) => "attachment was",
            (Self::Attachments, _) => "attachments were",
            (Self::Mixed, _) => "attachments and codeblocks were",
            (Self::Message, _) => "message was",
        }
    }
}

pub struct PastingService<'a> {
    attachments: &'a dyn AttachmentSource,
    languages: &'a dyn LanguageResolver,
    sink: &'a dyn PasteSink,
}

impl<'a> PastingService<'a> {
    pub fn new(
        attachments: &'a dyn AttachmentSource,
        languages: &'a dyn LanguageResolver,
        sink: &'a dyn PasteSink,
    ) -> Self {
        Self {
            attachments,
            languages,
            sink,
        }
    }

    /// Pastes whatever in `message` the guild's rules select.
    ///
    /// Returns `Ok(None)` when nothing qualifies. Attachments that fail to
    /// fetch are skipped, and their message is then kept.
    pub fn auto_paste(
        &self,
        message: &Message,
        config: &DestinationConfig,
    ) -> Result<Option<PasteOutcome>, PasteError> {
        if config.is_ignored(message.channel.0) {
            log::debug!("channel {} is exempt from auto-pasting", message.channel.0);
            return Ok(None);
        }

        let qualification = policy::qualify(message, config);
        if qualification.is_empty() {
            return Ok(None);
        }

        let fetched = self.fetch_all(&qualification.attachments);
        let Some(batch) = PasteBatch::build(&fetched, &qualification.codeblocks, self.languages)
        else {
            return Ok(None);
        };

        let subject = Subject::of(fetched.len(), qualification.codeblocks.len());
        let delete_source = fetched.len() == qualification.attachments.len()
            && qualifies_for_deletion(
                &message.content,
                &message.attachments,
                &qualification,
                DeletionMode::Auto,
            );

        self.submit(&message.author, &message.author, batch, subject, delete_source, true)
            .map(Some)
    }

    /// Pastes a message on a user's request, regardless of thresholds.
    ///
    /// Text made only of codeblocks pastes every codeblock; otherwise
    /// pasteable attachments are pasted; failing both, the raw text is pasted
    /// as a single unit.
    pub fn paste_on_request(
        &self,
        message: &Message,
        paster: &Author,
        config: &DestinationConfig,
        mode: DeletionMode,
    ) -> Result<Option<PasteOutcome>, PasteError> {
        let text = message.content.as_str();
        let pasteable: Vec<&Attachment> = if config.paste_attachments {
            message.attachments.iter().filter(|a| is_pasteable(a)).collect()
        } else {
            vec![]
        };

        let (batch, subject, qualification) =
            if message.attachments.is_empty() && is_exclusively_fenced(text) {
                let codeblocks = detect_codeblocks(text);
                let batch = PasteBatch::build(&[], &codeblocks, self.languages);
                let qualification = Qualification {
                    detected: codeblocks.len(),
                    codeblocks,
                    attachments: vec![],
                };
                (batch, Subject::Codeblocks, qualification)
            } else if !pasteable.is_empty() {
                let fetched = self.fetch_all(&pasteable);
                let batch = PasteBatch::build(&fetched, &[], self.languages);
                let qualification = Qualification {
                    codeblocks: vec![],
                    detected: detect_codeblocks(text).len(),
                    attachments: if fetched.len() == pasteable.len() {
                        pasteable
                    } else {
                        vec![]
                    },
                };
                (batch, Subject::Attachments, qualification)
            } else {
                let qualification = Qualification {
                    codeblocks: vec![],
                    attachments: vec![],
                    detected: 0,
                };
                (PasteBatch::raw_text(text), Subject::Message, qualification)
            };

        let Some(batch) = batch else {
            log::debug!("nothing to paste in message by {}", message.author.name);
            return Ok(None);
        };

        let delete_source = match (mode, subject) {
            // The whole text went into the paste.
            (DeletionMode::Auto, Subject::Message) => message.attachments.is_empty(),
            _ => qualifies_for_deletion(text, &message.attachments, &qualification, mode),
        };

        self.submit(&message.author, paster, batch, subject, delete_source, false)
            .map(Some)
    }

    fn fetch_all(&self, attachments: &[&Attachment]) -> Vec<FetchedAttachment> {
        attachments
            .iter()
            .filter_map(|a| match self.attachments.fetch(a) {
                Ok(content) => Some(FetchedAttachment::new(a, content)),
                Err(e) => {
                    log::warn!("Skipping attachment {}: {e}", a.filename);
                    None
                }
            })
            .collect()
    }

    fn submit(
        &self,
        author: &Author,
        paster: &Author,
        batch: PasteBatch,
        subject: Subject,
        delete_source: bool,
        automatic: bool,
    ) -> Result<PasteOutcome, PasteError> {
        let unit_count = batch.len();
        let request = PasteRequest::new(author, batch.into_units());

        let url = self.sink.create_paste(&request).map_err(|e| {
            log::warn!("Paste by {} was not created: {e}", author.name);
            PasteError::Sink(e)
        })?;

        let phrase = subject.phrase(unit_count);
        let automatically = if automatic { " automatically" } else { "" };
        log::info!(
            "{unit_count} {phrase}{automatically} pasted to {url} ({} by {})",
            author.name,
            paster.name
        );

        Ok(PasteOutcome {
            reply: format!(
                "{}, your {phrase}{automatically} pasted to {url}",
                author.mention()
            ),
            url,
            delete_source,
            unit_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::BuiltinLanguages;
    use crate::policy::DestinationId;
    use crate::tests::{FailingSink, MapSource, RecordingSink};
    use pretty_assertions::assert_eq;

    fn author() -> Author {
        Author::new(42, "ferris")
    }

    fn message(text: &str) -> Message {
        Message::new(author(), DestinationId(1), text)
    }

    fn lines(n: usize) -> String {
        let body: Vec<String> = (0..n).map(|i| format!("let x{i} = {i};")).collect();
        format!("```rust\n{}\n```", body.join("\n"))
    }

    fn config(line_threshold: i32) -> DestinationConfig {
        DestinationConfig {
            line_threshold,
            paste_attachments: true,
            ..DestinationConfig::default()
        }
    }

    #[test]
    fn auto_paste_long_codeblock() {
        let source = MapSource::default();
        let sink = RecordingSink::default();
        let service = PastingService::new(&source, &BuiltinLanguages, &sink);

        let outcome = service
            .auto_paste(&message(&lines(6)), &config(5))
            .unwrap()
            .unwrap();

        assert_eq!(outcome.url, "https://paste.example/1");
        assert!(outcome.delete_source);
        assert_eq!(outcome.unit_count, 1);
        assert_eq!(
            outcome.reply,
            "<@42>, your codeblock was automatically pasted to https://paste.example/1"
        );

        let requests = sink.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].title, "Automatic paste by ferris");
        assert_eq!(requests[0].units[0].language, "Rust");
    }

    #[test]
    fn auto_paste_nothing_qualifies_makes_no_request() {
        let source = MapSource::default();
        let sink = RecordingSink::default();
        let service = PastingService::new(&source, &BuiltinLanguages, &sink);

        let outcome = service.auto_paste(&message(&lines(2)), &config(5)).unwrap();

        assert_eq!(outcome, None);
        assert!(sink.requests().is_empty());
    }

    #[test]
    fn auto_paste_ignored_channel() {
        let source = MapSource::default();
        let sink = RecordingSink::default();
        let service = PastingService::new(&source, &BuiltinLanguages, &sink);
        let mut rules = config(0);
        rules.ignored_channels.insert(1);

        assert_eq!(service.auto_paste(&message(&lines(9)), &rules).unwrap(), None);
        assert!(sink.requests().is_empty());
    }

    #[test]
    fn auto_paste_sink_failure_is_an_error() {
        let source = MapSource::default();
        let service = PastingService::new(&source, &BuiltinLanguages, &FailingSink);

        let err = service
            .auto_paste(&message(&lines(6)), &config(5))
            .unwrap_err();

        assert!(matches!(err, PasteError::Sink(CollabError::Rejected(_))));
    }

    #[test]
    fn auto_paste_skips_failed_attachment_and_keeps_message() {
        let source = MapSource::with(&[("u1", "fn main() {}")]);
        let sink = RecordingSink::default();
        let service = PastingService::new(&source, &BuiltinLanguages, &sink);
        let msg = message("")
            .with_attachment(Attachment::new("main.rs", "text/plain", "u1"))
            .with_attachment(Attachment::new("lib.rs", "text/plain", "missing"));

        let outcome = service.auto_paste(&msg, &config(-1)).unwrap().unwrap();

        assert_eq!(outcome.unit_count, 1);
        assert!(!outcome.delete_source);
        assert_eq!(
            outcome.reply,
            "<@42>, your attachment was automatically pasted to https://paste.example/1"
        );
        assert_eq!(sink.requests()[0].units[0].title, "main.rs");
    }

    #[test]
    fn auto_paste_all_attachments_failing_is_nothing() {
        let source = MapSource::default();
        let sink = RecordingSink::default();
        let service = PastingService::new(&source, &BuiltinLanguages, &sink);
        let msg = message("").with_attachment(Attachment::new("main.rs", "text/plain", "x"));

        assert_eq!(service.auto_paste(&msg, &config(-1)).unwrap(), None);
        assert!(sink.requests().is_empty());
    }

    #[test]
    fn request_pastes_every_codeblock_and_keeps() {
        let source = MapSource::default();
        let sink = RecordingSink::default();
        let service = PastingService::new(&source, &BuiltinLanguages, &sink);
        let text = format!("{}\n```\nshort\n```", lines(1));

        let outcome = service
            .paste_on_request(
                &message(&text),
                &Author::new(7, "mod"),
                &DestinationConfig::default(),
                DeletionMode::Keep,
            )
            .unwrap()
            .unwrap();

        assert_eq!(outcome.unit_count, 2);
        assert!(!outcome.delete_source);
        assert_eq!(
            outcome.reply,
            "<@42>, your codeblocks were pasted to https://paste.example/1"
        );
    }

    #[test]
    fn request_falls_back_to_raw_text() {
        let source = MapSource::default();
        let sink = RecordingSink::default();
        let service = PastingService::new(&source, &BuiltinLanguages, &sink);
        let text = "here is my code: fn main() {}";

        let outcome = service
            .paste_on_request(
                &message(text),
                &author(),
                &DestinationConfig::default(),
                DeletionMode::Delete,
            )
            .unwrap()
            .unwrap();

        assert!(outcome.delete_source);
        assert_eq!(outcome.reply, "<@42>, your message was pasted to https://paste.example/1");
        let requests = sink.requests();
        let units = &requests[0].units;
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].content, text);
        assert_eq!(units[0].language, "Autodetect");
    }

    #[test]
    fn request_pastes_attachments_when_enabled() {
        let source = MapSource::with(&[("u1", "print(1)"), ("u2", "long message")]);
        let sink = RecordingSink::default();
        let service = PastingService::new(&source, &BuiltinLanguages, &sink);
        let msg = message("")
            .with_attachment(Attachment::new("a.py", "text/plain", "u1"))
            .with_attachment(Attachment::new("message.txt", "text/plain", "u2"));

        let outcome = service
            .paste_on_request(&msg, &author(), &config(-1), DeletionMode::Auto)
            .unwrap()
            .unwrap();

        assert!(outcome.delete_source);
        assert_eq!(
            outcome.reply,
            "<@42>, your attachments were pasted to https://paste.example/1"
        );
        let requests = sink.requests();
        let titles: Vec<&str> = requests[0]
            .units
            .iter()
            .map(|u| u.title.as_str())
            .collect();
        assert_eq!(titles, vec!["a.py", "(untitled)"]);
    }

    #[test]
    fn request_on_empty_message_is_nothing() {
        let source = MapSource::default();
        let sink = RecordingSink::default();
        let service = PastingService::new(&source, &BuiltinLanguages, &sink);

        let outcome = service
            .paste_on_request(
                &message("  "),
                &author(),
                &DestinationConfig::default(),
                DeletionMode::Delete,
            )
            .unwrap();

        assert_eq!(outcome, None);
    }
}
