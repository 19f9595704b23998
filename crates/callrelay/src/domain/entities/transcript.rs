//! Transcript - Conversation text retrieved from the voice provider

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::SpeakerRole;

/// A single message as listed by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptMessage {
    pub role: SpeakerRole,
    pub text: Option<String>,
}

impl TranscriptMessage {
    pub fn new(role: SpeakerRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: Some(text.into()),
        }
    }

    /// Speaker-labelled transcript line
    ///
    /// `None` for non-conversational roles and for messages without text.
    pub fn line(&self) -> Option<String> {
        let label = self.role.label()?;
        match self.text.as_deref() {
            Some(text) if !text.is_empty() => Some(format!("{}: {}", label, text)),
            _ => None,
        }
    }
}

/// One page of the provider's message list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessagePage {
    pub messages: Vec<TranscriptMessage>,
    /// Opaque cursor for the following page, `None` on the last page
    pub next_cursor: Option<String>,
}

/// Assembled conversation transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    /// Retrieval stopped at the page cap before the provider ran out of pages
    pub truncated: bool,
}

impl Transcript {
    /// Join messages, in the order given, into newline-separated lines
    pub fn from_messages<'a, I>(messages: I, truncated: bool) -> Self
    where
        I: IntoIterator<Item = &'a TranscriptMessage>,
    {
        let text = messages
            .into_iter()
            .filter_map(TranscriptMessage::line)
            .collect::<Vec<_>>()
            .join("\n");
        Self { text, truncated }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_labelled_and_ordered() {
        let messages = vec![
            TranscriptMessage::new(SpeakerRole::User, "A"),
            TranscriptMessage::new(SpeakerRole::Agent, "B"),
        ];

        let transcript = Transcript::from_messages(&messages, false);
        assert_eq!(transcript.text, "Customer: A\nAgent: B");
        assert!(!transcript.truncated);
    }

    #[test]
    fn test_non_conversational_and_empty_messages_are_dropped() {
        let messages = vec![
            TranscriptMessage::new(SpeakerRole::parse("MESSAGE_ROLE_TOOL_CALL"), "lookup"),
            TranscriptMessage::new(SpeakerRole::Agent, ""),
            TranscriptMessage {
                role: SpeakerRole::User,
                text: None,
            },
            TranscriptMessage::new(SpeakerRole::User, "Hello?"),
        ];

        let transcript = Transcript::from_messages(&messages, false);
        assert_eq!(transcript.text, "Customer: Hello?");
    }
}
