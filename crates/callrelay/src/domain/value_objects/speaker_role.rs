//! SpeakerRole Value Object
//!
//! Author of a transcript message as reported by the voice provider.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeakerRole {
    /// The person on the phone
    User,
    /// The voice agent
    Agent,
    /// Tool calls, tool results and anything else the provider records
    Other(String),
}

impl SpeakerRole {
    /// Parse a provider role string such as `MESSAGE_ROLE_USER`
    pub fn parse(s: &str) -> Self {
        match s {
            "MESSAGE_ROLE_USER" | "user" => Self::User,
            "MESSAGE_ROLE_AGENT" | "agent" => Self::Agent,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "MESSAGE_ROLE_USER",
            Self::Agent => "MESSAGE_ROLE_AGENT",
            Self::Other(s) => s,
        }
    }

    /// Transcript label, `None` for roles that are not part of the conversation
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::User => Some("Customer"),
            Self::Agent => Some("Agent"),
            Self::Other(_) => None,
        }
    }
}

impl Serialize for SpeakerRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SpeakerRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}
