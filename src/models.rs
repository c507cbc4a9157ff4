use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContactId(String);

impl ContactId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContactId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presence {
    Online,
    /// The last-seen label only exists while the contact is offline.
    Offline { last_seen: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    pub status: String,
    pub presence: Presence,
}

impl Contact {
    pub fn is_online(&self) -> bool {
        matches!(self.presence, Presence::Online)
    }

    pub fn last_seen(&self) -> Option<&str> {
        match &self.presence {
            Presence::Online => None,
            Presence::Offline { last_seen } => last_seen.as_deref(),
        }
    }

    /// Uppercased first character of the display name, used as the avatar.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }

    /// Line shown under the name in a thread header.
    pub fn subtitle(&self) -> &str {
        if self.is_online() { "Online" } else { &self.status }
    }

    /// Badge shown next to the name in the contact list.
    pub fn presence_label(&self) -> Option<&str> {
        if self.is_online() { Some("Online") } else { self.last_seen() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Sent,
    Received,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub timestamp: DateTime<Local>,
    pub direction: Direction,
}

impl Message {
    pub fn is_sent(&self) -> bool {
        self.direction == Direction::Sent
    }

    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%I:%M %p").to_string()
    }
}
