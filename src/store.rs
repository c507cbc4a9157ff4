use crate::models::{ContactId, Direction, Message, MessageId};
use chrono::{DateTime, Duration, Local};
use std::collections::HashMap;

/// Hands out message ids that sort in creation order within one process.
#[derive(Debug, Default)]
struct IdGenerator {
    seq: u64,
}

impl IdGenerator {
    fn next(&mut self, at: DateTime<Local>) -> MessageId {
        self.seq += 1;
        MessageId::new(format!("{}-{}", at.timestamp_millis(), self.seq))
    }
}

/// Per-contact message sequences. Append-only: nothing is reordered,
/// replaced or deduplicated once stored.
#[derive(Debug, Default)]
pub struct ConversationStore {
    threads: HashMap<ContactId, Vec<Message>>,
    ids: IdGenerator,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never fails: a contact without history has an empty conversation.
    pub fn messages(&self, contact: &ContactId) -> &[Message] {
        self.threads.get(contact).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn last_message(&self, contact: &ContactId) -> Option<&Message> {
        self.messages(contact).last()
    }

    /// Appends a `Sent` message with the trimmed text. Blank text is ignored.
    pub fn send(&mut self, contact: &ContactId, raw: &str) -> Option<&Message> {
        let text = raw.trim();
        if text.is_empty() {
            log::debug!("ignoring blank message to {contact}");
            return None;
        }
        Some(self.append(contact, text, Direction::Sent, Local::now()))
    }

    pub fn receive(&mut self, contact: &ContactId, text: &str) -> &Message {
        self.append(contact, text, Direction::Received, Local::now())
    }

    fn append(
        &mut self,
        contact: &ContactId,
        text: &str,
        direction: Direction,
        timestamp: DateTime<Local>,
    ) -> &Message {
        let message = Message {
            id: self.ids.next(timestamp),
            text: text.to_string(),
            timestamp,
            direction,
        };
        let thread = self.threads.entry(contact.clone()).or_default();
        thread.push(message);
        &thread[thread.len() - 1]
    }

    /// Fills the store with a few back-dated messages so the mockup has
    /// something to show on first launch.
    pub fn seed_demo(&mut self) {
        let now = Local::now();
        let john = ContactId::new("1");
        let jane = ContactId::new("2");
        self.append(
            &john,
            "Hey! How are you doing?",
            Direction::Received,
            now - Duration::minutes(10),
        );
        self.append(
            &john,
            "I'm doing great! Thanks for asking. How about you?",
            Direction::Sent,
            now - Duration::minutes(5),
        );
        self.append(
            &jane,
            "Can we catch up later? I'm quite busy right now.",
            Direction::Received,
            now - Duration::hours(2),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_contact_has_empty_conversation() {
        let store = ConversationStore::new();
        assert!(store.messages(&ContactId::new("3")).is_empty());
        assert!(store.last_message(&ContactId::new("3")).is_none());
    }

    #[test]
    fn blank_text_leaves_store_unchanged() {
        let mut store = ConversationStore::new();
        let id = ContactId::new("1");
        store.send(&id, "first");
        let before = store.messages(&id).to_vec();

        assert!(store.send(&id, "").is_none());
        assert!(store.send(&id, "  \t\n ").is_none());
        assert_eq!(store.messages(&id), before.as_slice());
    }

    #[test]
    fn send_appends_trimmed_sent_message() {
        let mut store = ConversationStore::new();
        let id = ContactId::new("1");
        let before = Local::now();

        let msg = store.send(&id, "  hello ").cloned().expect("message stored");
        assert_eq!(msg.text, "hello");
        assert_eq!(msg.direction, Direction::Sent);
        assert!(msg.timestamp >= before);
        assert_eq!(store.messages(&id), [msg]);
    }

    #[test]
    fn appends_keep_order_and_unique_ids() {
        let mut store = ConversationStore::new();
        let id = ContactId::new("4");
        store.send(&id, "one");
        store.receive(&id, "two");
        store.send(&id, "three");

        let thread = store.messages(&id);
        let texts: Vec<_> = thread.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
        assert_ne!(thread[0].id, thread[1].id);
        assert_ne!(thread[1].id, thread[2].id);
        assert_eq!(store.last_message(&id).map(|m| m.text.as_str()), Some("three"));
    }

    #[test]
    fn seeds_two_demo_threads() {
        let mut store = ConversationStore::new();
        store.seed_demo();
        assert_eq!(store.messages(&ContactId::new("1")).len(), 2);
        assert_eq!(store.messages(&ContactId::new("2")).len(), 1);
        assert!(store.messages(&ContactId::new("3")).is_empty());
        let john = store.messages(&ContactId::new("1"));
        assert!(john[0].timestamp < john[1].timestamp);
    }
}
