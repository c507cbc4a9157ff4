use crate::models::{Contact, ContactId, Presence};

/// Read-only list of messaging peers, in display order.
#[derive(Debug, Clone, Default)]
pub struct ContactDirectory {
    contacts: Vec<Contact>,
}

impl ContactDirectory {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    pub fn demo() -> Self {
        let entry = |id: &str, name: &str, phone: &str, status: &str, presence| Contact {
            id: ContactId::new(id),
            name: name.to_string(),
            phone: phone.to_string(),
            status: status.to_string(),
            presence,
        };
        let offline = |label: &str| Presence::Offline {
            last_seen: Some(label.to_string()),
        };

        Self::new(vec![
            entry("1", "John Doe", "+1234567890", "Hey there! I am using Parley.", Presence::Online),
            entry("2", "Jane Smith", "+1234567891", "Busy", offline("2 hours ago")),
            entry("3", "Mike Johnson", "+1234567892", "At work", Presence::Online),
            entry("4", "Sarah Wilson", "+1234567893", "Available", offline("5 minutes ago")),
        ])
    }

    pub fn get(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.id == id)
    }

    pub fn contains(&self, id: &ContactId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}
