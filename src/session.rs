use crate::models::ContactId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Registration {
    #[default]
    Unregistered,
    Verifying { phone: String },
    Registered { phone: String },
}

/// Local user's registration plus transient navigation state.
#[derive(Debug, Clone)]
pub struct Session {
    registration: Registration,
    status: String,
    selected: Option<ContactId>,
    thread_active: bool,
}

impl Session {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            registration: Registration::Unregistered,
            status: status.into(),
            selected: None,
            thread_active: false,
        }
    }

    pub fn registration(&self) -> &Registration {
        &self.registration
    }

    pub fn is_registered(&self) -> bool {
        matches!(self.registration, Registration::Registered { .. })
    }

    pub fn is_verifying(&self) -> bool {
        matches!(self.registration, Registration::Verifying { .. })
    }

    pub fn phone(&self) -> Option<&str> {
        match &self.registration {
            Registration::Registered { phone } => Some(phone.as_str()),
            _ => None,
        }
    }

    /// Starts verification for a non-blank number. Returns the trimmed number
    /// when the attempt was accepted.
    pub fn begin_registration(&mut self, raw: &str) -> Option<String> {
        let phone = raw.trim();
        if phone.is_empty() || self.registration != Registration::Unregistered {
            return None;
        }
        self.registration = Registration::Verifying {
            phone: phone.to_string(),
        };
        Some(phone.to_string())
    }

    /// Returns `true` only for the single transition into `Registered`.
    pub fn complete_registration(&mut self, phone: &str) -> bool {
        match &self.registration {
            Registration::Verifying { phone: pending } if pending == phone => {
                self.registration = Registration::Registered {
                    phone: phone.to_string(),
                };
                true
            }
            _ => false,
        }
    }

    pub fn abort_registration(&mut self) {
        if self.is_verifying() {
            self.registration = Registration::Unregistered;
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: String) {
        self.status = status;
    }

    pub fn selected(&self) -> Option<&ContactId> {
        self.selected.as_ref()
    }

    pub fn thread_active(&self) -> bool {
        self.thread_active
    }

    pub fn select(&mut self, contact: ContactId, open_thread: bool) {
        self.selected = Some(contact);
        if open_thread {
            self.thread_active = true;
        }
    }

    pub fn back(&mut self) {
        self.selected = None;
        self.thread_active = false;
    }
}
