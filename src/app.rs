use crate::config::Config;
use crate::delivery::{ReplyTicket, SimulatedDelivery};
use crate::directory::ContactDirectory;
use crate::models::{Contact, ContactId, Message};
use crate::router::{DeviceClass, Route, RouteContext, route};
use crate::session::Session;
use crate::status::StatusEditor;
use crate::store::ConversationStore;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Welcome,
}

impl Notification {
    pub fn title(&self) -> &'static str {
        match self {
            Notification::Welcome => "Welcome to Parley!",
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            Notification::Welcome => "You're now connected and ready to chat.",
        }
    }
}

/// All client state. Views read it through `&Messenger` and change it only
/// through the methods below.
#[derive(Debug)]
pub struct Messenger {
    directory: ContactDirectory,
    store: ConversationStore,
    session: Session,
    status_editor: StatusEditor,
    delivery: SimulatedDelivery,
    device: DeviceClass,
}

impl Messenger {
    pub fn new(config: &Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: &Config, rng: StdRng) -> Self {
        let (min, max) = config.reply_delay_range();
        let mut store = ConversationStore::new();
        if config.seed_demo_conversations {
            store.seed_demo();
        }
        Self {
            directory: ContactDirectory::demo(),
            store,
            session: Session::new(config.default_status.clone()),
            status_editor: StatusEditor::default(),
            delivery: SimulatedDelivery::with_rng(min, max, rng),
            device: DeviceClass::default(),
        }
    }

    pub fn contacts(&self) -> &ContactDirectory {
        &self.directory
    }

    pub fn contact(&self, id: &ContactId) -> Option<&Contact> {
        self.directory.get(id)
    }

    pub fn conversation(&self, id: &ContactId) -> &[Message] {
        self.store.messages(id)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status_editor(&self) -> &StatusEditor {
        &self.status_editor
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    pub fn set_device(&mut self, device: DeviceClass) {
        if self.device != device {
            log::debug!("device class changed to {device:?}");
            self.device = device;
        }
    }

    pub fn view(&self) -> Route {
        route(RouteContext {
            registered: self.session.is_registered(),
            device: self.device,
            thread_active: self.session.thread_active(),
            selected: self.session.selected(),
        })
    }

    pub fn begin_registration(&mut self, phone: &str) -> Option<String> {
        let accepted = self.session.begin_registration(phone);
        if accepted.is_none() {
            log::debug!("registration attempt ignored");
        }
        accepted
    }

    pub fn complete_registration(&mut self, phone: &str) -> Option<Notification> {
        if self.session.complete_registration(phone) {
            log::info!("registered as {phone}");
            Some(Notification::Welcome)
        } else {
            None
        }
    }

    pub fn abort_registration(&mut self) {
        self.session.abort_registration();
    }

    pub fn select_contact(&mut self, id: &ContactId) {
        if !self.session.is_registered() || !self.directory.contains(id) {
            log::debug!("ignoring selection of {id}");
            return;
        }
        let open_thread = self.device == DeviceClass::Mobile;
        self.session.select(id.clone(), open_thread);
    }

    pub fn back(&mut self) {
        self.session.back();
    }

    /// Stores a sent message and returns the reply owed for it.
    pub fn send_message(&mut self, to: &ContactId, text: &str) -> Option<ReplyTicket> {
        if !self.session.is_registered() || !self.directory.contains(to) {
            log::debug!("ignoring send to {to}");
            return None;
        }
        let sent = self.store.send(to, text)?;
        log::info!("sent {} to {to}", sent.id);
        Some(self.delivery.ticket(to.clone()))
    }

    pub fn deliver_reply(&mut self, ticket: &ReplyTicket) -> &Message {
        let text = self.delivery.pick_reply();
        let reply = self.store.receive(&ticket.contact, text);
        log::info!("reply {} from {}", reply.id, ticket.contact);
        reply
    }

    pub fn open_status_editor(&mut self) {
        self.status_editor.open();
    }

    pub fn close_status_editor(&mut self) {
        self.status_editor.close();
    }

    pub fn set_status_draft(&mut self, draft: &str) {
        self.status_editor.set_draft(draft);
    }

    pub fn choose_preset_status(&mut self, preset: &str) {
        if let Some(status) = self.status_editor.choose_preset(preset) {
            self.session.set_status(status);
        }
    }

    pub fn submit_custom_status(&mut self) {
        if let Some(status) = self.status_editor.submit_custom() {
            self.session.set_status(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;

    fn messenger() -> Messenger {
        let config = Config {
            seed_demo_conversations: false,
            ..Config::default()
        };
        Messenger::with_rng(&config, StdRng::seed_from_u64(5))
    }

    fn registered(device: DeviceClass) -> Messenger {
        let mut m = messenger();
        m.set_device(device);
        let phone = m.begin_registration("+15551234567").expect("accepted");
        assert_eq!(m.complete_registration(&phone), Some(Notification::Welcome));
        m
    }

    #[test]
    fn starts_on_registration_view() {
        let m = messenger();
        assert_eq!(m.view(), Route::Registration);
        assert_eq!(m.session().status(), crate::config::DEFAULT_STATUS);
    }

    #[test]
    fn registration_happens_once() {
        let mut m = messenger();
        let phone = m.begin_registration("+15551234567").expect("accepted");
        assert_eq!(m.complete_registration(&phone), Some(Notification::Welcome));
        assert_eq!(m.complete_registration(&phone), None);
        assert_eq!(m.begin_registration("+15559999999"), None);
        assert_eq!(m.session().phone(), Some("+15551234567"));
        assert_ne!(m.view(), Route::Registration);
    }

    #[test]
    fn gate_blocks_messaging_before_registration() {
        let mut m = messenger();
        let john = ContactId::new("1");
        assert!(m.send_message(&john, "hi").is_none());
        m.select_contact(&john);
        assert!(m.session().selected().is_none());
        assert!(m.conversation(&john).is_empty());
    }

    #[test]
    fn mobile_select_opens_thread_and_back_returns() {
        let mut m = registered(DeviceClass::Mobile);
        assert_eq!(m.view(), Route::ContactList);

        let jane = ContactId::new("2");
        m.select_contact(&jane);
        assert_eq!(m.view(), Route::Thread { contact: jane });

        m.back();
        assert_eq!(m.view(), Route::ContactList);
        assert!(m.session().selected().is_none());
    }

    #[test]
    fn desktop_select_keeps_both_panes() {
        let mut m = registered(DeviceClass::Desktop);
        assert_eq!(m.view(), Route::Split { contact: None });

        let mike = ContactId::new("3");
        m.select_contact(&mike);
        assert!(!m.session().thread_active());
        assert_eq!(m.view(), Route::Split { contact: Some(mike) });
    }

    #[test]
    fn unknown_contact_is_not_selectable() {
        let mut m = registered(DeviceClass::Mobile);
        m.select_contact(&ContactId::new("99"));
        assert_eq!(m.view(), Route::ContactList);
        assert!(m.send_message(&ContactId::new("99"), "hello").is_none());
    }

    #[test]
    fn send_then_reply_appends_in_order() {
        let mut m = registered(DeviceClass::Desktop);
        let john = ContactId::new("1");
        let ticket = m.send_message(&john, " hello ").expect("reply owed");
        assert_eq!(ticket.contact, john);

        m.deliver_reply(&ticket);
        let thread = m.conversation(&john);
        assert_eq!(thread.len(), 2);
        assert_eq!(thread[0].text, "hello");
        assert_eq!(thread[0].direction, Direction::Sent);
        assert_eq!(thread[1].direction, Direction::Received);
        assert!(crate::delivery::CANNED_REPLIES.contains(&thread[1].text.as_str()));
    }

    #[test]
    fn blank_send_owes_no_reply() {
        let mut m = registered(DeviceClass::Desktop);
        let john = ContactId::new("1");
        assert!(m.send_message(&john, "   ").is_none());
        assert!(m.conversation(&john).is_empty());
    }

    #[test]
    fn status_updates_through_editor() {
        let mut m = registered(DeviceClass::Desktop);
        m.open_status_editor();
        m.choose_preset_status("Busy");
        assert_eq!(m.session().status(), "Busy");
        assert!(!m.status_editor().is_open());

        m.open_status_editor();
        m.set_status_draft("");
        m.submit_custom_status();
        assert_eq!(m.session().status(), "Busy");
        assert!(m.status_editor().is_open());

        m.set_status_draft("Walking the dog");
        m.submit_custom_status();
        assert_eq!(m.session().status(), "Walking the dog");
    }

    #[test]
    fn seeds_demo_history_when_enabled() {
        let m = Messenger::with_rng(&Config::default(), StdRng::seed_from_u64(1));
        assert_eq!(m.conversation(&ContactId::new("1")).len(), 2);
        assert!(m.conversation(&ContactId::new("4")).is_empty());
    }
}
