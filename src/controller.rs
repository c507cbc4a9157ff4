use crate::app::{Messenger, Notification};
use crate::delivery::ReplyTicket;
use crate::events::{Command, Event};
use crate::verify::PhoneVerifier;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Spawns the fire-and-forget tasks behind registration and simulated
/// replies. Tasks never touch state; they only post an [`Event`].
#[derive(Clone)]
pub struct Effects {
    handle: Handle,
    verifier: Arc<dyn PhoneVerifier>,
    events: mpsc::UnboundedSender<Event>,
}

impl Effects {
    fn verify(&self, phone: String) {
        let verifier = self.verifier.clone();
        let events = self.events.clone();
        self.handle.spawn(async move {
            let event = match verifier.verify(&phone).await {
                Ok(()) => Event::Registered { phone },
                Err(e) => Event::RegistrationFailed {
                    phone,
                    reason: e.to_string(),
                },
            };
            let _ = events.send(event);
        });
    }

    fn schedule_reply(&self, ticket: ReplyTicket) {
        log::debug!("reply for {} due in {:?}", ticket.contact, ticket.delay);
        let events = self.events.clone();
        // Measured from the send, not from when the task first gets polled.
        let due = tokio::time::Instant::now() + ticket.delay;
        self.handle.spawn(async move {
            tokio::time::sleep_until(due).await;
            let _ = events.send(Event::ReplyDue(ticket));
        });
    }
}

/// Owns the [`Messenger`] and is the only place commands and events are
/// applied. Everything here runs on one thread.
pub struct Controller {
    messenger: Messenger,
    effects: Effects,
}

impl Controller {
    /// Returns the controller together with the receiving end of its event
    /// channel; the caller pumps it back into [`Controller::apply`].
    pub fn new(
        messenger: Messenger,
        verifier: Arc<dyn PhoneVerifier>,
        handle: Handle,
    ) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (events, rx) = mpsc::unbounded_channel();
        let effects = Effects {
            handle,
            verifier,
            events,
        };
        (Self { messenger, effects }, rx)
    }

    pub fn messenger(&self) -> &Messenger {
        &self.messenger
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Register { phone } => {
                if let Some(phone) = self.messenger.begin_registration(&phone) {
                    self.effects.verify(phone);
                }
            }
            Command::SelectContact(id) => self.messenger.select_contact(&id),
            Command::Back => self.messenger.back(),
            Command::SendMessage { to, text } => {
                if let Some(ticket) = self.messenger.send_message(&to, &text) {
                    self.effects.schedule_reply(ticket);
                }
            }
            Command::SetDevice(device) => self.messenger.set_device(device),
            Command::OpenStatusEditor => self.messenger.open_status_editor(),
            Command::CloseStatusEditor => self.messenger.close_status_editor(),
            Command::SetStatusDraft(draft) => self.messenger.set_status_draft(&draft),
            Command::ChoosePresetStatus(preset) => self.messenger.choose_preset_status(&preset),
            Command::SubmitCustomStatus => self.messenger.submit_custom_status(),
        }
    }

    pub fn apply(&mut self, event: Event) -> Option<Notification> {
        match event {
            Event::Registered { phone } => self.messenger.complete_registration(&phone),
            Event::RegistrationFailed { phone, reason } => {
                log::warn!("verification of {phone} failed: {reason}");
                self.messenger.abort_registration();
                None
            }
            Event::ReplyDue(ticket) => {
                self.messenger.deliver_reply(&ticket);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::RegistrationError;
    use crate::models::{ContactId, Direction};
    use crate::router::{DeviceClass, Route};
    use crate::verify::SimulatedVerifier;
    use async_trait::async_trait;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;
    use tokio::time::Instant;

    fn controller() -> (Controller, mpsc::UnboundedReceiver<Event>) {
        let config = Config {
            seed_demo_conversations: false,
            ..Config::default()
        };
        let messenger = Messenger::with_rng(&config, StdRng::seed_from_u64(42));
        let verifier = Arc::new(SimulatedVerifier::new(config.registration_delay()));
        Controller::new(messenger, verifier, Handle::current())
    }

    async fn registered(device: DeviceClass) -> (Controller, mpsc::UnboundedReceiver<Event>) {
        let (mut c, mut rx) = controller();
        c.handle(Command::SetDevice(device));
        c.handle(Command::Register {
            phone: "+15551234567".into(),
        });
        let event = rx.recv().await.expect("verifier reports back");
        assert_eq!(c.apply(event), Some(Notification::Welcome));
        (c, rx)
    }

    fn send(c: &mut Controller, to: &str, text: &str) {
        c.handle(Command::SendMessage {
            to: ContactId::new(to),
            text: text.into(),
        });
    }

    #[tokio::test(start_paused = true)]
    async fn registration_completes_after_simulated_delay() {
        let (mut c, mut rx) = controller();
        c.handle(Command::Register { phone: "   ".into() });
        c.handle(Command::Register {
            phone: "+15551234567".into(),
        });
        assert!(c.messenger().session().is_verifying());
        assert_eq!(c.messenger().view(), Route::Registration);

        let started = Instant::now();
        let event = rx.recv().await.expect("registered");
        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(
            event,
            Event::Registered {
                phone: "+15551234567".into()
            }
        );
        assert_eq!(c.apply(event.clone()), Some(Notification::Welcome));
        assert_eq!(c.apply(event), None);
        assert_eq!(c.messenger().session().phone(), Some("+15551234567"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_verification_returns_to_registration() {
        struct Refuse;

        #[async_trait]
        impl PhoneVerifier for Refuse {
            async fn verify(&self, phone: &str) -> Result<(), RegistrationError> {
                Err(RegistrationError::Rejected(phone.to_string()))
            }
        }

        let messenger = Messenger::new(&Config::default());
        let (mut c, mut rx) = Controller::new(messenger, Arc::new(Refuse), Handle::current());
        c.handle(Command::Register { phone: "123".into() });
        let event = rx.recv().await.expect("failure reported");
        assert!(matches!(event, Event::RegistrationFailed { .. }));
        assert_eq!(c.apply(event), None);
        assert!(!c.messenger().session().is_verifying());
        assert!(!c.messenger().session().is_registered());
    }

    #[tokio::test(start_paused = true)]
    async fn one_reply_per_send_within_window() {
        let (mut c, mut rx) = registered(DeviceClass::Desktop).await;
        let john = ContactId::new("1");
        let started = Instant::now();
        send(&mut c, "1", "hello");

        let thread = c.messenger().conversation(&john);
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].direction, Direction::Sent);

        tokio::time::advance(Duration::from_millis(999)).await;
        assert!(rx.try_recv().is_err());

        let event = rx.recv().await.expect("reply scheduled");
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(1000), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(3001), "{elapsed:?}");
        c.apply(event);

        let thread = c.messenger().conversation(&john);
        assert_eq!(thread.len(), 2);
        assert_eq!(thread[1].direction, Direction::Received);
        assert!(thread[1].timestamp >= thread[0].timestamp);

        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn blank_send_schedules_nothing() {
        let (mut c, mut rx) = registered(DeviceClass::Desktop).await;
        send(&mut c, "1", " \n ");
        tokio::time::advance(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
        assert!(c.messenger().conversation(&ContactId::new("1")).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn replies_follow_the_contact_captured_at_send_time() {
        let (mut c, mut rx) = registered(DeviceClass::Mobile).await;
        let john = ContactId::new("1");
        let sarah = ContactId::new("4");

        c.handle(Command::SelectContact(john.clone()));
        send(&mut c, "1", "to john");
        c.handle(Command::Back);
        c.handle(Command::SelectContact(sarah.clone()));
        send(&mut c, "4", "to sarah");
        c.handle(Command::Back);
        assert_eq!(c.messenger().view(), Route::ContactList);

        for _ in 0..2 {
            let event = rx.recv().await.expect("reply");
            c.apply(event);
        }

        for (id, text) in [(&john, "to john"), (&sarah, "to sarah")] {
            let thread = c.messenger().conversation(id);
            assert_eq!(thread.len(), 2);
            assert_eq!(thread[0].text, text);
            assert_eq!(thread[1].direction, Direction::Received);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn status_commands_update_session() {
        let (mut c, _rx) = registered(DeviceClass::Desktop).await;
        c.handle(Command::OpenStatusEditor);
        c.handle(Command::ChoosePresetStatus("Busy".into()));
        assert_eq!(c.messenger().session().status(), "Busy");

        c.handle(Command::OpenStatusEditor);
        c.handle(Command::SetStatusDraft("   ".into()));
        c.handle(Command::SubmitCustomStatus);
        assert_eq!(c.messenger().session().status(), "Busy");
        c.handle(Command::CloseStatusEditor);
        assert!(!c.messenger().status_editor().is_open());
    }
}
