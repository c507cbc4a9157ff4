use super::chat_view::ChatView;
use super::contact_list::ContactList;
use super::registration::RegistrationView;
use super::status_dialog::StatusDialog;
use super::Dispatch;
use adw::prelude::*;
use adw::Application;
use parley::models::ContactId;
use parley::verify::SimulatedVerifier;
use parley::{Command, Config, Controller, Event, Messenger, Route};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

enum Mounted {
    Registration(RegistrationView),
    List(ContactList),
    Thread(ChatView),
    Split(ContactList, Option<ChatView>),
}

/// Top-level window. Owns the controller; every view gets a [`Dispatch`]
/// that routes back here, and the window re-renders after each change.
pub struct Shell {
    config: Config,
    window: adw::ApplicationWindow,
    overlay: adw::ToastOverlay,
    content: gtk4::Box,
    controller: RefCell<Controller>,
    mounted: RefCell<Option<(Route, Mounted)>>,
    status_dialog: RefCell<Option<StatusDialog>>,
}

pub fn build_ui(app: &Application, config: &Config) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Parley")
        .default_width(960)
        .default_height(640)
        .build();

    let overlay = adw::ToastOverlay::new();
    let content = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);
    content.set_vexpand(true);
    overlay.set_child(Some(&content));

    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk4::Label::new(Some("Parley"));
    header.set_title_widget(Some(&title));
    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));

    let messenger = Messenger::new(config);
    let verifier = Arc::new(SimulatedVerifier::new(config.registration_delay()));
    let (controller, events) =
        Controller::new(messenger, verifier, crate::utils::runtime_handle());

    let shell = Rc::new(Shell {
        config: config.clone(),
        window: window.clone(),
        overlay,
        content,
        controller: RefCell::new(controller),
        mounted: RefCell::new(None),
        status_dialog: RefCell::new(None),
    });

    {
        let weak = Rc::downgrade(&shell);
        crate::utils::attach_to_main(events, move |event| {
            if let Some(shell) = weak.upgrade() {
                shell.apply(event);
            }
        });
    }
    {
        let weak = Rc::downgrade(&shell);
        window.connect_notify_local(Some("default-width"), move |window, _| {
            if let Some(shell) = weak.upgrade() {
                let device = shell.config.device_for_width(window.default_width());
                shell.dispatch(Command::SetDevice(device));
            }
        });
    }

    let device = shell.config.device_for_width(window.default_width());
    shell.dispatch(Command::SetDevice(device));
    window.present();
}

impl Shell {
    fn dispatcher(self: &Rc<Self>) -> Dispatch {
        let weak = Rc::downgrade(self);
        Rc::new(move |command| {
            if let Some(shell) = weak.upgrade() {
                shell.dispatch(command);
            }
        })
    }

    fn dispatch(self: &Rc<Self>, command: Command) {
        log::debug!("command: {command:?}");
        self.controller.borrow_mut().handle(command);
        self.render();
    }

    fn apply(self: &Rc<Self>, event: Event) {
        let notification = self.controller.borrow_mut().apply(event);
        if let Some(n) = notification {
            self.overlay
                .add_toast(adw::Toast::new(&format!("{} {}", n.title(), n.body())));
        }
        self.render();
    }

    fn render(self: &Rc<Self>) {
        let route = self.controller.borrow().messenger().view();
        let remount = match &*self.mounted.borrow() {
            Some((current, _)) => *current != route,
            None => true,
        };
        if remount {
            self.mount(route);
        }
        self.refresh();
        self.sync_status_dialog();
    }

    fn mount(self: &Rc<Self>, route: Route) {
        while let Some(child) = self.content.first_child() {
            self.content.remove(&child);
        }

        let controller = self.controller.borrow();
        let messenger = controller.messenger();
        let dispatch = self.dispatcher();
        let thread_view = |id: &ContactId, back: bool| {
            messenger
                .contact(id)
                .map(|contact| ChatView::new(contact, back, dispatch.clone()))
        };

        let mounted = match &route {
            Route::Registration => {
                let view = RegistrationView::new(dispatch.clone());
                self.content.append(&view.widget());
                Mounted::Registration(view)
            }
            Route::ContactList => {
                let list = ContactList::new(dispatch.clone());
                list.set_contacts(messenger);
                list.widget().set_hexpand(true);
                self.content.append(&list.widget());
                Mounted::List(list)
            }
            Route::Thread { contact } => match thread_view(contact, true) {
                Some(chat) => {
                    self.content.append(&chat.widget());
                    Mounted::Thread(chat)
                }
                None => {
                    log::warn!("no directory entry for {contact}");
                    let list = ContactList::new(dispatch.clone());
                    list.set_contacts(messenger);
                    self.content.append(&list.widget());
                    Mounted::List(list)
                }
            },
            Route::Split { contact } => {
                let list = ContactList::new(dispatch.clone());
                list.set_contacts(messenger);
                list.widget().set_width_request(320);
                self.content.append(&list.widget());
                self.content
                    .append(&gtk4::Separator::new(gtk4::Orientation::Vertical));

                let chat = contact.as_ref().and_then(|id| thread_view(id, false));
                match &chat {
                    Some(chat) => self.content.append(&chat.widget()),
                    None => self.content.append(&placeholder()),
                }
                Mounted::Split(list, chat)
            }
        };
        *self.mounted.borrow_mut() = Some((route, mounted));
    }

    fn refresh(&self) {
        let controller = self.controller.borrow();
        let messenger = controller.messenger();
        let mounted = self.mounted.borrow();
        let Some((route, view)) = mounted.as_ref() else {
            return;
        };
        let messages = route.contact().map(|id| messenger.conversation(id));

        match view {
            Mounted::Registration(view) => view.set_verifying(messenger.session().is_verifying()),
            Mounted::List(list) => list.sync(messenger),
            Mounted::Thread(chat) => chat.set_messages(messages.unwrap_or_default()),
            Mounted::Split(list, chat) => {
                list.sync(messenger);
                if let Some(chat) = chat {
                    chat.set_messages(messages.unwrap_or_default());
                }
            }
        }
    }

    fn sync_status_dialog(self: &Rc<Self>) {
        let (open, can_submit, status) = {
            let controller = self.controller.borrow();
            let messenger = controller.messenger();
            (
                messenger.status_editor().is_open(),
                messenger.status_editor().can_submit(),
                messenger.session().status().to_string(),
            )
        };

        let mut slot = self.status_dialog.borrow_mut();
        match (open, slot.is_some()) {
            (true, false) => {
                *slot = Some(StatusDialog::present(&self.window, &status, self.dispatcher()));
            }
            (false, true) => {
                if let Some(dialog) = slot.take() {
                    dialog.dismiss();
                }
            }
            _ => {}
        }
        if let Some(dialog) = slot.as_ref() {
            dialog.set_can_submit(can_submit);
        }
    }
}

fn placeholder() -> gtk4::Widget {
    let page = adw::StatusPage::builder()
        .icon_name("mail-send-symbolic")
        .title("Welcome to Parley")
        .description("Select a contact to start messaging")
        .hexpand(true)
        .vexpand(true)
        .build();
    page.upcast()
}
