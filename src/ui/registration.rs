use super::Dispatch;
use gtk4 as gtk;
use gtk4::prelude::*;
use parley::Command;
use std::cell::Cell;
use std::rc::Rc;

pub struct RegistrationView {
    root: gtk::Box,
    entry: gtk::Entry,
    button: gtk::Button,
    verifying: Rc<Cell<bool>>,
}

impl RegistrationView {
    pub fn new(dispatch: Dispatch) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
        root.set_margin_top(24);
        root.set_margin_bottom(24);
        root.set_margin_start(24);
        root.set_margin_end(24);
        root.set_valign(gtk::Align::Center);
        root.set_halign(gtk::Align::Center);
        root.set_width_request(360);

        let title = gtk::Label::new(Some("Welcome to Parley"));
        title.add_css_class("title-2");
        root.append(&title);

        let hint = gtk::Label::new(Some(
            "Enter your phone number to get started with instant messaging",
        ));
        hint.add_css_class("dim-label");
        hint.set_wrap(true);
        hint.set_justify(gtk::Justification::Center);
        root.append(&hint);

        let entry = gtk::Entry::new();
        entry.set_placeholder_text(Some("+1 (555) 123-4567"));
        entry.set_input_purpose(gtk::InputPurpose::Phone);
        entry.set_hexpand(true);
        root.append(&entry);

        let button = gtk::Button::with_label("Continue");
        button.add_css_class("suggested-action");
        button.set_sensitive(false);
        root.append(&button);

        let verifying = Rc::new(Cell::new(false));

        {
            let button = button.clone();
            let verifying = verifying.clone();
            entry.connect_changed(move |entry| {
                button.set_sensitive(!entry.text().trim().is_empty() && !verifying.get());
            });
        }

        let submit: Rc<dyn Fn()> = {
            let entry = entry.clone();
            let verifying = verifying.clone();
            Rc::new(move || {
                if verifying.get() || entry.text().trim().is_empty() {
                    return;
                }
                dispatch(Command::Register {
                    phone: entry.text().to_string(),
                });
            })
        };
        {
            let submit = submit.clone();
            button.connect_clicked(move |_| (submit)());
        }
        entry.connect_activate(move |_| (submit)());

        Self {
            root,
            entry,
            button,
            verifying,
        }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn set_verifying(&self, verifying: bool) {
        self.verifying.set(verifying);
        self.entry.set_sensitive(!verifying);
        self.button
            .set_label(if verifying { "Verifying…" } else { "Continue" });
        self.button
            .set_sensitive(!verifying && !self.entry.text().trim().is_empty());
    }
}
