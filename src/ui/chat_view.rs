use super::Dispatch;
use gtk4 as gtk;
use gtk4::prelude::*;
use parley::models::{Contact, ContactId, Message};
use parley::Command;
use std::cell::Cell;
use std::rc::Rc;

pub struct ChatView {
    root: gtk::Box,
    messages_box: gtk::Box,
    scroller: gtk::ScrolledWindow,
    shown: Cell<usize>,
}

impl ChatView {
    /// `back` adds the back button used by the full-screen narrow layout.
    pub fn new(contact: &Contact, back: bool, dispatch: Dispatch) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_hexpand(true);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let header = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        if back {
            let back_btn = gtk::Button::from_icon_name("go-previous-symbolic");
            back_btn.add_css_class("flat");
            let dispatch = dispatch.clone();
            back_btn.connect_clicked(move |_| dispatch(Command::Back));
            header.append(&back_btn);
        }
        let avatar = gtk::Label::new(Some(&contact.initial()));
        avatar.add_css_class("title-3");
        avatar.set_width_chars(2);
        header.append(&avatar);

        let titles = gtk::Box::new(gtk::Orientation::Vertical, 0);
        let name = gtk::Label::new(Some(&contact.name));
        name.add_css_class("heading");
        name.set_halign(gtk::Align::Start);
        titles.append(&name);
        let subtitle = gtk::Label::new(Some(contact.subtitle()));
        subtitle.add_css_class("dim-label");
        subtitle.set_halign(gtk::Align::Start);
        titles.append(&subtitle);
        header.append(&titles);
        root.append(&header);

        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .build();
        let messages_box = gtk::Box::new(gtk::Orientation::Vertical, 6);
        scroller.set_child(Some(&messages_box));
        root.append(&scroller);

        // Input row
        let input_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let entry = gtk::Entry::new();
        entry.set_hexpand(true);
        entry.set_placeholder_text(Some("Type a message…"));
        let send_btn = gtk::Button::with_label("Send");
        send_btn.add_css_class("suggested-action");
        send_btn.set_sensitive(false);
        input_row.append(&entry);
        input_row.append(&send_btn);
        root.append(&input_row);

        {
            let send_btn = send_btn.clone();
            entry.connect_changed(move |entry| {
                send_btn.set_sensitive(!entry.text().trim().is_empty());
            });
        }

        let send: Rc<dyn Fn()> = {
            let entry = entry.clone();
            let to: ContactId = contact.id.clone();
            Rc::new(move || {
                let text = entry.text().to_string();
                if text.trim().is_empty() {
                    return;
                }
                entry.set_text("");
                dispatch(Command::SendMessage {
                    to: to.clone(),
                    text,
                });
            })
        };
        {
            let send = send.clone();
            send_btn.connect_clicked(move |_| (send)());
        }
        entry.connect_activate(move |_| (send)());

        Self {
            root,
            messages_box,
            scroller,
            shown: Cell::new(0),
        }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    /// Appends bubbles for messages not yet shown. Conversations only grow,
    /// so the shown count is enough to find the new tail.
    pub fn set_messages(&self, messages: &[Message]) {
        let shown = self.shown.get();
        if messages.len() <= shown {
            return;
        }
        for message in &messages[shown..] {
            self.messages_box.append(&bubble(message));
        }
        self.shown.set(messages.len());

        let adj = self.scroller.vadjustment();
        glib::idle_add_local_once(move || adj.set_value(adj.upper()));
    }
}

fn bubble(message: &Message) -> gtk::Box {
    let bubble = gtk::Box::new(gtk::Orientation::Vertical, 2);
    bubble.add_css_class("card");
    bubble.set_halign(if message.is_sent() {
        gtk::Align::End
    } else {
        gtk::Align::Start
    });

    let text = gtk::Label::new(Some(&message.text));
    text.set_wrap(true);
    text.set_max_width_chars(40);
    text.set_xalign(0.0);
    text.set_margin_top(6);
    text.set_margin_start(10);
    text.set_margin_end(10);
    bubble.append(&text);

    let time = gtk::Label::new(Some(&message.formatted_time()));
    time.add_css_class("caption");
    time.add_css_class("dim-label");
    time.set_halign(gtk::Align::End);
    time.set_margin_bottom(6);
    time.set_margin_start(10);
    time.set_margin_end(10);
    bubble.append(&time);

    bubble
}
