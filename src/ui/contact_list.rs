use super::Dispatch;
use gtk4 as gtk;
use gtk4::prelude::*;
use parley::models::{Contact, ContactId};
use parley::{Command, Messenger};
use std::cell::RefCell;
use std::rc::Rc;

pub struct ContactList {
    root: gtk::Box,
    list: gtk::ListBox,
    status_button: gtk::Button,
    ids: Rc<RefCell<Vec<ContactId>>>,
}

impl ContactList {
    pub fn new(dispatch: Dispatch) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let header = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let title = gtk::Label::new(Some("Chats"));
        title.add_css_class("heading");
        title.set_halign(gtk::Align::Start);
        title.set_hexpand(true);
        header.append(&title);

        let status_button = gtk::Button::new();
        status_button.add_css_class("flat");
        {
            let dispatch = dispatch.clone();
            status_button.connect_clicked(move |_| dispatch(Command::OpenStatusEditor));
        }
        header.append(&status_button);
        root.append(&header);

        let list = gtk::ListBox::new();
        list.set_selection_mode(gtk::SelectionMode::Single);
        list.set_activate_on_single_click(true);
        list.add_css_class("navigation-sidebar");

        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hscrollbar_policy(gtk::PolicyType::Never)
            .child(&list)
            .build();
        root.append(&scroller);

        let ids: Rc<RefCell<Vec<ContactId>>> = Rc::new(RefCell::new(Vec::new()));
        {
            let ids = ids.clone();
            list.connect_row_activated(move |_, row| {
                let picked = usize::try_from(row.index())
                    .ok()
                    .and_then(|idx| ids.borrow().get(idx).cloned());
                if let Some(id) = picked {
                    dispatch(Command::SelectContact(id));
                }
            });
        }

        Self {
            root,
            list,
            status_button,
            ids,
        }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn set_contacts(&self, messenger: &Messenger) {
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }
        let mut ids = self.ids.borrow_mut();
        ids.clear();
        for contact in messenger.contacts().iter() {
            self.list.append(&contact_row(contact));
            ids.push(contact.id.clone());
        }
    }

    /// Mirrors session state into the widgets without rebuilding rows.
    pub fn sync(&self, messenger: &Messenger) {
        self.status_button
            .set_label(&format!("Status: {}", messenger.session().status()));

        let selected = messenger.session().selected().and_then(|id| {
            self.ids.borrow().iter().position(|known| known == id)
        });
        match selected.and_then(|idx| self.list.row_at_index(idx as i32)) {
            Some(row) => self.list.select_row(Some(&row)),
            None => self.list.unselect_all(),
        }
    }
}

fn contact_row(contact: &Contact) -> gtk::ListBoxRow {
    let row = gtk::ListBoxRow::new();
    let line = gtk::Box::new(gtk::Orientation::Horizontal, 10);
    line.set_margin_top(8);
    line.set_margin_bottom(8);
    line.set_margin_start(8);
    line.set_margin_end(8);

    let avatar = gtk::Label::new(Some(&contact.initial()));
    avatar.add_css_class("title-4");
    avatar.set_width_chars(2);
    line.append(&avatar);

    let text = gtk::Box::new(gtk::Orientation::Vertical, 2);
    text.set_hexpand(true);

    let top = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    let name = gtk::Label::new(Some(&contact.name));
    name.add_css_class("heading");
    name.set_halign(gtk::Align::Start);
    name.set_hexpand(true);
    name.set_ellipsize(gtk::pango::EllipsizeMode::End);
    top.append(&name);
    if let Some(label) = contact.presence_label() {
        let badge = gtk::Label::new(Some(label));
        badge.add_css_class("caption");
        if contact.is_online() {
            badge.add_css_class("success");
        } else {
            badge.add_css_class("dim-label");
        }
        top.append(&badge);
    }
    text.append(&top);

    let status = gtk::Label::new(Some(&contact.status));
    status.add_css_class("dim-label");
    status.set_halign(gtk::Align::Start);
    status.set_ellipsize(gtk::pango::EllipsizeMode::End);
    text.append(&status);

    line.append(&text);
    row.set_child(Some(&line));
    row
}
