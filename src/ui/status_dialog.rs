use super::Dispatch;
use gtk4 as gtk;
use gtk4::prelude::*;
use parley::status::PRESET_STATUSES;
use parley::Command;

pub struct StatusDialog {
    window: gtk::Window,
    set_btn: gtk::Button,
}

impl StatusDialog {
    pub fn present(parent: &adw::ApplicationWindow, current: &str, dispatch: Dispatch) -> Self {
        let window = gtk::Window::builder()
            .title("Update your status")
            .transient_for(parent)
            .modal(true)
            .default_width(420)
            .resizable(false)
            .build();

        let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
        content.set_margin_top(12);
        content.set_margin_bottom(12);
        content.set_margin_start(12);
        content.set_margin_end(12);

        let current_lbl = gtk::Label::new(Some(&format!("Current: {current}")));
        current_lbl.add_css_class("dim-label");
        current_lbl.set_halign(gtk::Align::Start);
        content.append(&current_lbl);

        let quick = gtk::Label::new(Some("Quick statuses"));
        quick.add_css_class("heading");
        quick.set_halign(gtk::Align::Start);
        content.append(&quick);

        let grid = gtk::Grid::new();
        grid.set_row_spacing(6);
        grid.set_column_spacing(6);
        grid.set_column_homogeneous(true);
        for (idx, preset) in PRESET_STATUSES.into_iter().enumerate() {
            let btn = gtk::Button::with_label(preset);
            let dispatch = dispatch.clone();
            btn.connect_clicked(move |_| dispatch(Command::ChoosePresetStatus(preset.to_string())));
            grid.attach(&btn, (idx % 2) as i32, (idx / 2) as i32, 1, 1);
        }
        content.append(&grid);

        let custom = gtk::Label::new(Some("Custom status"));
        custom.add_css_class("heading");
        custom.set_halign(gtk::Align::Start);
        content.append(&custom);

        let row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let entry = gtk::Entry::new();
        entry.set_hexpand(true);
        entry.set_placeholder_text(Some("Enter your custom status…"));
        let set_btn = gtk::Button::with_label("Set");
        set_btn.add_css_class("suggested-action");
        set_btn.set_sensitive(false);
        row.append(&entry);
        row.append(&set_btn);
        content.append(&row);

        {
            let dispatch = dispatch.clone();
            entry.connect_changed(move |entry| {
                dispatch(Command::SetStatusDraft(entry.text().to_string()));
            });
        }
        {
            let dispatch = dispatch.clone();
            entry.connect_activate(move |_| dispatch(Command::SubmitCustomStatus));
        }
        {
            let dispatch = dispatch.clone();
            set_btn.connect_clicked(move |_| dispatch(Command::SubmitCustomStatus));
        }
        // The shell tears the window down once the editor state says closed.
        window.connect_close_request(move |_| {
            dispatch(Command::CloseStatusEditor);
            glib::Propagation::Stop
        });

        window.set_child(Some(&content));
        window.present();
        Self { window, set_btn }
    }

    pub fn set_can_submit(&self, can_submit: bool) {
        self.set_btn.set_sensitive(can_submit);
    }

    /// Tears the window down without emitting `close-request`.
    pub fn dismiss(self) {
        self.window.destroy();
    }
}
