mod ui;
mod utils;

use adw::prelude::*;
use adw::Application;
use parley::Config;

fn main() -> glib::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("using default settings: {e}");
        Config::default()
    });

    let app = Application::builder()
        .application_id("com.example.ParleyGtk")
        .build();
    app.connect_activate(move |app| {
        crate::ui::shell::build_ui(app, &config);
    });
    app.run()
}
