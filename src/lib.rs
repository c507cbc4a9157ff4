//! Domain core of the Parley messaging mockup: contacts, conversations,
//! session and view routing, with simulated registration and delivery.
//! The GTK front end lives in the `parley-gtk` binary.

pub mod app;
pub mod config;
pub mod controller;
pub mod delivery;
pub mod directory;
pub mod error;
pub mod events;
pub mod models;
pub mod router;
pub mod session;
pub mod status;
pub mod store;
pub mod verify;

pub use app::{Messenger, Notification};
pub use config::Config;
pub use controller::Controller;
pub use events::{Command, Event};
pub use router::{DeviceClass, Route};
