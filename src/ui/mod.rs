pub mod chat_view;
pub mod contact_list;
pub mod registration;
pub mod shell;
pub mod status_dialog;

use parley::Command;
use std::rc::Rc;

/// Callback handed to every view; the shell owns the state behind it.
pub type Dispatch = Rc<dyn Fn(Command)>;
