use crate::delivery::ReplyTicket;
use crate::models::ContactId;
use crate::router::DeviceClass;

/// User intent, dispatched by the views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register { phone: String },
    SelectContact(ContactId),
    Back,
    SendMessage { to: ContactId, text: String },
    SetDevice(DeviceClass),
    OpenStatusEditor,
    CloseStatusEditor,
    SetStatusDraft(String),
    ChoosePresetStatus(String),
    SubmitCustomStatus,
}

/// Completion of a timer or verification task, delivered back to the owner
/// of the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Registered { phone: String },
    RegistrationFailed { phone: String, reason: String },
    ReplyDue(ReplyTicket),
}
