use crate::models::ContactId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    #[default]
    Desktop,
}

/// Everything the router looks at. Borrowed from the session on each render.
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
    pub registered: bool,
    pub device: DeviceClass,
    pub thread_active: bool,
    pub selected: Option<&'a ContactId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Registration,
    ContactList,
    /// Full-screen thread on narrow layouts, with a back action.
    Thread { contact: ContactId },
    /// Contact list beside the open thread, or beside the empty-state
    /// placeholder when nothing is selected.
    Split { contact: Option<ContactId> },
}

impl Route {
    pub fn has_back_action(&self) -> bool {
        matches!(self, Route::Thread { .. })
    }

    pub fn contact(&self) -> Option<&ContactId> {
        match self {
            Route::Thread { contact } => Some(contact),
            Route::Split { contact } => contact.as_ref(),
            Route::Registration | Route::ContactList => None,
        }
    }
}

pub fn route(ctx: RouteContext<'_>) -> Route {
    if !ctx.registered {
        return Route::Registration;
    }
    match ctx.device {
        DeviceClass::Mobile => match (ctx.thread_active, ctx.selected) {
            (true, Some(contact)) => Route::Thread {
                contact: contact.clone(),
            },
            _ => Route::ContactList,
        },
        DeviceClass::Desktop => Route::Split {
            contact: ctx.selected.cloned(),
        },
    }
}
