//! Confirmation Gate
//!
//! Holds at most one destructive action waiting for the user to say yes.

use crate::models::Area;

/// Pending-removal state backing the confirmation modal
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ConfirmationGate {
    #[default]
    Idle,
    PendingConfirmation { area: Area, message: String },
}

/// Question shown in the modal for `area`
pub fn removal_message(area: &Area) -> String {
    format!(
        "¿Estás seguro de que deseas eliminar el área \"{}\" de este curso?",
        area.name
    )
}

impl ConfirmationGate {
    /// Open the gate for `area`. A pending request is replaced (last request wins).
    pub fn request(&mut self, area: Area) {
        let message = removal_message(&area);
        *self = ConfirmationGate::PendingConfirmation { area, message };
    }

    /// Close the gate, handing back the area the user confirmed
    pub fn confirm(&mut self) -> Option<Area> {
        match std::mem::take(self) {
            ConfirmationGate::PendingConfirmation { area, .. } => Some(area),
            ConfirmationGate::Idle => None,
        }
    }

    /// Close the gate and drop the pending area
    pub fn cancel(&mut self) {
        *self = ConfirmationGate::Idle;
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ConfirmationGate::PendingConfirmation { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ConfirmationGate::PendingConfirmation { message, .. } => Some(message),
            ConfirmationGate::Idle => None,
        }
    }
}
