//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use assignment_sync::Session;
use leptos::prelude::*;
use reactive_stores::Store;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub text: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user (None = show login)
    pub session: Option<Session>,
    /// Visible toasts, oldest first
    pub toasts: Vec<Toast>,
    /// Next toast id
    pub next_toast_id: u32,
    /// Course whose areas are being edited
    pub curso_id: Option<i64>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Append a toast and return its id
pub fn store_push_toast(store: &AppStore, kind: ToastKind, text: String) -> u32 {
    let id = store.next_toast_id().get_untracked();
    store.next_toast_id().set(id.wrapping_add(1));
    store.toasts().write().push(Toast { id, kind, text });
    id
}

/// Remove a toast by ID
pub fn store_dismiss_toast(store: &AppStore, toast_id: u32) {
    store.toasts().write().retain(|toast| toast.id != toast_id);
}

pub fn store_set_session(store: &AppStore, session: Option<Session>) {
    let signed_out = session.is_none();
    store.session().set(session);
    if signed_out {
        store.curso_id().set(None);
    }
}

pub fn store_open_curso(store: &AppStore, curso_id: i64) {
    store.curso_id().set(Some(curso_id));
}
