//! Toaster Component
//!
//! Transient success/error notifications, plus the `Notifier` that feeds them.

use assignment_sync::Notifier;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::store::{store_dismiss_toast, store_push_toast, use_app_store, AppStateStoreFields, AppStore, ToastKind};

/// How long a toast stays up
const TOAST_MS: u32 = 4_000;

/// Show a toast and schedule its dismissal
pub fn show_toast(store: AppStore, kind: ToastKind, text: &str) {
    let id = store_push_toast(&store, kind, text.to_string());
    spawn_local(async move {
        TimeoutFuture::new(TOAST_MS).await;
        store_dismiss_toast(&store, id);
    });
}

/// Synchronizer notifications rendered as toasts
#[derive(Clone, Copy)]
pub struct ToastNotifier {
    store: AppStore,
}

impl ToastNotifier {
    pub fn new(store: AppStore) -> Self {
        Self { store }
    }
}

impl Notifier for ToastNotifier {
    fn success(&self, message: &str) {
        show_toast(self.store, ToastKind::Success, message);
    }

    fn error(&self, message: &str) {
        show_toast(self.store, ToastKind::Error, message);
    }
}

/// Toast stack, click to dismiss early
#[component]
pub fn Toaster() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toaster">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() on:click=move |_| store_dismiss_toast(&store, id)>
                            {toast.text}
                        </div>
                    }
                }
            />
        </div>
    }
}
