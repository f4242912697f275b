//! Curso Admin Frontend App
//!
//! Login screen, then the course area editor.

use assignment_sync::Session;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{show_toast, AssignAreasCard, CursoPicker, LoginPage, Toaster};
use crate::context::AppContext;
use crate::settings;
use crate::store::{store_set_session, use_app_store, AppState, AppStateStoreFields, ToastKind};

/// Top-level view selection
#[derive(Clone, Copy, Debug, PartialEq)]
enum AppView {
    Login,
    Courses,
}

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::new());
    provide_context(store);

    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let api_config = settings::api_config();
    log::info!("[APP] API base {}", api_config.base_url);
    provide_context(AppContext::new((reload_trigger, set_reload_trigger), api_config));

    let current_view = Memo::new(move |_| {
        if store.session().get().is_some() { AppView::Courses } else { AppView::Login }
    });

    view! {
        <div class="app-layout">
            {move || match current_view.get() {
                AppView::Login => view! {
                    <LoginPage on_login=move |session: Session| store_set_session(&store, Some(session)) />
                }.into_any(),
                AppView::Courses => view! { <CoursesView /> }.into_any(),
            }}
            <Toaster />
        </div>
    }
}

/// Signed-in shell: course picker plus the area card of the open course
#[component]
fn CoursesView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let signed_in_as = move || store.session().get().map(|s| s.email).unwrap_or_default();

    let logout = move |_| {
        store_set_session(&store, None);
        show_toast(store, ToastKind::Success, "Sesión cerrada");
    };

    view! {
        <main class="main-content">
            <header class="top-bar">
                <h1>"Cursos"</h1>
                <span class="session-email">{signed_in_as}</span>
                <button class="link-btn" on:click=logout>"Cerrar sesión"</button>
            </header>

            <CursoPicker />

            // Re-created per course so each id gets its own synchronizer
            {move || store.curso_id().get().map(|curso_id| view! {
                <AssignAreasCard curso_id=curso_id on_create=move |_: ()| ctx.reload() />
            })}

            <p class="item-count">{move || format!("{} asignaciones guardadas", ctx.reload_trigger.get())}</p>
        </main>
    }
}
