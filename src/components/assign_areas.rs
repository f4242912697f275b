//! Assign Areas Card
//!
//! Picks areas for one course: batched additions saved with "Confirmar
//! cambios", removals confirmed in a modal and sent right away.

use std::rc::Rc;

use assignment_sync::{AssignmentSnapshot, AssignmentSynchronizer, HttpAssignmentApi};
use leptos::html::Select;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::confirmation_modal::ConfirmationModal;
use crate::components::toaster::ToastNotifier;
use crate::context::AppContext;
use crate::store::use_app_store;

type Synchronizer = AssignmentSynchronizer<HttpAssignmentApi, ToastNotifier>;

/// Placeholder for the area picker
pub fn select_placeholder(available: usize) -> &'static str {
    if available == 0 {
        "No hay áreas disponibles"
    } else {
        "Seleccione un área"
    }
}

/// Area assignment card for `curso_id`
///
/// `on_create` runs after the selection is saved.
#[component]
pub fn AssignAreasCard(
    curso_id: i64,
    #[prop(into)] on_create: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (snapshot, set_snapshot) = signal(AssignmentSnapshot {
        curso_id,
        loading: true,
        ..Default::default()
    });

    let synchronizer: Synchronizer = AssignmentSynchronizer::new(
        curso_id,
        HttpAssignmentApi::new(ctx.api_config()),
        ToastNotifier::new(store),
    )
    .with_on_change(move |next| set_snapshot.set(next))
    .with_on_committed(move || on_create.run(()));

    // Late responses must not touch this card once it is gone
    let teardown = synchronizer.teardown_handle();
    on_cleanup(move || teardown.dispose());

    let sync = StoredValue::new_local(Rc::new(synchronizer));

    // Load areas on mount
    let loader = sync.get_value();
    spawn_local(async move {
        let _ = loader.load().await;
    });

    let select_ref = NodeRef::<Select>::new();

    let on_select = move |ev: web_sys::Event| {
        if let Ok(area_id) = event_target_value(&ev).parse::<i64>() {
            sync.with_value(|s| s.select(area_id));
        }
        if let Some(select) = select_ref.get() {
            select.set_value("");
        }
    };

    let confirm_removal = move |_: ()| {
        let s = sync.get_value();
        spawn_local(async move {
            let _ = s.confirm_removal().await;
        });
    };

    let cancel_removal = move |_: ()| sync.with_value(|s| s.cancel_removal());

    let confirm_changes = move |_| {
        let s = sync.get_value();
        spawn_local(async move {
            let _ = s.commit().await;
        });
    };

    view! {
        <div class="card assign-areas">
            <div class="card-header">
                <h2 class="card-title">"Asignar Áreas al Curso"</h2>
            </div>

            <div class="card-content">
                <Show when=move || snapshot.get().loading>
                    <p class="loading-hint">"Cargando áreas..."</p>
                </Show>

                // Area picker
                <div class="editor-section">
                    <label for="areaSelect" class="editor-label">"Seleccionar área:"</label>
                    <select
                        id="areaSelect"
                        node_ref=select_ref
                        disabled=move || snapshot.get().assignable.is_empty()
                        on:change=on_select
                    >
                        <option value="" selected disabled>
                            {move || select_placeholder(snapshot.get().assignable.len())}
                        </option>
                        {move || {
                            snapshot
                                .get()
                                .assignable
                                .into_iter()
                                .map(|area| view! { <option value=area.id.to_string()>{area.name}</option> })
                                .collect_view()
                        }}
                    </select>
                </div>

                // Selected areas
                <div class="editor-section">
                    <h3 class="editor-label">"Áreas Seleccionadas:"</h3>
                    <ul class="selected-areas">
                        <For
                            each=move || snapshot.get().selected
                            key=|area| area.id
                            children=move |area| {
                                let name = area.name.clone();
                                view! {
                                    <li class="selected-area">
                                        <span>{name}</span>
                                        <button
                                            type="button"
                                            class="remove-area-btn destructive"
                                            on:click=move |_| {
                                                let area = area.clone();
                                                sync.with_value(|s| s.request_removal(area));
                                            }
                                        >
                                            "Quitar"
                                        </button>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </div>

                <Show when=move || snapshot.get().unsaved>
                    <p class="unsaved-hint">"Hay cambios sin guardar"</p>
                </Show>
            </div>

            <div class="card-footer">
                <button
                    type="button"
                    class="confirm-changes-btn"
                    disabled=move || {
                        let current = snapshot.get();
                        current.committing || current.removing
                    }
                    on:click=confirm_changes
                >
                    {move || if snapshot.get().committing { "Procesando..." } else { "Confirmar cambios" }}
                </button>
            </div>

            <ConfirmationModal
                message=Signal::derive(move || snapshot.get().pending.map(|(_, message)| message))
                busy=Signal::derive(move || {
                    let current = snapshot.get();
                    current.committing || current.removing
                })
                on_confirm=confirm_removal
                on_cancel=cancel_removal
            />
        </div>
    }
}
