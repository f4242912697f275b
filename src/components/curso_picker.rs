//! Curso Picker Component
//!
//! Opens a course by id.

use leptos::prelude::*;

use crate::store::{store_open_curso, use_app_store};

/// Positive integer course id, or None
pub fn parse_curso_id(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

#[component]
pub fn CursoPicker() -> impl IntoView {
    let store = use_app_store();
    let (input, set_input) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if let Some(curso_id) = parse_curso_id(&input.get()) {
            store_open_curso(&store, curso_id);
        }
    };

    view! {
        <form class="curso-picker" on:submit=on_submit>
            <input
                type="number"
                min="1"
                placeholder="ID del curso"
                prop:value=move || input.get()
                on:input=move |ev| set_input.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || parse_curso_id(&input.get()).is_none()>
                "Abrir"
            </button>
        </form>
    }
}
