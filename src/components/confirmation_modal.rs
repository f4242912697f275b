//! Confirmation Modal Component
//!
//! Blocking yes/no prompt for destructive actions.

use leptos::prelude::*;

/// Modal shown while `message` is `Some`
///
/// # Arguments
/// * `message` - Question to show; `None` keeps the modal closed
/// * `busy` - Disables the confirm button while the action is in flight
/// * `on_confirm` - Runs when the user clicks "Sí"
/// * `on_cancel` - Runs when the user clicks "No"
#[component]
pub fn ConfirmationModal(
    message: Signal<Option<String>>,
    busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="modal-backdrop">
                <div class="modal">
                    <p>{move || message.get().unwrap_or_default()}</p>
                    <div class="modal-actions">
                        <button
                            class="confirm-btn destructive"
                            disabled=move || busy.get()
                            on:click=move |ev| {
                                ev.stop_propagation();
                                on_confirm.run(());
                            }
                        >
                            "Sí"
                        </button>
                        <button
                            class="cancel-btn"
                            on:click=move |ev| {
                                ev.stop_propagation();
                                on_cancel.run(());
                            }
                        >
                            "No"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
