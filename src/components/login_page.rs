//! Login Page Component
//!
//! Email/password sign-in with a password-reset link.

use std::rc::Rc;

use assignment_sync::{HttpAuthenticator, LoginForm, LoginState, Session};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;

#[component]
pub fn LoginPage(#[prop(into)] on_login: Callback<Session>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let form = StoredValue::new_local(Rc::new(LoginForm::new(HttpAuthenticator::new(
        ctx.api_config(),
    ))));
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (state, set_state) = signal(LoginState::default());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = form.get_value();
        let (email, password) = (email.get(), password.get());
        set_state.update(|s| {
            s.error = None;
            s.submitting = true;
        });
        spawn_local(async move {
            let result = form.submit(&email, &password).await;
            set_state.set(form.state());
            if let Ok(session) = result {
                on_login.run(session);
            }
        });
    };

    let on_forgot_password = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let form = form.get_value();
        let email = email.get();
        spawn_local(async move {
            let _ = form.forgot_password(&email).await;
            set_state.set(form.state());
        });
    };

    view! {
        <div class="login-screen">
            <div class="login-card">
                <h3 class="login-title">"Iniciar sesión"</h3>
                {move || state.get().error.map(|error| view! { <p class="error-text">{error}</p> })}
                <form class="login-form" on:submit=on_submit>
                    <div class="editor-section">
                        <label class="editor-label" for="email">"Email"</label>
                        <input
                            id="email"
                            type="email"
                            placeholder="Enter your Email"
                            required
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="editor-section">
                        <label class="editor-label" for="password">"Password"</label>
                        <input
                            id="password"
                            type="password"
                            placeholder="Enter your password"
                            required
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="login-actions">
                        <button type="submit" disabled=move || state.get().submitting>"Login"</button>
                        <button type="button" class="link-btn" on:click=on_forgot_password>
                            "¿Olvidaste tu contraseña?"
                        </button>
                    </div>
                    <Show when=move || state.get().reset_sent>
                        <p class="success-text">
                            "Se ha enviado un correo de recuperación. Por favor, revise su bandeja de entrada."
                        </p>
                    </Show>
                </form>
            </div>
        </div>
    }
}
