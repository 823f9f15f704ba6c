//! Sign-in and sign-up pages.
//!
//! On success both store the session flag and navigate into the
//! workbench. Service errors surface inline; the login error message is
//! the same for an unknown user and a wrong password.

use leptos::*;
use leptos_router::use_navigate;
use web_sys::SubmitEvent;

use crate::services::{self, store_session};

#[component]
pub fn SignIn() -> impl IntoView {
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (busy, set_busy) = create_signal(false);
    let navigate = use_navigate();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);

        let user = username.get_untracked();
        let pass = password.get_untracked();
        let navigate = navigate.clone();

        spawn_local(async move {
            set_busy.set(true);
            match services::auth::login(&user, &pass).await {
                Ok(()) => {
                    store_session(&user);
                    navigate("/app", Default::default());
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"Sign In"</h2>
                <form on:submit=on_submit>
                    <input
                        type="text"
                        placeholder="Username"
                        prop:value=username
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        prop:value=password
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <Show when=move || error.get().is_some() fallback=|| view! { }>
                        <div class="error-message">
                            {move || error.get().unwrap_or_default()}
                        </div>
                    </Show>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <div class="auth-links">
                    <a href="/signup">"Need an account? Sign Up"</a>
                    <a href="/">"Go to Homepage"</a>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn SignUp() -> impl IntoView {
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (busy, set_busy) = create_signal(false);
    let navigate = use_navigate();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);

        let user = username.get_untracked();
        let pass = password.get_untracked();
        if user.trim().is_empty() || pass.is_empty() {
            set_error.set(Some("Username and password required".to_string()));
            return;
        }
        let navigate = navigate.clone();

        spawn_local(async move {
            set_busy.set(true);
            match services::auth::signup(&user, &pass).await {
                Ok(()) => {
                    store_session(&user);
                    navigate("/app", Default::default());
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"Sign Up"</h2>
                <form on:submit=on_submit>
                    <input
                        type="text"
                        placeholder="Username"
                        prop:value=username
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        prop:value=password
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <Show when=move || error.get().is_some() fallback=|| view! { }>
                        <div class="error-message">
                            {move || error.get().unwrap_or_default()}
                        </div>
                    </Show>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Sign Up" }}
                    </button>
                </form>
                <div class="auth-links">
                    <a href="/signin">"Already registered? Sign In"</a>
                    <a href="/">"Go to Homepage"</a>
                </div>
            </div>
        </div>
    }
}
