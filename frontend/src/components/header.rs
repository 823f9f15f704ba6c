//! App banner with the signed-in username and a logout control.

use leptos::*;
use leptos_router::use_navigate;

use crate::services::clear_session;

#[component]
pub fn Header(username: ReadSignal<Option<String>>) -> impl IntoView {
    let navigate = use_navigate();

    let on_logout = move |_| {
        clear_session();
        navigate("/", Default::default());
    };

    view! {
        <header class="header">
            <div class="header-left">
                <a href="/" class="logo">"TabulaX"</a>
                <span class="header-subtitle">"Smart Data Transformation"</span>
            </div>
            <div class="header-right">
                <Show
                    when=move || username.get().is_some()
                    fallback=|| view! { }
                >
                    <span class="header-user">
                        {move || username.get().unwrap_or_default()}
                    </span>
                    <button class="logout-btn" on:click=on_logout.clone()>
                        "Logout"
                    </button>
                </Show>
            </div>
        </header>
    }
}
