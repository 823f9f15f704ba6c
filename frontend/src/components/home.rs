//! Public landing page. A stored session skips straight to the
//! workbench link; otherwise the page offers sign-in and sign-up.

use leptos::*;

use crate::components::{Footer, Hero};
use crate::services::load_session;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = load_session();

    view! {
        <div class="home-page">
            <Hero/>
            <div class="home-actions">
                {match session {
                    Some(username) => view! {
                        <div class="home-signed-in">
                            <p>{format!("Welcome back, {}!", username)}</p>
                            <a class="transform-button" href="/app">"Open Workbench"</a>
                        </div>
                    }
                    .into_view(),
                    None => view! {
                        <div class="home-signed-out">
                            <a class="transform-button" href="/signin">"Sign In"</a>
                            <a class="transform-button" href="/signup">"Sign Up"</a>
                        </div>
                    }
                    .into_view(),
                }}
            </div>
            <Footer/>
        </div>
    }
}
