//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"TabulaX - Smart Data Transformation"</h1>
            <p class="subtitle">
                "Learn a transformation from two example columns, then apply it "
                "to CSV files, MySQL tables, or MongoDB collections."
            </p>
        </div>
    }
}
