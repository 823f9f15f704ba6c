//! MongoDB step: fetch databases, drill down to a collection preview,
//! pick a column, and apply the learned transformation in place.
//!
//! No credential form. The column selector only offers the preview
//! headers minus the identity key, via [`MongoBrowse::column_choices`].

use leptos::*;

use crate::components::mysql::PreviewTable;
use crate::services::mongo;
use crate::session::TransformSession;
use crate::workflow::WorkflowState;

#[component]
pub fn MongoStep(
    workflow: RwSignal<WorkflowState>,
    session: RwSignal<TransformSession>,
    is_loading: RwSignal<bool>,
) -> impl IntoView {
    let on_fetch_databases = move |_| {
        workflow.update(|w| w.mongo.error = None);
        spawn_local(async move {
            is_loading.set(true);
            match mongo::databases().await {
                Ok(dbs) => workflow.update(|w| w.mongo.set_databases(dbs)),
                Err(e) => workflow.update(|w| w.mongo.error = Some(e.to_string())),
            }
            is_loading.set(false);
        });
    };

    let on_select_database = move |db: String| {
        workflow.update(|w| {
            w.mongo.select_database(db.clone());
            w.mongo.error = None;
        });
        spawn_local(async move {
            is_loading.set(true);
            match mongo::collections(&db).await {
                Ok(cols) => workflow.update(|w| w.mongo.set_collections(cols)),
                Err(e) => workflow.update(|w| w.mongo.error = Some(e.to_string())),
            }
            is_loading.set(false);
        });
    };

    let on_select_collection = move |collection: String| {
        workflow.update(|w| {
            w.mongo.select_collection(collection.clone());
            w.mongo.error = None;
        });
        let database = workflow.with_untracked(|w| w.mongo.selected_database.clone());
        spawn_local(async move {
            is_loading.set(true);
            match mongo::preview(&database, &collection).await {
                Ok(preview) => workflow.update(|w| w.mongo.set_preview(preview)),
                Err(e) => workflow.update(|w| w.mongo.error = Some(e.to_string())),
            }
            is_loading.set(false);
        });
    };

    let on_apply = move |_| {
        workflow.update(|w| {
            w.mongo.error = None;
            w.mongo.transformed_preview = None;
            w.mongo.success = None;
        });

        if session.with_untracked(|s| s.artifact().is_none()) {
            workflow.update(|w| {
                w.mongo.error =
                    Some("No transformation available. Please complete the Learn step first.".into())
            });
            return;
        }
        if let Err(e) = session.with_untracked(|s| s.ensure_apply_allowed().map(|_| ())) {
            workflow.update(|w| w.mongo.error = Some(e.to_string()));
            return;
        }
        let Some(payload) = session.with_untracked(|s| s.payload()) else {
            return;
        };

        let (database, collection, column) = workflow.with_untracked(|w| {
            (
                w.mongo.selected_database.clone(),
                w.mongo.selected_collection.clone(),
                w.mongo.selected_column.clone(),
            )
        });

        spawn_local(async move {
            is_loading.set(true);
            match mongo::apply(&database, &collection, &column, &payload).await {
                Ok(preview) => workflow.update(|w| {
                    w.mongo.transformed_preview = Some(preview);
                    w.mongo.success =
                        Some("Transformation applied and stored in transformations DB!".into());
                }),
                Err(e) => workflow.update(|w| w.mongo.error = Some(e.to_string())),
            }
            is_loading.set(false);
        });
    };

    view! {
        <div class="fade-step">
            <div class="preview-section">
                <button
                    class="transform-button"
                    on:click=on_fetch_databases
                    disabled=move || is_loading.get()
                >
                    {move || if is_loading.get() { "Fetching..." } else { "Fetch Databases" }}
                </button>

                <Show
                    when=move || workflow.with(|w| w.mongo.error.is_some())
                    fallback=|| view! { }
                >
                    <div class="error-message">
                        {move || workflow.with(|w| w.mongo.error.clone().unwrap_or_default())}
                    </div>
                </Show>

                <Show
                    when=move || workflow.with(|w| !w.mongo.databases.is_empty())
                    fallback=|| view! { }
                >
                    <div>
                        <div class="file-label">"Select Database"</div>
                        <select
                            prop:value=move || workflow.with(|w| w.mongo.selected_database.clone())
                            on:change=move |ev| on_select_database(event_target_value(&ev))
                        >
                            <option value="">"Select database"</option>
                            {move || workflow
                                .with(|w| w.mongo.databases.clone())
                                .into_iter()
                                .map(|db| view! { <option value=db.clone()>{db}</option> })
                                .collect_view()}
                        </select>
                    </div>
                </Show>

                <Show
                    when=move || workflow.with(|w| !w.mongo.collections.is_empty())
                    fallback=|| view! { }
                >
                    <div>
                        <div class="file-label">"Select Collection"</div>
                        <select
                            prop:value=move || workflow.with(|w| w.mongo.selected_collection.clone())
                            on:change=move |ev| on_select_collection(event_target_value(&ev))
                        >
                            <option value="">"Select collection"</option>
                            {move || workflow
                                .with(|w| w.mongo.collections.clone())
                                .into_iter()
                                .map(|c| view! { <option value=c.clone()>{c}</option> })
                                .collect_view()}
                        </select>
                    </div>
                </Show>

                <Show
                    when=move || workflow.with(|w| w.mongo.preview.is_some())
                    fallback=|| view! { }
                >
                    <div class="preview-section">
                        <div class="preview-desc">"Collection Preview:"</div>
                        <PreviewTable preview=Signal::derive(move || {
                            workflow.with(|w| w.mongo.preview.clone())
                        })/>

                        <div class="file-label">"Select Column to Transform"</div>
                        <select
                            prop:value=move || workflow.with(|w| w.mongo.selected_column.clone())
                            on:change=move |ev| {
                                workflow.update(|w| {
                                    w.mongo.select_column(event_target_value(&ev));
                                });
                            }
                        >
                            <option value="">"Select column"</option>
                            {move || workflow
                                .with(|w| w.mongo.column_choices())
                                .into_iter()
                                .map(|c| view! { <option value=c.clone()>{c}</option> })
                                .collect_view()}
                        </select>

                        <button
                            class="transform-button"
                            on:click=on_apply
                            disabled=move || {
                                is_loading.get()
                                    || workflow.with(|w| w.mongo.selected_column.is_empty())
                                    || session.with(|s| s.artifact().is_none())
                            }
                        >
                            {move || if is_loading.get() { "Applying..." } else { "Apply Transformation" }}
                        </button>
                    </div>
                </Show>

                <Show
                    when=move || workflow.with(|w| w.mongo.transformed_preview.is_some())
                    fallback=|| view! { }
                >
                    <div class="preview-section">
                        <div class="preview-desc">"Transformed Collection Preview:"</div>
                        <PreviewTable preview=Signal::derive(move || {
                            workflow.with(|w| w.mongo.transformed_preview.clone())
                        })/>
                        <div class="success-message">
                            {move || workflow.with(|w| w.mongo.success.clone().unwrap_or_default())}
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
