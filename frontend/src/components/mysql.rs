//! MySQL step: credential, drill-down browsing, table preview, and the
//! apply-and-store action with its content-type dual-mode result.
//!
//! All state lives in the step-scoped [`MysqlBrowse`] inside the shared
//! workflow signal; every mutation goes through its transition methods so
//! the drill-down invalidation rules hold no matter which handler fired.
//! A response landing after the user navigated away writes into the
//! already-reset scope; that race is accepted, not defended against.

use leptos::*;
use web_sys::SubmitEvent;

use crate::services::mysql;
use crate::session::TransformSession;
use crate::workflow::WorkflowState;

#[component]
pub fn MysqlStep(
    workflow: RwSignal<WorkflowState>,
    session: RwSignal<TransformSession>,
    is_loading: RwSignal<bool>,
) -> impl IntoView {
    let on_connect = move |ev: SubmitEvent| {
        ev.prevent_default();
        workflow.update(|w| w.mysql.begin_connect());
        let password = workflow.with_untracked(|w| w.mysql.password.clone());

        spawn_local(async move {
            is_loading.set(true);
            match mysql::databases(&password).await {
                Ok(dbs) => workflow.update(|w| w.mysql.set_databases(dbs)),
                Err(e) => workflow.update(|w| w.mysql.error = Some(e.to_string())),
            }
            is_loading.set(false);
        });
    };

    let on_select_database = move |db: String| {
        workflow.update(|w| {
            w.mysql.select_database(db.clone());
            w.mysql.error = None;
        });
        let password = workflow.with_untracked(|w| w.mysql.password.clone());

        spawn_local(async move {
            is_loading.set(true);
            match mysql::tables(&password, &db).await {
                Ok(tables) => workflow.update(|w| w.mysql.set_tables(tables)),
                Err(e) => workflow.update(|w| w.mysql.error = Some(e.to_string())),
            }
            is_loading.set(false);
        });
    };

    let on_select_table = move |table: String| {
        workflow.update(|w| {
            w.mysql.select_table(table.clone());
            w.mysql.error = None;
        });
        let (password, database) =
            workflow.with_untracked(|w| (w.mysql.password.clone(), w.mysql.selected_database.clone()));

        spawn_local(async move {
            is_loading.set(true);
            match mysql::columns(&password, &database, &table).await {
                Ok(columns) => workflow.update(|w| w.mysql.set_columns(columns)),
                Err(e) => workflow.update(|w| w.mysql.error = Some(e.to_string())),
            }
            is_loading.set(false);
        });
    };

    // Selecting a column also fetches the table preview, the last level
    // of the drill-down before apply becomes available.
    let on_select_column = move |column: String| {
        workflow.update(|w| {
            w.mysql.select_column(column);
            w.mysql.error = None;
        });
        let (password, database, table) = workflow.with_untracked(|w| {
            (
                w.mysql.password.clone(),
                w.mysql.selected_database.clone(),
                w.mysql.selected_table.clone(),
            )
        });

        spawn_local(async move {
            is_loading.set(true);
            match mysql::preview_table(&password, &database, &table).await {
                Ok(preview) => workflow.update(|w| w.mysql.table_preview = Some(preview)),
                Err(e) => workflow.update(|w| w.mysql.error = Some(e.to_string())),
            }
            is_loading.set(false);
        });
    };

    let on_apply = move |_| {
        workflow.update(|w| {
            w.mysql.error = None;
            w.mysql.transformed_preview = None;
            w.mysql.download = None;
        });

        if session.with_untracked(|s| s.artifact().is_none()) {
            workflow.update(|w| {
                w.mysql.error =
                    Some("No transformation available. Please complete the Learn step first.".into())
            });
            return;
        }
        if let Err(e) = session.with_untracked(|s| s.ensure_apply_allowed().map(|_| ())) {
            workflow.update(|w| w.mysql.error = Some(e.to_string()));
            return;
        }
        let Some(payload) = session.with_untracked(|s| s.payload()) else {
            return;
        };

        let (password, database, table, column) = workflow.with_untracked(|w| {
            (
                w.mysql.password.clone(),
                w.mysql.selected_database.clone(),
                w.mysql.selected_table.clone(),
                w.mysql.selected_column.clone(),
            )
        });

        spawn_local(async move {
            is_loading.set(true);
            match mysql::apply_and_store(&password, &database, &table, &column, &payload).await {
                Ok(outcome) => workflow.update(|w| {
                    w.mysql.transformed_preview = Some(outcome.preview);
                    w.mysql.download = outcome.download;
                }),
                Err(e) => workflow.update(|w| w.mysql.error = Some(e.to_string())),
            }
            is_loading.set(false);
        });
    };

    view! {
        <div class="fade-step">
            <div class="preview-section">
                <form class="mysql-form" on:submit=on_connect>
                    <div class="file-label">"MySQL Password (localhost)"</div>
                    <input
                        type="password"
                        placeholder="Password"
                        prop:value=move || workflow.with(|w| w.mysql.password.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            workflow.update(|w| w.mysql.password = value);
                        }
                    />
                    <button
                        class="transform-button"
                        type="submit"
                        disabled=move || {
                            is_loading.get() || workflow.with(|w| w.mysql.password.is_empty())
                        }
                    >
                        {move || if is_loading.get() { "Connecting..." } else { "Connect" }}
                    </button>
                </form>

                <Show
                    when=move || workflow.with(|w| w.mysql.error.is_some())
                    fallback=|| view! { }
                >
                    <div class="error-message">
                        {move || workflow.with(|w| w.mysql.error.clone().unwrap_or_default())}
                    </div>
                </Show>

                <Show
                    when=move || workflow.with(|w| !w.mysql.databases.is_empty())
                    fallback=|| view! { }
                >
                    <div>
                        <div class="file-label">"Select Database"</div>
                        <select
                            prop:value=move || workflow.with(|w| w.mysql.selected_database.clone())
                            on:change=move |ev| on_select_database(event_target_value(&ev))
                        >
                            <option value="">"Select database"</option>
                            {move || workflow
                                .with(|w| w.mysql.databases.clone())
                                .into_iter()
                                .map(|db| view! { <option value=db.clone()>{db}</option> })
                                .collect_view()}
                        </select>
                    </div>
                </Show>

                <Show
                    when=move || workflow.with(|w| !w.mysql.tables.is_empty())
                    fallback=|| view! { }
                >
                    <div>
                        <div class="file-label">"Select Table"</div>
                        <select
                            prop:value=move || workflow.with(|w| w.mysql.selected_table.clone())
                            on:change=move |ev| on_select_table(event_target_value(&ev))
                        >
                            <option value="">"Select table"</option>
                            {move || workflow
                                .with(|w| w.mysql.tables.clone())
                                .into_iter()
                                .map(|t| view! { <option value=t.clone()>{t}</option> })
                                .collect_view()}
                        </select>
                    </div>
                </Show>

                <Show
                    when=move || workflow.with(|w| !w.mysql.columns.is_empty())
                    fallback=|| view! { }
                >
                    <div>
                        <div class="file-label">"Select Column"</div>
                        <select
                            prop:value=move || workflow.with(|w| w.mysql.selected_column.clone())
                            on:change=move |ev| on_select_column(event_target_value(&ev))
                        >
                            <option value="">"Select column"</option>
                            {move || workflow
                                .with(|w| w.mysql.columns.clone())
                                .into_iter()
                                .map(|c| view! { <option value=c.clone()>{c}</option> })
                                .collect_view()}
                        </select>
                    </div>
                </Show>

                <Show
                    when=move || workflow.with(|w| w.mysql.table_preview.is_some())
                    fallback=|| view! { }
                >
                    <div class="preview-section">
                        <div class="preview-desc">"Table Preview:"</div>
                        <PreviewTable preview=Signal::derive(move || {
                            workflow.with(|w| w.mysql.table_preview.clone())
                        })/>
                        <button
                            class="transform-button"
                            on:click=on_apply
                            disabled=move || {
                                is_loading.get()
                                    || workflow.with(|w| w.mysql.selected_column.is_empty())
                                    || session.with(|s| s.artifact().is_none())
                            }
                        >
                            {move || if is_loading.get() { "Applying..." } else { "Apply Transformation" }}
                        </button>
                    </div>
                </Show>

                <Show
                    when=move || workflow.with(|w| w.mysql.transformed_preview.is_some())
                    fallback=|| view! { }
                >
                    <div class="preview-section">
                        <div class="preview-desc">"Transformed Table Preview:"</div>
                        <PreviewTable preview=Signal::derive(move || {
                            workflow.with(|w| w.mysql.transformed_preview.clone())
                        })/>
                        <div class="success-message">
                            "Transformation done. Table updated in the transformations database."
                        </div>
                    </div>
                </Show>

                <Show
                    when=move || workflow.with(|w| w.mysql.download.is_some())
                    fallback=|| view! { }
                >
                    <a
                        class="transform-button"
                        href=move || workflow.with(|w| {
                            w.mysql.download.as_ref().map(|d| d.url.clone()).unwrap_or_default()
                        })
                        download=move || workflow.with(|w| {
                            w.mysql.download.as_ref().map(|d| d.filename.clone()).unwrap_or_default()
                        })
                    >
                        "Download"
                    </a>
                </Show>
            </div>
        </div>
    }
}

/// Render an optional [`TablePreview`] as an HTML table.
#[component]
pub fn PreviewTable(
    preview: Signal<Option<crate::types::TablePreview>>,
) -> impl IntoView {
    view! {
        <table>
            <thead>
                <tr>
                    {move || preview
                        .get()
                        .map(|p| p.headers)
                        .unwrap_or_default()
                        .into_iter()
                        .map(|h| view! { <th>{h}</th> })
                        .collect_view()}
                </tr>
            </thead>
            <tbody>
                {move || {
                    preview.get().map(|p| {
                        (0..p.data.len())
                            .map(|row| {
                                let cells = p
                                    .headers
                                    .iter()
                                    .map(|h| view! { <td>{p.cell(row, h)}</td> })
                                    .collect_view();
                                view! { <tr>{cells}</tr> }
                            })
                            .collect_view()
                    })
                }}
            </tbody>
        </table>
    }
}
