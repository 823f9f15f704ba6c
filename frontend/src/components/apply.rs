//! Apply step: run the learned transformation against an uploaded CSV,
//! either as a bounded preview or as a full transform with file download.
//!
//! Both actions re-validate before any network call: files and column
//! present, artifact learned, and (for LLM artifacts) approval given.

use leptos::*;
use web_sys::{Event, File, HtmlInputElement};

use crate::config::TRANSFORMED_FILENAME;
use crate::csv::Dataset;
use crate::services::{build_training_csv, read_file_text, transform, trigger_download};
use crate::session::TransformSession;
use crate::types::{AppError, ApplyPreview};

#[component]
pub fn ApplyStep(
    session: RwSignal<TransformSession>,
    source_file: RwSignal<Option<File>>,
    target_file: RwSignal<Option<File>>,
    source_col: RwSignal<String>,
    target_col: RwSignal<String>,
    is_loading: RwSignal<bool>,
) -> impl IntoView {
    let (apply_file, set_apply_file) = create_signal(None::<File>);
    let (apply_columns, set_apply_columns) = create_signal(Vec::<String>::new());
    let (apply_col, set_apply_col) = create_signal(String::new());
    let (apply_preview, set_apply_preview) = create_signal(None::<ApplyPreview>);
    let (error, set_error) = create_signal(None::<String>);
    let (message, set_message) = create_signal(None::<String>);

    let on_apply_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let file = input.files().and_then(|f| f.get(0));
        set_apply_file.set(file.clone());
        set_apply_col.set(String::new());
        set_apply_columns.set(Vec::new());
        set_apply_preview.set(None);

        if let Some(file) = file {
            spawn_local(async move {
                if let Ok(text) = read_file_text(&file).await {
                    set_apply_columns.set(Dataset::parse(&text).columns());
                }
            });
        }
    };

    // Shared preconditions for both apply variants. Validation failures
    // surface inline; nothing reaches the network.
    let check_preconditions = move |need_column: bool| -> Result<(File, File, File), AppError> {
        let source = source_file
            .get_untracked()
            .ok_or_else(|| AppError::Validation("Please upload the source file in the Learn step.".into()))?;
        let target = target_file
            .get_untracked()
            .ok_or_else(|| AppError::Validation("Please upload the target file in the Learn step.".into()))?;
        let apply = apply_file
            .get_untracked()
            .ok_or_else(|| AppError::Validation("Please upload the apply file and select a column.".into()))?;
        if need_column && apply_col.get_untracked().is_empty() {
            return Err(AppError::Validation(
                "Please upload the apply file and select a column.".into(),
            ));
        }
        if session.with_untracked(|s| s.artifact().is_none()) {
            return Err(AppError::Validation(
                "Please wait for the transformation preview.".into(),
            ));
        }
        session.with_untracked(|s| s.ensure_apply_allowed().map(|_| ()))?;
        Ok((source, target, apply))
    };

    let on_preview = move |_| {
        set_error.set(None);
        set_message.set(None);
        set_apply_preview.set(None);

        let (source, target, apply) = match check_preconditions(true) {
            Ok(files) => files,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };
        let artifact = session.with_untracked(|s| s.artifact().cloned());
        let Some(artifact) = artifact else { return };
        let (col_a, col_b) = (source_col.get_untracked(), target_col.get_untracked());

        spawn_local(async move {
            is_loading.set(true);

            let result = async {
                let train_csv = build_training_csv(&source, &target, &col_a, &col_b).await?;
                transform::preview_apply(&train_csv, &apply, &artifact).await
            }
            .await;

            match result {
                Ok(preview) => set_apply_preview.set(Some(preview)),
                Err(e) => set_error.set(Some(e.to_string())),
            }

            is_loading.set(false);
        });
    };

    let on_apply = move |_| {
        set_error.set(None);
        set_message.set(None);

        let (source, target, apply) = match check_preconditions(false) {
            Ok(files) => files,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };
        let artifact = session.with_untracked(|s| s.artifact().cloned());
        let Some(artifact) = artifact else { return };
        let (col_a, col_b) = (source_col.get_untracked(), target_col.get_untracked());

        spawn_local(async move {
            is_loading.set(true);

            let result = async {
                let train_csv = build_training_csv(&source, &target, &col_a, &col_b).await?;
                let bytes = transform::apply(&train_csv, &apply, &artifact).await?;
                trigger_download(&bytes, TRANSFORMED_FILENAME)
            }
            .await;

            match result {
                Ok(()) => set_message.set(Some("Transformation successful! File downloaded.".to_string())),
                Err(e) => set_error.set(Some(e.to_string())),
            }

            is_loading.set(false);
        });
    };

    view! {
        <div class="fade-step">
            <div class="preview-section">
                <div class="file-label">"Data to Transform (CSV)"</div>
                <input type="file" accept=".csv" on:change=on_apply_file_change/>
                <Show when=move || !apply_columns.get().is_empty() fallback=|| view! { }>
                    <select
                        prop:value=move || apply_col.get()
                        on:change=move |ev| set_apply_col.set(event_target_value(&ev))
                    >
                        <option value="">"Select column to transform"</option>
                        {move || apply_columns
                            .get()
                            .into_iter()
                            .map(|col| view! { <option value=col.clone()>{col}</option> })
                            .collect_view()}
                    </select>
                </Show>

                <div class="button-row">
                    <button
                        class="transform-button"
                        on:click=on_preview
                        disabled=move || {
                            apply_file.with(Option::is_none)
                                || apply_col.with(String::is_empty)
                                || is_loading.get()
                        }
                    >
                        {move || if is_loading.get() { "Loading..." } else { "Preview" }}
                    </button>
                    <button class="transform-button" on:click=on_apply disabled=move || is_loading.get()>
                        "Apply Transformation"
                    </button>
                </div>

                <Show when=move || apply_preview.get().is_some() fallback=|| view! { }>
                    <div class="preview-section">
                        <div class="preview-desc">"Preview of Transformed Data:"</div>
                        <table>
                            <thead>
                                <tr>
                                    <th>"Input"</th>
                                    <th>"Predicted"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || apply_preview
                                    .get()
                                    .map(|p| p.examples)
                                    .unwrap_or_default()
                                    .into_iter()
                                    .map(|ex| {
                                        view! {
                                            <tr>
                                                <td>{ex.input}</td>
                                                <td>{ex.predicted}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    </div>
                </Show>

                <Show when=move || message.get().is_some() fallback=|| view! { }>
                    <div class="success-message">{move || message.get().unwrap_or_default()}</div>
                </Show>
                <Show when=move || error.get().is_some() fallback=|| view! { }>
                    <div class="error-message">{move || error.get().unwrap_or_default()}</div>
                </Show>
            </div>
        </div>
    }
}
