//! Learn step: upload source/target CSVs, pick columns, learn a
//! transformation from the merged training table.

use leptos::*;
use web_sys::{Event, File, HtmlInputElement};

use crate::csv::Dataset;
use crate::services::{build_training_csv, read_file_text, transform};
use crate::session::{ArtifactKind, TransformSession};

#[component]
pub fn LearnStep(
    session: RwSignal<TransformSession>,
    source_file: RwSignal<Option<File>>,
    target_file: RwSignal<Option<File>>,
    source_col: RwSignal<String>,
    target_col: RwSignal<String>,
    is_loading: RwSignal<bool>,
) -> impl IntoView {
    let (source_columns, set_source_columns) = create_signal(Vec::<String>::new());
    let (target_columns, set_target_columns) = create_signal(Vec::<String>::new());
    let (error, set_error) = create_signal(None::<String>);

    // Swapping a training file invalidates the learned artifact and the
    // column selection that belonged to the old file.
    let on_source_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let file = input.files().and_then(|f| f.get(0));
        source_file.set(file.clone());
        source_col.set(String::new());
        set_source_columns.set(Vec::new());
        session.update(|s| s.clear());
        set_error.set(None);

        if let Some(file) = file {
            spawn_local(async move {
                if let Ok(text) = read_file_text(&file).await {
                    set_source_columns.set(Dataset::parse(&text).columns());
                }
            });
        }
    };

    let on_target_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let file = input.files().and_then(|f| f.get(0));
        target_file.set(file.clone());
        target_col.set(String::new());
        set_target_columns.set(Vec::new());
        session.update(|s| s.clear());
        set_error.set(None);

        if let Some(file) = file {
            spawn_local(async move {
                if let Ok(text) = read_file_text(&file).await {
                    set_target_columns.set(Dataset::parse(&text).columns());
                }
            });
        }
    };

    let on_learn = move |_| {
        set_error.set(None);
        session.update(|s| s.clear());

        let (source, target) = (source_file.get_untracked(), target_file.get_untracked());
        let (col_a, col_b) = (source_col.get_untracked(), target_col.get_untracked());

        let (Some(source), Some(target)) = (source, target) else {
            set_error.set(Some(
                "Please upload both source and target files and select columns.".to_string(),
            ));
            return;
        };
        if col_a.is_empty() || col_b.is_empty() {
            set_error.set(Some(
                "Please upload both source and target files and select columns.".to_string(),
            ));
            return;
        }

        spawn_local(async move {
            is_loading.set(true);

            let result = async {
                let train_csv = build_training_csv(&source, &target, &col_a, &col_b).await?;
                transform::learn(&train_csv).await
            }
            .await;

            match result {
                Ok(artifact) => {
                    log::info!("Learned transformation: {}", artifact.transformation_type);
                    session.update(|s| s.install(artifact));
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }

            is_loading.set(false);
        });
    };

    let can_learn = move || {
        source_file.with(Option::is_some)
            && target_file.with(Option::is_some)
            && !source_col.with(String::is_empty)
            && !target_col.with(String::is_empty)
            && !is_loading.get()
    };

    view! {
        <div class="fade-step">
            <div class="file-inputs">
                <div class="file-input">
                    <div class="file-label">"Source Data"</div>
                    <input type="file" accept=".csv" on:change=on_source_change/>
                    <Show when=move || !source_columns.get().is_empty() fallback=|| view! { }>
                        <select
                            prop:value=move || source_col.get()
                            on:change=move |ev| source_col.set(event_target_value(&ev))
                        >
                            <option value="">"Select source column"</option>
                            {move || source_columns
                                .get()
                                .into_iter()
                                .map(|col| view! { <option value=col.clone()>{col}</option> })
                                .collect_view()}
                        </select>
                    </Show>
                </div>
                <div class="file-input">
                    <div class="file-label">"Target Data"</div>
                    <input type="file" accept=".csv" on:change=on_target_change/>
                    <Show when=move || !target_columns.get().is_empty() fallback=|| view! { }>
                        <select
                            prop:value=move || target_col.get()
                            on:change=move |ev| target_col.set(event_target_value(&ev))
                        >
                            <option value="">"Select target column"</option>
                            {move || target_columns
                                .get()
                                .into_iter()
                                .map(|col| view! { <option value=col.clone()>{col}</option> })
                                .collect_view()}
                        </select>
                    </Show>
                </div>
            </div>

            <button class="transform-button" on:click=on_learn disabled=move || !can_learn()>
                {move || if is_loading.get() { "Analyzing..." } else { "Learn Transformation" }}
            </button>

            <Show when=move || error.get().is_some() fallback=|| view! { }>
                <div class="error-message">{move || error.get().unwrap_or_default()}</div>
            </Show>

            <Show
                when=move || session.with(|s| s.artifact().is_some())
                fallback=|| view! { }
            >
                <ArtifactPreview session=session/>
            </Show>
        </div>
    }
}

/// The learned artifact: classification, function, example predictions,
/// and the approve control for LLM artifacts.
#[component]
fn ArtifactPreview(session: RwSignal<TransformSession>) -> impl IntoView {
    let classification = move || {
        session.with(|s| {
            s.artifact()
                .map(|a| a.transformation_type.clone())
                .unwrap_or_default()
        })
    };
    let description = move || {
        session.with(|s| s.artifact().map(|a| a.description.clone()).unwrap_or_default())
    };
    let examples = move || {
        session.with(|s| s.artifact().map(|a| a.examples.clone()).unwrap_or_default())
    };
    let is_llm = move || {
        session.with(|s| s.artifact().map(|a| a.kind == ArtifactKind::Llm).unwrap_or(false))
    };
    let needs_approval = move || session.with(|s| s.needs_approval());

    view! {
        <div class="preview-section">
            <div class="preview-label">
                "Classification: " <span class="preview-type">{classification}</span>
            </div>
            <div class="preview-desc">"Transformation Function:"</div>
            <pre class="preview-content">{description}</pre>
            <div class="preview-desc mt">"Example Transformations:"</div>
            <table>
                <thead>
                    <tr>
                        <th>"Input"</th>
                        <th>"Expected"</th>
                        <th>"Predicted"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || examples()
                        .into_iter()
                        .map(|ex| {
                            view! {
                                <tr>
                                    <td>{ex.input}</td>
                                    <td>{ex.expected}</td>
                                    <td>{ex.predicted}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
            <Show when=is_llm fallback=|| view! { }>
                <button
                    class="approve-button"
                    on:click=move |_| session.update(|s| s.approve())
                    disabled=move || !needs_approval()
                >
                    {move || if needs_approval() { "Approve Transformation" } else { "Approved" }}
                </button>
            </Show>
        </div>
    }
}
