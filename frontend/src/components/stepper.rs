//! Wizard step sidebar.
//!
//! Steps are freely navigable; every click goes through
//! [`WorkflowState::enter`] so the step-entry reset table applies
//! regardless of which control triggered the navigation.

use leptos::*;

use crate::workflow::{WorkflowState, WorkflowStep};

#[component]
pub fn Stepper(workflow: RwSignal<WorkflowState>) -> impl IntoView {
    view! {
        <div class="sidebar">
            <div class="stepper">
                {WorkflowStep::ALL
                    .iter()
                    .map(|&step| {
                        view! {
                            <button
                                class="stepper-btn"
                                class:active=move || workflow.with(|w| w.step == step)
                                on:click=move |_| workflow.update(|w| w.enter(step))
                            >
                                {step.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
