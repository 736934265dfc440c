//! Task Item Component
//!
//! A single task row.

use chrono::{DateTime, Local};
use leptos::prelude::*;

use crate::models::{TaskId, TaskView};

#[component]
pub fn TaskItem(
    task: TaskView,
    #[prop(into)] now: Signal<DateTime<Local>>,
    on_toggle: Callback<TaskId>,
    on_delete: Callback<TaskId>,
) -> impl IntoView {
    let id = task.id;
    let completed = task.completed;
    let title = task.title.clone();
    // Re-rendered as the clock ticks so "today"/"yesterday" stay accurate
    let date_label = move || now.with(|now| task.date_label(now));

    view! {
        <div class=if completed { "todo-item completed" } else { "todo-item active" }>
            // Checkbox
            <button
                class=if completed { "todo-checkbox checked" } else { "todo-checkbox" }
                title=if completed { "Mark as active" } else { "Mark as completed" }
                on:click=move |_| on_toggle.run(id)
            >
                {completed.then_some("✓")}
            </button>

            <div class="todo-body">
                <span class=if completed { "todo-text completed" } else { "todo-text" }>{title}</span>
                <span class="todo-date">{date_label}</span>
            </div>

            <button class="todo-delete" title="Delete task" on:click=move |_| on_delete.run(id)>"×"</button>
        </div>
    }
}
