//! Task List Component
//!
//! Active tasks first, then a "Completed (N)" section.

use chrono::{DateTime, Local};
use leptos::prelude::*;

use crate::components::TaskItem;
use crate::models::{TaskId, TaskView};

/// Split into (active, completed), each keeping its input order
pub fn partition(tasks: &[TaskView]) -> (Vec<TaskView>, Vec<TaskView>) {
    tasks.iter().cloned().partition(|task| !task.completed)
}

pub fn completed_heading(count: usize) -> String {
    format!("Completed ({})", count)
}

#[component]
pub fn TaskList(
    #[prop(into)] tasks: Signal<Vec<TaskView>>,
    #[prop(into)] now: Signal<DateTime<Local>>,
    on_toggle: Callback<TaskId>,
    on_delete: Callback<TaskId>,
) -> impl IntoView {
    let groups = Memo::new(move |_| tasks.with(|t| partition(t)));
    let active = move || groups.with(|(active, _)| active.clone());
    let completed = move || groups.with(|(_, completed)| completed.clone());

    view! {
        <div class="task-list">
            <For
                each=active
                key=|task| (task.id, task.completed, task.title.clone())
                children=move |task| view! {
                    <TaskItem task=task now=now on_toggle=on_toggle on_delete=on_delete />
                }
            />
            <Show when=move || groups.with(|(_, completed)| !completed.is_empty())>
                <h3 class="completed-heading">
                    {move || groups.with(|(_, completed)| completed_heading(completed.len()))}
                </h3>
                <For
                    each=completed
                    key=|task| (task.id, task.completed, task.title.clone())
                    children=move |task| view! {
                        <TaskItem task=task now=now on_toggle=on_toggle on_delete=on_delete />
                    }
                />
            </Show>
        </div>
    }
}
