//! Task List App
//!
//! Root component: wires the data hooks to the presentational components.

use leptos::prelude::*;
use rolling_logger::LogBuffer;

use crate::api::HttpTaskClient;
use crate::components::{
    EmptyState, ErrorState, LoadingState, TaskInput, TaskList, TaskStats, Toaster,
};
use crate::config::ApiConfig;
use crate::context::{use_app_context, AppContext};
use crate::hooks::{use_clock, use_create_task, use_delete_task, use_tasks, use_update_task};
use crate::models::{TaskId, TaskPatch, TaskView};
use crate::query::QueryState;

/// Mutually exclusive top-level screens, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Error,
    Loaded,
}

impl Screen {
    pub fn of<T>(state: &QueryState<T>) -> Self {
        match state {
            QueryState::Loading => Screen::Loading,
            QueryState::Failed(_) => Screen::Error,
            QueryState::Ready(_) => Screen::Loaded,
        }
    }
}

/// What the loaded screen shows under the stats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    Empty,
    List,
}

impl Body {
    pub fn of(tasks: &[TaskView]) -> Self {
        if tasks.is_empty() {
            Body::Empty
        } else {
            Body::List
        }
    }
}

/// Log lines shown under the error screen
const ERROR_LOG_LINES: usize = 10;

/// Update flipping `completed` for the task with `id`; `None` if it is not
/// in the rendered list
pub fn toggle_patch(tasks: &[TaskView], id: TaskId) -> Option<TaskPatch> {
    tasks
        .iter()
        .find(|task| task.id == id)
        .map(|task| TaskPatch::completed(!task.completed))
}

#[component]
pub fn App(logs: Option<LogBuffer>) -> impl IntoView {
    let config = ApiConfig::from_env();
    tracing::info!(base_url = config.base_url(), "Starting task list");
    provide_context(AppContext::new(HttpTaskClient::new(config), logs));

    view! {
        <TaskBoard />
        <Toaster />
    }
}

#[component]
fn TaskBoard() -> impl IntoView {
    let ctx = use_app_context();
    let state = use_tasks();
    let create_task = use_create_task();
    let update_task = use_update_task();
    let delete_task = use_delete_task();

    let screen = Memo::new(move |_| state.with(Screen::of));
    let todos = Memo::new(move |_| {
        state.with(|s| {
            s.data()
                .map(|tasks| tasks.iter().map(TaskView::from).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    });
    let body = Memo::new(move |_| todos.with(|tasks| Body::of(tasks)));
    let now = use_clock();

    let on_toggle = Callback::new(move |id: TaskId| {
        if let Some(patch) = todos.with_untracked(|tasks| toggle_patch(tasks, id)) {
            update_task.run((id, patch));
        }
    });
    let on_delete = Callback::new(move |id: TaskId| delete_task.run(id));
    let base_url = ctx.base_url();

    move || match screen.get() {
        Screen::Loading => view! { <LoadingState /> }.into_any(),
        Screen::Error => view! {
            <ErrorState base_url=base_url.clone() recent_logs=ctx.recent_logs(ERROR_LOG_LINES) />
        }
        .into_any(),
        Screen::Loaded => view! {
            <div class="todo-container">
                <div class="todo-card">
                    // Header
                    <header class="todo-header">
                        <h1>"My Tasks"</h1>
                        <p>"Stay organized and get things done"</p>
                    </header>

                    <TaskInput on_create=create_task />

                    <TaskStats tasks=todos />

                    <Show when=move || body.get() == Body::List fallback=|| view! { <EmptyState /> }>
                        <TaskList tasks=todos now=now on_toggle=on_toggle on_delete=on_delete />
                    </Show>
                </div>
            </div>
        }
        .into_any(),
    }
}
