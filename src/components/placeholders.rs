//! Placeholder Views
//!
//! Static empty, loading and error screens.

use leptos::prelude::*;

#[component]
pub fn EmptyState() -> impl IntoView {
    view! {
        <div class="placeholder">
            <div class="placeholder-icon">"📝"</div>
            <h3>"No tasks yet"</h3>
            <p>"Add your first task above to get started!"</p>
        </div>
    }
}

#[component]
pub fn LoadingState() -> impl IntoView {
    view! {
        <div class="todo-container">
            <div class="todo-card placeholder">
                <div class="placeholder-icon">"⏳"</div>
                <h3>"Loading tasks..."</h3>
            </div>
        </div>
    }
}

/// Shown when the initial list fetch fails, with the latest log lines
#[component]
pub fn ErrorState(#[prop(into)] base_url: String, recent_logs: Vec<String>) -> impl IntoView {
    let has_logs = !recent_logs.is_empty();
    view! {
        <div class="todo-container">
            <div class="todo-card placeholder">
                <div class="placeholder-icon">"❌"</div>
                <h3>"Error loading tasks"</h3>
                <p>"Please make sure the backend server is running on " {base_url}</p>
                {has_logs.then(|| view! {
                    <details class="recent-logs">
                        <summary>"Recent log"</summary>
                        <pre>{recent_logs.join("\n")}</pre>
                    </details>
                })}
            </div>
        </div>
    }
}
