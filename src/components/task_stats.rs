//! Task Stats Component
//!
//! Active/completed counts and a completion progress bar.

use leptos::prelude::*;

use crate::models::TaskView;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub active: usize,
    pub completed: usize,
}

impl TaskCounts {
    pub fn of(tasks: &[TaskView]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            active: tasks.len() - completed,
            completed,
        }
    }

    pub fn total(&self) -> usize {
        self.active + self.completed
    }

    /// `round(100 * completed / total)`, `None` for an empty list
    pub fn progress_percent(&self) -> Option<usize> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        // Integer half-up rounding
        Some((200 * self.completed + total) / (2 * total))
    }

    pub fn active_label(&self) -> &'static str {
        if self.active == 1 { "active task" } else { "active tasks" }
    }
}

#[component]
pub fn TaskStats(#[prop(into)] tasks: Signal<Vec<TaskView>>) -> impl IntoView {
    let counts = Memo::new(move |_| tasks.with(|t| TaskCounts::of(t)));

    view! {
        <div class="task-stats">
            <div class="stats-row">
                <div class="stat">
                    <span class="stat-value">{move || counts.get().active}</span>
                    " "
                    {move || counts.get().active_label()}
                </div>
                <div class="stat">
                    <span class="stat-value">{move || counts.get().completed}</span>
                    " completed"
                </div>
            </div>
            {move || counts.get().progress_percent().map(|percent| view! {
                <div class="progress">
                    <div class="progress-track">
                        <div class="progress-fill" style=format!("width: {}%;", percent)></div>
                    </div>
                    <div class="progress-label">{percent} "% complete"</div>
                </div>
            })}
        </div>
    }
}
