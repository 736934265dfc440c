//! Task Input Component
//!
//! Text field plus "Add Task" button for creating tasks.

use leptos::ev::KeyboardEvent;
use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::TaskDraft;
use crate::notices::NoticeBoard;

/// Validate pending text. Blank input raises a warning notice instead.
pub(crate) fn accept_input(raw: &str, notices: &NoticeBoard) -> Option<TaskDraft> {
    let draft = TaskDraft::new(raw);
    if draft.is_none() {
        notices.warning("Task is empty", "Please enter a task before adding it.");
    }
    draft
}

#[component]
pub fn TaskInput(#[prop(into)] on_create: Callback<String>) -> impl IntoView {
    let ctx = use_app_context();
    let (pending, set_pending) = signal(String::new());

    let submit = move || {
        let notices = ctx.notices();
        if let Some(draft) = accept_input(&pending.get_untracked(), &notices) {
            on_create.run(draft.title);
            set_pending.set(String::new());
        }
    };

    view! {
        <div class="task-input">
            <input
                type="text"
                class="todo-input"
                placeholder="Add a new task..."
                prop:value=move || pending.get()
                on:input=move |ev| set_pending.set(event_target_value(&ev))
                on:keydown=move |ev: KeyboardEvent| {
                    if ev.key() == "Enter" {
                        submit();
                    }
                }
            />
            <button class="todo-button-primary" on:click=move |_| submit()>
                "+ Add Task"
            </button>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::hooks::{Call, FakeApi, TaskSync};
    use crate::notices::NoticeLevel;

    async fn submit(sync: &TaskSync<FakeApi>, raw: &str) {
        if let Some(draft) = accept_input(raw, sync.notices()) {
            let _ = sync.create(&draft.title).await;
        }
    }

    #[tokio::test]
    async fn test_submit_creates_once_with_trimmed_title() {
        let sync = TaskSync::new(FakeApi::default(), NoticeBoard::new());
        submit(&sync, "   Walk the dog  ").await;

        assert_eq!(*sync.api().calls.borrow(), vec![Call::Create("Walk the dog".to_string())]);
        assert!(sync.notices().notices().is_empty());
    }

    #[tokio::test]
    async fn test_blank_submit_warns_without_calling_create() {
        let sync = TaskSync::new(FakeApi::default(), NoticeBoard::new());
        submit(&sync, "").await;
        submit(&sync, " \t\n").await;

        assert!(sync.api().calls.borrow().is_empty());
        let notices = sync.notices().notices();
        assert_eq!(notices.len(), 2);
        assert!(notices.iter().all(|n| n.level == NoticeLevel::Warning && n.title == "Task is empty"));
    }
}
