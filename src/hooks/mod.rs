//! Data Hooks
//!
//! Leptos bindings over `TaskSync`: one list query shared through the query
//! cache, and three mutations that invalidate it.

mod task_sync;

use chrono::{DateTime, Local};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::dates::millis_until_next_minute;
use crate::models::{Task, TaskId, TaskPatch};
use crate::query::{QueryState, TASKS_KEY};

pub use task_sync::TaskSync;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub(crate) use task_sync::tests::{task, Call, FakeApi};

/// Reactive view of the shared task list.
///
/// Subscribes to the cache for the lifetime of the calling component:
/// invalidations trigger a background refetch, landed responses update the
/// returned signal. Fetches on mount when nothing fresh is cached.
pub fn use_tasks() -> ReadSignal<QueryState<Vec<Task>>> {
    let ctx = use_app_context();
    let sync = ctx.task_sync();
    let (state, set_state) = signal(sync.cache().state(TASKS_KEY));

    let subscription = sync.watch(
        move || ctx.spawn_refetch(),
        move |latest| set_state.set(latest),
    );
    on_cleanup(move || {
        if let Some(sync) = ctx.try_task_sync() {
            sync.unwatch(subscription);
        }
    });
    state
}

/// Current local time, refreshed on every minute boundary
pub fn use_clock() -> ReadSignal<DateTime<Local>> {
    let (now, set_now) = signal(Local::now());
    spawn_local(async move {
        loop {
            TimeoutFuture::new(millis_until_next_minute(&Local::now())).await;
            // Stops once the owning scope is disposed
            if set_now.try_set(Local::now()).is_some() {
                break;
            }
        }
    });
    now
}

pub fn use_create_task() -> Callback<String> {
    let ctx = use_app_context();
    Callback::new(move |title: String| {
        let sync = ctx.task_sync();
        spawn_local(async move {
            // Failures are already logged and surfaced as a notice
            let _ = sync.create(&title).await;
        });
    })
}

pub fn use_update_task() -> Callback<(TaskId, TaskPatch)> {
    let ctx = use_app_context();
    Callback::new(move |(id, patch): (TaskId, TaskPatch)| {
        let sync = ctx.task_sync();
        spawn_local(async move {
            // Failures are already logged and surfaced as a notice
            let _ = sync.update(id, &patch).await;
        });
    })
}

pub fn use_delete_task() -> Callback<TaskId> {
    let ctx = use_app_context();
    Callback::new(move |id: TaskId| {
        let sync = ctx.task_sync();
        spawn_local(async move {
            // Failures are already logged and surfaced as a notice
            let _ = sync.delete(id).await;
        });
    })
}
