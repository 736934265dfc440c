//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;
use rolling_logger::LogBuffer;

use crate::api::HttpTaskClient;
use crate::hooks::TaskSync;
use crate::notices::NoticeBoard;

/// App-wide handles provided via context
///
/// The synchronizer holds `Rc`s, so it lives in local arena storage; the
/// context itself stays `Copy`.
#[derive(Clone, Copy)]
pub struct AppContext {
    task_sync: StoredValue<TaskSync<HttpTaskClient>, LocalStorage>,
    /// `None` when the logger could not be installed
    logs: StoredValue<Option<LogBuffer>>,
}

impl AppContext {
    pub fn new(client: HttpTaskClient, logs: Option<LogBuffer>) -> Self {
        let task_sync = TaskSync::new(client, NoticeBoard::new());
        Self {
            task_sync: StoredValue::new_local(task_sync),
            logs: StoredValue::new(logs),
        }
    }

    pub fn task_sync(&self) -> TaskSync<HttpTaskClient> {
        self.task_sync.get_value()
    }

    /// `None` once the owning scope has been disposed
    pub fn try_task_sync(&self) -> Option<TaskSync<HttpTaskClient>> {
        self.task_sync.try_get_value()
    }

    pub fn notices(&self) -> NoticeBoard {
        self.task_sync.with_value(|sync| sync.notices().clone())
    }

    pub fn try_notices(&self) -> Option<NoticeBoard> {
        self.task_sync.try_with_value(|sync| sync.notices().clone())
    }

    pub fn base_url(&self) -> String {
        self.task_sync
            .with_value(|sync| sync.api().config().base_url().to_string())
    }

    /// The newest `limit` log lines, oldest first
    pub fn recent_logs(&self, limit: usize) -> Vec<String> {
        self.logs.with_value(|logs| log_tail(logs.as_ref(), limit))
    }

    /// Refetch the task list in the background
    pub fn spawn_refetch(&self) {
        if let Some(sync) = self.try_task_sync() {
            spawn_local(async move { sync.refetch().await });
        }
    }
}

pub(crate) fn log_tail(logs: Option<&LogBuffer>, limit: usize) -> Vec<String> {
    logs.map(|buffer| buffer.recent(limit).iter().map(ToString::to_string).collect())
        .unwrap_or_default()
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
