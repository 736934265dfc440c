//! Task Endpoints
//!
//! `/api/v1/tasks/` list/create/update/delete.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use super::{HttpTaskClient, TaskApi};
use crate::error::ApiResult;
use crate::models::{Task, TaskDraft, TaskId, TaskPatch};

pub const TASKS_PATH: &str = "/api/v1/tasks/";

const JSON: &str = "application/json";

fn task_path(id: TaskId) -> String {
    format!("/api/v1/tasks/{}", id)
}

#[async_trait(?Send)]
impl TaskApi for HttpTaskClient {
    async fn list(&self) -> ApiResult<Vec<Task>> {
        let request = self.http.get(self.url(TASKS_PATH));
        let tasks: Vec<Task> = self.send_json(request).await?;
        tracing::debug!(count = tasks.len(), "Fetched tasks");
        Ok(tasks)
    }

    async fn create(&self, title: &str) -> ApiResult<Task> {
        let draft = TaskDraft { title: title.to_string() };
        // .json() sets Content-Type itself
        let request = self.http.post(self.url(TASKS_PATH)).json(&draft);
        self.send_json(request).await
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> ApiResult<Task> {
        // The backend reads update fields from the query string, not the body
        let request = self
            .http
            .put(self.url(&task_path(id)))
            .header(CONTENT_TYPE, JSON)
            .query(&patch.query_pairs());
        self.send_json(request).await
    }

    async fn delete(&self, id: TaskId) -> ApiResult<()> {
        let request = self
            .http
            .delete(self.url(&task_path(id)))
            .header(CONTENT_TYPE, JSON);
        // 204 No Content: nothing to decode
        self.send(request).await?;
        Ok(())
    }
}
