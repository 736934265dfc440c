//! Backend API Client
//!
//! REST bindings to the task backend, organized behind the `TaskApi` trait.

mod tasks;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{Task, TaskId, TaskPatch};

/// Task backend operations
///
/// Futures are `?Send`: the browser event loop is single-threaded.
#[async_trait(?Send)]
pub trait TaskApi {
    /// All tasks, in server order
    async fn list(&self) -> ApiResult<Vec<Task>>;

    /// Create a task from an already-trimmed, non-empty title
    async fn create(&self, title: &str) -> ApiResult<Task>;

    /// Apply a partial update
    async fn update(&self, id: TaskId, patch: &TaskPatch) -> ApiResult<Task>;

    async fn delete(&self, id: TaskId) -> ApiResult<()>;
}

/// HTTP implementation over `reqwest` (browser fetch on wasm32)
#[derive(Debug, Clone)]
pub struct HttpTaskClient {
    http: Client,
    config: ApiConfig,
}

impl HttpTaskClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { http: Client::new(), config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    /// Send and reject non-2xx statuses; error bodies are never read
    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Request { status: status.as_u16() });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
