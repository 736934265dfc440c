//! Task Synchronizer
//!
//! Binds a `TaskApi` to the query cache and the notice board. Writes
//! invalidate the task list on success and raise a notice on failure; the
//! cached list only ever changes when a fetch lands.

use std::rc::Rc;

use crate::api::TaskApi;
use crate::error::ApiResult;
use crate::models::{Task, TaskId, TaskPatch};
use crate::notices::NoticeBoard;
use crate::query::{QueryClient, QueryState, SubscriptionId, TASKS_KEY};

/// The three write operations and their user-facing failure copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    pub fn failure_title(&self) -> &'static str {
        match self {
            Mutation::Create => "Error adding task",
            Mutation::Update => "Error updating task",
            Mutation::Delete => "Error deleting task",
        }
    }

    pub fn failure_description(&self) -> &'static str {
        match self {
            Mutation::Create => "Failed to add your task. Please try again.",
            Mutation::Update => "Failed to update your task. Please try again.",
            Mutation::Delete => "Failed to delete your task. Please try again.",
        }
    }

    fn log_message(&self) -> &'static str {
        match self {
            Mutation::Create => "Error creating task",
            Mutation::Update => "Error updating task",
            Mutation::Delete => "Error deleting task",
        }
    }
}

pub struct TaskSync<A> {
    api: Rc<A>,
    cache: QueryClient<Vec<Task>>,
    notices: NoticeBoard,
}

impl<A> Clone for TaskSync<A> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            cache: self.cache.clone(),
            notices: self.notices.clone(),
        }
    }
}

impl<A: TaskApi> TaskSync<A> {
    pub fn new(api: A, notices: NoticeBoard) -> Self {
        Self {
            api: Rc::new(api),
            cache: QueryClient::new(),
            notices,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache(&self) -> &QueryClient<Vec<Task>> {
        &self.cache
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Keep `on_update` current with the task list. `spawn_refetch` runs once
    /// up front when nothing fresh is cached, then after every invalidation.
    pub fn watch<R, U>(&self, spawn_refetch: R, on_update: U) -> SubscriptionId
    where
        R: Fn() + 'static,
        U: Fn(QueryState<Vec<Task>>) + 'static,
    {
        let refetch = Rc::new(spawn_refetch);
        let on_invalidate = Rc::clone(&refetch);
        let id = self.cache.watch(TASKS_KEY, move || on_invalidate(), on_update);
        if self.cache.needs_fetch(TASKS_KEY) {
            refetch();
        }
        id
    }

    pub fn unwatch(&self, id: SubscriptionId) {
        self.cache.unsubscribe(TASKS_KEY, id);
    }

    /// Fetch the list and record the outcome in the cache. Never retried.
    pub async fn refetch(&self) {
        self.cache.begin_fetch(TASKS_KEY);
        let result = self.api.list().await;
        match &result {
            Ok(tasks) => tracing::debug!(count = tasks.len(), "Loaded tasks"),
            Err(err) => tracing::error!(status = ?err.status(), "Error loading tasks: {}", err),
        }
        self.cache.resolve(TASKS_KEY, result);
    }

    pub async fn create(&self, title: &str) -> ApiResult<Task> {
        let result = self.api.create(title).await;
        self.settle(Mutation::Create, result)
    }

    pub async fn update(&self, id: TaskId, patch: &TaskPatch) -> ApiResult<Task> {
        let result = self.api.update(id, patch).await;
        self.settle(Mutation::Update, result)
    }

    pub async fn delete(&self, id: TaskId) -> ApiResult<()> {
        let result = self.api.delete(id).await;
        self.settle(Mutation::Delete, result)
    }

    fn settle<T>(&self, mutation: Mutation, result: ApiResult<T>) -> ApiResult<T> {
        match &result {
            Ok(_) => {
                self.cache.invalidate(TASKS_KEY);
            }
            Err(err) => {
                tracing::error!(status = ?err.status(), "{}: {}", mutation.log_message(), err);
                self.notices
                    .error(mutation.failure_title(), mutation.failure_description());
            }
        }
        result
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
pub(crate) mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::notices::NoticeLevel;
    use crate::query::QueryEvent;
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Call {
        List,
        Create(String),
        Update(TaskId, TaskPatch),
        Delete(TaskId),
    }

    /// In-memory backend recording every call
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub tasks: RefCell<Vec<Task>>,
        pub calls: RefCell<Vec<Call>>,
        pub fail_with: RefCell<Option<ApiError>>,
        next_id: Cell<TaskId>,
    }

    impl FakeApi {
        pub fn with_tasks(tasks: Vec<Task>) -> Self {
            let next = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            let api = Self::default();
            *api.tasks.borrow_mut() = tasks;
            api.next_id.set(next);
            api
        }

        fn check(&self) -> ApiResult<()> {
            match self.fail_with.borrow().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    #[async_trait(?Send)]
    impl TaskApi for FakeApi {
        async fn list(&self) -> ApiResult<Vec<Task>> {
            self.calls.borrow_mut().push(Call::List);
            self.check()?;
            Ok(self.tasks.borrow().clone())
        }

        async fn create(&self, title: &str) -> ApiResult<Task> {
            self.calls.borrow_mut().push(Call::Create(title.to_string()));
            self.check()?;
            let id = self.next_id.get().max(1);
            self.next_id.set(id + 1);
            let task = Task {
                id,
                title: title.to_string(),
                completed: false,
                created_at: "2025-07-21T18:00:00Z".to_string(),
            };
            self.tasks.borrow_mut().push(task.clone());
            Ok(task)
        }

        async fn update(&self, id: TaskId, patch: &TaskPatch) -> ApiResult<Task> {
            self.calls.borrow_mut().push(Call::Update(id, patch.clone()));
            self.check()?;
            let mut tasks = self.tasks.borrow_mut();
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or(ApiError::Request { status: 404 })?;
            if let Some(completed) = patch.completed {
                task.completed = completed;
            }
            if let Some(title) = &patch.title {
                task.title = title.clone();
            }
            Ok(task.clone())
        }

        async fn delete(&self, id: TaskId) -> ApiResult<()> {
            self.calls.borrow_mut().push(Call::Delete(id));
            self.check()?;
            let mut tasks = self.tasks.borrow_mut();
            let before = tasks.len();
            tasks.retain(|t| t.id != id);
            if tasks.len() == before {
                return Err(ApiError::Request { status: 404 });
            }
            Ok(())
        }
    }

    pub(crate) fn task(id: TaskId, title: &str, completed: bool) -> Task {
        Task {
            id,
            title: title.to_string(),
            completed,
            created_at: "2025-07-21T18:00:00Z".to_string(),
        }
    }

    fn sync_with(tasks: Vec<Task>) -> TaskSync<FakeApi> {
        TaskSync::new(FakeApi::with_tasks(tasks), NoticeBoard::new())
    }

    type Pending = Rc<RefCell<Vec<tokio::task::JoinHandle<()>>>>;

    /// Watch `sync` the way the UI does, spawning refetches on the local set
    fn watch_in_background(sync: &TaskSync<FakeApi>) -> (Pending, Rc<RefCell<Vec<QueryState<Vec<Task>>>>>) {
        let pending: Pending = Rc::new(RefCell::new(Vec::new()));
        let handles = Rc::clone(&pending);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let background = sync.clone();
        sync.watch(
            move || {
                let sync = background.clone();
                handles
                    .borrow_mut()
                    .push(tokio::task::spawn_local(async move { sync.refetch().await }));
            },
            move |state| sink.borrow_mut().push(state),
        );
        (pending, seen)
    }

    async fn drain(pending: &Pending) {
        loop {
            let next = pending.borrow_mut().pop();
            match next {
                Some(handle) => handle.await.expect("refetch task panicked"),
                None => break,
            }
        }
    }

    fn invalidations(sync: &TaskSync<FakeApi>) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        sync.cache().subscribe(
            TASKS_KEY,
            Rc::new(move |event: QueryEvent| {
                if event == QueryEvent::Invalidated {
                    counter.set(counter.get() + 1);
                }
            }),
        );
        count
    }

    #[tokio::test]
    async fn test_refetch_populates_cache() {
        let sync = sync_with(vec![task(1, "A", false)]);
        assert!(sync.cache().state(TASKS_KEY).is_loading());

        sync.refetch().await;
        assert_eq!(sync.cache().state(TASKS_KEY), QueryState::Ready(vec![task(1, "A", false)]));
    }

    #[tokio::test]
    async fn test_failed_refetch_is_failed_state_without_notice() {
        let sync = sync_with(vec![]);
        *sync.api().fail_with.borrow_mut() = Some(ApiError::Network("refused".into()));

        sync.refetch().await;
        assert!(sync.cache().state(TASKS_KEY).error().is_some());
        assert!(sync.notices().notices().is_empty());
        assert_eq!(*sync.api().calls.borrow(), vec![Call::List]);
    }

    #[tokio::test]
    async fn test_create_invalidates_and_refetch_reflects_server() {
        let sync = sync_with(vec![]);
        sync.refetch().await;
        let invalidated = invalidations(&sync);

        let created = sync.create("Buy milk").await.expect("create should succeed");
        assert_eq!(invalidated.get(), 1);
        // No optimistic update: the cache still holds the old list
        assert_eq!(sync.cache().state(TASKS_KEY).data(), Some(&vec![]));
        assert!(sync.cache().needs_fetch(TASKS_KEY));

        sync.refetch().await;
        assert_eq!(sync.cache().state(TASKS_KEY).data(), Some(&vec![created]));
    }

    #[tokio::test]
    async fn test_failed_mutations_notify_and_do_not_invalidate() {
        let sync = sync_with(vec![task(1, "A", false)]);
        sync.refetch().await;
        let invalidated = invalidations(&sync);
        *sync.api().fail_with.borrow_mut() = Some(ApiError::Request { status: 500 });

        assert!(sync.create("x").await.is_err());
        assert!(sync.update(1, &TaskPatch::completed(true)).await.is_err());
        assert!(sync.delete(1).await.is_err());

        assert_eq!(invalidated.get(), 0);
        let notices = sync.notices().notices();
        let titles: Vec<&str> = notices.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Error adding task", "Error updating task", "Error deleting task"]);
        assert!(notices.iter().all(|n| n.level == NoticeLevel::Error));
        assert_eq!(notices[1].description, "Failed to update your task. Please try again.");
    }

    #[tokio::test]
    async fn test_update_missing_task_surfaces_generic_error() {
        let sync = sync_with(vec![]);
        let err = sync.update(42, &TaskPatch::completed(true)).await.unwrap_err();
        assert_eq!(err, ApiError::Request { status: 404 });
        assert_eq!(sync.notices().notices().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_targets_only_given_id() {
        let sync = sync_with(vec![task(1, "A", false), task(2, "B", true)]);
        sync.delete(2).await.expect("delete should succeed");

        assert_eq!(*sync.api().calls.borrow(), vec![Call::Delete(2)]);
        assert_eq!(*sync.api().tasks.borrow(), vec![task(1, "A", false)]);
    }

    #[tokio::test]
    async fn test_watch_fetches_on_mount_and_after_successful_write() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let sync = sync_with(vec![]);
                let (pending, seen) = watch_in_background(&sync);
                drain(&pending).await;
                assert_eq!(*sync.api().calls.borrow(), vec![Call::List]);
                assert_eq!(*seen.borrow(), vec![QueryState::Ready(vec![])]);

                let created = sync.create("Buy milk").await.expect("create should succeed");
                drain(&pending).await;

                assert_eq!(
                    *sync.api().calls.borrow(),
                    vec![Call::List, Call::Create("Buy milk".to_string()), Call::List]
                );
                assert_eq!(sync.cache().state(TASKS_KEY), QueryState::Ready(vec![created.clone()]));
                assert_eq!(seen.borrow().last(), Some(&QueryState::Ready(vec![created])));
            })
            .await;
    }

    #[tokio::test]
    async fn test_watch_skips_refetch_after_failed_write() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let sync = sync_with(vec![task(1, "A", false)]);
                let (pending, _) = watch_in_background(&sync);
                drain(&pending).await;

                *sync.api().fail_with.borrow_mut() = Some(ApiError::Request { status: 500 });
                assert!(sync.delete(1).await.is_err());
                assert!(pending.borrow().is_empty());
                assert_eq!(*sync.api().calls.borrow(), vec![Call::List, Call::Delete(1)]);
            })
            .await;
    }

    #[test]
    fn test_watch_with_fresh_cache_does_not_fetch() {
        let sync = sync_with(vec![]);
        sync.cache().resolve(TASKS_KEY, Ok(vec![]));
        let fetches = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fetches);
        let id = sync.watch(move || counter.set(counter.get() + 1), |_| {});

        assert_eq!(fetches.get(), 0);
        sync.unwatch(id);
        assert!(!sync.cache().invalidate(TASKS_KEY));
    }
}
