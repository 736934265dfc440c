//! Query Cache
//!
//! Keyed cache of server data. Writes never patch cached data: they
//! `invalidate` the key, and subscribers react by refetching.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{ApiError, ApiResult};

pub type QueryKey = &'static str;

/// The shared task list
pub const TASKS_KEY: QueryKey = "tasks";

/// What the last fetch for a key produced
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    /// No response has landed yet
    Loading,
    Failed(ApiError),
    Ready(T),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            QueryState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEvent {
    /// Cached data is stale; a subscriber should refetch
    Invalidated,
    /// A response landed and the state changed
    Updated,
}

pub type QueryListener = Rc<dyn Fn(QueryEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Entry<T> {
    state: QueryState<T>,
    stale: bool,
    fetching: bool,
    listeners: Vec<(SubscriptionId, QueryListener)>,
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Self {
            state: QueryState::Loading,
            stale: true,
            fetching: false,
            listeners: Vec::new(),
        }
    }
}

struct Inner<T> {
    entries: HashMap<QueryKey, Entry<T>>,
    next_subscription: u64,
}

/// Single-threaded shared cache handle; clones share state
pub struct QueryClient<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for QueryClient<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T: Clone> Default for QueryClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> QueryClient<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                entries: HashMap::new(),
                next_subscription: 0,
            })),
        }
    }

    pub fn state(&self, key: QueryKey) -> QueryState<T> {
        self.inner
            .borrow()
            .entries
            .get(key)
            .map(|entry| entry.state.clone())
            .unwrap_or(QueryState::Loading)
    }

    /// True when nothing fresh is cached and no fetch is in flight
    pub fn needs_fetch(&self, key: QueryKey) -> bool {
        self.inner
            .borrow()
            .entries
            .get(key)
            .map_or(true, |e| e.stale && !e.fetching)
    }

    pub fn begin_fetch(&self, key: QueryKey) {
        self.inner.borrow_mut().entries.entry(key).or_default().fetching = true;
    }

    /// Record a response. Responses are applied in arrival order, so the
    /// last one to land wins.
    pub fn resolve(&self, key: QueryKey, result: ApiResult<T>) {
        {
            let mut inner = self.inner.borrow_mut();
            let entry = inner.entries.entry(key).or_default();
            entry.state = match result {
                Ok(data) => QueryState::Ready(data),
                Err(err) => QueryState::Failed(err),
            };
            entry.stale = false;
            entry.fetching = false;
        }
        self.notify(key, QueryEvent::Updated);
    }

    /// Mark `key` stale and tell subscribers. Returns whether anyone was
    /// listening; without listeners the next reader refetches.
    pub fn invalidate(&self, key: QueryKey) -> bool {
        self.inner.borrow_mut().entries.entry(key).or_default().stale = true;
        self.notify(key, QueryEvent::Invalidated) > 0
    }

    pub fn subscribe(&self, key: QueryKey, listener: QueryListener) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.entries.entry(key).or_default().listeners.push((id, listener));
        id
    }

    /// Keep a consumer in sync with `key`: every invalidation calls
    /// `refetch`, every landed response is handed to `on_update`. The
    /// listener only holds a weak handle to the cache.
    pub fn watch<R, U>(&self, key: QueryKey, refetch: R, on_update: U) -> SubscriptionId
    where
        T: 'static,
        R: Fn() + 'static,
        U: Fn(QueryState<T>) + 'static,
    {
        let cache = Rc::downgrade(&self.inner);
        self.subscribe(
            key,
            Rc::new(move |event: QueryEvent| match event {
                QueryEvent::Invalidated => refetch(),
                QueryEvent::Updated => {
                    if let Some(inner) = cache.upgrade() {
                        on_update(QueryClient { inner }.state(key));
                    }
                }
            }),
        )
    }

    pub fn unsubscribe(&self, key: QueryKey, id: SubscriptionId) {
        if let Some(entry) = self.inner.borrow_mut().entries.get_mut(key) {
            entry.listeners.retain(|(sub, _)| *sub != id);
        }
    }

    fn notify(&self, key: QueryKey, event: QueryEvent) -> usize {
        // Listeners may call back into the cache, so release the borrow first
        let listeners: Vec<QueryListener> = self
            .inner
            .borrow()
            .entries
            .get(key)
            .map(|e| e.listeners.iter().map(|(_, l)| Rc::clone(l)).collect())
            .unwrap_or_default();
        for listener in &listeners {
            listener(event);
        }
        listeners.len()
    }
}
