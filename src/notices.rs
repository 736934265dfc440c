//! Notice Board
//!
//! Publish/subscribe list of transient, timed user notices (toasts).

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub type NoticeId = u64;

/// How long a notice stays up unless dismissed earlier
pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

/// Maximum notices shown at once; the oldest is dropped first
pub const DEFAULT_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeLevel::Warning => "notice notice-warning",
            NoticeLevel::Error => "notice notice-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
    pub ttl: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeEvent {
    Published(Notice),
    Dismissed(NoticeId),
}

pub type NoticeListener = Rc<dyn Fn(&NoticeEvent)>;

struct Board {
    next_id: NoticeId,
    limit: usize,
    notices: Vec<Notice>,
    next_listener: u64,
    listeners: Vec<(u64, NoticeListener)>,
}

#[derive(Clone)]
pub struct NoticeBoard {
    inner: Rc<RefCell<Board>>,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Board {
                next_id: 1,
                limit: limit.max(1),
                notices: Vec::new(),
                next_listener: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn publish(
        &self,
        level: NoticeLevel,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> NoticeId {
        let mut events = Vec::new();
        let id = {
            let mut board = self.inner.borrow_mut();
            let id = board.next_id;
            board.next_id += 1;
            let notice = Notice {
                id,
                level,
                title: title.into(),
                description: description.into(),
                ttl: DEFAULT_TTL,
            };
            board.notices.push(notice.clone());
            while board.notices.len() > board.limit {
                let evicted = board.notices.remove(0);
                events.push(NoticeEvent::Dismissed(evicted.id));
            }
            events.insert(0, NoticeEvent::Published(notice));
            id
        };
        for event in &events {
            self.notify(event);
        }
        id
    }

    pub fn warning(&self, title: impl Into<String>, description: impl Into<String>) -> NoticeId {
        self.publish(NoticeLevel::Warning, title, description)
    }

    pub fn error(&self, title: impl Into<String>, description: impl Into<String>) -> NoticeId {
        self.publish(NoticeLevel::Error, title, description)
    }

    /// Remove a notice; false if it already expired or was evicted
    pub fn dismiss(&self, id: NoticeId) -> bool {
        let removed = {
            let mut board = self.inner.borrow_mut();
            let before = board.notices.len();
            board.notices.retain(|n| n.id != id);
            board.notices.len() != before
        };
        if removed {
            self.notify(&NoticeEvent::Dismissed(id));
        }
        removed
    }

    /// Current notices, oldest first
    pub fn notices(&self) -> Vec<Notice> {
        self.inner.borrow().notices.clone()
    }

    pub fn subscribe(&self, listener: NoticeListener) -> u64 {
        let mut board = self.inner.borrow_mut();
        let id = board.next_listener;
        board.next_listener += 1;
        board.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&self, id: u64) {
        self.inner.borrow_mut().listeners.retain(|(l, _)| *l != id);
    }

    fn notify(&self, event: &NoticeEvent) {
        let listeners: Vec<NoticeListener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_dismiss() {
        let board = NoticeBoard::new();
        let id = board.error("Error adding task", "Failed to add your task. Please try again.");

        let notices = board.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].ttl, DEFAULT_TTL);

        assert!(board.dismiss(id));
        assert!(!board.dismiss(id));
        assert!(board.notices().is_empty());
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let board = NoticeBoard::with_limit(2);
        let first = board.warning("one", "");
        board.warning("two", "");
        board.warning("three", "");

        let titles: Vec<String> = board.notices().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["two", "three"]);
        assert!(!board.dismiss(first));
    }

    #[test]
    fn test_subscribers_see_publish_eviction_and_dismiss() {
        let board = NoticeBoard::with_limit(1);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let listener = board.subscribe(Rc::new(move |event: &NoticeEvent| {
            sink.borrow_mut().push(event.clone())
        }));

        let a = board.warning("a", "");
        let b = board.warning("b", "");
        board.dismiss(b);
        board.unsubscribe(listener);
        board.warning("c", "");

        let events = events.borrow();
        assert_eq!(events.len(), 4);
        assert!(matches!(&events[0], NoticeEvent::Published(n) if n.id == a));
        assert!(matches!(&events[1], NoticeEvent::Published(n) if n.id == b));
        assert_eq!(events[2], NoticeEvent::Dismissed(a));
        assert_eq!(events[3], NoticeEvent::Dismissed(b));
    }
}
