use std::collections::VecDeque;
use std::sync::Mutex;

use tracing::{info, warn};

/**
 * Visual variant of a notification. Absent means the default style.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Destructive,
}

/**
 * A transient message for the user.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Option<Variant>,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notification { title: title.into(), description: description.into(), variant: None }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notification { title: title.into(), description: description.into(), variant: Some(Variant::Destructive) }
    }
}

/**
 * Receives notifications. Fire and forget.
 */
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/**
 * Keeps the most recent notifications until the user interface collects them.
 */
pub struct NotificationCenter {
    capacity: usize,
    pending: Mutex<VecDeque<Notification>>,
}

impl NotificationCenter {
    /**
     * Creates a new instance of `NotificationCenter`.
     *
     * # Arguments
     * `capacity`: Maximum number of pending notifications. The oldest is dropped when full.
     */
    pub fn new(capacity: usize) -> Self {
        NotificationCenter { capacity: capacity.max(1), pending: Mutex::new(VecDeque::new()) }
    }

    /**
     * Removes and returns all pending notifications, oldest first.
     */
    pub fn take_all(&self) -> Vec<Notification> {
        match self.pending.lock() {
            Ok(mut pending) => pending.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        }
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, notification: Notification) {
        info!(title = %notification.title, destructive = notification.variant.is_some(), "{}", notification.description);
        let mut pending = match self.pending.lock() {
            Ok(pending) => pending,
            Err(poisoned) => poisoned.into_inner(),
        };
        if pending.len() == self.capacity {
            warn!("Notification queue full, dropping oldest notification");
            pending.pop_front();
        }
        pending.push_back(notification);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_take_all_drains_in_order() {
        let center = NotificationCenter::new(5);
        center.notify(Notification::new("first", "one"));
        center.notify(Notification::destructive("second", "two"));
        let taken = center.take_all();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].title, "first");
        assert_eq!(taken[1].variant, Some(Variant::Destructive));
        assert!(center.take_all().is_empty());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let center = NotificationCenter::new(2);
        center.notify(Notification::new("a", ""));
        center.notify(Notification::new("b", ""));
        center.notify(Notification::new("c", ""));
        let titles: Vec<String> = center.take_all().into_iter().map(|notification| notification.title).collect();
        assert_eq!(titles, vec!["b", "c"]);
    }
}
