#![forbid(unsafe_code)]

//! Process-wide keyboard visibility notifications.
//!
//! The platform posts [`KeyboardSignal`]s to the [`KeyboardCenter`]; every live
//! [`KeyboardSubscription`] receives a copy in its inbox, which its owner drains
//! on the event loop.
//!
//! # Architecture
//!
//! The center lives in a thread-local slot (the UI thread's) and holds `Weak`
//! references to subscriber inboxes. Dropping a subscription is the only way to
//! unsubscribe; dead inboxes are pruned lazily on the next post or count.
//!
//! # Invariants
//!
//! 1. Signals are delivered to inboxes in post order.
//! 2. A dropped subscription never receives another signal.
//! 3. [`KeyboardCenter::observer_count`] counts live subscriptions only.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use qsheet_core::KeyboardSignal;

type Inbox = RefCell<VecDeque<KeyboardSignal>>;

thread_local! {
    static GLOBAL_CENTER: KeyboardCenter = KeyboardCenter::new();
}

/// Fan-out point for keyboard signals.
#[derive(Clone, Debug, Default)]
pub struct KeyboardCenter {
    observers: Rc<RefCell<Vec<Weak<Inbox>>>>,
}

impl KeyboardCenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The UI thread's shared center.
    #[must_use]
    pub fn global() -> Self {
        GLOBAL_CENTER.with(Clone::clone)
    }

    /// Register a new inbox.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self) -> KeyboardSubscription {
        let inbox = Rc::new(RefCell::new(VecDeque::new()));
        self.observers.borrow_mut().push(Rc::downgrade(&inbox));
        tracing::debug!(
            observers = self.observer_count(),
            "keyboard observer added"
        );
        KeyboardSubscription { inbox }
    }

    /// Deliver `signal` to every live inbox. Returns the number of receivers.
    pub fn post(&self, signal: KeyboardSignal) -> usize {
        let mut observers = self.observers.borrow_mut();
        observers.retain(|weak| weak.strong_count() > 0);
        for inbox in observers.iter().filter_map(Weak::upgrade) {
            inbox.borrow_mut().push_back(signal);
        }
        tracing::trace!(?signal, receivers = observers.len(), "keyboard signal posted");
        observers.len()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        let mut observers = self.observers.borrow_mut();
        observers.retain(|weak| weak.strong_count() > 0);
        observers.len()
    }
}

/// Convenience: post to the global center.
pub fn post_keyboard(signal: KeyboardSignal) -> usize {
    KeyboardCenter::global().post(signal)
}

/// Inbox of keyboard signals. Dropping it unsubscribes.
#[derive(Debug)]
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct KeyboardSubscription {
    inbox: Rc<Inbox>,
}

impl KeyboardSubscription {
    /// Take every pending signal, oldest first.
    pub fn drain(&self) -> Vec<KeyboardSignal> {
        self.inbox.borrow_mut().drain(..).collect()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.inbox.borrow().len()
    }
}
