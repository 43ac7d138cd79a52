//! Canonical application state and its store.
//!
//! The store is the only owner of [`AppState`]. `dispatch` applies one pure
//! reducer per state slice, then notifies every subscription with a snapshot
//! of the composed state. Dispatch is FIFO: an action dispatched while
//! another is being applied (a reducer never does this, but a registry
//! operation reacting to a notification can) is queued and drained after the
//! current transition completes, so subscribers observe every transition
//! exactly once, in order.

mod loading;
mod preferences;
mod servers;
mod window;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::mpsc;

use crate::action::Action;
use crate::preferences::Preferences;
use crate::server::Server;

/// The composed state record. `loading` holds until the view host reports
/// ready; `window_visible` mirrors native show/hide events and is never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub servers: Vec<Server>,
    pub preferences: Preferences,
    pub loading: bool,
    pub window_visible: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            preferences: Preferences::default(),
            loading: true,
            window_visible: true,
        }
    }
}

fn reduce(state: AppState, action: &Action) -> AppState {
    AppState {
        servers: servers::reduce(state.servers, action),
        preferences: preferences::reduce(state.preferences, action),
        loading: loading::reduce(state.loading, action),
        window_visible: window::reduce(state.window_visible, action),
    }
}

struct Subscriber {
    id: u64,
    tx: mpsc::UnboundedSender<AppState>,
}

struct StoreInner {
    state: Mutex<AppState>,
    queue: Mutex<VecDeque<Action>>,
    draining: AtomicBool,
    subscribers: Mutex<Vec<Subscriber>>,
    next_id: AtomicU64,
}

/// Cheaply cloneable handle to the single authoritative store.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(AppState::default()),
                queue: Mutex::new(VecDeque::new()),
                draining: AtomicBool::new(false),
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.inner.state.lock().unwrap().clone()
    }

    /// Apply an action. Synchronous; returns once the action and anything it
    /// enqueued transitively have been applied and all subscribers notified.
    pub fn dispatch(&self, action: Action) {
        self.inner.queue.lock().unwrap().push_back(action);
        self.drain();
    }

    fn drain(&self) {
        // Single drainer at a time keeps transitions FIFO even when a
        // notification handler or another thread dispatches concurrently.
        if self.inner.draining.swap(true, Ordering::Acquire) {
            return;
        }

        loop {
            let Some(action) = self.inner.queue.lock().unwrap().pop_front() else {
                break;
            };

            let snapshot = {
                let mut state = self.inner.state.lock().unwrap();
                *state = reduce(state.clone(), &action);
                state.clone()
            };
            tracing::trace!(?action, "state transition");
            self.notify(snapshot);
        }

        self.inner.draining.store(false, Ordering::Release);

        // An action enqueued between the last pop and the flag reset would
        // otherwise sit unapplied until the next dispatch.
        if !self.inner.queue.lock().unwrap().is_empty() {
            self.drain();
        }
    }

    fn notify(&self, snapshot: AppState) {
        let mut subscribers = self.inner.subscribers.lock().unwrap();
        subscribers.retain(|subscriber| subscriber.tx.send(snapshot.clone()).is_ok());
    }

    /// Register for state snapshots. Every transition from this point on is
    /// delivered exactly once, in dispatch order. Dropping the subscription
    /// unsubscribes.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .subscribers
            .lock()
            .unwrap()
            .push(Subscriber { id, tx });
        Subscription {
            id,
            rx,
            store: Arc::downgrade(&self.inner),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving end of a store subscription.
pub struct Subscription {
    id: u64,
    rx: mpsc::UnboundedReceiver<AppState>,
    store: Weak<StoreInner>,
}

impl Subscription {
    /// Next state snapshot, in dispatch order. `None` once the store is gone.
    pub async fn recv(&mut self) -> Option<AppState> {
        self.rx.recv().await
    }

    /// Non-blocking variant of [`Subscription::recv`].
    pub fn try_recv(&mut self) -> Option<AppState> {
        self.rx.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner
                .subscribers
                .lock()
                .unwrap()
                .retain(|subscriber| subscriber.id != self.id);
        }
    }
}
