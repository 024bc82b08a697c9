//! Change notification for recalculated instruments.
//!
//! A [`ChangeNotifier`] keeps an ordered list of [`Observer`]s and calls each
//! of them synchronously when [`notify_all`](ChangeNotifier::notify_all) runs.
//! Delivery is best effort: an observer that returns an error or panics is
//! logged and skipped, and the remaining observers are still called.

use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::warn;

/// Error returned by an observer that failed to handle a change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("observer failed: {0}")]
pub struct ObserverError(pub String);

impl ObserverError {
    /// Creates an observer error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A listener called after each successful recalculation.
pub trait Observer: Send + Sync {
    /// Called once per recalculation.
    ///
    /// A panic is caught by the notifier and reported like an error.
    fn on_change(&self) -> Result<(), ObserverError>;
}

/// Observer backed by a closure. Built with [`observer_fn`].
pub struct FnObserver<F> {
    callback: F,
}

impl<F> Observer for FnObserver<F>
where
    F: Fn() -> Result<(), ObserverError> + Send + Sync,
{
    fn on_change(&self) -> Result<(), ObserverError> {
        (self.callback)()
    }
}

/// Wraps a closure as a shareable observer.
pub fn observer_fn<F>(callback: F) -> Arc<dyn Observer>
where
    F: Fn() -> Result<(), ObserverError> + Send + Sync + 'static,
{
    Arc::new(FnObserver { callback })
}

/// Outcome of one notification round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationReport {
    /// Observers that handled the change.
    pub delivered: usize,
    /// Failures, keyed by the observer's position in subscription order.
    pub failures: Vec<(usize, ObserverError)>,
}

impl NotificationReport {
    /// Returns true if every observer handled the change.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of observers that were called.
    pub fn attempted(&self) -> usize {
        self.delivered + self.failures.len()
    }
}

/// Ordered subscriber list for one instrument.
#[derive(Default)]
pub struct ChangeNotifier {
    observers: RwLock<Vec<Arc<dyn Observer>>>,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn same_observer(a: &Arc<dyn Observer>, b: &Arc<dyn Observer>) -> bool {
    Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
}

impl ChangeNotifier {
    /// Creates a notifier with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an observer at the end of the list.
    ///
    /// Subscribing a handle that is already present has no effect.
    pub fn subscribe(&self, observer: Arc<dyn Observer>) {
        let mut observers = self.observers.write();
        if !observers.iter().any(|o| same_observer(o, &observer)) {
            observers.push(observer);
        }
    }

    /// Removes an observer by handle identity.
    ///
    /// Returns true if the observer was subscribed.
    pub fn unsubscribe(&self, observer: &Arc<dyn Observer>) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|o| !same_observer(o, observer));
        observers.len() != before
    }

    /// Removes every observer.
    pub fn clear(&self) {
        self.observers.write().clear();
    }

    /// Number of subscribed observers.
    pub fn len(&self) -> usize {
        self.observers.read().len()
    }

    /// Returns true if nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.observers.read().is_empty()
    }

    /// Calls every current observer in subscription order.
    ///
    /// The list is copied before delivery, so observers may subscribe or
    /// unsubscribe from inside their callback; such changes apply to the next
    /// round.
    pub fn notify_all(&self) -> NotificationReport {
        let snapshot: Vec<Arc<dyn Observer>> = self.observers.read().clone();
        let mut report = NotificationReport::default();

        for (position, observer) in snapshot.iter().enumerate() {
            let outcome = catch_unwind(AssertUnwindSafe(|| observer.on_change()))
                .unwrap_or_else(|payload| {
                    Err(ObserverError::new(format!(
                        "panicked: {}",
                        panic_message(payload.as_ref())
                    )))
                });
            match outcome {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!(position, error = %e, "observer failed to handle change");
                    report.failures.push((position, e));
                }
            }
        }

        report
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("observers", &self.len())
            .finish()
    }
}
