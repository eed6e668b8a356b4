//! Synchronous change-notification fan-out.

use std::fmt;

/// A registration-ordered list of no-payload change callbacks.
///
/// Delivery is synchronous on the calling thread: every subscriber runs
/// to completion, in the order it subscribed, before the mutating
/// operation returns. Subscribers are expected to re-read state from
/// the component that notified them; they must not call back into it
/// during delivery.
#[derive(Default)]
pub struct Subscribers {
    callbacks: Vec<Box<dyn FnMut()>>,
}

impl Subscribers {
    /// Creates an empty subscriber list.
    pub const fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Registers a callback, appended after all existing subscribers.
    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Invokes every subscriber once, in registration order.
    pub fn notify(&mut self) {
        for callback in &mut self.callbacks {
            callback();
        }
    }

    /// Returns the number of registered subscribers.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Returns `true` when nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}
