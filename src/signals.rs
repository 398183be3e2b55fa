// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deferred process-signal dispatch.
//!
//! The embedding application owns the OS-level handlers. Those handlers only
//! [`raise`](PendingSignals::raise) a signal on a shared [`PendingSignals`]
//! queue; the application later calls [`dispatch_signals`] from a safe point
//! of its main loop to run the registered callbacks.
//!
//! ```rust
//! use ministruts::signals::{dispatch_signals, PendingSignals, Signal};
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let reload = Arc::new(AtomicBool::new(false));
//! let flag = reload.clone();
//!
//! let pending = PendingSignals::new();
//! pending.on(Signal::Hangup, move |_| flag.store(true, Ordering::SeqCst));
//! pending.raise(Signal::Hangup);
//!
//! if dispatch_signals(&pending) {
//!     assert!(reload.load(Ordering::SeqCst));
//! }
//! ```

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// The signals an application can queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// SIGHUP
    Hangup,
    /// SIGINT
    Interrupt,
    /// SIGTERM
    Terminate,
    /// SIGCHLD
    Child,
    /// SIGUSR1
    User1,
    /// SIGUSR2
    User2,
}

impl Signal {
    /// Returns the conventional signal name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Hangup => "SIGHUP",
            Signal::Interrupt => "SIGINT",
            Signal::Terminate => "SIGTERM",
            Signal::Child => "SIGCHLD",
            Signal::User1 => "SIGUSR1",
            Signal::User2 => "SIGUSR2",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Handler = Arc<dyn Fn(Signal) + Send + Sync>;

/// A queue of raised signals and the callbacks registered for them.
///
/// Share it between threads with an `Arc`.
#[derive(Default)]
pub struct PendingSignals {
    queue: Mutex<VecDeque<Signal>>,
    handlers: Mutex<HashMap<Signal, Vec<Handler>>>,
}

impl PendingSignals {
    /// Creates an empty queue with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `signal` for the next dispatch.
    pub fn raise(&self, signal: Signal) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(signal);
    }

    /// Registers a callback for `signal`. Callbacks run in registration order.
    pub fn on<F>(&self, signal: Signal, handler: F)
    where
        F: Fn(Signal) + Send + Sync + 'static,
    {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(signal)
            .or_default()
            .push(Arc::new(handler));
    }

    /// Returns the number of queued signals.
    pub fn len(&self) -> usize {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if no signal is queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn handlers_for(&self, signal: Signal) -> Vec<Handler> {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&signal)
            .cloned()
            .unwrap_or_default()
    }
}

impl fmt::Debug for PendingSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingSignals")
            .field("pending", &self.len())
            .finish_non_exhaustive()
    }
}

/// Runs the callbacks for every queued signal.
///
/// Returns `true` if signal dispatch is supported on this platform. On
/// platforms without POSIX signals nothing runs, the queue is left untouched
/// and `false` is returned.
///
/// Signals raised by a callback stay queued for the next call.
pub fn dispatch_signals(pending: &PendingSignals) -> bool {
    if !cfg!(unix) {
        return false;
    }

    let raised: Vec<Signal> = pending
        .queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .drain(..)
        .collect();

    for signal in raised {
        let handlers = pending.handlers_for(signal);
        if handlers.is_empty() {
            tracing::debug!("No handler for {}, dropping it", signal);
            continue;
        }
        tracing::debug!("Dispatching {} to {} handler(s)", signal, handlers.len());
        for handler in handlers {
            handler(signal);
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter(pending: &PendingSignals, signal: Signal) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        pending.on(signal, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    #[test]
    fn test_signal_names() {
        assert_eq!(Signal::Hangup.to_string(), "SIGHUP");
        assert_eq!(Signal::User2.as_str(), "SIGUSR2");
    }

    #[test]
    fn test_raise_queues() {
        let pending = PendingSignals::new();
        assert!(pending.is_empty());
        pending.raise(Signal::Terminate);
        pending.raise(Signal::Terminate);
        assert_eq!(pending.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_dispatch_runs_handlers() {
        let pending = PendingSignals::new();
        let hups = counter(&pending, Signal::Hangup);
        let terms = counter(&pending, Signal::Terminate);

        pending.raise(Signal::Hangup);
        pending.raise(Signal::Hangup);
        pending.raise(Signal::Terminate);

        assert!(dispatch_signals(&pending));
        assert_eq!(hups.load(Ordering::SeqCst), 2);
        assert_eq!(terms.load(Ordering::SeqCst), 1);
        assert!(pending.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_dispatch_with_nothing_queued() {
        let pending = PendingSignals::new();
        let hups = counter(&pending, Signal::Hangup);
        assert!(dispatch_signals(&pending));
        assert_eq!(hups.load(Ordering::SeqCst), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_unhandled_signal_is_dropped() {
        let pending = PendingSignals::new();
        pending.raise(Signal::User1);
        assert!(dispatch_signals(&pending));
        assert!(pending.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_handlers_run_in_order() {
        let pending = PendingSignals::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..3 {
            let order = order.clone();
            pending.on(Signal::Child, move |_| order.lock().unwrap().push(i));
        }

        pending.raise(Signal::Child);
        dispatch_signals(&pending);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[cfg(unix)]
    #[test]
    fn test_signal_raised_by_handler_waits() {
        let pending = Arc::new(PendingSignals::new());
        let inner = pending.clone();
        pending.on(Signal::Interrupt, move |_| inner.raise(Signal::Terminate));
        let terms = counter(&pending, Signal::Terminate);

        pending.raise(Signal::Interrupt);
        dispatch_signals(&pending);
        assert_eq!(terms.load(Ordering::SeqCst), 0);
        assert_eq!(pending.len(), 1);

        dispatch_signals(&pending);
        assert_eq!(terms.load(Ordering::SeqCst), 1);
    }

    #[cfg(not(unix))]
    #[test]
    fn test_dispatch_unsupported() {
        let pending = PendingSignals::new();
        pending.raise(Signal::Hangup);
        assert!(!dispatch_signals(&pending));
        assert_eq!(pending.len(), 1);
    }
}
