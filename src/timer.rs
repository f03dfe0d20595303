use std::{
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread,
    time::{Duration, Instant},
};

enum DebounceMsg<T> {
    Trigger(T),
    Cancel,
}

/// Coalesces rapid triggers into a single evaluation after a quiet window.
/// Every trigger restarts the window and replaces the pending payload, so
/// only the value of the final trigger is ever evaluated. Dropping the
/// debouncer discards whatever is still pending.
pub struct Debouncer<T: Send + 'static> {
    tx: Sender<DebounceMsg<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(window: Duration, mut f: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<DebounceMsg<T>>();

        thread::spawn(move || loop {
            let msg = match rx.recv() {
                Ok(msg) => msg,
                Err(_) => return,
            };

            let mut pending = match msg {
                DebounceMsg::Trigger(value) => value,
                DebounceMsg::Cancel => continue,
            };

            // quiet-window loop: each new trigger restarts the wait
            loop {
                match rx.recv_timeout(window) {
                    Ok(DebounceMsg::Trigger(value)) => pending = value,
                    Ok(DebounceMsg::Cancel) => break,
                    Err(RecvTimeoutError::Timeout) => {
                        f(pending);
                        break;
                    }
                    Err(RecvTimeoutError::Disconnected) => return,
                }
            }
        });

        Debouncer { tx }
    }

    pub fn call(&self, value: T) {
        let _ = self.tx.send(DebounceMsg::Trigger(value));
    }

    /// Discards the pending payload, if any.
    pub fn cancel(&self) {
        let _ = self.tx.send(DebounceMsg::Cancel);
    }
}

/// A one-shot task scheduled after a delay, with a cancellation handle.
///
/// `cancel()` invalidates the task. Dropping the handle instead *detaches*
/// it: the task still fires at its deadline, which reproduces the
/// original fire-and-forget behavior when that is what the caller wants.
pub struct Deferred {
    cancel_tx: Sender<()>,
}

impl Deferred {
    pub fn spawn<F>(delay: Duration, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let deadline = Instant::now() + delay;

        thread::spawn(move || {
            match cancel_rx.recv_timeout(delay) {
                Ok(()) => return,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    // handle dropped; run out the rest of the delay
                    let now = Instant::now();
                    if now < deadline {
                        thread::sleep(deadline - now);
                    }
                }
            }
            f();
        });

        Deferred { cancel_tx }
    }

    pub fn cancel(self) {
        let _ = self.cancel_tx.send(());
    }
}
