use std::sync::mpsc;
use std::thread::sleep;
use std::time::Duration;

use crate::timer::{Debouncer, Deferred};

#[test]
fn test_debounce_coalesces_rapid_calls() {
    let (tx, rx) = mpsc::channel::<&str>();
    let debouncer = Debouncer::new(Duration::from_millis(80), move |value| {
        let _ = tx.send(value);
    });

    // triggers faster than the quiet window: only the final value fires
    debouncer.call("c");
    sleep(Duration::from_millis(15));
    debouncer.call("ca");
    sleep(Duration::from_millis(15));
    debouncer.call("casio");

    assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), "casio");
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
}

#[test]
fn test_debounce_cancel_discards_pending() {
    let (tx, rx) = mpsc::channel::<&str>();
    let debouncer = Debouncer::new(Duration::from_millis(60), move |value| {
        let _ = tx.send(value);
    });

    debouncer.call("doomed");
    debouncer.cancel();

    assert!(rx.recv_timeout(Duration::from_millis(250)).is_err());
}

#[test]
fn test_debounce_fires_again_after_quiet_period() {
    let (tx, rx) = mpsc::channel::<&str>();
    let debouncer = Debouncer::new(Duration::from_millis(30), move |value| {
        let _ = tx.send(value);
    });

    debouncer.call("first");
    assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), "first");

    debouncer.call("second");
    assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), "second");
}

#[test]
fn test_deferred_fires_after_delay() {
    let (tx, rx) = mpsc::channel::<()>();
    let deferred = Deferred::spawn(Duration::from_millis(20), move || {
        let _ = tx.send(());
    });

    assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());
    drop(deferred);
}

#[test]
fn test_deferred_cancel_prevents_run() {
    let (tx, rx) = mpsc::channel::<()>();
    let deferred = Deferred::spawn(Duration::from_millis(50), move || {
        let _ = tx.send(());
    });

    deferred.cancel();

    assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
}

#[test]
fn test_deferred_detached_handle_still_fires() {
    let (tx, rx) = mpsc::channel::<()>();

    // dropping the handle detaches the task instead of cancelling it
    drop(Deferred::spawn(Duration::from_millis(20), move || {
        let _ = tx.send(());
    }));

    assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());
}
