use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::wake_signal::WakeSignal;

const LONG: Duration = Duration::from_secs(30);

#[test]
fn test_new_signal_is_idle() {
  let signal = WakeSignal::new();
  assert!(!signal.is_expired());
  assert!(!signal.is_interrupted());
}

#[test]
fn test_reset_clears_expired() {
  let signal = WakeSignal::new();
  assert!(signal.mark_expired(|| {}));
  assert!(signal.is_expired());

  signal.request_reset();
  assert!(!signal.is_expired());
  assert!(signal.is_reset_requested());
}

#[test]
fn test_mark_expired_refused_while_reset_pending() {
  let signal = WakeSignal::new();
  signal.request_reset();
  assert!(!signal.mark_expired(|| {}));
  assert!(!signal.is_expired());

  assert!(signal.consume_reset());
  assert!(!signal.consume_reset());
  assert!(signal.mark_expired(|| {}));
}

#[test]
fn test_mark_expired_records_only_when_set() {
  let signal = WakeSignal::new();
  let mut recorded = 0;
  signal.request_reset();
  assert!(!signal.mark_expired(|| recorded += 1));
  assert_eq!(0, recorded);

  signal.consume_reset();
  assert!(signal.mark_expired(|| recorded += 1));
  assert_eq!(1, recorded);
}

#[test]
fn test_mark_expired_refused_after_stop() {
  let signal = WakeSignal::new();
  signal.request_stop();
  assert!(!signal.mark_expired(|| {}));
  assert!(signal.is_stop_requested());
}

#[test]
fn test_park_returns_when_flag_already_set() {
  let signal = WakeSignal::new();
  signal.request_reset();
  let start = Instant::now();
  signal.park(LONG);
  assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_park_wakes_on_reset_from_other_thread() {
  let signal = Arc::new(WakeSignal::new());
  let waiter = {
    let signal = signal.clone();
    thread::spawn(move || {
      let start = Instant::now();
      signal.park(LONG);
      start.elapsed()
    })
  };

  thread::sleep(Duration::from_millis(20));
  signal.request_reset();
  let parked_for = waiter.join().unwrap();
  assert!(parked_for < Duration::from_secs(2));
}

#[test]
fn test_sleep_runs_full_duration_when_not_interrupted() {
  let signal = WakeSignal::new();
  let start = Instant::now();
  assert!(!signal.sleep(Duration::from_millis(30)));
  assert!(start.elapsed() >= Duration::from_millis(30));
}

#[test]
fn test_sleep_interrupted_by_stop() {
  let signal = Arc::new(WakeSignal::new());
  let sleeper = {
    let signal = signal.clone();
    thread::spawn(move || {
      let start = Instant::now();
      let interrupted = signal.sleep(LONG);
      (interrupted, start.elapsed())
    })
  };

  thread::sleep(Duration::from_millis(20));
  signal.request_stop();
  let (interrupted, slept) = sleeper.join().unwrap();
  assert!(interrupted);
  assert!(slept < Duration::from_secs(2));
}

#[tokio::test]
async fn test_wait_expired_returns_immediately_when_expired() {
  let signal = WakeSignal::new();
  signal.mark_expired(|| {});
  tokio::time::timeout(Duration::from_secs(1), signal.wait_expired())
    .await
    .expect("already expired");
}

#[tokio::test]
async fn test_wait_expired_wakes_on_mark() {
  let signal = Arc::new(WakeSignal::new());
  let marker = {
    let signal = signal.clone();
    thread::spawn(move || {
      thread::sleep(Duration::from_millis(20));
      signal.mark_expired(|| {})
    })
  };

  tokio::time::timeout(Duration::from_secs(5), signal.wait_expired())
    .await
    .expect("expired within timeout");
  assert!(marker.join().unwrap());
}
