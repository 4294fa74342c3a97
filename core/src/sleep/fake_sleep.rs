use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::{Interrupt, SleepStrategy};

/// Records every requested sleep instead of performing it.
///
/// Clones share the same log, so a test keeps one clone and hands the other to the timer.
/// An optional `delay` makes each call wait (interruptibly) for that long, which keeps
/// reset races observable without paying the full countdown.
#[derive(Debug, Clone, Default)]
pub struct FakeSleep {
  requests: Arc<Mutex<Vec<Duration>>>,
  calls: Arc<AtomicUsize>,
  delay: Option<Duration>,
}

impl FakeSleep {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_delay(delay: Duration) -> Self {
    Self {
      delay: Some(delay),
      ..Self::default()
    }
  }

  /// Number of sleeps requested so far.
  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::Acquire)
  }

  pub fn requests(&self) -> Vec<Duration> {
    self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
  }

  pub fn last_request(&self) -> Option<Duration> {
    self.requests.lock().unwrap_or_else(PoisonError::into_inner).last().copied()
  }

  pub fn clear(&self) {
    self.requests.lock().unwrap_or_else(PoisonError::into_inner).clear();
    self.calls.store(0, Ordering::Release);
  }
}

impl SleepStrategy for FakeSleep {
  fn sleep(&self, duration: Duration, interrupt: &Interrupt<'_>) {
    if interrupt.is_raised() {
      return;
    }
    self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(duration);
    self.calls.fetch_add(1, Ordering::AcqRel);
    if let Some(delay) = self.delay {
      interrupt.wait(delay);
    }
  }
}
