use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::Notify;

#[cfg(test)]
mod tests;

/// Flags shared between a countdown's owner and its background thread.
///
/// The atomics are the source of truth. The mutex/condvar pair only exists so the
/// background thread can block instead of spinning. Every transition that has to be
/// ordered against another one (reset vs. expiry vs. stop) is written while holding
/// the mutex, and every waiter re-checks the flags under the same mutex before it
/// blocks, so a notify can never slip between the check and the wait.
pub(crate) struct WakeSignal {
  expired: AtomicBool,
  reset_requested: AtomicBool,
  stop_requested: AtomicBool,
  lock: Mutex<()>,
  condvar: Condvar,
  expired_notify: Notify,
}

impl WakeSignal {
  pub(crate) fn new() -> Self {
    Self {
      expired: AtomicBool::new(false),
      reset_requested: AtomicBool::new(false),
      stop_requested: AtomicBool::new(false),
      lock: Mutex::new(()),
      condvar: Condvar::new(),
      expired_notify: Notify::new(),
    }
  }

  fn lock(&self) -> MutexGuard<'_, ()> {
    // The mutex guards no data, a panic while holding it leaves nothing inconsistent.
    self.lock.lock().unwrap_or_else(PoisonError::into_inner)
  }

  pub(crate) fn is_expired(&self) -> bool {
    self.expired.load(Ordering::Acquire)
  }

  pub(crate) fn is_reset_requested(&self) -> bool {
    self.reset_requested.load(Ordering::Acquire)
  }

  pub(crate) fn is_stop_requested(&self) -> bool {
    self.stop_requested.load(Ordering::Acquire)
  }

  /// True while a reset or stop is pending.
  pub(crate) fn is_interrupted(&self) -> bool {
    self.is_reset_requested() || self.is_stop_requested()
  }

  pub(crate) fn request_reset(&self) {
    let _guard = self.lock();
    self.reset_requested.store(true, Ordering::Release);
    self.expired.store(false, Ordering::Release);
    self.condvar.notify_all();
  }

  pub(crate) fn request_stop(&self) {
    let _guard = self.lock();
    self.stop_requested.store(true, Ordering::Release);
    self.condvar.notify_all();
  }

  /// Clears a pending reset. Returns whether there was one.
  pub(crate) fn consume_reset(&self) -> bool {
    let _guard = self.lock();
    self.reset_requested.swap(false, Ordering::AcqRel)
  }

  /// Sets `expired` unless a reset or stop arrived first. Returns whether it was set.
  ///
  /// `record` runs under the lock right before the store, so anything it publishes is
  /// visible to whoever observes `expired == true`.
  pub(crate) fn mark_expired(&self, record: impl FnOnce()) -> bool {
    let marked = {
      let _guard = self.lock();
      if self.is_interrupted() {
        false
      } else {
        record();
        self.expired.store(true, Ordering::Release);
        true
      }
    };
    if marked {
      self.expired_notify.notify_waiters();
    }
    marked
  }

  /// Blocks until a reset or stop is pending.
  ///
  /// Each individual wait is bounded by `timeout`; on timeout the flags are simply
  /// checked again.
  pub(crate) fn park(&self, timeout: Duration) {
    let mut guard = self.lock();
    while !self.is_interrupted() {
      let (next, result) = self
        .condvar
        .wait_timeout(guard, timeout)
        .unwrap_or_else(PoisonError::into_inner);
      if result.timed_out() {
        tracing::trace!("park timed out, re-checking flags");
      }
      guard = next;
    }
  }

  /// Sleeps for `duration` unless interrupted first. Returns `true` when interrupted.
  ///
  /// Never returns `false` before `duration` has elapsed on the monotonic clock.
  pub(crate) fn sleep(&self, duration: Duration) -> bool {
    let start = Instant::now();
    let mut guard = self.lock();
    loop {
      if self.is_interrupted() {
        return true;
      }
      let elapsed = start.elapsed();
      if elapsed >= duration {
        return false;
      }
      let (next, _) = self
        .condvar
        .wait_timeout(guard, duration - elapsed)
        .unwrap_or_else(PoisonError::into_inner);
      guard = next;
    }
  }

  /// Resolves once `expired` is observed true.
  pub(crate) async fn wait_expired(&self) {
    loop {
      let notified = self.expired_notify.notified();
      tokio::pin!(notified);
      // Registered before the check, so a notify issued after it is not lost.
      notified.as_mut().enable();
      if self.is_expired() {
        return;
      }
      notified.await;
    }
  }
}

impl Debug for WakeSignal {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("WakeSignal")
      .field("expired", &self.is_expired())
      .field("reset_requested", &self.is_reset_requested())
      .field("stop_requested", &self.is_stop_requested())
      .finish()
  }
}

static_assertions::assert_impl_all!(WakeSignal: Send, Sync);
