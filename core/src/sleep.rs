use std::fmt::{Debug, Formatter};
use std::time::Duration;

use crate::wake_signal::WakeSignal;

#[cfg(any(test, feature = "test-util"))]
mod fake_sleep;

#[cfg(any(test, feature = "test-util"))]
pub use fake_sleep::FakeSleep;

/// Read-only view of a countdown's pending reset/stop, handed to a [`SleepStrategy`].
pub struct Interrupt<'a> {
  signal: &'a WakeSignal,
}

impl<'a> Interrupt<'a> {
  pub(crate) fn new(signal: &'a WakeSignal) -> Self {
    Self { signal }
  }

  /// True once a reset or stop has been requested.
  pub fn is_raised(&self) -> bool {
    self.signal.is_interrupted()
  }

  /// Blocks for `duration` or until raised, whichever comes first.
  /// Returns `true` when cut short.
  pub fn wait(&self, duration: Duration) -> bool {
    self.signal.sleep(duration)
  }
}

impl Debug for Interrupt<'_> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Interrupt").field("raised", &self.is_raised()).finish()
  }
}

/// Performs (or simulates) one chunk of a countdown.
///
/// The countdown checks [`Interrupt::is_raised`] after every call, so an implementation
/// that ignores the interrupt only delays reset and stop by the length of one chunk.
pub trait SleepStrategy: Send + 'static {
  fn sleep(&self, duration: Duration, interrupt: &Interrupt<'_>);
}

/// Default strategy: waits on the countdown's condvar so reset and stop cut the
/// chunk short immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicSleep;

impl SleepStrategy for MonotonicSleep {
  fn sleep(&self, duration: Duration, interrupt: &Interrupt<'_>) {
    if interrupt.wait(duration) {
      tracing::trace!("sleep interrupted");
    }
  }
}

/// Adapts a plain delay function. Interruption is only observed between calls.
#[derive(Clone)]
pub struct FnSleep<F>(pub F);

impl<F> SleepStrategy for FnSleep<F>
where
  F: Fn(Duration) + Send + 'static,
{
  fn sleep(&self, duration: Duration, _interrupt: &Interrupt<'_>) {
    (self.0)(duration)
  }
}

impl<F> Debug for FnSleep<F> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str("FnSleep")
  }
}
