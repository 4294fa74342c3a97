use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};


/// Measures elapsed time against a monotonic clock.
///
/// The reference point is captured on construction and on every [`Stopwatch::restart`].
/// All `elapsed_*` queries truncate to the requested unit, so 1999 µs reads as 1 ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stopwatch {
  start: Instant,
}

impl Stopwatch {
  pub fn new() -> Self {
    Self { start: Instant::now() }
  }

  /// Starts measuring from `start` instead of now.
  pub fn started_at(start: Instant) -> Self {
    Self { start }
  }

  /// Moves the reference point to now and returns it.
  pub fn restart(&mut self) -> Instant {
    self.start = Instant::now();
    self.start
  }

  pub fn start(&self) -> Instant {
    self.start
  }

  pub fn elapsed(&self) -> Duration {
    self.start.elapsed()
  }

  pub fn elapsed_ns(&self) -> u64 {
    saturate(self.elapsed().as_nanos())
  }

  pub fn elapsed_us(&self) -> u64 {
    saturate(self.elapsed().as_micros())
  }

  pub fn elapsed_ms(&self) -> u64 {
    saturate(self.elapsed().as_millis())
  }

  pub fn elapsed_sec(&self) -> u64 {
    self.elapsed().as_secs()
  }
}

fn saturate(value: u128) -> u64 {
  u64::try_from(value).unwrap_or(u64::MAX)
}

impl Default for Stopwatch {
  fn default() -> Self {
    Self::new()
  }
}

impl Display for Stopwatch {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "Stopwatch({} us)", self.elapsed_us())
  }
}

static_assertions::assert_impl_all!(Stopwatch: Send, Sync, Copy);
