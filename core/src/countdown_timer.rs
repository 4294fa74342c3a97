use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};
use std::time::Duration;

use alarm_clock_utils_rs::Stopwatch;

use crate::wake_signal::WakeSignal;
use crate::{ChunkPlan, Interrupt, MonotonicSleep, OwnerCheck, SleepStrategy, TimerConfig, TimerError};


const NOT_MEASURED: u64 = u64::MAX;

#[derive(Debug)]
struct Shared {
  signal: WakeSignal,
  last_slept_us: AtomicU64,
  expirations: AtomicU64,
}

/// A countdown that expires once after a fixed duration unless reset or dropped first.
///
/// The waiting happens on a dedicated background thread; [`CountdownTimer::expired`] is a
/// single atomic load and never blocks. [`CountdownTimer::reset`] restarts the countdown
/// from zero whether or not it has already expired. Dropping the timer stops and joins the
/// background thread, cutting any in-progress sleep short.
///
/// ```no_run
/// use std::time::Duration;
/// use alarm_clock_core_rs::CountdownTimer;
///
/// let timer = CountdownTimer::new(Duration::from_millis(750)).unwrap();
/// assert!(!timer.expired());
/// while !timer.expired() {
///   std::thread::yield_now();
/// }
/// timer.reset();
/// ```
pub struct CountdownTimer {
  shared: Arc<Shared>,
  duration_us: u64,
  chunk_size: Duration,
  owner: ThreadId,
  owner_check: OwnerCheck,
  handle: Option<JoinHandle<()>>,
}

impl CountdownTimer {
  /// Starts a countdown of `duration`, truncated to whole microseconds.
  pub fn new(duration: Duration) -> Result<Self, TimerError> {
    Self::with_sleep(duration, MonotonicSleep)
  }

  /// Like [`CountdownTimer::new`], but every chunk of the countdown goes through `sleep`.
  ///
  /// Reset and stop are checked after each call to `sleep`. Strategies that do not wait
  /// on the [`crate::Interrupt`] they are handed, such as [`crate::FnSleep`], therefore
  /// only notice them between chunks, which delays both by up to one chunk.
  pub fn with_sleep<S: SleepStrategy>(duration: Duration, sleep: S) -> Result<Self, TimerError> {
    Self::with_config(duration, TimerConfig::default(), sleep)
  }

  /// Like [`CountdownTimer::with_sleep`] with explicit chunk size, park timeout, thread
  /// name and owner check. Fails if `config` does not validate, if `duration` truncates
  /// to zero microseconds, or if the background thread cannot be spawned.
  pub fn with_config<S: SleepStrategy>(duration: Duration, config: TimerConfig, sleep: S) -> Result<Self, TimerError> {
    config.validate()?;
    let duration_us = u64::try_from(duration.as_micros()).map_err(|_| TimerError::DurationOverflow(duration))?;
    if duration_us == 0 {
      return Err(TimerError::ZeroDuration);
    }

    let shared = Arc::new(Shared {
      signal: WakeSignal::new(),
      last_slept_us: AtomicU64::new(NOT_MEASURED),
      expirations: AtomicU64::new(0),
    });
    let plan = ChunkPlan::new(Duration::from_micros(duration_us), config.chunk_size);
    let park_timeout = config.park_timeout;

    let handle = {
      let shared = shared.clone();
      thread::Builder::new()
        .name(config.thread_name.clone())
        .spawn(move || run(&shared, &sleep, &plan, park_timeout))?
    };
    tracing::debug!(
      "countdown started: duration_us = {}, sleeps = {}",
      duration_us,
      plan.sleeps()
    );

    Ok(Self {
      shared,
      duration_us,
      chunk_size: config.chunk_size,
      owner: thread::current().id(),
      owner_check: config.owner_check,
      handle: Some(handle),
    })
  }

  /// Whether the full duration has elapsed since construction or the last reset.
  ///
  /// A reader racing [`CountdownTimer::reset`] may still see the pre-reset value.
  pub fn expired(&self) -> bool {
    self.shared.signal.is_expired()
  }

  /// Restarts the countdown from zero without waiting for the background thread.
  ///
  /// Works the same before expiry (the running sleep is abandoned) and after it (the
  /// parked thread is woken). `expired()` reads false as soon as this returns.
  pub fn reset(&self) {
    self.check_owner();
    tracing::debug!("countdown reset requested");
    self.shared.signal.request_reset();
  }

  /// Configured duration in microseconds.
  pub fn sleep_time_us(&self) -> u64 {
    self.duration_us
  }

  /// Configured duration in milliseconds, truncated: 123456 us reads as 123 ms.
  pub fn sleep_time_ms(&self) -> u64 {
    self.duration_us / 1000
  }

  pub fn chunk_size(&self) -> Duration {
    self.chunk_size
  }

  /// Microseconds the background thread actually spent in the most recent completed
  /// countdown, as measured by its own stopwatch. `None` until the first expiry.
  pub fn last_slept_us(&self) -> Option<u64> {
    match self.shared.last_slept_us.load(Ordering::Acquire) {
      NOT_MEASURED => None,
      us => Some(us),
    }
  }

  /// Number of countdowns that ran to completion.
  pub fn expirations(&self) -> u64 {
    self.shared.expirations.load(Ordering::Acquire)
  }

  /// Resolves once the timer has expired. Returns at once if it already has.
  pub async fn wait_expired(&self) {
    self.shared.signal.wait_expired().await
  }

  fn check_owner(&self) {
    if self.owner_check == OwnerCheck::Disabled {
      return;
    }
    let current = thread::current().id();
    if current == self.owner {
      return;
    }
    match self.owner_check {
      OwnerCheck::Warn => {
        tracing::warn!("reset from non-owner thread: current = {:?}, owner = {:?}", current, self.owner);
      }
      OwnerCheck::Strict => {
        panic!("reset from non-owner thread: current = {:?}, owner = {:?}", current, self.owner);
      }
      OwnerCheck::Disabled => {}
    }
  }
}

impl Drop for CountdownTimer {
  fn drop(&mut self) {
    self.shared.signal.request_stop();
    if let Some(handle) = self.handle.take() {
      if handle.join().is_err() {
        tracing::warn!("countdown thread panicked");
      }
    }
    tracing::debug!("countdown stopped");
  }
}

impl Debug for CountdownTimer {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CountdownTimer")
      .field("duration_us", &self.duration_us)
      .field("chunk_size", &self.chunk_size)
      .field("signal", &self.shared.signal)
      .field("expirations", &self.expirations())
      .finish()
  }
}

fn run<S: SleepStrategy>(shared: &Shared, sleep: &S, plan: &ChunkPlan, park_timeout: Duration) {
  let signal = &shared.signal;
  while !signal.is_stop_requested() {
    if signal.consume_reset() {
      tracing::debug!("countdown restarted");
    }

    if let Some(slept) = count_down(signal, sleep, plan) {
      let slept_us = u64::try_from(slept.as_micros()).unwrap_or(NOT_MEASURED - 1);
      let marked = signal.mark_expired(|| {
        shared.last_slept_us.store(slept_us, Ordering::Release);
        shared.expirations.fetch_add(1, Ordering::AcqRel);
      });
      if marked {
        tracing::debug!("countdown expired: slept_us = {}", slept_us);
      } else {
        tracing::debug!("countdown finished but a reset or stop was already pending");
      }
    }

    if signal.is_stop_requested() {
      break;
    }
    signal.park(park_timeout);
  }
  tracing::debug!("countdown thread exiting");
}

/// Sleeps out `plan`, returning the measured time slept, or `None` if interrupted.
fn count_down<S: SleepStrategy>(signal: &WakeSignal, sleep: &S, plan: &ChunkPlan) -> Option<Duration> {
  let interrupt = Interrupt::new(signal);
  let stopwatch = Stopwatch::new();

  for index in 0..plan.full_chunks() {
    tracing::trace!("sleeping chunk {} of {}", index + 1, plan.sleeps());
    sleep.sleep(plan.chunk(), &interrupt);
    if interrupt.is_raised() {
      return None;
    }
  }

  let remainder = plan.final_sleep(stopwatch.elapsed());
  if !remainder.is_zero() {
    tracing::trace!("sleeping remainder: {:?}", remainder);
    sleep.sleep(remainder, &interrupt);
    if interrupt.is_raised() {
      return None;
    }
  }
  Some(stopwatch.elapsed())
}

static_assertions::assert_impl_all!(CountdownTimer: Send, Sync);
