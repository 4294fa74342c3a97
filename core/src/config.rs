use std::time::Duration;

use crate::{ConfigOption, TimerError};


pub const DEFAULT_CHUNK_SIZE: Duration = Duration::from_millis(500);
pub const DEFAULT_PARK_TIMEOUT: Duration = Duration::from_millis(50);
pub const MAX_CHUNK_SIZE: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_THREAD_NAME: &str = "countdown-timer";

/// How [`crate::CountdownTimer::reset`] treats calls from a thread other than the one
/// that constructed the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnerCheck {
  #[default]
  Disabled,
  /// Log a warning and reset anyway.
  Warn,
  /// Panic before any flag is touched.
  Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
  /// Upper bound of a single sleep before flags are re-checked.
  pub chunk_size: Duration,
  /// Safety net for the post-expiry park in case a wakeup is lost.
  pub park_timeout: Duration,
  pub thread_name: String,
  pub owner_check: OwnerCheck,
}

impl Default for TimerConfig {
  fn default() -> Self {
    TimerConfig {
      chunk_size: DEFAULT_CHUNK_SIZE,
      park_timeout: DEFAULT_PARK_TIMEOUT,
      thread_name: DEFAULT_THREAD_NAME.to_string(),
      owner_check: OwnerCheck::Disabled,
    }
  }
}

impl TimerConfig {
  pub fn from(options: impl IntoIterator<Item = ConfigOption>) -> TimerConfig {
    let mut config = TimerConfig::default();
    for option in options {
      option.apply(&mut config);
    }
    config
  }

  pub fn validate(&self) -> Result<(), TimerError> {
    if self.chunk_size.is_zero() || self.chunk_size > MAX_CHUNK_SIZE {
      return Err(TimerError::InvalidChunkSize {
        actual: self.chunk_size,
        max: MAX_CHUNK_SIZE,
      });
    }
    if self.park_timeout.is_zero() {
      return Err(TimerError::ZeroParkTimeout);
    }
    Ok(())
  }
}
