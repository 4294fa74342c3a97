use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimerError {
  #[error("countdown duration must be at least one microsecond")]
  ZeroDuration,
  #[error("countdown duration does not fit in u64 microseconds: {0:?}")]
  DurationOverflow(Duration),
  #[error("chunk size must be between 1us and {max:?}: {actual:?}")]
  InvalidChunkSize { actual: Duration, max: Duration },
  #[error("park timeout must be non-zero")]
  ZeroParkTimeout,
  #[error("failed to spawn countdown thread: {0}")]
  Spawn(#[from] std::io::Error),
}

static_assertions::assert_impl_all!(TimerError: Send, Sync);
