use std::time::Duration;

use crate::{OwnerCheck, TimerConfig};

#[derive(Debug, Clone)]
pub enum ConfigOption {
  SetChunkSize(Duration),
  SetParkTimeout(Duration),
  SetThreadName(String),
  SetOwnerCheck(OwnerCheck),
}

impl ConfigOption {
  pub fn apply(&self, config: &mut TimerConfig) {
    match self {
      ConfigOption::SetChunkSize(chunk_size) => {
        config.chunk_size = *chunk_size;
      }
      ConfigOption::SetParkTimeout(park_timeout) => {
        config.park_timeout = *park_timeout;
      }
      ConfigOption::SetThreadName(thread_name) => {
        config.thread_name = thread_name.clone();
      }
      ConfigOption::SetOwnerCheck(owner_check) => {
        config.owner_check = *owner_check;
      }
    }
  }

  pub fn with_chunk_size(chunk_size: Duration) -> ConfigOption {
    ConfigOption::SetChunkSize(chunk_size)
  }

  pub fn with_park_timeout(park_timeout: Duration) -> ConfigOption {
    ConfigOption::SetParkTimeout(park_timeout)
  }

  pub fn with_thread_name(thread_name: impl Into<String>) -> ConfigOption {
    ConfigOption::SetThreadName(thread_name.into())
  }

  pub fn with_owner_check(owner_check: OwnerCheck) -> ConfigOption {
    ConfigOption::SetOwnerCheck(owner_check)
  }
}
