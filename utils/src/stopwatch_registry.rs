use std::sync::Arc;
use std::thread::{self, ThreadId};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::Stopwatch;


/// Per-thread [`Stopwatch`] cache.
///
/// Each thread only ever touches its own entry, so instrumentation running on many
/// threads does not contend on a single stopwatch. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct StopwatchRegistry {
  stopwatches: Arc<DashMap<ThreadId, Stopwatch>>,
}

impl StopwatchRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Runs `f` against the calling thread's stopwatch, creating it on first use.
  pub fn with_current<R>(&self, f: impl FnOnce(&mut Stopwatch) -> R) -> R {
    let thread_id = thread::current().id();
    let mut stopwatch = match self.stopwatches.entry(thread_id) {
      Entry::Occupied(entry) => entry.into_ref(),
      Entry::Vacant(entry) => {
        tracing::debug!("creating stopwatch for thread {:?}", thread_id);
        entry.insert(Stopwatch::new())
      }
    };
    f(stopwatch.value_mut())
  }

  pub fn restart_current(&self) {
    self.with_current(|sw| {
      sw.restart();
    });
  }

  pub fn elapsed_us_current(&self) -> u64 {
    self.with_current(|sw| sw.elapsed_us())
  }

  /// Forgets the calling thread's stopwatch, returning it if one existed.
  pub fn remove_current(&self) -> Option<Stopwatch> {
    self
      .stopwatches
      .remove(&thread::current().id())
      .map(|(_, sw)| sw)
  }

  pub fn len(&self) -> usize {
    self.stopwatches.len()
  }

  pub fn is_empty(&self) -> bool {
    self.stopwatches.is_empty()
  }
}

static_assertions::assert_impl_all!(StopwatchRegistry: Send, Sync);
