use std::time::Duration;

#[cfg(test)]
mod tests;

/// How a countdown of `total` is split into sleeps of at most `chunk`.
///
/// The countdown sleeps `full_chunks` chunks of exactly `chunk`, then a single final
/// sleep covering the rest, shortened by however much the full chunks overslept on the
/// stopwatch (see [`ChunkPlan::final_sleep`]). Keeping one full chunk's worth
/// in the final sleep lets it absorb the overshoot of the earlier ones, so the final
/// sleep lies in `[chunk, 2 * chunk)` once `total >= chunk`. Below that, the whole
/// countdown is one sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
  total: Duration,
  chunk: Duration,
  full_chunks: u64,
}

impl ChunkPlan {
  pub fn new(total: Duration, chunk: Duration) -> Self {
    let full_chunks = if chunk.is_zero() {
      0
    } else {
      let whole = total.as_nanos() / chunk.as_nanos();
      u64::try_from(whole).unwrap_or(u64::MAX).saturating_sub(1)
    };
    Self {
      total,
      chunk,
      full_chunks,
    }
  }

  pub fn total(&self) -> Duration {
    self.total
  }

  pub fn chunk(&self) -> Duration {
    self.chunk
  }

  pub fn full_chunks(&self) -> u64 {
    self.full_chunks
  }

  /// Nominal number of sleeps, counting the final one.
  pub fn sleeps(&self) -> u64 {
    self.full_chunks.saturating_add(1)
  }

  /// Time covered by the full chunks alone.
  pub fn full_duration(&self) -> Duration {
    u32::try_from(self.full_chunks)
      .ok()
      .and_then(|n| self.chunk.checked_mul(n))
      .unwrap_or(self.total)
  }

  /// Nominal length of the final sleep, when the full chunks took exactly their length.
  pub fn remainder(&self) -> Duration {
    self.final_sleep(Duration::ZERO)
  }

  /// Length of the final sleep given the time `elapsed` while sleeping the full chunks.
  ///
  /// Only overshoot beyond [`ChunkPlan::full_duration`] is taken off, so a sleep that
  /// returns early (or never sleeps at all) still leaves the nominal remainder.
  pub fn final_sleep(&self, elapsed: Duration) -> Duration {
    self.total.saturating_sub(elapsed.max(self.full_duration()))
  }
}
