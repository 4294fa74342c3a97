use std::fmt::{Display, Formatter};

use crate::Stopwatch;

#[cfg(test)]
mod tests;

/// Snapshot of a [`TimeStats`] window, all values in nanoseconds except `count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStatsMetrics {
  pub min_ns: u64,
  pub max_ns: u64,
  pub count: u64,
  pub total_ns: u64,
  pub average_ns: u64,
}

impl Display for TimeStatsMetrics {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    if self.count == 0 {
      return write!(f, "Count: 0, no measurements available");
    }
    write!(
      f,
      "Count: {}, Min time: {} ns, Max time: {} ns : {} us, Average: {} ns : {} us",
      self.count,
      self.min_ns,
      self.max_ns,
      self.max_ns / 1000,
      self.average_ns,
      self.average_ns / 1000
    )
  }
}

/// Accumulates min/max/count/total over repeated measurements.
///
/// Meant for comparing the relative cost of operations, not for production hot paths.
/// A window starts on construction and on every flush; [`TimeStats::elapsed_sec`] reports its age.
#[derive(Debug, Clone)]
pub struct TimeStats {
  min_ns: u64,
  max_ns: u64,
  count: u64,
  total_ns: u64,
  window: Stopwatch,
}

impl TimeStats {
  pub fn new() -> Self {
    Self {
      min_ns: u64::MAX,
      max_ns: 0,
      count: 0,
      total_ns: 0,
      window: Stopwatch::new(),
    }
  }

  pub fn save(&mut self, ns: u64) {
    self.count += 1;
    self.total_ns = self.total_ns.saturating_add(ns);
    self.max_ns = self.max_ns.max(ns);
    self.min_ns = self.min_ns.min(ns);
  }

  pub fn count(&self) -> u64 {
    self.count
  }

  /// Age of the current window in whole seconds.
  pub fn elapsed_sec(&self) -> u64 {
    self.window.elapsed_sec()
  }

  /// Returns the current window and starts a new one.
  pub fn flush(&mut self) -> TimeStatsMetrics {
    let metrics = self.metrics();
    self.reset();
    metrics
  }

  pub fn flush_as_string(&mut self) -> String {
    self.flush().to_string()
  }

  /// Measures until the returned guard is dropped.
  pub fn trigger(&mut self) -> TimeStatsTrigger<'_> {
    TimeStatsTrigger::new(self)
  }

  fn metrics(&self) -> TimeStatsMetrics {
    TimeStatsMetrics {
      min_ns: self.min_ns,
      max_ns: self.max_ns,
      count: self.count,
      total_ns: self.total_ns,
      average_ns: self.average(),
    }
  }

  fn average(&self) -> u64 {
    if self.count == 0 {
      return 0;
    }
    self.total_ns / self.count
  }

  fn reset(&mut self) {
    self.min_ns = u64::MAX;
    self.max_ns = 0;
    self.count = 0;
    self.total_ns = 0;
    self.window.restart();
  }
}

impl Default for TimeStats {
  fn default() -> Self {
    Self::new()
  }
}

/// Scope guard that saves the elapsed nanoseconds of its lifetime into a [`TimeStats`].
#[derive(Debug)]
pub struct TimeStatsTrigger<'a> {
  stats: &'a mut TimeStats,
  stopwatch: Stopwatch,
  skip: bool,
}

impl<'a> TimeStatsTrigger<'a> {
  pub fn new(stats: &'a mut TimeStats) -> Self {
    Self {
      stats,
      stopwatch: Stopwatch::new(),
      skip: false,
    }
  }

  /// Drops this measurement instead of saving it.
  pub fn skip(&mut self) {
    self.skip = true;
  }
}

impl Drop for TimeStatsTrigger<'_> {
  fn drop(&mut self) {
    if !self.skip {
      self.stats.save(self.stopwatch.elapsed_ns());
    }
  }
}
