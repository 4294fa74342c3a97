use std::thread;
use std::time::Duration;

use crate::{TimeStats, TimeStatsMetrics};

const MIN_FAKE_NS: u64 = 100;
const MAX_FAKE_NS: u64 = 300;

#[test]
fn test_flush_empty() {
  let mut stats = TimeStats::new();
  let metrics = stats.flush();
  assert_eq!(
    metrics,
    TimeStatsMetrics {
      min_ns: u64::MAX,
      max_ns: 0,
      count: 0,
      total_ns: 0,
      average_ns: 0,
    }
  );
}

#[test]
fn test_flush_as_string_empty() {
  let mut stats = TimeStats::new();
  assert_eq!("Count: 0, no measurements available", stats.flush_as_string());
}

#[test]
fn test_save_and_flush() {
  let mut stats = TimeStats::new();
  stats.save(MIN_FAKE_NS);
  stats.save(MAX_FAKE_NS);

  let metrics = stats.flush();
  assert_eq!(MIN_FAKE_NS, metrics.min_ns);
  assert_eq!(MAX_FAKE_NS, metrics.max_ns);
  assert_eq!(2, metrics.count);
  assert_eq!(MIN_FAKE_NS + MAX_FAKE_NS, metrics.total_ns);
  assert_eq!(200, metrics.average_ns);
}

#[test]
fn test_flush_as_string() {
  let mut stats = TimeStats::new();
  stats.save(MIN_FAKE_NS);
  stats.save(MAX_FAKE_NS);
  assert_eq!(
    "Count: 2, Min time: 100 ns, Max time: 300 ns : 0 us, Average: 200 ns : 0 us",
    stats.flush_as_string()
  );
}

#[test]
fn test_flush_starts_new_window() {
  let mut stats = TimeStats::new();
  stats.save(5_000);
  stats.save(7_000);
  let first = stats.flush();
  assert_eq!(2, first.count);

  let second = stats.flush();
  assert_eq!(0, second.count);
  assert_eq!(u64::MAX, second.min_ns);
  assert_eq!(0, stats.elapsed_sec());
}

#[test]
fn test_trigger_saves_on_drop() {
  let mut stats = TimeStats::new();
  for _ in 0..3 {
    let _trigger = stats.trigger();
    thread::sleep(Duration::from_millis(1));
  }

  let metrics = stats.flush();
  assert_eq!(3, metrics.count);
  assert!(metrics.min_ns >= 1_000_000);
  assert!(metrics.max_ns >= metrics.min_ns);
}

#[test]
fn test_trigger_skip() {
  let mut stats = TimeStats::new();
  {
    let mut trigger = stats.trigger();
    trigger.skip();
  }
  {
    let _trigger = stats.trigger();
  }
  assert_eq!(1, stats.count());
}
