use std::time::Duration;

use rstest::*;

use crate::ChunkPlan;

const CHUNK: Duration = Duration::from_millis(500);

#[rstest]
#[case(Duration::from_micros(900), 0, Duration::from_micros(900))]
#[case(Duration::from_millis(100), 0, Duration::from_millis(100))]
#[case(Duration::from_millis(500), 0, Duration::from_millis(500))]
#[case(Duration::from_micros(600_000), 0, Duration::from_micros(600_000))]
#[case(Duration::from_micros(724_509), 0, Duration::from_micros(724_509))]
#[case(Duration::from_millis(1000), 1, Duration::from_millis(500))]
#[case(Duration::from_millis(2200), 3, Duration::from_millis(700))]
#[case(Duration::from_millis(7500), 14, Duration::from_millis(500))]
#[case(Duration::from_secs(1000), 1999, Duration::from_millis(500))]
fn test_split(#[case] total: Duration, #[case] full_chunks: u64, #[case] remainder: Duration) {
  let plan = ChunkPlan::new(total, CHUNK);
  assert_eq!(full_chunks, plan.full_chunks());
  assert_eq!(full_chunks + 1, plan.sleeps());
  assert_eq!(remainder, plan.remainder());
  assert_eq!(total, plan.total());
  assert_eq!(CHUNK, plan.chunk());
}

#[test]
fn test_remainder_stays_below_two_chunks() {
  for ms in (500..20_000).step_by(37) {
    let plan = ChunkPlan::new(Duration::from_millis(ms), CHUNK);
    assert!(plan.remainder() >= CHUNK, "{} ms", ms);
    assert!(plan.remainder() < CHUNK * 2, "{} ms", ms);
  }
}

#[test]
fn test_final_sleep_ignores_undershoot() {
  let plan = ChunkPlan::new(Duration::from_millis(2200), CHUNK);
  assert_eq!(Duration::from_millis(1500), plan.full_duration());
  // Full chunks that returned instantly still leave the nominal remainder.
  assert_eq!(Duration::from_millis(700), plan.final_sleep(Duration::ZERO));
  assert_eq!(Duration::from_millis(700), plan.final_sleep(Duration::from_millis(1200)));
}

#[test]
fn test_final_sleep_absorbs_overshoot() {
  let plan = ChunkPlan::new(Duration::from_millis(2200), CHUNK);
  assert_eq!(Duration::from_millis(697), plan.final_sleep(Duration::from_millis(1503)));
  assert_eq!(Duration::ZERO, plan.final_sleep(Duration::from_millis(2500)));
}

#[test]
fn test_final_sleep_below_chunk_is_whole_duration() {
  let plan = ChunkPlan::new(Duration::from_micros(900), CHUNK);
  assert_eq!(Duration::ZERO, plan.full_duration());
  assert_eq!(Duration::from_micros(850), plan.final_sleep(Duration::from_micros(50)));
}

#[test]
fn test_custom_chunk() {
  let plan = ChunkPlan::new(Duration::from_millis(350), Duration::from_millis(100));
  assert_eq!(2, plan.full_chunks());
  assert_eq!(Duration::from_millis(150), plan.remainder());
}
