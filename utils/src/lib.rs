//! Monotonic timing instrumentation shared by the alarm clock crates.

mod stopwatch;
mod stopwatch_registry;
mod time_stats;

pub use self::{stopwatch::*, stopwatch_registry::*, time_stats::*};
