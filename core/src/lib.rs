//! A cancellable, resettable countdown timer ("alarm clock").
//!
//! [`CountdownTimer`] runs its countdown on a background thread and exposes a
//! non-blocking [`CountdownTimer::expired`] query plus [`CountdownTimer::reset`].
//! The sleep itself is a [`SleepStrategy`], so tests can swap in a fake one.

mod chunk_plan;
mod config;
mod config_option;
mod countdown_timer;
mod sleep;
mod timer_error;
mod wake_signal;

pub use self::{
  chunk_plan::*, config::*, config_option::*, countdown_timer::*, sleep::*, timer_error::*,
};

pub use alarm_clock_utils_rs::Stopwatch;
