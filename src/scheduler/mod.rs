//! Timer orchestration for running giveaways.

pub mod giveaway_timers;

pub use giveaway_timers::{TimerRegistry, MAX_TIMER_DELAY, REFRESH_PERIOD};
