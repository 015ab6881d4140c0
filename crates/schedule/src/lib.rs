//! Cron schedule parsing and advancement.
//!
//! Expressions are standard 5-field cron (minute hour day-of-month month
//! day-of-week), evaluated in UTC. The `cron` crate wants a leading seconds
//! field, so 5-field input is normalized before parsing.

pub mod cron;
pub mod error;

pub use crate::cron::{next_fire, next_fire_of, normalize_cron, parse_schedule, validate};
pub use crate::error::ScheduleError;
