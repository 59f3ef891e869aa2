//! Simple to use cli for logging events throughout the day and understanding them later.
//! Every event carries an amount and an urgency, the history can be browsed as day, week and
//! month calendars or summarized into interval, hourly and urgency statistics.
//!

pub mod aggregation;
pub mod cli;
pub mod storage;
pub mod utils;
