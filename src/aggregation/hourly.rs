use chrono::{TimeZone, Timelike};
use serde::Serialize;

use crate::storage::entities::Event;

use super::window::Window;

pub const HOURS_IN_DAY: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourlyBucket {
    pub hour: u32,
    pub count: usize,
}

/// All 24 buckets with a count of 0.
pub fn empty_distribution() -> Vec<HourlyBucket> {
    (0..HOURS_IN_DAY as u32)
        .map(|hour| HourlyBucket { hour, count: 0 })
        .collect()
}

/// Histogram of the window's events by local hour. Always 24 buckets, hours 0 to 23 in order.
pub fn hourly_distribution<Tz: TimeZone>(events: &[Event], window: &Window<Tz>) -> Vec<HourlyBucket> {
    let tz = window.timezone();
    let mut counts = [0usize; HOURS_IN_DAY];
    for event in events.iter().filter(|e| window.contains(&e.timestamp)) {
        counts[event.timestamp.with_timezone(&tz).hour() as usize] += 1;
    }

    counts
        .into_iter()
        .zip(0u32..)
        .map(|(count, hour)| HourlyBucket { hour, count })
        .collect()
}
