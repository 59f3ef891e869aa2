use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

use crate::storage::entities::Event;

use super::{daily::daily_stats, group_by_day, window::Window};

/// One day of the interval chart. Unlike [DailyStats](super::daily::DailyStats) days with fewer
/// than 2 events report intervals of 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntervalPoint {
    pub date: NaiveDate,
    pub count: usize,
    pub min_interval_minutes: i64,
    pub max_interval_minutes: i64,
}

/// Daily counts and intervals for every calendar day of the window, ascending and without gaps.
pub fn interval_series<Tz: TimeZone>(events: &[Event], window: &Window<Tz>) -> Vec<IntervalPoint> {
    group_by_day(events, window)
        .into_iter()
        .map(|(date, day_events)| {
            let stats = daily_stats(day_events);
            IntervalPoint {
                date,
                count: stats.count,
                min_interval_minutes: stats.min_interval_minutes.unwrap_or(0),
                max_interval_minutes: stats.max_interval_minutes.unwrap_or(0),
            }
        })
        .collect()
}
