use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::{storage::entities::Event, utils::time::format_minutes};

use super::{group_by_day, window::Window};

/// Shown instead of an interval when a day has fewer than 2 events.
pub const UNDEFINED_INTERVAL: &str = "-";

/// Statistics of a single day as shown in the day and week views. Intervals are [None] when there
/// are fewer than 2 events, a single event has no gap to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DailyStats {
    pub count: usize,
    pub min_interval_minutes: Option<i64>,
    pub max_interval_minutes: Option<i64>,
}

impl DailyStats {
    pub fn min_interval_display(&self) -> String {
        display_interval(self.min_interval_minutes)
    }

    pub fn max_interval_display(&self) -> String {
        display_interval(self.max_interval_minutes)
    }
}

fn display_interval(minutes: Option<i64>) -> String {
    minutes.map_or_else(|| UNDEFINED_INTERVAL.to_string(), format_minutes)
}

/// Minutes between chronologically consecutive events. Seconds are truncated.
pub fn interval_minutes<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<i64> {
    let mut timestamps = events
        .into_iter()
        .map(|e| e.timestamp)
        .collect::<Vec<DateTime<Utc>>>();
    timestamps.sort();
    timestamps
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_minutes())
        .collect()
}

/// Computes [DailyStats] for events the caller already filtered down to a single day.
pub fn daily_stats<'a>(events: impl IntoIterator<Item = &'a Event>) -> DailyStats {
    let events = events.into_iter().collect::<Vec<_>>();
    let intervals = interval_minutes(events.iter().copied());
    DailyStats {
        count: events.len(),
        min_interval_minutes: intervals.iter().copied().min(),
        max_interval_minutes: intervals.iter().copied().max(),
    }
}

/// A day of a window with its events in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBreakdown<'a> {
    pub date: NaiveDate,
    pub stats: DailyStats,
    pub events: Vec<&'a Event>,
}

/// Per day detail of a window, one entry for every calendar day.
pub fn day_breakdown<'a, Tz: TimeZone>(
    events: &'a [Event],
    window: &Window<Tz>,
) -> Vec<DayBreakdown<'a>> {
    group_by_day(events, window)
        .into_iter()
        .map(|(date, events)| DayBreakdown {
            date,
            stats: daily_stats(events.iter().copied()),
            events,
        })
        .collect()
}
