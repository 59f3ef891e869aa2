use chrono::{DateTime, NaiveDate, TimeZone};
use serde::Serialize;

use crate::storage::entities::Event;

use super::{
    hourly::{HourlyBucket, empty_distribution, hourly_distribution},
    scatter::{ScatterPoint, scatter_points},
    series::{IntervalPoint, interval_series},
    summary::{PeriodCounts, period_counts},
    window::{Selection, ViewMode},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSummary {
    pub label: String,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

/// Everything the statistics view shows for a selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub view: ViewMode,
    /// Absent for the history of an empty collection.
    pub window: Option<WindowSummary>,
    pub counts: PeriodCounts,
    pub intervals: Vec<IntervalPoint>,
    pub hourly: Vec<HourlyBucket>,
    pub scatter: Vec<ScatterPoint>,
}

impl StatsReport {
    /// Period counters are relative to `now`, the rest to the selection's window.
    pub fn build<Tz: TimeZone>(
        events: &[Event],
        selection: &Selection<Tz>,
        now: &DateTime<Tz>,
    ) -> Self {
        let counts = period_counts(events, now);
        let Some(window) = selection.window(events) else {
            return Self {
                view: selection.mode,
                window: None,
                counts,
                intervals: vec![],
                hourly: empty_distribution(),
                scatter: vec![],
            };
        };

        Self {
            view: selection.mode,
            window: Some(WindowSummary {
                label: window.label(),
                first_day: window.first_day(),
                last_day: window.last_day(),
            }),
            counts,
            intervals: interval_series(events, &window),
            hourly: hourly_distribution(events, &window),
            scatter: scatter_points(events, &window),
        }
    }
}
