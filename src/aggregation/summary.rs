use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::storage::entities::Event;

use super::window::{ViewMode, Window};

/// Headline counters of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PeriodCounts {
    pub today: usize,
    pub this_week: usize,
    pub this_month: usize,
    pub total: usize,
}

/// Counts events of the day, ISO week and calendar month containing `reference`.
pub fn period_counts<Tz: TimeZone>(events: &[Event], reference: &DateTime<Tz>) -> PeriodCounts {
    let count = |mode| {
        Window::resolve(mode, reference, events).map_or(0, |window| {
            events
                .iter()
                .filter(|e| window.contains(&e.timestamp))
                .count()
        })
    };

    PeriodCounts {
        today: count(ViewMode::Day),
        this_week: count(ViewMode::Week),
        this_month: count(ViewMode::Month),
        total: events.len(),
    }
}

#[cfg(test)]
mod tests {
    use crate::aggregation::test_events::{at, events};

    use super::{PeriodCounts, period_counts};

    #[test]
    fn test_period_counts() {
        let events = events([
            at(2024, 1, 31, 8, 0),
            at(2024, 1, 31, 23, 59),
            // Monday of the same week, still January.
            at(2024, 1, 29, 12, 0),
            // Same week, next month.
            at(2024, 2, 1, 0, 0),
            at(2024, 1, 2, 10, 0),
            at(2023, 12, 31, 10, 0),
        ]);
        assert_eq!(
            period_counts(&events, &at(2024, 1, 31, 12, 0)),
            PeriodCounts {
                today: 2,
                this_week: 4,
                this_month: 4,
                total: 6,
            }
        );
        assert_eq!(period_counts(&[], &at(2024, 1, 31, 12, 0)), PeriodCounts::default());
    }
}
