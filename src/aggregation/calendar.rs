use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone};
use serde::Serialize;

use crate::{
    storage::entities::{Event, Urgency},
    utils::time::{month_start, next_month_start, week_start},
};

use super::{
    group_by_day,
    window::{ViewMode, Window},
};

/// Upper bound of density markers drawn for a day.
pub const MAX_MARKERS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// False for the padding days of the previous and next month.
    pub in_month: bool,
    /// True for the reference day the grid was resolved around.
    pub selected: bool,
    pub count: usize,
    pub markers: usize,
    pub peak_urgency: Option<Urgency>,
    pub total_amount: u32,
}

impl CalendarCell {
    pub fn has_events(&self) -> bool {
        self.count > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub label: String,
    /// Monday to Sunday rows, padded with days of the neighbouring months.
    pub weeks: Vec<Vec<CalendarCell>>,
}

/// Month calendar around `reference`, padded to full Monday based weeks.
pub fn month_grid<Tz: TimeZone>(events: &[Event], reference: &DateTime<Tz>) -> MonthGrid {
    let tz = reference.timezone();
    let selected = reference.date_naive();
    let month = Window::from_days(
        ViewMode::Month,
        &tz,
        month_start(selected),
        next_month_start(selected),
    );

    let grid_start = week_start(month.first_day());
    let grid_end = week_start(month.last_day()) + Days::new(7);
    let padded = Window::from_days(ViewMode::Month, &tz, grid_start, grid_end);

    let cells = group_by_day(events, &padded)
        .into_iter()
        .map(|(date, day_events)| {
            let count = day_events.len();
            CalendarCell {
                date,
                in_month: date.month() == selected.month() && date.year() == selected.year(),
                selected: date == selected,
                count,
                markers: count.min(MAX_MARKERS),
                peak_urgency: day_events.iter().map(|e| e.urgency).max(),
                total_amount: day_events.iter().map(|e| e.amount.level() as u32).sum(),
            }
        })
        .collect::<Vec<_>>();

    MonthGrid {
        label: month.label(),
        weeks: cells.chunks(7).map(<[CalendarCell]>::to_vec).collect(),
    }
}
