use std::fmt::Display;

use chrono::{DateTime, Days, Months, NaiveDate, TimeZone, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::{
    storage::entities::Event,
    utils::time::{day_start, month_start, next_month_start, week_start},
};

/// Granularity of a [Window].
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    Week,
    Month,
    History,
}

impl Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Day => write!(f, "day"),
            ViewMode::Week => write!(f, "week"),
            ViewMode::Month => write!(f, "month"),
            ViewMode::History => write!(f, "history"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl ViewMode {
    /// Moves the reference point by one unit of the granularity. History has no unit, so the
    /// reference is returned as is. Moves that would leave chrono's range are ignored.
    pub fn shift<Tz: TimeZone>(self, reference: &DateTime<Tz>, direction: Direction) -> DateTime<Tz> {
        let shifted = match (self, direction) {
            (ViewMode::Day, Direction::Next) => reference.clone().checked_add_days(Days::new(1)),
            (ViewMode::Day, Direction::Previous) => {
                reference.clone().checked_sub_days(Days::new(1))
            }
            (ViewMode::Week, Direction::Next) => reference.clone().checked_add_days(Days::new(7)),
            (ViewMode::Week, Direction::Previous) => {
                reference.clone().checked_sub_days(Days::new(7))
            }
            (ViewMode::Month, Direction::Next) => {
                reference.clone().checked_add_months(Months::new(1))
            }
            (ViewMode::Month, Direction::Previous) => {
                reference.clone().checked_sub_months(Months::new(1))
            }
            (ViewMode::History, _) => None,
        };
        shifted.unwrap_or_else(|| reference.clone())
    }

    /// Applies [ViewMode::shift] `steps` times, negative steps move backwards.
    pub fn navigate<Tz: TimeZone>(self, reference: &DateTime<Tz>, steps: i32) -> DateTime<Tz> {
        let direction = if steps < 0 {
            Direction::Previous
        } else {
            Direction::Next
        };
        (0..steps.unsigned_abs()).fold(reference.clone(), |current, _| {
            self.shift(&current, direction)
        })
    }
}

/// A resolved half open interval `[start, end)`. Both bounds are local midnights of the window's
/// timezone.
#[derive(Debug, Clone)]
pub struct Window<Tz: TimeZone> {
    mode: ViewMode,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl<Tz: TimeZone> PartialEq for Window<Tz> {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode && self.start == other.start && self.end == other.end
    }
}

impl<Tz: TimeZone> Window<Tz> {
    /// Resolves the window of `mode` that contains `reference`. History spans the calendar days
    /// from the earliest to the latest event and is [None] for an empty collection.
    pub fn resolve(mode: ViewMode, reference: &DateTime<Tz>, events: &[Event]) -> Option<Self> {
        let tz = reference.timezone();
        let day = reference.date_naive();
        let (first, last_exclusive) = match mode {
            ViewMode::Day => (day, day.succ_opt()?),
            ViewMode::Week => {
                let start = week_start(day);
                (start, start.checked_add_days(Days::new(7))?)
            }
            ViewMode::Month => (month_start(day), next_month_start(day)),
            ViewMode::History => {
                let earliest = events.iter().map(|e| e.timestamp).min()?;
                let latest = events.iter().map(|e| e.timestamp).max()?;
                (
                    earliest.with_timezone(&tz).date_naive(),
                    latest.with_timezone(&tz).date_naive().succ_opt()?,
                )
            }
        };

        Some(Self::from_days(mode, &tz, first, last_exclusive))
    }

    /// Window covering the calendar days `[first, last_exclusive)` of `tz`.
    pub(crate) fn from_days(
        mode: ViewMode,
        tz: &Tz,
        first: NaiveDate,
        last_exclusive: NaiveDate,
    ) -> Self {
        Self {
            mode,
            start: day_start(tz, first),
            end: day_start(tz, last_exclusive),
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    pub fn end(&self) -> &DateTime<Tz> {
        &self.end
    }

    pub fn timezone(&self) -> Tz {
        self.start.timezone()
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        self.start <= *timestamp && *timestamp < self.end
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Last calendar day covered by the window.
    pub fn last_day(&self) -> NaiveDate {
        let end = self.end.date_naive();
        end.pred_opt().unwrap_or(end)
    }

    /// Every calendar day of the window in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end.date_naive();
        self.first_day().iter_days().take_while(move |day| *day < end)
    }

    pub fn label(&self) -> String {
        let first = self.first_day();
        match self.mode {
            ViewMode::Day => first.format("%-d %B %Y").to_string(),
            ViewMode::Week => format!("Week of {}", first.format("%-d %b %Y")),
            ViewMode::Month => first.format("%B %Y").to_string(),
            ViewMode::History => format!(
                "{} to {}",
                first.format("%-d %b %Y"),
                self.last_day().format("%-d %b %Y")
            ),
        }
    }
}

/// The caller owned view state: what is being looked at and around which moment.
#[derive(Debug, Clone)]
pub struct Selection<Tz: TimeZone> {
    pub mode: ViewMode,
    pub reference: DateTime<Tz>,
}

impl<Tz: TimeZone> Selection<Tz> {
    pub fn new(mode: ViewMode, reference: DateTime<Tz>) -> Self {
        Self { mode, reference }
    }

    pub fn previous(&self) -> Self {
        Self::new(self.mode, self.mode.shift(&self.reference, Direction::Previous))
    }

    pub fn next(&self) -> Self {
        Self::new(self.mode, self.mode.shift(&self.reference, Direction::Next))
    }

    pub fn window(&self, events: &[Event]) -> Option<Window<Tz>> {
        Window::resolve(self.mode, &self.reference, events)
    }
}
