use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use serde::Serialize;

use crate::storage::entities::{Amount, Event, Urgency};

use super::window::{ViewMode, Window};

/// Horizontal position of a [ScatterPoint]. Which variant is used depends on the window's
/// granularity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ScatterX {
    /// Hours since local midnight, within [0, 24). Used for day windows.
    TimeOfDay(f64),
    /// Day of week, Monday being 0, plus the fraction of the day elapsed. Within [0, 7).
    WeekPosition(f64),
    /// The absolute moment, for month and history windows.
    Timestamp(DateTime<Utc>),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: ScatterX,
    pub urgency: Urgency,
    /// Encodes the point's size.
    pub amount: Amount,
}

fn hours_of_day<Tz: TimeZone>(moment: &DateTime<Tz>) -> f64 {
    moment.hour() as f64 + moment.minute() as f64 / 60.
}

/// Projects the window's events onto urgency/volume points. An empty window gives an empty
/// vector.
pub fn scatter_points<Tz: TimeZone>(events: &[Event], window: &Window<Tz>) -> Vec<ScatterPoint> {
    let tz = window.timezone();
    events
        .iter()
        .filter(|e| window.contains(&e.timestamp))
        .map(|e| {
            let local = e.timestamp.with_timezone(&tz);
            let x = match window.mode() {
                ViewMode::Day => ScatterX::TimeOfDay(hours_of_day(&local)),
                ViewMode::Week => ScatterX::WeekPosition(
                    local.weekday().num_days_from_monday() as f64 + hours_of_day(&local) / 24.,
                ),
                ViewMode::Month | ViewMode::History => ScatterX::Timestamp(e.timestamp),
            };
            ScatterPoint {
                x,
                urgency: e.urgency,
                amount: e.amount,
            }
        })
        .collect()
}
