//! Pure transformations of an event snapshot into the derived views rendered by the cli.
//! Nothing in here performs I/O or keeps state between calls, every function receives the
//! snapshot and a [window::Window] and returns plain records.

pub mod calendar;
pub mod daily;
pub mod hourly;
pub mod report;
pub mod scatter;
pub mod series;
pub mod summary;
pub mod window;

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};

use crate::storage::entities::Event;

use window::Window;

/// Events inside the window, ascending by timestamp.
pub fn events_in_window<'a, Tz: TimeZone>(
    events: &'a [Event],
    window: &Window<Tz>,
) -> Vec<&'a Event> {
    let mut selected = events
        .iter()
        .filter(|e| window.contains(&e.timestamp))
        .collect::<Vec<_>>();
    selected.sort_by_key(|e| e.timestamp);
    selected
}

/// Events that happened on `day` in `tz`, ascending by timestamp.
pub fn events_on_day<'a, Tz: TimeZone>(events: &'a [Event], day: NaiveDate, tz: &Tz) -> Vec<&'a Event> {
    let mut selected = events
        .iter()
        .filter(|e| e.timestamp.with_timezone(tz).date_naive() == day)
        .collect::<Vec<_>>();
    selected.sort_by_key(|e| e.timestamp);
    selected
}

/// Groups the events of a window by calendar day. Every day of the window is present, days
/// without events map to an empty vector. Each group is ascending by timestamp.
pub fn group_by_day<'a, Tz: TimeZone>(
    events: &'a [Event],
    window: &Window<Tz>,
) -> BTreeMap<NaiveDate, Vec<&'a Event>> {
    let tz = window.timezone();
    let mut groups = window
        .days()
        .map(|day| (day, Vec::new()))
        .collect::<BTreeMap<_, _>>();

    for event in events_in_window(events, window) {
        let day = event.timestamp.with_timezone(&tz).date_naive();
        groups.entry(day).or_default().push(event);
    }
    groups
}


#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::{
        events_in_window, events_on_day, group_by_day,
        test_events::{at, events},
        window::{ViewMode, Window},
    };

    #[test]
    fn test_events_in_window_sorted() {
        let events = events([
            at(2024, 1, 2, 9, 0),
            at(2024, 1, 8, 9, 0),
            at(2024, 1, 1, 7, 0),
            at(2023, 12, 31, 23, 59),
        ]);
        let window = Window::resolve(ViewMode::Week, &at(2024, 1, 3, 0, 0), &events).unwrap();
        let selected = events_in_window(&events, &window)
            .into_iter()
            .map(|e| e.timestamp)
            .collect::<Vec<_>>();
        assert_eq!(selected, vec![at(2024, 1, 1, 7, 0), at(2024, 1, 2, 9, 0)]);
    }

    #[test]
    fn test_events_on_day() {
        let events = events([at(2024, 1, 1, 11, 0), at(2024, 1, 2, 0, 0), at(2024, 1, 1, 8, 0)]);
        let day = events_on_day(&events, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), &Utc);
        assert_eq!(day.len(), 2);
        assert!(day[0].timestamp < day[1].timestamp);
    }

    #[test]
    fn test_group_by_day_contains_empty_days() {
        let events = events([at(2024, 1, 3, 10, 0), at(2024, 1, 3, 9, 0)]);
        let window = Window::resolve(ViewMode::Week, &at(2024, 1, 3, 0, 0), &events).unwrap();
        let groups = group_by_day(&events, &window);
        assert_eq!(groups.len(), 7);
        let wednesday = &groups[&NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()];
        assert_eq!(wednesday.len(), 2);
        assert_eq!(wednesday[0].timestamp, at(2024, 1, 3, 9, 0));
        assert_eq!(groups.values().map(Vec::len).sum::<usize>(), 2);
    }
}
