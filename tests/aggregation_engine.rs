use anyhow::Result;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use oshikko::{
    aggregation::{
        calendar::month_grid,
        daily::{daily_stats, day_breakdown},
        events_in_window,
        hourly::hourly_distribution,
        report::StatsReport,
        scatter::scatter_points,
        series::interval_series,
        window::{Selection, ViewMode, Window},
    },
    storage::{
        entities::{Amount, EventDraft, Urgency},
        event_storage::JsonFileStorage,
        event_store::EventStore,
    },
    utils::clock::Clock,
};
use tempfile::tempdir;

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn time(&self) -> DateTime<Utc> {
        self.0
    }
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

async fn store_with(
    dir: &std::path::Path,
    timestamps: &[DateTime<Utc>],
) -> Result<EventStore<JsonFileStorage>> {
    let mut store = EventStore::open(
        JsonFileStorage::new(dir.to_path_buf())?,
        Box::new(FixedClock(at(2024, 1, 10, 12, 0))),
    )
    .await?;
    for (index, timestamp) in timestamps.iter().enumerate() {
        store
            .add(EventDraft {
                amount: Amount::ALL[index % 3],
                urgency: Urgency::ALL[(index + 1) % 3],
                timestamp: Some(*timestamp),
            })
            .await?;
    }
    Ok(store)
}

#[tokio::test]
async fn logged_events_flow_into_daily_statistics() -> Result<()> {
    let dir = tempdir()?;
    let store = store_with(
        dir.path(),
        &[at(2024, 1, 1, 8, 0), at(2024, 1, 1, 8, 30), at(2024, 1, 1, 11, 0)],
    )
    .await?;

    // Reopening reads back exactly what was written.
    let reopened = EventStore::open(
        JsonFileStorage::new(dir.path().to_path_buf())?,
        Box::new(FixedClock(at(2024, 1, 10, 12, 0))),
    )
    .await?;
    assert_eq!(reopened.events(), store.events());

    let window = Window::resolve(ViewMode::Day, &at(2024, 1, 1, 0, 0), reopened.events()).unwrap();
    let stats = daily_stats(events_in_window(reopened.events(), &window));
    assert_eq!(stats.count, 3);
    assert_eq!(stats.min_interval_minutes, Some(30));
    assert_eq!(stats.max_interval_minutes, Some(150));
    Ok(())
}

#[tokio::test]
async fn deleted_events_leave_every_view() -> Result<()> {
    let dir = tempdir()?;
    let mut store = store_with(dir.path(), &[at(2024, 1, 2, 8, 0), at(2024, 1, 2, 23, 0)]).await?;
    let late = store.events()[0].clone();
    assert!(store.delete(&late.id).await?.is_some());

    let window = Window::resolve(ViewMode::Week, &at(2024, 1, 2, 0, 0), store.events()).unwrap();
    let hourly = hourly_distribution(store.events(), &window);
    assert_eq!(hourly[23].count, 0);
    assert_eq!(hourly[8].count, 1);
    assert_eq!(scatter_points(store.events(), &window).len(), 1);
    Ok(())
}

#[test]
fn empty_collection_gives_zeroed_views() {
    for mode in [ViewMode::Day, ViewMode::Week, ViewMode::Month] {
        let window = Window::resolve(mode, &at(2024, 1, 17, 9, 0), &[]).unwrap();
        let series = interval_series(&[], &window);
        assert_eq!(series.len(), window.days().count());
        assert!(series.iter().all(|p| p.count == 0 && p.min_interval_minutes == 0));
        assert!(hourly_distribution(&[], &window).iter().all(|b| b.count == 0));
        assert!(scatter_points(&[], &window).is_empty());

        let breakdown = day_breakdown(&[], &window);
        assert!(breakdown.iter().all(|d| d.stats.min_interval_minutes.is_none()));
    }

    let selection = Selection::new(ViewMode::History, at(2024, 1, 17, 9, 0));
    assert!(selection.window(&[]).is_none());
    let report = StatsReport::build(&[], &selection, &at(2024, 1, 17, 9, 0));
    assert!(report.intervals.is_empty());
    assert!(report.hourly.iter().all(|b| b.count == 0));
}

#[tokio::test]
async fn history_spans_all_logged_days() -> Result<()> {
    let dir = tempdir()?;
    let store = store_with(
        dir.path(),
        &[at(2023, 12, 28, 8, 0), at(2024, 1, 3, 8, 0), at(2024, 1, 3, 9, 15)],
    )
    .await?;

    let selection = Selection::new(ViewMode::History, at(2024, 1, 10, 12, 0));
    let report = StatsReport::build(store.events(), &selection, &at(2024, 1, 10, 12, 0));
    let window = report.window.clone().unwrap();
    assert_eq!(window.first_day, NaiveDate::from_ymd_opt(2023, 12, 28).unwrap());
    assert_eq!(window.last_day, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    assert_eq!(report.intervals.len(), 7);
    assert_eq!(report.intervals[6].max_interval_minutes, 75);
    assert_eq!(report.counts.this_month, 2);

    let grid = month_grid(store.events(), &at(2024, 1, 3, 0, 0));
    let busiest = grid.weeks.iter().flatten().max_by_key(|c| c.count).unwrap();
    assert_eq!(busiest.date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    assert_eq!(busiest.markers, 2);
    Ok(())
}
