use anyhow::Result;
use chrono::{Datelike, Local, Weekday};

use crate::{
    aggregation::{
        calendar::{MonthGrid, month_grid},
        daily::{DailyStats, day_breakdown},
        window::{Selection, ViewMode},
    },
    storage::{entities::Event, event_storage::EventStorage, event_store::EventStore},
};

use super::{
    output::{DENSITY_MARK, bold, format_timeline_entry, urgency_colour},
    selection::SelectionArgs,
};

#[derive(Debug, clap::Args)]
pub struct CalendarCommand {
    #[command(flatten)]
    selection: SelectionArgs,
}

pub fn process_calendar_command<S: EventStorage>(
    CalendarCommand { selection }: CalendarCommand,
    store: EventStore<S>,
) -> Result<()> {
    let selection = selection.to_selection(Local::now())?;
    let events = store.events();

    match selection.mode {
        ViewMode::Day | ViewMode::Week | ViewMode::History => {
            print_days(&selection, events);
        }
        ViewMode::Month => print_month(&month_grid(events, &selection.reference)),
    }
    Ok(())
}

fn format_stats(stats: &DailyStats) -> String {
    if stats.count > 1 {
        format!(
            "{} events\tmax {}\tmin {}",
            stats.count,
            stats.max_interval_display(),
            stats.min_interval_display()
        )
    } else {
        format!("{} events", stats.count)
    }
}

/// Day view is a single day timeline, week and history list every day with its summary.
fn print_days(selection: &Selection<Local>, events: &[Event]) {
    let Some(window) = selection.window(events) else {
        println!("No events logged yet");
        return;
    };
    println!("{}", bold(window.label()));

    let show_empty = selection.mode != ViewMode::History;
    for day in day_breakdown(events, &window) {
        if day.events.is_empty() && !show_empty {
            continue;
        }
        println!();
        println!(
            "{}\t{}",
            bold(day.date.format("%A %-d").to_string()),
            format_stats(&day.stats)
        );
        if day.events.is_empty() {
            println!("  No events");
        }
        for event in day.events {
            println!("  {}", format_timeline_entry(event));
        }
    }
}

fn print_month(grid: &MonthGrid) {
    println!("{}", bold(&grid.label));
    let header = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .map(|day| format!("{:<6}", &day.to_string()[..2]))
    .join("");
    println!("{header}");

    for week in &grid.weeks {
        let mut line = String::new();
        for cell in week {
            let number = if cell.in_month {
                format!("{:>2}", cell.date.day())
            } else {
                "  ".to_string()
            };
            // Padding days keep their number hidden and their markers off.
            let shown = if cell.in_month { cell.markers } else { 0 };
            let marks = match cell.peak_urgency {
                Some(urgency) if shown > 0 => urgency_colour(urgency)
                    .paint(DENSITY_MARK.repeat(shown))
                    .to_string(),
                _ => String::new(),
            };
            let number = if cell.selected { bold(number) } else { number };
            line.push_str(&number);
            line.push_str(&marks);
            line.push_str(&" ".repeat(4 - shown));
        }
        println!("{}", line.trim_end());
    }
}
