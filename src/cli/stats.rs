use anyhow::Result;
use chrono::Local;

use crate::{
    aggregation::{
        report::StatsReport,
        scatter::{ScatterPoint, ScatterX},
    },
    storage::{event_storage::EventStorage, event_store::EventStore},
    utils::time::format_minutes,
};

use super::{
    output::{bar, bold, format_amount, format_urgency},
    selection::SelectionArgs,
};

const BAR_WIDTH: usize = 30;

#[derive(Debug, clap::Args)]
pub struct StatsCommand {
    #[command(flatten)]
    selection: SelectionArgs,
    #[arg(long, help = "Print the report as JSON")]
    json: bool,
}

pub fn process_stats_command<S: EventStorage>(
    StatsCommand { selection, json }: StatsCommand,
    store: EventStore<S>,
) -> Result<()> {
    let now = Local::now();
    let selection = selection.to_selection(now)?;
    let report = StatsReport::build(store.events(), &selection, &now);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &StatsReport) {
    let counts = &report.counts;
    println!(
        "Today {}\tThis week {}\tThis month {}\tTotal {}",
        counts.today, counts.this_week, counts.this_month, counts.total
    );

    let Some(window) = &report.window else {
        println!("No events logged yet");
        return;
    };
    println!();
    println!("{}", bold(&window.label));

    println!();
    println!("{}", bold("Events and intervals per day"));
    let max_count = report.intervals.iter().map(|p| p.count).max().unwrap_or(0);
    for point in &report.intervals {
        let intervals = if point.count > 1 {
            format!(
                "min {}\tmax {}",
                format_minutes(point.min_interval_minutes),
                format_minutes(point.max_interval_minutes)
            )
        } else {
            String::new()
        };
        println!(
            "{}\t{:>3} {:<width$}\t{}",
            point.date.format("%a %d %b"),
            point.count,
            bar(point.count, max_count, BAR_WIDTH),
            intervals,
            width = BAR_WIDTH
        );
    }

    println!();
    println!("{}", bold("Hourly distribution"));
    let max_hourly = report.hourly.iter().map(|b| b.count).max().unwrap_or(0);
    for bucket in &report.hourly {
        println!(
            "{:02}\t{:>3} {}",
            bucket.hour,
            bucket.count,
            bar(bucket.count, max_hourly, BAR_WIDTH)
        );
    }

    println!();
    println!("{}", bold("Urgency and volume"));
    if report.scatter.is_empty() {
        println!("No events");
    }
    for point in &report.scatter {
        println!("{}", format_point(point));
    }
}

fn format_point(point: &ScatterPoint) -> String {
    let position = match point.x {
        ScatterX::TimeOfDay(hours) => format!("{hours:>5.2}h"),
        ScatterX::WeekPosition(position) => format!("day {position:>4.2}"),
        ScatterX::Timestamp(timestamp) => timestamp
            .with_timezone(&Local)
            .format("%x %H:%M")
            .to_string(),
    };
    format!(
        "{position}\t{}\t{}",
        format_amount(point.amount),
        format_urgency(point.urgency)
    )
}

#[cfg(test)]
mod tests {
    use crate::{
        aggregation::scatter::{ScatterPoint, ScatterX},
        storage::entities::{Amount, Urgency},
    };

    use super::format_point;

    #[test]
    fn test_format_point_position() {
        let point = ScatterPoint {
            x: ScatterX::WeekPosition(2.75),
            urgency: Urgency::High,
            amount: Amount::Small,
        };
        assert!(format_point(&point).starts_with("day 2.75"));

        let point = ScatterPoint {
            x: ScatterX::TimeOfDay(7.5),
            ..point
        };
        assert!(format_point(&point).starts_with(" 7.50h"));
    }
}
