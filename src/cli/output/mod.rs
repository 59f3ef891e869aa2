//! Terminal rendering shared by the commands.

use ansi_term::{Colour, Style};
use chrono::{DateTime, Local};

use crate::storage::entities::{Amount, Event, Urgency};

pub const AMOUNT_MARK: &str = "●";
pub const DENSITY_MARK: &str = "•";

pub fn urgency_colour(urgency: Urgency) -> Colour {
    match urgency {
        Urgency::Low => Colour::Green,
        Urgency::Moderate => Colour::Yellow,
        Urgency::High => Colour::Red,
    }
}

pub fn format_urgency(urgency: Urgency) -> String {
    urgency_colour(urgency).paint(urgency.name()).to_string()
}

pub fn format_amount(amount: Amount) -> String {
    let marks = AMOUNT_MARK.repeat(amount.level() as usize);
    Colour::Blue.paint(format!("{marks:<3}")).to_string()
}

pub fn bold(value: impl AsRef<str>) -> String {
    Style::new().bold().paint(value.as_ref()).to_string()
}

pub fn local_time(event: &Event) -> DateTime<Local> {
    event.timestamp.with_timezone(&Local)
}

/// One line of a timeline, `08:30  ●●  low`.
pub fn format_timeline_entry(event: &Event) -> String {
    format!(
        "{}\t{}\t{}",
        local_time(event).format("%H:%M"),
        format_amount(event.amount),
        format_urgency(event.urgency)
    )
}

/// Scales a raw count to a bar of at most `width` characters.
pub fn bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let length = (count * width).div_ceil(max).max(1);
    "█".repeat(length)
}

#[cfg(test)]
mod tests {
    use super::bar;

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(0, 10, 20), "");
        assert_eq!(bar(5, 0, 20), "");
        assert_eq!(bar(10, 10, 20).chars().count(), 20);
        assert_eq!(bar(1, 100, 20).chars().count(), 1);
        assert_eq!(bar(5, 10, 20).chars().count(), 10);
    }
}
