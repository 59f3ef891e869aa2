use anyhow::Result;
use chrono::Local;

use crate::{
    aggregation::events_in_window,
    storage::{event_storage::EventStorage, event_store::EventStore},
};

use super::{
    output::{bold, format_amount, format_urgency, local_time},
    selection::SelectionArgs,
};

#[derive(Debug, clap::Args)]
pub struct ListCommand {
    #[command(flatten)]
    selection: SelectionArgs,
}

pub fn process_list_command<S: EventStorage>(
    ListCommand { selection }: ListCommand,
    store: EventStore<S>,
) -> Result<()> {
    let selection = selection.to_selection(Local::now())?;
    let events = store.events();
    let Some(window) = selection.window(events) else {
        println!("No events logged yet");
        return Ok(());
    };

    println!("{}", bold(window.label()));
    let mut selected = events_in_window(events, &window);
    if selected.is_empty() {
        println!("No events");
        return Ok(());
    }

    selected.reverse();
    for event in selected {
        println!(
            "{}\t{}\t{}\t{}",
            event.id,
            local_time(event).format("%a %x %H:%M"),
            format_amount(event.amount),
            format_urgency(event.urgency)
        );
    }
    Ok(())
}
