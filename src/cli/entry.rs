use anyhow::Result;
use chrono::Local;

use crate::storage::{
    entities::{Amount, EventDraft, Urgency},
    event_storage::EventStorage,
    event_store::EventStore,
};

use super::{
    output::{format_amount, format_urgency, local_time},
    selection::{DateStyleArg, parse_date},
};

#[derive(Debug, clap::Args)]
pub struct LogCommand {
    #[arg(long, short, default_value_t = Amount::Medium, help = "Amount, 1-3 or small, medium, large")]
    amount: Amount,
    #[arg(long, short, default_value_t = Urgency::Low, help = "Urgency, 1-3 or low, moderate, high")]
    urgency: Urgency,
    #[arg(
        long,
        help = "When the event happened, now by default. Examples are \"10 minutes ago\", \"8:15\", \"yesterday 23:00\""
    )]
    at: Option<String>,
    #[command(flatten)]
    date_style: DateStyleArg,
}

#[derive(Debug, clap::Args)]
pub struct DeleteCommand {
    #[arg(help = "Id of the event, as printed by `list`")]
    id: String,
}

pub async fn process_log_command<S: EventStorage>(
    LogCommand {
        amount,
        urgency,
        at,
        date_style,
    }: LogCommand,
    mut store: EventStore<S>,
) -> Result<()> {
    let timestamp = match at {
        Some(text) => Some(parse_date(&text, Local::now(), date_style.date_style)?.to_utc()),
        None => None,
    };

    let event = store
        .add(EventDraft {
            amount,
            urgency,
            timestamp,
        })
        .await?;

    println!(
        "Logged {}\t{}\t{}\t{}",
        event.id,
        local_time(&event).format("%x %H:%M"),
        format_amount(event.amount),
        format_urgency(event.urgency)
    );
    Ok(())
}

pub async fn process_delete_command<S: EventStorage>(
    DeleteCommand { id }: DeleteCommand,
    mut store: EventStore<S>,
) -> Result<()> {
    match store.delete(&id).await? {
        Some(event) => println!(
            "Deleted {}\t{}",
            event.id,
            local_time(&event).format("%x %H:%M")
        ),
        None => println!("No event with id {id}"),
    }
    Ok(())
}
