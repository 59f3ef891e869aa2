pub mod calendar;
pub mod entry;
pub mod list;
pub mod output;
pub mod selection;
pub mod stats;

use std::path::{Path, PathBuf};

use anyhow::Result;
use calendar::{CalendarCommand, process_calendar_command};
use clap::{Parser, Subcommand};
use entry::{DeleteCommand, LogCommand, process_delete_command, process_log_command};
use list::{ListCommand, process_list_command};
use stats::{StatsCommand, process_stats_command};
use tracing::level_filters::LevelFilter;

use crate::{
    storage::{event_storage::JsonFileStorage, event_store::EventStore},
    utils::{
        clock::DefaultClock,
        dir::{create_application_default_path, create_application_path},
        logging::{CLI_PREFIX, enable_logging},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Oshikko", version, long_about = None)]
#[command(about = "Log events and explore them through calendars and statistics", long_about = None)]
pub(crate) struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Log a new event")]
    Log {
        #[command(flatten)]
        command: LogCommand,
    },
    #[command(about = "Delete an event by its id")]
    Delete {
        #[command(flatten)]
        command: DeleteCommand,
    },
    #[command(about = "List events of a day, week, month or the whole history, newest first")]
    List {
        #[command(flatten)]
        command: ListCommand,
    },
    #[command(about = "Show a day timeline, week summary or month grid")]
    Calendar {
        #[command(flatten)]
        command: CalendarCommand,
    },
    #[command(about = "Show counters, intervals, hourly distribution and urgency of events")]
    Stats {
        #[command(flatten)]
        command: StatsCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = match args.dir {
        Some(dir) => create_application_path(dir)?,
        None => create_application_default_path()?,
    };

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &app_dir.join("logs"), logging_level, args.log)?;

    match args.commands {
        Commands::Log { command } => process_log_command(command, open_store(&app_dir).await?).await,
        Commands::Delete { command } => {
            process_delete_command(command, open_store(&app_dir).await?).await
        }
        Commands::List { command } => process_list_command(command, open_store(&app_dir).await?),
        Commands::Calendar { command } => {
            process_calendar_command(command, open_store(&app_dir).await?)
        }
        Commands::Stats { command } => process_stats_command(command, open_store(&app_dir).await?),
    }
}

pub async fn open_store(app_dir: &Path) -> Result<EventStore<JsonFileStorage>> {
    let storage = JsonFileStorage::new(app_dir.to_path_buf())?;
    EventStore::open(storage, Box::new(DefaultClock)).await
}
