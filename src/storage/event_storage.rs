use std::{
    future::Future,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
};
use tracing::{debug, warn};

use super::entities::Event;

/// Name of the slot all events are stored under.
pub const EVENTS_SLOT: &str = "oshikko_entries";

/// Interface for abstracting persistence of the event collection.
pub trait EventStorage {
    /// Reads the whole collection. A slot that was never written is an empty collection.
    fn load(&self) -> impl Future<Output = Result<Vec<Event>>>;

    /// Replaces the whole collection.
    fn save(&self, events: &[Event]) -> impl Future<Output = Result<()>>;
}

/// The main realization of [EventStorage]. Keeps the slot as `<dir>/oshikko_entries.json`.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            path: dir.join(format!("{EVENTS_SLOT}.json")),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventStorage for JsonFileStorage {
    async fn load(&self) -> Result<Vec<Event>> {
        async fn read(path: &Path) -> std::result::Result<String, std::io::Error> {
            let mut file = File::open(path).await?;
            file.lock_shared()?;
            let mut content = String::new();
            let result = file.read_to_string(&mut content).await;
            file.unlock_async().await?;
            result?;
            Ok(content)
        }

        debug!("Loading events from {:?}", self.path);
        let content = match read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e).with_context(|| format!("Failed to read {:?}", self.path)),
        };

        if content.trim().is_empty() {
            return Ok(vec![]);
        }

        parse_events(&content).with_context(|| format!("Slot {:?} is not a JSON array", self.path))
    }

    async fn save(&self, events: &[Event]) -> Result<()> {
        let buffer = serde_json::to_vec(events)?;

        let mut file = File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open {:?}", self.path))?;

        // Truncating only once the lock is held, so readers never see a half written array.
        file.lock_exclusive()?;
        let result = async {
            file.set_len(0).await?;
            file.rewind().await?;
            file.write_all(&buffer).await?;
            file.flush().await?;
            file.sync_data().await
        }
        .await;
        file.unlock_async().await?;
        result?;

        debug!("Saved {} events into {:?}", events.len(), self.path);
        Ok(())
    }
}

/// Parses the slot content. Individual records that can't be read are skipped.
fn parse_events(content: &str) -> Result<Vec<Event>> {
    let values = serde_json::from_str::<Vec<serde_json::Value>>(content)?;
    let mut events = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<Event>(value.clone()) {
            Ok(event) => events.push(event),
            Err(e) => {
                warn!("Skipping illegal event record {value}: {e}")
            }
        }
    }
    Ok(events)
}
