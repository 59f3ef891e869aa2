use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::utils::clock::Clock;

use super::{
    entities::{Event, EventDraft},
    event_storage::EventStorage,
};

/// Owner of the authoritative event collection. Bridges user submissions and [EventStorage],
/// everything else reads the collection through [EventStore::events].
pub struct EventStore<S: EventStorage> {
    storage: S,
    events: Vec<Event>,
    date_provider: Box<dyn Clock>,
}

impl<S: EventStorage> EventStore<S> {
    /// Loads the collection once. Later changes are written back through the same storage.
    pub async fn open(storage: S, date_provider: Box<dyn Clock>) -> Result<Self> {
        let events = storage.load().await?;
        debug!("Loaded {} events", events.len());
        Ok(Self {
            storage,
            events,
            date_provider,
        })
    }

    /// Immutable snapshot handed to aggregation.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Creates an event from the draft and persists the collection. Newest events are kept at the
    /// front.
    #[instrument(skip(self))]
    pub async fn add(&mut self, draft: EventDraft) -> Result<Event> {
        let now = self.date_provider.time();
        let event = Event {
            id: self.next_id(now),
            timestamp: draft.timestamp.unwrap_or(now),
            amount: draft.amount,
            urgency: draft.urgency,
        };

        self.events.insert(0, event.clone());
        if let Err(e) = self.storage.save(&self.events).await {
            self.events.remove(0);
            return Err(e);
        }
        info!("Added event {}", event.id);
        Ok(event)
    }

    /// Removes the event with the given id. Returns the removed event, or [None] when nothing
    /// matched, in which case storage isn't touched.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: &str) -> Result<Option<Event>> {
        let Some(index) = self.events.iter().position(|e| e.id == id) else {
            debug!("No event with id {id}");
            return Ok(None);
        };

        let removed = self.events.remove(index);
        if let Err(e) = self.storage.save(&self.events).await {
            self.events.insert(index, removed);
            return Err(e);
        }
        info!("Deleted event {id}");
        Ok(Some(removed))
    }

    /// Ids are creation times in epoch milliseconds, moved forward until unique.
    fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut millis = now.timestamp_millis();
        loop {
            let id = millis.to_string();
            if self.get(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }
}
