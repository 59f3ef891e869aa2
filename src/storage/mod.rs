//!  Storage is organized through [event_store::EventStore].
//!  The basic idea is:
//!   - All events live in a single named slot, a JSON array on disk.
//!   - The slot is loaded once, [event_store::EventStore] owns the in-memory collection and
//!     writes the whole array back after every change.
//!   - Aggregation only ever sees an immutable snapshot of the collection.

pub mod entities;
pub mod event_storage;
pub mod event_store;
