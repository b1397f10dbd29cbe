//! The record store: the collection plus its persistent slot.
//!
//! The store owns the in-memory [`Collection`] and mirrors it into a single
//! slot of a [`SlotStorage`] backend. The slot is read once when the store is
//! opened and rewritten in full after every change.

use std::fmt;

use tracing::{debug, error, info, warn};

use crate::collection::Collection;
use crate::error::Result;
use crate::storage::SlotStorage;
use crate::truck::Truck;

/// Slot key used when none is configured.
pub const DEFAULT_SLOT_KEY: &str = "trucks";

/// What happened when the slot was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The slot was never written; started empty.
    Empty,
    /// The slot held this many trucks.
    Loaded(usize),
    /// The slot could not be read or parsed; started empty.
    Recovered {
        /// Why the stored data was discarded.
        reason: String,
    },
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no stored trucks"),
            Self::Loaded(count) => write!(f, "loaded {count} trucks"),
            Self::Recovered { reason } => {
                write!(f, "stored trucks unreadable, starting empty: {reason}")
            }
        }
    }
}

/// Owns the truck collection and keeps its slot up to date.
#[derive(Debug)]
pub struct RecordStore<S> {
    storage: S,
    key: String,
    collection: Collection,
    load_outcome: LoadOutcome,
}

impl<S: SlotStorage> RecordStore<S> {
    /// Open the store, hydrating the collection from slot `key`.
    ///
    /// Never fails: a missing slot gives an empty collection, and unreadable
    /// data is logged and also gives an empty collection. The unreadable data
    /// stays in the slot until the first change overwrites it.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let (collection, load_outcome) = load(&storage, &key);
        Self {
            storage,
            key,
            collection,
            load_outcome,
        }
    }

    /// How the collection was obtained when the store was opened or reloaded.
    #[must_use]
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    /// The slot key this store persists to.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing storage.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the backing storage.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// The current collection.
    #[must_use]
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// The trucks in insertion order.
    #[must_use]
    pub fn trucks(&self) -> &[Truck] {
        self.collection.as_slice()
    }

    /// Get the truck with `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Truck> {
        self.collection.get(id)
    }

    /// Number of trucks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    /// True if there are no trucks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// See [`Collection::is_unique`].
    #[must_use]
    pub fn is_unique(&self, id: &str, exclude_current: Option<&str>) -> bool {
        self.collection.is_unique(id, exclude_current)
    }

    /// Append a truck and persist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`](crate::Error::DuplicateId) if the id is
    /// taken. Nothing is changed or written in that case.
    pub fn insert(&mut self, truck: Truck) -> Result<()> {
        self.collection.insert(truck)?;
        self.persist();
        Ok(())
    }

    /// Replace the truck with `id` in place and persist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) if `id` is gone and
    /// [`Error::DuplicateId`](crate::Error::DuplicateId) if the new id belongs
    /// to another truck. Nothing is changed or written in either case.
    pub fn update(&mut self, id: &str, truck: Truck) -> Result<()> {
        self.collection.update(id, truck)?;
        self.persist();
        Ok(())
    }

    /// Remove the truck with `id` and persist.
    ///
    /// Deleting an absent id is a no-op and returns `None`.
    pub fn delete(&mut self, id: &str) -> Option<Truck> {
        let removed = self.collection.delete(id);
        if removed.is_some() {
            self.persist();
        } else {
            debug!(id, "Delete of absent truck ignored");
        }
        removed
    }

    /// Replace the whole collection and persist.
    pub fn replace_all(&mut self, collection: Collection) {
        info!(count = collection.len(), "Replacing collection");
        self.collection = collection;
        self.persist();
    }

    /// Serialize the current collection.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn serialize(&self) -> Result<String> {
        self.collection.serialize()
    }

    /// Discard in-memory state and read the slot again.
    pub fn reload(&mut self) -> &LoadOutcome {
        let (collection, outcome) = load(&self.storage, &self.key);
        self.collection = collection;
        self.load_outcome = outcome;
        &self.load_outcome
    }

    /// Write the whole collection to the slot.
    ///
    /// A failed write is logged and dropped; the in-memory collection stays
    /// authoritative for the rest of the session.
    fn persist(&mut self) {
        let written = self
            .collection
            .serialize()
            .and_then(|raw| self.storage.set(&self.key, &raw));
        match written {
            Ok(()) => debug!(key = %self.key, count = self.collection.len(), "Persisted trucks"),
            Err(e) => error!(key = %self.key, error = %e, "Failed to persist trucks"),
        }
    }
}

fn load<S: SlotStorage>(storage: &S, key: &str) -> (Collection, LoadOutcome) {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No stored trucks");
            return (Collection::new(), LoadOutcome::Empty);
        }
        Err(e) => {
            warn!(key, error = %e, "Could not read stored trucks, starting empty");
            return (
                Collection::new(),
                LoadOutcome::Recovered {
                    reason: e.to_string(),
                },
            );
        }
    };

    match Collection::deserialize(&raw) {
        Ok(collection) => {
            info!(key, count = collection.len(), "Loaded trucks");
            let count = collection.len();
            (collection, LoadOutcome::Loaded(count))
        }
        Err(e) => {
            warn!(key, error = %e, "Stored trucks are malformed, starting empty");
            (
                Collection::new(),
                LoadOutcome::Recovered {
                    reason: e.to_string(),
                },
            )
        }
    }
}
