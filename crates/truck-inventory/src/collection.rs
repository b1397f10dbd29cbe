//! The ordered, id-unique collection of trucks.
//!
//! Insertion order is kept as-is; nothing is ever sorted. The collection is the
//! unit of persistence: it is always serialized and stored whole.

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::truck::Truck;

/// Ordered trucks with no two sharing an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Collection {
    trucks: Vec<Truck>,
}

impl Collection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from trucks in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] if two trucks share an id.
    pub fn from_trucks(trucks: Vec<Truck>) -> Result<Self> {
        let mut collection = Self::new();
        for truck in trucks {
            collection.insert(truck)?;
        }
        Ok(collection)
    }

    /// Append a truck at the end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] if a truck with the same id is already
    /// present. The collection is left unchanged.
    pub fn insert(&mut self, truck: Truck) -> Result<()> {
        if self.contains(truck.id.as_str()) {
            return Err(Error::duplicate_id(truck.id));
        }
        debug!(id = %truck.id, "Inserting truck");
        self.trucks.push(truck);
        Ok(())
    }

    /// Replace the truck with id `id`, keeping its position.
    ///
    /// The replacement may carry a new id as long as no other truck uses it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no truck has id `id`, and
    /// [`Error::DuplicateId`] if the new id belongs to a different truck.
    /// The collection is left unchanged on error.
    pub fn update(&mut self, id: &str, truck: Truck) -> Result<()> {
        let index = self.position(id).ok_or_else(|| Error::not_found(id))?;
        if !self.is_unique(truck.id.as_str(), Some(id)) {
            return Err(Error::duplicate_id(truck.id));
        }
        debug!(id, new_id = %truck.id, index, "Updating truck");
        self.trucks[index] = truck;
        Ok(())
    }

    /// Remove the truck with id `id`.
    ///
    /// Returns the removed truck, or `None` if it was not present, in which
    /// case the collection is unchanged.
    pub fn delete(&mut self, id: &str) -> Option<Truck> {
        let index = self.position(id)?;
        debug!(id, index, "Deleting truck");
        Some(self.trucks.remove(index))
    }

    /// Check whether `id` is free.
    ///
    /// With `exclude_current` set, the truck carrying that id is ignored, so
    /// an edit that keeps its own id is still unique.
    #[must_use]
    pub fn is_unique(&self, id: &str, exclude_current: Option<&str>) -> bool {
        exclude_current == Some(id) || !self.contains(id)
    }

    /// Check whether a truck with `id` is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Get the truck with `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Truck> {
        self.trucks.iter().find(|truck| truck.id == id)
    }

    /// Index of the truck with `id`.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.trucks.iter().position(|truck| truck.id == id)
    }

    /// Number of trucks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trucks.len()
    }

    /// True if there are no trucks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trucks.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Truck> {
        self.trucks.iter()
    }

    /// The trucks as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Truck] {
        &self.trucks
    }

    /// Serialize to the JSON text kept in the storage slot.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse JSON text produced by [`Collection::serialize`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] for invalid JSON, a missing or invalid field,
    /// an unparseable date, or two trucks sharing an id.
    pub fn deserialize(raw: &str) -> Result<Self> {
        let trucks: Vec<Truck> =
            serde_json::from_str(raw).map_err(|e| Error::decode(e.to_string()))?;
        Self::from_trucks(trucks).map_err(|e| Error::decode(e.to_string()))
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Truck;
    type IntoIter = std::slice::Iter<'a, Truck>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
