//! Form input validation.
//!
//! A [`TruckForm`] holds raw, possibly incomplete input. Validating it against
//! the current collection either yields a [`Truck`] ready to be stored or the
//! full set of per-field errors.

use std::fmt;

use chrono::NaiveDate;
use tracing::trace;

use super::rules::{Field, FieldError};
use crate::collection::Collection;
use crate::truck::{Make, Truck, TruckId};

/// Unvalidated input for creating or editing a truck.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TruckForm {
    /// Entered id.
    pub id: String,
    /// Selected make, if any.
    pub make: Option<Make>,
    /// Availability checkbox. Unchecked unless set.
    pub is_available: bool,
    /// Selected purchase date, if any.
    pub purchase_date: Option<NaiveDate>,
}

impl TruckForm {
    /// A form populated from an existing record, as used when editing.
    #[must_use]
    pub fn from_truck(truck: &Truck) -> Self {
        Self {
            id: truck.id.to_string(),
            make: Some(truck.make),
            is_available: truck.is_available,
            purchase_date: Some(truck.purchase_date),
        }
    }

    /// Validate every field against `collection`.
    ///
    /// `editing` is the id of the record being edited; that record does not
    /// count against uniqueness, so keeping the same id stays valid.
    ///
    /// # Errors
    ///
    /// Returns all field errors found. The collection is never touched.
    pub fn validate(
        &self,
        collection: &Collection,
        editing: Option<&TruckId>,
    ) -> Result<Truck, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let id = check_id(&self.id, collection, editing)
            .map_err(|e| errors.push(e))
            .ok();
        let make = self.make.or_else(|| {
            errors.push(FieldError::MakeRequired);
            None
        });
        let purchase_date = self.purchase_date.or_else(|| {
            errors.push(FieldError::PurchaseDateRequired);
            None
        });

        match (id, make, purchase_date) {
            (Some(id), Some(make), Some(purchase_date)) => {
                Ok(Truck::new(id, make, self.is_available, purchase_date))
            }
            _ => {
                trace!(errors = %errors, "Form rejected");
                Err(errors)
            }
        }
    }
}

/// Check an id for format and uniqueness.
///
/// This is the check run while the user is still typing, so "id occupied"
/// shows up before any save is attempted.
///
/// # Errors
///
/// Returns the first failing rule: required, format, then uniqueness.
pub fn check_id(
    raw: &str,
    collection: &Collection,
    editing: Option<&TruckId>,
) -> Result<TruckId, FieldError> {
    let id = TruckId::parse(raw)?;
    if collection.is_unique(id.as_str(), editing.map(TruckId::as_str)) {
        Ok(id)
    } else {
        Err(FieldError::IdOccupied)
    }
}

/// Per-field errors from a rejected form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Record an error.
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// True if no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The error attached to `field`, if any.
    #[must_use]
    pub fn for_field(&self, field: Field) -> Option<FieldError> {
        self.errors.iter().copied().find(|e| e.field() == field)
    }

    /// Iterate over the errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {error}", error.field())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filled_form(id: &str) -> TruckForm {
        TruckForm {
            id: id.to_string(),
            make: Some(Make::Komatsu),
            is_available: true,
            purchase_date: Some(date(2024, 5, 1)),
        }
    }

    fn collection_with(ids: &[&str]) -> Collection {
        let mut collection = Collection::new();
        for id in ids {
            let truck = filled_form(id)
                .validate(&collection, None)
                .expect("valid fixture");
            collection.insert(truck).expect("unique fixture");
        }
        collection
    }

    #[test]
    fn test_validate_complete_form() {
        let collection = Collection::new();
        let truck = filled_form("ABC123").validate(&collection, None).unwrap();

        assert_eq!(truck.id, "ABC123");
        assert_eq!(truck.make, Make::Komatsu);
        assert!(truck.is_available);
        assert_eq!(truck.purchase_date, date(2024, 5, 1));
    }

    #[test]
    fn test_validate_blank_form_reports_every_field() {
        let errors = TruckForm::default()
            .validate(&Collection::new(), None)
            .unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.for_field(Field::Id), Some(FieldError::IdRequired));
        assert_eq!(errors.for_field(Field::Make), Some(FieldError::MakeRequired));
        assert_eq!(
            errors.for_field(Field::PurchaseDate),
            Some(FieldError::PurchaseDateRequired)
        );
    }

    #[test]
    fn test_validate_lowercase_id_is_format_error() {
        let errors = filled_form("xyz999")
            .validate(&Collection::new(), None)
            .unwrap_err();
        assert_eq!(errors.for_field(Field::Id), Some(FieldError::IdFormat));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_validate_duplicate_id() {
        let collection = collection_with(&["ABC123"]);
        let errors = filled_form("ABC123").validate(&collection, None).unwrap_err();
        assert_eq!(errors.for_field(Field::Id), Some(FieldError::IdOccupied));
    }

    #[test]
    fn test_validate_edit_keeps_own_id() {
        let collection = collection_with(&["ABC123"]);
        let current = TruckId::parse("ABC123").unwrap();
        let mut form = filled_form("ABC123");
        form.is_available = false;

        let truck = form.validate(&collection, Some(&current)).unwrap();
        assert!(!truck.is_available);
    }

    #[test]
    fn test_validate_edit_cannot_take_other_id() {
        let collection = collection_with(&["ABC123", "DEF456"]);
        let current = TruckId::parse("ABC123").unwrap();
        let errors = filled_form("DEF456")
            .validate(&collection, Some(&current))
            .unwrap_err();
        assert_eq!(errors.for_field(Field::Id), Some(FieldError::IdOccupied));
    }

    #[test]
    fn test_availability_defaults_to_false() {
        let form = TruckForm {
            id: "ABC123".to_string(),
            make: Some(Make::Belaz),
            purchase_date: Some(date(2020, 1, 1)),
            ..TruckForm::default()
        };
        let truck = form.validate(&Collection::new(), None).unwrap();
        assert!(!truck.is_available);
    }

    #[test]
    fn test_check_id() {
        let collection = collection_with(&["ABC123"]);
        assert_eq!(check_id("ABC123", &collection, None), Err(FieldError::IdOccupied));
        assert_eq!(check_id("abc123", &collection, None), Err(FieldError::IdFormat));
        assert_eq!(check_id("", &collection, None), Err(FieldError::IdRequired));
        assert!(check_id("DEF456", &collection, None).is_ok());
    }

    #[test]
    fn test_from_truck_round_trips() {
        let truck = filled_form("ABC123")
            .validate(&Collection::new(), None)
            .unwrap();
        assert_eq!(TruckForm::from_truck(&truck), filled_form("ABC123"));
    }

    #[test]
    fn test_validation_errors_display() {
        let mut errors = ValidationErrors::default();
        errors.push(FieldError::IdFormat);
        errors.push(FieldError::MakeRequired);
        let msg = errors.to_string();
        assert!(msg.starts_with("id: Id should be in the format AAA111"));
        assert!(msg.ends_with("make: Please select a maker."));
    }
}
