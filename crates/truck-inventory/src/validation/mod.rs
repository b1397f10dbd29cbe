//! Validation of truck form input.
//!
//! Every create or edit goes through here before reaching the record store:
//!
//! - **Id format**: three uppercase letters followed by three digits (`ABC123`).
//!
//! - **Id uniqueness**: no other truck may use the id. When editing, the record
//!   being edited does not count, so saving without changing the id is valid.
//!
//! - **Required fields**: make and purchase date must be selected. Availability
//!   defaults to unchecked.
//!
//! # Example
//!
//! ```
//! use truck_inventory::collection::Collection;
//! use truck_inventory::validation::{Field, FieldError, TruckForm};
//!
//! let form = TruckForm {
//!     id: "xyz999".to_string(),
//!     ..TruckForm::default()
//! };
//!
//! let errors = form.validate(&Collection::new(), None).unwrap_err();
//! assert_eq!(errors.for_field(Field::Id), Some(FieldError::IdFormat));
//! assert_eq!(errors.for_field(Field::Make), Some(FieldError::MakeRequired));
//! ```

mod form;
mod rules;

pub use form::{check_id, TruckForm, ValidationErrors};
pub use rules::{check_id_format, Field, FieldError, ID_PATTERN};
