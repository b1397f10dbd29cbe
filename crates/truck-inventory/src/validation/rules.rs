//! Field rules for truck records.
//!
//! This module holds the id pattern and the per-field errors reported back
//! to whoever is filling in the form.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Pattern every truck id must match.
pub const ID_PATTERN: &str = r"^[A-Z]{3}[0-9]{3}$";

/// A form field that can carry an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The truck id.
    Id,
    /// The manufacturer.
    Make,
    /// The purchase date.
    PurchaseDate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => write!(f, "id"),
            Self::Make => write!(f, "make"),
            Self::PurchaseDate => write!(f, "purchase_date"),
        }
    }
}

/// Why a single field was rejected.
///
/// The display text is the message shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FieldError {
    /// No id was entered.
    #[error("Please enter id.")]
    IdRequired,

    /// The id is not three letters followed by three digits.
    #[error("Id should be in the format AAA111, where A is a letter and 1 is a digit.")]
    IdFormat,

    /// Another truck already uses this id.
    #[error("This id is occupied, please enter a new id.")]
    IdOccupied,

    /// No make was selected.
    #[error("Please select a maker.")]
    MakeRequired,

    /// No purchase date was selected.
    #[error("Please select a purchase date.")]
    PurchaseDateRequired,
}

impl FieldError {
    /// The field this error belongs to.
    #[must_use]
    pub fn field(&self) -> Field {
        match self {
            Self::IdRequired | Self::IdFormat | Self::IdOccupied => Field::Id,
            Self::MakeRequired => Field::Make,
            Self::PurchaseDateRequired => Field::PurchaseDate,
        }
    }
}

fn id_regex() -> &'static Regex {
    static ID_REGEX: OnceLock<Regex> = OnceLock::new();
    ID_REGEX.get_or_init(|| Regex::new(ID_PATTERN).expect("Invalid id pattern"))
}

/// Check that `raw` is a well-formed truck id.
///
/// # Errors
///
/// Returns [`FieldError::IdRequired`] for empty input and
/// [`FieldError::IdFormat`] when the pattern does not match.
pub fn check_id_format(raw: &str) -> Result<(), FieldError> {
    if raw.is_empty() {
        return Err(FieldError::IdRequired);
    }
    if !id_regex().is_match(raw) {
        return Err(FieldError::IdFormat);
    }
    Ok(())
}
