//! Core record types for truck-inventory.
//!
//! This module defines the truck record kept in the inventory, along with its
//! validated identifier and the fixed set of manufacturers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::validation::{check_id_format, FieldError};

/// Date format used when storing and displaying purchase dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Manufacturer of a truck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Make {
    /// BelAZ mining dump trucks.
    Belaz,
    /// Caterpillar.
    Caterpillar,
    /// Komatsu.
    Komatsu,
}

impl Make {
    /// Every make, in the order offered to the user.
    pub const ALL: [Make; 3] = [Make::Belaz, Make::Caterpillar, Make::Komatsu];

    /// The display and storage name of this make.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Belaz => "Belaz",
            Self::Caterpillar => "Caterpillar",
            Self::Komatsu => "Komatsu",
        }
    }
}

impl fmt::Display for Make {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Make {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|make| make.as_str().eq_ignore_ascii_case(s))
            .ok_or(FieldError::MakeRequired)
    }
}

/// A truck identifier: three uppercase letters followed by three digits.
///
/// Holding a `TruckId` means the format has already been checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TruckId(String);

impl TruckId {
    /// Parse and validate an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::IdRequired`] for empty input and
    /// [`FieldError::IdFormat`] when the input is not `AAA111`-shaped.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        check_id_format(raw)?;
        Ok(Self(raw.to_string()))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TruckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TruckId {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TruckId {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        check_id_format(&value)?;
        Ok(Self(value))
    }
}

impl From<TruckId> for String {
    fn from(id: TruckId) -> Self {
        id.0
    }
}

impl AsRef<str> for TruckId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TruckId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TruckId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A heavy truck in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Truck {
    /// Manufacturer.
    pub make: Make,

    /// Unique identifier, also the lookup key for edits and deletes.
    pub id: TruckId,

    /// Whether the truck is currently available.
    #[serde(default)]
    pub is_available: bool,

    /// Calendar date of purchase.
    #[serde(with = "iso_date")]
    pub purchase_date: NaiveDate,
}

impl Truck {
    /// Create a new truck record.
    #[must_use]
    pub fn new(id: TruckId, make: Make, is_available: bool, purchase_date: NaiveDate) -> Self {
        Self {
            make,
            id,
            is_available,
            purchase_date,
        }
    }

    /// Availability as shown in listings.
    #[must_use]
    pub fn availability_label(&self) -> &'static str {
        if self.is_available {
            "yes"
        } else {
            "no"
        }
    }

    /// Purchase date formatted as an ISO-8601 calendar date.
    #[must_use]
    pub fn purchase_date_label(&self) -> String {
        self.purchase_date.format(DATE_FORMAT).to_string()
    }
}

/// Parse a purchase date.
///
/// Accepts a plain `YYYY-MM-DD` date, or a full RFC 3339 timestamp as written
/// by the browser version of the inventory, in which case the local calendar
/// date is kept.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Local).date_naive())
    })
}

/// Serde adapter storing a `NaiveDate` as `YYYY-MM-DD`.
mod iso_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{parse_date, DATE_FORMAT};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid purchase date: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{SecondsFormat, TimeZone, Utc};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_truck() -> Truck {
        Truck::new(
            TruckId::parse("ABC123").unwrap(),
            Make::Komatsu,
            true,
            date(2024, 5, 1),
        )
    }

    #[test]
    fn test_make_display() {
        assert_eq!(Make::Belaz.to_string(), "Belaz");
        assert_eq!(Make::Caterpillar.to_string(), "Caterpillar");
        assert_eq!(Make::Komatsu.to_string(), "Komatsu");
    }

    #[test]
    fn test_make_from_str_ignores_case() {
        assert_eq!("komatsu".parse::<Make>().unwrap(), Make::Komatsu);
        assert_eq!("BELAZ".parse::<Make>().unwrap(), Make::Belaz);
        assert_eq!(
            "Volvo".parse::<Make>().unwrap_err(),
            FieldError::MakeRequired
        );
    }

    #[test]
    fn test_truck_id_parse() {
        let id = TruckId::parse("ABC123").unwrap();
        assert_eq!(id.as_str(), "ABC123");
        assert_eq!(id, "ABC123");
    }

    #[test]
    fn test_truck_id_rejects_bad_input() {
        assert_eq!(TruckId::parse("").unwrap_err(), FieldError::IdRequired);
        assert_eq!(TruckId::parse("xyz999").unwrap_err(), FieldError::IdFormat);
        assert_eq!(TruckId::parse("AB1234").unwrap_err(), FieldError::IdFormat);
        assert_eq!(TruckId::parse("ABC1234").unwrap_err(), FieldError::IdFormat);
    }

    #[test]
    fn test_truck_serializes_plain_date() {
        let json = serde_json::to_string(&sample_truck()).unwrap();
        assert_eq!(
            json,
            r#"{"make":"Komatsu","id":"ABC123","is_available":true,"purchase_date":"2024-05-01"}"#
        );
    }

    #[test]
    fn test_truck_deserializes_browser_timestamp() {
        let json = r#"{"make":"Belaz","id":"BEL001","is_available":false,"purchase_date":"2021-11-30T12:00:00.000Z"}"#;
        let truck: Truck = serde_json::from_str(json).unwrap();
        assert_eq!(truck.purchase_date, date(2021, 11, 30));
        assert_eq!(truck.make, Make::Belaz);
    }

    #[test]
    fn test_browser_local_midnight_keeps_picked_day() {
        // A date picker hands back local midnight, stored as a UTC instant.
        let picked = date(2024, 5, 1);
        let midnight = Local
            .from_local_datetime(&picked.and_hms_opt(0, 0, 0).unwrap())
            .earliest()
            .unwrap();
        let stored = midnight.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true);

        assert_eq!(parse_date(&stored), Some(picked));

        let json = format!(
            r#"{{"make":"Komatsu","id":"ABC123","is_available":true,"purchase_date":"{stored}"}}"#
        );
        let truck: Truck = serde_json::from_str(&json).unwrap();
        assert_eq!(truck.purchase_date, picked);
        assert_eq!(truck.purchase_date_label(), "2024-05-01");
    }

    #[test]
    fn test_truck_deserialize_defaults_availability() {
        let json = r#"{"make":"Belaz","id":"BEL001","purchase_date":"2021-11-30"}"#;
        let truck: Truck = serde_json::from_str(json).unwrap();
        assert!(!truck.is_available);
    }

    #[test]
    fn test_truck_deserialize_rejects_bad_id() {
        let json = r#"{"make":"Belaz","id":"abc123","is_available":true,"purchase_date":"2021-11-30"}"#;
        let err = serde_json::from_str::<Truck>(json).unwrap_err();
        assert!(err.to_string().contains("format AAA111"));
    }

    #[test]
    fn test_truck_deserialize_rejects_null_make() {
        let json = r#"{"make":null,"id":"ABC123","is_available":true,"purchase_date":"2021-11-30"}"#;
        assert!(serde_json::from_str::<Truck>(json).is_err());
    }

    #[test]
    fn test_truck_deserialize_rejects_bad_date() {
        let json = r#"{"make":"Komatsu","id":"ABC123","is_available":true,"purchase_date":"not a date"}"#;
        let err = serde_json::from_str::<Truck>(json).unwrap_err();
        assert!(err.to_string().contains("invalid purchase date"));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-05-01"), Some(date(2024, 5, 1)));
        assert_eq!(
            parse_date("2024-05-01T12:00:00+00:00"),
            Some(date(2024, 5, 1))
        );
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_labels() {
        let mut truck = sample_truck();
        assert_eq!(truck.availability_label(), "yes");
        assert_eq!(truck.purchase_date_label(), "2024-05-01");
        truck.is_available = false;
        assert_eq!(truck.availability_label(), "no");
    }
}
