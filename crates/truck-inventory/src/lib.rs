//! `truck-inventory` - Heavy truck inventory with a validated, persisted record store
//!
//! This library holds the truck records, enforces the id and required-field
//! rules, and mirrors the whole collection into a single named storage slot
//! after every change.
//!
//! # Example
//!
//! ```
//! use truck_inventory::{FormSession, MemorySlots, RecordStore, TruckForm, Make};
//!
//! let mut store = RecordStore::open(MemorySlots::new(), "trucks");
//! let mut session = FormSession::new();
//!
//! let mut form: TruckForm = session.open_create();
//! form.id = "ABC123".to_string();
//! form.make = Some(Make::Komatsu);
//!
//! let notice = session.submit(&mut store, &form).unwrap();
//! assert_eq!(notice.to_string(), "Truck #ABC123 is saved successfully!");
//! assert_eq!(store.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod collection;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod storage;
pub mod store;
pub mod truck;
pub mod validation;

pub use collection::Collection;
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use session::{DeleteConfirmation, FormSession, FormState, Notice};
pub use storage::{MemorySlots, SlotStorage, SqliteSlots};
pub use store::{LoadOutcome, RecordStore};
pub use truck::{Make, Truck, TruckId};
pub use validation::{FieldError, TruckForm, ValidationErrors};
