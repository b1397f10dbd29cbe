//! Form and delete-confirmation state for one user at a time.
//!
//! A [`FormSession`] walks `Idle → Editing → Idle`. Submitting validates the
//! form against the store and only touches the collection once every field
//! passes. A [`DeleteConfirmation`] makes sure a delete only happens after an
//! explicit confirm.

use std::fmt;

use chrono::Local;
use tracing::debug;

use crate::error::{Error, Result};
use crate::storage::SlotStorage;
use crate::store::RecordStore;
use crate::truck::TruckId;
use crate::validation::{check_id, FieldError, TruckForm};

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    /// No form open.
    #[default]
    Idle,
    /// A form is open. `target` is the id being edited, `None` when creating.
    Editing {
        /// Record under edit.
        target: Option<TruckId>,
    },
}

/// Short confirmation shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A new truck was stored.
    Saved(TruckId),
    /// An existing truck was replaced.
    Updated(TruckId),
    /// A truck was removed.
    Deleted(TruckId),
    /// The truck asked for is no longer there.
    Missing(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved(id) => write!(f, "Truck #{id} is saved successfully!"),
            Self::Updated(id) => write!(f, "Truck #{id} is updated successfully!"),
            Self::Deleted(id) => write!(f, "Truck #{id} is deleted!"),
            Self::Missing(id) => write!(f, "Truck #{id} no longer exists."),
        }
    }
}

/// Create/edit form state.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    state: FormState,
}

impl FormSession {
    /// A session with no form open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// The id under edit, if editing an existing record.
    #[must_use]
    pub fn target(&self) -> Option<&TruckId> {
        match &self.state {
            FormState::Editing { target } => target.as_ref(),
            FormState::Idle => None,
        }
    }

    /// Open a blank form for a new truck, dated today.
    pub fn open_create(&mut self) -> TruckForm {
        self.state = FormState::Editing { target: None };
        TruckForm {
            purchase_date: Some(Local::now().date_naive()),
            ..TruckForm::default()
        }
    }

    /// Open the form on an existing truck.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `id` is no longer in the store; the
    /// session stays as it was.
    pub fn open_edit<S: SlotStorage>(
        &mut self,
        store: &RecordStore<S>,
        id: &str,
    ) -> Result<TruckForm> {
        let truck = store.get(id).ok_or_else(|| Error::not_found(id))?;
        self.state = FormState::Editing {
            target: Some(truck.id.clone()),
        };
        Ok(TruckForm::from_truck(truck))
    }

    /// Check an id while it is being typed.
    ///
    /// # Errors
    ///
    /// Returns the field error to show under the id input.
    pub fn check_id<S: SlotStorage>(
        &self,
        store: &RecordStore<S>,
        raw: &str,
    ) -> std::result::Result<TruckId, FieldError> {
        check_id(raw, store.collection(), self.target())
    }

    /// Validate and save the form.
    ///
    /// Submitting while idle is treated as creating a new truck. On success the
    /// session returns to idle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] with every failing field, leaving the
    /// session editing and the store untouched. Returns [`Error::NotFound`]
    /// when the record under edit has disappeared; the session then goes
    /// back to idle.
    pub fn submit<S: SlotStorage>(
        &mut self,
        store: &mut RecordStore<S>,
        form: &TruckForm,
    ) -> Result<Notice> {
        let target = self.target().cloned();
        let truck = form.validate(store.collection(), target.as_ref())?;
        let id = truck.id.clone();

        let notice = match target {
            None => {
                store.insert(truck)?;
                Notice::Saved(id)
            }
            Some(target) => {
                if let Err(e) = store.update(target.as_str(), truck) {
                    if e.is_not_found() {
                        self.state = FormState::Idle;
                    }
                    return Err(e);
                }
                Notice::Updated(id)
            }
        };

        debug!(%notice, "Form submitted");
        self.state = FormState::Idle;
        Ok(notice)
    }

    /// Close the form without saving.
    pub fn cancel(&mut self) {
        self.state = FormState::Idle;
    }
}

/// Two-step delete: request, then confirm or dismiss.
#[derive(Debug, Clone, Default)]
pub struct DeleteConfirmation {
    pending: Option<String>,
}

impl DeleteConfirmation {
    /// Nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask to delete `id`. Replaces any earlier request.
    pub fn request(&mut self, id: impl Into<String>) {
        self.pending = Some(id.into());
    }

    /// The id waiting for confirmation.
    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// The question to put to the user.
    #[must_use]
    pub fn prompt(&self) -> Option<String> {
        self.pending
            .as_ref()
            .map(|id| format!("Are you sure you want to delete the truck #{id}?"))
    }

    /// Drop the request.
    pub fn dismiss(&mut self) {
        self.pending = None;
    }

    /// Carry out the pending delete.
    ///
    /// Returns `None` when nothing was requested.
    pub fn confirm<S: SlotStorage>(&mut self, store: &mut RecordStore<S>) -> Option<Notice> {
        let id = self.pending.take()?;
        Some(match store.delete(&id) {
            Some(truck) => Notice::Deleted(truck.id),
            None => Notice::Missing(id),
        })
    }
}
