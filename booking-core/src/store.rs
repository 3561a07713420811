//! Session state that survives page navigation.
//!
//! Two named stores hold the booking and the confirmation records in a
//! `{"state": {...}, "version": 0}` envelope, next to two plain JSON-string
//! entries for the customer's email and name.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::payment::ConfirmData;
use crate::submission::BookingData;

pub const BOOKING_STORAGE_KEY: &str = "booking-storage";
pub const CONFIRM_STORAGE_KEY: &str = "confirm-storage";
pub const CUSTOMER_EMAIL_KEY: &str = "customerEmail";
pub const CUSTOMER_FULLNAME_KEY: &str = "customerFullname";

const STORE_VERSION: u32 = 0;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage rejected write to {0}")]
    Rejected(&'static str),
}

/// The backing storage refused a write, e.g. because its quota is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("storage refused the write")]
pub struct WriteRejected;

/// String key-value storage such as the browser's `localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), WriteRejected>;
    fn remove_item(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), WriteRejected> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), WriteRejected> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) {
        (**self).remove_item(key)
    }
}

#[derive(Serialize, Deserialize)]
struct Persisted<T> {
    state: T,
    #[serde(default)]
    version: u32,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct BookingSlot {
    #[serde(default)]
    booking_data: Option<BookingData>,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfirmSlot {
    #[serde(default)]
    confirm_data: Option<ConfirmData>,
}

fn read_json<T: DeserializeOwned>(storage: &impl KeyValueStore, key: &str) -> Option<T> {
    storage
        .get_item(key)
        .and_then(|raw| serde_json::from_str(&raw).ok())
}

fn write_json<T: Serialize>(
    storage: &impl KeyValueStore,
    key: &'static str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode { key, source })?;
    storage
        .set_item(key, &raw)
        .map_err(|_| StoreError::Rejected(key))
}

/// Customer identity carried from submission to the payment check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerContact {
    pub email: String,
    pub fullname: String,
}

/// Where a page sends the customer when the step before it never happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    ToHall,
}

impl Redirect {
    pub fn path(&self) -> &'static str {
        match self {
            Redirect::ToHall => "/hall",
        }
    }
}

/// Gate for pages that need a record from an earlier step.
pub fn require<T>(record: Option<T>) -> Result<T, Redirect> {
    record.ok_or(Redirect::ToHall)
}

/// In-memory view of the persisted stores. Only the setters below mutate it,
/// and each one writes through to storage.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    booking: Option<BookingData>,
    confirm: Option<ConfirmData>,
    customer: Option<CustomerContact>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Loads whatever the storage holds. Unreadable entries count as absent.
    pub fn restore(storage: S) -> Self {
        let booking = read_json::<Persisted<BookingSlot>>(&storage, BOOKING_STORAGE_KEY)
            .and_then(|persisted| persisted.state.booking_data);
        let confirm = read_json::<Persisted<ConfirmSlot>>(&storage, CONFIRM_STORAGE_KEY)
            .and_then(|persisted| persisted.state.confirm_data);

        let email = read_json::<String>(&storage, CUSTOMER_EMAIL_KEY);
        let fullname = read_json::<String>(&storage, CUSTOMER_FULLNAME_KEY);
        let customer = match (email, fullname) {
            (None, None) => None,
            (email, fullname) => Some(CustomerContact {
                email: email.unwrap_or_default(),
                fullname: fullname.unwrap_or_default(),
            }),
        };

        Self {
            storage,
            booking,
            confirm,
            customer,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn booking(&self) -> Option<&BookingData> {
        self.booking.as_ref()
    }

    pub fn confirm(&self) -> Option<&ConfirmData> {
        self.confirm.as_ref()
    }

    /// Missing entries read as empty strings.
    pub fn customer(&self) -> CustomerContact {
        self.customer.clone().unwrap_or_default()
    }

    pub fn require_booking(&self) -> Result<&BookingData, Redirect> {
        require(self.booking.as_ref())
    }

    pub fn require_confirm(&self) -> Result<&ConfirmData, Redirect> {
        require(self.confirm.as_ref())
    }

    pub fn set_booking(&mut self, data: BookingData) -> Result<(), StoreError> {
        self.write_booking(Some(data))
    }

    pub fn clear_booking(&mut self) {
        if self.write_booking(None).is_err() {
            self.storage.remove_item(BOOKING_STORAGE_KEY);
            self.booking = None;
        }
    }

    pub fn set_confirm(&mut self, data: ConfirmData) -> Result<(), StoreError> {
        self.write_confirm(Some(data))
    }

    pub fn clear_confirm(&mut self) {
        if self.write_confirm(None).is_err() {
            self.storage.remove_item(CONFIRM_STORAGE_KEY);
            self.confirm = None;
        }
    }

    pub fn set_customer(&mut self, contact: CustomerContact) -> Result<(), StoreError> {
        write_json(&self.storage, CUSTOMER_EMAIL_KEY, &contact.email)?;
        if let Err(error) = write_json(&self.storage, CUSTOMER_FULLNAME_KEY, &contact.fullname) {
            self.storage.remove_item(CUSTOMER_EMAIL_KEY);
            self.customer = None;
            return Err(error);
        }
        self.customer = Some(contact);
        Ok(())
    }

    pub fn clear_customer(&mut self) {
        self.storage.remove_item(CUSTOMER_EMAIL_KEY);
        self.storage.remove_item(CUSTOMER_FULLNAME_KEY);
        self.customer = None;
    }

    /// Customer backed out on the transfer page.
    pub fn cancel(&mut self) {
        self.clear_booking();
        self.clear_customer();
    }

    /// Payment check came back: keep the summary, drop the intermediate state.
    pub fn finish_confirmation(&mut self, confirm: ConfirmData) -> Result<(), StoreError> {
        self.set_confirm(confirm)?;
        self.clear_booking();
        self.clear_customer();
        Ok(())
    }

    /// Leaves nothing behind, as when the customer returns to the hall after confirming.
    pub fn reset(&mut self) {
        for key in [
            BOOKING_STORAGE_KEY,
            CONFIRM_STORAGE_KEY,
            CUSTOMER_EMAIL_KEY,
            CUSTOMER_FULLNAME_KEY,
        ] {
            self.storage.remove_item(key);
        }
        self.booking = None;
        self.confirm = None;
        self.customer = None;
    }

    fn write_booking(&mut self, booking_data: Option<BookingData>) -> Result<(), StoreError> {
        let persisted = Persisted {
            state: BookingSlot { booking_data },
            version: STORE_VERSION,
        };
        write_json(&self.storage, BOOKING_STORAGE_KEY, &persisted)?;
        self.booking = persisted.state.booking_data;
        Ok(())
    }

    fn write_confirm(&mut self, confirm_data: Option<ConfirmData>) -> Result<(), StoreError> {
        let persisted = Persisted {
            state: ConfirmSlot { confirm_data },
            version: STORE_VERSION,
        };
        write_json(&self.storage, CONFIRM_STORAGE_KEY, &persisted)?;
        self.confirm = persisted.state.confirm_data;
        Ok(())
    }
}
