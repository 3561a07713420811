use booking_core::{
    BookingData, ConfirmData, CustomerContact, KeyValueStore, SessionStore, StoreError,
    WriteRejected,
};
use leptos::prelude::*;

/// `localStorage` in the browser. Server rendering sees an empty store.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl KeyValueStore for BrowserStorage {
    #[cfg(feature = "hydrate")]
    fn get_item(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    #[cfg(not(feature = "hydrate"))]
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    #[cfg(feature = "hydrate")]
    fn set_item(&self, key: &str, value: &str) -> Result<(), WriteRejected> {
        let storage = local_storage().ok_or(WriteRejected)?;
        storage.set_item(key, value).map_err(|_| WriteRejected)
    }

    #[cfg(not(feature = "hydrate"))]
    fn set_item(&self, _key: &str, _value: &str) -> Result<(), WriteRejected> {
        Ok(())
    }

    #[cfg(feature = "hydrate")]
    fn remove_item(&self, key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }

    #[cfg(not(feature = "hydrate"))]
    fn remove_item(&self, _key: &str) {}
}

/// App-wide session: the persisted stores plus signals the pages render from.
///
/// `restored` flips once the browser storage has been read. Route guards wait for it
/// so a reload on `/transfer` doesn't bounce to `/hall` before the booking is loaded.
#[derive(Clone, Copy)]
pub struct AppState {
    session: StoredValue<SessionStore<BrowserStorage>>,
    pub booking: RwSignal<Option<BookingData>>,
    pub confirm: RwSignal<Option<ConfirmData>>,
    pub restored: RwSignal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: StoredValue::new(SessionStore::restore(BrowserStorage)),
            booking: RwSignal::new(None),
            confirm: RwSignal::new(None),
            restored: RwSignal::new(false),
        }
    }

    /// Re-reads browser storage. Call once the app is running in the browser.
    pub fn restore(&self) {
        let session = SessionStore::restore(BrowserStorage);
        self.booking.set(session.booking().cloned());
        self.confirm.set(session.confirm().cloned());
        self.session.set_value(session);
        self.restored.set(true);
    }

    pub fn customer(&self) -> CustomerContact {
        self.session.with_value(|session| session.customer())
    }

    /// Records a freshly submitted booking together with who made it.
    pub fn begin_booking(
        &self,
        booking: BookingData,
        contact: CustomerContact,
    ) -> Result<(), StoreError> {
        let mut result = Ok(());
        self.session.update_value(|session| {
            result = session
                .set_customer(contact)
                .and_then(|_| session.set_booking(booking));
        });
        self.sync();
        result
    }

    pub fn cancel_booking(&self) {
        self.session.update_value(|session| session.cancel());
        self.sync();
    }

    pub fn finish_confirmation(&self, confirm: ConfirmData) -> Result<(), StoreError> {
        let mut result = Ok(());
        self.session
            .update_value(|session| result = session.finish_confirmation(confirm));
        self.sync();
        result
    }

    pub fn reset(&self) {
        self.session.update_value(|session| session.reset());
        self.sync();
    }

    fn sync(&self) {
        let (booking, confirm) = self.session.with_value(|session| {
            (session.booking().cloned(), session.confirm().cloned())
        });
        self.booking.set(booking);
        self.confirm.set(confirm);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}

/// Best-effort clipboard write; failures are ignored.
pub fn copy_to_clipboard(text: &str) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::prelude::*;

        #[wasm_bindgen]
        extern "C" {
            #[wasm_bindgen(js_namespace = ["navigator", "clipboard"], js_name = writeText)]
            fn write_text(text: &str) -> JsValue;
        }

        let _ = write_text(text);
    }

    #[cfg(not(feature = "hydrate"))]
    let _ = text;
}
