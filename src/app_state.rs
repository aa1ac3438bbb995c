//! Implements a struct that holds the state of the REST server.

use crate::{
    Error,
    store::{SharedSheetStore, SheetStore, share},
    timezone::get_local_offset,
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The transactions sheet, shared by every handler.
    pub store: SharedSheetStore,
}

impl AppState {
    /// Create a new [AppState] around the transactions sheet `store`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(store: impl SheetStore + Send + 'static, local_timezone: &str) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            store: share(store),
        })
    }
}
