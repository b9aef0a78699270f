use tahfeez_core::{AppError, AppResult, Locale};

use crate::error_messages::user_facing_message;

/// Independently loaded piece of page state.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<T> {
    /// Last successfully loaded value.
    pub data: Option<T>,
    /// Whether a load is in flight.
    pub loading: bool,
    /// Message of the last failed load.
    pub error: Option<String>,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> Slice<T> {
    /// Marks a load as started.
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Runs a load and records its outcome as soon as it resolves.
    pub async fn load(
        &mut self,
        load: impl Future<Output = AppResult<T>>,
        locale: Locale,
    ) -> Option<AppError> {
        self.begin();
        self.settle(load.await, locale)
    }

    /// Records the outcome of a load and hands back the error, if any.
    ///
    /// A failed load keeps the previous data.
    pub fn settle(&mut self, result: AppResult<T>, locale: Locale) -> Option<AppError> {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                None
            }
            Err(error) => {
                self.error = Some(user_facing_message(&error, locale));
                Some(error)
            }
        }
    }
}
