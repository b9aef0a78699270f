use async_trait::async_trait;
use tahfeez_core::AppResult;

/// Storage key of the persisted admin session.
pub const SESSION_STORAGE_KEY: &str = "admin-auth";
/// Storage key of the persisted interface language.
pub const LOCALE_STORAGE_KEY: &str = "locale";

/// Port for blocking user alerts.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Shows a message and returns once it has been acknowledged.
    async fn alert(&self, message: &str);
}

/// Port for blocking yes/no prompts.
#[async_trait]
pub trait Confirmation: Send + Sync {
    /// Asks the user to confirm and returns their answer.
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Port for small string values persisted between runs.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Loads the value stored under `key`.
    async fn load(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn save(&self, key: &str, value: &str) -> AppResult<()>;

    /// Removes the value stored under `key`; missing keys are not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;
}
