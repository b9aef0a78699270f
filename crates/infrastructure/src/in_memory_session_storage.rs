use std::collections::HashMap;

use async_trait::async_trait;
use tahfeez_application::SessionStorage;
use tahfeez_core::AppResult;
use tokio::sync::Mutex;

/// Session storage that lives only as long as the process.
#[derive(Default)]
pub struct InMemorySessionStorage {
    values: Mutex<HashMap<String, String>>,
}

impl InMemorySessionStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn load(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> AppResult<()> {
        self.values
            .lock()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tahfeez_application::SessionStorage;

    use super::InMemorySessionStorage;

    #[tokio::test]
    async fn save_replaces_and_remove_forgets() {
        let storage = InMemorySessionStorage::new();

        assert!(storage.save("locale", "ar").await.is_ok());
        assert!(storage.save("locale", "en").await.is_ok());
        assert!(matches!(storage.load("locale").await, Ok(Some(value)) if value == "en"));

        assert!(storage.remove("locale").await.is_ok());
        assert!(storage.remove("locale").await.is_ok());
        assert!(matches!(storage.load("locale").await, Ok(None)));
    }
}
