use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tahfeez_application::SessionStorage;
use tahfeez_core::{AppError, AppResult};
use tokio::sync::Mutex;
use tracing::debug;

/// Session storage persisted as a flat JSON object in one file.
pub struct FileSessionStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStorage {
    /// Creates storage backed by `path`; the file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> AppResult<BTreeMap<String, String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(error) => {
                return Err(AppError::Storage(format!(
                    "failed to read '{}': {error}",
                    self.path.display()
                )));
            }
        };
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|error| {
            AppError::Storage(format!(
                "'{}' is not a valid session file: {error}",
                self.path.display()
            ))
        })
    }

    async fn write_entries(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|error| {
                AppError::Storage(format!(
                    "failed to create '{}': {error}",
                    parent.display()
                ))
            })?;
        }

        let contents = serde_json::to_string_pretty(entries).map_err(|error| {
            AppError::Internal(format!("failed to encode session file: {error}"))
        })?;
        tokio::fs::write(&self.path, contents).await.map_err(|error| {
            AppError::Storage(format!(
                "failed to write '{}': {error}",
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn load(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.read_entries().await?.remove(key))
    }

    async fn save(&self, key: &str, value: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_owned(), value.to_owned());
        self.write_entries(&entries).await?;
        debug!(key, path = %self.path.display(), "stored session value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(());
        }

        // A corrupt file is replaced so that signing out always succeeds.
        let mut entries = match self.read_entries().await {
            Ok(entries) => entries,
            Err(AppError::Storage(_)) => BTreeMap::new(),
            Err(error) => return Err(error),
        };
        entries.remove(key);
        self.write_entries(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tahfeez_application::{AdminStore, ApiGateway, SessionStorage, WebsiteStore};
    use tahfeez_core::{AppError, Locale};

    use super::FileSessionStorage;
    use crate::HttpApiClient;

    fn storage_in(dir: &tempfile::TempDir) -> FileSessionStorage {
        FileSessionStorage::new(dir.path().join("nested").join("session.json"))
    }

    #[tokio::test]
    async fn missing_file_loads_nothing() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory")
        };
        let storage = storage_in(&dir);

        assert!(matches!(storage.load("admin-auth").await, Ok(None)));
        assert!(storage.remove("admin-auth").await.is_ok());
        assert!(!storage.path().exists());
    }

    #[tokio::test]
    async fn values_survive_a_new_instance() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory")
        };
        let storage = storage_in(&dir);
        assert!(storage.save("admin-auth", r#"{"token":"abc"}"#).await.is_ok());
        assert!(storage.save("locale", "en").await.is_ok());

        let reopened = storage_in(&dir);

        assert_eq!(
            reopened.load("admin-auth").await.unwrap_or_default(),
            Some(r#"{"token":"abc"}"#.to_owned())
        );
        assert_eq!(
            reopened.load("locale").await.unwrap_or_default(),
            Some("en".to_owned())
        );
    }

    #[tokio::test]
    async fn remove_keeps_other_keys() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory")
        };
        let storage = storage_in(&dir);
        assert!(storage.save("admin-auth", "token").await.is_ok());
        assert!(storage.save("locale", "ar").await.is_ok());

        assert!(storage.remove("admin-auth").await.is_ok());

        assert!(matches!(storage.load("admin-auth").await, Ok(None)));
        assert_eq!(
            storage.load("locale").await.unwrap_or_default(),
            Some("ar".to_owned())
        );
    }

    #[tokio::test]
    async fn corrupt_file_is_a_storage_error_until_cleared() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory")
        };
        let path = dir.path().join("session.json");
        assert!(tokio::fs::write(&path, "{broken").await.is_ok());
        let storage = FileSessionStorage::new(&path);

        assert!(matches!(
            storage.load("admin-auth").await,
            Err(AppError::Storage(_))
        ));

        assert!(storage.remove("admin-auth").await.is_ok());
        assert!(matches!(storage.load("admin-auth").await, Ok(None)));
    }

    #[tokio::test]
    async fn stores_start_fresh_from_a_garbage_session_file() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory")
        };
        let path = dir.path().join("session.json");
        assert!(tokio::fs::write(&path, "{not json").await.is_ok());
        let storage: Arc<dyn SessionStorage> = Arc::new(FileSessionStorage::new(&path));
        let Ok(client) = HttpApiClient::new("http://127.0.0.1:1/api", None) else {
            unreachable!("static base URL")
        };
        let gateway = ApiGateway::new(Arc::new(client), Locale::Ar);

        let mut website = WebsiteStore::new(gateway.clone(), storage.clone());
        assert_eq!(website.restore_locale().await, Locale::Ar);

        assert!(tokio::fs::write(&path, "{not json").await.is_ok());
        let mut admin = AdminStore::new(gateway, storage.clone());
        assert!(!admin.restore_session().await);
        assert!(admin.session().is_none());

        assert!(matches!(storage.load("admin-auth").await, Ok(None)));
    }
}
