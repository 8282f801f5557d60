//! Session stores persisting the auth flag and the color scheme

use crate::core::auth::{SessionStore, User};
use crate::core::error::SessionError;
use crate::core::theme::{ThemeMode, ThemeStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

/// File name of the color scheme, stored beside the auth flag
pub const THEME_FILE_NAME: &str = "color-scheme.json";

/// On-disk shape of the persisted auth state
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedAuth {
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    is_authenticated: bool,
}

/// Session store backed by a small JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<User>, SessionError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let persisted: PersistedAuth =
            serde_json::from_str(&content).map_err(|source| SessionError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        // the flag and the user must agree, otherwise the state is signed out
        Ok(persisted.user.filter(|_| persisted.is_authenticated))
    }

    fn save(&self, user: Option<&User>) -> Result<(), SessionError> {
        if user.is_none() && !self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let persisted = PersistedAuth {
            user: user.cloned(),
            is_authenticated: user.is_some(),
        };
        let json = serde_json::to_string_pretty(&persisted).map_err(|source| {
            SessionError::Encode {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), authenticated = user.is_some(), "session saved");
        Ok(())
    }
}

/// On-disk shape of the persisted color scheme
#[derive(Debug, Serialize, Deserialize)]
struct PersistedTheme {
    color_scheme: ThemeMode,
}

/// Color scheme store backed by a small JSON file
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store living in the same directory as the session file
    pub fn beside(session_path: &Path) -> Self {
        let dir = session_path.parent().unwrap_or_else(|| Path::new(""));
        Self::new(dir.join(THEME_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<ThemeMode>, SessionError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let persisted: PersistedTheme =
            serde_json::from_str(&content).map_err(|source| SessionError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(persisted.color_scheme))
    }

    fn save(&self, mode: ThemeMode) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(&PersistedTheme { color_scheme: mode })
            .map_err(|source| SessionError::Encode {
                path: self.path.clone(),
                source,
            })?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), %mode, "color scheme saved");
        Ok(())
    }
}

/// Color scheme store kept in memory
#[derive(Debug, Default)]
pub struct InMemoryThemeStore {
    mode: RwLock<Option<ThemeMode>>,
}

impl InMemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ThemeStore for InMemoryThemeStore {
    fn load(&self) -> Result<Option<ThemeMode>, SessionError> {
        let mode = self.mode.read().map_err(|_| SessionError::Lock)?;
        Ok(*mode)
    }

    fn save(&self, mode: ThemeMode) -> Result<(), SessionError> {
        let mut slot = self.mode.write().map_err(|_| SessionError::Lock)?;
        *slot = Some(mode);
        Ok(())
    }
}

/// Session store kept in memory, for tests and embedding
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    user: RwLock<Option<User>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<User>, SessionError> {
        let user = self.user.read().map_err(|_| SessionError::Lock)?;
        Ok(user.clone())
    }

    fn save(&self, user: Option<&User>) -> Result<(), SessionError> {
        let mut slot = self.user.write().map_err(|_| SessionError::Lock)?;
        *slot = user.cloned();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user() -> User {
        User {
            id: "1".to_string(),
            username: "amy".to_string(),
            logged_in_at: Utc::now(),
        }
    }

    #[test]
    fn test_missing_file_is_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("auth-storage.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("auth-storage.json"));

        let user = user();
        store.save(Some(&user)).unwrap();
        assert_eq!(store.load().unwrap(), Some(user));

        store.save(None).unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth-storage.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = FileSessionStore::new(&path).load().unwrap_err();
        assert!(matches!(err, SessionError::Corrupt { .. }));
    }

    #[test]
    fn test_flag_off_means_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth-storage.json");
        let body = serde_json::json!({ "user": user(), "is_authenticated": false });
        std::fs::write(&path, body.to_string()).unwrap();

        assert_eq!(FileSessionStore::new(&path).load().unwrap(), None);
    }

    #[test]
    fn test_theme_file_sits_beside_session() {
        let dir = tempfile::tempdir().unwrap();
        let session_path = dir.path().join("fleetview").join("auth-storage.json");
        let store = FileThemeStore::beside(&session_path);
        assert_eq!(store.path(), dir.path().join("fleetview").join(THEME_FILE_NAME));

        assert_eq!(store.load().unwrap(), None);
        store.save(ThemeMode::Dark).unwrap();
        assert_eq!(store.load().unwrap(), Some(ThemeMode::Dark));
    }

    #[test]
    fn test_corrupt_theme_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(THEME_FILE_NAME);
        std::fs::write(&path, "dark").unwrap();

        let err = FileThemeStore::new(&path).load().unwrap_err();
        assert!(matches!(err, SessionError::Corrupt { .. }));
    }

    #[test]
    fn test_in_memory_store() {
        let store = InMemorySessionStore::new();
        store.save(Some(&user())).unwrap();
        assert!(store.load().unwrap().is_some());
        store.save(None).unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
