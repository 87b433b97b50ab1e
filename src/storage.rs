use std::{fs, path::{Path, PathBuf}};

use tracing::debug;

use crate::{error::AppError, profile::Session};

/// Session file in user's home directory
const GLOBAL_SESSION_FILE: &str = ".supaprofile_session.json";

/// Gets the default path to the session file
pub fn get_global_session_path() -> Result<PathBuf, AppError> {
    let home_dir: PathBuf = dirs::home_dir().ok_or_else(|| {
        AppError::Config("failed to find the home directory".to_string())
    })?;
    Ok(home_dir.join(GLOBAL_SESSION_FILE))
}

/// Session persisted as JSON between runs
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default home directory location
    pub fn global() -> Result<Self, AppError> {
        Ok(Self::new(get_global_session_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the session, `None` when no file or an empty one exists
    pub fn load(&self) -> Result<Option<Session>, AppError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file_contents: String = fs::read_to_string(&self.path)?;
        if file_contents.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&file_contents)?))
    }

    /// Saves the session to the JSON file
    ///
    /// # Arguments
    /// * `session` - Session to save
    pub fn save(&self, session: &Session) -> Result<(), AppError> {
        let json: String = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Removes the session file if present
    pub fn remove(&self) -> Result<(), AppError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            debug!(path = %self.path.display(), "session removed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SessionUser;

    fn session() -> Session {
        Session {
            access_token: "tok".to_string(),
            refresh_token: None,
            user: SessionUser {
                id: "u-1".to_string(),
                email: Some("a@example.com".to_string()),
            },
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let store = FileSessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_load_empty_file() {
        let file = tempfile::NamedTempFile::new().expect("temp file should be created");
        let store = FileSessionStore::new(file.path());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_remove() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let store = FileSessionStore::new(dir.path().join("session.json"));

        store.save(&session()).unwrap();
        assert_eq!(store.load().unwrap(), Some(session()));

        store.remove().unwrap();
        assert!(!store.path().exists());
        assert_eq!(store.load().unwrap(), None);
    }
}
