use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::{
    backend::SessionProvider, error::AppError, profile::Session, storage::FileSessionStore,
};

/// Session shared between the app loop and its screens.
///
/// When a file store is attached, every change is written through to it.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    session: Arc<RwLock<Option<Session>>>,
    file: Option<FileSessionStore>,
}

impl SharedSession {
    #[cfg(test)]
    pub fn new(session: Option<Session>) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            file: None,
        }
    }

    /// Loads the session from `file` and keeps it in sync with the file afterwards
    pub fn from_file(file: FileSessionStore) -> Result<Self, AppError> {
        let session = file.load()?;
        Ok(Self {
            session: Arc::new(RwLock::new(session)),
            file: Some(file),
        })
    }

    /// Replaces the current session
    pub fn set(&self, session: Session) -> Result<(), AppError> {
        if let Some(file) = &self.file {
            file.save(&session)?;
        }
        *self.session.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(session);
        Ok(())
    }
}

impl SessionProvider for SharedSession {
    fn current(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn clear(&self) {
        *self.session.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        if let Some(file) = &self.file
            && let Err(err) = file.remove()
        {
            warn!(error = %err, "failed to remove session file");
        }
    }
}
