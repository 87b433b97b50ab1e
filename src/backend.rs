//! Capabilities the profile screen is built from.
//!
//! Each collaborator is a trait so the screen can run against the Supabase
//! client in the binary and against in-memory doubles in tests.

use std::time::Duration;

use async_trait::async_trait;

use crate::{
    error::AppError,
    navigation::Route,
    profile::{ProfileRecord, ProfileUpdate, Session},
};

/// Holder of the current session, owned by the app
pub trait SessionProvider: Send + Sync {
    /// Returns the current session, if any
    fn current(&self) -> Option<Session>;

    /// Drops the current session
    fn clear(&self);
}

/// Row store for user profiles
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetches exactly one profile by user id.
    ///
    /// Returns [`AppError::ProfileNotFound`] when no row matches.
    async fn fetch_profile(&self, session: &Session, id: &str) -> Result<ProfileRecord, AppError>;

    /// Inserts or replaces the profile keyed by `update.id`
    async fn upsert_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<(), AppError>;
}

/// Authentication service
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Revokes the session on the server
    async fn sign_out(&self, session: &Session) -> Result<(), AppError>;
}

/// Route changes requested by screens
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Kind of notification, drives styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Toast-style message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub kind: NotificationKind,
    pub duration: Duration,
    pub dismissible: bool,
}

/// How long a notification stays up
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

impl Notification {
    /// Success notification with the default duration
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NotificationKind::Success,
            duration: NOTIFICATION_DURATION,
            dismissible: true,
        }
    }

    /// Error notification with the default duration
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            ..Self::success(title, description)
        }
    }
}

/// Fire-and-forget notification sink
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
