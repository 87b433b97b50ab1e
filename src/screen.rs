//! Profile screen controller.
//!
//! Holds the editable username and the loading flag, and runs the three
//! screen actions: loading the profile, saving it, and signing out. Every
//! failure ends up as a notification; nothing is returned to the caller.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, warn};

use crate::{
    backend::{AuthService, Navigator, Notification, Notifier, ProfileStore, SessionProvider},
    error::AppError,
    navigation::Route,
    profile::{ProfileUpdate, Session},
};

const ERROR_TITLE: &str = "Error";
const UPDATE_SUCCESS_TITLE: &str = "Success";
const UPDATE_SUCCESS_MESSAGE: &str = "Profile updated successfully!";
const SIGN_OUT_TITLE: &str = "Signed out";
const SIGN_OUT_MESSAGE: &str = "You have successfully signed out of your account";
const SIGN_OUT_FAILED_MESSAGE: &str = "Failed to sign out of your account";

/// Local state of the screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenState {
    /// Working copy of the username
    pub username: Option<String>,
    /// True while a call from this screen is in flight
    pub loading: bool,
    /// User the last completed fetch was issued for, failed or not
    pub loaded_for: Option<String>,
}

/// Sets `loading` for its lifetime, clears it on every exit path
struct LoadingGuard<'a> {
    state: &'a Mutex<ScreenState>,
}

impl<'a> LoadingGuard<'a> {
    fn start(state: &'a Mutex<ScreenState>) -> Self {
        lock(state).loading = true;
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).loading = false;
    }
}

fn lock(state: &Mutex<ScreenState>) -> MutexGuard<'_, ScreenState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Screen for viewing and editing the signed in user's profile
pub struct ProfileScreen {
    session: Arc<dyn SessionProvider>,
    store: Arc<dyn ProfileStore>,
    auth: Arc<dyn AuthService>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ScreenState>,
}

impl ProfileScreen {
    pub fn new(
        session: Arc<dyn SessionProvider>,
        store: Arc<dyn ProfileStore>,
        auth: Arc<dyn AuthService>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session,
            store,
            auth,
            navigator,
            notifier,
            state: Mutex::new(ScreenState::default()),
        }
    }

    /// Username as shown in the input, empty when unset
    pub fn username(&self) -> String {
        lock(&self.state).username.clone().unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    /// Email of the signed in user, empty without a session
    pub fn email(&self) -> String {
        self.session
            .current()
            .map(|session| session.email().to_string())
            .unwrap_or_default()
    }

    /// Replaces the working copy of the username
    pub fn set_username(&self, username: impl Into<String>) {
        lock(&self.state).username = Some(username.into());
    }

    /// True when the session's user differs from the one last fetched for
    pub fn needs_reload(&self) -> bool {
        let current = self.session.current().map(|session| session.user.id);
        current.is_some() && current != lock(&self.state).loaded_for
    }

    fn signed_in(&self) -> Result<Session, AppError> {
        self.session
            .current()
            .filter(|session| !session.user.id.is_empty())
            .ok_or(AppError::MissingSession)
    }

    /// Fetches the profile of the session's user into the working copy.
    ///
    /// A missing row leaves the username untouched. The result is dropped if
    /// the session switched to another user while the request was in flight.
    pub async fn load_profile(&self) {
        let _loading = LoadingGuard::start(&self.state);

        let session = match self.signed_in() {
            Ok(session) => session,
            Err(err) => {
                self.notifier.notify(Notification::error(ERROR_TITLE, err.to_string()));
                return;
            }
        };
        let user_id = session.user.id.clone();

        let fetched = self.store.fetch_profile(&session, &user_id).await;

        let current_id = self.session.current().map(|current| current.user.id);
        if current_id.as_deref() != Some(user_id.as_str()) {
            debug!(user_id = %user_id, "session changed during fetch, result dropped");
            return;
        }

        match fetched {
            Ok(record) => {
                let mut state = lock(&self.state);
                state.username = record.username;
                state.loaded_for = Some(user_id);
            }
            Err(AppError::ProfileNotFound(_)) => {
                debug!(user_id = %user_id, "no profile row yet");
                lock(&self.state).loaded_for = Some(user_id);
            }
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "failed to load profile");
                lock(&self.state).loaded_for = Some(user_id);
                self.notifier.notify(Notification::error(ERROR_TITLE, err.to_string()));
            }
        }
    }

    /// Upserts the working copy of the username for the session's user
    pub async fn update_profile(&self) {
        let _loading = LoadingGuard::start(&self.state);

        let session = match self.signed_in() {
            Ok(session) => session,
            Err(err) => {
                self.notifier.notify(Notification::error(ERROR_TITLE, err.to_string()));
                return;
            }
        };

        let update = ProfileUpdate {
            id: session.user.id.clone(),
            username: lock(&self.state).username.clone(),
            updated_at: Utc::now(),
        };

        match self.store.upsert_profile(&session, &update).await {
            Ok(()) => {
                debug!(user_id = %update.id, "profile updated");
                self.notifier
                    .notify(Notification::success(UPDATE_SUCCESS_TITLE, UPDATE_SUCCESS_MESSAGE));
            }
            Err(err) => {
                warn!(user_id = %update.id, error = %err, "failed to update profile");
                self.notifier.notify(Notification::error(ERROR_TITLE, err.to_string()));
            }
        }
    }

    /// Signs out, then clears the session, the working copy, and routes to
    /// the login view.
    ///
    /// On failure the session is kept and the screen stays where it is.
    pub async fn sign_out(&self) {
        let _loading = LoadingGuard::start(&self.state);

        let result = match self.signed_in() {
            Ok(session) => self.auth.sign_out(&session).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                self.session.clear();
                {
                    let mut state = lock(&self.state);
                    state.username = None;
                    state.loaded_for = None;
                }
                self.navigator.navigate(Route::Login);
                self.notifier
                    .notify(Notification::success(SIGN_OUT_TITLE, SIGN_OUT_MESSAGE));
            }
            Err(err) => {
                warn!(error = %err, "failed to sign out");
                self.notifier
                    .notify(Notification::error(ERROR_TITLE, SIGN_OUT_FAILED_MESSAGE));
            }
        }
    }
}
