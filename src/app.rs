use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    backend::{Navigator, Notification, Notifier, SessionProvider},
    config::SupabaseConfig,
    error::AppError,
    navigation::{Route, RouteCell},
    notify::TerminalNotifier,
    screen::ProfileScreen,
    session::SharedSession,
    storage::FileSessionStore,
    supabase::SupabaseClient,
};

const SIGN_IN_TITLE: &str = "Signed in";

/// Wiring of the session, backend client, and screens
pub struct App {
    pub session: SharedSession,
    pub client: Arc<SupabaseClient>,
    pub routes: Arc<RouteCell>,
    pub notifier: Arc<dyn Notifier>,
    pub screen: ProfileScreen,
}

impl App {
    pub fn new(config: SupabaseConfig, session_file: FileSessionStore) -> Result<Self, AppError> {
        debug!(path = %session_file.path().display(), "loading session");
        let session = SharedSession::from_file(session_file)?;
        let client = Arc::new(SupabaseClient::new(config));
        let initial = if session.current().is_some() {
            Route::Profile
        } else {
            Route::Login
        };
        let routes = Arc::new(RouteCell::new(initial));
        let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);

        let screen = ProfileScreen::new(
            Arc::new(session.clone()),
            client.clone(),
            client.clone(),
            routes.clone(),
            notifier.clone(),
        );

        Ok(Self {
            session,
            client,
            routes,
            notifier,
            screen,
        })
    }

    /// Signs in, stores the session, and routes to the profile view.
    ///
    /// Failures are reported as notifications; the route stays on login.
    pub async fn sign_in(&self, email: &str, password: &str) {
        let result = match self.client.sign_in_with_password(email, password).await {
            Ok(session) => self.session.set(session),
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                info!("session stored");
                self.routes.navigate(Route::Profile);
                self.notifier
                    .notify(Notification::success(SIGN_IN_TITLE, format!("Welcome, {email}")));
            }
            Err(err) => {
                self.notifier.notify(Notification::error("Error", err.to_string()));
            }
        }
    }
}
