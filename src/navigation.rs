use std::sync::Mutex;

use tracing::debug;

use crate::backend::Navigator;

/// Views the app can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Profile,
    Quit,
}

impl Route {
    /// Path of the route, as shown in logs
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Profile => "/profile",
            Route::Quit => "/quit",
        }
    }
}

/// Current route, read by the app loop after every action
#[derive(Debug)]
pub struct RouteCell {
    route: Mutex<Route>,
}

impl RouteCell {
    pub fn new(initial: Route) -> Self {
        Self {
            route: Mutex::new(initial),
        }
    }

    /// Returns the current route
    pub fn current(&self) -> Route {
        *self.route.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Navigator for RouteCell {
    fn navigate(&self, route: Route) {
        debug!(path = route.path(), "navigate");
        *self.route.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = route;
    }
}
