//! Navigation requests emitted by the wizard. Delivery is fire-and-forget.

use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    ProjectDetail(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::ProjectDetail(id) => format!("/projects/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Receives navigation requests. Implementations must not block.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Keeps every request in order, for hosts that poll instead of reacting.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes
            .lock()
            .map(|routes| routes.clone())
            .unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route);
        }
    }
}
