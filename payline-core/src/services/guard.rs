//! Route guard - gates protected pages on the presence of a session token

use std::sync::Arc;

use crate::domain::{Navigation, Route};
use crate::ports::SessionStore;

/// Where an unauthenticated visitor to a protected page is sent
pub const SIGNED_OUT_LANDING: Route = Route::Signup;

/// Decides whether a navigation target may render
///
/// Token presence alone grants access; expiry and signature are the
/// payments service's business.
pub struct RouteGuard {
    session: Arc<dyn SessionStore>,
}

impl RouteGuard {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    /// Decide for an already-resolved route
    pub fn check(&self, route: Route) -> Navigation {
        if route.requires_session() && !self.session.has_token() {
            Navigation::Redirect(SIGNED_OUT_LANDING)
        } else {
            Navigation::Render(route)
        }
    }

    /// Decide for a raw path such as `/dashboard`
    pub fn resolve(&self, path: &str) -> Navigation {
        self.check(Route::from_path(path))
    }
}
