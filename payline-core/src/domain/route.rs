//! Navigation surface: the four pages and how paths map onto them

use serde::Serialize;

/// A page of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Signup,
    Signin,
    Dashboard,
    /// Catch-all page linking back to the dashboard
    NotFound,
}

impl Route {
    /// Resolve a path such as `/dashboard` or `/signin?next=1`
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let path = path.trim_end_matches('/');
        match path {
            "/signup" => Route::Signup,
            "/signin" => Route::Signin,
            "/dashboard" => Route::Dashboard,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Signup => "/signup",
            Route::Signin => "/signin",
            Route::Dashboard => "/dashboard",
            Route::NotFound => "/*",
        }
    }

    /// Pages that need a session token to render
    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Dashboard)
    }

    /// Page name used as diagnostic context
    pub fn page_name(&self) -> &'static str {
        match self {
            Route::Signup => "signup",
            Route::Signin => "signin",
            Route::Dashboard => "dashboard",
            Route::NotFound => "not_found",
        }
    }
}

/// What the front end should do after a navigation decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "route", rename_all = "lowercase")]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
    /// Full reload; the guard runs again from scratch
    Reload,
}
