//! Auth service - registration and sign-in
//!
//! Both flows validate the form first; nothing is sent when a field fails.
//! On success the session token is stored and the caller is pointed at the
//! dashboard.

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{LogEvent, Navigation, Route, SigninForm, SignupForm};
use crate::ports::{DiagnosticSink, PaymentsApi, SessionStore};

pub struct AuthService {
    api: Arc<dyn PaymentsApi>,
    session: Arc<dyn SessionStore>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl AuthService {
    pub fn new(
        api: Arc<dyn PaymentsApi>,
        session: Arc<dyn SessionStore>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            api,
            session,
            diagnostics,
        }
    }

    /// Sign in with existing credentials
    pub async fn signin(&self, form: &SigninForm) -> Result<Navigation> {
        form.validate()?;

        let token = self
            .api
            .signin(form)
            .await
            .map_err(|e| self.report("signin_failed", Route::Signin, e))?;

        self.session.set(&token)?;
        Ok(Navigation::Redirect(Route::Dashboard))
    }

    /// Register, then sign in with the same credentials
    pub async fn signup(&self, form: &SignupForm) -> Result<Navigation> {
        form.validate()?;

        self.api
            .signup(form)
            .await
            .map_err(|e| self.report("signup_failed", Route::Signup, e))?;

        let token = self
            .api
            .signin(&form.credentials())
            .await
            .map_err(|e| self.report("signin_failed", Route::Signup, e))?;

        self.session.set(&token)?;
        Ok(Navigation::Redirect(Route::Dashboard))
    }

    fn report(&self, event: &str, page: Route, error: Error) -> Error {
        self.diagnostics.record(
            LogEvent::new(event)
                .with_page(page.page_name())
                .with_error(error.to_string()),
        );
        error
    }
}
