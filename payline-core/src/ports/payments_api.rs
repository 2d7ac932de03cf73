//! Payments service port
//!
//! Everything the client asks of the remote payments service. The HTTP
//! adapter is the production implementation; tests substitute fakes.

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{
    AccountSnapshot, Candidate, SessionToken, SigninForm, SignupForm, TransferReceipt,
    TransferRequest,
};

/// Remote payments service
#[async_trait]
pub trait PaymentsApi: Send + Sync {
    /// Register a new user. Only the HTTP status is checked.
    async fn signup(&self, form: &SignupForm) -> Result<()>;

    /// Exchange credentials for a session token
    async fn signin(&self, credentials: &SigninForm) -> Result<SessionToken>;

    /// Fetch profile and balance for the token's owner
    ///
    /// A response whose status flag is false is an `Error::Rejected`.
    async fn fetch_account(&self, token: &SessionToken) -> Result<AccountSnapshot>;

    /// Search the user directory; `filter` is sent as-is
    async fn search_users(&self, filter: &str) -> Result<Vec<Candidate>>;

    /// Send funds. The receipt's status flag is returned, not interpreted.
    async fn transfer(
        &self,
        token: &SessionToken,
        request: &TransferRequest,
    ) -> Result<TransferReceipt>;
}
