//! Payments service HTTP client
//!
//! Talks JSON to the payments service:
//! - POST /user/signup, POST /user/signin
//! - GET /account/balance, POST /account/transfer (authenticated by a `token` header)
//! - GET /user/search?filter=...

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::{
    AccountSnapshot, Candidate, SessionToken, SigninForm, SignupForm, TransferReceipt,
    TransferRequest, UserProfile,
};
use crate::ports::PaymentsApi;

/// Service address used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Environment variable overriding the configured service address
pub const API_URL_ENV: &str = "PAYLINE_API_URL";

/// Header carrying the session token on authenticated calls
const TOKEN_HEADER: &str = "token";

// =============================================================================
// API Response Models
// =============================================================================

#[derive(Debug, Deserialize)]
struct SigninResponse {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    #[serde(default)]
    status: bool,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    balance: Option<Decimal>,
    #[serde(default)]
    firstname: Option<String>,
    #[serde(default)]
    lastname: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    user: Vec<DirectoryUser>,
}

/// User record as the directory returns it
#[derive(Debug, Deserialize)]
struct DirectoryUser {
    /// Some deployments send `_id`, and some send numbers
    #[serde(default, alias = "_id", deserialize_with = "deserialize_optional_id")]
    id: Option<String>,
    #[serde(default)]
    firstname: String,
    #[serde(default)]
    lastname: String,
    #[serde(default)]
    email: String,
}

#[derive(Debug, Deserialize)]
struct TransferResponse {
    #[serde(default)]
    status: bool,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    balance: Option<Decimal>,
}

impl From<DirectoryUser> for Candidate {
    fn from(user: DirectoryUser) -> Self {
        // Older directories only key users by email
        let id = user.id.unwrap_or_else(|| user.email.clone());
        Candidate {
            id,
            firstname: user.firstname,
            lastname: user.lastname,
            email: user.email,
        }
    }
}

/// Deserialize an optional ID that can be number or string
fn deserialize_optional_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    match value {
        Some(JsonValue::Number(n)) => Ok(Some(n.to_string())),
        Some(JsonValue::String(s)) => Ok(Some(s)),
        Some(JsonValue::Null) | None => Ok(None),
        _ => Err(D::Error::custom("expected number or string for id")),
    }
}

/// Deserialize an optional amount that can be number or string
fn deserialize_optional_decimal<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    let text = match value {
        Some(JsonValue::Number(n)) => n.to_string(),
        Some(JsonValue::String(s)) => s,
        Some(JsonValue::Null) | None => return Ok(None),
        _ => return Err(D::Error::custom("expected number or string for amount")),
    };
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .map(Some)
        .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e)))
}

// =============================================================================
// HTTP Client
// =============================================================================

/// Payments service client
#[derive(Debug, Clone)]
pub struct PaymentsHttpClient {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl PaymentsHttpClient {
    /// Create a client for the service at `base_url`
    ///
    /// `timeout` of `None` lets a request wait forever.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| {
            Error::Config(format!("Invalid payments service URL '{}': {}", base_url, e))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Payments service URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn search_url(&self, filter: &str) -> Result<Url> {
        Url::parse_with_params(&self.endpoint("/user/search"), &[("filter", filter)])
            .map_err(|e| Error::Config(format!("Invalid search URL: {}", e)))
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            match self.timeout {
                Some(t) => Error::http(format!("Request timed out after {} seconds", t.as_secs())),
                None => Error::http("Request timed out"),
            }
        } else if error.is_connect() {
            Error::http(format!(
                "Unable to connect to the payments service at {}",
                self.base_url
            ))
        } else {
            // The URL carries the search filter; keep it out of the message
            Error::http(format!("Payments request failed: {}", error.without_url()))
        }
    }

    /// Anything outside 2xx is an error
    fn check_response_status(response: &Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Status(status.as_u16()))
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| {
                Error::http(format!("Failed to parse {} response: {}", what, e.without_url()))
            })
    }
}

#[async_trait]
impl PaymentsApi for PaymentsHttpClient {
    async fn signup(&self, form: &SignupForm) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint("/user/signup"))
            .json(form)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        Self::check_response_status(&response)
    }

    async fn signin(&self, credentials: &SigninForm) -> Result<SessionToken> {
        let response = self
            .client
            .post(self.endpoint("/user/signin"))
            .json(credentials)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        Self::check_response_status(&response)?;

        let body: SigninResponse = Self::parse(response, "sign in").await?;
        match body.token {
            Some(token) if !token.is_empty() => Ok(SessionToken::new(token)),
            _ => Err(Error::rejected("sign in response carried no token")),
        }
    }

    async fn fetch_account(&self, token: &SessionToken) -> Result<AccountSnapshot> {
        let response = self
            .client
            .get(self.endpoint("/account/balance"))
            .header(TOKEN_HEADER, token.as_str())
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        Self::check_response_status(&response)?;

        let body: BalanceResponse = Self::parse(response, "balance").await?;
        if !body.status {
            return Err(Error::rejected("account lookup reported failure"));
        }

        let balance = body
            .balance
            .ok_or_else(|| Error::http("Balance response is missing the balance"))?;

        Ok(AccountSnapshot {
            profile: UserProfile {
                firstname: body.firstname.unwrap_or_default(),
                lastname: body.lastname.unwrap_or_default(),
            },
            balance,
        })
    }

    async fn search_users(&self, filter: &str) -> Result<Vec<Candidate>> {
        let url = self.search_url(filter)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        Self::check_response_status(&response)?;

        let body: SearchResponse = Self::parse(response, "search").await?;
        Ok(body.user.into_iter().map(Candidate::from).collect())
    }

    async fn transfer(
        &self,
        token: &SessionToken,
        request: &TransferRequest,
    ) -> Result<TransferReceipt> {
        let response = self
            .client
            .post(self.endpoint("/account/transfer"))
            .header(TOKEN_HEADER, token.as_str())
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        Self::check_response_status(&response)?;

        let body: TransferResponse = Self::parse(response, "transfer").await?;
        Ok(TransferReceipt {
            status: body.status,
            balance: body.balance,
        })
    }
}
